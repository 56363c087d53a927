use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};
use rayon::prelude::*;

use docmatch::{DocMatchConfig, MatchInput, MatchResult, PlainTextEngine, VerificationEngine};
use docmatch::ocr::with_ocr_session;

/// Verify provided addresses and names against extracted document text
#[derive(Parser, Debug)]
#[command(name = "verify_text", version, about)]
struct Args {
    /// Address the user supplied
    #[arg(long, requires = "text_file", conflicts_with = "batch")]
    address: Option<String>,

    /// Full name the user supplied
    #[arg(long, default_value = "")]
    name: String,

    /// File holding the text read from the document
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// JSON Lines file, one MatchInput object per line
    #[arg(long)]
    batch: Option<PathBuf>,

    /// INI configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides [processor] log_level
    #[arg(long)]
    log_level: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Write results here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn init_logging(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .target(env_logger::Target::Stderr)
        .init();
}

fn load_config(args: &Args) -> docmatch::Result<DocMatchConfig> {
    let mut config = match &args.config {
        Some(path) => DocMatchConfig::from_ini(path)?,
        None => DocMatchConfig::default(),
    };
    if let Some(level) = &args.log_level {
        config.processor.set_log_level(level)?;
    }
    Ok(config)
}

fn read_batch(path: &Path) -> docmatch::Result<Vec<MatchInput>> {
    let reader = BufReader::new(File::open(path)?);
    let mut inputs = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let input: MatchInput = serde_json::from_str(&line).map_err(|e| {
            warn!("Invalid input on line {}: {}", line_num + 1, e);
            e
        })?;
        inputs.push(input);
    }
    Ok(inputs)
}

fn write_result(out: &mut dyn Write, result: &MatchResult, pretty: bool) -> docmatch::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, result)?;
    } else {
        serde_json::to_writer(&mut *out, result)?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    init_logging(config.processor.get_log_level());
    info!("Starting verification with log level: {:?}", config.processor.get_log_level());

    let threads = config.processor.effective_threads();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(docmatch::Error::from)?;

    let engine = VerificationEngine::new(config)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if let Some(batch_path) = &args.batch {
        let inputs = read_batch(batch_path)?;
        info!("Verifying {} documents from {:?} on {} threads", inputs.len(), batch_path, threads);

        let progress = ProgressBar::new(inputs.len() as u64);
        progress.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | ETA: {eta_precise}")?);

        let results: Vec<MatchResult> = pool.install(|| {
            inputs
                .par_iter()
                .progress_with(progress.clone())
                .map(|input| engine.verify(input))
                .collect()
        });
        progress.finish_and_clear();

        let matched = results.iter().filter(|r| r.address_matched).count();
        info!("{} of {} documents matched the provided address", matched, results.len());

        for result in &results {
            write_result(&mut out, result, args.pretty)?;
        }
    } else {
        let (Some(address), Some(text_file)) = (&args.address, &args.text_file) else {
            eprintln!("Either --batch or both --address and --text-file are required.");
            eprintln!("Use --help to see available options.");
            std::process::exit(2);
        };

        let bytes = fs::read(text_file)?;
        let result = with_ocr_session(
            || Ok(PlainTextEngine),
            |session| engine.verify_document_bytes(session, &bytes, address, &args.name),
        )?;
        write_result(&mut out, &result, args.pretty)?;
    }

    out.flush()?;
    Ok(())
}
