// src/ngram/phrase.rs
//
// Verbatim phrase gate: a run of consecutive address words found word for
// word in the document text.

use log::debug;

/// Whether a normalized address has enough words for a window of `window` tokens.
pub fn supports_strict_gate(normalized_address: &str, window: usize) -> bool {
    window > 0 && normalized_address.split_whitespace().count() >= window
}

/// Slides a `window`-token window over the normalized address and returns the
/// first window that occurs as a substring of the normalized text.
///
/// Returns `None` when the address is shorter than the window.
pub fn strict_ngram_match(normalized_address: &str, normalized_text: &str, window: usize) -> Option<String> {
    if !supports_strict_gate(normalized_address, window) {
        return None;
    }

    let tokens: Vec<&str> = normalized_address.split_whitespace().collect();
    let found = tokens
        .windows(window)
        .map(|w| w.join(" "))
        .find(|phrase| normalized_text.contains(phrase.as_str()));

    match &found {
        Some(phrase) => debug!("strict gate matched '{}'", phrase),
        None => debug!("strict gate: none of {} windows found", tokens.len() + 1 - window),
    }
    found
}
