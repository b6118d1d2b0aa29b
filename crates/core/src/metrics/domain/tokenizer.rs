use std::collections::HashSet;

use crate::shared::constants::{METRIC_PRECISION, STOPWORDS};

/// Lower-cased content words: every non-alphanumeric character separates
/// tokens and stop words are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    split_alphanumeric(text)
        .into_iter()
        .filter(|tok| !STOPWORDS.contains(&tok.as_str()))
        .collect()
}

pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Lower-cased alphanumeric runs, stop words kept.
pub fn split_alphanumeric(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Round to the precision every reported metric uses.
pub fn round_metric(value: f64) -> f64 {
    let factor = 10f64.powi(METRIC_PRECISION);
    (value * factor).round() / factor
}
