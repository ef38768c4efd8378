//! Term-frequency vectorization and cosine similarity over two texts.
//!
//! The vector space is the union of tokens appearing in either text; no
//! global vocabulary or IDF weighting is involved.

use std::collections::HashMap;

/// Lowercased alphanumeric tokens. `+` and `#` stay inside tokens so
/// "c++" and "c#" survive tokenization.
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '+' || ch == '#' {
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

/// Token occurrence counts for one text.
#[inline]
pub fn term_frequencies(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Cosine similarity between two sparse term-frequency vectors. Zero when
/// either vector is empty.
#[inline]
pub fn cosine(a: &HashMap<String, u32>, b: &HashMap<String, u32>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, &count_a)| {
            b.get(term)
                .map(|&count_b| f64::from(count_a) * f64::from(count_b))
        })
        .sum();

    let norm_a = a.values().map(|&c| f64::from(c) * f64::from(c)).sum::<f64>().sqrt();
    let norm_b = b.values().map(|&c| f64::from(c) * f64::from(c)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
