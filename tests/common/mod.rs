//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const POSITIVE: [&str; 12] = [
    "Wow... Loved this place.",
    "The selection on the menu was great and so were the prices.",
    "Great food and excellent service.",
    "The staff was friendly and the service was prompt.",
    "Excellent burgers, I will be back.",
    "Highly recommended, an excellent experience.",
    "The fries were great too.",
    "Loved the atmosphere and the great music.",
    "Amazing food, excellent value.",
    "The waitress was very friendly.",
    "Perfect spot for a great dinner.",
    "Everything was fresh and delicious.",
];

pub const NEGATIVE: [&str; 12] = [
    "Crust is not good.",
    "Not tasty and the texture was just nasty.",
    "The food was awful and cold.",
    "Terrible service, never coming back.",
    "The potatoes were bland and awful.",
    "Worst experience ever, rude staff.",
    "The burger was terrible and overpriced.",
    "Awful music and a dirty table.",
    "Horrible food, I was disappointed.",
    "The waiter was rude and slow.",
    "Disgusting and stale bread.",
    "Never again, a terrible dinner.",
];

/// Write `rows` (text, label) as a tab-separated file with a header.
pub fn write_tsv(dir: &Path, name: &str, rows: &[(&str, bool)]) -> PathBuf {
    let mut content = String::from("Sentiment\tLabel\n");
    for (text, label) in rows {
        content.push_str(&format!("{text}\t{}\n", u8::from(*label)));
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Alternating positive/negative rows, `n` of each.
pub fn reviews(n: usize) -> Vec<(&'static str, bool)> {
    POSITIVE
        .iter()
        .zip(NEGATIVE.iter())
        .take(n)
        .flat_map(|(p, n)| [(*p, true), (*n, false)])
        .collect()
}
