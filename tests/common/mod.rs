use rand::RngExt as _;
use typo_weight::prelude::*;

/// Accepted items, best first, one per line
pub fn ranked(analyzer: &Analyzer, query: &str, items: &[&str]) -> String {
    analyzer
        .analyze_all(query, items)
        .unwrap()
        .iter()
        .map(|output| output.text().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Random lowercase words, some of them with separators
pub fn random_words(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let len = rng.random_range(1..16);
            (0..len)
                .map(|_| {
                    if rng.random_range(0..8) == 0 {
                        ['-', '_', ' ', '/'][rng.random_range(0..4)]
                    } else {
                        char::from(b'a' + rng.random_range(0..26u8))
                    }
                })
                .collect()
        })
        .collect()
}
