//! Text coherence analysis.
//!
//! Turns raw text into four bounded wave metrics (curl, divergence,
//! potential, entropy) and a 0-100 composite score. The analysis is
//! fully deterministic: identical input always yields identical metrics.

use std::collections::BTreeMap;

use tracing::debug;

use crate::metrics::{
    round2, CoherenceMetrics, CoherenceReport, COHERENCE_THRESHOLD, CURL_WEIGHT,
    DIVERGENCE_TARGET, DIVERGENCE_WEIGHT, ENTROPY_WEIGHT, POTENTIAL_WEIGHT, SNAP_IN_THRESHOLD,
};

/// Analyzer for free-form text coherence.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoherenceAnalyzer;

impl CoherenceAnalyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Analyze text coherence using wave analysis patterns.
    pub fn analyze(&self, text: &str) -> CoherenceReport {
        let sentences = split_sentences(text);
        let lex_div = lexical_diversity(text);

        let curl = detect_curl(&sentences);
        let divergence = detect_divergence(&sentences);
        let potential = calculate_potential(text, lex_div);
        let entropy = calculate_entropy(text);

        let raw_score = (1.0
            - curl * CURL_WEIGHT
            - (divergence - DIVERGENCE_TARGET).abs() * DIVERGENCE_WEIGHT
            - (1.0 - potential) * POTENTIAL_WEIGHT
            - (1.0 - entropy) * ENTROPY_WEIGHT)
            * 100.0;
        let coherence_score = round2(raw_score.clamp(0.0, 100.0));

        debug!(
            curl = curl,
            divergence = divergence,
            potential = potential,
            entropy = entropy,
            score = coherence_score,
            "Coherence analyzed"
        );

        CoherenceReport {
            coherence: CoherenceMetrics {
                curl,
                divergence,
                potential,
                entropy,
            },
            coherence_score,
            passed: coherence_score >= COHERENCE_THRESHOLD * 100.0,
            snap_in: coherence_score >= SNAP_IN_THRESHOLD * 100.0,
        }
    }
}

/// Split text into trimmed, non-empty sentences on `.`, `!`, `?`.
fn split_sentences(text: &str) -> Vec<String> {
    text.replace(['!', '?'], ".")
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lexical diversity (type-token ratio) over case-folded words.
fn lexical_diversity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let unique: std::collections::HashSet<&str> = words.iter().copied().collect();
    unique.len() as f64 / words.len() as f64
}

/// Detect curl (circular reasoning) via repeated 3-word shingles.
///
/// Lower values are better (less circular reasoning).
fn detect_curl(sentences: &[String]) -> f64 {
    let mut sequences: BTreeMap<String, u32> = BTreeMap::new();
    for sentence in sentences {
        let lowered = sentence.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        for window in words.windows(3) {
            *sequences.entry(window.join(" ")).or_insert(0) += 1;
        }
    }

    if sequences.is_empty() {
        return 0.0;
    }

    let repetition: f64 = sequences
        .values()
        .filter(|&&count| count > 1)
        .map(|&count| (count - 1) as f64 * 0.2)
        .sum();
    (repetition / sequences.len() as f64).min(1.0)
}

/// Detect divergence (unresolved expansion) across the sentence sequence.
///
/// The composite treats 0.2 as the healthy amount of expansion.
fn detect_divergence(sentences: &[String]) -> f64 {
    if sentences.len() < 3 {
        return 0.0;
    }

    let complexities: Vec<i64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as i64)
        .collect();

    let mut expansion: f64 = complexities
        .windows(2)
        .filter(|pair| pair[1] - pair[0] > 5)
        .map(|_| 0.1)
        .sum();

    // An expansion counts as resolved only if sentence complexity
    // strictly decreases somewhere in the final third.
    let tail_len = (sentences.len() / 3).max(1);
    let tail = &complexities[complexities.len() - tail_len..];
    let has_resolution = tail.windows(2).any(|pair| pair[1] < pair[0]);

    if !has_resolution && expansion > 0.0 {
        expansion += 0.2;
    }

    expansion.min(1.0)
}

/// Connective vocabulary that signals argumentative structure.
const CONNECTIVES: [&str; 7] = [
    "therefore",
    "however",
    "moreover",
    "furthermore",
    "consequently",
    "nevertheless",
    "specifically",
];

/// Calculate potential (latent structure) from connective density and
/// lexical diversity.
fn calculate_potential(text: &str, lex_div: f64) -> f64 {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let connective_count = words.iter().filter(|w| CONNECTIVES.contains(w)).count();
    let connective_ratio = connective_count as f64 / words.len() as f64;

    (lex_div * 0.6 + connective_ratio * 20.0 * 0.4).min(1.0)
}

/// Character-level Shannon entropy, normalized by 8 bits.
fn calculate_entropy(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut freq: BTreeMap<char, u64> = BTreeMap::new();
    let mut total = 0u64;
    for ch in text.chars() {
        *freq.entry(ch).or_insert(0) += 1;
        total += 1;
    }

    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum();

    (entropy / 8.0).min(1.0)
}
