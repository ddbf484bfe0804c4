//! Coherence metric types and contractual scoring constants.
//!
//! Every constant in this module is part of the scoring contract and is
//! reproduced bit-for-bit by the analyzer. None of them are tunable.

use serde::{Deserialize, Serialize};

/// Minimum coherence for a PASS verdict (60%).
pub const COHERENCE_THRESHOLD: f64 = 0.6;

/// Coherence level for snap-in synchronization (70%).
pub const SNAP_IN_THRESHOLD: f64 = 0.7;

/// Fibonacci sequence used for weighted calculations.
pub const FIBONACCI: [u64; 12] = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144];

/// Golden ratio, used for Fibonacci-weighted coherence calculations.
pub const PHI: f64 = 1.618033988749895;

/// Composite score weight on curl.
pub const CURL_WEIGHT: f64 = 0.4;
/// Composite score weight on divergence distance from its target.
pub const DIVERGENCE_WEIGHT: f64 = 0.3;
/// Divergence value the composite treats as healthy.
pub const DIVERGENCE_TARGET: f64 = 0.2;
/// Composite score weight on missing potential.
pub const POTENTIAL_WEIGHT: f64 = 0.2;
/// Composite score weight on missing entropy.
pub const ENTROPY_WEIGHT: f64 = 0.1;

/// Per-sentence wave metrics, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoherenceMetrics {
    /// Circular-reasoning proxy via repeated 3-word shingles
    pub curl: f64,
    /// Unresolved-expansion proxy across the sentence sequence
    pub divergence: f64,
    /// Latent-structure proxy via connective density and lexical diversity
    pub potential: f64,
    /// Character-level Shannon entropy, normalized by 8 bits
    pub entropy: f64,
}

/// Full analyzer output: metrics plus the 0-100 composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoherenceReport {
    /// The four bounded sub-metrics
    pub coherence: CoherenceMetrics,
    /// Composite score in [0, 100], rounded to two decimals
    pub coherence_score: f64,
    /// Whether the score meets the 60% threshold
    pub passed: bool,
    /// Whether the score meets the 70% snap-in level
    pub snap_in: bool,
}

/// Round to two decimals, matching the precision of emitted reports.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
