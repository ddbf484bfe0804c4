//! Coherence engine for QDI history review.
//!
//! Deterministic lexical and statistical scoring for free-form text:
//!
//! - [`CoherenceAnalyzer`] - four bounded wave metrics and a 0-100
//!   composite score
//! - [`InferenceBoostCalculator`] - Fibonacci/golden-ratio weighted
//!   improvement metric on top of the composite
//! - [`ThresholdGuard`] - pure pass/fail/snap-in verdicts with feedback
//!
//! All scoring is synchronous, pure, and reproducible; the contractual
//! constants live in [`metrics`].

pub mod analyzer;
pub mod boost;
pub mod guard;
pub mod metrics;

pub use analyzer::CoherenceAnalyzer;
pub use boost::{BoostReport, InferenceBoostCalculator};
pub use guard::{ThresholdGuard, ThresholdResult};
pub use metrics::{
    CoherenceMetrics, CoherenceReport, COHERENCE_THRESHOLD, FIBONACCI, PHI, SNAP_IN_THRESHOLD,
};
