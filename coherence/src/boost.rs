//! Inference boost calculation.
//!
//! Layers a Fibonacci/golden-ratio weighted improvement metric on top of
//! the coherence composite score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::CoherenceAnalyzer;
use crate::metrics::{FIBONACCI, PHI};

/// Result of an inference boost calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostReport {
    /// Composite coherence score scaled to [0, 1]
    pub original_score: f64,
    /// Score after applying the boost, capped at 1.0
    pub boosted_score: f64,
    /// The boost itself, in [0.15, 0.15 + 0.15/phi]
    pub inference_boost: f64,
    /// Fibonacci weight for the requested iteration
    pub fib_weight: f64,
    /// Golden ratio used for scaling
    pub phi_factor: f64,
    /// Iteration index the boost was computed for
    pub iteration: usize,
    /// boosted_score - original_score
    pub improvement: f64,
}

/// Calculator for Fibonacci-weighted inference boosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferenceBoostCalculator {
    analyzer: CoherenceAnalyzer,
}

impl InferenceBoostCalculator {
    /// Create a new calculator.
    pub fn new() -> Self {
        Self {
            analyzer: CoherenceAnalyzer::new(),
        }
    }

    /// Calculate the inference boost for text at the given iteration.
    ///
    /// The boost is documented upstream as a "15-30% improvement", but the
    /// golden-ratio scaling caps it at 0.15 + 0.15/phi (about 0.243). The
    /// literal formula is the contract, not the prose range.
    pub fn calculate(&self, text: &str, iteration: usize) -> BoostReport {
        let analysis = self.analyzer.analyze(text);
        let base_score = analysis.coherence_score / 100.0;

        let fib_index = iteration.min(FIBONACCI.len() - 1);
        let fib_weight = FIBONACCI[fib_index] as f64 / FIBONACCI[FIBONACCI.len() - 1] as f64;

        let boost = 0.15 + fib_weight * 0.15 * (1.0 / PHI);
        let boosted_score = (base_score + boost * (PHI / 10.0)).min(1.0);

        debug!(
            iteration = iteration,
            fib_weight = fib_weight,
            boost = boost,
            "Inference boost calculated"
        );

        BoostReport {
            original_score: base_score,
            boosted_score,
            inference_boost: boost,
            fib_weight,
            phi_factor: PHI,
            iteration,
            improvement: boosted_score - base_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_one_exact_formula() {
        let report = InferenceBoostCalculator::new().calculate("Some sample text.", 1);
        let expected = 0.15 + (1.0 / 144.0) * 0.15 * (1.0 / PHI);
        assert!((report.inference_boost - expected).abs() < 1e-12);
        assert_eq!(report.iteration, 1);
    }

    #[test]
    fn test_boosted_score_capped_at_one() {
        // Highly diverse text with connectives scores near the top; the
        // boost cannot push past 1.0.
        let text = "Therefore analysis proceeds. However results vary widely. \
                    Moreover structure emerges quickly here.";
        for iteration in [1, 5, 11, 50] {
            let report = InferenceBoostCalculator::new().calculate(text, iteration);
            assert!(report.boosted_score <= 1.0);
            assert!(report.improvement >= 0.0);
        }
    }

    #[test]
    fn test_boost_grows_with_iteration() {
        let calc = InferenceBoostCalculator::new();
        let low = calc.calculate("sample text here", 1);
        let high = calc.calculate("sample text here", 11);
        assert!(high.inference_boost > low.inference_boost);
        // Fibonacci index saturates at the end of the table.
        let saturated = calc.calculate("sample text here", 99);
        assert_eq!(saturated.inference_boost, high.inference_boost);
    }

    #[test]
    fn test_boost_stays_in_documented_interval() {
        let calc = InferenceBoostCalculator::new();
        for iteration in 0..20 {
            let report = calc.calculate("text to score", iteration);
            assert!(report.inference_boost >= 0.15);
            assert!(report.inference_boost <= 0.15 + 0.15 / PHI + 1e-12);
        }
    }
}
