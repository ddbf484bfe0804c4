//! Coherence threshold guarding.
//!
//! Pure decision function turning a [0, 1] score into pass/fail/snap-in
//! status with diagnostic feedback.

use serde::{Deserialize, Serialize};

use crate::metrics::{COHERENCE_THRESHOLD, SNAP_IN_THRESHOLD};

/// Fixed improvement suggestions attached to every failed check.
const SUGGESTIONS: [&str; 4] = [
    "Reduce circular reasoning (lower curl)",
    "Resolve expansions with conclusions (optimize divergence)",
    "Add connective words for structure (increase potential)",
    "Increase vocabulary diversity (improve entropy)",
];

/// Outcome of a threshold check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdResult {
    /// The score that was checked, in [0, 1]
    #[serde(rename = "coherence_score")]
    pub score: f64,
    /// Threshold the score was checked against
    pub threshold: f64,
    /// Whether the score meets the threshold
    pub passed: bool,
    /// Whether the score reaches snap-in synchronization (>= 0.7),
    /// independent of the configured threshold
    pub snap_in: bool,
    /// Human-readable verdict
    pub message: String,
    /// Improvement suggestions, present only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Guard for coherence thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdGuard;

impl ThresholdGuard {
    /// Create a new guard.
    pub fn new() -> Self {
        Self
    }

    /// Check a score against the default 60% threshold.
    pub fn check(&self, score: f64) -> ThresholdResult {
        self.check_against(score, COHERENCE_THRESHOLD)
    }

    /// Check a score against an explicit threshold.
    pub fn check_against(&self, score: f64, threshold: f64) -> ThresholdResult {
        let passed = score >= threshold;
        let snap_in = score >= SNAP_IN_THRESHOLD;

        let (message, suggestions) = if !passed {
            let deficit = threshold - score;
            (
                format!(
                    "Coherence {:.1}% is below {:.0}% threshold by {:.1}%",
                    score * 100.0,
                    threshold * 100.0,
                    deficit * 100.0
                ),
                Some(SUGGESTIONS.iter().map(|s| s.to_string()).collect()),
            )
        } else if snap_in {
            (
                format!(
                    "\u{2728} SNAP-IN: Coherence {:.1}% achieved vortex synchronization",
                    score * 100.0
                ),
                None,
            )
        } else {
            (
                format!(
                    "Coherence {:.1}% meets threshold, review recommended",
                    score * 100.0
                ),
                None,
            )
        };

        ThresholdResult {
            score,
            threshold,
            passed,
            snap_in,
            message,
            suggestions,
        }
    }
}
