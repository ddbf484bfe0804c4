//! History review orchestration.
//!
//! Composes the coherence analyzer, decision surjector, and threshold
//! guard over a full trace into one report, optionally recording the
//! review to a provenance trail.

use serde::Serialize;
use tracing::{debug, info};

use atom_trail::{AtomDecision, ProvenanceTrail};
use coherence::{
    CoherenceAnalyzer, CoherenceMetrics, InferenceBoostCalculator, ThresholdGuard,
    ThresholdResult, COHERENCE_THRESHOLD,
};

use crate::surjection::DecisionSurjector;
use crate::types::{DecisionInput, DecisionPole, HistoryTrace, OperationCode, Result, TraceInput};
use crate::VORTEX_MARKER;

/// One decision's surjection, summarized for the review envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SurjectionSummary {
    /// Decision identifier
    pub decision_id: String,
    /// Decision category string
    pub pole_type: String,
    /// Emitted operation codes
    pub gates: Vec<OperationCode>,
    /// Bounded score contribution
    pub coherence_contribution: f64,
}

/// Full review of a history trace.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewReport {
    pub status: &'static str,
    pub trace_id: String,
    pub coherence_score: f64,
    pub inference_boost: f64,
    pub surjection_mappings: Vec<SurjectionSummary>,
    pub threshold_check: ThresholdResult,
    /// Provenance record, present when the review was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atom_decision: Option<AtomDecision>,
    pub vortex: &'static str,
}

/// The decision portion of a surjection envelope.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionSummary {
    pub id: String,
    pub pole_type: String,
    pub description: String,
}

/// Envelope for a standalone decision surjection.
#[derive(Debug, Clone, Serialize)]
pub struct SurjectReport {
    pub status: &'static str,
    pub decision: DecisionSummary,
    pub gates: Vec<OperationCode>,
    pub coherence_contribution: f64,
    pub vortex: &'static str,
}

/// Envelope for a superposition-readiness audit.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub status: &'static str,
    pub coherence: CoherenceMetrics,
    pub coherence_score: f64,
    pub threshold_check: ThresholdResult,
    pub superposition_ready: bool,
    pub vortex: &'static str,
}

/// Envelope for an inference boost calculation.
#[derive(Debug, Clone, Serialize)]
pub struct BoostEnvelope {
    #[serde(flatten)]
    pub report: coherence::BoostReport,
    pub vortex: &'static str,
}

/// Orchestrates the scoring components over traces and single inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryReviewOrchestrator {
    analyzer: CoherenceAnalyzer,
    surjector: DecisionSurjector,
    guard: ThresholdGuard,
    booster: InferenceBoostCalculator,
}

impl HistoryReviewOrchestrator {
    /// Create a new orchestrator.
    pub fn new() -> Self {
        Self {
            analyzer: CoherenceAnalyzer::new(),
            surjector: DecisionSurjector::new(),
            guard: ThresholdGuard::new(),
            booster: InferenceBoostCalculator::new(),
        }
    }

    /// Build a scored trace from decisions and context text.
    ///
    /// Context coherence seeds the base score (the pass threshold when no
    /// context is given); each decision's surjection contribution nudges
    /// it upward, capped at 1.0.
    pub fn create_trace(
        &self,
        trace_id: impl Into<String>,
        decisions: Vec<DecisionPole>,
        context: &str,
    ) -> HistoryTrace {
        let base_coherence = if context.is_empty() {
            COHERENCE_THRESHOLD
        } else {
            self.analyzer.analyze(context).coherence_score / 100.0
        };

        let total_contribution: f64 = decisions
            .iter()
            .map(|decision| self.surjector.surject(decision).coherence_contribution)
            .sum();

        let inference_boost = 0.15 + total_contribution.min(0.15);
        let coherence_score = (base_coherence + total_contribution * 0.1).min(1.0);

        debug!(
            base = base_coherence,
            contribution = total_contribution,
            score = coherence_score,
            "History trace scored"
        );

        HistoryTrace {
            trace_id: trace_id.into(),
            decisions,
            coherence_score,
            inference_boost,
        }
    }

    /// Review a full trace document. When a trail is supplied, the review
    /// is recorded as a REVIEW provenance decision.
    pub fn review(
        &self,
        input: TraceInput,
        trail: Option<&ProvenanceTrail>,
    ) -> Result<ReviewReport> {
        let decisions: Vec<DecisionPole> = input
            .decisions
            .into_iter()
            .map(DecisionInput::into_trace_pole)
            .collect();

        let trace = self.create_trace(input.trace_id, decisions, &input.context);

        let surjection_mappings: Vec<SurjectionSummary> = trace
            .decisions
            .iter()
            .map(|decision| {
                let mapping = self.surjector.surject(decision);
                SurjectionSummary {
                    decision_id: decision.id.clone(),
                    pole_type: decision.pole_type.as_str().to_string(),
                    gates: mapping.operations,
                    coherence_contribution: mapping.coherence_contribution,
                }
            })
            .collect();

        let threshold_check = self.guard.check(trace.coherence_score);

        let atom_decision = match trail {
            Some(trail) => {
                let description = format!(
                    "History review {}: coherence {:.1}%",
                    trace.trace_id,
                    trace.coherence_score * 100.0
                );
                let decision = trail.record(
                    "REVIEW",
                    &description,
                    vec![],
                    vec!["review".to_string(), "coherence".to_string()],
                )?;
                info!(atom_tag = %decision.tag, "Review recorded to provenance trail");
                Some(decision)
            }
            None => None,
        };

        Ok(ReviewReport {
            status: "reviewed",
            trace_id: trace.trace_id,
            coherence_score: trace.coherence_score,
            inference_boost: trace.inference_boost,
            surjection_mappings,
            threshold_check,
            atom_decision,
            vortex: VORTEX_MARKER,
        })
    }

    /// Surject a single decision record.
    pub fn surject(&self, input: DecisionInput) -> SurjectReport {
        let decision = input.into_single_pole();
        let mapping = self.surjector.surject(&decision);

        SurjectReport {
            status: "surjected",
            decision: DecisionSummary {
                id: decision.id,
                pole_type: decision.pole_type.as_str().to_string(),
                description: decision.description,
            },
            gates: mapping.operations,
            coherence_contribution: mapping.coherence_contribution,
            vortex: VORTEX_MARKER,
        }
    }

    /// Audit text for superposition readiness against a threshold.
    pub fn audit(&self, text: &str, threshold: f64) -> AuditReport {
        let analysis = self.analyzer.analyze(text);
        let score = analysis.coherence_score / 100.0;
        let threshold_check = self.guard.check_against(score, threshold);
        let superposition_ready = threshold_check.passed;

        AuditReport {
            status: "audited",
            coherence: analysis.coherence,
            coherence_score: analysis.coherence_score,
            threshold_check,
            superposition_ready,
            vortex: VORTEX_MARKER,
        }
    }

    /// Calculate the inference boost for text at an iteration.
    pub fn boost(&self, text: &str, iteration: usize) -> BoostEnvelope {
        BoostEnvelope {
            report: self.booster.calculate(text, iteration),
            vortex: VORTEX_MARKER,
        }
    }

    /// Built-in demonstration trace, reviewed when no file is supplied.
    pub fn sample_trace() -> TraceInput {
        serde_json::from_value(serde_json::json!({
            "trace_id": "spiral-history-001",
            "decisions": [
                {"id": "d1", "pole_type": "doubt", "description": "Initial uncertainty"},
                {"id": "d2", "pole_type": "push", "description": "Decisive action taken"},
                {"id": "d3", "pole_type": "iterate", "description": "Refinement cycle"},
                {"id": "d4", "pole_type": "deja_vu", "description": "Pattern recognized"}
            ],
            "context": "Spiral history encapsulating vortex formations with coherence analysis."
        }))
        .expect("sample trace is valid")
    }
}
