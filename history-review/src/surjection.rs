//! Decision pole surjection.
//!
//! Deterministic mapping from decision categories onto symbolic
//! operation codes plus a bounded coherence contribution:
//!
//! - doubt -> H (superposition, uncertainty)
//! - push -> X (flip, decisive action)
//! - iterate -> RZ (rotation, iterative refinement)
//! - deja_vu -> CX (entanglement with the past, pattern recognition)
//!
//! Unknown categories fall back to the doubt mapping.

use std::f64::consts::PI;

use tracing::debug;

use coherence::FIBONACCI;

use crate::types::{DecisionPole, GateKind, OperationCode, PoleType, SurjectionMapping};

/// Base coherence contribution before Fibonacci weighting.
const BASE_CONTRIBUTION: f64 = 0.15;

/// Hard cap so no single decision dominates a trace's score.
const CONTRIBUTION_CAP: f64 = 0.3;

/// Maps decision poles to operation codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionSurjector;

impl DecisionSurjector {
    /// Create a new surjector.
    pub fn new() -> Self {
        Self
    }

    /// Surject one decision pole.
    pub fn surject(&self, decision: &DecisionPole) -> SurjectionMapping {
        let operations = match &decision.pole_type {
            PoleType::Doubt | PoleType::Other(_) => {
                vec![OperationCode::simple(GateKind::H, 0)]
            }
            PoleType::Push => vec![OperationCode::simple(GateKind::X, 0)],
            PoleType::Iterate => {
                let parameter = decision.metadata.iteration() * PI / 4.0;
                vec![OperationCode {
                    kind: GateKind::Rz,
                    target: 0,
                    control: None,
                    parameter: Some(parameter),
                }]
            }
            PoleType::DejaVu => vec![OperationCode {
                kind: GateKind::Cx,
                target: 1,
                control: Some(0),
                parameter: None,
            }],
        };

        let fib_index = decision.metadata.fib_weight().min(FIBONACCI.len() - 1);
        let coherence_contribution =
            (BASE_CONTRIBUTION * FIBONACCI[fib_index] as f64 / FIBONACCI[5] as f64)
                .min(CONTRIBUTION_CAP);

        debug!(
            decision_id = %decision.id,
            pole_type = %decision.pole_type,
            contribution = coherence_contribution,
            "Decision surjected"
        );

        SurjectionMapping {
            decision: decision.clone(),
            operations,
            coherence_contribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PoleMetadata;

    fn make_pole(pole_type: &str) -> DecisionPole {
        DecisionPole {
            id: "d1".to_string(),
            pole_type: PoleType::parse(pole_type),
            description: "test decision".to_string(),
            timestamp: String::new(),
            metadata: PoleMetadata::default(),
        }
    }

    #[test]
    fn test_doubt_maps_to_hadamard() {
        let mapping = DecisionSurjector::new().surject(&make_pole("doubt"));
        assert_eq!(mapping.operations.len(), 1);
        assert_eq!(mapping.operations[0].kind, GateKind::H);
        assert_eq!(mapping.operations[0].target, 0);
        assert!(mapping.operations[0].control.is_none());
    }

    #[test]
    fn test_push_maps_to_x() {
        let mapping = DecisionSurjector::new().surject(&make_pole("push"));
        assert_eq!(mapping.operations[0].kind, GateKind::X);
        assert_eq!(mapping.operations[0].target, 0);
    }

    #[test]
    fn test_iterate_rotation_parameter() {
        let mut pole = make_pole("iterate");
        pole.metadata.iteration = Some(2.0);
        let mapping = DecisionSurjector::new().surject(&pole);
        assert_eq!(mapping.operations[0].kind, GateKind::Rz);
        let parameter = mapping.operations[0].parameter.unwrap();
        assert!((parameter - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_iterate_defaults_to_quarter_pi() {
        let mapping = DecisionSurjector::new().surject(&make_pole("iterate"));
        let parameter = mapping.operations[0].parameter.unwrap();
        assert!((parameter - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_deja_vu_entangles_with_past() {
        let mapping = DecisionSurjector::new().surject(&make_pole("deja_vu"));
        assert_eq!(mapping.operations[0].kind, GateKind::Cx);
        assert_eq!(mapping.operations[0].target, 1);
        assert_eq!(mapping.operations[0].control, Some(0));
    }

    #[test]
    fn test_unknown_falls_back_to_doubt() {
        let mapping = DecisionSurjector::new().surject(&make_pole("spiral"));
        assert_eq!(mapping.operations[0].kind, GateKind::H);
        assert_eq!(mapping.operations[0].target, 0);
        // The original category string survives the mapping
        assert_eq!(mapping.decision.pole_type.as_str(), "spiral");
    }

    #[test]
    fn test_doubt_ignores_metadata() {
        let mut pole = make_pole("doubt");
        pole.metadata.iteration = Some(7.0);
        let mapping = DecisionSurjector::new().surject(&pole);
        assert_eq!(mapping.operations.len(), 1);
        assert_eq!(mapping.operations[0].kind, GateKind::H);
        assert!(mapping.operations[0].parameter.is_none());
    }

    #[test]
    fn test_default_contribution() {
        // fib_weight default 3 -> 0.15 * 3 / 8
        let mapping = DecisionSurjector::new().surject(&make_pole("doubt"));
        assert!((mapping.coherence_contribution - 0.15 * 3.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_contribution_capped() {
        let mut pole = make_pole("push");
        pole.metadata.fib_weight = Some(11);
        let mapping = DecisionSurjector::new().surject(&pole);
        assert_eq!(mapping.coherence_contribution, 0.3);

        // Out-of-range indices clamp to the end of the table
        pole.metadata.fib_weight = Some(500);
        let mapping = DecisionSurjector::new().surject(&pole);
        assert_eq!(mapping.coherence_contribution, 0.3);
    }
}
