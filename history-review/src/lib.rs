//! QDI history review.
//!
//! Embeds conversation/history traces into the coherence engine:
//! decision poles surject onto symbolic operation codes, context text is
//! scored by the `coherence` crate, and reviewed decisions land in the
//! `atom-trail` provenance ledger.
//!
//! The CLI (`history-review`) exposes `review`, `surject`, `audit`,
//! `boost`, and `cascade` subcommands, each printing one pretty-printed
//! JSON result document.

pub mod cascade;
pub mod cli;
pub mod review;
pub mod surjection;
pub mod types;

/// Marker embedded in every result envelope for cross-system correlation.
pub const VORTEX_MARKER: &str = "VORTEX::QDI::v1";

pub use cascade::{cascade_integration, CascadeReport, ETHICAL_KEYWORDS};
pub use review::{AuditReport, HistoryReviewOrchestrator, ReviewReport, SurjectReport};
pub use surjection::DecisionSurjector;
pub use types::{
    DecisionInput, DecisionPole, GateKind, HistoryTrace, OperationCode, PoleMetadata, PoleType,
    Result, ReviewError, SurjectionMapping, TraceInput,
};
