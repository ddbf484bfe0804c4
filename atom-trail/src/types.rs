//! Record and error types for the ATOM provenance trail.

use serde::{Deserialize, Serialize};

/// Freshness of a provenance record. New records are always fresh;
/// there is no update path that could age one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Newly minted, not yet verified
    Fresh,
}

/// An immutable provenance record, minted once per tracked event.
///
/// State machine: created -> persisted (terminal). Corrections require
/// minting a new tag; existing records are never touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomDecision {
    /// Globally orderable tag, e.g. `ATOM-VERIFY-20260829-001-slug`
    #[serde(rename = "atom_tag")]
    pub tag: String,
    /// Decision category, e.g. `VERIFY`
    #[serde(rename = "type")]
    pub decision_type: String,
    /// Human-readable description of the tracked event
    pub description: String,
    /// ISO-8601 local timestamp at minting time
    pub timestamp: String,
    /// Files involved in the decision
    pub files: Vec<String>,
    /// Set-like list of classification tags
    pub tags: Vec<String>,
    /// Always fresh at creation
    pub freshness: Freshness,
    /// Always false at creation; verification happens out of band
    pub verified: bool,
}

/// Error types for the provenance trail.
#[derive(Debug, thiserror::Error)]
pub enum TrailError {
    /// Ledger directory or file I/O failed
    #[error("Trail I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decision record could not be serialized
    #[error("Trail serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrailError>;
