//! Core types for history review.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Decision pole categories recognized by the surjector.
///
/// Unrecognized category strings are preserved verbatim in [`Other`] and
/// fall back to the `Doubt` mapping when surjected.
///
/// [`Other`]: PoleType::Other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PoleType {
    /// Uncertainty at a decision point
    Doubt,
    /// Decisive action taken
    Push,
    /// Iterative refinement cycle
    Iterate,
    /// Pattern recognized from the past
    DejaVu,
    /// Unknown category, preserved verbatim
    Other(String),
}

impl PoleType {
    /// Parse a category string; unknown values are kept verbatim.
    pub fn parse(value: &str) -> Self {
        match value {
            "doubt" => Self::Doubt,
            "push" => Self::Push,
            "iterate" => Self::Iterate,
            "deja_vu" => Self::DejaVu,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical string form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Doubt => "doubt",
            Self::Push => "push",
            Self::Iterate => "iterate",
            Self::DejaVu => "deja_vu",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for PoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PoleType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PoleType> for String {
    fn from(value: PoleType) -> Self {
        value.as_str().to_string()
    }
}

/// Typed metadata attached to a decision pole.
///
/// Defaults: `iteration` 1, `fib_weight` 3. Unrecognized keys are
/// carried through untouched so callers can round-trip their own data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoleMetadata {
    /// Iteration index for `iterate` poles (RZ rotation multiplier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<f64>,
    /// Index into the Fibonacci table for the coherence contribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fib_weight: Option<usize>,
    /// Passthrough for keys the engine does not interpret
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl PoleMetadata {
    /// Iteration index, defaulting to 1.
    pub fn iteration(&self) -> f64 {
        self.iteration.unwrap_or(1.0)
    }

    /// Fibonacci weight index, defaulting to 3.
    pub fn fib_weight(&self) -> usize {
        self.fib_weight.unwrap_or(3)
    }
}

/// A decision point in a history trace. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionPole {
    /// Caller-supplied identifier
    pub id: String,
    /// Decision category
    pub pole_type: PoleType,
    /// Human-readable description
    pub description: String,
    /// Optional timestamp, carried verbatim
    #[serde(default)]
    pub timestamp: String,
    /// Typed metadata bag
    #[serde(default)]
    pub metadata: PoleMetadata,
}

/// Symbolic operation kinds. Never executed; purely notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    /// Hadamard - superposition, represents uncertainty
    H,
    /// X flip - represents decisive action
    X,
    /// Controlled-X - entanglement with the past
    Cx,
    /// Z rotation - iterative refinement
    Rz,
}

/// A symbolic operation code emitted by the surjector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationCode {
    /// Operation kind
    #[serde(rename = "type")]
    pub kind: GateKind,
    /// Target qubit index
    pub target: u32,
    /// Control qubit index, for controlled operations
    pub control: Option<u32>,
    /// Rotation parameter, for parameterized operations
    pub parameter: Option<f64>,
}

impl OperationCode {
    /// Single-qubit operation without parameters.
    pub fn simple(kind: GateKind, target: u32) -> Self {
        Self {
            kind,
            target,
            control: None,
            parameter: None,
        }
    }
}

/// Surjection of one decision pole onto operation codes.
#[derive(Debug, Clone, Serialize)]
pub struct SurjectionMapping {
    /// The decision that was mapped
    pub decision: DecisionPole,
    /// Operation codes, in emission order
    pub operations: Vec<OperationCode>,
    /// Bounded score contribution in [0, 0.3]
    pub coherence_contribution: f64,
}

/// A fully scored history trace.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryTrace {
    /// Trace identifier
    pub trace_id: String,
    /// Ordered decision poles
    pub decisions: Vec<DecisionPole>,
    /// Trace coherence in [0, 1]
    pub coherence_score: f64,
    /// Inference boost in [0.15, 0.30]
    pub inference_boost: f64,
}

/// Wire shape of a trace document. Missing fields take documented
/// defaults rather than failing the parse.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceInput {
    /// Trace identifier, defaulting to `"trace"`
    #[serde(default = "default_trace_id")]
    pub trace_id: String,
    /// Decision records, defaulting to empty
    #[serde(default)]
    pub decisions: Vec<DecisionInput>,
    /// Context text, defaulting to empty
    #[serde(default)]
    pub context: String,
}

fn default_trace_id() -> String {
    "trace".to_string()
}

/// Wire shape of a single decision record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecisionInput {
    pub id: Option<String>,
    pub pole_type: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<String>,
    pub metadata: Option<PoleMetadata>,
}

impl DecisionInput {
    /// Resolve into a pole with trace-record defaults.
    pub fn into_trace_pole(self) -> DecisionPole {
        self.into_pole("unknown", "")
    }

    /// Resolve into a pole with standalone-decision defaults.
    pub fn into_single_pole(self) -> DecisionPole {
        self.into_pole("d0", "Decision point")
    }

    fn into_pole(self, default_id: &str, default_description: &str) -> DecisionPole {
        DecisionPole {
            id: self.id.unwrap_or_else(|| default_id.to_string()),
            pole_type: PoleType::parse(self.pole_type.as_deref().unwrap_or("doubt")),
            description: self
                .description
                .unwrap_or_else(|| default_description.to_string()),
            timestamp: self.timestamp.unwrap_or_default(),
            metadata: self.metadata.unwrap_or_default(),
        }
    }
}

/// Error types for history review.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Trace file does not exist
    #[error("File not found: {0}")]
    TraceNotFound(String),

    /// Trace file exists but cannot be read
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Other I/O failure while reading the trace file
    #[error("I/O error while accessing {path}: {source}")]
    TraceIo {
        path: String,
        source: std::io::Error,
    },

    /// Trace file is not valid JSON
    #[error("Invalid JSON in file: {0}")]
    TraceDecode(serde_json::Error),

    /// Decision argument is not valid JSON
    #[error("Invalid JSON in decision: {0}")]
    DecisionDecode(serde_json::Error),

    /// Result document could not be encoded
    #[error("Failed to encode result: {0}")]
    Encode(serde_json::Error),

    /// Provenance trail failure
    #[error("Provenance trail error: {0}")]
    Trail(#[from] atom_trail::TrailError),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
