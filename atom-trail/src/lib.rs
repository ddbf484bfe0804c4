//! ATOM provenance trail for QDI history review.
//!
//! An append-only, tamper-evident ledger of scored decisions. Each
//! tracked event mints a human-legible [`AtomDecision`] tag backed by a
//! durable per-(category, day) counter, and persists one immutable JSON
//! record per tag.
//!
//! The ledger root is injected at construction time (see
//! [`ProvenanceTrail::new`]); there is no process-wide path state, so
//! tests isolate themselves with a temporary directory.

pub mod slug;
pub mod trail;
pub mod types;

pub use slug::slugify;
pub use trail::{ProvenanceTrail, DEFAULT_TRAIL_DIR};
pub use types::{AtomDecision, Freshness, Result, TrailError};
