//! Cascade provenance integration for PR bodies.
//!
//! Scans a pull-request body for the ethical keyword vocabulary and
//! mints a VERIFY provenance decision recording what was found.

use serde::Serialize;
use tracing::info;

use atom_trail::{AtomDecision, ProvenanceTrail};

use crate::types::Result;
use crate::VORTEX_MARKER;

/// Keyword vocabulary tracked by cascade integration.
pub const ETHICAL_KEYWORDS: [&str; 5] = ["provenance", "ethical", "quantum", "coherence", "atom"];

/// Tags attached to every cascade decision, before found keywords.
const BASE_TAGS: [&str; 3] = ["cascade", "provenance", "ethical-review"];

/// Envelope for a cascade integration run.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeReport {
    pub status: &'static str,
    pub keywords_found: Vec<String>,
    pub provenance_tracked: bool,
    pub message: String,
    pub atom_decision: AtomDecision,
    pub atom_tag: String,
    pub vortex: &'static str,
}

/// Run cascade integration over a PR body, persisting one VERIFY
/// decision to the trail.
pub fn cascade_integration(trail: &ProvenanceTrail, pr_body: Option<&str>) -> Result<CascadeReport> {
    let found: Vec<String> = match pr_body {
        Some(body) => {
            let lowered = body.to_lowercase();
            ETHICAL_KEYWORDS
                .iter()
                .filter(|keyword| lowered.contains(*keyword))
                .map(|keyword| keyword.to_string())
                .collect()
        }
        None => vec![],
    };

    let description = format!(
        "PR cascade integration: {} ethical keywords detected",
        found.len()
    );

    let mut tags: Vec<String> = BASE_TAGS.iter().map(|tag| tag.to_string()).collect();
    tags.extend(found.iter().cloned());

    let decision = trail.record("VERIFY", &description, vec!["pr_body".to_string()], tags)?;
    info!(
        atom_tag = %decision.tag,
        keywords = found.len(),
        "Cascade integration complete"
    );

    Ok(CascadeReport {
        status: "cascaded",
        message: format!("Cascade complete. Found {} ethical keywords.", found.len()),
        keywords_found: found,
        provenance_tracked: true,
        atom_tag: decision.tag.clone(),
        atom_decision: decision,
        vortex: VORTEX_MARKER,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_trail() -> (TempDir, ProvenanceTrail) {
        let dir = TempDir::new().unwrap();
        let trail = ProvenanceTrail::new(dir.path().join("trail"));
        (dir, trail)
    }

    #[test]
    fn test_cascade_without_body() {
        let (_dir, trail) = make_trail();
        let report = cascade_integration(&trail, None).unwrap();
        assert_eq!(report.status, "cascaded");
        assert!(report.keywords_found.is_empty());
        assert!(report.provenance_tracked);
        assert!(report.atom_decision.description.contains("0 ethical keywords"));
    }

    #[test]
    fn test_cascade_finds_keywords_case_insensitively() {
        let (_dir, trail) = make_trail();
        let report = cascade_integration(&trail, Some("QUANTUM Provenance ETHICAL")).unwrap();
        assert_eq!(report.keywords_found.len(), 3);
        assert!(report.keywords_found.contains(&"quantum".to_string()));
        assert!(report.atom_decision.description.contains("3 ethical keywords"));
        assert_eq!(report.message, "Cascade complete. Found 3 ethical keywords.");
    }

    #[test]
    fn test_cascade_decision_shape() {
        let (_dir, trail) = make_trail();
        let report = cascade_integration(&trail, Some("provenance quantum")).unwrap();

        let decision = &report.atom_decision;
        assert_eq!(decision.decision_type, "VERIFY");
        assert_eq!(decision.files, vec!["pr_body".to_string()]);
        assert!(!decision.verified);

        for tag in ["cascade", "provenance", "ethical-review", "quantum"] {
            assert!(decision.tags.contains(&tag.to_string()), "missing tag {tag}");
        }
        assert_eq!(report.atom_tag, decision.tag);
        assert!(report.atom_tag.starts_with("ATOM-VERIFY-"));
    }

    #[test]
    fn test_cascade_persists_decision() {
        let (_dir, trail) = make_trail();
        let report = cascade_integration(&trail, Some("test body")).unwrap();
        let path = trail
            .decisions_dir()
            .join(format!("{}.json", report.atom_tag));
        assert!(path.is_file());
    }

    #[test]
    fn test_cascade_no_matching_keywords() {
        let (_dir, trail) = make_trail();
        let report = cascade_integration(&trail, Some("This is a simple bug fix")).unwrap();
        assert!(report.keywords_found.is_empty());
        assert!(report.atom_decision.tags.contains(&"cascade".to_string()));
        assert_eq!(report.atom_decision.tags.len(), 3);
    }
}
