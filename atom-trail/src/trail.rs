//! The ATOM provenance trail.
//!
//! Durable ledger layout:
//!
//! ```text
//! .atom-trail/
//!   ├── counters/
//!   │   └── VERIFY-20260829.txt      # bare decimal, post-increment value
//!   └── decisions/
//!       └── ATOM-VERIFY-20260829-001-some-slug.json
//! ```
//!
//! The counter read-modify-write sequence is not atomic across
//! processes. The trail assumes exactly one writer at a time (one CI job
//! step); concurrent writers for the same (category, day) key can mint
//! colliding tags. This is a documented single-writer contract.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, warn};

use crate::slug::slugify;
use crate::types::{AtomDecision, Freshness, Result};

/// Default ledger root, relative to the working directory.
pub const DEFAULT_TRAIL_DIR: &str = ".atom-trail";

/// Append-only provenance ledger rooted at an injected directory.
#[derive(Debug, Clone)]
pub struct ProvenanceTrail {
    root: PathBuf,
}

impl ProvenanceTrail {
    /// Create a trail rooted at the given directory. Nothing is written
    /// until the first mint or record call.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ledger root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Counters area.
    pub fn counters_dir(&self) -> PathBuf {
        self.root.join("counters")
    }

    /// Decisions area.
    pub fn decisions_dir(&self) -> PathBuf {
        self.root.join("decisions")
    }

    /// Create the counters and decisions areas. Idempotent; an existing
    /// layout is not an error.
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(self.counters_dir())?;
        fs::create_dir_all(self.decisions_dir())?;
        Ok(())
    }

    /// Advance and return the counter for `(category, today)`.
    ///
    /// The returned value is the post-increment value and is exactly what
    /// gets written back, so sequential calls yield 1, 2, 3, ...
    /// Unparsable counter content resets the sequence with a warning
    /// rather than failing the operation.
    pub fn next_counter(&self, category: &str) -> Result<u64> {
        self.ensure_layout()?;

        let key = format!("{}-{}", category, today());
        let path = self.counters_dir().join(format!("{}.txt", key));

        let current = match fs::read_to_string(&path) {
            Ok(content) => match content.trim().parse::<u64>() {
                Ok(value) => value,
                Err(_) => {
                    warn!(
                        counter = %key,
                        content = %content.trim(),
                        "Corrupt counter content, resetting to 1"
                    );
                    0
                }
            },
            Err(_) => 0,
        };

        let next = current + 1;
        fs::write(&path, next.to_string())?;
        debug!(counter = %key, value = next, "Counter advanced");
        Ok(next)
    }

    /// Mint a globally orderable ATOM tag for a category and description.
    pub fn mint_tag(&self, category: &str, description: &str) -> Result<String> {
        let counter = self.next_counter(category)?;
        let slug = slugify(description);

        let mut tag = format!("ATOM-{}-{}-{:03}", category, today(), counter);
        if !slug.is_empty() {
            tag.push('-');
            tag.push_str(&slug);
        }
        Ok(tag)
    }

    /// Mint a tag, stamp a record, and persist it to the decisions area.
    ///
    /// Persistence failures propagate: silently dropping a provenance
    /// record would defeat the ledger's audit purpose.
    pub fn record(
        &self,
        category: &str,
        description: &str,
        files: Vec<String>,
        tags: Vec<String>,
    ) -> Result<AtomDecision> {
        self.ensure_layout()?;

        let tag = self.mint_tag(category, description)?;
        let decision = AtomDecision {
            tag: tag.clone(),
            decision_type: category.to_string(),
            description: description.to_string(),
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            files,
            tags,
            freshness: Freshness::Fresh,
            verified: false,
        };

        let path = self.decisions_dir().join(format!("{}.json", tag));
        fs::write(&path, serde_json::to_string_pretty(&decision)?)?;

        info!(atom_tag = %tag, category = %category, "Provenance decision recorded");
        Ok(decision)
    }
}

impl Default for ProvenanceTrail {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_DIR)
    }
}

/// Day key for counters and tags, from the process-local clock.
fn today() -> String {
    Local::now().format("%Y%m%d").to_string()
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
    fn test_layout_is_idempotent() {
        let (_dir, trail) = make_trail();
        trail.ensure_layout().unwrap();
        trail.ensure_layout().unwrap();
        assert!(trail.counters_dir().is_dir());
        assert!(trail.decisions_dir().is_dir());
    }

    #[test]
    fn test_sequential_counters() {
        let (_dir, trail) = make_trail();
        assert_eq!(trail.next_counter("VERIFY").unwrap(), 1);
        assert_eq!(trail.next_counter("VERIFY").unwrap(), 2);
        assert_eq!(trail.next_counter("VERIFY").unwrap(), 3);
        // Independent per category
        assert_eq!(trail.next_counter("REVIEW").unwrap(), 1);
    }

    #[test]
    fn test_corrupt_counter_resets() {
        let (_dir, trail) = make_trail();
        assert_eq!(trail.next_counter("VERIFY").unwrap(), 1);

        let path = trail
            .counters_dir()
            .join(format!("VERIFY-{}.txt", today()));
        fs::write(&path, "not a number").unwrap();

        assert_eq!(trail.next_counter("VERIFY").unwrap(), 1);
        assert_eq!(trail.next_counter("VERIFY").unwrap(), 2);
    }

    #[test]
    fn test_tag_format() {
        let (_dir, trail) = make_trail();
        let tag = trail
            .mint_tag("VERIFY", "PR cascade integration: 2 ethical keywords detected")
            .unwrap();

        let parts: Vec<&str> = tag.split('-').collect();
        assert_eq!(parts[0], "ATOM");
        assert_eq!(parts[1], "VERIFY");
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[3], "001");
        assert!(tag.contains("pr-cascade-integration-2-ethical-key"));
    }

    #[test]
    fn test_empty_description_leaves_no_trailing_hyphen() {
        let (_dir, trail) = make_trail();
        let tag = trail.mint_tag("VERIFY", "!!!").unwrap();
        assert!(!tag.ends_with('-'));
        assert!(tag.ends_with("-001"));
    }

    #[test]
    fn test_record_persists_pretty_json() {
        let (_dir, trail) = make_trail();
        let decision = trail
            .record(
                "VERIFY",
                "PR cascade integration: 3 ethical keywords detected",
                vec!["pr_body".to_string()],
                vec!["cascade".to_string(), "provenance".to_string()],
            )
            .unwrap();

        assert_eq!(decision.decision_type, "VERIFY");
        assert!(!decision.verified);
        assert_eq!(decision.freshness, Freshness::Fresh);
        assert!(decision.timestamp.contains('T'));

        let path = trail
            .decisions_dir()
            .join(format!("{}.json", decision.tag));
        assert!(path.is_file());

        let persisted: AtomDecision =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(persisted.tag, decision.tag);
        assert_eq!(persisted.decision_type, "VERIFY");
        assert_eq!(persisted.files, vec!["pr_body".to_string()]);

        // Raw document keeps the original field names
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("atom_tag").is_some());
        assert_eq!(raw["type"], "VERIFY");
        assert_eq!(raw["freshness"], "fresh");
    }

    #[test]
    fn test_sequential_records_mint_increasing_tags() {
        let (_dir, trail) = make_trail();
        let first = trail.record("VERIFY", "one", vec![], vec![]).unwrap();
        let second = trail.record("VERIFY", "two", vec![], vec![]).unwrap();
        let third = trail.record("VERIFY", "three", vec![], vec![]).unwrap();

        assert!(first.tag.contains("-001-"));
        assert!(second.tag.contains("-002-"));
        assert!(third.tag.contains("-003-"));
    }
}
