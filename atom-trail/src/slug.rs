//! Description slugs for ATOM tags.

/// Maximum slug length in characters.
const MAX_SLUG_LEN: usize = 50;

/// Slugify a description for embedding in an ATOM tag.
///
/// Lowercases, collapses every run of non-alphanumeric characters to a
/// single hyphen, truncates to 50 characters, then strips leading and
/// trailing hyphens. The result may be empty.
pub fn slugify(description: &str) -> String {
    let mut slug = String::with_capacity(description.len());
    for ch in description.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let truncated: String = slug.chars().take(MAX_SLUG_LEN).collect();
    truncated.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("Initial uncertainty"), "initial-uncertainty");
    }

    #[test]
    fn test_collapses_nonalnum_runs() {
        assert_eq!(slugify("a -- b :: c!!"), "a-b-c");
    }

    #[test]
    fn test_truncates_at_fifty_chars() {
        let description = "PR cascade integration: 2 ethical keywords detected plus extra";
        let slug = slugify(description);
        assert!(slug.len() <= 50);
        assert!(slug.starts_with("pr-cascade-integration-2-ethical-key"));
    }

    #[test]
    fn test_exact_fifty_char_description() {
        let slug = slugify("PR cascade integration: 2 ethical keywords detected");
        assert_eq!(slug, "pr-cascade-integration-2-ethical-keywords-detected");
        assert_eq!(slug.len(), 50);
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
    }
}
