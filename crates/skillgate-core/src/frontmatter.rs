//! SKILL.md frontmatter handling.
//!
//! A skill file begins with a YAML frontmatter block delimited by `---`
//! lines; everything after the closing delimiter is the instruction body.
//! [`split_frontmatter`] separates the two, [`parse_metadata`] decodes the
//! YAML, and [`parse_skill_document`] combines them into a
//! [`SkillDocument`] ready for linting and security validation.
//!
//! Parsing is deliberately forgiving where the on-disk format is messy
//! (blank lines inside the delimiters, missing optional fields) and strict
//! where it matters: no frontmatter means no document, and malformed YAML
//! yields `None` rather than a guessed-at metadata set.

use skillgate_types::skill::{SkillDocument, SkillMetadata};
use skillgate_types::{Result, SkillGateError};

use crate::limits::MAX_TOTAL_CHARS;
use crate::lint;

/// Split a document into its YAML frontmatter block and instruction body.
///
/// Returns `None` when the content does not start with a `---` delimiter
/// or the closing delimiter is absent. The returned body is trimmed; the
/// YAML block is passed through as-is for the parser.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start();
    let after_open = content.strip_prefix("---")?;
    let after_open = after_open.strip_prefix('\n').unwrap_or(after_open);

    let close = after_open.find("\n---")?;
    let yaml = &after_open[..close];

    let body = &after_open[close + "\n---".len()..];
    let body = body.strip_prefix('\n').unwrap_or(body);
    Some((yaml, body.trim()))
}

/// Decode a frontmatter YAML block into [`SkillMetadata`].
///
/// Returns `None` for malformed YAML; missing optional fields take their
/// defaults.
pub fn parse_metadata(yaml: &str) -> Option<SkillMetadata> {
    serde_yaml::from_str(yaml).ok()
}

/// Parse a full SKILL.md document into a [`SkillDocument`].
///
/// The skill identifier is normalized (see [`lint::normalize_skill_id`])
/// and usage examples are extracted from the body.
///
/// # Errors
///
/// - [`SkillGateError::SecurityViolation`] if the raw document exceeds the
///   combined payload ceiling (checked before any parsing work).
/// - [`SkillGateError::MalformedSkill`] if the frontmatter is missing,
///   malformed, or lacks the required `name` field.
pub fn parse_skill_document(
    content: &str,
    skill_id: &str,
    repository_id: &str,
) -> Result<SkillDocument> {
    let total = content.chars().count();
    if total > MAX_TOTAL_CHARS {
        return Err(SkillGateError::SecurityViolation {
            reason: format!(
                "skill document length {total} characters exceeds the ceiling of \
                 {MAX_TOTAL_CHARS} characters"
            ),
        });
    }

    let (yaml, body) = split_frontmatter(content).ok_or_else(|| SkillGateError::MalformedSkill {
        reason: "missing YAML frontmatter (expected --- delimiters)".into(),
    })?;

    let metadata = parse_metadata(yaml).ok_or_else(|| SkillGateError::MalformedSkill {
        reason: "invalid YAML frontmatter".into(),
    })?;

    if metadata.name.trim().is_empty() {
        return Err(SkillGateError::MalformedSkill {
            reason: "frontmatter missing required field 'name'".into(),
        });
    }

    let examples = lint::extract_examples(body);

    Ok(SkillDocument {
        id: lint::normalize_skill_id(skill_id),
        name: metadata.name,
        description: metadata.description,
        instructions: body.to_string(),
        category: metadata.category,
        tags: metadata.tags,
        dependencies: metadata.dependencies,
        examples,
        repository_id: repository_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── split_frontmatter ──────────────────────────────────────────

    #[test]
    fn split_valid_frontmatter() {
        let content = "---\nname: test\ndescription: Test description\n---\n\n# Instructions\nContent here";
        let (yaml, body) = split_frontmatter(content).unwrap();
        assert!(yaml.contains("name: test"));
        assert!(yaml.contains("description: Test description"));
        assert!(body.contains("# Instructions"));
        assert!(body.contains("Content here"));
    }

    #[test]
    fn split_without_frontmatter() {
        let content = "# Just some content\n\nNo frontmatter here";
        assert!(split_frontmatter(content).is_none());
    }

    #[test]
    fn split_with_extra_whitespace() {
        let content = "---\n\nname: test\ndescription: desc\n\n---\n\n# Content";
        let (yaml, body) = split_frontmatter(content).unwrap();
        assert!(yaml.contains("name: test"));
        assert_eq!(body, "# Content");
    }

    #[test]
    fn split_unclosed_frontmatter() {
        let content = "---\nname: test\nno closing delimiter";
        assert!(split_frontmatter(content).is_none());
    }

    #[test]
    fn split_preserves_dashes_in_body() {
        let content = "---\nname: test\n---\nbody with --- a horizontal rule inside";
        let (_, body) = split_frontmatter(content).unwrap();
        assert!(body.contains("--- a horizontal rule"));
    }

    // ── parse_metadata ─────────────────────────────────────────────

    #[test]
    fn parse_valid_metadata() {
        let meta = parse_metadata(
            "name: test-skill\ndescription: Test skill description\ncategory: testing\ntags: [test, example]",
        )
        .unwrap();
        assert_eq!(meta.name, "test-skill");
        assert_eq!(meta.description, "Test skill description");
        assert_eq!(meta.category, "testing");
        assert_eq!(meta.tags, vec!["test", "example"]);
    }

    #[test]
    fn parse_invalid_yaml_is_none() {
        assert!(parse_metadata("name: test\ndescription: [unclosed array").is_none());
    }

    #[test]
    fn parse_missing_optional_fields_defaults() {
        let meta = parse_metadata("name: bare").unwrap();
        assert_eq!(meta.name, "bare");
        assert!(meta.category.is_empty());
        assert!(meta.tags.is_empty());
        assert!(meta.dependencies.is_empty());
    }

    // ── parse_skill_document ───────────────────────────────────────

    const SKILL_MD: &str = "---\n\
name: test-skill\n\
description: Test skill description\n\
category: testing\n\
tags: [test, example]\n\
---\n\
\n\
# Test Skill\n\
\n\
This is a test skill with enough content.\n\
\n\
## Examples\n\
\n\
Example 1 content\n\
\n\
```python\n\
def test():\n\
    pass\n\
```\n";

    #[test]
    fn parse_full_document() {
        let doc = parse_skill_document(SKILL_MD, "Repo/Test Skill", "owner/repo").unwrap();
        assert_eq!(doc.id, "repo/test-skill");
        assert_eq!(doc.name, "test-skill");
        assert_eq!(doc.description, "Test skill description");
        assert_eq!(doc.category, "testing");
        assert_eq!(doc.tags, vec!["test", "example"]);
        assert_eq!(doc.repository_id, "owner/repo");
        assert!(doc.instructions.contains("# Test Skill"));
        assert!(!doc.examples.is_empty());
    }

    #[test]
    fn parse_document_without_frontmatter_errors() {
        let err = parse_skill_document("# no frontmatter", "a/b", "o/r").unwrap_err();
        assert!(err.to_string().contains("frontmatter"));
    }

    #[test]
    fn parse_document_without_name_errors() {
        let content = "---\ndescription: nameless\n---\nbody";
        let err = parse_skill_document(content, "a/b", "o/r").unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn parse_oversized_document_errors() {
        let content = format!("---\nname: big\n---\n{}", "x".repeat(MAX_TOTAL_CHARS + 1));
        let err = parse_skill_document(&content, "a/b", "o/r").unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }
}
