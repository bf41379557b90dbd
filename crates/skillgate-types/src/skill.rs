//! Skill document types.
//!
//! Skills are markdown instruction bundles authored in third-party
//! repositories, typically as a `SKILL.md` file with YAML frontmatter
//! carrying the metadata and the body carrying the instructions:
//!
//! ```text
//! ---
//! name: test-skill
//! description: Test skill description
//! category: testing
//! tags: [test, example]
//! ---
//!
//! # Test Skill
//!
//! Instruction body...
//! ```
//!
//! [`SkillMetadata`] is the frontmatter schema; [`SkillDocument`] is the
//! unified in-memory representation handed to validation and linting.

use serde::{Deserialize, Serialize};

/// Metadata parsed from a skill's YAML frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMetadata {
    /// Skill name. Required in frontmatter; defaults to empty here so a
    /// missing name surfaces as a lint error rather than a parse failure.
    #[serde(default)]
    pub name: String,

    /// Human-readable description shown in skill listings.
    #[serde(default)]
    pub description: String,

    /// Category the skill belongs to (e.g. "testing", "debugging").
    #[serde(default)]
    pub category: String,

    /// Free-form tags for search and grouping.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Semantic version of the skill definition.
    #[serde(default)]
    pub version: String,

    /// Identifiers of skills this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Unified skill representation.
///
/// Combines frontmatter metadata with the instruction body and provenance.
/// The `repository_id` records which repository the skill came from; it is
/// what trust resolution operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDocument {
    /// Normalized skill identifier (e.g. "owner/skill-name").
    pub id: String,

    /// Skill name from the frontmatter.
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// The instruction body (markdown).
    pub instructions: String,

    /// Category the skill belongs to.
    #[serde(default)]
    pub category: String,

    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Identifiers of skills this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Usage examples extracted from the instruction body.
    #[serde(default)]
    pub examples: Vec<String>,

    /// Originating repository identifier ("owner/name" form). Empty means
    /// unknown provenance.
    #[serde(default)]
    pub repository_id: String,
}

impl SkillDocument {
    /// Create a minimal skill document (for testing or built-in skills).
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            instructions: String::new(),
            category: String::new(),
            tags: Vec::new(),
            dependencies: Vec::new(),
            examples: Vec::new(),
            repository_id: String::new(),
        }
    }

    /// Builder-style setter for the instruction body.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Builder-style setter for the originating repository.
    pub fn with_repository(mut self, repository_id: impl Into<String>) -> Self {
        self.repository_id = repository_id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_document_new() {
        let doc = SkillDocument::new("test/skill", "test-skill", "A test skill");
        assert_eq!(doc.id, "test/skill");
        assert_eq!(doc.name, "test-skill");
        assert_eq!(doc.description, "A test skill");
        assert!(doc.instructions.is_empty());
        assert!(doc.tags.is_empty());
        assert!(doc.repository_id.is_empty());
    }

    #[test]
    fn skill_document_builders() {
        let doc = SkillDocument::new("test/skill", "test-skill", "desc")
            .with_instructions("Do the thing.")
            .with_repository("owner/repo");
        assert_eq!(doc.instructions, "Do the thing.");
        assert_eq!(doc.repository_id, "owner/repo");
    }

    #[test]
    fn skill_document_serde_roundtrip() {
        let mut doc = SkillDocument::new("test/skill", "test-skill", "desc");
        doc.tags = vec!["test".into(), "example".into()];
        doc.category = "testing".into();

        let json = serde_json::to_string(&doc).unwrap();
        let restored: SkillDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, "test/skill");
        assert_eq!(restored.tags, vec!["test", "example"]);
        assert_eq!(restored.category, "testing");
    }

    #[test]
    fn metadata_defaults_on_missing_fields() {
        let json = r#"{"name": "bare"}"#;
        let meta: SkillMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.name, "bare");
        assert!(meta.description.is_empty());
        assert!(meta.tags.is_empty());
        assert!(meta.dependencies.is_empty());
    }
}
