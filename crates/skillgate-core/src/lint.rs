//! Structural validation of skill documents.
//!
//! Linting is about document quality, not security: missing names, terse
//! descriptions, unknown categories. Hard defects land in
//! [`LintReport::errors`] (the skill should not be indexed), soft ones in
//! [`LintReport::warnings`] (the skill works but could be better).
//! Security classification is [`crate::scanner`]'s job; the two never
//! overlap.

use skillgate_types::skill::SkillDocument;

use serde::{Deserialize, Serialize};

/// Categories a skill may declare. Anything else is a warning.
pub const VALID_CATEGORIES: &[&str] = &[
    "analysis",
    "code-generation",
    "debugging",
    "documentation",
    "refactoring",
    "security",
    "testing",
    "workflow",
];

/// Minimum description length, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Minimum instruction-body length, in characters.
pub const MIN_INSTRUCTIONS_CHARS: usize = 50;

/// Most fenced code blocks extracted as examples.
pub const MAX_EXAMPLE_BLOCKS: usize = 3;

/// Outcome of linting one skill document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    /// Hard defects; a skill with errors should not be indexed.
    pub errors: Vec<String>,
    /// Soft defects; the skill is usable but incomplete.
    pub warnings: Vec<String>,
}

impl LintReport {
    /// Whether the document has no hard defects.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the document has no defects at all.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Lint a skill document's structure.
pub fn lint_skill(doc: &SkillDocument) -> LintReport {
    let mut report = LintReport::default();

    if doc.name.trim().is_empty() {
        report.errors.push("skill name is missing".to_string());
    }

    let description_len = doc.description.chars().count();
    if description_len < MIN_DESCRIPTION_CHARS {
        report.errors.push(format!(
            "description is too short ({description_len} characters, minimum {MIN_DESCRIPTION_CHARS})"
        ));
    }

    let instructions_len = doc.instructions.chars().count();
    if instructions_len < MIN_INSTRUCTIONS_CHARS {
        report.errors.push(format!(
            "instructions are too short ({instructions_len} characters, minimum {MIN_INSTRUCTIONS_CHARS})"
        ));
    }

    if doc.category.is_empty() {
        report
            .warnings
            .push("no category assigned".to_string());
    } else if !VALID_CATEGORIES.contains(&doc.category.as_str()) {
        report.warnings.push(format!(
            "unknown category '{}' (expected one of: {})",
            doc.category,
            VALID_CATEGORIES.join(", ")
        ));
    }

    if doc.tags.is_empty() {
        report
            .warnings
            .push("no tags assigned; tags improve discoverability".to_string());
    }

    if doc.examples.is_empty() && extract_examples(&doc.instructions).is_empty() {
        report
            .warnings
            .push("no usage examples found in the instructions".to_string());
    }

    report
}

/// Lint a skill document and additionally check that its declared
/// dependencies resolve. `resolver` returns whether a dependency id is
/// known; unresolved dependencies are warnings, not errors, since skill
/// indexing order is not guaranteed.
pub fn lint_skill_with_dependencies<F>(doc: &SkillDocument, resolver: F) -> LintReport
where
    F: Fn(&str) -> bool,
{
    let mut report = lint_skill(doc);
    for dependency in &doc.dependencies {
        if !resolver(dependency) {
            report.warnings.push(format!(
                "dependency '{dependency}' could not be resolved"
            ));
        }
    }
    report
}

/// Normalize a skill identifier: lowercase, slashes preserved for path
/// structure, every other non-alphanumeric run collapsed to a single
/// hyphen, leading and trailing hyphens trimmed.
pub fn normalize_skill_id(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '/' {
                c
            } else {
                '-'
            }
        })
        .collect();

    let mut out = String::with_capacity(mapped.len());
    let mut previous_hyphen = false;
    for c in mapped.chars() {
        if c == '-' {
            if !previous_hyphen {
                out.push('-');
            }
            previous_hyphen = true;
        } else {
            out.push(c);
            previous_hyphen = false;
        }
    }
    out.trim_matches('-').to_string()
}

/// Extract usage examples from an instruction body: the `## Examples`
/// section (if present) followed by up to [`MAX_EXAMPLE_BLOCKS`] fenced
/// code blocks.
pub fn extract_examples(instructions: &str) -> Vec<String> {
    let mut examples = Vec::new();
    if let Some(section) = examples_section(instructions) {
        examples.push(section);
    }
    examples.extend(code_blocks(instructions, MAX_EXAMPLE_BLOCKS));
    examples
}

/// The text of the `## Examples` section, up to the next heading.
/// Heading matching is case-insensitive.
fn examples_section(instructions: &str) -> Option<String> {
    let mut collected: Vec<&str> = Vec::new();
    let mut in_section = false;
    for line in instructions.lines() {
        let trimmed = line.trim();
        if in_section {
            if trimmed.starts_with('#') {
                break;
            }
            collected.push(line);
        } else if let Some(heading) = trimmed.strip_prefix("##") {
            if heading.trim().eq_ignore_ascii_case("examples") {
                in_section = true;
            }
        }
    }
    let section = collected.join("\n").trim().to_string();
    if section.is_empty() { None } else { Some(section) }
}

/// Contents of fenced code blocks, at most `max` of them.
fn code_blocks(instructions: &str, max: usize) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    for line in instructions.lines() {
        if line.trim_start().starts_with("```") {
            match current.take() {
                Some(block) => {
                    let text = block.join("\n").trim().to_string();
                    if !text.is_empty() && blocks.len() < max {
                        blocks.push(text);
                    }
                }
                None => current = Some(Vec::new()),
            }
        } else if let Some(block) = current.as_mut() {
            block.push(line);
        }
    }
    blocks
}
