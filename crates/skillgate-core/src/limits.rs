//! Size ceilings on skill content.
//!
//! Oversized content is a denial-of-service concern, not an injection
//! concern, so every breach is reported at
//! [`ThreatSeverity::Suspicious`] -- trusted sources are not penalized for
//! legitimately large documents, while untrusted ones are rejected by the
//! admission policy like any other suspicious finding.
//!
//! Limits are measured in characters, not bytes, so the boundary behaves
//! identically for multi-byte content.

use skillgate_types::{ThreatCategory, ThreatSeverity, Violation, ViolationLocation};

/// Maximum length of a skill description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Maximum length of a skill's instruction body, in characters.
pub const MAX_INSTRUCTIONS_CHARS: usize = 50_000;

/// Maximum combined payload (instructions + description), in characters.
pub const MAX_TOTAL_CHARS: usize = 100_000;

/// Check the size ceilings. Emits exactly one violation per breached
/// limit, carrying the measured size and the limit.
pub fn check_sizes(instructions: &str, description: &str) -> Vec<Violation> {
    let instructions_len = instructions.chars().count();
    let description_len = description.chars().count();
    let total_len = instructions_len + description_len;

    let mut violations = Vec::new();

    if instructions_len > MAX_INSTRUCTIONS_CHARS {
        violations.push(size_violation(
            "instructions",
            instructions_len,
            MAX_INSTRUCTIONS_CHARS,
        ));
    }
    if description_len > MAX_DESCRIPTION_CHARS {
        violations.push(size_violation(
            "description",
            description_len,
            MAX_DESCRIPTION_CHARS,
        ));
    }
    if total_len > MAX_TOTAL_CHARS {
        violations.push(size_violation("payload", total_len, MAX_TOTAL_CHARS));
    }

    violations
}

fn size_violation(field: &str, measured: usize, limit: usize) -> Violation {
    Violation {
        severity: ThreatSeverity::Suspicious,
        category: ThreatCategory::SizeLimit,
        description: format!(
            "{field} length {measured} characters exceeds the limit of {limit} characters"
        ),
        location: ViolationLocation::field(field),
        context: String::new(),
        suggestion: "Reduce content size.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_sizes_pass() {
        let v = check_sizes("This is a normal instruction set.", "Normal description");
        assert!(v.is_empty());
    }

    #[test]
    fn empty_content_passes() {
        assert!(check_sizes("", "").is_empty());
    }

    #[test]
    fn instructions_at_limit_pass() {
        let instructions = "x".repeat(MAX_INSTRUCTIONS_CHARS);
        assert!(check_sizes(&instructions, "desc").is_empty());
    }

    #[test]
    fn instructions_one_over_limit_flagged() {
        let instructions = "x".repeat(MAX_INSTRUCTIONS_CHARS + 1);
        let v = check_sizes(&instructions, "desc");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].severity, ThreatSeverity::Suspicious);
        assert_eq!(v[0].category, ThreatCategory::SizeLimit);
        assert_eq!(v[0].location.field, "instructions");
        assert!(v[0].description.contains("exceed"));
        assert!(v[0].description.contains("instructions"));
        assert!(v[0].description.contains("50001"));
        assert!(v[0].description.contains("50000"));
    }

    #[test]
    fn oversized_description_flagged() {
        let description = "x".repeat(MAX_DESCRIPTION_CHARS + 100);
        let v = check_sizes("Normal instructions", &description);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].location.field, "description");
        assert!(v[0].description.contains("exceed"));
        assert!(v[0].description.contains("description"));
    }

    #[test]
    fn size_breach_never_escalates_above_suspicious() {
        let instructions = "x".repeat(MAX_TOTAL_CHARS + 1);
        let description = "x".repeat(MAX_DESCRIPTION_CHARS + 1);
        for violation in check_sizes(&instructions, &description) {
            assert_eq!(violation.severity, ThreatSeverity::Suspicious);
        }
    }

    #[test]
    fn combined_payload_breach_flagged_once() {
        // Each field individually within its own limit, combined over the cap.
        let instructions = "x".repeat(MAX_INSTRUCTIONS_CHARS);
        let description = "x".repeat(MAX_DESCRIPTION_CHARS);
        // 50,000 + 500 = 50,500: under the combined cap, so nothing fires.
        assert!(check_sizes(&instructions, &description).is_empty());

        let instructions = "x".repeat(MAX_TOTAL_CHARS + 1);
        let v = check_sizes(&instructions, "");
        // Instructions limit and total limit both breached.
        assert_eq!(v.len(), 2);
        assert!(v.iter().any(|v| v.location.field == "payload"));
    }

    #[test]
    fn limits_are_character_based() {
        // 500 multi-byte characters are within the description limit even
        // though the byte length is far larger.
        let description = "語".repeat(MAX_DESCRIPTION_CHARS);
        assert!(description.len() > MAX_DESCRIPTION_CHARS);
        assert!(check_sizes("ok", &description).is_empty());
    }
}
