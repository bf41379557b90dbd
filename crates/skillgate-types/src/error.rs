//! Error types for the skillgate engine.
//!
//! Provides [`SkillGateError`] as the top-level error type. The enum is
//! non-exhaustive to allow future extension without breaking downstream.
//!
//! Note that an unsafe skill is *not* an error: validation always returns
//! a [`ValidationResult`](crate::threat::ValidationResult), whatever the
//! content looks like. Errors here are reserved for conditions that prevent
//! the engine from working at all (a broken pattern catalog) or for skill
//! documents that cannot even be parsed into fields.

use thiserror::Error;

/// Top-level error type for the skillgate engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SkillGateError {
    /// The pattern catalog is empty or otherwise unusable. This is a
    /// configuration / programmer error and should abort initialization.
    #[error("invalid pattern catalog: {reason}")]
    CatalogInvalid {
        /// What is wrong with the catalog.
        reason: String,
    },

    /// A skill document could not be parsed into its fields.
    #[error("malformed skill document: {reason}")]
    MalformedSkill {
        /// What is wrong with the document.
        reason: String,
    },

    /// A security boundary was violated (oversized document, bad identifier).
    #[error("security violation: {reason}")]
    SecurityViolation {
        /// What policy was violated.
        reason: String,
    },
}

/// A convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SkillGateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_invalid_display() {
        let err = SkillGateError::CatalogInvalid {
            reason: "no rules loaded".into(),
        };
        assert_eq!(err.to_string(), "invalid pattern catalog: no rules loaded");
    }

    #[test]
    fn malformed_skill_display() {
        let err = SkillGateError::MalformedSkill {
            reason: "missing frontmatter".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed skill document: missing frontmatter"
        );
    }

    #[test]
    fn security_violation_display() {
        let err = SkillGateError::SecurityViolation {
            reason: "document exceeds size ceiling".into(),
        };
        assert_eq!(
            err.to_string(),
            "security violation: document exceeds size ceiling"
        );
    }

    #[test]
    fn result_alias_works() {
        fn ok_fn() -> Result<i32> {
            Ok(7)
        }
        fn err_fn() -> Result<i32> {
            Err(SkillGateError::CatalogInvalid {
                reason: "boom".into(),
            })
        }
        assert_eq!(ok_fn().unwrap(), 7);
        assert!(err_fn().is_err());
    }
}
