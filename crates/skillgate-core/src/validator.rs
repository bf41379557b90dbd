//! The validation facade.
//!
//! [`SecurityValidator`] ties the engine together and exposes the whole
//! surface collaborators use: trust resolution, validation, verified-set
//! management, and sanitization. One instance is built at startup and
//! shared; validation calls are synchronous, perform no I/O, and can run
//! concurrently (the verified set is the only shared mutable state, and it
//! is internally guarded).

use std::sync::Arc;

use tracing::{debug, warn};

use skillgate_types::{
    Result, ThreatSeverity, TrustLevel, ValidationRequest, ValidationResult, Violation,
};

use crate::catalog::PatternRule;
use crate::limits;
use crate::policy;
use crate::sanitizer;
use crate::scanner::ThreatScanner;
use crate::trust::{TrustResolver, VerifiedRepositorySet};

/// Security validation engine for skill documents.
pub struct SecurityValidator {
    scanner: ThreatScanner,
    resolver: TrustResolver,
    verified: Arc<VerifiedRepositorySet>,
}

impl Default for SecurityValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityValidator {
    /// Create a validator with the built-in pattern catalog, the default
    /// trusted-repository list, and an empty verified set.
    pub fn new() -> Self {
        let verified = Arc::new(VerifiedRepositorySet::new());
        Self {
            scanner: ThreatScanner::new(),
            resolver: TrustResolver::new(verified.clone()),
            verified,
        }
    }

    /// Create a validator with an explicit rule set.
    ///
    /// # Errors
    ///
    /// Returns [`skillgate_types::SkillGateError::CatalogInvalid`] if the
    /// rule set is empty. An engine that cannot detect anything must fail
    /// initialization rather than silently admit everything.
    pub fn with_rules(rules: Vec<PatternRule>) -> Result<Self> {
        let verified = Arc::new(VerifiedRepositorySet::new());
        Ok(Self {
            scanner: ThreatScanner::with_rules(rules)?,
            resolver: TrustResolver::new(verified.clone()),
            verified,
        })
    }

    /// Create a validator around a pre-configured scanner and verified set
    /// (for callers that seed the set from persisted configuration).
    pub fn with_parts(scanner: ThreatScanner, verified: Arc<VerifiedRepositorySet>) -> Self {
        Self {
            scanner,
            resolver: TrustResolver::new(verified.clone()),
            verified,
        }
    }

    /// Resolve the trust level of a repository identifier.
    pub fn resolve_trust(&self, repository_id: &str) -> TrustLevel {
        self.resolver.resolve(repository_id)
    }

    /// Promote a repository to verified trust. Idempotent.
    pub fn add_verified_repository(&self, repository_id: &str) {
        if self.verified.add(repository_id) {
            debug!(repository = repository_id, "repository promoted to verified");
        }
    }

    /// Demote a repository from verified trust. Idempotent.
    pub fn remove_verified_repository(&self, repository_id: &str) {
        if self.verified.remove(repository_id) {
            debug!(repository = repository_id, "repository demoted from verified");
        }
    }

    /// Validate skill content under an already-resolved trust level.
    ///
    /// Scans the instructions and description fields independently, adds
    /// size-guard findings, and applies the admission policy. The full
    /// violation list is returned whatever the decision.
    pub fn validate(
        &self,
        instructions: &str,
        description: &str,
        skill_id: &str,
        trust_level: TrustLevel,
    ) -> ValidationResult {
        let mut violations: Vec<Violation> = self.scanner.scan(instructions, "instructions");
        violations.extend(self.scanner.scan(description, "description"));
        violations.extend(limits::check_sizes(instructions, description));

        let is_safe = policy::decide(trust_level, &violations);

        if !is_safe {
            warn!(
                skill = skill_id,
                trust = %trust_level,
                violations = violations.len(),
                max_severity = %violations
                    .iter()
                    .map(|v| v.severity)
                    .max()
                    .unwrap_or(ThreatSeverity::Safe),
                "skill rejected"
            );
        } else if !violations.is_empty() {
            debug!(
                skill = skill_id,
                trust = %trust_level,
                violations = violations.len(),
                "skill admitted with findings"
            );
        }

        ValidationResult {
            is_safe,
            violations,
            trust_level_used: trust_level,
        }
    }

    /// Validate a request, resolving trust from its repository identifier
    /// first.
    pub fn validate_request(&self, request: &ValidationRequest) -> ValidationResult {
        let trust_level = self.resolve_trust(&request.repository_id);
        self.validate(
            &request.instructions,
            &request.description,
            &request.skill_id,
            trust_level,
        )
    }

    /// Wrap admitted instructions in boundary markers.
    ///
    /// Only meaningful for content whose validation returned
    /// `is_safe == true`; wrapping performs no re-scanning.
    pub fn sanitize(&self, skill_id: &str, instructions: &str) -> String {
        sanitizer::wrap(skill_id, instructions)
    }
}
