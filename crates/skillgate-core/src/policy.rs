//! The admission policy: trust level + violations -> admit/reject.
//!
//! A pure function over its inputs. Each trust level maps to a blocking
//! threshold ([`TrustLevel::blocking_threshold`]); a skill is admitted iff
//! no violation reaches that threshold. The violation list itself is never
//! filtered here -- callers always see the full evidence, whatever the
//! decision.

use skillgate_types::{TrustLevel, Violation};

/// Decide whether a skill is safe to admit under the given trust level.
///
/// Total over all inputs: the empty list is always safe.
pub fn decide(trust_level: TrustLevel, violations: &[Violation]) -> bool {
    let threshold = trust_level.blocking_threshold();
    !violations.iter().any(|v| v.severity >= threshold)
}
