//! Threat scanner: runs the pattern catalog against document fields.
//!
//! Scanning is line-oriented. Each line is matched in two forms: raw, and
//! normalized (case-folded with punctuation and whitespace collapsed), so
//! that phrase rules tolerate the common evasions -- odd capitalization,
//! inserted punctuation, stretched spacing. Which form a rule sees is part
//! of the rule's data ([`MatchMode`]).
//!
//! The scanner is pure: identical input yields an identical violation list,
//! in the same order (catalog order, then line order). Output per rule per
//! field is capped so adversarially repetitive input cannot inflate the
//! result, without losing the signal that the rule fired.

use skillgate_types::{Result, SkillGateError, Violation, ViolationLocation};

use crate::catalog::{self, MatchMode, PatternRule};

/// Default cap on violations emitted per rule per field.
pub const DEFAULT_MATCH_CAP: usize = 5;

/// Longest context excerpt recorded in a violation, in characters.
const MAX_CONTEXT_CHARS: usize = 80;

/// Runs the pattern catalog against a document field.
///
/// Construct once and reuse; the catalog is compiled at construction and
/// never mutated afterwards. [`scan`](ThreatScanner::scan) takes `&self`
/// and holds no interior state, so one scanner can serve concurrent
/// validation calls.
#[derive(Debug)]
pub struct ThreatScanner {
    rules: Vec<PatternRule>,
    match_cap: usize,
}

impl Default for ThreatScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreatScanner {
    /// Create a scanner with the built-in catalog.
    pub fn new() -> Self {
        Self {
            rules: catalog::builtin_rules(),
            match_cap: DEFAULT_MATCH_CAP,
        }
    }

    /// Create a scanner with an explicit rule set.
    ///
    /// # Errors
    ///
    /// Returns [`SkillGateError::CatalogInvalid`] if `rules` is empty: an
    /// empty catalog silently detects nothing, which is a configuration
    /// error, not a degraded mode.
    pub fn with_rules(rules: Vec<PatternRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(SkillGateError::CatalogInvalid {
                reason: "rule set is empty".into(),
            });
        }
        Ok(Self {
            rules,
            match_cap: DEFAULT_MATCH_CAP,
        })
    }

    /// Override the per-rule, per-field cap on emitted violations.
    pub fn with_match_cap(mut self, cap: usize) -> Self {
        self.match_cap = cap.max(1);
        self
    }

    /// Number of rules in the catalog.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Scan one document field and return all findings.
    ///
    /// `field_name` is recorded in each violation's location together with
    /// the 1-based line number of the match.
    pub fn scan(&self, text: &str, field_name: &str) -> Vec<Violation> {
        if text.is_empty() {
            return Vec::new();
        }

        let lines: Vec<&str> = text.lines().collect();
        let normalized: Vec<String> = lines.iter().map(|l| normalize_line(l)).collect();

        let mut violations = Vec::new();
        for rule in &self.rules {
            let mut emitted = 0;
            'field: for (idx, &raw) in lines.iter().enumerate() {
                let haystack: &str = match rule.mode {
                    MatchMode::NormalizedPhrase => &normalized[idx],
                    MatchMode::Raw | MatchMode::UrlAllowlist => raw,
                };
                for m in rule.matcher.find_iter(haystack) {
                    if rule.mode == MatchMode::UrlAllowlist {
                        let allowed = url_host(m.as_str()).is_some_and(host_allowed);
                        if allowed {
                            continue;
                        }
                    }
                    if emitted >= self.match_cap {
                        break 'field;
                    }
                    violations.push(Violation {
                        severity: rule.severity,
                        category: rule.category,
                        description: rule.description.clone(),
                        location: ViolationLocation::line(field_name, idx + 1),
                        context: excerpt(raw),
                        suggestion: rule.suggestion.clone(),
                    });
                    emitted += 1;
                }
            }
        }
        violations
    }
}

/// Normalize a line for phrase matching: case-fold, replace every
/// non-alphanumeric character with a space, and collapse whitespace runs.
///
/// "IGNORE... all, previous; instructions!" becomes
/// "ignore all previous instructions".
pub fn normalize_line(line: &str) -> String {
    let mapped: String = line
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed, length-bounded excerpt of the offending line.
fn excerpt(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= MAX_CONTEXT_CHARS {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(MAX_CONTEXT_CHARS - 3).collect();
        format!("{head}...")
    }
}

/// Extract the host from a matched URL, stripping userinfo and port.
fn url_host(url: &str) -> Option<&str> {
    let rest = url.split("://").nth(1)?;
    let end = rest
        .find(|c| c == '/' || c == '?' || c == '#')
        .unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    if host.is_empty() { None } else { Some(host) }
}

/// Whether a host falls under any allow-listed domain (exact or subdomain).
fn host_allowed(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    catalog::ALLOWED_URL_DOMAINS
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}
