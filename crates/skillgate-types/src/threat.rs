//! The threat model: trust levels, severities, and violation reports.
//!
//! A validation session pairs one [`TrustLevel`] (resolved once from the
//! skill's originating repository, immutable for the session) with the
//! [`Violation`]s produced by scanning the skill's content. The admission
//! decision compares each violation's [`ThreatSeverity`] against the trust
//! level's blocking threshold -- severities are totally ordered, categories
//! are only descriptive.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Trust levels ────────────────────────────────────────────────────────

/// Trust tier assigned to a skill's originating repository.
///
/// Resolved once per skill load, before any scanning happens, and never
/// mutated mid-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// Officially maintained repositories. Only [`ThreatSeverity::Blocked`]
    /// findings reject the skill.
    Trusted,
    /// Repositories the operator has explicitly promoted. `Dangerous` and
    /// above reject.
    Verified,
    /// Everything else, including unknown and empty repository identifiers
    /// (fail-closed default). Any non-`Safe` finding rejects.
    Untrusted,
}

impl TrustLevel {
    /// The lowest severity that rejects a skill at this trust level.
    ///
    /// A flat enum-to-threshold map: no per-level behavior beyond this
    /// single value.
    pub fn blocking_threshold(self) -> ThreatSeverity {
        match self {
            Self::Trusted => ThreatSeverity::Blocked,
            Self::Verified => ThreatSeverity::Dangerous,
            Self::Untrusted => ThreatSeverity::Suspicious,
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trusted => write!(f, "trusted"),
            Self::Verified => write!(f, "verified"),
            Self::Untrusted => write!(f, "untrusted"),
        }
    }
}

// ── Severities ──────────────────────────────────────────────────────────

/// Severity of a detected threat pattern.
///
/// The variant order defines the total order used by policy decisions:
/// `Safe < Suspicious < Dangerous < Blocked`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ThreatSeverity {
    /// No threat detected.
    Safe,
    /// Possibly benign (markup, encoded blobs, off-allowlist URLs). Blocks
    /// untrusted sources only.
    Suspicious,
    /// Likely manipulation (role hijack, context escape). Blocks verified
    /// and untrusted sources.
    Dangerous,
    /// High-confidence injection. Blocks at every trust level.
    Blocked,
}

impl fmt::Display for ThreatSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Suspicious => write!(f, "SUSPICIOUS"),
            Self::Dangerous => write!(f, "DANGEROUS"),
            Self::Blocked => write!(f, "BLOCKED"),
        }
    }
}

// ── Categories ──────────────────────────────────────────────────────────

/// Category of a detected threat pattern.
///
/// Categories are descriptive labels for reporting; only the severity
/// participates in admission decisions. The `Display` form is the stable
/// snake_case identifier used in logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatCategory {
    /// "Ignore all previous instructions" and variants.
    InstructionOverride,
    /// DAN mode, developer mode, safety-filter bypass.
    Jailbreak,
    /// Directives to send data or credentials to an external party.
    DataExfiltration,
    /// System-prompt extraction and model special-token injection.
    SystemManipulation,
    /// Reassigning the assistant to a harmful role.
    RoleHijack,
    /// Framing that pretends the document boundary has ended.
    ContextEscape,
    /// "New instructions:" framing that replaces prior directives.
    InstructionReplacement,
    /// Embedded script or active markup tags.
    HtmlScript,
    /// Code-execution function calls (eval, exec, ...).
    CodeExecution,
    /// Long base64-looking blobs that may smuggle payloads.
    Base64Blob,
    /// Template-injection syntax.
    TemplateInjection,
    /// External URL whose host is not on the allow-listed domain set.
    ExternalUrl,
    /// A size ceiling was breached.
    SizeLimit,
}

impl fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Self::InstructionOverride => "instruction_override",
            Self::Jailbreak => "jailbreak",
            Self::DataExfiltration => "data_exfiltration",
            Self::SystemManipulation => "system_manipulation",
            Self::RoleHijack => "role_hijack",
            Self::ContextEscape => "context_escape",
            Self::InstructionReplacement => "instruction_replacement",
            Self::HtmlScript => "html_script",
            Self::CodeExecution => "code_execution",
            Self::Base64Blob => "base64_blob",
            Self::TemplateInjection => "template_injection",
            Self::ExternalUrl => "external_url",
            Self::SizeLimit => "size_limit",
        };
        write!(f, "{id}")
    }
}

// ── Violations ──────────────────────────────────────────────────────────

/// Where in a skill document a violation was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationLocation {
    /// Which field was being scanned ("instructions" or "description").
    pub field: String,
    /// 1-based line number within the field. 0 for whole-field findings
    /// such as size breaches.
    pub line: usize,
}

impl ViolationLocation {
    /// Location of a finding on a specific line of a field.
    pub fn line(field: impl Into<String>, line: usize) -> Self {
        Self {
            field: field.into(),
            line,
        }
    }

    /// Location of a whole-field finding (no meaningful line number).
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            line: 0,
        }
    }
}

impl fmt::Display for ViolationLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.field)
        } else {
            write!(f, "{}, line {}", self.field, self.line)
        }
    }
}

/// A single detected match or guard breach.
///
/// One rule matching several times in one field yields several violations
/// (one per match site, up to the scanner's cap), so callers can report all
/// evidence. Policy evaluation only needs the maximum severity present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Severity of the finding.
    pub severity: ThreatSeverity,
    /// Category of the matched rule (or guard).
    pub category: ThreatCategory,
    /// Human-readable description of the finding.
    pub description: String,
    /// Where the finding was located.
    pub location: ViolationLocation,
    /// Excerpt of the offending line (truncated).
    pub context: String,
    /// Suggested remediation.
    pub suggestion: String,
}

// ── Requests and results ────────────────────────────────────────────────

/// Input to one validation call. Transient; owned by the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// The skill's instruction body (markdown).
    pub instructions: String,
    /// The skill's short description.
    pub description: String,
    /// Skill identifier (e.g. "owner/skill-name").
    pub skill_id: String,
    /// Originating repository identifier (e.g. "owner/name"). Empty means
    /// unknown provenance and resolves to [`TrustLevel::Untrusted`].
    pub repository_id: String,
}

/// Outcome of one validation call. Immutable snapshot.
///
/// The full violation list is always present, whatever the decision, so
/// callers can log suspicious findings even on an admitted skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the skill may be loaded under the trust level used.
    pub is_safe: bool,
    /// All findings, in scan order (instructions, then description, then
    /// size guard).
    pub violations: Vec<Violation>,
    /// The trust level the admission decision was made against.
    pub trust_level_used: TrustLevel,
}

impl ValidationResult {
    /// The highest severity among the findings ([`ThreatSeverity::Safe`]
    /// when there are none).
    pub fn max_severity(&self) -> ThreatSeverity {
        self.violations
            .iter()
            .map(|v| v.severity)
            .max()
            .unwrap_or(ThreatSeverity::Safe)
    }
}
