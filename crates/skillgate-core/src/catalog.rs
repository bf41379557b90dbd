//! The pattern catalog: detection rules as data.
//!
//! Every recognized attack or signal category is one or more
//! [`PatternRule`]s -- a compiled matcher plus severity, description, and
//! remediation text. The catalog is a flat list assembled once by
//! [`builtin_rules`] and never mutated afterwards; adding or tuning
//! detection means editing the rule tables here, never the scanning or
//! decision logic.
//!
//! Natural-language phrase rules match against a *normalized* form of the
//! text (case-folded, punctuation and whitespace collapsed -- see
//! [`crate::scanner::normalize_line`]) so that inserted punctuation or odd
//! spacing does not evade them. Markup, encoded-blob, template, and URL
//! rules match the raw text, where punctuation is the signal.

use regex::Regex;
use skillgate_types::{ThreatCategory, ThreatSeverity};

/// Which form of the text a rule matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Match the normalized line (case-folded, punctuation/whitespace
    /// collapsed). For natural-language phrase patterns.
    NormalizedPhrase,
    /// Match the raw line. For markup, encoded blobs, and template syntax.
    Raw,
    /// Find URLs in the raw line and flag those whose host is not on
    /// [`ALLOWED_URL_DOMAINS`].
    UrlAllowlist,
}

/// One detection rule. Rules are data: all rules share this shape and are
/// dispatched uniformly by the scanner.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Category reported on match.
    pub category: ThreatCategory,
    /// Severity reported on match.
    pub severity: ThreatSeverity,
    /// Which text form the matcher runs against.
    pub mode: MatchMode,
    /// Compiled matcher.
    pub matcher: Regex,
    /// Human-readable description of what matched.
    pub description: String,
    /// Suggested remediation.
    pub suggestion: String,
}

fn rule(
    category: ThreatCategory,
    severity: ThreatSeverity,
    mode: MatchMode,
    pattern: &str,
    description: &str,
    suggestion: &str,
) -> PatternRule {
    PatternRule {
        category,
        severity,
        mode,
        matcher: Regex::new(pattern).unwrap(),
        description: description.to_string(),
        suggestion: suggestion.to_string(),
    }
}

/// Domains that external links may point at without being flagged.
///
/// Matching is by host suffix: `docs.github.com` is covered by
/// `github.com`.
pub const ALLOWED_URL_DOMAINS: &[&str] = &[
    "github.com",
    "gitlab.com",
    "docs.rs",
    "crates.io",
    "rust-lang.org",
    "python.org",
    "developer.mozilla.org",
    "example.com",
    "anthropic.com",
    "modelcontextprotocol.io",
];

/// Build the full built-in catalog. Rule order is fixed; scan output
/// follows it, which keeps results reproducible.
pub fn builtin_rules() -> Vec<PatternRule> {
    let mut rules = Vec::new();
    rules.extend(blocked_rules());
    rules.extend(dangerous_rules());
    rules.extend(suspicious_rules());
    rules
}

// ---- BLOCKED tier: high-confidence injection, rejected at every trust level ----

fn blocked_rules() -> Vec<PatternRule> {
    use MatchMode::{NormalizedPhrase, Raw};
    use ThreatCategory::*;
    use ThreatSeverity::Blocked;

    vec![
        rule(
            InstructionOverride, Blocked, NormalizedPhrase,
            r"\b(ignore|disregard|forget|override)\s+(all\s+|any\s+)?(previous|prior|above|earlier|preceding)\s+(instructions?|prompts?|rules?|directives?|commands?)\b",
            "Instruction override attempt",
            "Remove the phrasing that overrides prior instructions.",
        ),
        rule(
            InstructionOverride, Blocked, NormalizedPhrase,
            r"\b(ignore|disregard|override|forget)\s+(all\s+)?(your|the)\s+(instructions?|rules?|guidelines?)\b",
            "Instruction override attempt",
            "Remove the phrasing that overrides prior instructions.",
        ),
        rule(
            InstructionOverride, Blocked, NormalizedPhrase,
            r"\bforget\s+everything\b",
            "Instruction override attempt (context reset)",
            "Remove the phrasing that resets the assistant's context.",
        ),
        rule(
            Jailbreak, Blocked, NormalizedPhrase,
            r"\b(dan|developer|god|unrestricted)\s+mode\b",
            "Jailbreak mode activation",
            "Remove the jailbreak activation phrasing.",
        ),
        rule(
            Jailbreak, Blocked, NormalizedPhrase,
            r"\b(jailbreak|jailbroken|do\s+anything\s+now)\b",
            "Jailbreak attempt",
            "Remove the jailbreak phrasing.",
        ),
        rule(
            Jailbreak, Blocked, NormalizedPhrase,
            r"\b(bypass|disable|turn\s+off|remove)\s+(the\s+|your\s+|all\s+)?(safety|safeguards?|guardrails?|content\s+filters?|filters?|restrictions?)\b",
            "Safety bypass attempt",
            "Remove the phrasing that disables safety measures.",
        ),
        rule(
            DataExfiltration, Blocked, NormalizedPhrase,
            r"\b(send|transmit|post|upload|forward|email)\s+(this\s+|the\s+|all\s+|any\s+|your\s+)?(data|credentials?|secrets?|information|conversation|context|contents?|keys?)\s+to\b",
            "Data exfiltration directive",
            "Remove the directive to send data to an external party.",
        ),
        rule(
            DataExfiltration, Blocked, NormalizedPhrase,
            r"\bexfiltrat\w*\b",
            "Data exfiltration directive",
            "Remove the directive to send data to an external party.",
        ),
        rule(
            DataExfiltration, Blocked, NormalizedPhrase,
            r"\bleak\s+(this\s+|the\s+|all\s+|any\s+)?(information|data|credentials?|secrets?|keys?|prompts?)\b",
            "Data exfiltration directive",
            "Remove the directive to leak information.",
        ),
        rule(
            SystemManipulation, Blocked, NormalizedPhrase,
            r"\b(show|reveal|print|output|repeat|display)\s+(me\s+)?(your\s+(system\s+)?(prompt|instructions|rules)|the\s+system\s+(prompt|instructions|rules))\b",
            "System prompt extraction attempt",
            "Remove the request to expose system-level instructions.",
        ),
        rule(
            SystemManipulation, Blocked, NormalizedPhrase,
            r"\brepeat\s+everything\s+above\b",
            "System prompt extraction attempt",
            "Remove the request to expose system-level instructions.",
        ),
        rule(
            SystemManipulation, Blocked, Raw,
            r"(?i)(<\|(im_start|im_end|im_sep|endoftext|system|user|assistant)\|>|\[/?INST\]|<</?SYS>>|</?system>)",
            "Model special-token injection",
            "Strip model-specific control tokens from the content.",
        ),
    ]
}

// ---- DANGEROUS tier: likely manipulation, rejected for verified and untrusted ----

fn dangerous_rules() -> Vec<PatternRule> {
    use MatchMode::{NormalizedPhrase, Raw};
    use ThreatCategory::*;
    use ThreatSeverity::Dangerous;

    vec![
        rule(
            RoleHijack, Dangerous, NormalizedPhrase,
            r"\b(you\s+are\s+now|now\s+you\s+are)\s+(a|an|the)\b",
            "Role reassignment directed at the assistant",
            "Remove the phrasing that reassigns the assistant's role.",
        ),
        rule(
            RoleHijack, Dangerous, NormalizedPhrase,
            r"\b(act\s+as|pretend\s+to\s+be|pretend\s+you\s+are|roleplay\s+as)\s+(a\s+|an\s+|the\s+)?(malicious|evil|criminal|hacker|attacker|hostile|rogue|unethical)\b",
            "Harmful role assignment",
            "Remove the phrasing that assigns a harmful role.",
        ),
        rule(
            ContextEscape, Dangerous, NormalizedPhrase,
            r"\b(end\s+of\s+(the\s+)?(skill\s+)?(instructions?|context|document|prompt)|this\s+is\s+the\s+end\s+of)\b",
            "Context escape framing",
            "Remove the framing that pretends the document has ended.",
        ),
        rule(
            InstructionReplacement, Dangerous, Raw,
            r"(?i)\bnew\s+(instructions?|rules?|directives?)\s*:",
            "Instruction replacement framing",
            "Remove the framing that introduces replacement instructions.",
        ),
        rule(
            InstructionReplacement, Dangerous, NormalizedPhrase,
            r"\bfrom\s+now\s+on\s+(you|your)\b",
            "Instruction replacement framing",
            "Remove the framing that introduces replacement instructions.",
        ),
    ]
}

// ---- SUSPICIOUS tier: possibly benign, rejected for untrusted sources only ----

fn suspicious_rules() -> Vec<PatternRule> {
    use MatchMode::{Raw, UrlAllowlist};
    use ThreatCategory::*;
    use ThreatSeverity::Suspicious;

    vec![
        rule(
            HtmlScript, Suspicious, Raw,
            r"(?i)<\s*(script|iframe|object|embed|form|style|link|meta)\b",
            "Embedded <script> or active markup tag",
            "Remove embedded markup or move it into a fenced code block.",
        ),
        rule(
            CodeExecution, Suspicious, Raw,
            r"(?i)\b(eval|exec|execfile|compile|os\.system|subprocess\.(run|call|popen))\s*\(",
            "Code-execution call such as eval()",
            "Remove code-execution calls or mark them as inert examples.",
        ),
        rule(
            Base64Blob, Suspicious, Raw,
            r"(?i)base64\s*,\s*[A-Za-z0-9+/=]{16,}",
            "Base64-encoded data payload",
            "Remove encoded payloads; skill content should be plain text.",
        ),
        rule(
            Base64Blob, Suspicious, Raw,
            r"[A-Za-z0-9+/]{64,}={0,2}",
            "Long base64-encoded data blob",
            "Remove encoded payloads; skill content should be plain text.",
        ),
        rule(
            TemplateInjection, Suspicious, Raw,
            r"\{\{[^}]*\}\}|\{%[^%]*%\}|\$\{[^}]*\}",
            "Template-injection syntax",
            "Remove template expressions or escape them in a code block.",
        ),
        rule(
            ExternalUrl, Suspicious, UrlAllowlist,
            r#"(?i)\bhttps?://[^\s<>"')\]]+"#,
            "External URL outside the allow-listed domain set",
            "Link only to allow-listed documentation domains.",
        ),
    ]
}
