//! Injection-signature and credential detectors.
//!
//! Security checks run over the raw statement text rather than the token
//! stream, because injection idioms deliberately break tokenization (quote
//! breaks, stacked statements, comment truncation).

use std::sync::LazyLock;

use regex::Regex;

use super::{Category, Detector, DetectorInfo, Finding, Severity};
use crate::scanner::ScanContext;

/// Known injection idioms paired with the name reported in the finding.
///
/// Compiled once on first use. Matching is case-insensitive; each matched
/// entry produces its own finding.
static INJECTION_SIGNATURES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"'\s*;\s*drop\s+table", "stacked DROP TABLE after quote break"),
        (r"'\s*;\s*delete\s+from", "stacked DELETE after quote break"),
        (r"'\s*;\s*exec\b", "stacked EXEC after quote break"),
        (r"\bor\s+'?\d+'?\s*=\s*'?\d+", "OR tautology"),
        (r"\band\s+'?\d+'?\s*=\s*'?\d+", "AND tautology"),
        (r"'\s*;\s*(?:--|#)", "comment truncation after quote break"),
        (r"admin'\s*(?:--|#)", "comment-based authentication bypass"),
        (r"(?:'\s*|\b\d+\s+)union\s+select", "UNION-based injection"),
    ]
    .into_iter()
    .map(|(pattern, name)| {
        let regex = Regex::new(&format!("(?i){pattern}")).expect("valid regex");
        (regex, name)
    })
    .collect()
});

/// Password-like column compared against a string literal.
static HARDCODED_PASSWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:password|passwd|pwd)\s*=\s*'[^']*'").expect("valid regex")
});

/// Known SQL injection idioms in the statement text
pub struct InjectionSignature;

impl Detector for InjectionSignature {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "SEC001",
            name:     "Injection signature",
            severity: Severity::Error,
            category: Category::Security
        }
    }

    fn check(&self, _ctx: &ScanContext, text: &str) -> Vec<Finding> {
        let info = self.info();
        INJECTION_SIGNATURES
            .iter()
            .filter_map(|(regex, idiom)| {
                regex.find(text).map(|m| Finding {
                    detector_id: info.id,
                    detector_name: info.name,
                    message: format!("Potential SQL injection: {idiom}"),
                    severity: info.severity,
                    category: info.category,
                    suggestion: Some(
                        "Use parameterized queries instead of string concatenation".to_string()
                    ),
                    location: Some(m.start())
                })
            })
            .collect()
    }
}

/// Credentials embedded directly in the statement
pub struct HardcodedPassword;

impl Detector for HardcodedPassword {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "SEC002",
            name:     "Hardcoded password",
            severity: Severity::Warning,
            category: Category::Security
        }
    }

    fn check(&self, _ctx: &ScanContext, text: &str) -> Vec<Finding> {
        let Some(m) = HARDCODED_PASSWORD_REGEX.find(text) else {
            return vec![];
        };
        let info = self.info();
        vec![Finding {
            detector_id:   info.id,
            detector_name: info.name,
            message:       "Possible hardcoded password in statement".to_string(),
            severity:      info.severity,
            category:      info.category,
            suggestion:    Some("Use parameterized queries for sensitive data".to_string()),
            location:      Some(m.start())
        }]
    }
}
