//! Type definitions for the validation finding model.
//!
//! This module defines the core types shared by detectors and the
//! orchestrator:
//! - [`Severity`] - Finding severity levels (Info, Warning, Error)
//! - [`Category`] - Finding categories (Syntax, Security, Performance,
//!   Naming, Existence)
//! - [`Finding`] - Individual detected issues with context
//! - [`DetectorInfo`] - Detector metadata for registration and filtering

use serde::Serialize;

/// Severity level of a finding.
///
/// Ordered from lowest to highest severity for sorting purposes.
/// A statement is valid exactly when no finding carries [`Severity::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// Informational note, never affects validity
    Info,
    /// Likely problem worth reviewing (exit code 1)
    Warning,
    /// Defect that makes the statement invalid (exit code 2)
    Error
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR")
        }
    }
}

/// Category of a finding for grouping and filtering.
///
/// Declaration order is report order: syntax defects first, then security
/// risks, performance issues, naming deviations, and schema references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Structural defects: balance, termination, malformed clauses
    Syntax,
    /// Injection signatures and credential leaks
    Security,
    /// Query patterns likely to behave badly at scale
    Performance,
    /// Identifier naming convention deviations
    Naming,
    /// References to tables or columns missing from the catalog
    Existence
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax => write!(f, "Syntax"),
            Self::Security => write!(f, "Security"),
            Self::Performance => write!(f, "Performance"),
            Self::Naming => write!(f, "Naming"),
            Self::Existence => write!(f, "Existence")
        }
    }
}

/// A single issue detected in a statement.
///
/// Category and severity are fixed by the detector that produced the
/// finding and are never reclassified downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Unique detector identifier (e.g., "SYN002", "SEC001")
    pub detector_id:   &'static str,
    /// Human-readable detector name
    pub detector_name: &'static str,
    /// Detailed description of the issue
    pub message:       String,
    /// Severity level of this finding
    pub severity:      Severity,
    /// Category for grouping findings
    pub category:      Category,
    /// Optional remediation hint
    pub suggestion:    Option<String>,
    /// Best-effort byte offset into the source text
    pub location:      Option<usize>
}

/// Metadata about a detector for identification and configuration.
#[derive(Debug, Clone)]
pub struct DetectorInfo {
    /// Unique detector identifier (e.g., "PERF001")
    pub id:       &'static str,
    /// Human-readable detector name
    pub name:     &'static str,
    /// Severity assigned to findings from this detector
    pub severity: Severity,
    /// Detector category
    pub category: Category
}
