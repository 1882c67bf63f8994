//! Validation orchestrator.
//!
//! Ties the pipeline together: short-circuit on empty input, one scanning
//! pass, the four detector families, then the optional existence check.
//! Families run in parallel over the shared [`ScanContext`] and their
//! results are concatenated in fixed family order, so the report never
//! depends on scheduling.
//!
//! A panicking detector family is isolated: its findings are replaced by a
//! single Info finding and validation continues. Validation itself never
//! fails, adversarial input is exactly what it is for.
//!
//! # Example
//!
//! ```
//! use sql_validator::validator::Validator;
//!
//! let validator = Validator::new();
//! let result = validator.validate("SELECT id FROM users WHERE (id = 1");
//!
//! assert!(!result.is_valid);
//! assert!(result.error_count >= 1);
//! ```
//!
//! With a catalog:
//!
//! ```
//! use std::sync::Arc;
//!
//! use sql_validator::{
//!     catalog::StaticCatalog,
//!     validator::{ValidateOptions, Validator}
//! };
//!
//! let catalog = StaticCatalog::from_ddl("CREATE TABLE users (id INT);").unwrap();
//! let options = ValidateOptions {
//!     check_existence: true,
//!     catalog:         Some(Arc::new(catalog))
//! };
//!
//! let result = Validator::new().validate_with("SELECT id FROM ghosts", &options);
//!
//! assert!(!result.is_valid);
//! ```

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Arc
};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    catalog::Catalog,
    config::RulesConfig,
    existence,
    rules::{Category, Finding, PatternLibrary, Severity},
    scanner
};

/// Options for one validation call.
#[derive(Clone, Default)]
pub struct ValidateOptions {
    /// Run the existence checker. Requires `catalog`.
    pub check_existence: bool,
    /// Catalog accessor consulted by the existence checker.
    pub catalog:         Option<Arc<dyn Catalog>>
}

/// Aggregated outcome of validating one statement.
///
/// Findings are ordered by family (syntax, security, performance, naming,
/// then existence) and keep detector registration order within a family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// True exactly when no finding carries [`Severity::Error`]
    pub is_valid:      bool,
    /// All findings in reporting order
    pub findings:      Vec<Finding>,
    /// Number of error findings
    pub error_count:   usize,
    /// Number of warning findings
    pub warning_count: usize,
    /// Number of info findings
    pub info_count:    usize
}

impl ValidationResult {
    /// Build a result from findings, deriving the verdict and counts.
    pub fn new(findings: Vec<Finding>) -> Self {
        let mut error_count = 0;
        let mut warning_count = 0;
        let mut info_count = 0;
        for finding in &findings {
            match finding.severity {
                Severity::Error => error_count += 1,
                Severity::Warning => warning_count += 1,
                Severity::Info => info_count += 1
            }
        }
        Self {
            is_valid: error_count == 0,
            findings,
            error_count,
            warning_count,
            info_count
        }
    }

    /// Findings grouped by category, preserving order within each group.
    pub fn by_category(&self) -> IndexMap<Category, Vec<&Finding>> {
        let mut groups: IndexMap<Category, Vec<&Finding>> = IndexMap::new();
        for finding in &self.findings {
            groups.entry(finding.category).or_default().push(finding);
        }
        groups
    }
}

/// Statement validation engine.
///
/// Holds the detector library; one instance validates any number of
/// statements, concurrently if desired. Each call builds its own scan
/// context, no state is shared between calls.
pub struct Validator {
    library: PatternLibrary
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a validator with all default detectors.
    pub fn new() -> Self {
        Self {
            library: PatternLibrary::new()
        }
    }

    /// Create a validator honoring the detector configuration.
    pub fn with_config(config: RulesConfig) -> Self {
        Self {
            library: PatternLibrary::with_config(config)
        }
    }

    /// Create a validator over an explicit detector library.
    pub fn with_library(library: PatternLibrary) -> Self {
        Self {
            library
        }
    }

    /// Validate one statement with default options.
    pub fn validate(&self, text: &str) -> ValidationResult {
        self.validate_with(text, &ValidateOptions::default())
    }

    /// Validate one statement.
    ///
    /// Always returns a result. Empty input short-circuits before scanning.
    pub fn validate_with(&self, text: &str, options: &ValidateOptions) -> ValidationResult {
        if text.trim().is_empty() {
            return ValidationResult::new(vec![empty_statement()]);
        }
        let ctx = scanner::scan(text);
        let family_findings: Vec<Vec<Finding>> = self
            .library
            .families()
            .par_iter()
            .map(|family| {
                catch_unwind(AssertUnwindSafe(|| family.check(&ctx, text))).unwrap_or_else(
                    |_| {
                        log::warn!("{} detector family panicked", family.category);
                        vec![family_failed(family.category)]
                    }
                )
            })
            .collect();
        let mut findings: Vec<Finding> = family_findings.into_iter().flatten().collect();
        if options.check_existence {
            match options.catalog.as_deref() {
                Some(catalog) => findings.extend(existence::check(&ctx, catalog)),
                None => findings.push(missing_catalog())
            }
        }
        ValidationResult::new(findings)
    }
}

fn empty_statement() -> Finding {
    Finding {
        detector_id:   "SYN001",
        detector_name: "Empty statement",
        message:       "Empty SQL statement".to_string(),
        severity:      Severity::Error,
        category:      Category::Syntax,
        suggestion:    None,
        location:      None
    }
}

fn family_failed(category: Category) -> Finding {
    Finding {
        detector_id:   "ENG001",
        detector_name: "Detector family failure",
        message:       format!("Detector family {category} failed"),
        severity:      Severity::Info,
        category,
        suggestion:    None,
        location:      None
    }
}

fn missing_catalog() -> Finding {
    Finding {
        detector_id:   "EXIST004",
        detector_name: "Missing catalog",
        message:       "check_existence requires a catalog accessor".to_string(),
        severity:      Severity::Error,
        category:      Category::Existence,
        suggestion:    Some("Provide a catalog or disable existence checking".to_string()),
        location:      None
    }
}
