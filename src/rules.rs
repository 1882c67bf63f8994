//! Heuristic detector library for SQL statements.
//!
//! This module provides the pattern library executed by the
//! [`Validator`](crate::validator::Validator): pure detectors organized into
//! per-category families. Detectors are implemented as types that implement
//! the [`Detector`] trait.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐     ┌─────────┐     ┌──────────────────┐
//! │ Statement │────▶│ Scanner │────▶│ Pattern Library  │
//! └───────────┘     └─────────┘     └──────────────────┘
//!                                            │
//!                                    ┌───────┴───────┐
//!                                    │   Families    │
//!                                    │  (4, ordered) │
//!                                    └───────────────┘
//! ```
//!
//! Every detector reads the same [`ScanContext`] produced by one scanning
//! pass. Families always report in a fixed order (syntax, security,
//! performance, naming) regardless of how the validator schedules them.
//!
//! # Detector Categories
//!
//! - **Syntax** (`SYN002`-`SYN005`) - Structural problems the scanner can see
//! - **Security** (`SEC001`-`SEC002`) - Injection signatures and credentials
//! - **Performance** (`PERF001`-`PERF006`) - Query anti-patterns
//! - **Naming** (`NAME001`) - Convention checks on introduced identifiers
//!
//! `SYN001` (empty statement) is raised by the validator before scanning, and
//! the existence checks (`EXIST001`-`EXIST003`) live in [`crate::existence`]
//! because they need a catalog collaborator.
//!
//! # Configuration
//!
//! Detectors can be disabled by ID via [`RulesConfig`]. Disabling removes a
//! detector from its family; it never reclassifies severity:
//!
//! ```toml
//! [rules]
//! disabled = ["PERF005"]
//! ```
//!
//! # Implementing Custom Detectors
//!
//! ```
//! use sql_validator::{
//!     rules::{Category, Detector, DetectorInfo, Finding, Severity},
//!     scanner::ScanContext
//! };
//!
//! pub struct MyDetector;
//!
//! impl Detector for MyDetector {
//!     fn info(&self) -> DetectorInfo {
//!         DetectorInfo {
//!             id:       "CUSTOM001",
//!             name:     "My custom detector",
//!             severity: Severity::Warning,
//!             category: Category::Performance
//!         }
//!     }
//!
//!     fn check(&self, ctx: &ScanContext, text: &str) -> Vec<Finding> {
//!         vec![]
//!     }
//! }
//! ```

mod naming;
mod performance;
mod security;
mod syntax;
mod types;

pub use types::{Category, DetectorInfo, Finding, Severity};

use crate::{config::RulesConfig, scanner::ScanContext};

/// Trait for implementing statement detectors.
///
/// Detectors are stateless and pure: they examine one scanned statement and
/// return any findings. They must be `Send + Sync` so families can run on
/// worker threads.
///
/// # Example
///
/// ```
/// use sql_validator::{
///     rules::{Category, Detector, DetectorInfo, Finding, Severity},
///     scanner::ScanContext
/// };
///
/// struct OversizedStatement;
///
/// impl Detector for OversizedStatement {
///     fn info(&self) -> DetectorInfo {
///         DetectorInfo {
///             id:       "CUSTOM002",
///             name:     "Oversized statement",
///             severity: Severity::Info,
///             category: Category::Performance
///         }
///     }
///
///     fn check(&self, ctx: &ScanContext, text: &str) -> Vec<Finding> {
///         if text.len() > 10_000 {
///             let info = self.info();
///             vec![Finding {
///                 detector_id: info.id,
///                 detector_name: info.name,
///                 message: "Statement is unusually large".into(),
///                 severity: info.severity,
///                 category: info.category,
///                 suggestion: None,
///                 location: None
///             }]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Detector: Send + Sync {
    /// Returns metadata about this detector.
    fn info(&self) -> DetectorInfo;

    /// Analyzes one scanned statement and returns any findings.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Scan context shared by all detectors for this statement
    /// * `text` - The raw statement text
    ///
    /// # Returns
    ///
    /// A vector of findings, empty if the statement passes this detector.
    fn check(&self, ctx: &ScanContext, text: &str) -> Vec<Finding>;
}

/// One category's detectors, executed together as a unit.
///
/// A family is the failure-isolation boundary: the validator runs each
/// family independently, so a panicking detector takes down only its own
/// category's results.
pub struct DetectorFamily {
    /// Category shared by every detector in this family
    pub category: Category,
    detectors:    Vec<Box<dyn Detector>>
}

impl DetectorFamily {
    /// Build a family from detectors reporting under one category.
    pub fn new(category: Category, detectors: Vec<Box<dyn Detector>>) -> Self {
        Self {
            category,
            detectors
        }
    }

    /// Run every detector in registration order against one statement.
    pub fn check(&self, ctx: &ScanContext, text: &str) -> Vec<Finding> {
        self.detectors
            .iter()
            .flat_map(|detector| detector.check(ctx, text))
            .collect()
    }

    /// Number of registered detectors in this family.
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Whether configuration disabled every detector in this family.
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Metadata for each registered detector, in registration order.
    pub fn detector_infos(&self) -> Vec<DetectorInfo> {
        self.detectors.iter().map(|d| d.info()).collect()
    }
}

/// The full set of detector families, in reporting order.
///
/// # Example
///
/// ```
/// use sql_validator::{config::RulesConfig, rules::PatternLibrary};
///
/// let config = RulesConfig {
///     disabled: vec!["PERF005".into()]
/// };
///
/// let library = PatternLibrary::with_config(config);
///
/// assert_eq!(library.families().len(), 4);
/// ```
pub struct PatternLibrary {
    families: Vec<DetectorFamily>
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternLibrary {
    /// Create a library with all default detectors enabled.
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    /// Create a library honoring the `disabled` list from configuration.
    ///
    /// Family order is fixed. A fully disabled family stays in the list so
    /// reporting order never depends on configuration.
    pub fn with_config(config: RulesConfig) -> Self {
        let families = vec![
            family(Category::Syntax, &config, vec![
                Box::new(syntax::UnbalancedParentheses),
                Box::new(syntax::UnbalancedQuotes),
                Box::new(syntax::MissingSemicolon),
                Box::new(syntax::SelectWithoutFrom),
            ]),
            family(Category::Security, &config, vec![
                Box::new(security::InjectionSignature),
                Box::new(security::HardcodedPassword),
            ]),
            family(Category::Performance, &config, vec![
                Box::new(performance::SelectStar),
                Box::new(performance::LeadingWildcardLike),
                Box::new(performance::FunctionOnColumn),
                Box::new(performance::OrdinalOrderBy),
                Box::new(performance::MissingLimit),
                Box::new(performance::MissingWhere),
            ]),
            family(Category::Naming, &config, vec![
                Box::new(naming::SnakeCaseNaming),
            ]),
        ];
        Self {
            families
        }
    }

    /// Build a library from explicit families, keeping the given order.
    ///
    /// This is the registration point for custom detectors: group them into
    /// a [`DetectorFamily`] and hand the library to the validator.
    pub fn from_families(families: Vec<DetectorFamily>) -> Self {
        Self {
            families
        }
    }

    /// Detector families in reporting order.
    pub fn families(&self) -> &[DetectorFamily] {
        &self.families
    }

    /// Total number of enabled detectors across all families.
    pub fn detector_count(&self) -> usize {
        self.families.iter().map(DetectorFamily::len).sum()
    }
}

fn family(
    category: Category,
    config: &RulesConfig,
    detectors: Vec<Box<dyn Detector>>
) -> DetectorFamily {
    let detectors = detectors
        .into_iter()
        .filter(|detector| {
            !config
                .disabled
                .iter()
                .any(|d| d.eq_ignore_ascii_case(detector.info().id))
        })
        .collect();
    DetectorFamily {
        category,
        detectors
    }
}
