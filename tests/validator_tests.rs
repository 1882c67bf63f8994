use std::sync::Arc;

use sql_validator::catalog::StaticCatalog;
use sql_validator::rules::{
    Category, Detector, DetectorFamily, DetectorInfo, Finding, PatternLibrary, Severity
};
use sql_validator::scanner::ScanContext;
use sql_validator::validator::{ValidateOptions, Validator};

fn catalog_options(ddl: &str) -> ValidateOptions {
    let catalog = StaticCatalog::from_ddl(ddl).unwrap();
    ValidateOptions {
        check_existence: true,
        catalog:         Some(Arc::new(catalog))
    }
}

#[test]
fn test_empty_statement_is_error() {
    let result = Validator::new().validate("");
    assert!(!result.is_valid);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].detector_id, "SYN001");
}

#[test]
fn test_whitespace_only_is_error() {
    let result = Validator::new().validate("   \n\t  ");
    assert!(!result.is_valid);
    assert_eq!(result.error_count, 1);
}

#[test]
fn test_clean_statement_passes() {
    let result = Validator::new().validate("SELECT id FROM users WHERE id = 1 LIMIT 10;");
    assert!(result.is_valid);
    assert!(result.findings.is_empty());
}

#[test]
fn test_injection_with_select_star_reports_both() {
    let result = Validator::new().validate("SELECT * FROM users WHERE name = '' OR '1'='1'");
    assert!(!result.is_valid);
    assert!(result.findings.iter().any(|f| f.detector_id == "SEC001"));
    assert!(result.findings.iter().any(|f| f.detector_id == "PERF001"));
}

#[test]
fn test_unmatched_paren_is_invalid() {
    let result = Validator::new().validate("SELECT id FROM users WHERE (id = 1");
    assert!(!result.is_valid);
    assert!(result.findings.iter().any(|f| f.detector_id == "SYN002"));
}

#[test]
fn test_ordinal_order_by_valid_with_warning() {
    let result = Validator::new().validate("SELECT id FROM users ORDER BY 2 LIMIT 5;");
    assert!(result.is_valid);
    assert!(result.warning_count >= 1);
    assert!(result.findings.iter().any(|f| f.detector_id == "PERF004"));
}

#[test]
fn test_delete_without_where_valid_with_warning() {
    let result = Validator::new().validate("DELETE FROM users;");
    assert!(result.is_valid);
    assert!(result.findings.iter().any(|f| {
        f.detector_id == "PERF006" && f.severity == Severity::Warning
    }));
}

#[test]
fn test_escaped_quote_produces_no_findings() {
    let result = Validator::new().validate("INSERT INTO t (s) VALUES ('it''s fine');");
    assert!(result.is_valid);
    assert!(result.findings.is_empty());
}

#[test]
fn test_severity_counts() {
    let result = Validator::new().validate("(SELECT * FROM users");
    assert_eq!(result.error_count, 1);
    assert_eq!(result.warning_count, 1);
    assert_eq!(result.info_count, 1);
}

#[test]
fn test_by_category_follows_family_order() {
    let result = Validator::new().validate("(SELECT * FROM users");
    let categories: Vec<Category> = result.by_category().keys().copied().collect();
    assert_eq!(categories, vec![Category::Syntax, Category::Performance]);
}

#[test]
fn test_findings_keep_family_order() {
    let result = Validator::new().validate("SELECT * FROM users WHERE name LIKE '%x%'");
    let mut seen = Vec::new();
    for finding in &result.findings {
        if !seen.contains(&finding.category) {
            seen.push(finding.category);
        }
    }
    assert_eq!(seen, vec![Category::Syntax, Category::Performance]);
}

#[test]
fn test_validation_is_deterministic() {
    let sql = "SELECT * FROM users WHERE name LIKE '%x' ORDER BY 2";
    let validator = Validator::new();
    let first = validator.validate(sql);
    let second = validator.validate(sql);
    assert_eq!(first, second);
}

#[test]
fn test_existence_known_table_passes() {
    let options = catalog_options("CREATE TABLE users (id INT, name TEXT);");
    let result = Validator::new().validate_with("SELECT id FROM users LIMIT 1;", &options);
    assert!(result.is_valid);
}

#[test]
fn test_existence_unknown_table_is_error() {
    let options = catalog_options("CREATE TABLE users (id INT);");
    let result = Validator::new().validate_with("SELECT id FROM ghosts LIMIT 1;", &options);
    assert!(!result.is_valid);
    let finding = result
        .findings
        .iter()
        .find(|f| f.detector_id == "EXIST001")
        .unwrap();
    assert!(finding.message.contains("ghosts"));
}

#[test]
fn test_existence_unknown_column_is_error() {
    let options = catalog_options("CREATE TABLE users (id INT, name TEXT);");
    let result = Validator::new().validate_with("SELECT salary FROM users LIMIT 1;", &options);
    assert!(!result.is_valid);
    assert!(result.findings.iter().any(|f| f.detector_id == "EXIST002"));
}

#[test]
fn test_existence_requires_catalog() {
    let options = ValidateOptions {
        check_existence: true,
        catalog:         None
    };
    let result = Validator::new().validate_with("SELECT id FROM users LIMIT 1;", &options);
    assert!(!result.is_valid);
    assert!(result.findings.iter().any(|f| f.detector_id == "EXIST004"));
}

#[test]
fn test_existence_not_run_by_default() {
    let result = Validator::new().validate("SELECT id FROM ghosts LIMIT 1;");
    assert!(result.is_valid);
}

#[test]
fn test_existence_findings_follow_pattern_findings() {
    let options = catalog_options("CREATE TABLE users (id INT);");
    let result = Validator::new().validate_with("SELECT * FROM ghosts", &options);
    let ids: Vec<&str> = result.findings.iter().map(|f| f.detector_id).collect();
    let star = ids.iter().position(|id| *id == "PERF001").unwrap();
    let table = ids.iter().position(|id| *id == "EXIST001").unwrap();
    assert!(star < table);
}

struct PanickingDetector;

impl Detector for PanickingDetector {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "TEST001",
            name:     "Panicking detector",
            severity: Severity::Warning,
            category: Category::Performance
        }
    }

    fn check(&self, _ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        panic!("boom")
    }
}

#[test]
fn test_panicking_family_degrades_to_info() {
    let library = PatternLibrary::from_families(vec![DetectorFamily::new(
        Category::Performance,
        vec![Box::new(PanickingDetector)]
    )]);
    let result = Validator::with_library(library).validate("SELECT 1");
    assert!(result.is_valid);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].detector_id, "ENG001");
    assert_eq!(result.findings[0].severity, Severity::Info);
}
