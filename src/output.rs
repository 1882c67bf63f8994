use colored::Colorize;
use serde::Serialize;

use crate::{
    rules::{Finding, Severity},
    scanner::StatementKind,
    validator::ValidationResult
};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Validation outcome for one statement
#[derive(Debug, Clone, Serialize)]
pub struct StatementReport {
    /// Statement text as validated
    pub statement: String,
    /// Coarse statement classification
    pub kind:      StatementKind,
    /// Aggregated findings and verdict
    pub result:    ValidationResult
}

/// Format statement reports based on output options
pub fn format_reports(reports: &[StatementReport], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(reports).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(reports).unwrap_or_default(),
        OutputFormat::Text => format_text_reports(reports, opts)
    }
}

fn format_text_reports(reports: &[StatementReport], opts: &OutputOptions) -> String {
    let mut output = String::new();
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let header = format!("Statement #{} ({}):", i + 1, report.kind);
        if opts.colored {
            output.push_str(&header.cyan().bold().to_string());
        } else {
            output.push_str(&header);
        }
        output.push('\n');
        output.push_str(&report.statement);
        output.push('\n');
        output.push_str(&format_result(&report.result, opts));
    }
    output
}

/// Format one validation result: summary line, then findings grouped by
/// category in family order.
pub fn format_result(result: &ValidationResult, opts: &OutputOptions) -> String {
    let mut lines = vec![summary_line(result, opts)];
    for (category, findings) in result.by_category() {
        lines.push(String::new());
        lines.push(format!("{}:", category.to_string().to_uppercase()));
        for finding in findings {
            lines.push(format_finding(finding, opts));
            if let Some(suggestion) = &finding.suggestion {
                lines.push(format!("     → {}", suggestion));
            }
        }
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn summary_line(result: &ValidationResult, opts: &OutputOptions) -> String {
    let line = if result.is_valid && result.warning_count == 0 && result.info_count == 0 {
        "✓ SQL validation passed - No issues found".to_string()
    } else if result.is_valid {
        format!(
            "✓ SQL validation passed - {} warning(s), {} info",
            result.warning_count, result.info_count
        )
    } else {
        format!(
            "✗ SQL validation failed - {} error(s), {} warning(s), {} info",
            result.error_count, result.warning_count, result.info_count
        )
    };
    if !opts.colored {
        line
    } else if result.is_valid {
        line.green().to_string()
    } else {
        line.red().bold().to_string()
    }
}

fn format_finding(finding: &Finding, opts: &OutputOptions) -> String {
    let icon = match finding.severity {
        Severity::Error => "✗",
        Severity::Warning => "⚠",
        Severity::Info => "ℹ"
    };
    let icon = if opts.colored {
        match finding.severity {
            Severity::Error => icon.red().to_string(),
            Severity::Warning => icon.yellow().to_string(),
            Severity::Info => icon.blue().to_string()
        }
    } else {
        icon.to_string()
    };
    if opts.verbose {
        format!("  {} [{}] {}", icon, finding.detector_id, finding.message)
    } else {
        format!("  {} {}", icon, finding.message)
    }
}
