//! Application logic for the SQL Validator CLI.
//!
//! This module contains the core application logic separated from the main
//! entry point to enable testing.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Arc
};

use crate::{
    catalog::{Catalog, StaticCatalog},
    cli::Format,
    config::Config,
    error::{AppResult, config_error, file_read_error},
    output::{OutputFormat, OutputOptions, StatementReport, format_reports},
    scanner::{scan, split_statements},
    validator::{ValidateOptions, Validator}
};

/// Parameters for the validate command
#[derive(Debug, Clone)]
pub struct ValidateParams {
    pub sql:             Option<String>,
    pub queries_path:    Option<PathBuf>,
    pub schema_path:     Option<PathBuf>,
    pub check_existence: bool,
    pub output_format:   Format,
    pub verbose:         bool,
    pub no_color:        bool
}

/// Result of validation containing the rendered report
#[derive(Debug, Clone)]
pub struct ValidateOutcome {
    pub exit_code: i32,
    pub report:    String
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Calculate exit code based on findings
pub fn calculate_exit_code(reports: &[StatementReport]) -> i32 {
    if reports.iter().any(|r| r.result.error_count > 0) {
        2
    } else if reports.iter().any(|r| r.result.warning_count > 0) {
        1
    } else {
        0
    }
}

/// Read SQL from the inline argument, a file or stdin
pub fn read_sql_input(sql: Option<String>, queries: Option<&Path>) -> AppResult<String> {
    if let Some(sql) = sql {
        return Ok(sql);
    }
    match queries {
        Some(path) if path == Path::new("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| file_read_error("stdin", e))?;
            Ok(buffer)
        }
        Some(path) => {
            read_to_string(path).map_err(|e| file_read_error(&path.display().to_string(), e))
        }
        None => Err(config_error("SQL input required (use --sql or --queries)"))
    }
}

/// Load a catalog from a schema DDL file
pub fn load_catalog(path: &Path) -> AppResult<StaticCatalog> {
    let ddl =
        read_to_string(path).map_err(|e| file_read_error(&path.display().to_string(), e))?;
    StaticCatalog::from_ddl(&ddl)
}

/// Resolve output format from CLI and config, CLI taking precedence
pub fn get_effective_format(format: Format, config_format: Option<&str>) -> Format {
    if !matches!(format, Format::Text) {
        return format;
    }
    match config_format.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => Format::Json,
        Some("yaml") => Format::Yaml,
        _ => Format::Text
    }
}

/// Resolve color preference from the flag and config
pub fn get_effective_color(no_color: bool, config_color: Option<bool>) -> bool {
    !no_color && config_color.unwrap_or(true)
}

/// Create output options from parameters
pub fn create_output_options(format: Format, colored: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored,
        verbose
    }
}

/// Run the validate command
pub fn run_validate(params: ValidateParams, config: Config) -> AppResult<ValidateOutcome> {
    let sql = read_sql_input(params.sql, params.queries_path.as_deref())?;
    let catalog: Option<Arc<dyn Catalog>> = match (&params.schema_path, params.check_existence) {
        (Some(path), true) => Some(Arc::new(load_catalog(path)?)),
        _ => None
    };
    let options = ValidateOptions {
        check_existence: params.check_existence,
        catalog
    };
    let format = get_effective_format(params.output_format, config.output.format.as_deref());
    let colored = get_effective_color(params.no_color, config.output.color);
    let output_opts = create_output_options(format, colored, params.verbose);
    let validator = Validator::with_config(config.rules);
    let statements = split_statements(&sql);
    let reports: Vec<StatementReport> = if statements.is_empty() {
        vec![build_report(&sql, &validator, &options)]
    } else {
        statements
            .iter()
            .map(|statement| build_report(statement, &validator, &options))
            .collect()
    };
    let exit_code = calculate_exit_code(&reports);
    let report = format_reports(&reports, &output_opts);
    Ok(ValidateOutcome {
        exit_code,
        report
    })
}

fn build_report(
    statement: &str,
    validator: &Validator,
    options: &ValidateOptions
) -> StatementReport {
    StatementReport {
        statement: statement.to_string(),
        kind:      scan(statement).statement_kind(),
        result:    validator.validate_with(statement, options)
    }
}
