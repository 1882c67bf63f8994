//! # SQL Validator
//!
//! Heuristic validation and linting for SQL statements.
//!
//! `sql-validator` flags likely mistakes in SQL text without a full parser.
//! A single-pass scanner tokenizes each statement, then detector families
//! check the token stream for syntax slips, injection idioms, performance
//! traps, and naming drift. With a schema file it also verifies that
//! referenced tables and columns exist.
//!
//! # Architecture
//!
//! Validation runs in two phases:
//!
//! 1. **Pattern checks** (always run) - The pattern library executes 13
//!    built-in detectors grouped into four families, run in parallel using
//!    [`rayon`]. Families are Syntax, Security, Performance and Naming.
//!
//! 2. **Existence checks** (optional) - When a catalog is provided, table and
//!    column references are resolved against it and unknown names reported.
//!
//! # Quick Start
//!
//! ```bash
//! # Validate a file of statements
//! sql-validator validate -q queries.sql
//!
//! # Validate inline SQL
//! sql-validator validate --sql "SELECT * FROM users"
//!
//! # Stream statements from stdin
//! echo "SELECT * FROM users" | sql-validator validate -q -
//!
//! # Verify tables and columns against a schema
//! sql-validator validate -q queries.sql -s schema.sql --check-existence
//!
//! # CI/CD integration with JSON output
//! sql-validator validate -q queries.sql -f json > results.json
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`SQL_VALIDATOR_FORMAT`, `NO_COLOR`)
//! 3. `.sql-validator.toml` in current directory
//! 4. `~/.config/sql-validator/config.toml`
//!
//! ## Example Configuration
//!
//! ```toml
//! [rules]
//! # Disable specific detectors by ID
//! disabled = ["PERF005", "NAME001"]
//!
//! [output]
//! format = "text"
//! color = true
//! ```
//!
//! # Detectors
//!
//! ## Syntax Detectors (SYN001-SYN005)
//!
//! | ID | Name | Description |
//! |----|------|-------------|
//! | SYN001 | Empty statement | Statement contains no SQL text |
//! | SYN002 | Unbalanced parentheses | Open and close parenthesis counts differ |
//! | SYN003 | Unbalanced quotes | A string literal is never terminated |
//! | SYN004 | Missing semicolon | Statement lacks a terminating semicolon |
//! | SYN005 | SELECT without FROM | Projection references no table |
//!
//! ## Security Detectors (SEC001-SEC002)
//!
//! | ID | Name | Description |
//! |----|------|-------------|
//! | SEC001 | Injection signature | Classic injection idiom in the statement text |
//! | SEC002 | Hardcoded password | Password assignment embedded in a literal |
//!
//! ## Performance Detectors (PERF001-PERF006)
//!
//! | ID | Name | Description |
//! |----|------|-------------|
//! | PERF001 | Select star | `SELECT *` fetches more columns than needed |
//! | PERF002 | Leading wildcard LIKE | `LIKE '%value'` prevents index usage |
//! | PERF003 | Function on column | Function calls on filter columns prevent index usage |
//! | PERF004 | Ordinal ORDER BY | `ORDER BY 2` breaks when the column list changes |
//! | PERF005 | Missing LIMIT | Unbounded SELECT can return huge result sets |
//! | PERF006 | Missing WHERE | UPDATE or DELETE touches every row |
//!
//! ## Naming Detectors (NAME001)
//!
//! | ID | Name | Description |
//! |----|------|-------------|
//! | NAME001 | Snake case naming | Introduced identifiers should be snake_case |
//!
//! ## Existence Detectors (EXIST001-EXIST004)
//!
//! | ID | Name | Description |
//! |----|------|-------------|
//! | EXIST001 | Unknown table | Referenced table is not in the catalog |
//! | EXIST002 | Unknown column | Referenced column is not in the table |
//! | EXIST003 | Existence check skipped | Catalog lookup failed, remaining checks skipped |
//! | EXIST004 | Missing catalog | Existence checking requested without a catalog |
//!
//! # Exit Codes
//!
//! The process exit code reflects the highest severity finding:
//!
//! - `0` - Success, no issues or only informational messages
//! - `1` - Warnings found
//! - `2` - Errors found
//!
//! # Output Formats
//!
//! - `text` - Human-readable colored output (default)
//! - `json` - Structured JSON for programmatic processing
//! - `yaml` - YAML format for configuration management

use std::process;

use clap::Parser;
use sql_validator::{
    app::{ValidateParams, run_validate},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Validate {
            sql,
            queries,
            schema,
            check_existence,
            output_format,
            verbose,
            no_color
        } => {
            let outcome = run_validate(
                ValidateParams {
                    sql,
                    queries_path: queries,
                    schema_path: schema,
                    check_existence,
                    output_format,
                    verbose,
                    no_color
                },
                config
            )?;
            println!("{}", outcome.report);
            Ok(outcome.exit_code)
        }
    }
}
