// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use clap::Parser;
use sql_validator::cli::{Cli, Commands, Format};

#[test]
fn test_format_variants() {
    let _text = Format::Text;
    let _json = Format::Json;
    let _yaml = Format::Yaml;
}

#[test]
fn test_format_clone() {
    let format = Format::Json;
    let _cloned = format.clone();
}

#[test]
fn test_format_debug() {
    let format = Format::Yaml;
    let debug = format!("{:?}", format);
    assert!(debug.contains("Yaml"));
}

#[test]
fn test_parse_validate_inline_sql() {
    let cli = Cli::try_parse_from(["sql-validator", "validate", "--sql", "SELECT 1"]).unwrap();
    let Commands::Validate {
        sql,
        queries,
        check_existence,
        ..
    } = cli.command;
    assert_eq!(sql.as_deref(), Some("SELECT 1"));
    assert!(queries.is_none());
    assert!(!check_existence);
}

#[test]
fn test_parse_validate_all_flags() {
    let cli = Cli::try_parse_from([
        "sql-validator",
        "validate",
        "-q",
        "queries.sql",
        "-s",
        "schema.sql",
        "--check-existence",
        "-f",
        "json",
        "--verbose",
        "--no-color"
    ])
    .unwrap();
    let Commands::Validate {
        queries,
        schema,
        check_existence,
        output_format,
        verbose,
        no_color,
        ..
    } = cli.command;
    assert_eq!(queries.unwrap().to_str(), Some("queries.sql"));
    assert_eq!(schema.unwrap().to_str(), Some("schema.sql"));
    assert!(check_existence);
    assert!(matches!(output_format, Format::Json));
    assert!(verbose);
    assert!(no_color);
}

#[test]
fn test_sql_conflicts_with_queries() {
    let result = Cli::try_parse_from([
        "sql-validator",
        "validate",
        "--sql",
        "SELECT 1",
        "-q",
        "queries.sql"
    ]);
    assert!(result.is_err());
}
