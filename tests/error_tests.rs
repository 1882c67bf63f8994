// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_validator::error::{catalog_error, config_error, file_read_error, schema_ddl_error};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/queries.sql", io_error);
    let msg = error.to_string();
    assert!(msg.contains("/path/to/queries.sql"));
}

#[test]
fn test_file_read_error_stdin() {
    let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let error = file_read_error("stdin", io_error);
    let _msg = error.to_string();
}

#[test]
fn test_schema_ddl_error() {
    let error = schema_ddl_error("no CREATE TABLE statements found");
    let msg = error.to_string();
    assert!(msg.contains("no CREATE TABLE statements found"));
}

#[test]
fn test_catalog_error() {
    let error = catalog_error("connection refused");
    let msg = error.to_string();
    assert!(msg.contains("connection refused"));
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid configuration value");
    let _msg = error.to_string();
}

#[test]
fn test_error_types_render_messages() {
    let ddl_err = schema_ddl_error("test");
    let catalog_err = catalog_error("test");
    let config_err = config_error("test");
    assert!(!ddl_err.to_string().is_empty());
    assert!(!catalog_err.to_string().is_empty());
    assert!(!config_err.to_string().is_empty());
}
