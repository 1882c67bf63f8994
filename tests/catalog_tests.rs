// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_validator::catalog::{Catalog, StaticCatalog};

#[test]
fn test_from_ddl_single_table() {
    let catalog = StaticCatalog::from_ddl("CREATE TABLE users (id INT, name TEXT);").unwrap();
    assert!(catalog.table_exists("users").unwrap());
    assert!(!catalog.table_exists("orders").unwrap());
}

#[test]
fn test_from_ddl_column_lookup() {
    let catalog = StaticCatalog::from_ddl("CREATE TABLE users (id INT, name TEXT);").unwrap();
    assert!(catalog.column_exists("users", "name").unwrap());
    assert!(!catalog.column_exists("users", "salary").unwrap());
}

#[test]
fn test_from_ddl_multiple_tables() {
    let ddl = "CREATE TABLE users (id INT); CREATE TABLE orders (id INT, user_id INT);";
    let catalog = StaticCatalog::from_ddl(ddl).unwrap();
    assert!(catalog.table_exists("users").unwrap());
    assert!(catalog.table_exists("orders").unwrap());
}

#[test]
fn test_from_ddl_ignores_non_ddl_statements() {
    let ddl = "INSERT INTO seed VALUES (1); CREATE TABLE users (id INT);";
    let catalog = StaticCatalog::from_ddl(ddl).unwrap();
    assert!(catalog.table_exists("users").unwrap());
    assert!(!catalog.table_exists("seed").unwrap());
}

#[test]
fn test_from_ddl_without_create_table_fails() {
    assert!(StaticCatalog::from_ddl("SELECT 1;").is_err());
    assert!(StaticCatalog::from_ddl("").is_err());
}

#[test]
fn test_lookup_case_insensitive() {
    let catalog = StaticCatalog::from_ddl("CREATE TABLE Users (Id INT);").unwrap();
    assert!(catalog.table_exists("USERS").unwrap());
    assert!(catalog.column_exists("users", "ID").unwrap());
}

#[test]
fn test_if_not_exists_clause() {
    let ddl = "CREATE TABLE IF NOT EXISTS users (id INT);";
    let catalog = StaticCatalog::from_ddl(ddl).unwrap();
    assert!(catalog.table_exists("users").unwrap());
    assert!(!catalog.table_exists("if").unwrap());
}

#[test]
fn test_schema_qualified_name_uses_last_segment() {
    let catalog = StaticCatalog::from_ddl("CREATE TABLE public.users (id INT);").unwrap();
    assert!(catalog.table_exists("users").unwrap());
    assert!(!catalog.table_exists("public").unwrap());
}

#[test]
fn test_constraints_are_not_columns() {
    let ddl = "CREATE TABLE users (id INT, PRIMARY KEY (id), CONSTRAINT uq UNIQUE (id));";
    let catalog = StaticCatalog::from_ddl(ddl).unwrap();
    assert!(catalog.column_exists("users", "id").unwrap());
    assert!(!catalog.column_exists("users", "uq").unwrap());
}

#[test]
fn test_add_table_builder() {
    let mut catalog = StaticCatalog::new();
    catalog.add_table("metrics", &["id", "recorded_at", "value"]);
    assert!(catalog.table_exists("metrics").unwrap());
    assert!(catalog.column_exists("metrics", "recorded_at").unwrap());
}

#[test]
fn test_add_table_replaces_entry() {
    let mut catalog = StaticCatalog::new();
    catalog.add_table("metrics", &["id", "value"]);
    catalog.add_table("metrics", &["id"]);
    assert!(!catalog.column_exists("metrics", "value").unwrap());
    assert!(catalog.column_exists("metrics", "id").unwrap());
}

#[test]
fn test_table_names_sorted() {
    let mut catalog = StaticCatalog::new();
    catalog.add_table("orders", &["id"]);
    catalog.add_table("accounts", &["id"]);
    assert_eq!(catalog.table_names(), vec!["accounts", "orders"]);
}

#[test]
fn test_usable_as_trait_object() {
    let mut catalog = StaticCatalog::new();
    catalog.add_table("users", &["id"]);
    let dyn_catalog: &dyn Catalog = &catalog;
    assert!(dyn_catalog.table_exists("users").unwrap());
}
