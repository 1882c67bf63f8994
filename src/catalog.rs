//! Schema metadata access for existence checking.
//!
//! The [`Catalog`] trait is the seam between validation and whatever holds
//! the real schema: a live database, an information-schema dump, or the
//! bundled [`StaticCatalog`] built from `CREATE TABLE` scripts. Lookup
//! errors mean the backend failed, not that the object is missing.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    error::{AppResult, schema_ddl_error},
    scanner::{self, ScanContext, StatementKind, TokenKind}
};

/// Read-only schema metadata accessor.
///
/// Names are matched case-insensitively by implementations. `Err` signals an
/// infrastructure failure and makes the caller skip existence checking for
/// the rest of the statement.
pub trait Catalog: Send + Sync {
    /// Whether the named table exists.
    fn table_exists(&self, table: &str) -> AppResult<bool>;

    /// Whether the named column exists on the named table.
    fn column_exists(&self, table: &str, column: &str) -> AppResult<bool>;
}

/// In-memory catalog assembled by hand or parsed from DDL.
///
/// # Example
///
/// ```
/// use sql_validator::catalog::{Catalog, StaticCatalog};
///
/// let catalog = StaticCatalog::from_ddl(
///     "CREATE TABLE users (id INT, email TEXT);"
/// ).unwrap();
///
/// assert!(catalog.table_exists("USERS").unwrap());
/// assert!(catalog.column_exists("users", "email").unwrap());
/// assert!(!catalog.table_exists("orders").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: BTreeMap<String, BTreeSet<String>>
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table and its columns, replacing any previous entry.
    pub fn add_table(&mut self, table: &str, columns: &[&str]) {
        self.tables.insert(
            table.to_lowercase(),
            columns.iter().map(|c| c.to_lowercase()).collect()
        );
    }

    /// Build a catalog from a script of `CREATE TABLE` statements.
    ///
    /// Other statement kinds in the script are ignored. A script yielding no
    /// tables at all is rejected, that is almost always the wrong file.
    pub fn from_ddl(ddl: &str) -> AppResult<Self> {
        let mut catalog = Self::new();
        for statement in scanner::split_statements(ddl) {
            let ctx = scanner::scan(statement);
            if let Some((table, columns)) = created_table(&ctx) {
                let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
                catalog.add_table(&table, &columns);
            }
        }
        if catalog.tables.is_empty() {
            return Err(schema_ddl_error("no CREATE TABLE statements found"));
        }
        Ok(catalog)
    }

    /// Registered table names, lowercased and sorted.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }
}

impl Catalog for StaticCatalog {
    fn table_exists(&self, table: &str) -> AppResult<bool> {
        Ok(self.tables.contains_key(&table.to_lowercase()))
    }

    fn column_exists(&self, table: &str, column: &str) -> AppResult<bool> {
        Ok(self
            .tables
            .get(&table.to_lowercase())
            .is_some_and(|columns| columns.contains(&column.to_lowercase())))
    }
}

/// Extract the table name and column names from a `CREATE TABLE` statement.
///
/// Schema qualifiers are dropped, only the final name segment is registered.
/// Constraint segments in the column list start with a keyword and are
/// skipped.
fn created_table(ctx: &ScanContext) -> Option<(String, Vec<String>)> {
    if ctx.statement_kind() != StatementKind::Create {
        return None;
    }
    let tokens = &ctx.tokens;
    let table_pos = tokens.iter().position(|t| t.is_keyword("TABLE"))?;
    let mut i = table_pos + 1;
    let looks_like_if = tokens.get(i).is_some_and(|t| {
        t.kind == TokenKind::Identifier && t.text.eq_ignore_ascii_case("IF")
    });
    if looks_like_if
        && tokens.get(i + 1).is_some_and(|t| t.is_keyword("NOT"))
        && tokens.get(i + 2).is_some_and(|t| t.is_keyword("EXISTS"))
    {
        i += 3;
    }
    let mut table = None;
    while let Some(t) = tokens.get(i) {
        if !t.is_name() {
            break;
        }
        table = Some(t.text.to_lowercase().to_string());
        i += 1;
        if tokens.get(i).is_some_and(|t| t.is_punct('.')) {
            i += 1;
        } else {
            break;
        }
    }
    let table = table?;
    let mut columns = Vec::new();
    if tokens.get(i).is_some_and(|t| t.is_punct('(')) {
        let mut depth = 1usize;
        let mut expect_name = true;
        i += 1;
        while let Some(t) = tokens.get(i) {
            if t.is_punct('(') {
                depth += 1;
            } else if t.is_punct(')') {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            } else if depth == 1 && t.is_punct(',') {
                expect_name = true;
            } else if expect_name && depth == 1 {
                if t.is_name() {
                    columns.push(t.text.to_lowercase().to_string());
                }
                expect_name = false;
            }
            i += 1;
        }
    }
    Some((table, columns))
}
