//! Catalog-backed existence checking.
//!
//! Runs only when the caller supplies a [`Catalog`]. Table references are
//! collected from `FROM`, `JOIN`, `INTO`, `UPDATE` and `CREATE TABLE`
//! clauses, column references from select lists and `WHERE`/`ON`/
//! `ORDER BY`/`GROUP BY` clauses. Resolution is conservative: an unqualified
//! column in a multi-table statement is skipped rather than guessed.
//!
//! A catalog lookup failure downgrades the whole step to a single Info
//! finding. Remaining lookups are skipped because they would hit the same
//! broken backend.

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

use crate::{
    catalog::Catalog,
    error::AppError,
    rules::{Category, Finding, Severity},
    scanner::{self, ScanContext, StatementKind, Token, TokenKind}
};

/// Type alias for dotted-path token runs (typically < 4 segments)
type SegmentVec<'a> = SmallVec<[&'a Token; 4]>;

/// Verify that tables and columns referenced by the statement exist.
///
/// Findings keep reference order: unknown tables first, then unknown
/// columns. Tables reported as missing do not get their columns checked.
pub fn check(ctx: &ScanContext, catalog: &dyn Catalog) -> Vec<Finding> {
    let refs = collect_references(ctx);
    let mut findings = Vec::new();
    let mut existing: SmallVec<[String; 4]> = SmallVec::new();
    for (table, &offset) in &refs.tables {
        match catalog.table_exists(table) {
            Ok(true) => existing.push(table.clone()),
            Ok(false) => findings.push(table_missing(table, offset)),
            Err(error) => {
                log::warn!("catalog lookup failed, skipping existence checks: {error}");
                findings.push(lookup_failed(&error));
                return findings;
            }
        }
    }
    for (key, &offset) in &refs.columns {
        let (qualifier, column) = key;
        let table = match qualifier {
            Some(q) => {
                let base = refs
                    .aliases
                    .get(q)
                    .cloned()
                    .or_else(|| refs.tables.contains_key(q).then(|| q.clone()));
                match base {
                    Some(base) => base,
                    None => continue
                }
            }
            None => match existing.len() {
                1 => existing[0].clone(),
                _ => continue
            }
        };
        if !existing.contains(&table) {
            continue;
        }
        match catalog.column_exists(&table, column) {
            Ok(true) => {}
            Ok(false) => findings.push(column_missing(column, &table, offset)),
            Err(error) => {
                log::warn!("catalog lookup failed, skipping existence checks: {error}");
                findings.push(lookup_failed(&error));
                return findings;
            }
        }
    }
    findings
}

fn table_missing(table: &str, offset: usize) -> Finding {
    Finding {
        detector_id:   "EXIST001",
        detector_name: "Unknown table",
        message:       format!("Table '{table}' does not exist"),
        severity:      Severity::Error,
        category:      Category::Existence,
        suggestion:    Some("Verify table name or create the table first".to_string()),
        location:      Some(offset)
    }
}

fn column_missing(column: &str, table: &str, offset: usize) -> Finding {
    Finding {
        detector_id:   "EXIST002",
        detector_name: "Unknown column",
        message:       format!("Column '{column}' does not exist in table '{table}'"),
        severity:      Severity::Error,
        category:      Category::Existence,
        suggestion:    Some("Verify column name against the table definition".to_string()),
        location:      Some(offset)
    }
}

fn lookup_failed(error: &AppError) -> Finding {
    Finding {
        detector_id:   "EXIST003",
        detector_name: "Existence check skipped",
        message:       format!("Could not verify table existence: {error}"),
        severity:      Severity::Info,
        category:      Category::Existence,
        suggestion:    Some("Ensure database connection is working".to_string()),
        location:      None
    }
}

/// References extracted from one statement, in first-seen order.
#[derive(Default)]
struct References {
    /// Table name (lowercased, last path segment) to first offset
    tables:  IndexMap<String, usize>,
    /// Alias to the table it stands for; an alias shadows a real table name
    aliases: IndexMap<String, String>,
    /// (qualifier, column) to first offset
    columns: IndexMap<(Option<String>, String), usize>
}

fn collect_references(ctx: &ScanContext) -> References {
    let mut refs = References::default();
    collect_tables(ctx, &mut refs);
    collect_columns(ctx, &mut refs);
    refs
}

fn collect_tables(ctx: &ScanContext, refs: &mut References) {
    let tokens = &ctx.tokens;
    let kind = ctx.statement_kind();
    let mut i = 0;
    while i < tokens.len() {
        let t = &tokens[i];
        if t.is_keyword("TABLE") && kind == StatementKind::Create {
            let next = skip_if_not_exists(tokens, i + 1);
            if let Some((name, offset, after)) = parse_table_path(tokens, next) {
                refs.tables.entry(name).or_insert(offset);
                i = after;
                continue;
            }
        }
        let starts_list = t.is_keyword("FROM")
            || t.is_keyword("JOIN")
            || t.is_keyword("INTO")
            || (t.is_keyword("UPDATE") && i == 0);
        if starts_list {
            i = collect_table_list(tokens, i + 1, t.is_keyword("FROM"), refs);
            continue;
        }
        i += 1;
    }
}

/// Collect `table [AS] alias` entries starting at `start`.
///
/// A `(` in table position is a derived table; collection stops and the
/// main walk picks up the inner statement's own clauses.
fn collect_table_list(
    tokens: &[Token],
    start: usize,
    comma_list: bool,
    refs: &mut References
) -> usize {
    let mut i = start;
    loop {
        let Some((name, offset, mut after)) = parse_table_path(tokens, i) else {
            return i;
        };
        refs.tables.entry(name.clone()).or_insert(offset);
        if tokens.get(after).is_some_and(|t| t.is_keyword("AS")) {
            after += 1;
        }
        if let Some(t) = tokens.get(after)
            && t.is_name()
        {
            refs.aliases.entry(t.text.to_lowercase().to_string()).or_insert(name);
            after += 1;
        }
        if comma_list && tokens.get(after).is_some_and(|t| t.is_punct(',')) {
            i = after + 1;
            continue;
        }
        return after;
    }
}

/// Clause regions in which identifiers count as column references.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Region {
    None,
    SelectList,
    Predicate,
    ByList
}

fn collect_columns(ctx: &ScanContext, refs: &mut References) {
    let tokens = &ctx.tokens;
    let mut region = Region::None;
    let mut select_aliases: IndexSet<String> = IndexSet::new();
    let mut i = 0;
    while i < tokens.len() {
        let t = &tokens[i];
        if t.kind == TokenKind::Keyword {
            match t.text.to_ascii_uppercase().as_str() {
                "SELECT" => region = Region::SelectList,
                "WHERE" | "ON" => region = Region::Predicate,
                "BY" => region = Region::ByList,
                "FROM" | "JOIN" | "INTO" | "UPDATE" | "SET" | "HAVING" | "LIMIT" | "OFFSET"
                | "VALUES" | "USING" | "GROUP" | "ORDER" => region = Region::None,
                _ => {}
            }
            i += 1;
            continue;
        }
        if region == Region::None || !t.is_name() || (i > 0 && tokens[i - 1].is_punct('.')) {
            i += 1;
            continue;
        }
        let prev = (i > 0).then(|| &tokens[i - 1]);
        // Output aliases are introduced names, not references. `ORDER BY`
        // may legally use them, so remember the ones seen in select lists.
        if prev.is_some_and(|p| p.is_keyword("AS")) {
            if region == Region::SelectList {
                select_aliases.insert(t.text.to_lowercase().to_string());
            }
            i += 1;
            continue;
        }
        if region == Region::SelectList && prev.is_some_and(is_expression_end) {
            select_aliases.insert(t.text.to_lowercase().to_string());
            i += 1;
            continue;
        }
        let Some((qualifier, column, offset, after)) = parse_column_path(tokens, i) else {
            i += 1;
            continue;
        };
        // Function name, qualified star, or niladic function
        if tokens.get(after).is_some_and(|t| t.is_punct('(')) {
            i = after;
            continue;
        }
        if tokens
            .get(after)
            .is_some_and(|t| t.kind == TokenKind::Operator && t.text == "*")
        {
            i = after + 1;
            continue;
        }
        if qualifier.is_none() && scanner::is_niladic_function(&column) {
            i = after;
            continue;
        }
        if region == Region::ByList && qualifier.is_none() && select_aliases.contains(&column) {
            i = after;
            continue;
        }
        refs.columns.entry((qualifier, column)).or_insert(offset);
        i = after;
    }
}

/// A bare identifier right after one of these tokens is an output alias.
fn is_expression_end(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Identifier | TokenKind::StringLiteral | TokenKind::NumberLiteral
    ) || token.is_punct(')')
}

/// Parse `name (. name)*`, returning the last segment lowercased, its
/// offset, and the index after the path.
fn parse_table_path(tokens: &[Token], mut i: usize) -> Option<(String, usize, usize)> {
    let mut last: Option<&Token> = None;
    while let Some(t) = tokens.get(i) {
        if !t.is_name() {
            break;
        }
        last = Some(t);
        i += 1;
        if tokens.get(i).is_some_and(|t| t.is_punct('.')) {
            i += 1;
        } else {
            break;
        }
    }
    last.map(|t| (t.text.to_lowercase().to_string(), t.offset, i))
}

/// Parse a column path, splitting it into qualifier and column name.
///
/// For `schema.table.column` the qualifier is the segment right before the
/// column.
fn parse_column_path(
    tokens: &[Token],
    mut i: usize
) -> Option<(Option<String>, String, usize, usize)> {
    let mut segments: SegmentVec<'_> = SmallVec::new();
    while let Some(t) = tokens.get(i) {
        if !t.is_name() {
            break;
        }
        segments.push(t);
        i += 1;
        if tokens.get(i).is_some_and(|t| t.is_punct('.')) {
            i += 1;
        } else {
            break;
        }
    }
    let column = segments.last()?;
    let qualifier = (segments.len() > 1).then(|| {
        segments[segments.len() - 2].text.to_lowercase().to_string()
    });
    Some((qualifier, column.text.to_lowercase().to_string(), column.offset, i))
}

fn skip_if_not_exists(tokens: &[Token], i: usize) -> usize {
    let looks_like_if = tokens.get(i).is_some_and(|t| {
        t.kind == TokenKind::Identifier && t.text.eq_ignore_ascii_case("IF")
    });
    if looks_like_if
        && tokens.get(i + 1).is_some_and(|t| t.is_keyword("NOT"))
        && tokens.get(i + 2).is_some_and(|t| t.is_keyword("EXISTS"))
    {
        i + 3
    } else {
        i
    }
}
