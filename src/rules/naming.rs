//! Naming convention detector.
//!
//! Flags identifiers at the positions where a statement introduces them:
//! the `CREATE TABLE` name, column definitions inside it, and `ALTER TABLE
//! ... ADD COLUMN` names. References to existing objects are left alone, a
//! query cannot fix the casing of a table it only reads.

use std::sync::LazyLock;

use regex::Regex;

use super::{Category, Detector, DetectorInfo, Finding, Severity};
use crate::scanner::{ScanContext, StatementKind, Token, TokenKind};

static SNAKE_CASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid regex"));

/// Identifiers introduced by DDL should be snake_case
pub struct SnakeCaseNaming;

impl Detector for SnakeCaseNaming {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "NAME001",
            name:     "Snake case naming",
            severity: Severity::Info,
            category: Category::Naming
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        let info = self.info();
        introduced_identifiers(ctx)
            .into_iter()
            .filter(|(name, _)| !SNAKE_CASE_REGEX.is_match(name))
            .map(|(name, offset)| {
                let snake = to_snake_case(name);
                let suggestion = if snake != name && SNAKE_CASE_REGEX.is_match(&snake) {
                    format!("Consider renaming to '{snake}'")
                } else {
                    "Use snake_case identifiers".to_string()
                };
                Finding {
                    detector_id:   info.id,
                    detector_name: info.name,
                    message:       format!("Identifier '{name}' is not snake_case"),
                    severity:      info.severity,
                    category:      info.category,
                    suggestion:    Some(suggestion),
                    location:      Some(offset)
                }
            })
            .collect()
    }
}

/// Identifiers the statement introduces, with their byte offsets.
fn introduced_identifiers(ctx: &ScanContext) -> Vec<(&str, usize)> {
    match ctx.statement_kind() {
        StatementKind::Create => create_table_identifiers(&ctx.tokens),
        StatementKind::Alter => added_column_identifiers(&ctx.tokens),
        _ => vec![]
    }
}

fn create_table_identifiers(tokens: &[Token]) -> Vec<(&str, usize)> {
    let mut out = Vec::new();
    let Some(table_pos) = tokens.iter().position(|t| t.is_keyword("TABLE")) else {
        return out;
    };
    let mut i = skip_if_not_exists(tokens, table_pos + 1);
    // Schema-qualified names only introduce the final path segment.
    let mut table_name = None;
    while let Some(t) = tokens.get(i) {
        if !t.is_name() {
            break;
        }
        table_name = Some((t.text.as_str(), t.offset));
        i += 1;
        if tokens.get(i).is_some_and(|t| t.is_punct('.')) {
            i += 1;
        } else {
            break;
        }
    }
    out.extend(table_name);
    if !tokens.get(i).is_some_and(|t| t.is_punct('(')) {
        return out;
    }
    // Column definitions: the first token of each depth-1 segment names the
    // column. Constraint segments start with a keyword and fall through.
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
                out.push((t.text.as_str(), t.offset));
            }
            expect_name = false;
        }
        i += 1;
    }
    out
}

fn added_column_identifiers(tokens: &[Token]) -> Vec<(&str, usize)> {
    let mut out = Vec::new();
    for (pos, token) in tokens.iter().enumerate() {
        if !token.is_keyword("ADD") {
            continue;
        }
        let mut i = pos + 1;
        if tokens.get(i).is_some_and(|t| t.is_keyword("COLUMN")) {
            i += 1;
        }
        i = skip_if_not_exists(tokens, i);
        if let Some(t) = tokens.get(i)
            && t.is_name()
        {
            out.push((t.text.as_str(), t.offset));
        }
    }
    out
}

/// Skip an `IF NOT EXISTS` clause starting at `i`, if present.
///
/// `IF` is not a scanner keyword, it arrives as an identifier.
fn skip_if_not_exists(tokens: &[Token], i: usize) -> usize {
    let is_if = tokens.get(i).is_some_and(|t| {
        t.kind == TokenKind::Identifier && t.text.eq_ignore_ascii_case("IF")
    });
    if is_if
        && tokens.get(i + 1).is_some_and(|t| t.is_keyword("NOT"))
        && tokens.get(i + 2).is_some_and(|t| t.is_keyword("EXISTS"))
    {
        i + 3
    } else {
        i
    }
}

fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let after_lower =
                i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            let acronym_end = i > 0
                && chars[i - 1].is_ascii_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if after_lower || acronym_end {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
