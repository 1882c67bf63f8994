//! Performance anti-pattern detectors.
//!
//! These checks walk the token stream rather than the raw text, so idioms
//! inside string literals or comments never trigger them. Each detector
//! reports the first occurrence of its pattern.

use super::{Category, Detector, DetectorInfo, Finding, Severity};
use crate::scanner::{ScanContext, StatementKind, Token, TokenKind};

/// Operators that compare a column against a value.
static COMPARISON_OPERATORS: &[&str] = &["=", "<", ">", "<=", ">=", "<>", "!="];

fn is_comparison(token: &Token) -> bool {
    token.kind == TokenKind::Operator && COMPARISON_OPERATORS.contains(&token.text.as_str())
}

/// `SELECT *` instead of an explicit column list
pub struct SelectStar;

impl Detector for SelectStar {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "PERF001",
            name:     "Select star",
            severity: Severity::Warning,
            category: Category::Performance
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        let mut saw_select = false;
        let star = ctx.tokens.windows(2).find(|pair| {
            if pair[0].is_keyword("SELECT") {
                saw_select = true;
            }
            // After `(` the star is an argument as in COUNT(*), and after a
            // value token it is arithmetic. Only these predecessors leave it
            // in projection position.
            saw_select
                && pair[1].kind == TokenKind::Operator
                && pair[1].text == "*"
                && (pair[0].is_keyword("SELECT")
                    || pair[0].is_keyword("DISTINCT")
                    || pair[0].is_keyword("ALL")
                    || pair[0].is_punct(',')
                    || pair[0].is_punct('.'))
        });
        let Some(pair) = star else {
            return vec![];
        };
        let info = self.info();
        vec![Finding {
            detector_id:   info.id,
            detector_name: info.name,
            message:       "SELECT * can be inefficient".to_string(),
            severity:      info.severity,
            category:      info.category,
            suggestion:    Some("Specify explicit columns instead of *".to_string()),
            location:      Some(pair[1].offset)
        }]
    }
}

/// `LIKE` pattern starting with `%`
pub struct LeadingWildcardLike;

impl Detector for LeadingWildcardLike {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "PERF002",
            name:     "Leading wildcard LIKE",
            severity: Severity::Warning,
            category: Category::Performance
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        let wildcard = ctx.tokens.windows(2).find(|pair| {
            pair[0].is_keyword("LIKE")
                && pair[1].kind == TokenKind::StringLiteral
                && pair[1].text.starts_with("'%")
        });
        let Some(pair) = wildcard else {
            return vec![];
        };
        let info = self.info();
        vec![Finding {
            detector_id:   info.id,
            detector_name: info.name,
            message:       "Leading wildcard in LIKE prevents index use".to_string(),
            severity:      info.severity,
            category:      info.category,
            suggestion:    Some("Anchor the pattern or use full-text search".to_string()),
            location:      Some(pair[1].offset)
        }]
    }
}

/// Scalar function wrapped around a column inside a filter clause
pub struct FunctionOnColumn;

impl Detector for FunctionOnColumn {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "PERF003",
            name:     "Function on column",
            severity: Severity::Warning,
            category: Category::Performance
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        let where_pos = ctx.keyword_position("WHERE");
        let on_pos = ctx.keyword_position("ON");
        let start = match (where_pos, on_pos) {
            (Some(w), Some(o)) => w.min(o),
            (Some(w), None) => w,
            (None, Some(o)) => o,
            (None, None) => return vec![]
        };
        for i in start + 1..ctx.tokens.len() {
            let Some(close) = match_call_on_column(&ctx.tokens[i..]) else {
                continue;
            };
            if !ctx.tokens.get(i + close + 1).is_some_and(is_comparison) {
                continue;
            }
            let clause = if on_pos.is_some_and(|o| o < i && where_pos.is_none_or(|w| o > w)) {
                "ON"
            } else {
                "WHERE"
            };
            let info = self.info();
            return vec![Finding {
                detector_id: info.id,
                detector_name: info.name,
                message: format!("Function on column in {clause} prevents index use"),
                severity: info.severity,
                category: info.category,
                suggestion: Some(
                    "Rewrite the condition so the column is not wrapped in a function".to_string()
                ),
                location: Some(ctx.tokens[i].offset)
            }];
        }
        vec![]
    }
}

/// Match `name ( column )` or `name ( qualifier . column )` at the start of
/// the slice, returning the index of the closing parenthesis.
///
/// Only a bare column path counts. Literal or nested-call arguments mean the
/// function is not applied directly to a column.
fn match_call_on_column(tokens: &[Token]) -> Option<usize> {
    if !tokens.first()?.is_name() || !tokens.get(1)?.is_punct('(') {
        return None;
    }
    let mut i = 2;
    if !tokens.get(i)?.is_name() {
        return None;
    }
    i += 1;
    while tokens.get(i)?.is_punct('.') {
        if !tokens.get(i + 1)?.is_name() {
            return None;
        }
        i += 2;
    }
    tokens.get(i)?.is_punct(')').then_some(i)
}

/// `ORDER BY` referencing a column by ordinal position
pub struct OrdinalOrderBy;

impl Detector for OrdinalOrderBy {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "PERF004",
            name:     "Ordinal ORDER BY",
            severity: Severity::Warning,
            category: Category::Performance
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        let ordinal = ctx.tokens.windows(3).find(|triple| {
            triple[0].is_keyword("ORDER")
                && triple[1].is_keyword("BY")
                && triple[2].kind == TokenKind::NumberLiteral
        });
        let Some(triple) = ordinal else {
            return vec![];
        };
        let info = self.info();
        vec![Finding {
            detector_id:   info.id,
            detector_name: info.name,
            message:       "ORDER BY ordinal position is fragile".to_string(),
            severity:      info.severity,
            category:      info.category,
            suggestion:    Some("Use explicit column names in ORDER BY".to_string()),
            location:      Some(triple[2].offset)
        }]
    }
}

/// `SELECT ... FROM` with no `LIMIT` clause
pub struct MissingLimit;

impl Detector for MissingLimit {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "PERF005",
            name:     "Missing LIMIT",
            severity: Severity::Info,
            category: Category::Performance
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        if ctx.statement_kind() != StatementKind::Select
            || !ctx.has_keyword("FROM")
            || ctx.has_keyword("LIMIT")
        {
            return vec![];
        }
        let info = self.info();
        vec![Finding {
            detector_id:   info.id,
            detector_name: info.name,
            message:       "No LIMIT clause on SELECT statement".to_string(),
            severity:      info.severity,
            category:      info.category,
            suggestion:    Some("Consider adding LIMIT to prevent large result sets".to_string()),
            location:      None
        }]
    }
}

/// `DELETE` or `UPDATE` touching every row
pub struct MissingWhere;

impl Detector for MissingWhere {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "PERF006",
            name:     "Missing WHERE",
            severity: Severity::Warning,
            category: Category::Performance
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        let kind = ctx.statement_kind();
        if !matches!(kind, StatementKind::Delete | StatementKind::Update)
            || ctx.has_keyword("WHERE")
        {
            return vec![];
        }
        let info = self.info();
        vec![Finding {
            detector_id: info.id,
            detector_name: info.name,
            message: format!("{kind} without WHERE clause"),
            severity: info.severity,
            category: info.category,
            suggestion: Some(
                "Ensure WHERE clause is present to avoid full table operations".to_string()
            ),
            location: None
        }]
    }
}
