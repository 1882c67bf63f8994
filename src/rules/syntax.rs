use super::{Category, Detector, DetectorInfo, Finding, Severity};
use crate::scanner::{ScanContext, StatementKind, TokenKind, is_niladic_function};

/// Unmatched opening or closing parentheses
pub struct UnbalancedParentheses;

impl Detector for UnbalancedParentheses {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "SYN002",
            name:     "Unbalanced parentheses",
            severity: Severity::Error,
            category: Category::Syntax
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        if ctx.unmatched_open_parens == 0 && ctx.unmatched_close_parens == 0 {
            return vec![];
        }
        let info = self.info();
        vec![Finding {
            detector_id: info.id,
            detector_name: info.name,
            message: format!(
                "Unbalanced parentheses: {} unmatched '(', {} unmatched ')'",
                ctx.unmatched_open_parens, ctx.unmatched_close_parens
            ),
            severity: info.severity,
            category: info.category,
            suggestion: Some(
                "Ensure all opening parentheses have matching closing parentheses".to_string()
            ),
            location: None
        }]
    }
}

/// String literal left open at end of input
pub struct UnbalancedQuotes;

impl Detector for UnbalancedQuotes {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "SYN003",
            name:     "Unbalanced quotes",
            severity: Severity::Error,
            category: Category::Syntax
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        if ctx.unterminated_quotes == 0 {
            return vec![];
        }
        // The unterminated literal consumes the rest of the input, so it is
        // always the final token.
        let location = ctx
            .tokens
            .last()
            .filter(|t| t.kind == TokenKind::StringLiteral)
            .map(|t| t.offset);
        let info = self.info();
        vec![Finding {
            detector_id: info.id,
            detector_name: info.name,
            message: "Unbalanced single quotes".to_string(),
            severity: info.severity,
            category: info.category,
            suggestion: Some("Ensure all single quotes are properly closed".to_string()),
            location
        }]
    }
}

/// Statement without a terminating semicolon
pub struct MissingSemicolon;

impl Detector for MissingSemicolon {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "SYN004",
            name:     "Missing semicolon",
            severity: Severity::Info,
            category: Category::Syntax
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        if ctx.tokens.is_empty() || ctx.has_trailing_semicolon {
            return vec![];
        }
        let info = self.info();
        vec![Finding {
            detector_id:   info.id,
            detector_name: info.name,
            message:       "Missing semicolon at end of statement".to_string(),
            severity:      info.severity,
            category:      info.category,
            suggestion:    Some("Add semicolon for better SQL standards compliance".to_string()),
            location:      None
        }]
    }
}

/// SELECT projecting column names with no FROM clause
///
/// Bare-expression queries such as `SELECT 1` or `SELECT NOW()` are valid
/// without FROM, so the detector only fires when the select list contains a
/// plain column-like identifier.
pub struct SelectWithoutFrom;

impl Detector for SelectWithoutFrom {
    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            id:       "SYN005",
            name:     "SELECT without FROM",
            severity: Severity::Warning,
            category: Category::Syntax
        }
    }

    fn check(&self, ctx: &ScanContext, _text: &str) -> Vec<Finding> {
        if ctx.statement_kind() != StatementKind::Select || ctx.has_keyword("FROM") {
            return vec![];
        }
        let Some(select_pos) = ctx.keyword_position("SELECT") else {
            return vec![];
        };
        let tokens = &ctx.tokens;
        for (i, token) in tokens.iter().enumerate().skip(select_pos + 1) {
            if !token.is_name() {
                continue;
            }
            if is_niladic_function(&token.text) {
                continue;
            }
            // Identifier followed by '(' is a function call, not a column
            if tokens.get(i + 1).is_some_and(|t| t.is_punct('(')) {
                continue;
            }
            // Identifier after AS is an output alias
            if i > 0 && tokens[i - 1].is_keyword("AS") {
                continue;
            }
            let info = self.info();
            return vec![Finding {
                detector_id: info.id,
                detector_name: info.name,
                message: "SELECT without FROM clause".to_string(),
                severity: info.severity,
                category: info.category,
                suggestion: Some(
                    "Check if SELECT statement is properly formed".to_string()
                ),
                location: Some(token.offset)
            }];
        }
        vec![]
    }
}
