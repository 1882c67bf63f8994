//! Single-pass SQL scanning and tokenization.
//!
//! This module produces the [`ScanContext`] consumed by every detector: a
//! coarse token stream plus balance counters for parentheses and string
//! literals. It is deliberately not a SQL parser. Unrecognized spans degrade
//! to opaque identifier tokens, and scanning never fails on malformed input.
//!
//! # Escape Rule
//!
//! Inside a single-quoted literal, `''` is an escaped quote and does not
//! terminate the literal, so `'it''s fine'` scans as one complete literal.
//!
//! # Example
//!
//! ```
//! use sql_validator::scanner::{StatementKind, scan};
//!
//! let ctx = scan("SELECT id FROM users WHERE (id = 1");
//!
//! assert_eq!(ctx.statement_kind(), StatementKind::Select);
//! assert_eq!(ctx.unmatched_open_parens, 1);
//! assert_eq!(ctx.unterminated_quotes, 0);
//! ```

use compact_str::CompactString;
use serde::Serialize;

/// SQL keywords recognized by the scanner.
///
/// Identifiers matching an entry (case-insensitive) are tokenized as
/// [`TokenKind::Keyword`]. Type names are intentionally absent so that
/// column definitions keep their names as plain identifiers.
static KEYWORDS: &[&str] = &[
    "ADD",
    "ALL",
    "ALTER",
    "AND",
    "AS",
    "ASC",
    "BETWEEN",
    "BY",
    "CASE",
    "CAST",
    "CHECK",
    "COLUMN",
    "CONSTRAINT",
    "CREATE",
    "CROSS",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DISTINCT",
    "DROP",
    "ELSE",
    "END",
    "EXISTS",
    "FOREIGN",
    "FROM",
    "FULL",
    "GRANT",
    "GROUP",
    "HAVING",
    "IN",
    "INDEX",
    "INNER",
    "INSERT",
    "INTERVAL",
    "INTO",
    "IS",
    "JOIN",
    "KEY",
    "LEFT",
    "LIKE",
    "LIMIT",
    "NOT",
    "NULL",
    "OFFSET",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "PRIMARY",
    "REFERENCES",
    "REVOKE",
    "RIGHT",
    "SELECT",
    "SET",
    "TABLE",
    "THEN",
    "TRUNCATE",
    "UNION",
    "UNIQUE",
    "UPDATE",
    "USING",
    "VALUES",
    "VIEW",
    "WHEN",
    "WHERE",
    "WITH",
];

/// Standard functions callable without parentheses.
///
/// These scan as identifiers but never name a column, so column-oriented
/// detectors must not treat them as references.
static NILADIC_FUNCTIONS: &[&str] = &[
    "CURRENT_CATALOG",
    "CURRENT_DATE",
    "CURRENT_ROLE",
    "CURRENT_SCHEMA",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "SESSION_USER",
    "SYSTEM_USER",
];

/// Two-character operators recognized as single tokens.
static TWO_CHAR_OPERATORS: &[&str] = &["<=", ">=", "<>", "!=", "||"];

/// Coarse classification of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// Recognized SQL keyword (SELECT, FROM, WHERE, ...)
    Keyword,
    /// Table, column, function, or other bare name; also carries opaque
    /// unrecognized spans so the stream covers the whole text
    Identifier,
    /// Single-quoted string literal, quotes included
    StringLiteral,
    /// Numeric literal
    NumberLiteral,
    /// Comparison, arithmetic, or concatenation operator
    Operator,
    /// Structural character: parentheses, comma, dot, semicolon
    Punctuation
}

/// One token of the scanned statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Token classification
    pub kind:   TokenKind,
    /// Raw token text as it appears in the source
    pub text:   CompactString,
    /// Byte offset of the token start in the source text
    pub offset: usize
}

impl Token {
    /// Whether this token is the given keyword (case-insensitive).
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Whether this token is the given punctuation character.
    pub fn is_punct(&self, punct: char) -> bool {
        self.kind == TokenKind::Punctuation && self.text.len() == 1 && self.text.starts_with(punct)
    }

    /// Whether this token is a name-shaped identifier.
    ///
    /// Opaque spans (placeholders such as `$1`, unrecognized characters) are
    /// scanned as identifiers but are not names a statement could introduce
    /// or reference.
    pub fn is_name(&self) -> bool {
        self.kind == TokenKind::Identifier
            && self.text.chars().next().is_some_and(is_identifier_start)
    }
}

/// Coarse statement classification from the leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Alter,
    Drop,
    Truncate,
    Other
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Create => write!(f, "CREATE"),
            Self::Alter => write!(f, "ALTER"),
            Self::Drop => write!(f, "DROP"),
            Self::Truncate => write!(f, "TRUNCATE"),
            Self::Other => write!(f, "OTHER")
        }
    }
}

/// Result of one scanning pass, shared read-only by all detectors.
#[derive(Debug, Clone, Default)]
pub struct ScanContext {
    /// Token stream in source order
    pub tokens:                 Vec<Token>,
    /// Count of `(` without a matching `)`
    pub unmatched_open_parens:  usize,
    /// Count of `)` without a preceding `(`
    pub unmatched_close_parens: usize,
    /// Count of string literals still open at end of input
    pub unterminated_quotes:    usize,
    /// Whether the statement ends with `;` after trailing whitespace
    pub has_trailing_semicolon: bool
}

impl ScanContext {
    /// Classify the statement by its first keyword.
    ///
    /// A leading `WITH` is treated as a SELECT since the prelude introduces
    /// common table expressions for a query body.
    pub fn statement_kind(&self) -> StatementKind {
        let Some(first) = self.tokens.iter().find(|t| t.kind == TokenKind::Keyword) else {
            return StatementKind::Other;
        };
        if first.offset != self.first_token_offset() {
            return StatementKind::Other;
        }
        match first.text.to_ascii_uppercase().as_str() {
            "SELECT" | "WITH" => StatementKind::Select,
            "INSERT" => StatementKind::Insert,
            "UPDATE" => StatementKind::Update,
            "DELETE" => StatementKind::Delete,
            "CREATE" => StatementKind::Create,
            "ALTER" => StatementKind::Alter,
            "DROP" => StatementKind::Drop,
            "TRUNCATE" => StatementKind::Truncate,
            _ => StatementKind::Other
        }
    }

    /// Whether any token is the given keyword (case-insensitive).
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keyword_position(keyword).is_some()
    }

    /// Index of the first token matching the given keyword.
    pub fn keyword_position(&self, keyword: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t.is_keyword(keyword))
    }

    /// Whether parentheses and quotes are all balanced.
    pub fn is_balanced(&self) -> bool {
        self.unmatched_open_parens == 0
            && self.unmatched_close_parens == 0
            && self.unterminated_quotes == 0
    }

    fn first_token_offset(&self) -> usize {
        self.tokens.first().map(|t| t.offset).unwrap_or(0)
    }
}

/// Scan SQL text in a single forward pass.
///
/// Tracks parenthesis depth outside string literals, applies the `''`
/// escape rule inside literals, records whether the trimmed text ends with
/// `;`, and emits the coarse token stream. Line comments (`--`) and block
/// comments (`/* */`) contribute no tokens and no balance counts.
///
/// Never panics and never rejects input. Text ending inside a literal
/// produces a nonzero [`ScanContext::unterminated_quotes`] count.
pub fn scan(text: &str) -> ScanContext {
    let mut ctx = ScanContext {
        has_trailing_semicolon: text.trim_end().ends_with(';'),
        ..ScanContext::default()
    };
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c == '\'' {
            scan_string_literal(text, start, &mut chars, &mut ctx);
            continue;
        }
        if c == '-' && matches!(chars.peek(), Some((_, '-'))) {
            for (_, d) in chars.by_ref() {
                if d == '\n' {
                    break;
                }
            }
            continue;
        }
        if c == '/' && matches!(chars.peek(), Some((_, '*'))) {
            chars.next();
            let mut prev = ' ';
            for (_, d) in chars.by_ref() {
                if prev == '*' && d == '/' {
                    break;
                }
                prev = d;
            }
            continue;
        }
        match c {
            '(' => {
                ctx.unmatched_open_parens += 1;
                push_token(&mut ctx, TokenKind::Punctuation, "(", start);
            }
            ')' => {
                if ctx.unmatched_open_parens > 0 {
                    ctx.unmatched_open_parens -= 1;
                } else {
                    ctx.unmatched_close_parens += 1;
                }
                push_token(&mut ctx, TokenKind::Punctuation, ")", start);
            }
            ',' | '.' | ';' => {
                let end = start + 1;
                push_token(&mut ctx, TokenKind::Punctuation, &text[start..end], start);
            }
            _ if c.is_ascii_digit() => {
                let end = consume_while(&mut chars, start + c.len_utf8(), |d| {
                    d.is_ascii_digit() || d == '.'
                });
                push_token(&mut ctx, TokenKind::NumberLiteral, &text[start..end], start);
            }
            _ if is_identifier_start(c) => {
                let end = consume_while(&mut chars, start + c.len_utf8(), is_identifier_continue);
                let word = &text[start..end];
                let kind = if is_keyword(word) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                };
                push_token(&mut ctx, kind, word, start);
            }
            _ if is_operator_char(c) => {
                let mut end = start + c.len_utf8();
                if let Some(&(next, d)) = chars.peek()
                    && TWO_CHAR_OPERATORS.contains(&&text[start..next + d.len_utf8()])
                {
                    end = next + d.len_utf8();
                    chars.next();
                }
                push_token(&mut ctx, TokenKind::Operator, &text[start..end], start);
            }
            _ => {
                // Unrecognized span, kept as an opaque identifier so the
                // token stream still covers the text
                let end = consume_while(&mut chars, start + c.len_utf8(), is_opaque_continue);
                push_token(&mut ctx, TokenKind::Identifier, &text[start..end], start);
            }
        }
    }
    ctx
}

/// Split a multi-statement script on `;` outside string literals.
///
/// Comments are skipped while looking for separators, so a `;` inside a
/// line comment does not split. Each returned slice is trimmed and keeps
/// its terminating `;`, so per-statement validation still sees the
/// terminator. Segments with no content before the separator are dropped.
/// The validation engine itself takes exactly one statement per call; this
/// helper is for callers holding whole scripts.
///
/// # Example
///
/// ```
/// use sql_validator::scanner::split_statements;
///
/// let parts = split_statements("SELECT 1; INSERT INTO t (s) VALUES ('a;b');");
/// assert_eq!(parts, vec!["SELECT 1;", "INSERT INTO t (s) VALUES ('a;b');"]);
/// ```
pub fn split_statements(text: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut segment_start = 0usize;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\'' => {
                while let Some((_, d)) = chars.next() {
                    if d == '\'' {
                        if matches!(chars.peek(), Some((_, '\''))) {
                            chars.next();
                            continue;
                        }
                        break;
                    }
                }
            }
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                for (_, d) in chars.by_ref() {
                    if d == '\n' {
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let mut prev = ' ';
                for (_, d) in chars.by_ref() {
                    if prev == '*' && d == '/' {
                        break;
                    }
                    prev = d;
                }
            }
            ';' => {
                if !text[segment_start..i].trim().is_empty() {
                    statements.push(text[segment_start..=i].trim());
                }
                segment_start = i + 1;
            }
            _ => {}
        }
    }
    let tail = text[segment_start..].trim();
    if !tail.is_empty() {
        statements.push(tail);
    }
    statements
}

fn scan_string_literal(
    text: &str,
    start: usize,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    ctx: &mut ScanContext
) {
    let mut end = None;
    while let Some((i, c)) = chars.next() {
        if c == '\'' {
            if matches!(chars.peek(), Some((_, '\''))) {
                chars.next();
                continue;
            }
            end = Some(i + 1);
            break;
        }
    }
    match end {
        Some(end) => push_token(ctx, TokenKind::StringLiteral, &text[start..end], start),
        None => {
            ctx.unterminated_quotes += 1;
            push_token(ctx, TokenKind::StringLiteral, &text[start..], start);
        }
    }
}

fn consume_while(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    mut end: usize,
    accept: impl Fn(char) -> bool
) -> usize {
    while let Some(&(i, c)) = chars.peek() {
        if !accept(c) {
            break;
        }
        end = i + c.len_utf8();
        chars.next();
    }
    end
}

fn push_token(ctx: &mut ScanContext, kind: TokenKind, text: &str, offset: usize) {
    ctx.tokens.push(Token {
        kind,
        text: CompactString::from(text),
        offset
    });
}

fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k))
}

/// Whether the word is a standard function callable without parentheses.
pub fn is_niladic_function(word: &str) -> bool {
    NILADIC_FUNCTIONS.iter().any(|f| word.eq_ignore_ascii_case(f))
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Opaque spans run until whitespace, an operator, or structural punctuation.
fn is_opaque_continue(c: char) -> bool {
    !c.is_whitespace() && !is_operator_char(c) && !matches!(c, '\'' | '(' | ')' | ',' | '.' | ';')
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '<' | '>' | '!' | '+' | '-' | '*' | '/' | '%' | '|')
}
