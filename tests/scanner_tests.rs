use sql_validator::scanner::{
    StatementKind, TokenKind, is_niladic_function, scan, split_statements
};

#[test]
fn test_scan_qualified_name() {
    let ctx = scan("SELECT u.name FROM users u");
    let texts: Vec<&str> = ctx.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["SELECT", "u", ".", "name", "FROM", "users", "u"]);
}

#[test]
fn test_scan_keyword_case_insensitive() {
    let ctx = scan("select id from users");
    assert!(ctx.has_keyword("SELECT"));
    assert!(ctx.has_keyword("FROM"));
    assert!(!ctx.has_keyword("WHERE"));
}

#[test]
fn test_scan_keyword_position() {
    let ctx = scan("SELECT id FROM users WHERE id = 1");
    assert_eq!(ctx.keyword_position("FROM"), Some(2));
    assert_eq!(ctx.keyword_position("WHERE"), Some(4));
    assert_eq!(ctx.keyword_position("LIMIT"), None);
}

#[test]
fn test_token_is_keyword() {
    let ctx = scan("SELECT id");
    assert!(ctx.tokens[0].is_keyword("select"));
    assert!(!ctx.tokens[1].is_keyword("id"));
}

#[test]
fn test_token_is_punct() {
    let ctx = scan("(a, b)");
    assert!(ctx.tokens[0].is_punct('('));
    assert!(ctx.tokens[2].is_punct(','));
}

#[test]
fn test_statement_kind_insert() {
    let kind = scan("INSERT INTO t (a) VALUES (1)").statement_kind();
    assert_eq!(kind, StatementKind::Insert);
}

#[test]
fn test_statement_kind_update() {
    let kind = scan("UPDATE t SET a = 1 WHERE id = 2").statement_kind();
    assert_eq!(kind, StatementKind::Update);
}

#[test]
fn test_statement_kind_create() {
    let kind = scan("CREATE TABLE t (id INT)").statement_kind();
    assert_eq!(kind, StatementKind::Create);
}

#[test]
fn test_statement_kind_alter() {
    let kind = scan("ALTER TABLE t ADD COLUMN c INT").statement_kind();
    assert_eq!(kind, StatementKind::Alter);
}

#[test]
fn test_statement_kind_drop() {
    assert_eq!(scan("DROP TABLE t").statement_kind(), StatementKind::Drop);
}

#[test]
fn test_statement_kind_truncate() {
    let kind = scan("TRUNCATE TABLE t").statement_kind();
    assert_eq!(kind, StatementKind::Truncate);
}

#[test]
fn test_statement_kind_select() {
    assert_eq!(scan("SELECT 1").statement_kind(), StatementKind::Select);
}

#[test]
fn test_statement_kind_with_cte_is_select() {
    let kind = scan("WITH t AS (SELECT 1) SELECT * FROM t").statement_kind();
    assert_eq!(kind, StatementKind::Select);
}

#[test]
fn test_statement_kind_lowercase_delete() {
    assert_eq!(scan("delete from orders").statement_kind(), StatementKind::Delete);
}

#[test]
fn test_statement_kind_explain_is_other() {
    assert_eq!(scan("EXPLAIN SELECT 1").statement_kind(), StatementKind::Other);
}

#[test]
fn test_statement_kind_leading_paren_is_other() {
    assert_eq!(scan("(SELECT 1)").statement_kind(), StatementKind::Other);
}

#[test]
fn test_statement_kind_bare_expression_is_other() {
    assert_eq!(scan("1 + 1").statement_kind(), StatementKind::Other);
}

#[test]
fn test_statement_kind_display() {
    assert_eq!(StatementKind::Select.to_string(), "SELECT");
    assert_eq!(StatementKind::Other.to_string(), "OTHER");
}

#[test]
fn test_is_niladic_function_known() {
    assert!(is_niladic_function("CURRENT_DATE"));
    assert!(is_niladic_function("current_timestamp"));
}

#[test]
fn test_is_niladic_function_regular_identifier() {
    assert!(!is_niladic_function("total"));
}

#[test]
fn test_scan_string_literal_single_token() {
    let ctx = scan("SELECT 'a, (b); c' FROM t");
    assert_eq!(ctx.tokens[1].kind, TokenKind::StringLiteral);
    assert_eq!(ctx.tokens[1].text, "'a, (b); c'");
    assert!(ctx.is_balanced());
}

#[test]
fn test_scan_star_is_operator() {
    let ctx = scan("SELECT * FROM t");
    assert_eq!(ctx.tokens[1].kind, TokenKind::Operator);
    assert_eq!(ctx.tokens[1].text, "*");
}

#[test]
fn test_scan_concat_operator_single_token() {
    let ctx = scan("SELECT a || b FROM t");
    assert_eq!(ctx.tokens[2].kind, TokenKind::Operator);
    assert_eq!(ctx.tokens[2].text, "||");
}

#[test]
fn test_scan_semicolon_token_emitted() {
    let ctx = scan("SELECT 1;");
    assert!(ctx.tokens.last().unwrap().is_punct(';'));
    assert!(ctx.has_trailing_semicolon);
}

#[test]
fn test_scan_semicolon_inside_literal_not_trailing() {
    let ctx = scan("SELECT ';'");
    assert!(!ctx.has_trailing_semicolon);
}

#[test]
fn test_scan_unmatched_open_paren() {
    let ctx = scan("SELECT id FROM users WHERE (id = 1");
    assert_eq!(ctx.unmatched_open_parens, 1);
    assert_eq!(ctx.unmatched_close_parens, 0);
}

#[test]
fn test_scan_unmatched_close_paren() {
    let ctx = scan("SELECT id FROM users WHERE id = 1)");
    assert_eq!(ctx.unmatched_open_parens, 0);
    assert_eq!(ctx.unmatched_close_parens, 1);
}

#[test]
fn test_scan_paren_inside_literal_ignored() {
    assert!(scan("SELECT '(' FROM t").is_balanced());
}

#[test]
fn test_scan_escaped_quote_not_unterminated() {
    let ctx = scan("INSERT INTO t (s) VALUES ('it''s fine')");
    assert_eq!(ctx.unterminated_quotes, 0);
    assert!(ctx.is_balanced());
}

#[test]
fn test_scan_unterminated_literal() {
    assert_eq!(scan("SELECT 'open FROM t").unterminated_quotes, 1);
}

#[test]
fn test_scan_number_and_two_char_operator() {
    let ctx = scan("WHERE price >= 10.5");
    let kinds: Vec<TokenKind> = ctx.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![
        TokenKind::Keyword,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::NumberLiteral
    ]);
    assert_eq!(ctx.tokens[2].text, ">=");
}

#[test]
fn test_scan_line_comment_skipped() {
    let ctx = scan("SELECT 1 -- trailing (comment');\nFROM t");
    assert!(ctx.is_balanced());
    assert!(ctx.has_keyword("FROM"));
}

#[test]
fn test_scan_block_comment_skipped() {
    let ctx = scan("SELECT /* ( ' */ 1");
    assert!(ctx.is_balanced());
    assert_eq!(ctx.tokens.len(), 2);
}

#[test]
fn test_scan_never_panics_on_garbage() {
    scan("\u{0}\u{1}((((''''\\xff ~~ @@@ SELECT");
    scan("))))))");
    scan("'''");
}

#[test]
fn test_scan_placeholder_is_opaque_identifier() {
    let ctx = scan("SELECT id FROM users WHERE id = $1");
    let last = ctx.tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::Identifier);
    assert_eq!(last.text, "$1");
    assert!(!last.is_name());
}

#[test]
fn test_scan_opaque_span_single_token() {
    let ctx = scan("a @@@ b");
    let texts: Vec<&str> = ctx.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "@@@", "b"]);
    assert!(ctx.tokens[0].is_name());
    assert!(!ctx.tokens[1].is_name());
}

#[test]
fn test_scan_empty_input() {
    let ctx = scan("");
    assert!(ctx.tokens.is_empty());
    assert!(!ctx.has_trailing_semicolon);
}

#[test]
fn test_token_offsets_point_into_source() {
    let sql = "SELECT id FROM users";
    let ctx = scan(sql);
    for token in &ctx.tokens {
        assert!(sql[token.offset..].starts_with(token.text.as_str()));
    }
}

#[test]
fn test_split_statements_basic() {
    let parts = split_statements("SELECT 1; SELECT 2; SELECT 3");
    assert_eq!(parts.len(), 3);
}

#[test]
fn test_split_statements_trailing_semicolon() {
    let parts = split_statements("SELECT 1;\n");
    assert_eq!(parts, vec!["SELECT 1;"]);
}

#[test]
fn test_split_statements_whitespace_only() {
    assert!(split_statements("   \n  ").is_empty());
}

#[test]
fn test_split_statements_block_comment() {
    let parts = split_statements("SELECT /* ; */ 1; SELECT 2");
    assert_eq!(parts.len(), 2);
}

#[test]
fn test_split_statements_escaped_quote() {
    let parts = split_statements("INSERT INTO t (s) VALUES ('it''s; done'); SELECT 1");
    assert_eq!(parts.len(), 2);
}

#[test]
fn test_split_statements_literal_aware() {
    let parts = split_statements("SELECT 'a;b'; SELECT 2");
    assert_eq!(parts, vec!["SELECT 'a;b';", "SELECT 2"]);
}

#[test]
fn test_split_statements_keeps_terminator() {
    let parts = split_statements("SELECT 1; SELECT 2;");
    assert_eq!(parts, vec!["SELECT 1;", "SELECT 2;"]);
}

#[test]
fn test_split_statements_drops_empty_segments() {
    assert_eq!(split_statements(";;SELECT 1;;"), vec!["SELECT 1;"]);
}

#[test]
fn test_split_statements_semicolon_in_line_comment() {
    let parts = split_statements("SELECT 1 -- not here;\n; SELECT 2");
    assert_eq!(parts.len(), 2);
}
