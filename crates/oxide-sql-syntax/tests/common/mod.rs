#![allow(dead_code)]

use oxide_sql_syntax::{Parse, ParseError, SyntaxKind, SyntaxNode, parse};

/// Parses `sql`, asserting that the tree is lossless and error-free.
pub fn parse_ok(sql: &str) -> SyntaxNode {
    let result = parse(sql);
    assert!(
        result.ok(),
        "Failed to parse: {sql}\nErrors: {:?}\n{}",
        result.errors(),
        result.debug_tree()
    );
    let root = result.syntax();
    assert_lossless(sql, &result);
    root
}

/// Parses `sql`, which must produce at least one diagnostic.
pub fn parse_err(sql: &str) -> Vec<ParseError> {
    let result = parse(sql);
    assert!(!result.ok(), "Expected parse error for: {sql}\n{}", result.debug_tree());
    assert_lossless(sql, &result);
    result.errors().to_vec()
}

/// The message of the first diagnostic for `sql`.
pub fn first_error(sql: &str) -> String {
    parse_err(sql).remove(0).message
}

pub fn assert_lossless(sql: &str, result: &Parse) {
    let root = result.syntax();
    assert_eq!(root.kind(), SyntaxKind::FILE);
    assert_eq!(root.text().to_string(), sql, "Tree text differs from input");
}

/// The only statement of `sql`.
pub fn statement(sql: &str) -> SyntaxNode {
    let root = parse_ok(sql);
    let statements: Vec<_> = root.children().collect();
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.into_iter().next().unwrap()
}

/// Kinds of the top-level statements, errors included.
pub fn statement_kinds(root: &SyntaxNode) -> Vec<SyntaxKind> {
    root.children().map(|n| n.kind()).collect()
}

pub fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children().map(|n| n.kind()).collect()
}

/// Every node kind below `node`, in preorder.
pub fn node_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.descendants().map(|n| n.kind()).collect()
}

pub fn find_all(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    node.descendants().filter(|n| n.kind() == kind).collect()
}

pub fn find(node: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    node.descendants()
        .find(|n| n.kind() == kind)
        .unwrap_or_else(|| panic!("No {kind:?} in:\n{node:#?}"))
}

pub fn count(node: &SyntaxNode, kind: SyntaxKind) -> usize {
    find_all(node, kind).len()
}

/// Text of the first node of `kind`, without surrounding trivia.
pub fn text_of(node: &SyntaxNode, kind: SyntaxKind) -> String {
    find(node, kind).text().to_string().trim().to_string()
}

fn is_expression(kind: SyntaxKind) -> bool {
    kind.describe().ends_with("_EXPRESSION")
}

/// Compact rendering of an expression tree: `(ADD 1 (MUL 2 3))`.
///
/// Expressions without sub-expressions render as their text; operator
/// tokens are implied by the node kind.
pub fn shape(node: &SyntaxNode) -> String {
    let operands: Vec<_> = node.children().filter(|n| is_expression(n.kind())).collect();
    if operands.is_empty() {
        return node.text().to_string().trim().to_string();
    }
    let name = node.kind().describe().trim_end_matches("_EXPRESSION");
    let operands: Vec<_> = operands.iter().map(shape).collect();
    format!("({name} {})", operands.join(" "))
}

/// Shape of the first result column of a `SELECT`.
pub fn select_expr(sql: &str) -> String {
    let root = parse_ok(sql);
    let column = find(&root, SyntaxKind::RESULT_COLUMN);
    let expr = column
        .children()
        .find(|n| is_expression(n.kind()))
        .unwrap_or_else(|| panic!("No expression in: {sql}"));
    shape(&expr)
}
