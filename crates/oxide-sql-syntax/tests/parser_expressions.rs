//! Tests for the expression grammar: operator precedence and
//! associativity, atoms, and the places where `(` is ambiguous.

mod common;
use common::*;

#[allow(clippy::enum_glob_use)]
use oxide_sql_syntax::SyntaxKind::*;
use oxide_sql_syntax::{SyntaxElement, parse};

// ===================================================================
// Precedence
// ===================================================================

#[test]
fn precedence_mul_over_add() {
    assert_eq!(select_expr("SELECT 1 + 2 * 3"), "(ADD 1 (MUL 2 3))");
    assert_eq!(select_expr("SELECT 1 * 2 + 3"), "(ADD (MUL 1 2) 3)");
}

#[test]
fn precedence_and_over_or() {
    assert_eq!(select_expr("SELECT a OR b AND c"), "(OR a (AND b c))");
    assert_eq!(select_expr("SELECT a AND b OR c"), "(OR (AND a b) c)");
}

#[test]
fn precedence_comparison_over_equivalence() {
    assert_eq!(
        select_expr("SELECT 1 < 2 = 3 < 4"),
        "(EQUIVALENCE (COMPARISON 1 2) (COMPARISON 3 4))"
    );
}

#[test]
fn precedence_add_over_bit() {
    assert_eq!(select_expr("SELECT a & b + c"), "(BIT a (ADD b c))");
    assert_eq!(select_expr("SELECT a << 1 | b"), "(BIT (BIT a 1) b)");
}

#[test]
fn precedence_concat_over_mul() {
    assert_eq!(select_expr("SELECT a * b || c"), "(MUL a (CONCAT b c))");
}

#[test]
fn precedence_unary_binds_tightest_of_prefix_forms() {
    assert_eq!(select_expr("SELECT -a || b"), "(CONCAT (UNARY a) b)");
    assert_eq!(select_expr("SELECT NOT a = b"), "(EQUIVALENCE (UNARY a) b)");
    assert_eq!(select_expr("SELECT - - 1"), "(UNARY (UNARY 1))");
    assert_eq!(select_expr("SELECT ~a & b"), "(BIT (UNARY a) b)");
}

#[test]
fn precedence_collate_is_postfix_on_operand() {
    assert_eq!(select_expr("SELECT a || b COLLATE nocase"), "(CONCAT a (COLLATE b))");
    let root = parse_ok("SELECT name COLLATE NOCASE");
    assert_eq!(text_of(&root, COLLATION_NAME), "NOCASE");
}

#[test]
fn precedence_parentheses_group() {
    assert_eq!(select_expr("SELECT (1 + 2) * 3"), "(MUL (PAREN (ADD 1 2)) 3)");
}

// ===================================================================
// Associativity
// ===================================================================

#[test]
fn associativity_left_for_equal_tiers() {
    assert_eq!(select_expr("SELECT 1 - 2 - 3"), "(ADD (ADD 1 2) 3)");
    assert_eq!(select_expr("SELECT 8 / 4 % 3"), "(MUL (MUL 8 4) 3)");
    assert_eq!(select_expr("SELECT a || b || c"), "(CONCAT (CONCAT a b) c)");
    assert_eq!(select_expr("SELECT a OR b OR c"), "(OR (OR a b) c)");
}

#[test]
fn associativity_binary_children_in_source_order() {
    let root = parse_ok("SELECT x - y");
    let add = find(&root, ADD_EXPRESSION);
    assert_eq!(child_kinds(&add), vec![COLUMN_REF_EXPRESSION, COLUMN_REF_EXPRESSION]);
    let operator: Vec<_> = add
        .children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .filter(|t| !t.kind().is_trivia())
        .map(|t| t.kind())
        .collect();
    assert_eq!(operator, vec![MINUS]);
    assert_eq!(add.text().to_string(), "x - y");
}

// ===================================================================
// Postfix and suffixed operators
// ===================================================================

#[test]
fn like_with_escape() {
    assert_eq!(
        select_expr("SELECT x LIKE 'a%' ESCAPE '!'"),
        "(LIKE x 'a%' '!')"
    );
    assert_eq!(select_expr("SELECT x NOT GLOB 'a*'"), "(LIKE x 'a*')");
    assert_eq!(select_expr("SELECT x REGEXP '^a'"), "(LIKE x '^a')");
}

#[test]
fn between_and_does_not_leak_into_and() {
    assert_eq!(
        select_expr("SELECT a NOT BETWEEN 1 AND 2 AND c"),
        "(AND (BETWEEN a 1 2) c)"
    );
}

#[test]
fn null_tests() {
    assert_eq!(select_expr("SELECT a IS NOT NULL"), "(EQUIVALENCE a NULL)");
    assert_eq!(select_expr("SELECT a NOT NULL"), "(ISNULL a)");
    assert_eq!(select_expr("SELECT a NOTNULL"), "(ISNULL a)");
    assert_eq!(select_expr("SELECT a ISNULL OR b"), "(OR (ISNULL a) b)");
}

#[test]
fn in_with_expression_list() {
    assert_eq!(select_expr("SELECT a IN (1, 2) AND b"), "(AND (IN a 1 2) b)");
    assert_eq!(select_expr("SELECT a NOT IN (1)"), "(IN a 1)");
}

#[test]
fn in_with_empty_list() {
    let root = parse_ok("SELECT a IN ()");
    let in_expr = find(&root, IN_EXPRESSION);
    assert_eq!(child_kinds(&in_expr), vec![COLUMN_REF_EXPRESSION]);
}

#[test]
fn in_with_subquery() {
    let root = parse_ok("SELECT a IN (SELECT b FROM u)");
    let in_expr = find(&root, IN_EXPRESSION);
    assert_eq!(
        child_kinds(&in_expr),
        vec![COLUMN_REF_EXPRESSION, SELECT_STATEMENT]
    );
}

#[test]
fn in_with_table_name() {
    let root = parse_ok("SELECT a IN main.allowed");
    let in_expr = find(&root, IN_EXPRESSION);
    assert_eq!(text_of(&in_expr, DATABASE_NAME), "main");
    assert_eq!(text_of(&in_expr, DEFINED_TABLE_NAME), "allowed");
}

// ===================================================================
// Parenthesis disambiguation
// ===================================================================

#[test]
fn paren_single_expression() {
    assert_eq!(select_expr("SELECT (1)"), "(PAREN 1)");
}

#[test]
fn paren_tuple() {
    assert_eq!(select_expr("SELECT (1, 2)"), "(PAREN 1 2)");
    assert_eq!(
        select_expr("SELECT (a, b) = (1, 2)"),
        "(EQUIVALENCE (PAREN a b) (PAREN 1 2))"
    );
}

#[test]
fn paren_subquery() {
    let root = parse_ok("SELECT (SELECT 1)");
    let subquery = find(&root, SUBQUERY_EXPRESSION);
    assert_eq!(child_kinds(&subquery), vec![SELECT_STATEMENT]);

    let root = parse_ok("SELECT (VALUES (1))");
    assert_eq!(count(&root, SUBQUERY_EXPRESSION), 1);

    let root = parse_ok("SELECT (WITH x AS (SELECT 1) SELECT * FROM x)");
    let subquery = find(&root, SUBQUERY_EXPRESSION);
    assert_eq!(child_kinds(&subquery), vec![WITH_CLAUSE_SELECT_STATEMENT]);
}

#[test]
fn paren_around_subquery() {
    let root = parse_ok("SELECT ((SELECT 1))");
    let paren = find(&root, PAREN_EXPRESSION);
    assert_eq!(child_kinds(&paren), vec![SUBQUERY_EXPRESSION]);
}

#[test]
fn exists_forms() {
    let root = parse_ok("SELECT EXISTS (SELECT 1)");
    assert_eq!(count(&root, EXISTS_EXPRESSION), 1);

    let root = parse_ok("SELECT NOT EXISTS (SELECT 1 FROM t)");
    assert_eq!(count(&root, EXISTS_EXPRESSION), 1);
    assert_eq!(count(&root, UNARY_EXPRESSION), 0);
}

// ===================================================================
// Atoms
// ===================================================================

#[test]
fn function_calls() {
    let root = parse_ok("SELECT count(*), group_concat(DISTINCT name), replace(a, 'x', 'y'), now()");
    let names: Vec<_> = find_all(&root, FUNCTION_NAME)
        .iter()
        .map(|n| n.text().to_string())
        .collect();
    assert_eq!(names, vec!["count", "group_concat", "replace", "now"]);
    assert_eq!(count(&root, FUNCTION_CALL_EXPRESSION), 4);
}

#[test]
fn function_call_as_operand() {
    assert_eq!(
        select_expr("SELECT coalesce(a, 0) + 1"),
        "(ADD (FUNCTION_CALL a 0) 1)"
    );
}

#[test]
fn column_references() {
    let root = parse_ok("SELECT main.t.c");
    assert_eq!(text_of(&root, DATABASE_NAME), "main");
    assert_eq!(text_of(&root, SELECTED_TABLE_NAME), "t");
    assert_eq!(text_of(&root, COLUMN_NAME), "c");

    let root = parse_ok("SELECT [weird col], `x`, t.c");
    assert_eq!(count(&root, COLUMN_REF_EXPRESSION), 3);
    assert_eq!(count(&root, SELECTED_TABLE_NAME), 1);
}

#[test]
fn double_quoted_string_is_a_literal() {
    let root = parse_ok("SELECT \"abc\"");
    assert_eq!(count(&root, LITERAL_EXPRESSION), 1);
    assert_eq!(count(&root, COLUMN_REF_EXPRESSION), 0);
}

#[test]
fn double_quoted_qualifier_is_a_table_name() {
    let root = parse_ok("SELECT \"users\".\"id\", \"main\".\"users\".name FROM users");
    assert_eq!(count(&root, COLUMN_REF_EXPRESSION), 2);
    assert_eq!(count(&root, SELECTED_TABLE_NAME), 2);
    assert_eq!(text_of(&root, DATABASE_NAME), "\"main\"");
    assert_eq!(count(&root, LITERAL_EXPRESSION), 0);
}

#[test]
fn single_quoted_string_is_a_literal() {
    let root = parse_ok("SELECT 'a'");
    assert_eq!(count(&root, LITERAL_EXPRESSION), 1);
    assert_eq!(count(&root, COLUMN_REF_EXPRESSION), 0);
}

#[test]
fn literals() {
    let root = parse_ok("SELECT 1, 1.5, .5, 1e10, 0xff, 'str', X'0A', NULL, CURRENT_TIMESTAMP");
    assert_eq!(count(&root, LITERAL_EXPRESSION), 9);
}

#[test]
fn bind_parameters() {
    let root = parse_ok("SELECT ?, ?1, :name, @x, $y");
    assert_eq!(count(&root, BIND_PARAMETER), 5);
    assert_eq!(count(&root, LITERAL_EXPRESSION), 5);
}

#[test]
fn case_expressions() {
    assert_eq!(
        select_expr("SELECT CASE x WHEN 1 THEN 'a' WHEN 2 THEN 'b' ELSE 'c' END"),
        "(CASE x 1 'a' 2 'b' 'c')"
    );
    assert_eq!(
        select_expr("SELECT CASE WHEN a > 0 THEN 1 END"),
        "(CASE (COMPARISON a 0) 1)"
    );
}

#[test]
fn cast_expressions() {
    let root = parse_ok("SELECT CAST(a AS VARCHAR(10))");
    assert_eq!(count(&root, CAST_EXPRESSION), 1);
    assert_eq!(text_of(&root, TYPE_NAME), "VARCHAR(10)");
    assert_eq!(count(&root, SIGNED_NUMBER), 1);

    let root = parse_ok("SELECT CAST(a + 1 AS UNSIGNED BIG INT)");
    assert_eq!(text_of(&root, TYPE_NAME), "UNSIGNED BIG INT");
}

#[test]
fn raise_functions() {
    let root = parse_ok("SELECT RAISE(IGNORE)");
    assert_eq!(count(&root, RAISE_FUNCTION_EXPRESSION), 1);

    let root = parse_ok("SELECT RAISE(FAIL, 'boom')");
    assert_eq!(text_of(&root, ERROR_MESSAGE), "'boom'");
}

// ===================================================================
// Errors
// ===================================================================

#[test]
fn error_missing_right_operand() {
    assert_eq!(first_error("SELECT 1 +"), "<expression> expected");
    let root = parse("SELECT 1 +").syntax();
    assert_eq!(count(&root, ADD_EXPRESSION), 1);
}

#[test]
fn error_missing_operand_inside_parens() {
    let errors = parse_err("SELECT (1 + ) FROM t");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "<expression> expected, got ')'");
}

#[test]
fn error_cast_without_as() {
    assert_eq!(first_error("SELECT CAST(a)"), "AS expected, got ')'");
}

#[test]
fn error_case_without_then() {
    assert_eq!(first_error("SELECT CASE WHEN 1 END"), "THEN expected, got 'END'");
}

#[test]
fn error_between_without_and() {
    assert_eq!(first_error("SELECT a BETWEEN 1"), "AND expected");
}

#[test]
fn error_raise_without_message() {
    assert_eq!(first_error("SELECT RAISE(ABORT)"), "',' expected, got ')'");
}

#[test]
fn error_collate_without_name() {
    assert_eq!(first_error("SELECT x COLLATE"), "<collation name> expected");
}

#[test]
fn error_unclosed_paren() {
    assert_eq!(first_error("SELECT (1 + 2"), "')' expected");
}
