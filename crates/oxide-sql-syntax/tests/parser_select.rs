//! Tests for SELECT statements: result columns, FROM items and joins,
//! clauses, compounds, and WITH.

mod common;
use common::*;

#[allow(clippy::enum_glob_use)]
use oxide_sql_syntax::SyntaxKind::*;

// ===================================================================
// Result columns
// ===================================================================

#[test]
fn select_result_columns() {
    let root = parse_ok("SELECT DISTINCT a AS x, b y, t.*, * FROM t");
    assert_eq!(count(&root, RESULT_COLUMN), 4);
    let aliases: Vec<_> = find_all(&root, COLUMN_ALIAS_NAME)
        .iter()
        .map(|n| n.text().to_string())
        .collect();
    assert_eq!(aliases, vec!["x", "y"]);
    assert_eq!(text_of(&root, SELECTED_TABLE_NAME), "t");
}

#[test]
fn select_statement_shape() {
    let stmt = statement("SELECT a FROM t WHERE a > 1 GROUP BY a HAVING count(*) > 1");
    assert_eq!(stmt.kind(), SELECT_STATEMENT);
    let core = find(&stmt, SELECT_CORE_SELECT);
    assert_eq!(
        child_kinds(&core),
        vec![RESULT_COLUMNS, FROM_CLAUSE, WHERE_CLAUSE, GROUP_BY_CLAUSE]
    );
}

#[test]
fn select_values() {
    let root = parse_ok("VALUES (1, 2), (3, 4)");
    assert_eq!(count(&root, SELECT_CORE_VALUES), 1);
    assert_eq!(count(&root, VALUES_ROW), 2);
}

// ===================================================================
// FROM
// ===================================================================

#[test]
fn from_single_table() {
    let root = parse_ok("SELECT * FROM main.users AS u");
    let from = find(&root, FROM_CLAUSE);
    assert_eq!(child_kinds(&from), vec![TABLE_OR_SUBQUERY]);
    assert_eq!(text_of(&from, DATABASE_NAME), "main");
    assert_eq!(text_of(&from, DEFINED_TABLE_NAME), "users");
    assert_eq!(text_of(&from, TABLE_ALIAS_NAME), "u");
}

#[test]
fn from_indexed_by() {
    let root = parse_ok("SELECT * FROM t INDEXED BY idx_t");
    assert_eq!(text_of(&root, INDEX_NAME), "idx_t");

    let root = parse_ok("SELECT * FROM t NOT INDEXED WHERE a = 1");
    assert_eq!(count(&root, INDEXED_BY), 1);
    assert_eq!(count(&root, WHERE_CLAUSE), 1);
}

#[test]
fn from_joins() {
    let root = parse_ok(
        "SELECT * FROM a NATURAL LEFT OUTER JOIN b USING (id) \
         INNER JOIN c ON c.id = b.id CROSS JOIN d, e",
    );
    assert_eq!(count(&root, JOIN_CLAUSE), 1);
    assert_eq!(count(&root, JOIN_OPERATOR), 4);
    assert_eq!(count(&root, JOIN_CONSTRAINT), 2);
    assert_eq!(count(&root, TABLE_OR_SUBQUERY), 5);
}

#[test]
fn from_join_wraps_first_table() {
    let root = parse_ok("SELECT * FROM a JOIN b ON a.id = b.id");
    let join = find(&root, JOIN_CLAUSE);
    assert_eq!(
        child_kinds(&join),
        vec![TABLE_OR_SUBQUERY, JOIN_OPERATOR, TABLE_OR_SUBQUERY, JOIN_CONSTRAINT]
    );
}

#[test]
fn from_join_without_constraint() {
    parse_ok("SELECT * FROM a INNER JOIN b WHERE a.id = 1");
}

#[test]
fn from_subquery_with_alias() {
    let root = parse_ok("SELECT s.n FROM (SELECT 1 AS n) AS s");
    let item = find(&root, TABLE_OR_SUBQUERY);
    assert_eq!(child_kinds(&item), vec![SELECT_SUBQUERY, TABLE_ALIAS_NAME]);
}

#[test]
fn from_parenthesized_join() {
    let root = parse_ok("SELECT * FROM (a JOIN b ON a.x = b.x) LEFT JOIN c ON c.y = a.y");
    assert_eq!(count(&root, JOIN_CLAUSE), 2);
    assert_eq!(count(&root, SELECT_SUBQUERY), 0);
}

// ===================================================================
// Clauses and compounds
// ===================================================================

#[test]
fn order_by_and_limit() {
    let root = parse_ok("SELECT a FROM t ORDER BY a DESC, b COLLATE nocase ASC LIMIT 10 OFFSET 5");
    assert_eq!(count(&root, ORDERING_TERM), 2);
    assert_eq!(count(&root, COLLATE_EXPRESSION), 1);
    let stmt = find(&root, SELECT_STATEMENT);
    assert_eq!(
        child_kinds(&stmt),
        vec![SELECT_CORE, ORDER_CLAUSE, LIMIT_CLAUSE]
    );
}

#[test]
fn limit_with_comma() {
    let root = parse_ok("SELECT a FROM t LIMIT 5, 10");
    let limit = find(&root, LIMIT_CLAUSE);
    assert_eq!(child_kinds(&limit), vec![LITERAL_EXPRESSION, LITERAL_EXPRESSION]);
}

#[test]
fn compound_selects() {
    let root = parse_ok(
        "SELECT 1 UNION ALL SELECT 2 INTERSECT SELECT 3 EXCEPT VALUES (4) ORDER BY 1 DESC LIMIT 1",
    );
    assert_eq!(count(&root, COMPOUND_OPERATOR), 3);
    assert_eq!(count(&root, SELECT_CORE), 4);
    assert_eq!(count(&root, SELECT_STATEMENT), 1);
    let compounds: Vec<_> = find_all(&root, COMPOUND_OPERATOR)
        .iter()
        .map(|n| n.text().to_string())
        .collect();
    assert_eq!(compounds, vec!["UNION ALL", "INTERSECT", "EXCEPT"]);
}

// ===================================================================
// WITH
// ===================================================================

#[test]
fn with_statement_shape() {
    let stmt = statement("WITH x AS (SELECT 1) SELECT * FROM x");
    assert_eq!(stmt.kind(), WITH_CLAUSE_STATEMENT);
    assert_eq!(child_kinds(&stmt), vec![WITH_CLAUSE, SELECT_STATEMENT]);
}

#[test]
fn with_recursive_and_columns() {
    let root = parse_ok(
        "WITH RECURSIVE cnt(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM cnt LIMIT 10) \
         SELECT x FROM cnt",
    );
    assert_eq!(text_of(&root, TABLE_DEFINITION_NAME), "cnt");
    assert_eq!(text_of(&root, COLUMN_DEFINITION_NAME), "x");
    assert_eq!(count(&root, WITH_CLAUSE_TABLE), 1);
}

#[test]
fn with_several_tables() {
    let root = parse_ok("WITH a AS (SELECT 1), b (n) AS (VALUES (2)) SELECT * FROM a, b");
    assert_eq!(count(&root, WITH_CLAUSE_TABLE), 2);
    assert_eq!(count(&root, WITH_CLAUSE_TABLE_DEF), 2);
}

#[test]
fn with_before_dml() {
    let root = parse_ok("WITH x AS (SELECT 1) DELETE FROM t WHERE a IN x");
    let stmt = find(&root, WITH_CLAUSE_STATEMENT);
    assert_eq!(child_kinds(&stmt), vec![WITH_CLAUSE, DELETE_STATEMENT]);

    let root = parse_ok("WITH x AS (SELECT 1) UPDATE t SET a = (SELECT * FROM x)");
    assert_eq!(count(&root, UPDATE_STATEMENT), 1);

    let root = parse_ok("WITH x AS (SELECT 1) INSERT INTO t SELECT * FROM x");
    assert_eq!(count(&root, INSERT_STATEMENT), 1);
}

// ===================================================================
// Errors
// ===================================================================

#[test]
fn error_select_without_columns() {
    let errors = parse_err("SELECT FROM t");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "<result column> expected, got 'FROM'");
}

#[test]
fn error_from_without_table() {
    assert_eq!(first_error("SELECT * FROM"), "<table or subquery> expected");
}

#[test]
fn error_join_without_table() {
    assert_eq!(
        first_error("SELECT * FROM a LEFT JOIN WHERE 1"),
        "<table or subquery> expected, got 'WHERE'"
    );
}

#[test]
fn error_order_without_by() {
    assert_eq!(first_error("SELECT a FROM t ORDER a"), "BY expected, got 'a'");
}

#[test]
fn error_compound_without_core() {
    assert_eq!(first_error("SELECT 1 UNION"), "SELECT or VALUES expected");
}
