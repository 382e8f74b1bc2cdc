//! Tests for schema statements: CREATE TABLE, INDEX, VIEW, TRIGGER and
//! VIRTUAL TABLE, ALTER TABLE and DROP.

mod common;
use common::*;

#[allow(clippy::enum_glob_use)]
use oxide_sql_syntax::SyntaxKind::*;
use oxide_sql_syntax::parse;

// ===================================================================
// CREATE TABLE
// ===================================================================

const ORDERS: &str = "\
CREATE TABLE IF NOT EXISTS main.orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    total DECIMAL(10, 2) DEFAULT 0 CHECK (total >= 0),
    CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES users (id)
        ON UPDATE SET NULL DEFERRABLE INITIALLY DEFERRED,
    UNIQUE (user_id, total) ON CONFLICT REPLACE
) WITHOUT ROWID";

#[test]
fn create_table_full() {
    let stmt = statement(ORDERS);
    assert_eq!(stmt.kind(), CREATE_TABLE_STATEMENT);
    assert_eq!(text_of(&stmt, DATABASE_NAME), "main");
    assert_eq!(text_of(&stmt, TABLE_DEFINITION_NAME), "orders");
    assert_eq!(count(&stmt, COLUMN_DEFINITION), 3);
    assert_eq!(count(&stmt, TABLE_CONSTRAINT), 2);
    assert_eq!(count(&stmt, FOREIGN_KEY_CLAUSE), 2);
    assert_eq!(count(&stmt, COLUMN_CONSTRAINT), 5);
    assert_eq!(count(&stmt, CONFLICT_CLAUSE), 1);
    assert_eq!(text_of(&stmt, CONSTRAINT_NAME), "fk_user");
}

#[test]
fn create_table_type_names() {
    let root = parse_ok("CREATE TABLE t (a VARYING CHARACTER(255), b DECIMAL(-1, +2), c)");
    let types: Vec<_> = find_all(&root, TYPE_NAME)
        .iter()
        .map(|n| n.text().to_string())
        .collect();
    assert_eq!(types, vec!["VARYING CHARACTER(255)", "DECIMAL(-1, +2)"]);
    assert_eq!(count(&root, SIGNED_NUMBER), 3);
}

#[test]
fn create_table_options() {
    parse_ok("CREATE TABLE t (a INTEGER) STRICT, WITHOUT ROWID");
    parse_ok("CREATE TABLE t (a INTEGER) without rowid");
}

#[test]
fn create_table_as_select() {
    let stmt = statement("CREATE TEMP TABLE t AS SELECT 1");
    assert_eq!(
        child_kinds(&stmt),
        vec![TABLE_DEFINITION_NAME, SELECT_STATEMENT]
    );
}

#[test]
fn create_table_keyword_column_names() {
    // Fallback keywords are names in a column definition.
    let root = parse_ok("CREATE TABLE t (key TEXT, action TEXT, replace INTEGER)");
    assert_eq!(count(&root, COLUMN_DEFINITION_NAME), 3);
}

#[test]
fn error_without_needs_rowid() {
    let errors = parse_err("CREATE TABLE t (a) WITHOUT");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "ROWID expected");
}

#[test]
fn error_bad_table_element() {
    let errors = parse_err("CREATE TABLE t (a INTEGER, b TEXT, 42)");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "<column definition name> expected, got '42'"
    );
}

#[test]
fn error_table_element_recovers_to_paren() {
    let input = "CREATE TABLE t (a INTEGER PRIMARY KEY 42, b) WITHOUT ROWID";
    let result = parse(input);
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].message, "unexpected '42'");
    let root = result.syntax();
    assert_eq!(statement_kinds(&root), vec![CREATE_TABLE_STATEMENT]);
    let stmt = find(&root, CREATE_TABLE_STATEMENT);
    assert_eq!(count(&stmt, ERROR), 1);
}

// ===================================================================
// CREATE INDEX / VIEW / VIRTUAL TABLE
// ===================================================================

#[test]
fn create_index() {
    let stmt = statement(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email \
         ON users (email COLLATE nocase DESC, id) WHERE email IS NOT NULL",
    );
    assert_eq!(stmt.kind(), CREATE_INDEX_STATEMENT);
    assert_eq!(text_of(&stmt, INDEX_NAME), "idx_users_email");
    assert_eq!(count(&stmt, INDEXED_COLUMN), 2);
    assert_eq!(text_of(&stmt, COLLATION_NAME), "nocase");
}

#[test]
fn create_temp_view() {
    let stmt = statement(
        "CREATE TEMP VIEW IF NOT EXISTS active (id, name) AS SELECT id, name FROM users",
    );
    assert_eq!(
        child_kinds(&stmt),
        vec![
            VIEW_NAME,
            COLUMN_DEFINITION_NAME,
            COLUMN_DEFINITION_NAME,
            SELECT_STATEMENT,
        ]
    );
}

#[test]
fn create_virtual_table() {
    let stmt = statement(
        "CREATE VIRTUAL TABLE docs USING fts5(title, body, tokenize = 'porter unicode61')",
    );
    assert_eq!(stmt.kind(), CREATE_VIRTUAL_TABLE_STATEMENT);
    assert_eq!(text_of(&stmt, MODULE_NAME), "fts5");
    let arguments: Vec<_> = find_all(&stmt, MODULE_ARGUMENT)
        .iter()
        .map(|n| n.text().to_string().trim().to_string())
        .collect();
    assert_eq!(
        arguments,
        vec!["title", "body", "tokenize = 'porter unicode61'"]
    );
}

#[test]
fn create_virtual_table_nested_parens() {
    let root = parse_ok("CREATE VIRTUAL TABLE r USING rtree(id, f(1, 2), y)");
    assert_eq!(count(&root, MODULE_ARGUMENT), 3);
}

// ===================================================================
// CREATE TRIGGER
// ===================================================================

#[test]
fn create_trigger() {
    let root = parse_ok(
        "CREATE TRIGGER IF NOT EXISTS audit AFTER UPDATE OF name, email ON users \
         FOR EACH ROW WHEN new.name IS NOT old.name BEGIN \
           INSERT INTO log (msg) VALUES ('changed'); \
           SELECT RAISE(ABORT, 'nope'); \
         END; SELECT 1",
    );
    assert_eq!(
        statement_kinds(&root),
        vec![CREATE_TRIGGER_STATEMENT, SELECT_STATEMENT]
    );
    let body = find(&root, TRIGGER_BODY);
    assert_eq!(child_kinds(&body), vec![INSERT_STATEMENT, SELECT_STATEMENT]);
    assert_eq!(text_of(&root, ERROR_MESSAGE), "'nope'");
}

#[test]
fn create_trigger_instead_of() {
    let root = parse_ok(
        "CREATE TEMP TRIGGER tr INSTEAD OF DELETE ON v BEGIN DELETE FROM t WHERE id = old.id; END",
    );
    assert_eq!(count(&root, DELETE_STATEMENT), 1);
}

#[test]
fn error_trigger_body_statement() {
    assert_eq!(
        first_error("CREATE TRIGGER tr AFTER INSERT ON t BEGIN DROP TABLE x; END"),
        "<statement> expected, got 'DROP'"
    );
}

#[test]
fn create_trigger_with_clause_body() {
    let root = parse_ok(
        "CREATE TRIGGER tr AFTER INSERT ON t BEGIN \
           WITH x AS (SELECT 1) SELECT * FROM x; \
           WITH y AS (SELECT 2) DELETE FROM u WHERE id IN y; \
         END",
    );
    let body = find(&root, TRIGGER_BODY);
    assert_eq!(
        child_kinds(&body),
        vec![WITH_CLAUSE_STATEMENT, WITH_CLAUSE_STATEMENT]
    );
    assert_eq!(count(&root, DELETE_STATEMENT), 1);
}

#[test]
fn error_trigger_body_stops_at_end() {
    let sql = "CREATE TRIGGER tr AFTER INSERT ON t BEGIN SELECT 1; garbage END; \
               SELECT 2; DELETE FROM u;";
    let errors = parse_err(sql);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "<statement> expected, got 'garbage'");

    let root = parse(sql).syntax();
    assert_eq!(
        statement_kinds(&root),
        vec![CREATE_TRIGGER_STATEMENT, SELECT_STATEMENT, DELETE_STATEMENT]
    );
    let body = find(&root, TRIGGER_BODY);
    assert_eq!(child_kinds(&body), vec![SELECT_STATEMENT, ERROR]);
}

#[test]
fn error_trigger_body_missing_semicolon() {
    let sql = "CREATE TRIGGER tr AFTER INSERT ON t BEGIN SELECT 1 a b; END; SELECT 2";
    let errors = parse_err(sql);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "';' expected, got 'b'");
    assert_eq!(
        statement_kinds(&parse(sql).syntax()),
        vec![CREATE_TRIGGER_STATEMENT, SELECT_STATEMENT]
    );
}

#[test]
fn error_trigger_bad_first_statement_keeps_trigger() {
    let sql = "CREATE TRIGGER tr AFTER INSERT ON t BEGIN DROP TABLE x; END; SELECT 2";
    assert_eq!(parse_err(sql).len(), 1);
    assert_eq!(
        statement_kinds(&parse(sql).syntax()),
        vec![CREATE_TRIGGER_STATEMENT, SELECT_STATEMENT]
    );
}

// ===================================================================
// ALTER / DROP
// ===================================================================

#[test]
fn alter_table_forms() {
    for sql in [
        "ALTER TABLE t RENAME TO u",
        "ALTER TABLE t RENAME COLUMN a TO b",
        "ALTER TABLE main.t ADD COLUMN c TEXT NOT NULL DEFAULT ''",
        "ALTER TABLE t DROP COLUMN c",
    ] {
        assert_eq!(statement(sql).kind(), ALTER_TABLE_STATEMENT, "{sql}");
    }
}

#[test]
fn drop_kinds() {
    for (sql, kind) in [
        ("DROP TABLE IF EXISTS main.t", DROP_TABLE_STATEMENT),
        ("DROP INDEX i", DROP_INDEX_STATEMENT),
        ("DROP TRIGGER IF EXISTS tr", DROP_TRIGGER_STATEMENT),
        ("DROP VIEW v", DROP_VIEW_STATEMENT),
    ] {
        assert_eq!(statement(sql).kind(), kind, "{sql}");
    }
}

#[test]
fn error_drop_without_name() {
    assert_eq!(first_error("DROP VIEW"), "<view name> expected");
}

#[test]
fn error_drop_unknown_kind() {
    assert_eq!(
        first_error("DROP SEQUENCE s"),
        "INDEX, TABLE, TRIGGER or VIEW expected, got 'SEQUENCE'"
    );
}

#[test]
fn error_create_alone() {
    assert_eq!(
        first_error("CREATE"),
        "INDEX, TABLE, TRIGGER, UNIQUE, VIEW or VIRTUAL expected"
    );
}

#[test]
fn error_alter_without_action() {
    assert_eq!(
        first_error("ALTER TABLE t"),
        "ADD, DROP or RENAME expected"
    );
}
