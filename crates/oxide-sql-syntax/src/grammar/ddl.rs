//! Schema statements: `CREATE`, `ALTER TABLE` and `DROP`.

use super::dml::{delete_statement, insert_statement, update_statement};
use super::expressions::{expression, literal};
use super::names::{expect_name, name_list, qualified_name};
use super::select::{select_statement, subquery_body};
use super::with_statement;
#[allow(clippy::enum_glob_use)]
use crate::SyntaxKind::{self, *};
use crate::parser::lookahead::{is_name, subquery_sync};
use crate::parser::{Depth, MatchResult, Missing, ParseState, Parser, Rule, Step};

/// Picks the `CREATE` form from the keyword after `CREATE` (and `TEMP`).
pub(super) fn create_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(CREATE_KW) {
        return MatchResult::NotMatched;
    }
    let temp = matches!(p.nth(1), TEMP_KW | TEMPORARY_KW);
    let rule: Rule = match p.nth(if temp { 2 } else { 1 }) {
        TABLE_KW => create_table,
        UNIQUE_KW | INDEX_KW => create_index,
        VIEW_KW => create_view,
        TRIGGER_KW => create_trigger,
        VIRTUAL_KW => create_virtual_table,
        _ => {
            return p.rule(ERROR, depth, |p, state, _| {
                p.bump();
                state.commit();
                if temp {
                    p.bump();
                    return p.expect_any(state, &[TABLE_KW, VIEW_KW, TRIGGER_KW]);
                }
                p.expect_any(
                    state,
                    &[INDEX_KW, TABLE_KW, TRIGGER_KW, UNIQUE_KW, VIEW_KW, VIRTUAL_KW],
                )
            });
        }
    };
    rule(p, depth)
}

fn if_not_exists(p: &mut Parser<'_>, state: &ParseState) -> Step {
    if p.eat(IF_KW) {
        p.expect_seq(state, &[NOT_KW, EXISTS_KW])?;
    }
    Ok(())
}

/// True when the current token is the bare word `word`, which SQLite
/// recognises by text rather than as a keyword (`ROWID`, `STRICT`).
fn at_word(p: &Parser<'_>, word: &str) -> bool {
    p.at(IDENTIFIER) && p.nth_text(0).eq_ignore_ascii_case(word)
}

// ==================== CREATE TABLE ====================

/// `CREATE TEMP? TABLE (IF NOT EXISTS)? name ('(' elements ')' options | AS select)`
fn create_table(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(CREATE_TABLE_STATEMENT, depth, |p, state, depth| {
        p.bump();
        p.eat_any(&[TEMP_KW, TEMPORARY_KW]);
        p.bump();
        state.commit();
        if_not_exists(p, state)?;
        qualified_name(p, state, TABLE_DEFINITION_NAME, "<table name>")?;
        if p.eat(AS_KW) {
            return subquery_body(p, depth).require(p, state, "<select statement>");
        }
        p.expect_any(state, &[AS_KW, L_PAREN])?;
        column_definition(p, depth).require(p, state, "<column definition name>")?;
        while p.eat(COMMA) {
            p.first_of(depth, &[table_constraint, column_definition])
                .require(p, state, "<column definition name>")?;
        }
        p.recover_until(subquery_sync);
        p.expect(state, R_PAREN)?;
        table_options(p)
    })
}

/// `(WITHOUT ROWID | STRICT) (',' (WITHOUT ROWID | STRICT))*`
fn table_options(p: &mut Parser<'_>) -> Step {
    if !p.at(WITHOUT_KW) && !at_word(p, "strict") {
        return Ok(());
    }
    loop {
        if p.eat(WITHOUT_KW) {
            if !at_word(p, "rowid") {
                p.error_expected("ROWID");
                return Err(Missing);
            }
            p.bump();
        } else if at_word(p, "strict") {
            p.bump();
        } else {
            p.error_expected("WITHOUT");
            p.error_expected("STRICT");
            return Err(Missing);
        }
        if !p.eat(COMMA) {
            return Ok(());
        }
    }
}

/// `name type_name? column_constraint*`
fn column_definition(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !is_name(p.current()) {
        return MatchResult::NotMatched;
    }
    p.rule(COLUMN_DEFINITION, depth, |p, state, depth| {
        expect_name(p, state, COLUMN_DEFINITION_NAME, "<column definition name>")?;
        state.commit();
        type_name(p, depth);
        while column_constraint(p, depth).is_matched() {}
        Ok(())
    })
}

/// `name+ ('(' signed_number (',' signed_number)? ')')?`
pub(super) fn type_name(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !is_name(p.current()) {
        return MatchResult::NotMatched;
    }
    p.rule(TYPE_NAME, depth, |p, state, depth| {
        while is_name(p.current()) {
            p.bump();
        }
        state.commit();
        if p.eat(L_PAREN) {
            signed_number(p, depth).require(p, state, "<number>")?;
            if p.eat(COMMA) {
                signed_number(p, depth).require(p, state, "<number>")?;
            }
            p.expect(state, R_PAREN)?;
        }
        Ok(())
    })
}

/// `('+' | '-')? number`
pub(super) fn signed_number(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    let signed = p.at_any(&[PLUS, MINUS]);
    if p.nth(usize::from(signed)) != NUMERIC_LITERAL {
        return MatchResult::NotMatched;
    }
    p.rule(SIGNED_NUMBER, depth, |p, _, _| {
        p.eat_any(&[PLUS, MINUS]);
        p.bump();
        Ok(())
    })
}

fn column_constraint(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at_any(&[
        CONSTRAINT_KW,
        PRIMARY_KW,
        NOT_KW,
        NULL_KW,
        UNIQUE_KW,
        CHECK_KW,
        DEFAULT_KW,
        COLLATE_KW,
        REFERENCES_KW,
    ]) {
        return MatchResult::NotMatched;
    }
    p.rule(COLUMN_CONSTRAINT, depth, |p, state, depth| {
        if p.eat(CONSTRAINT_KW) {
            state.commit();
            expect_name(p, state, CONSTRAINT_NAME, "<constraint name>")?;
        }
        match p.current() {
            PRIMARY_KW => {
                p.bump();
                state.commit();
                p.expect(state, KEY_KW)?;
                p.eat_any(&[ASC_KW, DESC_KW]);
                conflict_clause(p, depth);
                p.eat(AUTOINCREMENT_KW);
                Ok(())
            }
            NOT_KW => {
                p.bump();
                state.commit();
                p.expect(state, NULL_KW)?;
                conflict_clause(p, depth);
                Ok(())
            }
            NULL_KW => {
                p.bump();
                Ok(())
            }
            UNIQUE_KW => {
                p.bump();
                state.commit();
                conflict_clause(p, depth);
                Ok(())
            }
            CHECK_KW => {
                p.bump();
                state.commit();
                parenthesized_expression(p, state, depth)
            }
            DEFAULT_KW => {
                p.bump();
                state.commit();
                default_value(p, state, depth)
            }
            COLLATE_KW => {
                p.bump();
                state.commit();
                expect_name(p, state, COLLATION_NAME, "<collation name>")
            }
            REFERENCES_KW => foreign_key_clause(p, depth).require(p, state, "REFERENCES"),
            _ => p.expect_any(
                state,
                &[
                    CHECK_KW,
                    COLLATE_KW,
                    DEFAULT_KW,
                    NOT_KW,
                    NULL_KW,
                    PRIMARY_KW,
                    REFERENCES_KW,
                    UNIQUE_KW,
                ],
            ),
        }
    })
}

fn parenthesized_expression(p: &mut Parser<'_>, state: &ParseState, depth: Depth) -> Step {
    p.expect(state, L_PAREN)?;
    expression(p, depth).require(p, state, "<expression>")?;
    p.expect(state, R_PAREN)
}

/// `signed_number | literal | '(' expr ')' | name`
fn default_value(p: &mut Parser<'_>, state: &ParseState, depth: Depth) -> Step {
    if signed_number(p, depth).is_matched() || literal(p, depth).is_matched() {
        return Ok(());
    }
    if p.at(L_PAREN) {
        return parenthesized_expression(p, state, depth);
    }
    if is_name(p.current()) {
        p.bump();
        return Ok(());
    }
    p.error_expected("<default value>");
    Err(Missing)
}

/// `ON CONFLICT (ROLLBACK | ABORT | FAIL | IGNORE | REPLACE)`
fn conflict_clause(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at_seq(&[ON_KW, CONFLICT_KW]) {
        return MatchResult::NotMatched;
    }
    p.rule(CONFLICT_CLAUSE, depth, |p, state, _| {
        p.bump();
        p.bump();
        state.commit();
        p.expect_any(
            state,
            &[ABORT_KW, FAIL_KW, IGNORE_KW, REPLACE_KW, ROLLBACK_KW],
        )
    })
}

/// `REFERENCES table columns? action* deferrable?`
fn foreign_key_clause(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(REFERENCES_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(FOREIGN_KEY_CLAUSE, depth, |p, state, _| {
        p.bump();
        state.commit();
        expect_name(p, state, DEFINED_TABLE_NAME, "<table name>")?;
        if p.at(L_PAREN) {
            name_list(p, state, COLUMN_NAME, "<column name>")?;
        }
        loop {
            if p.eat_seq(&[ON_KW, DELETE_KW]) || p.eat_seq(&[ON_KW, UPDATE_KW]) {
                foreign_key_action(p, state)?;
            } else if p.eat(MATCH_KW) {
                if !is_name(p.current()) {
                    p.error_expected("<name>");
                    return Err(Missing);
                }
                p.bump();
            } else {
                break;
            }
        }
        if p.at(DEFERRABLE_KW) || p.at_seq(&[NOT_KW, DEFERRABLE_KW]) {
            p.eat(NOT_KW);
            p.bump();
            if p.eat(INITIALLY_KW) {
                p.expect_any(state, &[DEFERRED_KW, IMMEDIATE_KW])?;
            }
        }
        Ok(())
    })
}

/// `SET NULL | SET DEFAULT | CASCADE | RESTRICT | NO ACTION`
fn foreign_key_action(p: &mut Parser<'_>, state: &ParseState) -> Step {
    if p.eat(SET_KW) {
        return p.expect_any(state, &[NULL_KW, DEFAULT_KW]);
    }
    if p.eat(NO_KW) {
        return p.expect(state, ACTION_KW);
    }
    p.expect_any(state, &[CASCADE_KW, NO_KW, RESTRICT_KW, SET_KW])
}

fn table_constraint(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at_any(&[CONSTRAINT_KW, PRIMARY_KW, UNIQUE_KW, CHECK_KW, FOREIGN_KW]) {
        return MatchResult::NotMatched;
    }
    p.rule(TABLE_CONSTRAINT, depth, |p, state, depth| {
        if p.eat(CONSTRAINT_KW) {
            state.commit();
            expect_name(p, state, CONSTRAINT_NAME, "<constraint name>")?;
        }
        match p.current() {
            PRIMARY_KW | UNIQUE_KW => {
                if p.eat(PRIMARY_KW) {
                    state.commit();
                    p.expect(state, KEY_KW)?;
                } else {
                    p.bump();
                    state.commit();
                }
                indexed_columns(p, state, depth)?;
                conflict_clause(p, depth);
                Ok(())
            }
            CHECK_KW => {
                p.bump();
                state.commit();
                parenthesized_expression(p, state, depth)
            }
            FOREIGN_KW => {
                p.bump();
                state.commit();
                p.expect(state, KEY_KW)?;
                name_list(p, state, COLUMN_NAME, "<column name>")?;
                foreign_key_clause(p, depth).require(p, state, "REFERENCES")
            }
            _ => p.expect_any(state, &[CHECK_KW, FOREIGN_KW, PRIMARY_KW, UNIQUE_KW]),
        }
    })
}

fn indexed_columns(p: &mut Parser<'_>, state: &ParseState, depth: Depth) -> Step {
    p.expect(state, L_PAREN)?;
    p.comma_list(state, depth, "<column name>", indexed_column)?;
    p.expect(state, R_PAREN)
}

/// `column (COLLATE collation)? (ASC | DESC)?`
fn indexed_column(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !is_name(p.current()) {
        return MatchResult::NotMatched;
    }
    p.rule(INDEXED_COLUMN, depth, |p, state, _| {
        expect_name(p, state, COLUMN_NAME, "<column name>")?;
        state.commit();
        if p.eat(COLLATE_KW) {
            expect_name(p, state, COLLATION_NAME, "<collation name>")?;
        }
        p.eat_any(&[ASC_KW, DESC_KW]);
        Ok(())
    })
}

// ==================== CREATE INDEX / VIEW ====================

/// `CREATE UNIQUE? INDEX (IF NOT EXISTS)? name ON table '(' columns ')' (WHERE expr)?`
fn create_index(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(CREATE_INDEX_STATEMENT, depth, |p, state, depth| {
        p.bump();
        p.eat(UNIQUE_KW);
        state.commit();
        p.expect(state, INDEX_KW)?;
        if_not_exists(p, state)?;
        qualified_name(p, state, INDEX_NAME, "<index name>")?;
        p.expect(state, ON_KW)?;
        expect_name(p, state, DEFINED_TABLE_NAME, "<table name>")?;
        indexed_columns(p, state, depth)?;
        if p.eat(WHERE_KW) {
            expression(p, depth).require(p, state, "<expression>")?;
        }
        Ok(())
    })
}

/// `CREATE TEMP? VIEW (IF NOT EXISTS)? name ('(' columns ')')? AS select`
fn create_view(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(CREATE_VIEW_STATEMENT, depth, |p, state, depth| {
        p.bump();
        p.eat_any(&[TEMP_KW, TEMPORARY_KW]);
        p.bump();
        state.commit();
        if_not_exists(p, state)?;
        qualified_name(p, state, VIEW_NAME, "<view name>")?;
        if p.at(L_PAREN) {
            name_list(p, state, COLUMN_DEFINITION_NAME, "<column definition name>")?;
        }
        p.expect(state, AS_KW)?;
        subquery_body(p, depth).require(p, state, "<select statement>")
    })
}

// ==================== CREATE TRIGGER ====================

/// `CREATE TEMP? TRIGGER (IF NOT EXISTS)? name timing? event ON table
/// (FOR EACH ROW)? (WHEN expr)? BEGIN body END`
fn create_trigger(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(CREATE_TRIGGER_STATEMENT, depth, |p, state, depth| {
        p.bump();
        p.eat_any(&[TEMP_KW, TEMPORARY_KW]);
        p.bump();
        state.commit();
        if_not_exists(p, state)?;
        qualified_name(p, state, TRIGGER_NAME, "<trigger name>")?;
        if p.eat(INSTEAD_KW) {
            p.expect(state, OF_KW)?;
        } else {
            p.eat_any(&[BEFORE_KW, AFTER_KW]);
        }
        trigger_event(p, state)?;
        p.expect(state, ON_KW)?;
        qualified_name(p, state, DEFINED_TABLE_NAME, "<table name>")?;
        if p.eat(FOR_KW) {
            p.expect_seq(state, &[EACH_KW, ROW_KW])?;
        }
        if p.eat(WHEN_KW) {
            expression(p, depth).require(p, state, "<expression>")?;
        }
        p.expect(state, BEGIN_KW)?;
        trigger_body(p, depth).require(p, state, "<statement>")?;
        p.expect(state, END_KW)
    })
}

/// `DELETE | INSERT | UPDATE (OF column (',' column)*)?`
fn trigger_event(p: &mut Parser<'_>, state: &ParseState) -> Step {
    if p.eat(UPDATE_KW) {
        if p.eat(OF_KW) {
            expect_name(p, state, COLUMN_NAME, "<column name>")?;
            while p.eat(COMMA) {
                expect_name(p, state, COLUMN_NAME, "<column name>")?;
            }
        }
        return Ok(());
    }
    p.expect_any(state, &[DELETE_KW, INSERT_KW, UPDATE_KW])
}

/// `(with_clause? statement ';')+` up to `END`.
///
/// A bad body statement is skipped up to its `;` or the `END`, so the
/// trigger still closes where it should.
fn trigger_body(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    const STATEMENTS: &[Rule] = &[
        update_statement,
        insert_statement,
        delete_statement,
        select_statement,
        with_statement,
    ];
    p.rule(TRIGGER_BODY, depth, |p, state, depth| loop {
        let missing = p.first_of(depth, STATEMENTS).is_not_matched();
        if missing {
            if !state.is_committed() && (p.at(END_KW) || p.at_eof()) {
                return Err(Missing);
            }
            p.error_expected("<statement>");
            p.recover_until(at_end);
        }
        state.commit();
        if missing && p.at(END_KW) {
            return Ok(());
        }
        if !p.eat(SEMICOLON) {
            p.error_expected(SEMICOLON.describe());
            p.recover_until(at_end);
            if !p.eat(SEMICOLON) {
                return Ok(());
            }
        }
        if p.at(END_KW) || p.at_eof() {
            return Ok(());
        }
    })
}

const fn at_end(kind: SyntaxKind) -> bool {
    matches!(kind, END_KW)
}

// ==================== CREATE VIRTUAL TABLE ====================

/// `CREATE VIRTUAL TABLE (IF NOT EXISTS)? name USING module ('(' args ')')?`
fn create_virtual_table(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(CREATE_VIRTUAL_TABLE_STATEMENT, depth, |p, state, depth| {
        p.bump();
        p.bump();
        state.commit();
        p.expect(state, TABLE_KW)?;
        if_not_exists(p, state)?;
        qualified_name(p, state, TABLE_DEFINITION_NAME, "<table name>")?;
        p.expect(state, USING_KW)?;
        expect_name(p, state, MODULE_NAME, "<module name>")?;
        if p.eat(L_PAREN) {
            module_argument(p, depth);
            while p.eat(COMMA) {
                module_argument(p, depth);
            }
            p.expect(state, R_PAREN)?;
        }
        Ok(())
    })
}

/// Any tokens up to the next top-level `,` or `)`, with nested parens kept
/// balanced. The module interprets them, not SQLite.
fn module_argument(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(MODULE_ARGUMENT, depth, |p, _, _| {
        let mut nesting = 0_usize;
        loop {
            match p.current() {
                EOF | SEMICOLON => break,
                COMMA | R_PAREN if nesting == 0 => break,
                L_PAREN => nesting += 1,
                R_PAREN => nesting -= 1,
                _ => {}
            }
            p.bump();
        }
        Ok(())
    })
}

// ==================== ALTER / DROP ====================

/// `ALTER TABLE table (RENAME TO name | RENAME COLUMN? a TO b | ADD COLUMN? def | DROP COLUMN? name)`
pub(super) fn alter_table(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(ALTER_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(ALTER_TABLE_STATEMENT, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.expect(state, TABLE_KW)?;
        qualified_name(p, state, DEFINED_TABLE_NAME, "<table name>")?;
        match p.current() {
            RENAME_KW => {
                p.bump();
                if p.eat(TO_KW) {
                    return expect_name(p, state, TABLE_DEFINITION_NAME, "<table name>");
                }
                p.eat(COLUMN_KW);
                expect_name(p, state, COLUMN_NAME, "<column name>")?;
                p.expect(state, TO_KW)?;
                expect_name(p, state, COLUMN_DEFINITION_NAME, "<column definition name>")
            }
            ADD_KW => {
                p.bump();
                p.eat(COLUMN_KW);
                column_definition(p, depth).require(p, state, "<column definition name>")
            }
            DROP_KW => {
                p.bump();
                p.eat(COLUMN_KW);
                expect_name(p, state, COLUMN_NAME, "<column name>")
            }
            _ => p.expect_any(state, &[ADD_KW, DROP_KW, RENAME_KW]),
        }
    })
}

/// `DROP (INDEX | TABLE | TRIGGER | VIEW) (IF EXISTS)? name`
pub(super) fn drop_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(DROP_KW) {
        return MatchResult::NotMatched;
    }
    let (kind, name, what): (SyntaxKind, SyntaxKind, &str) = match p.nth(1) {
        TABLE_KW => (DROP_TABLE_STATEMENT, DEFINED_TABLE_NAME, "<table name>"),
        INDEX_KW => (DROP_INDEX_STATEMENT, INDEX_NAME, "<index name>"),
        TRIGGER_KW => (DROP_TRIGGER_STATEMENT, TRIGGER_NAME, "<trigger name>"),
        VIEW_KW => (DROP_VIEW_STATEMENT, VIEW_NAME, "<view name>"),
        _ => {
            return p.rule(ERROR, depth, |p, state, _| {
                p.bump();
                state.commit();
                p.expect_any(state, &[INDEX_KW, TABLE_KW, TRIGGER_KW, VIEW_KW])
            });
        }
    };
    p.rule(kind, depth, |p, state, _| {
        p.bump();
        p.bump();
        state.commit();
        if p.eat(IF_KW) {
            p.expect(state, EXISTS_KW)?;
        }
        qualified_name(p, state, name, what)
    })
}
