//! `INSERT`, `UPDATE` and `DELETE`.

use super::expressions::expression;
use super::names::{expect_name, name_list, qualified_name};
use super::select::{
    from_clause, indexed_by, limit_clause, order_clause, subquery_body, where_clause,
};
#[allow(clippy::enum_glob_use)]
use crate::SyntaxKind::*;
use crate::parser::lookahead::{at_subquery, is_name};
use crate::parser::{Depth, MatchResult, Missing, ParseState, Parser, Step};

const CONFLICT_RESOLUTIONS: &[crate::SyntaxKind] =
    &[ROLLBACK_KW, ABORT_KW, REPLACE_KW, FAIL_KW, IGNORE_KW];

/// `OR (ROLLBACK | ABORT | REPLACE | FAIL | IGNORE)` after `INSERT` or `UPDATE`.
fn or_conflict(p: &mut Parser<'_>, state: &ParseState) -> Step {
    if p.eat(OR_KW) {
        p.expect_any(state, CONFLICT_RESOLUTIONS)?;
    }
    Ok(())
}

/// `DELETE FROM qualified_table_name where? order? limit?`
pub(super) fn delete_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(DELETE_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(DELETE_STATEMENT, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.expect(state, FROM_KW)?;
        qualified_table_name(p, depth).require(p, state, "<table name>")?;
        where_clause(p, depth);
        order_clause(p, depth);
        limit_clause(p, depth);
        Ok(())
    })
}

/// `(INSERT (OR conflict)? | REPLACE) INTO table (AS alias)? columns? body`
pub(super) fn insert_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at_any(&[INSERT_KW, REPLACE_KW]) {
        return MatchResult::NotMatched;
    }
    p.rule(INSERT_STATEMENT, depth, |p, state, depth| {
        let insert = p.at(INSERT_KW);
        p.bump();
        state.commit();
        if insert {
            or_conflict(p, state)?;
        }
        p.expect(state, INTO_KW)?;
        qualified_name(p, state, DEFINED_TABLE_NAME, "<table name>")?;
        if p.eat(AS_KW) {
            expect_name(p, state, TABLE_ALIAS_NAME, "<table alias name>")?;
        }
        insert_columns(p, depth);
        if p.eat(DEFAULT_KW) {
            return p.expect(state, VALUES_KW);
        }
        if subquery_body(p, depth).is_not_matched() {
            p.error_expected("DEFAULT");
            p.error_expected("SELECT");
            p.error_expected("VALUES");
            return Err(Missing);
        }
        Ok(())
    })
}

fn insert_columns(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(L_PAREN) || at_subquery(p) {
        return MatchResult::NotMatched;
    }
    p.rule(INSERT_COLUMNS, depth, |p, state, _| {
        state.commit();
        name_list(p, state, COLUMN_NAME, "<column name>")
    })
}

/// `UPDATE (OR conflict)? qualified_table_name SET assignments from? where? order? limit?`
pub(super) fn update_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(UPDATE_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(UPDATE_STATEMENT, depth, |p, state, depth| {
        p.bump();
        state.commit();
        or_conflict(p, state)?;
        qualified_table_name(p, depth).require(p, state, "<table name>")?;
        p.expect(state, SET_KW)?;
        p.comma_list(state, depth, "<column name>", update_assignment)?;
        from_clause(p, depth);
        where_clause(p, depth);
        order_clause(p, depth);
        limit_clause(p, depth);
        Ok(())
    })
}

/// `column '=' expr` or `'(' column (',' column)* ')' '=' expr`
fn update_assignment(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    let list = p.at(L_PAREN);
    if !list && !is_name(p.current()) {
        return MatchResult::NotMatched;
    }
    p.rule(UPDATE_ASSIGNMENT, depth, |p, state, depth| {
        if list {
            name_list(p, state, COLUMN_NAME, "<column name>")?;
        } else {
            expect_name(p, state, COLUMN_NAME, "<column name>")?;
        }
        state.commit();
        p.expect(state, EQ)?;
        expression(p, depth).require(p, state, "<expression>")
    })
}

/// `(database '.')? table (AS alias)? (INDEXED BY index | NOT INDEXED)?`
///
/// Unlike a `FROM` item the alias needs `AS`.
fn qualified_table_name(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !is_name(p.current()) {
        return MatchResult::NotMatched;
    }
    p.rule(QUALIFIED_TABLE_NAME, depth, |p, state, depth| {
        qualified_name(p, state, DEFINED_TABLE_NAME, "<table name>")?;
        state.commit();
        if p.eat(AS_KW) {
            expect_name(p, state, TABLE_ALIAS_NAME, "<table alias name>")?;
        }
        indexed_by(p, depth);
        Ok(())
    })
}
