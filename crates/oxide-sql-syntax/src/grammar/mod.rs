//! The SQLite grammar.
//!
//! Each production is a function `fn(&mut Parser, Depth) -> MatchResult`
//! that rejects on its first token before opening a node, then runs its
//! body through [`Parser::rule`]. Statements are dispatched on their
//! leading keyword.

mod admin;
mod ddl;
mod dml;
mod expressions;
mod names;
mod select;

use tracing::trace;

use admin::{
    analyze_statement, attach_statement, begin_statement, commit_statement, detach_statement,
    pragma_statement, reindex_statement, release_statement, rollback_statement,
    savepoint_statement, vacuum_statement,
};
use ddl::{alter_table, create_statement, drop_statement};
use dml::{delete_statement, insert_statement, update_statement};
use select::{select_statement, with_clause};

#[allow(clippy::enum_glob_use)]
use crate::SyntaxKind::*;
use crate::parser::{Depth, MatchResult, Missing, Parser, Rule};

/// `FILE`: every statement of the input, separated by `;`.
///
/// Always produces the root node, even for empty input.
pub(crate) fn file(p: &mut Parser<'_>) {
    p.node(FILE, statement_list);
}

/// `statement? (';' statement?)*`
fn statement_list(p: &mut Parser<'_>) {
    loop {
        if !p.at(SEMICOLON) && !p.at_eof() {
            statement_or_recover(p);
        }
        if !p.eat(SEMICOLON) {
            break;
        }
    }
}

/// One statement, with anything left before the next `;` wrapped in an
/// `ERROR` node.
fn statement_or_recover(p: &mut Parser<'_>) {
    if statement(p, Depth::ROOT).is_not_matched() {
        p.error_expected("<statement>");
        p.recover_statement();
        return;
    }
    if p.at(SEMICOLON) || p.at_eof() {
        return;
    }
    if !p.reported_here() {
        p.error_expected("';'");
    }
    p.recover_statement();
}

/// `(EXPLAIN (QUERY PLAN)?)? statement`
fn statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(EXPLAIN_KW) {
        return statement_body(p, depth);
    }
    p.rule(EXPLAIN_STATEMENT, depth, |p, state, depth| {
        p.bump();
        state.commit();
        if p.eat(QUERY_KW) {
            p.expect(state, PLAN_KW)?;
        }
        statement_body(p, depth).require(p, state, "<statement>")
    })
}

fn statement_body(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    let rule: Rule = match p.current() {
        ALTER_KW => alter_table,
        ANALYZE_KW => analyze_statement,
        ATTACH_KW => attach_statement,
        BEGIN_KW => begin_statement,
        COMMIT_KW | END_KW => commit_statement,
        CREATE_KW => create_statement,
        DELETE_KW => delete_statement,
        DETACH_KW => detach_statement,
        DROP_KW => drop_statement,
        INSERT_KW | REPLACE_KW => insert_statement,
        PRAGMA_KW => pragma_statement,
        REINDEX_KW => reindex_statement,
        RELEASE_KW => release_statement,
        ROLLBACK_KW => rollback_statement,
        SAVEPOINT_KW => savepoint_statement,
        SELECT_KW | VALUES_KW => select_statement,
        UPDATE_KW => update_statement,
        VACUUM_KW => vacuum_statement,
        WITH_KW => with_statement,
        _ => return MatchResult::NotMatched,
    };
    trace!(keyword = ?p.current(), "statement");
    rule(p, depth)
}

/// `with_clause (select | delete | insert | update)`
pub(super) fn with_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(WITH_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(WITH_CLAUSE_STATEMENT, depth, |p, state, depth| {
        with_clause(p, depth).require(p, state, "WITH")?;
        state.commit();
        let body = p.first_of(
            depth,
            &[
                select_statement,
                delete_statement,
                insert_statement,
                update_statement,
            ],
        );
        if body.is_not_matched() {
            for what in ["DELETE", "INSERT", "REPLACE", "SELECT", "UPDATE", "VALUES"] {
                p.error_expected(what);
            }
            return Err(Missing);
        }
        Ok(())
    })
}
