//! Transaction control, attachments, pragmas and maintenance statements.

use super::ddl::signed_number;
use super::expressions::expression;
use super::names::{expect_name, qualified_name};
#[allow(clippy::enum_glob_use)]
use crate::SyntaxKind::*;
use crate::parser::lookahead::is_name;
use crate::parser::{Depth, MatchResult, Missing, Parser};

/// `ANALYZE (name ('.' name)?)?`
pub(super) fn analyze_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(ANALYZE_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(ANALYZE_STATEMENT, depth, |p, state, _| {
        p.bump();
        state.commit();
        if is_name(p.current()) {
            qualified_name(p, state, DEFINED_TABLE_NAME, "<table name>")?;
        }
        Ok(())
    })
}

/// `ATTACH DATABASE? expr AS name`
pub(super) fn attach_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(ATTACH_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(ATTACH_STATEMENT, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.eat(DATABASE_KW);
        expression(p, depth).require(p, state, "<expression>")?;
        p.expect(state, AS_KW)?;
        expect_name(p, state, DATABASE_NAME, "<database name>")
    })
}

/// `DETACH DATABASE? name`
pub(super) fn detach_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(DETACH_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(DETACH_STATEMENT, depth, |p, state, _| {
        p.bump();
        state.commit();
        p.eat(DATABASE_KW);
        expect_name(p, state, DATABASE_NAME, "<database name>")
    })
}

/// `BEGIN (DEFERRED | IMMEDIATE | EXCLUSIVE)? TRANSACTION?`
pub(super) fn begin_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(BEGIN_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(BEGIN_STATEMENT, depth, |p, _, _| {
        p.bump();
        p.eat_any(&[DEFERRED_KW, IMMEDIATE_KW, EXCLUSIVE_KW]);
        p.eat(TRANSACTION_KW);
        Ok(())
    })
}

/// `(COMMIT | END) TRANSACTION?`
pub(super) fn commit_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at_any(&[COMMIT_KW, END_KW]) {
        return MatchResult::NotMatched;
    }
    p.rule(COMMIT_STATEMENT, depth, |p, _, _| {
        p.bump();
        p.eat(TRANSACTION_KW);
        Ok(())
    })
}

/// `ROLLBACK TRANSACTION? (TO SAVEPOINT? name)?`
pub(super) fn rollback_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(ROLLBACK_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(ROLLBACK_STATEMENT, depth, |p, state, _| {
        p.bump();
        state.commit();
        p.eat(TRANSACTION_KW);
        if p.eat(TO_KW) {
            p.eat(SAVEPOINT_KW);
            expect_name(p, state, SAVEPOINT_NAME, "<savepoint name>")?;
        }
        Ok(())
    })
}

pub(super) fn savepoint_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(SAVEPOINT_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(SAVEPOINT_STATEMENT, depth, |p, state, _| {
        p.bump();
        state.commit();
        expect_name(p, state, SAVEPOINT_NAME, "<savepoint name>")
    })
}

/// `RELEASE SAVEPOINT? name`
pub(super) fn release_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(RELEASE_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(RELEASE_STATEMENT, depth, |p, state, _| {
        p.bump();
        state.commit();
        p.eat(SAVEPOINT_KW);
        expect_name(p, state, SAVEPOINT_NAME, "<savepoint name>")
    })
}

/// `PRAGMA (database '.')? name ('=' value | '(' value ')')?`
pub(super) fn pragma_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(PRAGMA_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(PRAGMA_STATEMENT, depth, |p, state, depth| {
        p.bump();
        state.commit();
        qualified_name(p, state, PRAGMA_NAME, "<pragma name>")?;
        if p.eat(EQ) {
            return pragma_value(p, depth).require(p, state, "<pragma value>");
        }
        if p.eat(L_PAREN) {
            pragma_value(p, depth).require(p, state, "<pragma value>")?;
            p.expect(state, R_PAREN)?;
        }
        Ok(())
    })
}

/// A number, a name, a string, or any keyword used as a flag (`ON`, `NO`,
/// `FULL`, ...).
fn pragma_value(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    let current = p.current();
    if !is_name(current) && !current.is_keyword() && !p.at_any(&[NUMERIC_LITERAL, PLUS, MINUS]) {
        return MatchResult::NotMatched;
    }
    p.rule(PRAGMA_VALUE, depth, |p, _, depth| {
        if signed_number(p, depth).is_matched() {
            return Ok(());
        }
        if is_name(p.current()) || p.current().is_keyword() {
            p.bump();
            return Ok(());
        }
        Err(Missing)
    })
}

/// `REINDEX (name ('.' name)?)?`
pub(super) fn reindex_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(REINDEX_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(REINDEX_STATEMENT, depth, |p, state, _| {
        p.bump();
        state.commit();
        if is_name(p.current()) {
            qualified_name(p, state, DEFINED_TABLE_NAME, "<table name>")?;
        }
        Ok(())
    })
}

/// `VACUUM name? (INTO expr)?`
pub(super) fn vacuum_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(VACUUM_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(VACUUM_STATEMENT, depth, |p, state, depth| {
        p.bump();
        state.commit();
        if is_name(p.current()) {
            p.bump_as(DATABASE_NAME);
        }
        if p.eat(INTO_KW) {
            expression(p, depth).require(p, state, "<expression>")?;
        }
        Ok(())
    })
}
