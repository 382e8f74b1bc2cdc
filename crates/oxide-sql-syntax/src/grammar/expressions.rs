//! Expressions.
//!
//! An expression is one atom followed by any number of operators from the
//! priority table in [`crate::parser::pratt`]. Binary and postfix nodes are
//! built by wrapping the finished left operand, so the tree keeps the
//! children in source order: `[left, operator, right]`.

use tracing::trace;

use super::ddl::type_name;
use super::names::{expect_name, qualified_name};
use super::select::parenthesized_select;
#[allow(clippy::enum_glob_use)]
use crate::SyntaxKind::*;
use crate::parser::lookahead::{at_subquery, is_identifier, is_literal, subquery_sync};
use crate::parser::pratt::{
    Fixity, Infix, LOWEST_PRIORITY, TIERS, UNARY_PRIORITY, infix_operator, is_unary_operator,
};
use crate::parser::{Depth, MatchResult, Missing, ParseState, Parser, Rule, Step};

pub(super) fn expression(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    expression_above(p, depth, LOWEST_PRIORITY)
}

/// An expression whose operators all bind tighter than `min_priority`.
fn expression_above(p: &mut Parser<'_>, depth: Depth, min_priority: u8) -> MatchResult {
    let mut lhs = p.next_node();
    let mut result = atom(p, depth);
    if result.is_not_matched() {
        return result;
    }

    while let Some(op) = infix_operator(p.current(), p.nth(1)) {
        if !op.binds_above(min_priority) {
            break;
        }
        let (wrapped, outcome) = p.wrap(lhs, op.kind(), |p, state| {
            operator(p, state, depth.deeper(), op)
        });
        lhs = wrapped;
        if outcome == MatchResult::Pinned {
            result = MatchResult::Pinned;
        }
    }
    result
}

/// A mandatory operand bound at `priority`.
fn operand(p: &mut Parser<'_>, state: &ParseState, depth: Depth, priority: u8) -> Step {
    expression_above(p, depth, priority).require(p, state, "<expression>")
}

fn required(p: &mut Parser<'_>, state: &ParseState, depth: Depth) -> Step {
    expression(p, depth).require(p, state, "<expression>")
}

/// Everything after the left operand of `op`.
fn operator(p: &mut Parser<'_>, state: &ParseState, depth: Depth, op: Infix) -> Step {
    let priority = op.priority();
    match op {
        Infix::In => {
            p.eat(NOT_KW);
            p.bump();
            in_target(p, state, depth)
        }
        Infix::IsNull => {
            if p.eat(NOT_KW) {
                p.expect(state, NULL_KW)
            } else {
                p.bump();
                Ok(())
            }
        }
        Infix::Like => {
            p.eat(NOT_KW);
            p.bump();
            operand(p, state, depth, priority)?;
            if p.eat(ESCAPE_KW) {
                operand(p, state, depth, priority)?;
            }
            Ok(())
        }
        Infix::Between => {
            p.eat(NOT_KW);
            p.bump();
            operand(p, state, depth, priority)?;
            p.expect(state, AND_KW)?;
            operand(p, state, depth, priority)
        }
        Infix::Equivalence => {
            if p.eat(IS_KW) {
                p.eat(NOT_KW);
            } else {
                p.bump();
            }
            operand(p, state, depth, priority)
        }
        Infix::Collate => {
            p.bump();
            expect_name(p, state, COLLATION_NAME, "<collation name>")
        }
        Infix::Or
        | Infix::And
        | Infix::Comparison
        | Infix::Bit
        | Infix::Add
        | Infix::Mul
        | Infix::Concat => {
            p.bump();
            operand(p, state, depth, priority)
        }
    }
}

/// `IN (select)`, `IN (expr, ...)`, `IN ()` or `IN table`.
fn in_target(p: &mut Parser<'_>, state: &ParseState, depth: Depth) -> Step {
    if at_subquery(p) {
        let mut inner = *state;
        return parenthesized_select(p, &mut inner, depth);
    }
    if p.eat(L_PAREN) {
        if !p.at(R_PAREN) {
            p.comma_list(state, depth, "<expression>", expression)?;
        }
        p.recover_until(subquery_sync);
        return p.expect(state, R_PAREN);
    }
    qualified_name(p, state, DEFINED_TABLE_NAME, "<table name>")
}

// ==================== Atoms ====================

/// The first atom tier that matches, in table order.
fn atom(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    for tier in &TIERS {
        if !matches!(tier.fixity, Fixity::Atom | Fixity::Prefix) {
            continue;
        }
        let rule: Rule = match tier.kinds.first().copied() {
            Some(RAISE_FUNCTION_EXPRESSION) => raise,
            Some(CASE_EXPRESSION) => case,
            Some(EXISTS_EXPRESSION) => exists,
            Some(CAST_EXPRESSION) => cast,
            Some(PAREN_EXPRESSION) => paren,
            Some(FUNCTION_CALL_EXPRESSION) => function_call,
            Some(UNARY_EXPRESSION) => unary,
            Some(COLUMN_REF_EXPRESSION) => column_ref,
            Some(LITERAL_EXPRESSION) => literal,
            _ => continue,
        };
        let result = rule(p, depth);
        if result.is_matched() {
            trace!(tier = tier.name, "atom");
            return result;
        }
    }
    MatchResult::NotMatched
}

/// `RAISE '(' (IGNORE | (ROLLBACK | ABORT | FAIL) ',' message) ')'`
fn raise(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(RAISE_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(RAISE_FUNCTION_EXPRESSION, depth, |p, state, _| {
        p.bump();
        state.commit();
        p.expect(state, L_PAREN)?;
        let ignore = p.at(IGNORE_KW);
        p.expect_any(state, &[IGNORE_KW, ROLLBACK_KW, ABORT_KW, FAIL_KW])?;
        if !ignore {
            p.expect(state, COMMA)?;
            if p.at(SINGLE_QUOTE_STRING_LITERAL) {
                p.bump_as(ERROR_MESSAGE);
            } else {
                p.error_expected("<error message>");
                return Err(Missing);
            }
        }
        p.expect(state, R_PAREN)
    })
}

/// `CASE base? (WHEN expr THEN expr)+ (ELSE expr)? END`
fn case(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(CASE_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(CASE_EXPRESSION, depth, |p, state, depth| {
        p.bump();
        state.commit();
        if !p.at(WHEN_KW) {
            expression(p, depth);
        }
        p.expect(state, WHEN_KW)?;
        loop {
            required(p, state, depth)?;
            p.expect(state, THEN_KW)?;
            required(p, state, depth)?;
            if !p.eat(WHEN_KW) {
                break;
            }
        }
        if p.eat(ELSE_KW) {
            required(p, state, depth)?;
        }
        p.expect(state, END_KW)
    })
}

/// `NOT? EXISTS (select)`, or a bare `(select)` used as a scalar.
fn exists(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if p.at(EXISTS_KW) || p.at_seq(&[NOT_KW, EXISTS_KW]) {
        return p.rule(EXISTS_EXPRESSION, depth, |p, state, depth| {
            p.eat(NOT_KW);
            p.bump();
            state.commit();
            parenthesized_select(p, state, depth)
        });
    }
    if at_subquery(p) {
        return p.rule(SUBQUERY_EXPRESSION, depth, parenthesized_select);
    }
    MatchResult::NotMatched
}

/// `CAST '(' expr AS type_name ')'`
fn cast(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(CAST_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(CAST_EXPRESSION, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.expect(state, L_PAREN)?;
        required(p, state, depth)?;
        p.expect(state, AS_KW)?;
        type_name(p, depth).require(p, state, "<type name>")?;
        p.expect(state, R_PAREN)
    })
}

/// `'(' expr (',' expr)* ')'`: grouping, or a row value.
fn paren(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(L_PAREN) {
        return MatchResult::NotMatched;
    }
    p.rule(PAREN_EXPRESSION, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.comma_list(state, depth, "<expression>", expression)?;
        p.expect(state, R_PAREN)
    })
}

/// `name '(' (DISTINCT? expr (',' expr)* | '*')? ')'`
fn function_call(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !is_identifier(p.current()) || p.nth(1) != L_PAREN {
        return MatchResult::NotMatched;
    }
    p.rule(FUNCTION_CALL_EXPRESSION, depth, |p, state, depth| {
        p.bump_as(FUNCTION_NAME);
        p.bump();
        state.commit();
        if !p.eat(STAR) && !p.at(R_PAREN) {
            p.eat(DISTINCT_KW);
            p.comma_list(state, depth, "<expression>", expression)?;
        }
        p.expect(state, R_PAREN)
    })
}

/// `('-' | '+' | '~' | NOT) expr`
fn unary(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !is_unary_operator(p.current()) {
        return MatchResult::NotMatched;
    }
    p.rule(UNARY_EXPRESSION, depth, |p, state, depth| {
        p.bump();
        state.commit();
        operand(p, state, depth, UNARY_PRIORITY)
    })
}

/// `((database '.')? table '.')? column`
fn column_ref(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !is_identifier(p.current()) {
        return MatchResult::NotMatched;
    }
    p.rule(COLUMN_REF_EXPRESSION, depth, |p, state, _| {
        if p.nth(1) == DOT && p.nth(3) == DOT {
            p.bump_as(DATABASE_NAME);
            p.bump();
            state.commit();
        }
        if p.nth(1) == DOT {
            expect_name(p, state, SELECTED_TABLE_NAME, "<table name>")?;
            p.bump();
            state.commit();
        }
        expect_name(p, state, COLUMN_NAME, "<column name>")
    })
}

/// Numbers, strings, blobs, `NULL`, `CURRENT_*` and bind parameters.
///
/// A double-quoted string is a literal unless a `.` follows, where it can
/// only be a table or database name.
pub(super) fn literal(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !is_literal(p.current()) || p.at_seq(&[DOUBLE_QUOTE_STRING_LITERAL, DOT]) {
        return MatchResult::NotMatched;
    }
    p.rule(LITERAL_EXPRESSION, depth, |p, _, _| {
        if p.at_any(&[NUMBERED_PARAMETER, NAMED_PARAMETER]) {
            p.bump_as(BIND_PARAMETER);
        } else {
            p.bump();
        }
        Ok(())
    })
}
