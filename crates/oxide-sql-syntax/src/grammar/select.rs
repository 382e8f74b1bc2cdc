//! `SELECT`, its clauses, and the `WITH` clause shared by all DML.

use super::expressions::expression;
use super::names::{alias, expect_name, name_list, qualified_name};
#[allow(clippy::enum_glob_use)]
use crate::SyntaxKind::*;
use crate::parser::lookahead::{at_subquery, is_name, subquery_sync, with_clause_sync};
use crate::parser::{Depth, MatchResult, ParseState, Parser, Step};

/// `select_core (compound_operator select_core)* order_clause? limit_clause?`
pub(super) fn select_statement(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at_any(&[SELECT_KW, VALUES_KW]) {
        return MatchResult::NotMatched;
    }
    p.rule(SELECT_STATEMENT, depth, |p, state, depth| {
        select_core(p, depth).require(p, state, "SELECT or VALUES")?;
        state.commit();
        while p.at_any(&[UNION_KW, INTERSECT_KW, EXCEPT_KW]) {
            p.node(COMPOUND_OPERATOR, |p| {
                p.bump();
                p.eat(ALL_KW);
            });
            select_core(p, depth).require(p, state, "SELECT or VALUES")?;
        }
        order_clause(p, depth);
        limit_clause(p, depth);
        Ok(())
    })
}

/// A select statement in parentheses or after `AS`, optionally led by its
/// own `WITH` clause.
pub(super) fn subquery_body(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(WITH_KW) {
        return select_statement(p, depth);
    }
    p.rule(WITH_CLAUSE_SELECT_STATEMENT, depth, |p, state, depth| {
        with_clause(p, depth).require(p, state, "WITH")?;
        state.commit();
        select_statement(p, depth).require(p, state, "<select statement>")
    })
}

/// `'(' subquery_body ')'`, skipping anything left over before the `)`.
pub(super) fn parenthesized_select(
    p: &mut Parser<'_>,
    state: &mut ParseState,
    depth: Depth,
) -> Step {
    p.expect(state, L_PAREN)?;
    state.commit();
    if subquery_body(p, depth).is_not_matched() {
        p.error_expected("<select statement>");
    }
    p.recover_until(subquery_sync);
    p.expect(state, R_PAREN)
}

fn select_core(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at_any(&[SELECT_KW, VALUES_KW]) {
        return MatchResult::NotMatched;
    }
    p.rule(SELECT_CORE, depth, |p, state, depth| {
        p.first_of(depth, &[select_core_select, select_core_values])
            .require(p, state, "SELECT or VALUES")
    })
}

/// `SELECT (DISTINCT | ALL)? result_columns from? where? group_by?`
fn select_core_select(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(SELECT_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(SELECT_CORE_SELECT, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.eat_any(&[DISTINCT_KW, ALL_KW]);
        result_columns(p, depth).require(p, state, "<result column>")?;
        from_clause(p, depth);
        where_clause(p, depth);
        group_by_clause(p, depth);
        Ok(())
    })
}

/// `VALUES values_row (',' values_row)*`
fn select_core_values(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(VALUES_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(SELECT_CORE_VALUES, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.comma_list(state, depth, "'('", values_row)
    })
}

fn values_row(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(L_PAREN) {
        return MatchResult::NotMatched;
    }
    p.rule(VALUES_ROW, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.comma_list(state, depth, "<expression>", expression)?;
        p.expect(state, R_PAREN)
    })
}

fn result_columns(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(RESULT_COLUMNS, depth, |p, state, depth| {
        result_column(p, depth).require(p, state, "<result column>")?;
        state.commit();
        while p.eat(COMMA) {
            result_column(p, depth).require(p, state, "<result column>")?;
        }
        Ok(())
    })
}

/// `'*'`, `table '.' '*'`, or `expr (AS? alias)?`
fn result_column(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if p.at(STAR) {
        return p.rule(RESULT_COLUMN, depth, |p, _, _| {
            p.bump();
            Ok(())
        });
    }
    if is_name(p.current()) && p.nth(1) == DOT && p.nth(2) == STAR {
        return p.rule(RESULT_COLUMN, depth, |p, _, _| {
            p.bump_as(SELECTED_TABLE_NAME);
            p.bump();
            p.bump();
            Ok(())
        });
    }
    p.rule(RESULT_COLUMN, depth, |p, state, depth| {
        expression(p, depth).require(p, state, "<expression>")?;
        state.commit();
        alias(p, state, COLUMN_ALIAS_NAME)
    })
}

// ==================== FROM ====================

/// `FROM join_source`
pub(super) fn from_clause(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(FROM_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(FROM_CLAUSE, depth, |p, state, depth| {
        p.bump();
        state.commit();
        join_source(p, state, depth)
    })
}

const fn is_join_operator_start(kind: crate::SyntaxKind) -> bool {
    matches!(
        kind,
        COMMA | NATURAL_KW | LEFT_KW | INNER_KW | CROSS_KW | JOIN_KW
    )
}

/// One `table_or_subquery`, or several joined into a `JOIN_CLAUSE`.
fn join_source(p: &mut Parser<'_>, state: &ParseState, depth: Depth) -> Step {
    let first = p.next_node();
    table_or_subquery(p, depth).require(p, state, "<table or subquery>")?;
    if !is_join_operator_start(p.current()) {
        return Ok(());
    }
    p.wrap(first, JOIN_CLAUSE, |p, state| {
        while is_join_operator_start(p.current()) {
            join_operator(p, depth).require(p, state, "JOIN")?;
            table_or_subquery(p, depth).require(p, state, "<table or subquery>")?;
            join_constraint(p, depth);
        }
        Ok(())
    });
    Ok(())
}

/// `','` or `NATURAL? (LEFT OUTER? | INNER | CROSS)? JOIN`
fn join_operator(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(JOIN_OPERATOR, depth, |p, state, _| {
        if p.eat(COMMA) {
            return Ok(());
        }
        p.eat(NATURAL_KW);
        if p.eat(LEFT_KW) {
            p.eat(OUTER_KW);
        } else {
            p.eat_any(&[INNER_KW, CROSS_KW]);
        }
        state.commit();
        p.expect(state, JOIN_KW)
    })
}

/// `ON expr` or `USING '(' column (',' column)* ')'`
fn join_constraint(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at_any(&[ON_KW, USING_KW]) {
        return MatchResult::NotMatched;
    }
    p.rule(JOIN_CONSTRAINT, depth, |p, state, depth| {
        let on = p.eat(ON_KW);
        if !on {
            p.bump();
        }
        state.commit();
        if on {
            expression(p, depth).require(p, state, "<expression>")
        } else {
            name_list(p, state, COLUMN_NAME, "<column name>")
        }
    })
}

/// A table, a subquery, or a parenthesised join, as a `FROM` item.
fn table_or_subquery(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if at_subquery(p) {
        return p.rule(TABLE_OR_SUBQUERY, depth, |p, state, depth| {
            select_subquery(p, depth).require(p, state, "<select statement>")?;
            state.commit();
            alias(p, state, TABLE_ALIAS_NAME)
        });
    }
    if p.at(L_PAREN) {
        return p.rule(TABLE_OR_SUBQUERY, depth, |p, state, depth| {
            p.bump();
            state.commit();
            join_source(p, state, depth)?;
            p.expect(state, R_PAREN)
        });
    }
    if !is_name(p.current()) {
        return MatchResult::NotMatched;
    }
    p.rule(TABLE_OR_SUBQUERY, depth, |p, state, depth| {
        from_table(p, depth).require(p, state, "<table name>")
    })
}

fn select_subquery(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(SELECT_SUBQUERY, depth, parenthesized_select)
}

/// `(database '.')? table (AS? alias)? (INDEXED BY index | NOT INDEXED)?`
fn from_table(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(FROM_TABLE, depth, |p, state, depth| {
        qualified_name(p, state, DEFINED_TABLE_NAME, "<table name>")?;
        state.commit();
        alias(p, state, TABLE_ALIAS_NAME)?;
        indexed_by(p, depth);
        Ok(())
    })
}

/// `INDEXED BY index` or `NOT INDEXED`
pub(super) fn indexed_by(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if p.at_seq(&[NOT_KW, INDEXED_KW]) {
        return p.rule(INDEXED_BY, depth, |p, _, _| {
            p.bump();
            p.bump();
            Ok(())
        });
    }
    if !p.at(INDEXED_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(INDEXED_BY, depth, |p, state, _| {
        p.bump();
        state.commit();
        p.expect(state, BY_KW)?;
        expect_name(p, state, INDEX_NAME, "<index name>")
    })
}

// ==================== Clauses ====================

pub(super) fn where_clause(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(WHERE_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(WHERE_CLAUSE, depth, |p, state, depth| {
        p.bump();
        state.commit();
        expression(p, depth).require(p, state, "<expression>")
    })
}

/// `GROUP BY expr (',' expr)* (HAVING expr)?`
fn group_by_clause(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(GROUP_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(GROUP_BY_CLAUSE, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.expect(state, BY_KW)?;
        p.comma_list(state, depth, "<expression>", expression)?;
        if p.eat(HAVING_KW) {
            expression(p, depth).require(p, state, "<expression>")?;
        }
        Ok(())
    })
}

/// `ORDER BY ordering_term (',' ordering_term)*`
pub(super) fn order_clause(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(ORDER_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(ORDER_CLAUSE, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.expect(state, BY_KW)?;
        p.comma_list(state, depth, "<expression>", ordering_term)
    })
}

/// `expr (ASC | DESC)?`. A `COLLATE` suffix is part of the expression.
fn ordering_term(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(ORDERING_TERM, depth, |p, state, depth| {
        expression(p, depth).require(p, state, "<expression>")?;
        p.eat_any(&[ASC_KW, DESC_KW]);
        Ok(())
    })
}

/// `LIMIT expr ((OFFSET | ',') expr)?`
pub(super) fn limit_clause(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(LIMIT_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(LIMIT_CLAUSE, depth, |p, state, depth| {
        p.bump();
        state.commit();
        expression(p, depth).require(p, state, "<expression>")?;
        if p.eat_any(&[OFFSET_KW, COMMA]) {
            expression(p, depth).require(p, state, "<expression>")?;
        }
        Ok(())
    })
}

// ==================== WITH ====================

/// `WITH RECURSIVE? with_clause_table (',' with_clause_table)*`
///
/// A broken table definition is skipped up to the statement the clause
/// belongs to, so that statement still parses.
pub(super) fn with_clause(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !p.at(WITH_KW) {
        return MatchResult::NotMatched;
    }
    p.rule(WITH_CLAUSE, depth, |p, state, depth| {
        p.bump();
        state.commit();
        p.eat(RECURSIVE_KW);
        loop {
            let table = with_clause_table(p, depth);
            if table.is_not_matched() {
                p.error_expected("<table definition name>");
            }
            if table != MatchResult::Matched {
                p.recover_until(with_clause_sync);
            }
            if !p.eat(COMMA) {
                break;
            }
        }
        Ok(())
    })
}

/// `with_clause_table_def AS '(' subquery_body ')'`
fn with_clause_table(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    if !is_name(p.current()) {
        return MatchResult::NotMatched;
    }
    p.rule(WITH_CLAUSE_TABLE, depth, |p, state, depth| {
        with_clause_table_def(p, depth).require(p, state, "<table definition name>")?;
        state.commit();
        p.expect(state, AS_KW)?;
        parenthesized_select(p, state, depth)
    })
}

/// `table ('(' column (',' column)* ')')?`
fn with_clause_table_def(p: &mut Parser<'_>, depth: Depth) -> MatchResult {
    p.rule(WITH_CLAUSE_TABLE_DEF, depth, |p, state, _| {
        expect_name(p, state, TABLE_DEFINITION_NAME, "<table definition name>")?;
        state.commit();
        if p.at(L_PAREN) {
            name_list(p, state, COLUMN_DEFINITION_NAME, "<column definition name>")?;
        }
        Ok(())
    })
}
