//! Names and dotted references.
//!
//! Every name is a single-token node whose kind records the role the name
//! plays (`DEFINED_TABLE_NAME`, `COLUMN_ALIAS_NAME`, ...).

use crate::SyntaxKind::{self, DATABASE_NAME, DOT};
use crate::parser::lookahead::is_name;
use crate::parser::{MatchResult, ParseState, Parser, Step};

/// A name in the role `kind`.
pub(super) fn name(p: &mut Parser<'_>, kind: SyntaxKind) -> MatchResult {
    if !is_name(p.current()) {
        return MatchResult::NotMatched;
    }
    p.bump_as(kind);
    MatchResult::Matched
}

/// A mandatory name, reported as `<what> expected` when missing.
pub(super) fn expect_name(
    p: &mut Parser<'_>,
    state: &ParseState,
    kind: SyntaxKind,
    what: &str,
) -> Step {
    name(p, kind).require(p, state, what)
}

/// `(database '.')? name`.
pub(super) fn qualified_name(
    p: &mut Parser<'_>,
    state: &ParseState,
    kind: SyntaxKind,
    what: &str,
) -> Step {
    if is_name(p.current()) && p.nth(1) == DOT {
        p.bump_as(DATABASE_NAME);
        p.bump();
    }
    expect_name(p, state, kind, what)
}

/// An optional alias: `AS name` or a bare name.
pub(super) fn alias(p: &mut Parser<'_>, state: &ParseState, kind: SyntaxKind) -> Step {
    if p.eat(SyntaxKind::AS_KW) {
        return expect_name(p, state, kind, alias_description(kind));
    }
    if is_name(p.current()) {
        p.bump_as(kind);
    }
    Ok(())
}

const fn alias_description(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::TABLE_ALIAS_NAME => "<table alias name>",
        _ => "<column alias name>",
    }
}

/// `'(' name (',' name)* ')'` with every name in the role `kind`.
pub(super) fn name_list(
    p: &mut Parser<'_>,
    state: &ParseState,
    kind: SyntaxKind,
    what: &str,
) -> Step {
    p.expect(state, SyntaxKind::L_PAREN)?;
    expect_name(p, state, kind, what)?;
    while p.eat(SyntaxKind::COMMA) {
        expect_name(p, state, kind, what)?;
    }
    p.expect(state, SyntaxKind::R_PAREN)
}
