//! Token-class predicates shared by the grammar.
//!
//! None of these consume input: they decide between alternatives by peeking
//! at the next significant tokens, and they name the sets error recovery
//! skips to.

use super::Parser;
#[allow(clippy::enum_glob_use)]
use crate::SyntaxKind::{self, *};

/// `(` followed by the start of a select statement.
///
/// Separates a subquery from a parenthesised expression, a tuple or a
/// nested join wherever both may start with `(`.
pub(crate) fn at_subquery(p: &Parser<'_>) -> bool {
    p.at(L_PAREN) && matches!(p.nth(1), SELECT_KW | VALUES_KW | WITH_KW)
}

/// Tokens that can be a name: identifiers, quoted identifiers, strings and
/// the keywords SQLite falls back to treating as identifiers.
pub(crate) const fn is_name(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        IDENTIFIER
            | BRACKET_LITERAL
            | BACKTICK_LITERAL
            | SINGLE_QUOTE_STRING_LITERAL
            | DOUBLE_QUOTE_STRING_LITERAL
    ) || kind.is_fallback_name()
}

/// Names as they appear inside expressions, where a single-quoted string
/// is a literal and not a column.
pub(crate) const fn is_identifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        IDENTIFIER | BRACKET_LITERAL | BACKTICK_LITERAL | DOUBLE_QUOTE_STRING_LITERAL
    ) || kind.is_fallback_name()
}

pub(crate) const fn is_literal(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        NUMERIC_LITERAL
            | SINGLE_QUOTE_STRING_LITERAL
            | DOUBLE_QUOTE_STRING_LITERAL
            | BLOB_LITERAL
            | NULL_KW
            | CURRENT_TIME_KW
            | CURRENT_DATE_KW
            | CURRENT_TIMESTAMP_KW
            | NUMBERED_PARAMETER
            | NAMED_PARAMETER
    )
}

/// Recovery set inside a parenthesised subquery.
pub(crate) const fn subquery_sync(kind: SyntaxKind) -> bool {
    matches!(kind, R_PAREN)
}

/// Recovery set after a broken common table expression: the statement
/// the `WITH` clause belongs to, or the end of the enclosing parens.
pub(crate) const fn with_clause_sync(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        DELETE_KW | INSERT_KW | REPLACE_KW | SELECT_KW | UPDATE_KW | VALUES_KW | R_PAREN
    )
}

/// Statement separator.
pub(crate) const fn statement_sync(kind: SyntaxKind) -> bool {
    matches!(kind, SEMICOLON)
}
