//! Operator priority table for the expression grammar.
//!
//! Lower priorities bind looser. An operator continues an expression only
//! when its priority is strictly greater than the minimum the caller asked
//! for, and its right operand is parsed with that priority as the new
//! minimum, which makes operators of one tier associate to the left.

#[allow(clippy::enum_glob_use)]
use crate::SyntaxKind::{self, *};

/// How a tier combines with its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fixity {
    /// A complete expression on its own (literal, column, `CASE`, ...).
    Atom,
    /// An operator in front of its operand, or a keyword opening a
    /// bracketed form (`CAST (...)`, `(...)`).
    Prefix,
    /// Follows a finished left operand and takes no right operand
    /// expression at its own tier.
    Postfix,
    /// `left op right`.
    Binary,
}

/// One row of the priority table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tier {
    pub(crate) name: &'static str,
    pub(crate) priority: u8,
    pub(crate) fixity: Fixity,
    /// Node kinds this tier produces.
    pub(crate) kinds: &'static [SyntaxKind],
}

const fn tier(
    name: &'static str,
    priority: u8,
    fixity: Fixity,
    kinds: &'static [SyntaxKind],
) -> Tier {
    Tier {
        name,
        priority,
        fixity,
        kinds,
    }
}

/// Every expression tier, in the order atoms are tried.
pub(crate) static TIERS: [Tier; 21] = [
    tier("raise", 0, Fixity::Atom, &[RAISE_FUNCTION_EXPRESSION]),
    tier("case", 0, Fixity::Atom, &[CASE_EXPRESSION]),
    tier("exists", 0, Fixity::Atom, &[EXISTS_EXPRESSION, SUBQUERY_EXPRESSION]),
    tier("in", 5, Fixity::Postfix, &[IN_EXPRESSION]),
    tier("isnull", 6, Fixity::Postfix, &[ISNULL_EXPRESSION]),
    tier("like", 7, Fixity::Binary, &[LIKE_EXPRESSION]),
    tier("cast", 0, Fixity::Prefix, &[CAST_EXPRESSION]),
    tier("function_call", 0, Fixity::Atom, &[FUNCTION_CALL_EXPRESSION]),
    tier("or", 1, Fixity::Binary, &[OR_EXPRESSION]),
    tier("and", 2, Fixity::Binary, &[AND_EXPRESSION]),
    tier(
        "equivalence",
        10,
        Fixity::Binary,
        &[EQUIVALENCE_EXPRESSION, BETWEEN_EXPRESSION],
    ),
    tier("comparison", 11, Fixity::Binary, &[COMPARISON_EXPRESSION]),
    tier("bit", 12, Fixity::Binary, &[BIT_EXPRESSION]),
    tier("add", 13, Fixity::Binary, &[ADD_EXPRESSION]),
    tier("mul", 14, Fixity::Binary, &[MUL_EXPRESSION]),
    tier("concat", 15, Fixity::Binary, &[CONCAT_EXPRESSION]),
    tier("unary", UNARY_PRIORITY, Fixity::Prefix, &[UNARY_EXPRESSION]),
    tier("collate", 17, Fixity::Postfix, &[COLLATE_EXPRESSION]),
    tier("literal", 0, Fixity::Atom, &[LITERAL_EXPRESSION]),
    tier("column_ref", 0, Fixity::Atom, &[COLUMN_REF_EXPRESSION]),
    tier("paren", 0, Fixity::Prefix, &[PAREN_EXPRESSION]),
];

/// Priority at which the operand of a unary operator is parsed.
pub(crate) const UNARY_PRIORITY: u8 = 16;

/// Entry point: accepts any operator.
pub(crate) const LOWEST_PRIORITY: u8 = 0;

/// An operator that continues an expression after its left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Infix {
    In,
    IsNull,
    Like,
    Or,
    And,
    Equivalence,
    Between,
    Comparison,
    Bit,
    Add,
    Mul,
    Concat,
    Collate,
}

impl Infix {
    pub(crate) fn tier(self) -> &'static Tier {
        let index = match self {
            Self::In => 3,
            Self::IsNull => 4,
            Self::Like => 5,
            Self::Or => 8,
            Self::And => 9,
            Self::Equivalence | Self::Between => 10,
            Self::Comparison => 11,
            Self::Bit => 12,
            Self::Add => 13,
            Self::Mul => 14,
            Self::Concat => 15,
            Self::Collate => 17,
        };
        &TIERS[index]
    }

    pub(crate) fn priority(self) -> u8 {
        self.tier().priority
    }

    /// The node kind wrapping the operator and its operands.
    pub(crate) fn kind(self) -> SyntaxKind {
        let kinds = self.tier().kinds;
        match self {
            Self::Between => kinds[1],
            _ => kinds[0],
        }
    }

    /// True when the operator applies on top of a left operand parsed with
    /// `min_priority`.
    pub(crate) fn binds_above(self, min_priority: u8) -> bool {
        self.priority() > min_priority
    }
}

/// Classifies the operator starting at `first`, given the token after it.
///
/// `NOT` only continues an expression in front of `IN`, `NULL`, the
/// pattern operators or `BETWEEN`; anywhere else it ends the operand.
pub(crate) const fn infix_operator(first: SyntaxKind, second: SyntaxKind) -> Option<Infix> {
    let op = match first {
        OR_KW => Infix::Or,
        AND_KW => Infix::And,
        IN_KW => Infix::In,
        ISNULL_KW | NOTNULL_KW => Infix::IsNull,
        LIKE_KW | GLOB_KW | REGEXP_KW | MATCH_KW => Infix::Like,
        BETWEEN_KW => Infix::Between,
        NOT_KW => match second {
            IN_KW => Infix::In,
            NULL_KW => Infix::IsNull,
            LIKE_KW | GLOB_KW | REGEXP_KW | MATCH_KW => Infix::Like,
            BETWEEN_KW => Infix::Between,
            _ => return None,
        },
        EQ | EQEQ | NOT_EQ | LT_GT | IS_KW => Infix::Equivalence,
        LT | LT_EQ | GT | GT_EQ => Infix::Comparison,
        SHL | SHR | AMP | PIPE => Infix::Bit,
        PLUS | MINUS => Infix::Add,
        STAR | SLASH | PERCENT => Infix::Mul,
        CONCAT => Infix::Concat,
        COLLATE_KW => Infix::Collate,
        _ => return None,
    };
    Some(op)
}

/// Tokens that start a unary expression.
pub(crate) const fn is_unary_operator(kind: SyntaxKind) -> bool {
    matches!(kind, MINUS | PLUS | TILDE | NOT_KW)
}
