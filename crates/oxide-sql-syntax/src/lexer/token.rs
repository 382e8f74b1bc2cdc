//! Token type produced by the lexer.

use super::Span;
use crate::SyntaxKind;

/// A lexed token: its kind and where it sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: SyntaxKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, SyntaxKind::EOF)
    }

    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    /// Whitespace and comments are trivia; everything else is significant
    /// to the parser.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// The token's text within `source`.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }
}
