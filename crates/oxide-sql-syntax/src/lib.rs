//! # oxide-sql-syntax
//!
//! An error-tolerant parser for the SQLite dialect, producing a lossless
//! concrete syntax tree.
//!
//! This crate provides:
//! - A lossless lexer: every byte of the input, whitespace and comments
//!   included, lands in exactly one token
//! - A grammar-driven parser with explicit commit points, so a malformed
//!   clause is reported inside its statement instead of swallowing the rest
//!   of the input
//! - A priority-table (Pratt) expression engine
//! - A [`rowan`] tree whose text is always the input, byte for byte
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_sql_syntax::{SyntaxKind, parse};
//!
//! let parse = parse("SELECT id, name FROM users WHERE active = 1");
//! assert!(parse.ok());
//!
//! let statement = parse.syntax().first_child().unwrap();
//! assert_eq!(statement.kind(), SyntaxKind::SELECT_STATEMENT);
//! ```
//!
//! ## Diagnostics
//!
//! Parsing never fails. Syntax errors are returned next to the tree, and
//! the tree still covers every token:
//!
//! ```rust
//! use oxide_sql_syntax::parse;
//!
//! let input = "UPDATE users SET; SELECT 1";
//! let parse = parse(input);
//!
//! assert_eq!(parse.errors().len(), 1);
//! assert_eq!(parse.errors()[0].message, "<column name> expected, got ';'");
//! assert_eq!(parse.syntax().text().to_string(), input);
//! ```

mod config;
mod grammar;
pub mod lexer;
mod parser;
mod syntax_kind;

use std::fmt::Write as _;

use rowan::{GreenNode, NodeOrToken, WalkEvent};

pub use config::ParseOptions;
pub use lexer::{Lexer, Span, Token};
pub use parser::ParseError;
pub use syntax_kind::{SqlLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Parses `text` with the default [`ParseOptions`].
#[must_use]
pub fn parse(text: &str) -> Parse {
    parse_with(text, &ParseOptions::default())
}

/// Parses `text` into a `FILE` tree and its diagnostics.
#[must_use]
pub fn parse_with(text: &str, options: &ParseOptions) -> Parse {
    let tokens = Lexer::new(text).tokenize();
    let mut parser = parser::Parser::new(text, &tokens, options.max_depth);
    grammar::file(&mut parser);
    let (green, errors) = parser.finish(&tokens);
    Parse { green, errors }
}

/// The result of a parse: an immutable green tree and the syntax errors
/// found while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    #[must_use]
    pub const fn green(&self) -> &GreenNode {
        &self.green
    }

    /// A fresh root over the green tree.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// True when the input parsed without any diagnostic.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// An indented dump of the tree, one node or token per line:
    /// `KIND@start..end` for nodes and `KIND "text"` for tokens. Trivia is
    /// left out.
    #[must_use]
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        let mut indent = 0_usize;
        for event in self.syntax().preorder_with_tokens() {
            match event {
                WalkEvent::Enter(NodeOrToken::Node(node)) => {
                    let range = node.text_range();
                    let _ = writeln!(
                        out,
                        "{:indent$}{:?}@{}..{}",
                        "",
                        node.kind(),
                        u32::from(range.start()),
                        u32::from(range.end()),
                        indent = indent * 2,
                    );
                    indent += 1;
                }
                WalkEvent::Leave(NodeOrToken::Node(_)) => indent = indent.saturating_sub(1),
                WalkEvent::Enter(NodeOrToken::Token(token)) if !token.kind().is_trivia() => {
                    let _ = writeln!(
                        out,
                        "{:indent$}{:?} {:?}",
                        "",
                        token.kind(),
                        token.text(),
                        indent = indent * 2,
                    );
                }
                WalkEvent::Enter(NodeOrToken::Token(_)) | WalkEvent::Leave(NodeOrToken::Token(_)) => {}
            }
        }
        out
    }
}
