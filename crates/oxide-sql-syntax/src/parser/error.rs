//! Parser diagnostics.

use serde::Serialize;

use crate::lexer::Span;

/// A syntax error anchored at the token where a rule failed to complete.
///
/// Parsing never aborts on these: they are collected next to the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message} at position {}..{}", .span.start, .span.end)]
pub struct ParseError {
    /// The rendered message, e.g. `'=' expected, got 'WHERE'`.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// What would have been accepted here, in the order it was reported.
    pub expected: Vec<String>,
    /// The text of the offending token; `None` at end of input.
    pub found: Option<String>,
}

impl ParseError {
    /// Creates an error with a free-form message.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Creates an "X expected, got 'y'" error.
    #[must_use]
    pub fn expected(expected: impl Into<String>, found: Option<&str>, span: Span) -> Self {
        let mut error = Self {
            message: String::new(),
            span,
            expected: vec![expected.into()],
            found: found.map(String::from),
        };
        error.render();
        error
    }

    /// Creates an "unexpected 'y'" error for a token no rule could use.
    #[must_use]
    pub fn unexpected(found: &str, span: Span) -> Self {
        Self {
            message: format!("unexpected '{found}'"),
            span,
            expected: Vec::new(),
            found: Some(found.to_string()),
        }
    }

    /// Adds another acceptable alternative at the same position.
    ///
    /// Only errors built by [`ParseError::expected`] grow; free-form
    /// messages are left as they are.
    pub fn merge_expected(&mut self, expected: impl Into<String>) {
        if self.expected.is_empty() {
            return;
        }
        let expected = expected.into();
        if !self.expected.contains(&expected) {
            self.expected.push(expected);
            self.render();
        }
    }

    fn render(&mut self) {
        let alternatives = match self.expected.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [init @ .., last] => format!("{} or {last}", init.join(", ")),
        };
        self.message = match &self.found {
            Some(found) => format!("{alternatives} expected, got '{found}'"),
            None => format!("{alternatives} expected"),
        };
    }
}
