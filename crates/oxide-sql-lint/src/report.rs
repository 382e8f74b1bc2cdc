//! Checking inputs and rendering what was found.

use std::fmt::Write as _;

use oxide_sql_syntax::{Lexer, ParseError, ParseOptions, Span, parse_with};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::source::{LineIndex, SqlSource};

/// How diagnostics are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `path:line:column: message`, one per line.
    #[default]
    Text,
    /// A JSON array of diagnostics.
    Json,
}

/// A syntax error located in a named input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: String,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters.
    pub column: usize,
    pub message: String,
    pub span: Span,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expected: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(path: &str, index: &LineIndex<'_>, error: &ParseError) -> Self {
        let (line, column) = index.line_col(error.span.start);
        Self {
            path: path.to_string(),
            line,
            column,
            message: error.message.clone(),
            span: error.span,
            expected: error.expected.clone(),
            found: error.found.clone(),
        }
    }
}

/// Parses `source` and locates every syntax error in it.
#[must_use]
pub fn check(source: &SqlSource, options: &ParseOptions) -> Vec<Diagnostic> {
    let parse = parse_with(&source.text, options);
    let index = LineIndex::new(&source.text);
    let diagnostics: Vec<_> = parse
        .errors()
        .iter()
        .map(|error| Diagnostic::new(&source.name, &index, error))
        .collect();
    if diagnostics.is_empty() {
        debug!(path = %source.name, "no syntax errors");
    } else {
        info!(path = %source.name, count = diagnostics.len(), "syntax errors found");
    }
    diagnostics
}

/// Renders `diagnostics` in `format`. Text output for no diagnostics is
/// empty; JSON output is always an array.
///
/// # Errors
///
/// Returns [`LintError::Json`](crate::LintError::Json) if encoding fails.
pub fn render(diagnostics: &[Diagnostic], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(diagnostics
            .iter()
            .fold(String::new(), |mut out, d| {
                let _ = writeln!(out, "{}:{}:{}: {}", d.path, d.line, d.column, d.message);
                out
            })),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(diagnostics)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// One line per token, trivia and the final `EOF` included:
/// `KIND@start..end "text"`.
#[must_use]
pub fn render_tokens(source: &SqlSource) -> String {
    let mut out = String::new();
    for token in Lexer::new(&source.text).tokenize() {
        let _ = writeln!(
            out,
            "{:?}@{}..{} {:?}",
            token.kind,
            token.span.start,
            token.span.end,
            token.text(&source.text),
        );
    }
    out
}

/// The `debug_tree` dump of `source`.
#[must_use]
pub fn render_tree(source: &SqlSource, options: &ParseOptions) -> (String, usize) {
    let parse = parse_with(&source.text, options);
    (parse.debug_tree(), parse.errors().len())
}
