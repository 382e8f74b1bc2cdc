//! Inputs and byte-offset to line/column mapping.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Name under which standard input is reported.
pub const STDIN: &str = "-";

/// One SQL input: where it came from and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlSource {
    pub name: String,
    pub text: String,
}

impl SqlSource {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Reads the file at `arg`, or standard input when `arg` is `-`.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Io`](crate::LintError::Io) if the input cannot
    /// be read or is not UTF-8.
    pub fn read(arg: &str) -> Result<Self> {
        if arg == STDIN {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            debug!(bytes = text.len(), "read stdin");
            return Ok(Self::new(STDIN, text));
        }
        Self::read_file(Path::new(arg))
    }

    /// # Errors
    ///
    /// Returns [`LintError::Io`](crate::LintError::Io) on read failure.
    pub fn read_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = text.len(), "read file");
        Ok(Self::new(path.display().to_string(), text))
    }
}

/// Maps byte offsets to 1-based line and column numbers.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// Line and column of `offset`. Offsets past the end map to the end.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let column = self
            .text
            .get(start..offset)
            .map_or(offset - start, |prefix| prefix.chars().count());
        (line + 1, column + 1)
    }
}
