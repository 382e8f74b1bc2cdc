//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Knobs for [`crate::parse_with`].
///
/// Every field has a default, so a partial JSON object is a valid
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest rule nesting allowed before the rest of the statement is
    /// reported as "maximum nesting depth exceeded".
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
