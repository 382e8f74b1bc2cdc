//! Parse options from a JSON file and the command line.

use std::path::Path;

use oxide_sql_syntax::ParseOptions;
use tracing::debug;

use crate::error::{LintError, Result};

const MIN_DEPTH_MESSAGE: &str = "max_depth must be at least 1";

/// Builds the [`ParseOptions`] for a run.
///
/// A `config` file supplies the base options; `max_depth` from the command
/// line (or its environment variable) wins over the file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid JSON, and when either
/// source sets a `max_depth` of zero.
pub fn load_options(config: Option<&Path>, max_depth: Option<usize>) -> Result<ParseOptions> {
    let mut options = match config {
        Some(path) => read_config(path)?,
        None => ParseOptions::default(),
    };
    if let Some(depth) = max_depth {
        if depth == 0 {
            return Err(LintError::InvalidOption {
                name: "--max-depth",
                message: MIN_DEPTH_MESSAGE.to_string(),
            });
        }
        options = options.with_max_depth(depth);
    }
    debug!(max_depth = options.max_depth, "parse options");
    Ok(options)
}

fn read_config(path: &Path) -> Result<ParseOptions> {
    let text = std::fs::read_to_string(path)?;
    let options: ParseOptions = serde_json::from_str(&text)?;
    if options.max_depth == 0 {
        return Err(LintError::Config {
            path: path.to_path_buf(),
            message: MIN_DEPTH_MESSAGE.to_string(),
        });
    }
    Ok(options)
}
