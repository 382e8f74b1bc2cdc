//! Syntax checking for SQLite and Room SQL files.
//!
//! `oxide-sql-lint` runs the error-tolerant parser from
//! [`oxide_sql_syntax`] over files or standard input and reports every
//! syntax error with its line and column. Because the parser recovers at
//! statement boundaries, one run reports the errors of every statement in
//! a file, not just the first.
//!
//! # Example
//!
//! ```rust
//! use oxide_sql_lint::prelude::*;
//!
//! let source = SqlSource::new("schema.sql", "CREATE TABLE t (id INTEGER,);");
//! let diagnostics = check(&source, &ParseOptions::default());
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(
//!     render(&diagnostics, OutputFormat::Text).unwrap(),
//!     "schema.sql:1:28: <column definition name> expected, got ')'\n"
//! );
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Check files, or `-` for stdin
//! oxide-sql-lint check schema.sql queries/*.sql
//!
//! # Machine-readable output
//! oxide-sql-lint --format json check schema.sql
//!
//! # Inspect the syntax tree or the tokens
//! oxide-sql-lint tree query.sql
//! oxide-sql-lint tokens query.sql
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod source;

pub use error::{LintError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::load_options;
    pub use crate::error::{LintError, Result};
    pub use crate::report::{
        Diagnostic, OutputFormat, check, render, render_tokens, render_tree,
    };
    pub use crate::source::{LineIndex, SqlSource};
    pub use oxide_sql_syntax::ParseOptions;
}
