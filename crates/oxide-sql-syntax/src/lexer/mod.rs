//! SQL lexer.
//!
//! A hand-written, lossless lexer: every byte of the input ends up in
//! exactly one token, trivia included.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::Token;
pub use tokenizer::{Lexer, error_token_message};
