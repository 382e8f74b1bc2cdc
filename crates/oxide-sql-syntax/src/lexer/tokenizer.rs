//! SQL tokenizer implementation.
//!
//! The lexer is lossless: whitespace and comments come out as trivia
//! tokens, and malformed input becomes `ERROR_TOKEN` instead of being
//! dropped, so the concatenated token texts always equal the input.

use super::{Span, Token};
use crate::SyntaxKind;

/// A lexer that tokenizes SQL input.
pub struct Lexer<'a> {
    input: &'a str,
    /// Current byte position.
    pos: usize,
    /// Byte position where the current token started.
    start: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn make_token(&self, kind: SyntaxKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    fn scan_line_comment(&mut self) -> Token {
        self.advance_while(|c| c != '\n');
        self.make_token(SyntaxKind::COMMENT)
    }

    /// An unterminated block comment runs to the end of input.
    fn scan_block_comment(&mut self) -> Token {
        self.advance(); // *
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    break;
                }
                None => break,
                _ => {}
            }
        }
        self.make_token(SyntaxKind::COMMENT)
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        self.advance_while(is_identifier_continue);
        let text = &self.input[self.start..self.pos];
        self.make_token(SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::IDENTIFIER))
    }

    /// Scans a string or quoted identifier whose closing delimiter is
    /// escaped by doubling it (`'it''s'`, `"a""b"`, `` `a``b` ``).
    fn scan_quoted(&mut self, quote: char, kind: SyntaxKind) -> Token {
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return self.make_token(kind);
                    }
                }
                Some(_) => {}
                None => return self.make_token(SyntaxKind::ERROR_TOKEN),
            }
        }
    }

    /// Scans a `[bracketed identifier]`.
    fn scan_bracket_identifier(&mut self) -> Token {
        self.advance_while(|c| c != ']');
        if self.advance().is_none() {
            return self.make_token(SyntaxKind::ERROR_TOKEN);
        }
        self.make_token(SyntaxKind::BRACKET_LITERAL)
    }

    /// Scans a number: decimal, fractional, exponent or `0x` hex.
    fn scan_number(&mut self, first: char) -> Token {
        if first == '0' && matches!(self.peek(), Some('x' | 'X'))
            && self.peek_next().is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.advance(); // x
            self.advance_while(|c| c.is_ascii_hexdigit());
            return self.finish_number();
        }

        if first != '.' {
            self.advance_while(|c| c.is_ascii_digit());
            if self.peek() == Some('.') {
                self.advance();
            }
        }
        self.advance_while(|c| c.is_ascii_digit());

        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_follows = match self.peek_next() {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.input[self.pos..]
                    .chars()
                    .nth(2)
                    .is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent_follows {
                self.advance(); // e/E
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
                self.advance_while(|c| c.is_ascii_digit());
            }
        }
        self.finish_number()
    }

    /// A number running straight into identifier characters (`12abc`) is
    /// malformed as a whole.
    fn finish_number(&mut self) -> Token {
        if self.peek().is_some_and(is_identifier_start) {
            self.advance_while(is_identifier_continue);
            return self.make_token(SyntaxKind::ERROR_TOKEN);
        }
        self.make_token(SyntaxKind::NUMERIC_LITERAL)
    }

    /// Scans a blob literal (`X'...'`); the `X` is already consumed.
    fn scan_blob(&mut self) -> Token {
        self.advance(); // opening quote
        let digits_start = self.pos;
        self.advance_while(|c| c != '\'');
        let digits = &self.input[digits_start..self.pos];
        if self.advance().is_none()
            || digits.len() % 2 != 0
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return self.make_token(SyntaxKind::ERROR_TOKEN);
        }
        self.make_token(SyntaxKind::BLOB_LITERAL)
    }

    /// Scans the next token. Returns `EOF` at the end of input.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(SyntaxKind::EOF);
        };

        match c {
            c if c.is_whitespace() => {
                self.advance_while(char::is_whitespace);
                self.make_token(SyntaxKind::WHITESPACE)
            }
            '-' if self.peek() == Some('-') => self.scan_line_comment(),
            '/' if self.peek() == Some('*') => self.scan_block_comment(),

            '(' => self.make_token(SyntaxKind::L_PAREN),
            ')' => self.make_token(SyntaxKind::R_PAREN),
            ',' => self.make_token(SyntaxKind::COMMA),
            ';' => self.make_token(SyntaxKind::SEMICOLON),
            '+' => self.make_token(SyntaxKind::PLUS),
            '-' => self.make_token(SyntaxKind::MINUS),
            '*' => self.make_token(SyntaxKind::STAR),
            '/' => self.make_token(SyntaxKind::SLASH),
            '%' => self.make_token(SyntaxKind::PERCENT),
            '~' => self.make_token(SyntaxKind::TILDE),
            '&' => self.make_token(SyntaxKind::AMP),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.scan_number('.'),
            '.' => self.make_token(SyntaxKind::DOT),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(SyntaxKind::EQEQ)
                } else {
                    self.make_token(SyntaxKind::EQ)
                }
            }
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(SyntaxKind::LT_EQ)
                }
                Some('>') => {
                    self.advance();
                    self.make_token(SyntaxKind::LT_GT)
                }
                Some('<') => {
                    self.advance();
                    self.make_token(SyntaxKind::SHL)
                }
                _ => self.make_token(SyntaxKind::LT),
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(SyntaxKind::GT_EQ)
                }
                Some('>') => {
                    self.advance();
                    self.make_token(SyntaxKind::SHR)
                }
                _ => self.make_token(SyntaxKind::GT),
            },
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(SyntaxKind::NOT_EQ)
                } else {
                    self.make_token(SyntaxKind::ERROR_TOKEN)
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_token(SyntaxKind::CONCAT)
                } else {
                    self.make_token(SyntaxKind::PIPE)
                }
            }

            '\'' => self.scan_quoted('\'', SyntaxKind::SINGLE_QUOTE_STRING_LITERAL),
            '"' => self.scan_quoted('"', SyntaxKind::DOUBLE_QUOTE_STRING_LITERAL),
            '`' => self.scan_quoted('`', SyntaxKind::BACKTICK_LITERAL),
            '[' => self.scan_bracket_identifier(),

            '?' => {
                self.advance_while(|c| c.is_ascii_digit());
                self.make_token(SyntaxKind::NUMBERED_PARAMETER)
            }
            ':' | '@' | '$' if self.peek().is_some_and(is_identifier_continue) => {
                self.advance_while(is_identifier_continue);
                self.make_token(SyntaxKind::NAMED_PARAMETER)
            }

            'X' | 'x' if self.peek() == Some('\'') => self.scan_blob(),
            c if c.is_ascii_digit() => self.scan_number(c),
            c if is_identifier_start(c) => self.scan_identifier(),

            _ => self.make_token(SyntaxKind::ERROR_TOKEN),
        }
    }

    /// Tokenizes the entire input. The last token is always `EOF`.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Explains why the text of an `ERROR_TOKEN` did not lex.
#[must_use]
pub fn error_token_message(text: &str) -> &'static str {
    match text.chars().next() {
        Some('\'') => "unterminated string literal",
        Some('"' | '`' | '[') => "unterminated quoted identifier",
        Some('x' | 'X') if text[1..].starts_with('\'') => "malformed blob literal",
        Some(c) if c.is_ascii_digit() || c == '.' => "malformed number",
        _ => "unexpected character",
    }
}
