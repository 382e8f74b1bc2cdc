//! Event-based parser core.
//!
//! Grammar rules never build tree nodes themselves. They push `Open`,
//! `Advance` and `Close` events onto a flat log, which backtracking can
//! truncate cheaply, and the log is replayed into a rowan tree once the
//! whole input has been consumed.
//!
//! Every rule reports one of three outcomes ([`MatchResult`]):
//!
//! - `Matched`: the rule completed.
//! - `Pinned`: the rule committed, consumed input, and recorded at least
//!   one diagnostic. Its node is kept.
//! - `NotMatched`: nothing changed. Position, events and diagnostics are
//!   exactly as they were on entry.

mod error;
mod event;
pub(crate) mod lookahead;
pub(crate) mod pratt;

use rowan::GreenNode;
use tracing::{debug, trace};

pub use error::ParseError;
pub(crate) use event::MarkClosed;
use event::{Event, MarkOpened};

use crate::SyntaxKind;
use crate::lexer::{Span, Token, error_token_message};

/// Outcome of one rule invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchResult {
    Matched,
    Pinned,
    NotMatched,
}

impl MatchResult {
    /// True when the rule produced a node, with or without diagnostics.
    pub(crate) const fn is_matched(self) -> bool {
        matches!(self, Self::Matched | Self::Pinned)
    }

    pub(crate) const fn is_not_matched(self) -> bool {
        matches!(self, Self::NotMatched)
    }

    /// Lifts a mandatory sub-rule into the enclosing sequence.
    ///
    /// A `Pinned` child already reported, so the sequence carries on after
    /// it. `NotMatched` ends the sequence, with `"<what> expected"` recorded
    /// if the enclosing rule is committed.
    pub(crate) fn require(self, p: &mut Parser<'_>, state: &ParseState, what: &str) -> Step {
        if self.is_matched() {
            return Ok(());
        }
        if state.is_committed() {
            p.error_expected(what);
        }
        Err(Missing)
    }
}

/// Whether the current rule invocation has passed its pin point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseState {
    Trying,
    Committed,
}

impl ParseState {
    /// Past this point the rule keeps its node and reports instead of
    /// backtracking.
    pub(crate) const fn commit(&mut self) {
        *self = Self::Committed;
    }

    pub(crate) const fn is_committed(self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// A mandatory element of a sequence was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Missing;

/// Result of one step of a rule body; `?` ends the sequence.
pub(crate) type Step = Result<(), Missing>;

/// A grammar production.
pub(crate) type Rule = fn(&mut Parser<'_>, Depth) -> MatchResult;

/// Recursion depth, threaded by value through every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub(crate) struct Depth(usize);

impl Depth {
    pub(crate) const ROOT: Self = Self(0);

    #[must_use]
    pub(crate) const fn deeper(self) -> Self {
        Self(self.0 + 1)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    pos: usize,
    events: usize,
    errors: usize,
}

/// Parser over the significant tokens of one input.
pub(crate) struct Parser<'t> {
    source: &'t str,
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    errors: Vec<ParseError>,
    max_depth: usize,
}

impl<'t> Parser<'t> {
    /// `tokens` is the full lexer output; trivia is skipped here and put
    /// back by the tree builder.
    pub(crate) fn new(source: &'t str, tokens: &[Token], max_depth: usize) -> Self {
        Self {
            source,
            tokens: tokens.iter().copied().filter(|t| !t.is_trivia()).collect(),
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
            max_depth,
        }
    }

    /// Builds the green tree and hands back the diagnostics.
    pub(crate) fn finish(self, all_tokens: &[Token]) -> (GreenNode, Vec<ParseError>) {
        debug!(
            tokens = self.tokens.len(),
            events = self.events.len(),
            errors = self.errors.len(),
            "parse finished"
        );
        let green = event::build_tree(self.source, all_tokens, self.events);
        (green, self.errors)
    }

    // ==================== Lookahead ====================

    fn nth_token(&self, n: usize) -> Token {
        self.tokens
            .get(self.pos + n)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or_else(|| Token::new(SyntaxKind::EOF, Span::empty(self.source.len())))
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).kind
    }

    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current())
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    /// True when the next significant tokens are exactly `kinds`.
    pub(crate) fn at_seq(&self, kinds: &[SyntaxKind]) -> bool {
        kinds
            .iter()
            .enumerate()
            .all(|(n, &kind)| self.nth(n) == kind)
    }

    pub(crate) fn nth_text(&self, n: usize) -> &'t str {
        self.nth_token(n).text(self.source)
    }

    pub(crate) fn current_span(&self) -> Span {
        self.nth_token(0).span
    }

    // ==================== Consuming ====================

    /// Consumes the current token. Does nothing at end of input.
    pub(crate) fn bump(&mut self) {
        if self.at_eof() {
            return;
        }
        self.events.push(Event::Advance);
        self.pos += 1;
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_any(&mut self, kinds: &[SyntaxKind]) -> bool {
        if self.at_any(kinds) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes `kinds` only if all of them are next.
    pub(crate) fn eat_seq(&mut self, kinds: &[SyntaxKind]) -> bool {
        if !self.at_seq(kinds) {
            return false;
        }
        for _ in kinds {
            self.bump();
        }
        true
    }

    /// Consumes `kind` or ends the sequence, reporting if committed.
    pub(crate) fn expect(&mut self, state: &ParseState, kind: SyntaxKind) -> Step {
        if self.eat(kind) {
            return Ok(());
        }
        if state.is_committed() {
            self.error_expected(kind.describe());
        }
        Err(Missing)
    }

    /// Like [`Parser::expect`] for a choice of tokens.
    pub(crate) fn expect_any(&mut self, state: &ParseState, kinds: &[SyntaxKind]) -> Step {
        if self.eat_any(kinds) {
            return Ok(());
        }
        if state.is_committed() {
            for kind in kinds {
                self.error_expected(kind.describe());
            }
        }
        Err(Missing)
    }

    /// Expects every token of `kinds` in order.
    pub(crate) fn expect_seq(&mut self, state: &ParseState, kinds: &[SyntaxKind]) -> Step {
        for &kind in kinds {
            self.expect(state, kind)?;
        }
        Ok(())
    }

    // ==================== Markers ====================

    fn open(&mut self) -> MarkOpened {
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        mark
    }

    /// Opens a node that will become the parent of the already closed `child`.
    fn open_before(&mut self, child: MarkClosed) -> MarkOpened {
        let mark = self.open();
        if let Some(Event::Open { forward_parent, .. }) = self.events.get_mut(child.index) {
            *forward_parent = Some(mark.index);
        }
        mark
    }

    fn close(&mut self, mark: MarkOpened, kind: SyntaxKind) -> MarkClosed {
        if let Some(Event::Open { kind: slot, .. }) = self.events.get_mut(mark.index) {
            *slot = kind;
        }
        self.events.push(Event::Close);
        MarkClosed { index: mark.index }
    }

    /// Wraps the current token in a node of `kind`.
    pub(crate) fn bump_as(&mut self, kind: SyntaxKind) -> MarkClosed {
        let mark = self.open();
        self.bump();
        self.close(mark, kind)
    }

    /// Runs `body` inside a node of `kind` that is kept unconditionally,
    /// even when it ends up empty.
    pub(crate) fn node(&mut self, kind: SyntaxKind, body: impl FnOnce(&mut Self)) -> MarkClosed {
        let mark = self.open();
        body(self);
        self.close(mark, kind)
    }

    /// Handle on whatever node the next rule opens.
    ///
    /// Valid once that rule returned `Matched` or `Pinned`, because rules
    /// always open their node before consuming.
    pub(crate) fn next_node(&self) -> MarkClosed {
        MarkClosed {
            index: self.events.len(),
        }
    }

    // ==================== Backtracking ====================

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            events: self.events.len(),
            errors: self.errors.len(),
        }
    }

    fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.errors.truncate(checkpoint.errors);
        if self.events.len() == checkpoint.events {
            return;
        }
        self.events.truncate(checkpoint.events);
        // A kept node may have been wrapped by a parent we just dropped.
        for event in &mut self.events {
            if let Event::Open { forward_parent, .. } = event {
                if forward_parent.is_some_and(|parent| parent >= checkpoint.events) {
                    *forward_parent = None;
                }
            }
        }
    }

    // ==================== Rules ====================

    /// Runs one production.
    ///
    /// `body` receives a fresh [`ParseState`] and the depth for its
    /// children. A body that fails before committing leaves no trace; one
    /// that fails after committing keeps its node and whatever it consumed.
    pub(crate) fn rule(
        &mut self,
        kind: SyntaxKind,
        depth: Depth,
        body: impl FnOnce(&mut Self, &mut ParseState, Depth) -> Step,
    ) -> MatchResult {
        if depth.get() > self.max_depth {
            return self.too_deep();
        }
        let checkpoint = self.checkpoint();
        let mark = self.open();
        let mut state = ParseState::Trying;

        match body(self, &mut state, depth.deeper()) {
            Ok(()) if self.pos == checkpoint.pos => {
                // Everything in the body was optional and absent.
                self.rewind(checkpoint);
                MatchResult::Matched
            }
            Ok(()) => {
                self.close(mark, kind);
                if self.errors.len() > checkpoint.errors {
                    MatchResult::Pinned
                } else {
                    MatchResult::Matched
                }
            }
            Err(Missing) if state.is_committed() => {
                self.close(mark, kind);
                MatchResult::Pinned
            }
            Err(Missing) => {
                trace!(?kind, pos = checkpoint.pos, "rewind");
                self.rewind(checkpoint);
                MatchResult::NotMatched
            }
        }
    }

    /// Wraps the already closed `child` in a new node of `kind`.
    ///
    /// Used for left-recursive shapes: binary expressions and join chains.
    /// The body is committed from the start since the caller only wraps
    /// after seeing the operator.
    pub(crate) fn wrap(
        &mut self,
        child: MarkClosed,
        kind: SyntaxKind,
        body: impl FnOnce(&mut Self, &ParseState) -> Step,
    ) -> (MarkClosed, MatchResult) {
        let errors = self.errors.len();
        let mark = self.open_before(child);
        let state = ParseState::Committed;
        let outcome = body(self, &state);
        let closed = self.close(mark, kind);
        let result = if outcome.is_err() || self.errors.len() > errors {
            MatchResult::Pinned
        } else {
            MatchResult::Matched
        };
        (closed, result)
    }

    /// Tries each alternative in order and returns the first that matched.
    pub(crate) fn first_of(&mut self, depth: Depth, rules: &[Rule]) -> MatchResult {
        for rule in rules {
            let result = rule(self, depth);
            if result.is_matched() {
                return result;
            }
        }
        MatchResult::NotMatched
    }

    /// `item (',' item)*`, every item mandatory.
    pub(crate) fn comma_list(
        &mut self,
        state: &ParseState,
        depth: Depth,
        what: &str,
        item: Rule,
    ) -> Step {
        item(self, depth).require(self, state, what)?;
        while self.eat(SyntaxKind::COMMA) {
            item(self, depth).require(self, state, what)?;
        }
        Ok(())
    }

    fn too_deep(&mut self) -> MatchResult {
        if self.at_eof() {
            return MatchResult::NotMatched;
        }
        let span = self.current_span();
        debug!(offset = span.start, "maximum nesting depth exceeded");
        self.push_error(ParseError::new("maximum nesting depth exceeded", span));
        let mark = self.open();
        while !self.at_eof() && !self.at(SyntaxKind::SEMICOLON) {
            self.bump();
        }
        self.close(mark, SyntaxKind::ERROR);
        MatchResult::Pinned
    }

    // ==================== Diagnostics ====================

    /// Records "`what` expected, got '...'" at the current token.
    ///
    /// A diagnostic already anchored at the same offset absorbs `what` as
    /// another alternative instead of producing a second message.
    pub(crate) fn error_expected(&mut self, what: &str) {
        let token = self.nth_token(0);
        if let Some(last) = self.errors.last_mut() {
            if last.span.start == token.span.start {
                last.merge_expected(what);
                return;
            }
        }
        let error = if token.kind == SyntaxKind::ERROR_TOKEN {
            self.lexical_error(token)
        } else {
            let found = (!token.is_eof()).then(|| token.text(self.source));
            ParseError::expected(what, found, token.span)
        };
        self.push_error(error);
    }

    /// True if a diagnostic is already anchored at the current token.
    pub(crate) fn reported_here(&self) -> bool {
        let offset = self.current_span().start;
        self.errors
            .last()
            .is_some_and(|last| last.span.start == offset)
    }

    /// Records "unexpected '...'" unless something was already reported
    /// at the current token.
    fn error_unexpected(&mut self) {
        if self.reported_here() {
            return;
        }
        let token = self.nth_token(0);
        let error = if token.kind == SyntaxKind::ERROR_TOKEN {
            self.lexical_error(token)
        } else {
            ParseError::unexpected(token.text(self.source), token.span)
        };
        self.push_error(error);
    }

    fn lexical_error(&self, token: Token) -> ParseError {
        let text = token.text(self.source);
        let mut error = ParseError::new(error_token_message(text), token.span);
        error.found = Some(text.to_string());
        error
    }

    fn push_error(&mut self, error: ParseError) {
        debug!(
            message = %error.message,
            offset = error.span.start,
            "syntax error"
        );
        self.errors.push(error);
    }

    // ==================== Recovery ====================

    /// Wraps tokens up to the first one satisfying `sync` in an `ERROR`
    /// node. Never crosses a `;` or the end of input.
    ///
    /// Returns true if anything was skipped.
    pub(crate) fn recover_until(&mut self, sync: fn(SyntaxKind) -> bool) -> bool {
        let stop = |p: &Self| {
            p.at_eof() || lookahead::statement_sync(p.current()) || sync(p.current())
        };
        if stop(self) {
            return false;
        }
        let start = self.pos;
        self.error_unexpected();
        let mark = self.open();
        while !stop(self) {
            self.bump();
        }
        self.close(mark, SyntaxKind::ERROR);
        trace!(skipped = self.pos - start, "recovered");
        true
    }

    /// Wraps the rest of the current statement in an `ERROR` node.
    pub(crate) fn recover_statement(&mut self) -> bool {
        self.recover_until(|_| false)
    }
}
