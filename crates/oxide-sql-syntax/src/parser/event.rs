//! Parser events and their replay into a rowan tree.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::SyntaxKind;
use crate::lexer::Token;

/// One step of the flat parse log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    /// Start of a node. `forward_parent` points at a later `Open` that must
    /// wrap this one, which is how a finished left operand gets re-parented
    /// under its binary expression.
    Open {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },
    Close,
    /// Consume the next significant token.
    Advance,
}

impl Event {
    const TOMBSTONE: Self = Self::Open {
        kind: SyntaxKind::TOMBSTONE,
        forward_parent: None,
    };
}

/// A node that has been opened but not yet closed.
#[derive(Debug)]
pub(crate) struct MarkOpened {
    pub(crate) index: usize,
}

/// A closed node. Can still be wrapped by a parent opened later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MarkClosed {
    pub(crate) index: usize,
}

/// Replays `events` over the full token stream (trivia included).
///
/// Trivia preceding a token is attached right before it; trivia preceding
/// a node start goes to the enclosing node; trailing trivia goes to the
/// root. The zero-width `EOF` token is never emitted.
pub(crate) fn build_tree(source: &str, tokens: &[Token], mut events: Vec<Event>) -> GreenNode {
    let mut sink = TokenSink {
        builder: GreenNodeBuilder::new(),
        source,
        tokens,
        cursor: 0,
    };
    let mut depth = 0usize;
    let mut chain = Vec::new();

    for index in 0..events.len() {
        match std::mem::replace(&mut events[index], Event::TOMBSTONE) {
            Event::Open {
                kind,
                forward_parent,
            } => {
                chain.clear();
                chain.push(kind);
                let mut next = forward_parent;
                while let Some(parent) = next {
                    next = match std::mem::replace(&mut events[parent], Event::TOMBSTONE) {
                        Event::Open {
                            kind,
                            forward_parent,
                        } => {
                            chain.push(kind);
                            forward_parent
                        }
                        _ => None,
                    };
                }
                for &kind in chain.iter().rev() {
                    if kind == SyntaxKind::TOMBSTONE {
                        continue;
                    }
                    if depth > 0 {
                        sink.trivia();
                    }
                    sink.builder.start_node(kind.into());
                    depth += 1;
                }
            }
            Event::Close => {
                if depth == 1 {
                    sink.rest();
                }
                sink.builder.finish_node();
                depth = depth.saturating_sub(1);
            }
            Event::Advance => {
                sink.trivia();
                sink.token();
            }
        }
    }

    sink.builder.finish()
}

struct TokenSink<'a> {
    builder: GreenNodeBuilder<'static>,
    source: &'a str,
    tokens: &'a [Token],
    cursor: usize,
}

impl TokenSink<'_> {
    fn emit(&mut self, token: Token) {
        self.builder.token(token.kind.into(), token.text(self.source));
        self.cursor += 1;
    }

    fn trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.cursor) {
            if !token.is_trivia() {
                break;
            }
            self.emit(token);
        }
    }

    fn token(&mut self) {
        if let Some(&token) = self.tokens.get(self.cursor) {
            self.emit(token);
        }
    }

    /// Everything left before `EOF`: normally only trailing trivia.
    fn rest(&mut self) {
        while let Some(&token) = self.tokens.get(self.cursor) {
            if token.is_eof() {
                break;
            }
            self.emit(token);
        }
    }
}
