use log::trace;

use super::lexer::Lexer;
use super::token::Token;
use crate::error::ParseError;

/// A token sequence with "peek ahead by n" over a [`Lexer`].
///
/// Lookahead is 1-based: `peek(1)` is the current token. Tokens are lexed
/// lazily, so any `peek` or `consume` may surface a [`ParseError::Lexical`].
pub trait TokenSource {
    /// The token `n` positions ahead of the cursor, without consuming it.
    ///
    /// Panics if `n` is zero or exceeds [`capacity`](Self::capacity).
    fn peek(&mut self, n: usize) -> Result<&Token, ParseError>;

    /// Move the cursor past the current token.
    fn consume(&mut self) -> Result<(), ParseError>;

    /// Maximum supported lookahead, `None` when unbounded.
    fn capacity(&self) -> Option<usize>;
}

// ─── Bounded circular buffer (LL(1) / LL(k)) ────────────────────────────────

/// Fixed-size circular lookahead buffer of `k` tokens.
///
/// With `k = 1` this is the single lookahead slot of an LL(1) parser.
#[derive(Debug)]
pub struct RingBuffer {
    lexer: Lexer,
    slots: Vec<Token>,
    k: usize,
    /// Circular index of the current token.
    head: usize,
    /// Valid lookahead tokens starting at `head`.
    filled: usize,
}

impl RingBuffer {
    /// Create a buffer of `k` slots over `lexer`.
    ///
    /// Panics if `k` is zero.
    pub fn new(lexer: Lexer, k: usize) -> Self {
        assert!(k >= 1, "lookahead buffer needs at least one slot");
        Self {
            lexer,
            slots: Vec::with_capacity(k),
            k,
            head: 0,
            filled: 0,
        }
    }

    /// Lex until at least `n` lookahead tokens are held.
    fn fill(&mut self, n: usize) -> Result<(), ParseError> {
        while self.filled < n {
            let tok = self.lexer.next_token()?;
            let idx = (self.head + self.filled) % self.k;
            // Slots are written in strictly increasing circular order, so an
            // index equal to the length is the first visit of that slot.
            if idx == self.slots.len() {
                self.slots.push(tok);
            } else {
                self.slots[idx] = tok;
            }
            self.filled += 1;
        }
        Ok(())
    }
}

impl TokenSource for RingBuffer {
    fn peek(&mut self, n: usize) -> Result<&Token, ParseError> {
        assert!(
            (1..=self.k).contains(&n),
            "peek({n}) outside lookahead window 1..={}",
            self.k
        );
        self.fill(n)?;
        Ok(&self.slots[(self.head + n - 1) % self.k])
    }

    fn consume(&mut self) -> Result<(), ParseError> {
        self.fill(1)?;
        self.head = (self.head + 1) % self.k;
        self.filled -= 1;
        Ok(())
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.k)
    }
}

// ─── Unbounded speculative buffer (backtracking) ────────────────────────────

/// A checkpoint returned by [`SpeculativeBuffer::mark`].
///
/// Markers are neither `Clone` nor `Copy`: each one is released exactly once,
/// in the reverse order it was taken.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a marker must be released to restore the cursor"]
pub struct Marker {
    depth: usize,
    position: usize,
}

impl Marker {
    /// Nesting depth of this marker (1 for the outermost).
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Growable lookahead buffer with a stack of rollback markers.
///
/// While any marker is held the buffer is append-only, so a release can
/// always seek back to the marked token. Once no marker is held and the
/// cursor has consumed every buffered token, the buffer is cleared.
#[derive(Debug)]
pub struct SpeculativeBuffer {
    lexer: Lexer,
    tokens: Vec<Token>,
    cursor: usize,
    markers: Vec<usize>,
}

impl SpeculativeBuffer {
    /// Create an empty buffer over `lexer`.
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            tokens: Vec::new(),
            cursor: 0,
            markers: Vec::new(),
        }
    }

    /// Make sure tokens `cursor .. cursor + n` are buffered.
    fn sync(&mut self, n: usize) -> Result<(), ParseError> {
        let needed = self.cursor + n;
        while self.tokens.len() < needed {
            let tok = self.lexer.next_token()?;
            self.tokens.push(tok);
        }
        trace!(
            "buffer holds {} tokens, cursor {}",
            self.tokens.len(),
            self.cursor
        );
        Ok(())
    }

    /// Push a checkpoint of the current cursor.
    pub fn mark(&mut self) -> Marker {
        self.markers.push(self.cursor);
        Marker {
            depth: self.markers.len(),
            position: self.cursor,
        }
    }

    /// Pop `marker` and restore the cursor to where it was taken.
    ///
    /// Panics if `marker` is not the innermost outstanding checkpoint.
    pub fn release(&mut self, marker: Marker) {
        assert_eq!(
            marker.depth,
            self.markers.len(),
            "markers must be released innermost first"
        );
        let position = self.markers.pop().unwrap_or(marker.position);
        debug_assert_eq!(position, marker.position);
        self.cursor = position;
    }

    /// Whether any checkpoint is outstanding.
    pub fn is_speculating(&self) -> bool {
        !self.markers.is_empty()
    }

    /// Number of outstanding checkpoints.
    pub fn depth(&self) -> usize {
        self.markers.len()
    }

    /// Number of tokens currently held.
    pub fn buffered(&self) -> usize {
        self.tokens.len()
    }
}

impl TokenSource for SpeculativeBuffer {
    fn peek(&mut self, n: usize) -> Result<&Token, ParseError> {
        assert!(n >= 1, "peek is 1-based");
        self.sync(n)?;
        Ok(&self.tokens[self.cursor + n - 1])
    }

    fn consume(&mut self) -> Result<(), ParseError> {
        self.sync(1)?;
        self.cursor += 1;
        if self.cursor == self.tokens.len() && !self.is_speculating() {
            trace!("buffer drained, clearing {} tokens", self.tokens.len());
            self.cursor = 0;
            self.tokens.clear();
        }
        Ok(())
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}
