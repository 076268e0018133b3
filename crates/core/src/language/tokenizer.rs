// crates/core/src/language/tokenizer.rs
//! コメントマーカー用トークナイザ
//!
//! Reduces one line of source text to the handful of events the line
//! classifier cares about: ordinary characters, the three comment markers
//! `//`, `/*`, `*/`, and the end of the line.
//!
//! Peeking and consuming are separate steps. [`Tokenizer::peek`] never moves
//! the cursor; [`Tokenizer::advance`] moves it past a token previously
//! returned by `peek`.

/// A symbolic event produced from the current cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Exactly one ordinary character.
    AnyChar(char),
    /// The cursor reached the end of the line.
    EndOfLine,
    /// `//`
    LineCommentStart,
    /// `/*`
    BlockCommentStart,
    /// `*/`
    BlockCommentEnd,
}

impl Token {
    /// Number of bytes this token occupies in the line.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::AnyChar(c) => c.len_utf8(),
            Self::EndOfLine => 0,
            Self::LineCommentStart | Self::BlockCommentStart | Self::BlockCommentEnd => 2,
        }
    }
}

/// Cursor over a single line.
///
/// The cursor is a byte offset that always sits on a `char` boundary.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    line: &'a str,
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub const fn new(line: &'a str) -> Self {
        Self { line, cursor: 0 }
    }

    /// Switches to a new line and rewinds the cursor.
    pub fn set_line(&mut self, line: &'a str) {
        self.line = line;
        self.cursor = 0;
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the token at the cursor without consuming it.
    ///
    /// Once the cursor is at or past the end of the line this keeps
    /// returning [`Token::EndOfLine`].
    #[must_use]
    pub fn peek(&self) -> Token {
        let rest = self.line.get(self.cursor..).unwrap_or("");
        match rest.as_bytes() {
            [] => Token::EndOfLine,
            [b'/', b'/', ..] => Token::LineCommentStart,
            [b'/', b'*', ..] => Token::BlockCommentStart,
            [b'*', b'/', ..] => Token::BlockCommentEnd,
            _ => rest.chars().next().map_or(Token::EndOfLine, Token::AnyChar),
        }
    }

    /// Moves the cursor past `token`.
    ///
    /// `token` must be the value `peek` returns at the current position.
    /// Consuming anything else means the caller and the tokenizer disagree
    /// about the line, which is a bug, so debug builds panic on it.
    pub fn advance(&mut self, token: Token) {
        debug_assert_eq!(
            self.peek(),
            token,
            "token consumed out of sync with the line at byte {}",
            self.cursor
        );
        self.cursor += token.width();
    }

    /// Peeks and consumes in one step.
    pub fn next_token(&mut self) -> Token {
        let token = self.peek();
        self.advance(token);
        token
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, [`Token::EndOfLine`].
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Token::EndOfLine => None,
            token => Some(token),
        }
    }
}

impl core::iter::FusedIterator for Tokenizer<'_> {}
