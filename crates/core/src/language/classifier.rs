// crates/core/src/language/classifier.rs
//! # Line Classifier
//!
//! Decides whether one line of C-family source is code or comment, carrying
//! the "inside a `/* */` block" flag from one line to the next.
//!
//! ## Supported Syntax
//!
//! - **Line comments**: `//` to the end of the line
//! - **Block comments**: `/* */`, possibly spanning many lines, not nested
//!
//! Markers inside string literals are not recognized as such: `"a // b"` ends
//! the code part of the line at the `//`.
//!
//! ## Machine
//!
//! The line is scanned by a [`Tokenizer`]. Each token is fed to
//! [`State::step`], a pure transition function returning the next state and
//! the [`Effect`] to apply to the per-line [`LineState`].
//!
//! | State | Token | Next | Effect |
//! |-------|-------|------|--------|
//! | `ScanningCode` | whitespace | `ScanningCode` | - |
//! | `ScanningCode`, `FoundCode` | other char, stray `*/` | `FoundCode` | `MarkCode` |
//! | `FoundCode` | whitespace | `FoundCode` | - |
//! | `ScanningCode`, `FoundCode` | `//`, end of line | `Done` | - |
//! | `ScanningCode`, `FoundCode` | `/*` | `InBlockComment` | `OpenBlockComment` |
//! | `InBlockComment` | `*/` | `ScanningCode` | `CloseBlockComment` |
//! | `InBlockComment` | end of line | `Done` | - |
//! | `InBlockComment` | anything else | `InBlockComment` | - |
//!
//! A line may alternate between code and block comments any number of times.
//!
//! ## Usage Example
//!
//! ```rust
//! use srcstat_core::language::classify_line;
//!
//! let first = classify_line("int x = 1; /* note", false);
//! assert!(first.is_code);
//! assert!(first.in_block_comment);
//!
//! let second = classify_line("still a note */", first.in_block_comment);
//! assert!(!second.is_code);
//! assert!(!second.in_block_comment);
//! ```

use super::tokenizer::{Token, Tokenizer};

/// Scanner position relative to comments on the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Outside any comment; nothing but whitespace seen since the line
    /// started or since the last block comment closed.
    ScanningCode,
    /// Outside any comment and code has been seen.
    FoundCode,
    /// Inside `/* */`, either opened on this line or carried in.
    InBlockComment,
    /// Line fully scanned.
    Done,
}

/// Mutation a transition applies to the [`LineState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    MarkCode,
    OpenBlockComment,
    CloseBlockComment,
}

/// Result of feeding one token to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: State,
    pub effect: Effect,
}

impl Step {
    const fn to(next: State) -> Self {
        Self {
            next,
            effect: Effect::None,
        }
    }

    const fn with(next: State, effect: Effect) -> Self {
        Self { next, effect }
    }
}

impl State {
    /// State a line starts in, given the flag carried from the previous line.
    #[must_use]
    pub const fn initial(in_block_comment: bool) -> Self {
        if in_block_comment {
            Self::InBlockComment
        } else {
            Self::ScanningCode
        }
    }

    /// Transition function of the classifier.
    #[must_use]
    pub fn step(self, token: Token) -> Step {
        match (self, token) {
            (Self::Done, _) => Step::to(Self::Done),

            (Self::InBlockComment, Token::BlockCommentEnd) => {
                Step::with(Self::ScanningCode, Effect::CloseBlockComment)
            }
            (Self::InBlockComment, Token::EndOfLine) => Step::to(Self::Done),
            (Self::InBlockComment, _) => Step::to(Self::InBlockComment),

            (Self::ScanningCode | Self::FoundCode, Token::EndOfLine | Token::LineCommentStart) => {
                Step::to(Self::Done)
            }
            (Self::ScanningCode | Self::FoundCode, Token::BlockCommentStart) => {
                Step::with(Self::InBlockComment, Effect::OpenBlockComment)
            }
            (Self::ScanningCode | Self::FoundCode, Token::AnyChar(c)) if c.is_whitespace() => {
                Step::to(self)
            }
            // A `*/` with no open comment is part of the code, e.g. `a*/b`.
            (Self::ScanningCode | Self::FoundCode, Token::AnyChar(_) | Token::BlockCommentEnd) => {
                Step::with(Self::FoundCode, Effect::MarkCode)
            }
        }
    }
}

/// 行ごとの判定状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineState {
    /// Carried across lines.
    pub in_block_comment: bool,
    /// Reset for every line.
    pub counts_as_code: bool,
}

impl LineState {
    #[must_use]
    pub const fn begin_line(in_block_comment: bool) -> Self {
        Self {
            in_block_comment,
            counts_as_code: false,
        }
    }

    pub const fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::MarkCode => self.counts_as_code = true,
            Effect::OpenBlockComment => self.in_block_comment = true,
            Effect::CloseBlockComment => self.in_block_comment = false,
        }
    }
}

/// Outcome of classifying one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClass {
    /// At least one non-whitespace character appeared outside comments.
    pub is_code: bool,
    /// The line ended inside an open block comment.
    pub in_block_comment: bool,
}

impl From<LineState> for LineClass {
    fn from(state: LineState) -> Self {
        Self {
            is_code: state.counts_as_code,
            in_block_comment: state.in_block_comment,
        }
    }
}

/// Classifies a single line.
///
/// `line` is expected to have tabs replaced and surrounding whitespace
/// trimmed, though neither is required for a correct answer.
/// `in_block_comment` is the flag returned for the previous line of the same
/// file (`false` for the first line).
#[must_use]
pub fn classify_line(line: &str, in_block_comment: bool) -> LineClass {
    let mut tokens = Tokenizer::new(line);
    let mut line_state = LineState::begin_line(in_block_comment);
    let mut state = State::initial(in_block_comment);

    while state != State::Done {
        let token = tokens.peek();
        let step = state.step(token);
        line_state.apply(step.effect);
        tokens.advance(token);
        state = step.next;
    }

    line_state.into()
}

/// Threads the block-comment flag through the lines of one file.
///
/// One instance per file; lines must be fed in order.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    in_block_comment: bool,
}

impl LineClassifier {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            in_block_comment: false,
        }
    }

    /// Classifies `line` and remembers where it left the comment state.
    pub fn classify(&mut self, line: &str) -> bool {
        let class = classify_line(line, self.in_block_comment);
        self.in_block_comment = class.in_block_comment;
        class.is_code
    }

    #[must_use]
    pub const fn is_in_block_comment(&self) -> bool {
        self.in_block_comment
    }

    /// 新しいファイルの処理前に呼び出す
    pub const fn reset(&mut self) {
        self.in_block_comment = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn class(is_code: bool, in_block_comment: bool) -> LineClass {
        LineClass {
            is_code,
            in_block_comment,
        }
    }

    #[test]
    fn blank_line_keeps_state() {
        assert_eq!(classify_line("", false), class(false, false));
        assert_eq!(classify_line("", true), class(false, true));
        assert_eq!(classify_line("   ", false), class(false, false));
    }

    #[test]
    fn plain_code() {
        assert_eq!(classify_line("int x = 1;", false), class(true, false));
    }

    #[test]
    fn line_comment_only() {
        assert_eq!(classify_line("// comment", false), class(false, false));
        assert_eq!(classify_line("//", false), class(false, false));
        assert_eq!(classify_line("  // indented", false), class(false, false));
    }

    #[test]
    fn code_then_line_comment() {
        assert_eq!(
            classify_line("int x = 1; // comment", false),
            class(true, false)
        );
    }

    #[test]
    fn line_comment_hides_block_marker() {
        assert_eq!(classify_line("// see /* here", false), class(false, false));
    }

    #[test]
    fn opening_block_comment() {
        assert_eq!(
            classify_line("/* start of comment", false),
            class(false, true)
        );
    }

    #[test]
    fn code_before_opening_block_comment() {
        assert_eq!(
            classify_line("int x = 1; /* trailing comment", false),
            class(true, true)
        );
    }

    #[test]
    fn inside_carried_block_comment() {
        assert_eq!(classify_line("still talking", true), class(false, true));
        assert_eq!(classify_line("// x /* y", true), class(false, true));
    }

    #[test]
    fn closing_marker_alone() {
        assert_eq!(classify_line("*/", true), class(false, false));
    }

    #[test]
    fn closing_marker_then_code() {
        assert_eq!(classify_line("*/ x = 1;", true), class(true, false));
        assert_eq!(classify_line("*/ return x;", true), class(true, false));
    }

    #[test]
    fn closing_marker_then_line_comment() {
        assert_eq!(classify_line("*/ // more", true), class(false, false));
    }

    #[test]
    fn single_line_block_comment() {
        assert_eq!(classify_line("/* note */", false), class(false, false));
        assert_eq!(classify_line("/**/", false), class(false, false));
    }

    #[test]
    fn code_after_single_line_block_comment() {
        assert_eq!(classify_line("/* note */ x++;", false), class(true, false));
    }

    #[test]
    fn code_before_single_line_block_comment() {
        assert_eq!(classify_line("x++; /* note */", false), class(true, false));
    }

    #[test]
    fn two_alternations_without_code() {
        assert_eq!(classify_line("/* a */ /* b */", false), class(false, false));
        assert_eq!(
            classify_line("/* a */ /* b */ /* c", false),
            class(false, true)
        );
    }

    #[test]
    fn two_alternations_with_code_between() {
        assert_eq!(
            classify_line("/* a */ f(); /* b */", false),
            class(true, false)
        );
    }

    #[test]
    fn code_before_between_and_after() {
        assert_eq!(
            classify_line("a(); /* x */ b(); /* y */ c(); /* z", false),
            class(true, true)
        );
    }

    #[test]
    fn carried_comment_closes_and_reopens() {
        assert_eq!(classify_line("*/ /* again", true), class(false, true));
        assert_eq!(classify_line("*/ go(); /* again", true), class(true, true));
        assert_eq!(classify_line("a */ b /* c */ d", true), class(true, false));
    }

    #[test]
    fn stray_close_marker_is_code() {
        assert_eq!(classify_line("*/", false), class(true, false));
    }

    #[test]
    fn block_markers_do_not_nest() {
        // the inner "*/" closes the only open comment
        assert_eq!(
            classify_line("/* outer /* inner */ tail", false),
            class(true, false)
        );
    }

    #[test]
    fn markers_in_string_literals_are_not_special() {
        assert_eq!(
            classify_line(r#"s = "http://example.com";"#, false),
            class(true, false)
        );
        assert_eq!(classify_line(r#""/*""#, false), class(true, true));
    }

    #[test]
    fn three_line_scenario() {
        let lines = ["int x = 1;", "/* comment", "end */ int y = 2;"];
        let mut in_block = false;
        let mut results = Vec::new();
        for line in lines {
            let c = classify_line(line, in_block);
            results.push(c.is_code);
            in_block = c.in_block_comment;
        }
        assert_eq!(results, [true, false, true]);
        assert!(!in_block);
    }

    #[test]
    fn classify_is_deterministic() {
        let line = "a /* b */ c // d";
        assert_eq!(classify_line(line, false), classify_line(line, false));
        assert_eq!(classify_line(line, true), classify_line(line, true));
    }

    #[test]
    fn step_from_done_is_terminal() {
        for token in [
            Token::AnyChar('x'),
            Token::EndOfLine,
            Token::LineCommentStart,
            Token::BlockCommentStart,
            Token::BlockCommentEnd,
        ] {
            assert_eq!(State::Done.step(token), Step::to(State::Done));
        }
    }

    #[test]
    fn step_inside_comment_only_exits_on_close() {
        let s = State::InBlockComment;
        assert_eq!(s.step(Token::AnyChar('x')).next, State::InBlockComment);
        assert_eq!(s.step(Token::LineCommentStart).next, State::InBlockComment);
        assert_eq!(s.step(Token::BlockCommentStart).next, State::InBlockComment);
        assert_eq!(
            s.step(Token::BlockCommentEnd),
            Step::with(State::ScanningCode, Effect::CloseBlockComment)
        );
    }

    #[test]
    fn whitespace_does_not_mark_code() {
        assert_eq!(
            State::ScanningCode.step(Token::AnyChar(' ')),
            Step::to(State::ScanningCode)
        );
        assert_eq!(
            State::ScanningCode.step(Token::AnyChar('a')),
            Step::with(State::FoundCode, Effect::MarkCode)
        );
    }

    #[test]
    fn line_classifier_threads_state() {
        let mut c = LineClassifier::new();
        assert!(c.classify("x = 1; /*"));
        assert!(c.is_in_block_comment());
        assert!(!c.classify("text"));
        assert!(!c.classify("*/"));
        assert!(!c.is_in_block_comment());
        assert!(c.classify("y = 2;"));
    }

    #[test]
    fn line_classifier_reset() {
        let mut c = LineClassifier::new();
        c.classify("/* open");
        c.reset();
        assert!(!c.is_in_block_comment());
        assert!(c.classify("code();"));
    }
}
