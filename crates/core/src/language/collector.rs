// crates/core/src/language/collector.rs
//! Per-line statistics pipeline.
//!
//! Cheap string checks sort out blank, import and brace-only lines first;
//! everything else goes through the comment-aware [`LineClassifier`].

use alloc::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::classifier::LineClassifier;
use crate::config::AnalysisConfig;
use crate::stats::{AnalysisResult, LineCounts};

/// 行の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Blank,
    Import,
    /// Only `{`, `}`, `;`, `(`, `)`.
    Brace,
    Code,
    Comment,
}

/// Replaces tabs with single spaces and trims.
#[must_use]
pub fn normalize_line(line: &str) -> Cow<'_, str> {
    let trimmed = line.trim();
    if trimmed.contains('\t') {
        Cow::Owned(trimmed.replace('\t', " "))
    } else {
        Cow::Borrowed(trimmed)
    }
}

fn is_brace_only(line: &str) -> bool {
    line.chars()
        .all(|c| matches!(c, '{' | '}' | ';' | '(' | ')') || c == ' ')
}

/// Collects [`LineCounts`] for one file, fed line by line in order.
#[derive(Debug, Clone)]
pub struct LineCollector<'c> {
    config: &'c AnalysisConfig,
    classifier: LineClassifier,
    counts: LineCounts,
}

impl<'c> LineCollector<'c> {
    #[must_use]
    pub const fn new(config: &'c AnalysisConfig) -> Self {
        Self {
            config,
            classifier: LineClassifier::new(),
            counts: LineCounts::new(),
        }
    }

    /// Classifies and records one physical line (line terminator optional).
    pub fn collect_line(&mut self, line: &str) -> LineKind {
        let kind = self.kind_of(&normalize_line(line));
        self.counts.record(kind);
        kind
    }

    fn kind_of(&mut self, text: &str) -> LineKind {
        if text.is_empty() {
            return LineKind::Blank;
        }
        // a brace or import inside an open comment is comment text
        if self.classifier.is_in_block_comment() {
            return self.classify(text);
        }
        if self.config.is_import(text) {
            // still scanned so a trailing `/*` opens a comment
            self.classifier.classify(text);
            return LineKind::Import;
        }
        if is_brace_only(text) {
            return LineKind::Brace;
        }
        self.classify(text)
    }

    fn classify(&mut self, text: &str) -> LineKind {
        if self.classifier.classify(text) {
            LineKind::Code
        } else {
            LineKind::Comment
        }
    }

    #[must_use]
    pub const fn counts(&self) -> &LineCounts {
        &self.counts
    }

    #[must_use]
    pub const fn is_in_block_comment(&self) -> bool {
        self.classifier.is_in_block_comment()
    }

    /// Clears counts and comment state before the next file.
    pub const fn reset(&mut self) {
        self.classifier.reset();
        self.counts = LineCounts::new();
    }

    #[must_use]
    pub const fn finish(self) -> AnalysisResult {
        AnalysisResult {
            counts: self.counts,
            sloc: self.counts.sloc(self.config),
            is_binary: false,
            unterminated_comment: self.classifier.is_in_block_comment(),
        }
    }
}
