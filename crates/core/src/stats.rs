use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::language::LineKind;

/// Per-kind line tallies for one file or an aggregate of files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    pub total: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
    pub import: usize,
    pub brace: usize,
}

impl LineCounts {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total: 0,
            code: 0,
            comment: 0,
            blank: 0,
            import: 0,
            brace: 0,
        }
    }

    pub const fn record(&mut self, kind: LineKind) {
        self.total += 1;
        match kind {
            LineKind::Blank => self.blank += 1,
            LineKind::Import => self.import += 1,
            LineKind::Brace => self.brace += 1,
            LineKind::Code => self.code += 1,
            LineKind::Comment => self.comment += 1,
        }
    }

    /// Source lines of code under `config`'s counting rules.
    #[must_use]
    pub const fn sloc(&self, config: &AnalysisConfig) -> usize {
        let mut sloc = self.code;
        if config.count_imports_as_code {
            sloc += self.import;
        }
        if config.count_braces_as_code {
            sloc += self.brace;
        }
        sloc
    }

    /// Share of code lines in percent; `0.0` for an empty file.
    #[must_use]
    pub fn code_percent(&self) -> f64 {
        percent(self.code, self.total)
    }

    #[must_use]
    pub fn comment_percent(&self) -> f64 {
        percent(self.comment, self.total)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        self.code += rhs.code;
        self.comment += rhs.comment;
        self.blank += rhs.blank;
        self.import += rhs.import;
        self.brace += rhs.brace;
    }
}

impl core::iter::Sum for LineCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), Add::add)
    }
}

/// Pure analysis result, independent of file system metadata.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub counts: LineCounts,
    /// Source lines of code as configured.
    pub sloc: usize,
    /// Whether the content was detected as binary.
    pub is_binary: bool,
    /// The content ended inside an unterminated `/* */` comment.
    pub unterminated_comment: bool,
}

impl AnalysisResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn binary() -> Self {
        Self {
            is_binary: true,
            ..Self::default()
        }
    }
}
