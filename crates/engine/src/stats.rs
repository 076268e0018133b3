use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use srcstat_core::stats::LineCounts;
use std::path::PathBuf;

use crate::error::EngineError;

/// 1ファイル分の統計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileStats {
    pub path: PathBuf,
    pub name: String,
    pub ext: String,
    pub size: u64,
    pub mtime: Option<DateTime<Local>>,
    pub counts: LineCounts,
    /// Source lines of code as configured.
    pub sloc: usize,
    pub is_binary: bool,
    /// The file ended inside an unterminated `/* */` comment.
    pub unterminated_comment: bool,
}

impl FileStats {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            ext,
            size: 0,
            mtime: None,
            counts: LineCounts::new(),
            sloc: 0,
            is_binary: false,
            unterminated_comment: false,
        }
    }
}

/// Outcome of one engine run.
#[derive(Debug, Default)]
pub struct RunResult {
    pub stats: Vec<FileStats>,
    pub errors: Vec<(PathBuf, EngineError)>,
}

impl RunResult {
    /// Line counts summed over all non-binary files.
    #[must_use]
    pub fn totals(&self) -> LineCounts {
        self.stats
            .iter()
            .filter(|s| !s.is_binary)
            .map(|s| s.counts)
            .sum()
    }
}
