use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::stats::FileStats;
use chrono::Local;
use srcstat_core::language::LineCollector;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Process a single file and return its statistics.
///
/// # Errors
/// Fails when the file cannot be read or the run was cancelled.
pub fn process_file(
    (path, meta): (PathBuf, std::fs::Metadata),
    config: &Config,
) -> Result<FileStats> {
    if config.cancel.is_cancelled() {
        return Err(EngineError::Cancelled);
    }

    let mut stats = FileStats::new(path.clone());
    stats.size = meta.len();
    stats.mtime = meta.modified().ok().map(chrono::DateTime::<Local>::from);

    let file = File::open(&path).map_err(|e| EngineError::FileRead {
        path: path.clone(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);

    // Binary check (initial buffer)
    {
        let buffer = reader.fill_buf().map_err(|e| EngineError::FileRead {
            path: path.clone(),
            source: e,
        })?;
        if buffer.is_empty() {
            return Ok(stats);
        }
        if srcstat_core::parser::is_binary(buffer) {
            tracing::debug!(path = %path.display(), "skipping binary file");
            stats.is_binary = true;
            return Ok(stats);
        }
    }

    process_content(&mut reader, config, &path, &mut stats)?;
    tracing::debug!(
        path = %path.display(),
        total = stats.counts.total,
        code = stats.counts.code,
        comment = stats.counts.comment,
        "counted"
    );
    Ok(stats)
}

/// 行単位でコレクタに流し込む
fn process_content<R: BufRead>(
    reader: &mut R,
    config: &Config,
    path: &Path,
    stats: &mut FileStats,
) -> Result<()> {
    let mut collector = LineCollector::new(&config.analysis);
    let mut line_buf = Vec::new();

    loop {
        if config.cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        line_buf.clear();
        let read = reader
            .read_until(b'\n', &mut line_buf)
            .map_err(|e| EngineError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
        if read == 0 {
            break;
        }

        // Use lossy conversion to support non-UTF8 text files
        collector.collect_line(&String::from_utf8_lossy(&line_buf));
    }

    let result = collector.finish();
    if result.unterminated_comment {
        tracing::warn!(path = %path.display(), "file ends inside an unterminated block comment");
    }
    stats.counts = result.counts;
    stats.sloc = result.sloc;
    stats.unterminated_comment = result.unterminated_comment;
    Ok(())
}
