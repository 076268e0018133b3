// crates/engine/src/lib.rs
use rayon::prelude::*;
use std::fs::Metadata;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

pub mod cancel;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod processor;
pub mod stats;

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::stats::{FileStats, RunResult};

/// Run the scanning engine over `config.walk.roots`.
///
/// Returns a `RunResult` containing both successfully processed file statistics
/// and any errors encountered during processing. Stats and errors are sorted
/// by path.
///
/// # Errors
///
/// Returns an error for walk failures, for cancellation, and in strict mode
/// for the first per-file error. Otherwise per-file errors are collected in
/// `RunResult::errors`.
///
/// In strict mode the first per-file error also cancels `config.cancel`, so
/// the walker and in-flight files stop early.
pub fn run(config: &Config) -> Result<RunResult> {
    let (tx, rx) = crossbeam_channel::bounded(1024);

    let walk_cfg = config.walk.clone();
    let filter_cfg = config.filter.clone();
    let cancel = config.cancel.clone();

    let walker = std::thread::spawn(move || {
        crate::filesystem::walk_parallel(&walk_cfg, &filter_cfg, &cancel, &tx)
    });

    let outcome = process_items(rx.into_iter(), config);

    let walked = walker
        .join()
        .map_err(|_| EngineError::Config("directory walker panicked".to_string()))?;
    let result = outcome?;
    walked?;

    if config.cancel.is_cancelled() {
        return Err(EngineError::Cancelled);
    }

    tracing::info!(
        files = result.stats.len(),
        errors = result.errors.len(),
        "scan finished"
    );
    Ok(result)
}

fn process_items<I>(items: I, config: &Config) -> Result<RunResult>
where
    I: Iterator<Item = (PathBuf, Metadata)> + Send,
{
    let iter = items.par_bridge();

    let mut result = if config.strict {
        // Strict mode: first failure wins and stops everyone else
        let failure: Mutex<Option<EngineError>> = Mutex::new(None);
        let stats: Vec<FileStats> = iter
            .filter_map(|item| match processor::process_file(item, config) {
                Ok(stats) => Some(stats),
                Err(EngineError::Cancelled) => None,
                Err(e) => {
                    let mut slot = failure.lock().unwrap_or_else(PoisonError::into_inner);
                    if slot.is_none() {
                        *slot = Some(e);
                        config.cancel.cancel();
                    }
                    None
                }
            })
            .collect();

        if let Some(e) = failure.into_inner().unwrap_or_else(PoisonError::into_inner) {
            return Err(e);
        }
        RunResult {
            stats,
            errors: Vec::new(),
        }
    } else {
        let outcomes: Vec<(PathBuf, Result<FileStats>)> = iter
            .map(|item| {
                let path = item.0.clone();
                (path, processor::process_file(item, config))
            })
            .collect();

        let mut result = RunResult::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(stats) => result.stats.push(stats),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "{e}");
                    result.errors.push((path, e));
                }
            }
        }
        result
    };

    result.stats.sort_by(|a, b| a.path.cmp(&b.path));
    result.errors.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(result)
}
