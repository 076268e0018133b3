use crate::cancel::CancelToken;
use crate::config::{FilterConfig, WalkOptions};
use crate::error::{EngineError, Result};
use crossbeam_channel::Sender;
use ignore::WalkBuilder;
use std::path::PathBuf;

/// Parallel recursive directory walk.
///
/// Every regular file passing `filters` is sent to `tx` with its metadata.
/// The walk stops early once `cancel` is set or the receiver hangs up.
///
/// # Errors
/// Returns an error if a root does not exist or an override glob is invalid.
pub fn walk_parallel(
    options: &WalkOptions,
    filters: &FilterConfig,
    cancel: &CancelToken,
    tx: &Sender<(PathBuf, std::fs::Metadata)>,
) -> Result<()> {
    let Some((first, rest)) = options.roots.split_first() else {
        return Ok(());
    };

    for root in &options.roots {
        if !root.exists() {
            return Err(EngineError::PathNotFound(root.clone()));
        }
    }

    let mut builder = WalkBuilder::new(first);
    for root in rest {
        builder.add(root);
    }

    builder
        .threads(options.threads)
        .hidden(!options.hidden)
        .git_ignore(options.git_ignore)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth);

    // ignore crate only supports one Overrides instance per WalkBuilder.
    // Exclude patterns use the `!` prefix convention.
    if !options.override_include.is_empty() || !options.override_exclude.is_empty() {
        let mut ov_builder = ignore::overrides::OverrideBuilder::new(first);
        for ov in &options.override_include {
            ov_builder.add(ov)?;
        }
        for ov in &options.override_exclude {
            ov_builder.add(&format!("!{ov}"))?;
        }
        builder.overrides(ov_builder.build()?);
    }

    let filters = filters.clone();
    builder.filter_entry(move |entry| {
        if entry.file_type().is_some_and(|ft| ft.is_dir()) {
            return true;
        }

        let ext = entry.path().extension().and_then(|s| s.to_str());
        if !filters.allows_extension(ext) {
            return false;
        }

        if (filters.min_size.is_some() || filters.max_size.is_some() || filters.mtime_since.is_some())
            && let Ok(meta) = entry.metadata()
        {
            let size = meta.len();
            if filters.min_size.is_some_and(|min| size < min) {
                return false;
            }
            if filters.max_size.is_some_and(|max| size > max) {
                return false;
            }
            if let Some(since) = filters.mtime_since
                && let Ok(mod_time) = meta.modified()
            {
                let dt: chrono::DateTime<chrono::Local> = mod_time.into();
                if dt < since {
                    return false;
                }
            }
        }

        true
    });

    let walker = builder.build_parallel();
    walker.run(|| {
        let tx = tx.clone();
        let cancel = cancel.clone();
        Box::new(move |entry| {
            if cancel.is_cancelled() {
                return ignore::WalkState::Quit;
            }
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    match entry.metadata() {
                        Ok(meta) => {
                            if tx.send((entry.path().to_owned(), meta)).is_err() {
                                return ignore::WalkState::Quit;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(path = %entry.path().display(), "skipping file: {e}");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("walk error: {e}"),
            }
            ignore::WalkState::Continue
        })
    });

    Ok(())
}
