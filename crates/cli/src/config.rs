// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::{AppError, Result};
use crate::options::{OutputFormat, OutputMode, SortKey};
use srcstat_core::config::AnalysisConfig;
pub use srcstat_engine::config::{
    Config, ConfigBuilder, FilterConfig, FilterConfigBuilder, WalkOptions, WalkOptionsBuilder,
};
use std::path::PathBuf;

/// Everything one invocation needs: engine settings plus presentation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: Config,
    pub format: OutputFormat,
    pub sort: Vec<(SortKey, bool)>,
    pub top_n: Option<usize>,
    pub mode: OutputMode,
    pub total_row: bool,
}

impl TryFrom<Args> for AppConfig {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self> {
        let walk = walk_options_from_args(&args)?;
        let filter = filter_config_from_args(&args)?;
        let analysis = analysis_config_from_args(&args);

        let engine = ConfigBuilder::default()
            .walk(walk)
            .filter(filter)
            .analysis(analysis)
            .strict(args.behavior.strict)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            engine,
            format: args.output.format,
            sort: args.output.sort.0,
            top_n: args.output.top,
            mode: args.output.mode,
            total_row: args.output.total_row,
        })
    }
}

fn walk_options_from_args(args: &Args) -> Result<WalkOptions> {
    let scan = &args.scan;

    let roots = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };

    WalkOptionsBuilder::default()
        .roots(roots)
        .threads(scan.jobs.unwrap_or_else(num_cpus::get))
        .hidden(scan.hidden)
        .git_ignore(!scan.no_gitignore)
        .max_depth(scan.max_depth)
        .follow_links(scan.follow)
        .override_include(args.filter.include.clone())
        .override_exclude(args.filter.exclude.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

fn filter_config_from_args(args: &Args) -> Result<FilterConfig> {
    let filter = &args.filter;
    let mut builder = FilterConfigBuilder::default();
    builder
        .min_size(filter.min_size.map(|s| s.0))
        .max_size(filter.max_size.map(|s| s.0))
        .mtime_since(filter.since.map(|d| d.0));

    if filter.all_ext {
        builder.allow_ext(Vec::<String>::new());
    } else if !filter.ext.is_empty() {
        let exts: Vec<String> = filter
            .ext
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        builder.allow_ext(exts);
    }

    builder.build().map_err(|e| AppError::Config(e.to_string()))
}

fn analysis_config_from_args(args: &Args) -> AnalysisConfig {
    let counting = &args.counting;
    let mut analysis = AnalysisConfig {
        count_imports_as_code: counting.imports_as_code,
        count_braces_as_code: counting.braces_as_code,
        ..AnalysisConfig::default()
    };
    if !counting.import_prefixes.is_empty() {
        analysis.import_prefixes.clone_from(&counting.import_prefixes);
    }
    analysis
}
