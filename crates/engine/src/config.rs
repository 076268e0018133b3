use crate::cancel::CancelToken;
use derive_builder::Builder;
use srcstat_core::config::AnalysisConfig;
use std::path::PathBuf;

/// Extensions of languages using `//` and `/* */` comments.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "c", "h", "cc", "cpp", "cxx", "hh", "hpp", "hxx", "m", "mm", "java", "groovy", "scala", "kt",
    "kts", "cs", "go", "rs", "swift", "dart", "js", "mjs", "cjs", "jsx", "ts", "tsx", "php",
];

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct WalkOptions {
    #[builder(default)]
    pub roots: Vec<PathBuf>,
    #[builder(default = "1")]
    pub threads: usize,
    #[builder(default)]
    pub hidden: bool,
    #[builder(default = "true")]
    pub git_ignore: bool,
    #[builder(default)]
    pub max_depth: Option<usize>,
    #[builder(default)]
    pub follow_links: bool,
    #[builder(default)]
    pub override_include: Vec<String>,
    #[builder(default)]
    pub override_exclude: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            roots: vec![],
            threads: 1,
            hidden: false,
            git_ignore: true,
            max_depth: None,
            follow_links: false,
            override_include: vec![],
            override_exclude: vec![],
        }
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct FilterConfig {
    /// Empty means every file is accepted.
    #[builder(default = "default_extensions()")]
    pub allow_ext: Vec<String>,
    #[builder(default)]
    pub min_size: Option<u64>,
    #[builder(default)]
    pub max_size: Option<u64>,
    #[builder(default)]
    pub mtime_since: Option<chrono::DateTime<chrono::Local>>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allow_ext: default_extensions(),
            min_size: None,
            max_size: None,
            mtime_since: None,
        }
    }
}

impl FilterConfig {
    /// Case-insensitive extension check against `allow_ext`.
    #[must_use]
    pub fn allows_extension(&self, ext: Option<&str>) -> bool {
        if self.allow_ext.is_empty() {
            return true;
        }
        ext.is_some_and(|ext| self.allow_ext.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct Config {
    #[builder(default)]
    pub walk: WalkOptions,
    #[builder(default)]
    pub filter: FilterConfig,
    #[builder(default)]
    pub analysis: AnalysisConfig,

    /// Abort on the first per-file error.
    #[builder(default)]
    pub strict: bool,
    #[builder(default)]
    pub cancel: CancelToken,
}
