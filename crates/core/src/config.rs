use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

/// Prefixes that mark an import statement unless configured otherwise.
pub const DEFAULT_IMPORT_PREFIXES: &[&str] = &["import ", "package "];

/// 集計設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// A trimmed line starting with any of these is an import statement.
    pub import_prefixes: Vec<String>,
    /// Include import lines in `sloc`.
    pub count_imports_as_code: bool,
    /// Include brace-only lines in `sloc`.
    pub count_braces_as_code: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            import_prefixes: DEFAULT_IMPORT_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
            count_imports_as_code: false,
            count_braces_as_code: false,
        }
    }
}

impl AnalysisConfig {
    /// Config with no import prefixes: every import line is plain code.
    #[must_use]
    pub fn without_imports() -> Self {
        Self {
            import_prefixes: vec![],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_import(&self, line: &str) -> bool {
        self.import_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }
}
