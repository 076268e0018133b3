// crates/cli/src/args.rs
//! Command-line arguments, grouped the way `--help` shows them.

use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser};

use crate::options::{OutputFormat, OutputMode, SortSpec};
use crate::parsers::{self, DateTimeArg, SizeArg};

#[derive(Parser, Debug)]
#[command(
    name = "srcstat",
    version = crate::VERSION,
    about = "C系ソースのコード行/コメント行/空行の集計ツール"
)]
pub struct Args {
    /// 対象パス（未指定はカレントディレクトリ）
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub scan: ScanOptions,

    #[command(flatten)]
    pub filter: FilterOptions,

    #[command(flatten)]
    pub counting: CountingOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub behavior: BehaviorOptions,
}

/// Directory traversal options
#[derive(ClapArgs, Debug)]
pub struct ScanOptions {
    /// 隠しファイルも対象にする
    #[arg(long, help_heading = "走査")]
    pub hidden: bool,

    /// .gitignore を無視する
    #[arg(long, help_heading = "走査")]
    pub no_gitignore: bool,

    /// 最大探索深さ
    #[arg(long, value_parser = parsers::parse_positive_usize, help_heading = "走査")]
    pub max_depth: Option<usize>,

    /// シンボリックリンクを辿る
    #[arg(long, help_heading = "走査")]
    pub follow: bool,

    /// 並列数（既定: CPU数）
    #[arg(short, long, value_parser = parsers::parse_usize_1_to_512, help_heading = "走査")]
    pub jobs: Option<usize>,
}

/// File selection options
#[derive(ClapArgs, Debug)]
pub struct FilterOptions {
    /// 含めるglob（カンマ区切り/複数指定可）
    #[arg(long, value_delimiter = ',', help_heading = "フィルタ")]
    pub include: Vec<String>,

    /// 除外するglob（カンマ区切り/複数指定可）
    #[arg(long, value_delimiter = ',', help_heading = "フィルタ")]
    pub exclude: Vec<String>,

    /// 拡張子フィルタ（カンマ区切り/複数指定可, 例: --ext c,h --ext java）
    #[arg(long, value_delimiter = ',', help_heading = "フィルタ")]
    pub ext: Vec<String>,

    /// 拡張子で絞り込まない
    #[arg(long, conflicts_with = "ext", help_heading = "フィルタ")]
    pub all_ext: bool,

    /// 最小ファイルサイズ (例: 10K, 5MiB)
    #[arg(long, help_heading = "フィルタ")]
    pub min_size: Option<SizeArg>,

    /// 最大ファイルサイズ (例: 10K, 5MiB)
    #[arg(long, help_heading = "フィルタ")]
    pub max_size: Option<SizeArg>,

    /// この日時以降に更新されたファイルのみ (例: 2024-01-31, RFC3339)
    #[arg(long, help_heading = "フィルタ")]
    pub since: Option<DateTimeArg>,
}

/// Line counting rules
#[derive(ClapArgs, Debug)]
pub struct CountingOptions {
    /// import文とみなす行頭文字列（複数指定可, 既定: "import ", "package "）
    #[arg(long = "import-prefix", help_heading = "集計")]
    pub import_prefixes: Vec<String>,

    /// import文をコード行に含める
    #[arg(long, help_heading = "集計")]
    pub imports_as_code: bool,

    /// 括弧のみの行をコード行に含める
    #[arg(long, help_heading = "集計")]
    pub braces_as_code: bool,
}

/// Output-related options
#[derive(ClapArgs, Debug)]
pub struct OutputOptions {
    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "table", help_heading = "出力")]
    pub format: OutputFormat,

    /// ソートキー（複数可, 例: code:desc,name）
    #[arg(long, default_value = "name", help_heading = "出力")]
    pub sort: SortSpec,

    /// 上位N件のみ表示
    #[arg(long, value_parser = parsers::parse_positive_usize, help_heading = "出力")]
    pub top: Option<usize>,

    /// 出力モード
    #[arg(long, value_enum, default_value = "full", help_heading = "出力")]
    pub mode: OutputMode,

    /// CSV/TSV 末尾に TOTAL 行を出力
    #[arg(long, help_heading = "出力")]
    pub total_row: bool,
}

/// Runtime behavior
#[derive(ClapArgs, Debug)]
pub struct BehaviorOptions {
    /// 最初のエラーで中断する
    #[arg(long, help_heading = "動作")]
    pub strict: bool,

    /// ログを詳細にする（-v: info, -vv: debug, -vvv: trace）
    #[arg(short, long, action = ArgAction::Count, help_heading = "動作")]
    pub verbose: u8,
}
