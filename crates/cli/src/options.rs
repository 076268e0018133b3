use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Csv,
    Tsv,
    Json,
    Yaml,
    Md,
}

/// 出力モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// 全ファイルを個別表示
    #[default]
    Full,
    /// 拡張子別サマリーのみ
    Summary,
    /// 合計のみ表示
    TotalOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Total,
    Code,
    Comment,
    Blank,
    Import,
    Brace,
    /// Share of code lines
    Percent,
    Name,
    Ext,
}

/// Ordered list of `(key, descending)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec(pub Vec<(SortKey, bool)>);

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let specs = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(parse_single_spec)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(specs))
    }
}

fn parse_single_spec(part: &str) -> Result<(SortKey, bool), String> {
    let (key_str, desc) = part.split_once(':').map_or((part, false), |(k, d)| {
        (k.trim(), matches!(d.trim(), "desc" | "DESC"))
    });

    let key = parse_sort_key(key_str)?;
    Ok((key, desc))
}

fn parse_sort_key(key_str: &str) -> Result<SortKey, String> {
    match key_str.to_ascii_lowercase().as_str() {
        "total" | "lines" => Ok(SortKey::Total),
        "code" | "sloc" => Ok(SortKey::Code),
        "comment" => Ok(SortKey::Comment),
        "blank" => Ok(SortKey::Blank),
        "import" => Ok(SortKey::Import),
        "brace" => Ok(SortKey::Brace),
        "percent" => Ok(SortKey::Percent),
        "name" => Ok(SortKey::Name),
        "ext" => Ok(SortKey::Ext),
        other => Err(format!("Unknown sort key: {other}")),
    }
}
