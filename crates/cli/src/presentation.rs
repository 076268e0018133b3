// crates/cli/src/presentation.rs
use crate::config::AppConfig;
use crate::error::Result;
use crate::options::{OutputFormat, OutputMode, SortKey};
use hashbrown::HashMap;
use serde::Serialize;
use srcstat_core::stats::LineCounts;
use srcstat_engine::stats::FileStats;
use std::cmp::Ordering;
use std::io::Write;

/// One output line: a file, an extension group, or the grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub ext: String,
    pub files: usize,
    #[serde(flatten)]
    pub counts: LineCounts,
    pub sloc: usize,
    pub code_percent: f64,
}

impl Row {
    fn new(label: String, ext: String, files: usize, counts: LineCounts, sloc: usize) -> Self {
        Self {
            label,
            ext,
            files,
            counts,
            sloc,
            code_percent: round2(counts.code_percent()),
        }
    }

    fn from_file(s: &FileStats) -> Self {
        Self::new(s.path.display().to_string(), s.ext.clone(), 1, s.counts, s.sloc)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    version: &'static str,
    mode: OutputMode,
    #[serde(skip_serializing_if = "<[Row]>::is_empty")]
    rows: &'a [Row],
    total: &'a Row,
}

/// Builds the rows for `config.mode`, sorted and truncated.
#[must_use]
pub fn build_rows(stats: &[FileStats], config: &AppConfig) -> (Vec<Row>, Row) {
    let files: Vec<&FileStats> = stats.iter().filter(|s| !s.is_binary).collect();

    let counts: LineCounts = files.iter().map(|s| s.counts).sum();
    let sloc = files.iter().map(|s| s.sloc).sum();
    let total = Row::new("TOTAL".to_string(), String::new(), files.len(), counts, sloc);

    let mut rows = match config.mode {
        OutputMode::Full => files.iter().map(|s| Row::from_file(s)).collect(),
        OutputMode::Summary => summarize_by_ext(&files),
        OutputMode::TotalOnly => Vec::new(),
    };

    sort_rows(&mut rows, &config.sort);
    if let Some(n) = config.top_n {
        rows.truncate(n);
    }
    (rows, total)
}

fn summarize_by_ext(files: &[&FileStats]) -> Vec<Row> {
    let mut groups: HashMap<&str, (usize, LineCounts, usize)> = HashMap::new();
    for s in files {
        let entry = groups.entry(s.ext.as_str()).or_default();
        entry.0 += 1;
        entry.1 += s.counts;
        entry.2 += s.sloc;
    }
    groups
        .into_iter()
        .map(|(ext, (n, counts, sloc))| {
            let label = if ext.is_empty() {
                "(noext)".to_string()
            } else {
                ext.to_string()
            };
            Row::new(label, ext.to_string(), n, counts, sloc)
        })
        .collect()
}

fn sort_rows(rows: &mut [Row], keys: &[(SortKey, bool)]) {
    rows.sort_by(|a, b| {
        for (key, desc) in keys {
            let order = match key {
                SortKey::Total => a.counts.total.cmp(&b.counts.total),
                SortKey::Code => a.counts.code.cmp(&b.counts.code),
                SortKey::Comment => a.counts.comment.cmp(&b.counts.comment),
                SortKey::Blank => a.counts.blank.cmp(&b.counts.blank),
                SortKey::Import => a.counts.import.cmp(&b.counts.import),
                SortKey::Brace => a.counts.brace.cmp(&b.counts.brace),
                SortKey::Percent => a.code_percent.total_cmp(&b.code_percent),
                SortKey::Name => a.label.cmp(&b.label),
                SortKey::Ext => a.ext.cmp(&b.ext),
            };
            if order != Ordering::Equal {
                return if *desc { order.reverse() } else { order };
            }
        }
        // stable fallback keeps output deterministic
        a.label.cmp(&b.label)
    });
}

/// Writes the report for `stats` in the configured format.
///
/// # Errors
/// Fails when writing to `out` or serializing fails.
pub fn write_results<W: Write>(out: &mut W, stats: &[FileStats], config: &AppConfig) -> Result<()> {
    let (rows, total) = build_rows(stats, config);
    match config.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report(&rows, &total, config))?;
            writeln!(out)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *out, &report(&rows, &total, config))?,
        OutputFormat::Md => write_markdown(out, &rows, &total, config)?,
        OutputFormat::Csv => write_sv(out, &rows, &total, config, ',')?,
        OutputFormat::Tsv => write_sv(out, &rows, &total, config, '\t')?,
        OutputFormat::Table => write_table(out, &rows, &total, config)?,
    }
    Ok(())
}

fn report<'a>(rows: &'a [Row], total: &'a Row, config: &AppConfig) -> Report<'a> {
    Report {
        version: crate::VERSION,
        mode: config.mode,
        rows,
        total,
    }
}

fn first_column(config: &AppConfig) -> &'static str {
    match config.mode {
        OutputMode::Summary => "EXT",
        _ => "FILE",
    }
}

fn write_table<W: Write>(out: &mut W, rows: &[Row], total: &Row, config: &AppConfig) -> Result<()> {
    writeln!(
        out,
        "srcstat v{} · parallel={}",
        crate::VERSION,
        config.engine.walk.threads
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{:>9}{:>9}{:>9}{:>9}{:>9}{:>9}{:>9}   {}",
        "TOTAL",
        "CODE",
        "COMMENT",
        "BLANK",
        "IMPORT",
        "BRACE",
        "CODE%",
        first_column(config)
    )?;
    writeln!(out, "{}", "-".repeat(80))?;

    for r in rows {
        write_table_row(out, r, &r.label)?;
    }

    writeln!(out, "---")?;
    write_table_row(out, total, &format!("TOTAL ({} files)", total.files))?;
    Ok(())
}

fn write_table_row<W: Write>(out: &mut W, r: &Row, label: &str) -> Result<()> {
    let c = &r.counts;
    writeln!(
        out,
        "{:>9}{:>9}{:>9}{:>9}{:>9}{:>9}{:>9.2}   {label}",
        c.total, c.code, c.comment, c.blank, c.import, c.brace, r.code_percent
    )?;
    Ok(())
}

fn write_markdown<W: Write>(
    out: &mut W,
    rows: &[Row],
    total: &Row,
    config: &AppConfig,
) -> Result<()> {
    writeln!(out, "### Line Statistics")?;
    writeln!(out)?;
    writeln!(
        out,
        "| Total | Code | Comment | Blank | Import | Brace | Code % | {} |",
        first_column(config)
    )?;
    writeln!(out, "|---:|---:|---:|---:|---:|---:|---:|:---|")?;
    for r in rows {
        write_markdown_row(out, r, &r.label.replace('|', "\\|"))?;
    }
    write_markdown_row(out, total, "**TOTAL**")?;
    Ok(())
}

fn write_markdown_row<W: Write>(out: &mut W, r: &Row, label: &str) -> Result<()> {
    let c = &r.counts;
    writeln!(
        out,
        "| {} | {} | {} | {} | {} | {} | {:.2} | {label} |",
        c.total, c.code, c.comment, c.blank, c.import, c.brace, r.code_percent
    )?;
    Ok(())
}

fn write_sv<W: Write>(
    out: &mut W,
    rows: &[Row],
    total: &Row,
    config: &AppConfig,
    delimiter: char,
) -> Result<()> {
    let header = [
        "total",
        "code",
        "comment",
        "blank",
        "import",
        "brace",
        "sloc",
        "code_percent",
        if matches!(config.mode, OutputMode::Summary) {
            "ext"
        } else {
            "path"
        },
    ];
    writeln!(out, "{}", header.join(&delimiter.to_string()))?;

    for r in rows {
        write_sv_row(out, r, &r.label, delimiter)?;
    }
    if config.total_row || matches!(config.mode, OutputMode::TotalOnly) {
        write_sv_row(out, total, "TOTAL", delimiter)?;
    }
    Ok(())
}

fn write_sv_row<W: Write>(out: &mut W, r: &Row, label: &str, delimiter: char) -> Result<()> {
    let c = &r.counts;
    let label = if delimiter == ',' && label.contains([',', '"', '\n']) {
        format!("\"{}\"", label.replace('"', "\"\""))
    } else {
        label.to_string()
    };
    let d = delimiter;
    writeln!(
        out,
        "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{:.2}{d}{label}",
        c.total, c.code, c.comment, c.blank, c.import, c.brace, r.sloc, r.code_percent
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;
    use std::path::PathBuf;

    fn file(path: &str, code: usize, comment: usize) -> FileStats {
        let mut s = FileStats::new(PathBuf::from(path));
        s.counts.code = code;
        s.counts.comment = comment;
        s.counts.total = code + comment;
        s.sloc = code;
        s
    }

    fn config(argv: &[&str]) -> AppConfig {
        AppConfig::try_from(Args::try_parse_from(argv).unwrap()).unwrap()
    }

    fn render(stats: &[FileStats], argv: &[&str]) -> String {
        let mut out = Vec::new();
        write_results(&mut out, stats, &config(argv)).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> Vec<FileStats> {
        let mut bin = file("blob.c", 0, 0);
        bin.is_binary = true;
        vec![file("b.c", 3, 1), file("a.java", 1, 3), file("c.c", 6, 0), bin]
    }

    #[test]
    fn full_rows_sorted_by_name() {
        let (rows, total) = build_rows(&sample(), &config(&["srcstat"]));
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["a.java", "b.c", "c.c"]);
        assert_eq!(total.files, 3);
        assert_eq!(total.counts.code, 10);
        assert_eq!(total.counts.total, 14);
    }

    #[test]
    fn sort_desc_and_top() {
        let (rows, _) = build_rows(
            &sample(),
            &config(&["srcstat", "--sort", "code:desc", "--top", "2"]),
        );
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["c.c", "b.c"]);
    }

    #[test]
    fn summary_groups_by_extension() {
        let (rows, _) = build_rows(&sample(), &config(&["srcstat", "--mode", "summary"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "c");
        assert_eq!(rows[0].files, 2);
        assert_eq!(rows[0].counts.code, 9);
        assert_eq!(rows[1].label, "java");
    }

    #[test]
    fn total_only_has_no_rows() {
        let (rows, total) = build_rows(&sample(), &config(&["srcstat", "--mode", "total-only"]));
        assert!(rows.is_empty());
        assert_eq!(total.files, 3);
    }

    #[test]
    fn code_percent_is_rounded() {
        let (rows, _) = build_rows(&[file("x.c", 1, 2)], &config(&["srcstat"]));
        assert!((rows[0].code_percent - 33.33).abs() < 1e-9);
    }

    #[test]
    fn csv_output_with_total_row() {
        let out = render(&sample(), &["srcstat", "--format", "csv", "--total-row"]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[0],
            "total,code,comment,blank,import,brace,sloc,code_percent,path"
        );
        assert_eq!(lines[1], "4,1,3,0,0,0,1,25.00,a.java");
        assert_eq!(lines.last().copied(), Some("14,10,4,0,0,0,10,71.43,TOTAL"));
    }

    #[test]
    fn csv_quotes_awkward_paths() {
        let out = render(&[file("a,b.c", 1, 0)], &["srcstat", "--format", "csv"]);
        assert!(out.lines().nth(1).unwrap().ends_with("\"a,b.c\""));
    }

    #[test]
    fn tsv_uses_tabs() {
        let out = render(&[file("a.c", 1, 0)], &["srcstat", "--format", "tsv"]);
        assert!(out.lines().next().unwrap().contains("total\tcode"));
    }

    #[test]
    fn json_report_shape() {
        let out = render(&sample(), &["srcstat", "--format", "json"]);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["rows"].as_array().unwrap().len(), 3);
        assert_eq!(v["rows"][0]["label"], "a.java");
        assert_eq!(v["rows"][0]["comment"], 3);
        assert_eq!(v["total"]["code"], 10);
        assert_eq!(v["mode"], "full");
    }

    #[test]
    fn json_mode_matches_cli_spelling() {
        let out = render(
            &sample(),
            &["srcstat", "--format", "json", "--mode", "total-only"],
        );
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["mode"], "total-only");
    }

    #[test]
    fn yaml_report_mentions_total() {
        let out = render(&sample(), &["srcstat", "--format", "yaml"]);
        assert!(out.contains("total:"));
        assert!(out.contains("label: TOTAL"));
    }

    #[test]
    fn markdown_table() {
        let out = render(&[file("a|b.c", 2, 0)], &["srcstat", "--format", "md"]);
        assert!(out.contains("| Total | Code |"));
        assert!(out.contains("a\\|b.c"));
        assert!(out.contains("**TOTAL**"));
    }

    #[test]
    fn table_output_has_total_line() {
        let out = render(&sample(), &["srcstat", "--jobs", "2"]);
        assert!(out.starts_with(&format!("srcstat v{} · parallel=2", crate::VERSION)));
        assert!(out.contains("TOTAL (3 files)"));
        assert!(out.contains("a.java"));
        assert!(!out.contains("blob.c"));
    }
}
