use alloc::string::String;

use crate::config::AnalysisConfig;
use crate::language::LineCollector;
use crate::stats::AnalysisResult;

/// Bytes inspected for a NUL when sniffing binary content.
pub const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// Count code/comment/blank lines in a byte slice.
///
/// Content with a NUL byte in its first [`BINARY_SNIFF_LEN`] bytes is
/// reported as binary and not counted. Invalid UTF-8 is decoded lossily.
#[must_use]
pub fn count_bytes(input: &[u8], config: &AnalysisConfig) -> AnalysisResult {
    if is_binary(input) {
        return AnalysisResult::binary();
    }
    count_text(&String::from_utf8_lossy(input), config)
}

/// Count code/comment/blank lines in text.
///
/// A trailing newline does not start an extra line.
#[must_use]
pub fn count_text(text: &str, config: &AnalysisConfig) -> AnalysisResult {
    let mut collector = LineCollector::new(config);
    for line in text.lines() {
        collector.collect_line(line);
    }
    collector.finish()
}

#[must_use]
pub fn is_binary(input: &[u8]) -> bool {
    let len = input.len().min(BINARY_SNIFF_LEN);
    input[..len].contains(&0)
}
