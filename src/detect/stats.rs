// ============================================================================
// Detection Statistics
//
// Tallies which encodings and delimiters were picked during one merge run.
// ============================================================================

use super::delimiter::Delimiter;
use super::encoding::TextEncoding;
use super::DetectedFormat;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct DetectionStats {
    files_detected: usize,
    unreadable_files: usize,
    encodings: BTreeMap<TextEncoding, usize>,
    delimiters: BTreeMap<Delimiter, usize>,
}

impl DetectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully decoded file
    pub fn record(&mut self, format: &DetectedFormat) {
        self.files_detected += 1;
        *self.encodings.entry(format.encoding).or_insert(0) += 1;
        *self.delimiters.entry(format.delimiter).or_insert(0) += 1;
    }

    /// Record a file none of the encodings could decode
    pub fn record_unreadable(&mut self) {
        self.unreadable_files += 1;
    }

    pub fn files_detected(&self) -> usize {
        self.files_detected
    }

    pub fn unreadable_files(&self) -> usize {
        self.unreadable_files
    }

    pub fn encoding_count(&self, encoding: TextEncoding) -> usize {
        self.encodings.get(&encoding).copied().unwrap_or(0)
    }

    pub fn delimiter_count(&self, delimiter: Delimiter) -> usize {
        self.delimiters.get(&delimiter).copied().unwrap_or(0)
    }

    /// One-line summary, e.g. `encodings: utf-8 x3, cp1252 x1 | delimiters: comma x4`
    pub fn summary_line(&self) -> String {
        fn join<K: std::fmt::Display>(counts: &BTreeMap<K, usize>) -> String {
            if counts.is_empty() {
                return "none".to_string();
            }
            counts
                .iter()
                .map(|(key, count)| format!("{} x{}", key, count))
                .collect::<Vec<_>>()
                .join(", ")
        }

        format!(
            "encodings: {} | delimiters: {}",
            join(&self.encodings),
            join(&self.delimiters)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_summary() {
        let mut stats = DetectionStats::new();
        assert_eq!(stats.summary_line(), "encodings: none | delimiters: none");

        stats.record(&DetectedFormat {
            delimiter: Delimiter::Comma,
            encoding: TextEncoding::Utf8,
        });
        stats.record(&DetectedFormat {
            delimiter: Delimiter::Semicolon,
            encoding: TextEncoding::Utf8,
        });
        stats.record_unreadable();

        assert_eq!(stats.files_detected(), 2);
        assert_eq!(stats.unreadable_files(), 1);
        assert_eq!(stats.encoding_count(TextEncoding::Utf8), 2);
        assert_eq!(stats.delimiter_count(Delimiter::Tab), 0);
        assert_eq!(
            stats.summary_line(),
            "encodings: utf-8 x2 | delimiters: comma x1, semicolon x1"
        );
    }
}
