// ============================================================================
// Detection Module - Public API
//
// Works out how to read one CSV file: which delimiter separates its fields
// and which text encoding its bytes are in. Detection is a pure function of
// the file's bytes; nothing is cached between files or runs.
// ============================================================================

use log::debug;
use std::io;
use std::path::Path;

pub mod delimiter;
pub mod encoding;
pub mod stats;
pub mod strategies;

pub use delimiter::{Delimiter, DELIMITER_SAMPLE_SIZE};
pub use encoding::TextEncoding;
pub use stats::DetectionStats;
pub use strategies::{DelimiterStrategy, EncodingStrategy};

/// How one file is to be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedFormat {
    pub delimiter: Delimiter,
    pub encoding: TextEncoding,
}

/// A file's decoded text together with the format it was read with
#[derive(Debug, Clone)]
pub struct DecodedFile {
    pub format: DetectedFormat,
    pub content: String,
}

/// Orchestrates delimiter sniffing, decoding and statistics for a merge run
#[derive(Debug, Default)]
pub struct FormatDetector {
    encoding: EncodingStrategy,
    delimiter: DelimiterStrategy,
    stats: DetectionStats,
}

impl FormatDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategies(encoding: EncodingStrategy, delimiter: DelimiterStrategy) -> Self {
        Self {
            encoding,
            delimiter,
            stats: DetectionStats::new(),
        }
    }

    /// Guess the delimiter from the first bytes of a file
    pub fn sniff_delimiter(bytes: &[u8]) -> Delimiter {
        let sample = &bytes[..bytes.len().min(DELIMITER_SAMPLE_SIZE)];
        Delimiter::detect(&TextEncoding::Utf8.decode_lossy(sample))
    }

    /// Read and decode a file.
    ///
    /// `Ok(None)` means every candidate encoding produced empty text.
    pub fn detect_file(&mut self, path: &Path) -> io::Result<Option<DecodedFile>> {
        let bytes = std::fs::read(path)?;
        let decoded = self.detect_bytes(&bytes);

        match &decoded {
            Some(file) => debug!(
                "{}: {} encoding, {} delimiter",
                path.display(),
                file.format.encoding,
                file.format.delimiter
            ),
            None => debug!("{}: no encoding produced any text", path.display()),
        }

        Ok(decoded)
    }

    pub fn detect_bytes(&mut self, bytes: &[u8]) -> Option<DecodedFile> {
        let delimiter = match self.delimiter {
            DelimiterStrategy::Sniff => Self::sniff_delimiter(bytes),
            DelimiterStrategy::Force(delimiter) => delimiter,
        };

        let Some((encoding, content)) = self.encoding.decode(bytes) else {
            self.stats.record_unreadable();
            return None;
        };

        let format = DetectedFormat {
            delimiter,
            encoding,
        };
        self.stats.record(&format);
        Some(DecodedFile { format, content })
    }

    pub fn stats(&self) -> &DetectionStats {
        &self.stats
    }
}
