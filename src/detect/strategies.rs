// ============================================================================
// Detection Strategies
//
// Policy layer deciding how a file's encoding and delimiter are chosen:
// tried in sequence / sniffed by default, or forced from the command line.
// ============================================================================

use super::delimiter::Delimiter;
use super::encoding::TextEncoding;
use std::fmt;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Strategy for determining file encodings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingStrategy {
    /// Try a sequence of encodings until one yields any text
    TrySequence(Vec<TextEncoding>),

    /// Decode every file with one encoding
    Force(TextEncoding),
}

impl EncodingStrategy {
    /// utf-8, then latin-1, then cp1252
    pub fn default_sequence() -> Self {
        EncodingStrategy::TrySequence(TextEncoding::CANDIDATES.to_vec())
    }

    pub fn candidates(&self) -> &[TextEncoding] {
        match self {
            EncodingStrategy::TrySequence(encodings) => encodings,
            EncodingStrategy::Force(encoding) => std::slice::from_ref(encoding),
        }
    }

    /// Decode with the first candidate that produces non-empty text.
    ///
    /// A leading UTF-8 byte order mark settles the question for utf-8 even
    /// when nothing follows it.
    pub fn decode(&self, bytes: &[u8]) -> Option<(TextEncoding, String)> {
        let has_bom = bytes.starts_with(UTF8_BOM);
        self.candidates().iter().find_map(|&encoding| {
            let text = encoding.decode_lossy(bytes);
            let accepted = !text.is_empty() || (has_bom && encoding == TextEncoding::Utf8);
            accepted.then_some((encoding, text))
        })
    }
}

impl Default for EncodingStrategy {
    fn default() -> Self {
        Self::default_sequence()
    }
}

impl fmt::Display for EncodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingStrategy::Force(enc) => write!(f, "force {}", enc),
            EncodingStrategy::TrySequence(encodings) => {
                write!(f, "try sequence: ")?;
                for (i, enc) in encodings.iter().enumerate() {
                    if i > 0 {
                        write!(f, " → ")?;
                    }
                    write!(f, "{}", enc)?;
                }
                Ok(())
            }
        }
    }
}

/// Strategy for determining the field delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterStrategy {
    /// Count candidates in the file's leading sample
    #[default]
    Sniff,

    /// Use the same delimiter for every file
    Force(Delimiter),
}

impl fmt::Display for DelimiterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelimiterStrategy::Sniff => write!(f, "sniff"),
            DelimiterStrategy::Force(delimiter) => write!(f, "force {}", delimiter),
        }
    }
}
