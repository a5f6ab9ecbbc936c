// ============================================================================
// Text Decoding
//
// Lossy decoders for the candidate encodings. Byte sequences that are not
// valid in the chosen encoding are dropped instead of being replaced, so a
// stray legacy byte in an otherwise UTF-8 file does not leave a `�` in the
// merged output.
// ============================================================================

use crate::errors::ConfigError;
use encoding_rs::{Decoder, DecoderResult, UTF_8, WINDOWS_1252};
use std::fmt;
use std::str::FromStr;

/// Text encodings tried when reading a CSV file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Cp1252,
}

impl TextEncoding {
    /// Default order in which encodings are attempted
    pub const CANDIDATES: [TextEncoding; 3] = [
        TextEncoding::Utf8,
        TextEncoding::Latin1,
        TextEncoding::Cp1252,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Cp1252 => "cp1252",
        }
    }

    /// Decode `bytes`, silently dropping anything this encoding cannot map
    pub fn decode_lossy(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => decode_dropping_malformed(UTF_8.new_decoder_with_bom_removal(), bytes),
            // ISO-8859-1 maps every byte to the code point of the same value
            TextEncoding::Latin1 => encoding_rs::mem::decode_latin1(bytes).into_owned(),
            TextEncoding::Cp1252 => {
                decode_dropping_malformed(WINDOWS_1252.new_decoder_without_bom_handling(), bytes)
            }
        }
    }
}

fn decode_dropping_malformed(mut decoder: Decoder, bytes: &[u8]) -> String {
    let capacity = decoder
        .max_utf8_buffer_length_without_replacement(bytes.len())
        .unwrap_or(bytes.len().saturating_mul(3));
    let mut decoded = String::with_capacity(capacity);
    let mut remaining = bytes;

    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(remaining, &mut decoded, true);
        remaining = &remaining[read..];

        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::Malformed(_, _) => continue,
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(remaining.len())
                    .unwrap_or(remaining.len().saturating_mul(3));
                decoded.reserve(needed.max(4));
            }
        }
    }

    decoded
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "cp1252" | "windows-1252" => Ok(TextEncoding::Cp1252),
            _ => Err(ConfigError::UnsupportedEncoding(s.to_string())),
        }
    }
}
