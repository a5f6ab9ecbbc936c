// ============================================================================
// Delimiter Detection
//
// Guesses the field separator of a CSV file by counting each candidate
// character in a short sample taken from the start of the file.
// ============================================================================

use crate::errors::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Number of bytes inspected when sniffing the delimiter
pub const DELIMITER_SAMPLE_SIZE: usize = 1024;

/// Field separators recognised by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Candidates in tie-break order
    pub const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Pipe,
    ];

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    pub fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
            Delimiter::Pipe => "pipe",
        }
    }

    /// Pick the most frequent candidate in `sample`.
    ///
    /// The first candidate reaching the highest count wins, and a sample
    /// without any candidate falls back to comma.
    pub fn detect(sample: &str) -> Self {
        let mut best = Delimiter::Comma;
        let mut best_count = 0;

        for candidate in Self::CANDIDATES {
            let count = sample.matches(candidate.as_char()).count();
            if count > best_count {
                best = candidate;
                best_count = count;
            }
        }

        best
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Delimiter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," | "comma" => Ok(Delimiter::Comma),
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            "\t" | "\\t" | "tab" => Ok(Delimiter::Tab),
            "|" | "pipe" => Ok(Delimiter::Pipe),
            other => Err(ConfigError::InvalidDelimiter(other.to_string())),
        }
    }
}
