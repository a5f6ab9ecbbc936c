use std::path::PathBuf;
use thiserror::Error;

/// Type alias for Result with MergerError as the error type
pub type MergerResult<T> = Result<T, MergerError>;

/// Custom error types for the file combiner application
#[derive(Error, Debug)]
pub enum MergerError {
    /// Standard IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CSV reader/writer errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Folder enumeration errors
    #[error("Cannot read folder {path}: {source}")]
    Enumerate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Output file creation errors
    #[error("Cannot create output file {path}: {source}")]
    OutputCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(String),
}

/// Specific errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Source folder is not set")]
    MissingSourceFolder,

    #[error("Destination folder is not set")]
    MissingDestinationFolder,

    #[error("Source folder does not exist: {0}")]
    SourceFolderNotFound(PathBuf),

    #[error("Destination folder does not exist: {0}")]
    DestinationFolderNotFound(PathBuf),

    #[error("Folder does not exist: {0}")]
    FolderNotFound(PathBuf),

    #[error("Invalid delimiter: {0}. Expected one of ',', ';', 'tab', '|'")]
    InvalidDelimiter(String),

    #[error("Unsupported encoding: {0}. Expected utf-8, latin-1 or cp1252")]
    UnsupportedEncoding(String),

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ConfigError {
    /// Missing folder settings are reported as a warning, not a failure
    pub fn is_missing_paths(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingSourceFolder | ConfigError::MissingDestinationFolder
        )
    }
}

impl From<dialoguer::Error> for MergerError {
    fn from(err: dialoguer::Error) -> Self {
        MergerError::Prompt(err.to_string())
    }
}

impl From<serde_json::Error> for MergerError {
    fn from(err: serde_json::Error) -> Self {
        MergerError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}
