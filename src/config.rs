// Import required dependencies
use crate::errors::{ConfigError, MergerError, MergerResult};
use dialoguer::Input; // For interactive CLI prompts
use log::{debug, warn};
use serde::{Deserialize, Serialize}; // For JSON serialization/deserialization
use std::io::ErrorKind;
use std::path::{Path, PathBuf}; // For file path handling
use tokio::fs; // For async file operations

/// Default location of the folder settings file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

// Folder settings that can be serialized to/from JSON
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPaths {
    #[serde(default)]
    pub source: Option<PathBuf>, // Folder tree the relocator takes files from
    #[serde(default)]
    pub dest: Option<PathBuf>, // Folder whose "data" subfolder receives them
}

impl FolderPaths {
    pub fn new(source: PathBuf, dest: PathBuf) -> Self {
        Self {
            source: Some(source),
            dest: Some(dest),
        }
    }

    /// Both folders are set to non-empty paths
    pub fn is_configured(&self) -> bool {
        Self::configured(&self.source).is_some() && Self::configured(&self.dest).is_some()
    }

    fn configured(path: &Option<PathBuf>) -> Option<&PathBuf> {
        path.as_ref().filter(|p| !p.as_os_str().is_empty())
    }

    // Check that both folders are set and exist on disk
    pub fn validate(&self) -> Result<(PathBuf, PathBuf), ConfigError> {
        let source = Self::configured(&self.source).ok_or(ConfigError::MissingSourceFolder)?;
        let dest = Self::configured(&self.dest).ok_or(ConfigError::MissingDestinationFolder)?;

        if !source.is_dir() {
            return Err(ConfigError::SourceFolderNotFound(source.clone()));
        }
        if !dest.is_dir() {
            return Err(ConfigError::DestinationFolderNotFound(dest.clone()));
        }

        Ok((source.clone(), dest.clone()))
    }

    // Fill in any folder not given on the command line with an interactive prompt
    pub fn prompt_missing(source: Option<PathBuf>, dest: Option<PathBuf>) -> MergerResult<Self> {
        let source = match source {
            Some(path) => path,
            None => prompt_folder("Source folder (where files are currently)")?,
        };
        let dest = match dest {
            Some(path) => path,
            None => prompt_folder("Destination folder (where to move files)")?,
        };
        Ok(Self::new(source, dest))
    }
}

/// Ask the user for a folder path
pub fn prompt_folder(prompt: &str) -> MergerResult<PathBuf> {
    let answer: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(PathBuf::from(answer.trim()))
}

/// JSON file holding the saved folder settings
#[derive(Debug, Clone)]
pub struct PathStore {
    path: PathBuf,
}

impl PathStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Save both folders, replacing whatever was stored before
    pub async fn save(&self, paths: &FolderPaths) -> MergerResult<()> {
        let content = serde_json::to_string_pretty(paths)
            .map_err(|e| MergerError::Config(ConfigError::SerializationError(e.to_string())))?;
        fs::write(&self.path, content).await.map_err(MergerError::Io)?;
        debug!("Saved folder settings to {}", self.path.display());
        Ok(())
    }

    // Load the saved folders; a missing or unreadable file means "not configured"
    pub async fn load(&self) -> FolderPaths {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!("Cannot read {}: {}", self.path.display(), e);
                }
                return FolderPaths::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Ignoring corrupt settings file {}: {}", self.path.display(), e);
                FolderPaths::default()
            }
        }
    }

    // Forget the saved folders
    pub async fn clear(&self) -> MergerResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MergerError::Io(e)),
        }
    }
}
