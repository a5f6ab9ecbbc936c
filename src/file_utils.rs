use log::debug;
use std::{fs, io, path::Path};

/// Timestamp layout used in generated file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// Define a struct for file utility functions
pub struct FileUtils;

impl FileUtils {
    // Ensure a directory exists, creating it if necessary
    pub fn ensure_dir(path: &Path) -> io::Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// A file counts as locked when it cannot even be renamed onto itself,
    /// which is how an open file shows up on Windows
    pub fn is_locked(path: &Path) -> bool {
        fs::rename(path, path).is_err()
    }

    // Move a file, falling back to copy + delete when a rename is not possible
    // (for example across file systems)
    pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!("Rename {} failed ({}), copying instead", from.display(), e);
                fs::copy(from, to)?;
                fs::remove_file(from)
            }
        }
    }

    /// Lower-cased extension including the dot, or an empty string
    pub fn lowercase_extension(path: &Path) -> String {
        path.extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }

    /// `<stem>_<timestamp>_<counter><ext>` with the extension lower-cased
    pub fn timestamped_name(path: &Path, timestamp: &str, counter: usize) -> String {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!(
            "{}_{}_{}{}",
            stem,
            timestamp,
            counter,
            Self::lowercase_extension(path)
        )
    }
}
