// ============================================================================
// File Relocator
//
// Moves every spreadsheet/CSV file found anywhere under the source folder
// into `<dest>/data`, flattening the tree. Each moved file gets a
// `<stem>_<YYYYMMDD_HHMMSS>_<counter><ext>` name so nothing collides.
// Per-file failures are logged and skipped; only the moved count is reported.
// ============================================================================

use crate::errors::{ConfigError, MergerResult};
use crate::file_utils::{FileUtils, TIMESTAMP_FORMAT};
use chrono::Local;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Subfolder of the destination that receives moved files
pub const DATA_FOLDER: &str = "data";

/// Extensions (lower-case, with dot) that are moved
pub const RELOCATED_EXTENSIONS: [&str; 3] = [".xls", ".xlsx", ".csv"];

type LockProbe = Box<dyn Fn(&Path) -> bool>;

/// Outcome of one relocation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelocationReport {
    pub moved: usize,
    pub skipped_locked: usize,
    pub skipped_extension: usize,
    pub failed: usize,
}

pub struct FileRelocator {
    lock_probe: LockProbe,
}

impl Default for FileRelocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FileRelocator {
    pub fn new() -> Self {
        Self::with_lock_probe(FileUtils::is_locked)
    }

    /// Use `probe` instead of the rename test to decide whether a file is in use
    pub fn with_lock_probe(probe: impl Fn(&Path) -> bool + 'static) -> Self {
        Self {
            lock_probe: Box::new(probe),
        }
    }

    pub fn relocate(&self, source: &Path, dest: &Path) -> MergerResult<RelocationReport> {
        if !source.is_dir() {
            return Err(ConfigError::SourceFolderNotFound(source.to_path_buf()).into());
        }
        if !dest.is_dir() {
            return Err(ConfigError::DestinationFolderNotFound(dest.to_path_buf()).into());
        }

        let data_folder = dest.join(DATA_FOLDER);
        FileUtils::ensure_dir(&data_folder)?;

        // Collect first so files landing in the data folder are never revisited
        let files: Vec<PathBuf> = WalkDir::new(source)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();

        info!(
            "Relocating from {} to {} ({} files found)",
            source.display(),
            data_folder.display(),
            files.len()
        );

        let mut counter = 1;
        let mut report = RelocationReport::default();

        for path in files {
            if (self.lock_probe)(&path) {
                debug!("Skipping file in use: {}", path.display());
                report.skipped_locked += 1;
                continue;
            }

            let extension = FileUtils::lowercase_extension(&path);
            if !RELOCATED_EXTENSIONS.contains(&extension.as_str()) {
                report.skipped_extension += 1;
                continue;
            }

            let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
            let target = data_folder.join(FileUtils::timestamped_name(&path, &timestamp, counter));
            counter += 1;

            match FileUtils::move_file(&path, &target) {
                Ok(()) => {
                    debug!("Moved {} -> {}", path.display(), target.display());
                    report.moved += 1;
                }
                Err(e) => {
                    warn!("Could not move {}: {}", path.display(), e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Relocation finished: {} moved, {} in use, {} other types, {} failed",
            report.moved, report.skipped_locked, report.skipped_extension, report.failed
        );
        Ok(report)
    }
}
