// Import required dependencies
use anyhow::{Context, Result}; // For error handling
use log::info; // For logging
use std::path::Path;

// Import local modules
use crate::cli::{MergeArgs, SetFoldersArgs};
use csvcombiner::{
    config::{prompt_folder, FolderPaths, PathStore},
    detect::{DelimiterStrategy, EncodingStrategy},
    display::Dialog,
    errors::MergerError,
    merge::{MergeEngine, MergeOutcome},
    progress::ProgressTracker,
    relocate::{FileRelocator, DATA_FOLDER},
};

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// Command handler for processing CLI commands
pub struct CommandHandler;

impl CommandHandler {
    // Save the folders used by move-files
    pub async fn handle_set_folders(store: &PathStore, args: SetFoldersArgs) -> Result<()> {
        let paths = FolderPaths::prompt_missing(args.source, args.dest)?;
        store
            .save(&paths)
            .await
            .context("Failed to save folder settings")?;

        let source = paths.source.as_deref().map(base_name).unwrap_or_default();
        let dest = paths.dest.as_deref().map(base_name).unwrap_or_default();
        info!("Folder settings saved to {}", store.path().display());

        Dialog::info(
            "✅ Saved",
            format!(
                "Paths saved successfully!\n\nSource: {}\nDestination: {}",
                source, dest
            ),
        )
        .show();
        Ok(())
    }

    // Print the saved folders
    pub async fn handle_show_folders(store: &PathStore) -> Result<()> {
        let paths = store.load().await;

        let dialog = match (&paths.source, &paths.dest) {
            (Some(source), Some(dest)) if paths.is_configured() => Dialog::info(
                "Current Paths",
                format!(
                    "📁 CURRENT CONFIGURATION:\n\nSource Folder:\n{}\n\nDestination Folder:\n{}",
                    source.display(),
                    dest.display()
                ),
            ),
            _ => Dialog::warning(
                "No Configuration",
                "No folder paths configured yet.\n\nPlease use 'set-folders' first.",
            ),
        };
        dialog.show();
        Ok(())
    }

    // Forget the saved folders
    pub async fn handle_clear_folders(store: &PathStore) -> Result<()> {
        store
            .clear()
            .await
            .context("Failed to clear folder settings")?;
        Dialog::info("Cleared", "All saved paths cleared successfully!").show();
        Ok(())
    }

    // Move spreadsheet files from the saved source into <dest>/data
    pub async fn handle_move_files(store: &PathStore) -> Result<()> {
        let (source, dest) = store
            .load()
            .await
            .validate()
            .map_err(MergerError::from)?;

        let report = FileRelocator::new()
            .relocate(&source, &dest)
            .context("Failed to move files")?;

        Dialog::info(
            "✅ Complete",
            format!(
                "Files moved successfully!\nTotal files moved: {}\n\nDestination: {}",
                report.moved,
                dest.join(DATA_FOLDER).display()
            ),
        )
        .show();
        Ok(())
    }

    // Merge every CSV file of a folder into one
    pub async fn handle_merge(args: MergeArgs, verbose: bool) -> Result<()> {
        let folder = match args.folder {
            Some(folder) => folder,
            None => prompt_folder("Folder with CSV files to merge")?,
        };

        let encoding = args
            .encoding
            .map(EncodingStrategy::Force)
            .unwrap_or_default();
        let delimiter = args
            .delimiter
            .map(DelimiterStrategy::Force)
            .unwrap_or_default();
        let engine = MergeEngine::with_strategies(encoding, delimiter);

        let mut tracker = if args.no_progress {
            ProgressTracker::hidden()
        } else {
            ProgressTracker::new(0)
        };

        let outcome = match engine.merge_folder(&folder, &mut tracker) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracker.abandon();
                return Err(e).context("Failed to merge files");
            }
        };

        match outcome {
            MergeOutcome::NoFiles => {
                tracker.clear();
                Dialog::warning("No Files", "No CSV files found in selected folder.").show();
            }
            MergeOutcome::Completed(summary) => {
                tracker.finish();

                let mut body = summary.to_string();
                if verbose {
                    body.push_str(&format!(
                        "\n\n🔍 DETECTION:\n{}",
                        summary.detection.summary_line()
                    ));
                }
                body.push_str(&format!("\n\n📂 LOCATION:\n{}", folder.display()));
                Dialog::info("Merge Complete", body).show();
            }
        }
        Ok(())
    }

    // Turn a failed command into a dialog
    pub fn report_failure(error: &anyhow::Error) {
        let missing_paths = matches!(
            error.downcast_ref::<MergerError>(),
            Some(MergerError::Config(config)) if config.is_missing_paths()
        );

        if missing_paths {
            Dialog::warning(
                "Missing Paths",
                "Please set folders first using 'set-folders'.",
            )
            .show();
        } else {
            Dialog::error("Error", format!("❌ {:#}", error)).show();
        }
    }
}
