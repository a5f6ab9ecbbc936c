// ============================================================================
// CLI Module - Command-Line Interface Definitions
//
// One subcommand per user action: manage the saved folders, move
// spreadsheet files into the destination's data folder, and merge a folder
// of CSV files into one de-duplicated file.
// ============================================================================

use clap::{Parser, Subcommand}; // Modern command-line parsing with derive macros
use csvcombiner::config::DEFAULT_CONFIG_FILE;
use csvcombiner::detect::{Delimiter, TextEncoding};
use log::LevelFilter;
use std::path::PathBuf;

/// csvcombiner - File mover and CSV combiner
///
/// Examples:
///   csvcombiner set-folders --source ~/Downloads --dest ~/Reports
///   csvcombiner move-files
///   csvcombiner merge ~/Reports/data
#[derive(Parser)]
#[command(
    name = "csvcombiner",
    about = "Move spreadsheet files into one folder and merge CSV files without duplicates",
    version,
    after_help = "Examples:\n  \
                  csvcombiner set-folders --source ./incoming --dest ./archive\n  \
                  csvcombiner show-folders\n  \
                  csvcombiner move-files\n  \
                  csvcombiner merge ./archive/data"
)]
pub struct Cli {
    /// Increase verbosity level (can be used multiple times)
    #[arg(
        global = true,
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v: one level above --log-level, -vv: two)"
    )]
    verbose: u8,

    /// The operation to perform
    #[command(subcommand)]
    pub command: Commands,

    /// Set the logging level explicitly
    #[arg(
        global = true,
        long,
        default_value = "info",
        help = "Set log level explicitly [error|warn|info|debug|trace]"
    )]
    log_level: String,

    /// Also append log lines to this file
    #[arg(global = true, long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Where the source and destination folders are saved
    #[arg(global = true, long, default_value = DEFAULT_CONFIG_FILE, value_name = "FILE")]
    pub config: PathBuf,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Save the source and destination folders used by move-files
    #[command(about = "Save source and destination folders (prompts for any not given)")]
    SetFolders(SetFoldersArgs),

    /// Print the saved folders
    #[command(about = "Show the saved source and destination folders")]
    ShowFolders,

    /// Forget the saved folders
    #[command(about = "Clear the saved folders")]
    ClearFolders,

    /// Move .xls/.xlsx/.csv files from the source tree into <dest>/data
    #[command(
        about = "Move spreadsheet files from the source folder into <dest>/data",
        long_about = "Walk the saved source folder recursively and move every .xls, .xlsx and .csv \
                      file into the data subfolder of the saved destination. Files are renamed to \
                      <name>_<YYYYMMDD_HHMMSS>_<counter><ext> so nothing is overwritten. Files that \
                      are currently open are left alone."
    )]
    MoveFiles,

    /// Merge all CSV files of a folder into one de-duplicated file
    #[command(
        about = "Merge every CSV file in a folder into one file without duplicate rows",
        long_about = "Combine the .csv files directly inside FOLDER into \
                      MERGED_ALL_DATA_<YYYYMMDD_HHMMSS>.csv in the same folder. The header is taken \
                      from the first file, each file's delimiter and encoding are detected, and rows \
                      that repeat an earlier row (ignoring case, surrounding spaces and empty cells) \
                      are dropped."
    )]
    Merge(MergeArgs),
}

// Arguments for the set-folders command
#[derive(Parser, Clone)]
pub struct SetFoldersArgs {
    #[arg(short = 's', long, help = "Folder where files are currently", value_name = "DIR")]
    pub source: Option<PathBuf>,

    #[arg(short = 'd', long, help = "Folder to move files into", value_name = "DIR")]
    pub dest: Option<PathBuf>,
}

// Arguments for the merge command
#[derive(Parser, Clone)]
pub struct MergeArgs {
    #[arg(help = "Folder containing the CSV files (prompted for when omitted)", value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    #[arg(
        long,
        help = "Use this delimiter for every file instead of detecting it [, ; tab |]",
        value_name = "DELIMITER"
    )]
    pub delimiter: Option<Delimiter>,

    #[arg(
        long,
        help = "Decode every file with this encoding [utf-8|latin-1|cp1252]",
        value_name = "ENCODING"
    )]
    pub encoding: Option<TextEncoding>,

    #[arg(long = "no-progress", help = "Do not draw the progress bar")]
    pub no_progress: bool,
}

impl Cli {
    // Combine --log-level with the -v count
    pub fn log_level(&self) -> LevelFilter {
        const LEVELS: [LevelFilter; 6] = [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
            LevelFilter::Trace,
        ];

        let base = match self.log_level.as_str() {
            "error" => 1,
            "warn" => 2,
            "info" => 3,
            "debug" => 4,
            "trace" => 5,
            _ => 3,
        };
        LEVELS[(base + self.verbose as usize).min(LEVELS.len() - 1)]
    }

    pub fn verbose_count(&self) -> u8 {
        self.verbose
    }
}
