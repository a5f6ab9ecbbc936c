// ============================================================================
// csvcombiner - File Mover & CSV Combiner
// Main Entry Point
//
// Two independent tools behind one command line:
// - move-files: flattens spreadsheet/CSV files from a source tree into
//   <dest>/data with collision-free names
// - merge: combines the CSV files of a folder into one file, detecting each
//   file's delimiter and encoding and dropping duplicate rows
// ============================================================================

use clap::Parser; // Command-line argument parsing with derive macros
use log::{error, info};
use std::process::ExitCode;

mod cli; // Command-line interface definitions and argument parsing
mod commands; // Command handlers for each user action

use cli::{Cli, Commands};
use commands::CommandHandler;
use csvcombiner::config::PathStore;
use csvcombiner::logging::Logger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Log to a file as well when asked, otherwise plain env_logger on stderr
    match &cli.log_file {
        Some(path) => {
            if let Err(e) = Logger::init(path, cli.log_level()) {
                eprintln!("Cannot set up logging: {:#}", e);
                return ExitCode::FAILURE;
            }
        }
        None => env_logger::builder().filter_level(cli.log_level()).init(),
    }

    info!("csvcombiner starting up");
    let store = PathStore::new(cli.config.clone());
    let verbose = cli.verbose_count() > 0;

    let result = match cli.command {
        Commands::SetFolders(args) => CommandHandler::handle_set_folders(&store, args).await,
        Commands::ShowFolders => CommandHandler::handle_show_folders(&store).await,
        Commands::ClearFolders => CommandHandler::handle_clear_folders(&store).await,
        Commands::MoveFiles => CommandHandler::handle_move_files(&store).await,
        Commands::Merge(args) => CommandHandler::handle_merge(args, verbose).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            CommandHandler::report_failure(&e);
            ExitCode::FAILURE
        }
    }
}
