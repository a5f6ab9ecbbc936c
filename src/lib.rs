// Declare the config module, which persists the source and destination folders
pub mod config;

// Declare the detect module, which guesses delimiter and text encoding per file
pub mod detect;

// Declare the display module, which renders result dialogs in the terminal
pub mod display;

// Declare the errors module, which contains custom error types
pub mod errors;

// Declare the file_utils module, which provides utility functions for file operations
pub mod file_utils;

// Declare the logging module, which tees log messages to a file
pub mod logging;

// Declare the merge module, which combines a folder of CSV files into one
pub mod merge;

// Declare the progress module, which reports merge progress
pub mod progress;

// Declare the relocate module, which moves spreadsheets into a flat folder
pub mod relocate;
