// Import required dependencies
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Progress notifications emitted by the merge engine, once before and once
/// after each candidate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent<'a> {
    FileStarted {
        index: usize,
        total: usize,
        file_name: &'a str,
    },
    FileFinished {
        index: usize,
        total: usize,
        file_name: &'a str,
    },
}

/// Receiver of merge progress
pub trait ProgressSink {
    fn on_event(&mut self, event: &MergeEvent<'_>);
}

/// Sink that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn on_event(&mut self, _event: &MergeEvent<'_>) {}
}

/// Terminal progress bar, one tick per file
pub struct ProgressTracker {
    bar: ProgressBar,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let bar = ProgressBar::new(total_files as u64);
        bar.set_style(style);

        Self {
            bar,
            start_time: Instant::now(),
        }
    }

    /// Tracker that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            start_time: Instant::now(),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_with_message(format!(
            "Completed in {:.1}s",
            self.start_time.elapsed().as_secs_f64()
        ));
    }

    /// Remove the bar without a final message
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }

    pub fn abandon(&self) {
        self.bar.abandon_with_message("Merge failed");
    }
}

impl ProgressSink for ProgressTracker {
    fn on_event(&mut self, event: &MergeEvent<'_>) {
        match *event {
            MergeEvent::FileStarted {
                total, file_name, ..
            } => {
                self.bar.set_length(total as u64);
                self.bar.set_message(format!("Processing: {}", file_name));
            }
            MergeEvent::FileFinished { index, .. } => {
                self.bar.set_position(index as u64 + 1);
            }
        }
    }
}
