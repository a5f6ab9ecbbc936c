// ============================================================================
// Merge Engine
//
// Combines every CSV file of one folder into a single de-duplicated CSV:
// - the header row is written once, taken from the first file with rows
// - later files contribute only their data rows
// - a data row is written only the first time its normalized signature
//   (trimmed, lower-cased, non-empty cells) is seen during the run
//
// Per-file failures are recorded and skipped. Failing to list the folder,
// create the output file or write to it aborts the run.
// ============================================================================

use crate::detect::{
    Delimiter, DelimiterStrategy, DetectionStats, EncodingStrategy, FormatDetector,
};
use crate::errors::{ConfigError, MergerError, MergerResult};
use crate::file_utils::TIMESTAMP_FORMAT;
use crate::progress::{MergeEvent, ProgressSink};
use chrono::{Local, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use log::{debug, info, warn};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name prefix of every merge output
pub const MERGED_FILE_PREFIX: &str = "MERGED_ALL_DATA_";

/// Number of error messages listed in a summary
const MAX_REPORTED_ERRORS: usize = 3;

const OUTPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Name of the output file for a run started at `timestamp`
pub fn output_file_name(timestamp: NaiveDateTime) -> String {
    format!("{}{}.csv", MERGED_FILE_PREFIX, timestamp.format(TIMESTAMP_FORMAT))
}

fn line_terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}

/// A CSV file found in the folder being merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub path: PathBuf,
}

/// List the `.csv` files directly inside `folder`, ordered by file name
pub fn discover_candidates(folder: &Path) -> MergerResult<Vec<CandidateFile>> {
    let enumerate_error = |source| MergerError::Enumerate {
        path: folder.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(enumerate_error)? {
        let entry = entry.map_err(enumerate_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();

        if name.to_ascii_lowercase().ends_with(".csv") && path.is_file() {
            candidates.push(CandidateFile { name, path });
        }
    }

    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(candidates)
}

/// Normalized form of a data row used for duplicate detection.
///
/// Empty cells are dropped before comparison, so `a,,b` and `a,b` share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey(Vec<String>);

impl RowKey {
    pub fn from_record(record: &StringRecord) -> Self {
        RowKey(
            record
                .iter()
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(str::to_lowercase)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of merging one candidate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// File parsed; counts cover its data rows only
    Merged {
        source_rows: usize,
        rows_written: usize,
        duplicates: usize,
    },
    /// File decoded to text containing no rows
    Empty,
    /// File skipped, with the reason
    SoftError(String),
}

/// Counters accumulated over a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub total_files: usize,
    pub success_files: usize,
    pub total_source_rows: usize,
    pub rows_written: usize,
    pub duplicate_count: usize,
    pub errors: Vec<String>,
}

impl MergeStats {
    fn record(&mut self, file_name: &str, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Merged {
                source_rows,
                rows_written,
                duplicates,
            } => {
                self.total_source_rows += source_rows;
                self.rows_written += rows_written;
                self.duplicate_count += duplicates;
                self.success_files += 1;
            }
            FileOutcome::Empty => debug!("{}: no rows", file_name),
            FileOutcome::SoftError(message) => {
                warn!("Skipping {}: {}", file_name, message);
                self.errors.push(format!("{}: {}", file_name, message));
            }
        }
    }
}

/// State owned by one merge run: the output stream, the header flag and the
/// signatures of every row written so far
struct MergeRun<W: Write> {
    writer: csv::Writer<W>,
    seen: HashSet<RowKey>,
    header_written: bool,
    stats: MergeStats,
}

impl<W: Write> MergeRun<W> {
    fn new(writer: csv::Writer<W>, total_files: usize) -> Self {
        Self {
            writer,
            seen: HashSet::new(),
            header_written: false,
            stats: MergeStats {
                total_files,
                ..MergeStats::default()
            },
        }
    }

    // Write errors here are fatal to the run, so they are returned as Err
    fn merge_records(&mut self, records: &[StringRecord]) -> MergerResult<FileOutcome> {
        let Some((header, rows)) = records.split_first() else {
            return Ok(FileOutcome::Empty);
        };

        if !self.header_written {
            self.writer.write_record(header)?;
            self.header_written = true;
        }

        let mut rows_written = 0;
        let mut duplicates = 0;

        // Blank lines count as source rows but are neither written nor duplicates
        for row in rows.iter().filter(|row| !row.is_empty()) {
            let key = RowKey::from_record(row);
            if key.is_empty() || self.seen.contains(&key) {
                duplicates += 1;
                continue;
            }

            self.writer.write_record(row)?;
            self.seen.insert(key);
            rows_written += 1;
        }

        Ok(FileOutcome::Merged {
            source_rows: rows.len(),
            rows_written,
            duplicates,
        })
    }

    fn finish(mut self) -> MergerResult<MergeStats> {
        self.writer.flush()?;
        Ok(self.stats)
    }
}

/// Split decoded text into lines, keeping a quoted field that spans several
/// lines together with the line that opened it
fn logical_lines(content: &str) -> Vec<Cow<'_, str>> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for line in content.lines() {
        let toggles_quote = line.matches('"').count() % 2 == 1;
        match pending.take() {
            Some(mut joined) => {
                joined.push('\n');
                joined.push_str(line);
                if toggles_quote {
                    lines.push(Cow::Owned(joined));
                } else {
                    pending = Some(joined);
                }
            }
            None if toggles_quote => pending = Some(line.to_string()),
            None => lines.push(Cow::Borrowed(line)),
        }
    }

    lines.extend(pending.map(Cow::Owned));
    lines
}

/// Parse decoded text into records, one per line.
///
/// A blank line yields an empty record. The first record is not treated
/// specially.
pub fn parse_records(content: &str, delimiter: Delimiter) -> Result<Vec<StringRecord>, csv::Error> {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter.as_byte());

    let mut records = Vec::new();
    for line in logical_lines(content) {
        if line.is_empty() {
            records.push(StringRecord::new());
            continue;
        }
        for record in builder.from_reader(line.as_bytes()).records() {
            records.push(record?);
        }
    }
    Ok(records)
}

/// What a merge run produced
#[derive(Debug)]
pub enum MergeOutcome {
    /// The folder holds no CSV files; no output was created
    NoFiles,
    Completed(MergeSummary),
}

/// Final report of a completed merge run
#[derive(Debug, Clone)]
pub struct MergeSummary {
    pub stats: MergeStats,
    pub output_file: PathBuf,
    pub detection: DetectionStats,
}

impl MergeSummary {
    pub fn output_file_name(&self) -> String {
        self.output_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The errors listed in the report
    pub fn reported_errors(&self) -> &[String] {
        let shown = self.stats.errors.len().min(MAX_REPORTED_ERRORS);
        &self.stats.errors[..shown]
    }

    /// Errors beyond the listed ones
    pub fn unreported_error_count(&self) -> usize {
        self.stats.errors.len().saturating_sub(MAX_REPORTED_ERRORS)
    }
}

/// Format a count with thousands separators
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

impl fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f, "✅ MERGE COMPLETED SUCCESSFULLY!")?;
        writeln!(f)?;
        writeln!(f, "📊 STATISTICS:")?;
        writeln!(f, "• Total CSV Files Found: {}", stats.total_files)?;
        writeln!(f, "• Successfully Processed: {}", stats.success_files)?;
        writeln!(f, "• Total Rows in Source: {}", group_thousands(stats.total_source_rows))?;
        writeln!(f, "• Unique Rows Written: {}", group_thousands(stats.rows_written))?;
        writeln!(f, "• Duplicates Removed: {}", group_thousands(stats.duplicate_count))?;
        writeln!(f)?;
        writeln!(f, "📁 OUTPUT FILE:")?;
        write!(f, "{}", self.output_file_name())?;

        if !stats.errors.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "❌ ERRORS ({} files):", stats.errors.len())?;
            for error in self.reported_errors() {
                write!(f, "\n• {}", error)?;
            }
            if self.unreported_error_count() > 0 {
                write!(f, "\n• ... and {} more errors", self.unreported_error_count())?;
            }
        }

        Ok(())
    }
}

/// Merges the CSV files of a folder into one de-duplicated output file
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    encoding: EncodingStrategy,
    delimiter: DelimiterStrategy,
}

impl MergeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategies(encoding: EncodingStrategy, delimiter: DelimiterStrategy) -> Self {
        Self {
            encoding,
            delimiter,
        }
    }

    /// Merge `folder`, naming the output after the current local time
    pub fn merge_folder(
        &self,
        folder: &Path,
        progress: &mut dyn ProgressSink,
    ) -> MergerResult<MergeOutcome> {
        self.merge_folder_at(folder, Local::now().naive_local(), progress)
    }

    /// Merge `folder`, naming the output after `timestamp`
    pub fn merge_folder_at(
        &self,
        folder: &Path,
        timestamp: NaiveDateTime,
        progress: &mut dyn ProgressSink,
    ) -> MergerResult<MergeOutcome> {
        if !folder.is_dir() {
            return Err(ConfigError::FolderNotFound(folder.to_path_buf()).into());
        }

        let candidates = discover_candidates(folder)?;
        if candidates.is_empty() {
            info!("No CSV files found in {}", folder.display());
            return Ok(MergeOutcome::NoFiles);
        }

        let output_file = folder.join(output_file_name(timestamp));
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&output_file)
            .map_err(|source| MergerError::OutputCreate {
                path: output_file.clone(),
                source,
            })?;

        info!(
            "Merging {} CSV files from {} into {}",
            candidates.len(),
            folder.display(),
            output_file.display()
        );
        debug!("Encoding strategy: {}, delimiter strategy: {}", self.encoding, self.delimiter);

        let writer = WriterBuilder::new()
            .flexible(true)
            .terminator(line_terminator())
            .from_writer(BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, file));

        let mut detector = FormatDetector::with_strategies(self.encoding.clone(), self.delimiter);
        let mut run = MergeRun::new(writer, candidates.len());
        let total = candidates.len();

        for (index, candidate) in candidates.iter().enumerate() {
            progress.on_event(&MergeEvent::FileStarted {
                index,
                total,
                file_name: &candidate.name,
            });

            let outcome = Self::merge_file(&mut detector, candidate, &mut run)?;
            run.stats.record(&candidate.name, outcome);

            progress.on_event(&MergeEvent::FileFinished {
                index,
                total,
                file_name: &candidate.name,
            });
        }

        let stats = run.finish()?;
        info!(
            "Merge finished: {} of {} files, {} rows written, {} duplicates",
            stats.success_files, stats.total_files, stats.rows_written, stats.duplicate_count
        );
        debug!("Detection: {}", detector.stats().summary_line());

        Ok(MergeOutcome::Completed(MergeSummary {
            stats,
            output_file,
            detection: detector.stats().clone(),
        }))
    }

    fn merge_file(
        detector: &mut FormatDetector,
        candidate: &CandidateFile,
        run: &mut MergeRun<BufWriter<File>>,
    ) -> MergerResult<FileOutcome> {
        let decoded = match detector.detect_file(&candidate.path) {
            Ok(Some(decoded)) => decoded,
            Ok(None) => return Ok(FileOutcome::SoftError("Could not read file".to_string())),
            Err(e) => return Ok(FileOutcome::SoftError(e.to_string())),
        };

        let records = match parse_records(&decoded.content, decoded.format.delimiter) {
            Ok(records) => records,
            Err(e) => return Ok(FileOutcome::SoftError(e.to_string())),
        };

        run.merge_records(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::TextEncoding;
    use crate::progress::SilentProgress;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .and_then(|d| d.and_hms_opt(10, 30, second))
            .unwrap()
    }

    fn merge(dir: &Path, second: u32) -> MergeSummary {
        match MergeEngine::new()
            .merge_folder_at(dir, at(second), &mut SilentProgress)
            .unwrap()
        {
            MergeOutcome::Completed(summary) => summary,
            MergeOutcome::NoFiles => panic!("expected a completed merge"),
        }
    }

    fn write(dir: &Path, name: &str, content: &[u8]) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[derive(Default)]
    struct RecordingSink(Vec<String>);

    impl ProgressSink for RecordingSink {
        fn on_event(&mut self, event: &MergeEvent<'_>) {
            self.0.push(match event {
                MergeEvent::FileStarted { index, total, file_name } => {
                    format!("start {}/{} {}", index, total, file_name)
                }
                MergeEvent::FileFinished { index, total, file_name } => {
                    format!("done {}/{} {}", index, total, file_name)
                }
            });
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(at(7)), "MERGED_ALL_DATA_20240315_103007.csv");
    }

    #[test]
    fn test_header_written_once_and_duplicates_dropped_across_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"id,name\n1,Alice\n2,Bob\n");
        write(dir.path(), "b.csv", b"id,name\n 2 , BOB \n3,Carol\n1,alice\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(
            lines(&summary.output_file),
            vec!["id,name", "1,Alice", "2,Bob", "3,Carol"]
        );

        let stats = &summary.stats;
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.success_files, 2);
        assert_eq!(stats.total_source_rows, 5);
        assert_eq!(stats.rows_written, 3);
        assert_eq!(stats.duplicate_count, 2);
        assert_eq!(stats.rows_written + stats.duplicate_count, stats.total_source_rows);
        assert!(stats.errors.is_empty());
    }

    #[test]
    fn test_duplicates_within_one_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "only.csv", b"h1,h2\nx,y\nX,Y\nx,y\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(lines(&summary.output_file), vec!["h1,h2", "x,y"]);
        assert_eq!(summary.stats.duplicate_count, 2);
    }

    #[test]
    fn test_rows_with_only_blank_cells_count_as_duplicates() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"a,b,c\n,,\n , ,\n1,2,3\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(lines(&summary.output_file), vec!["a,b,c", "1,2,3"]);
        assert_eq!(summary.stats.rows_written, 1);
        assert_eq!(summary.stats.duplicate_count, 2);
    }

    #[test]
    fn test_empty_cells_are_ignored_by_signature() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"c1,c2,c3\nx,,y\nx,y,\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(lines(&summary.output_file), vec!["c1,c2,c3", "x,,y"]);
        assert_eq!(summary.stats.duplicate_count, 1);
    }

    #[test]
    fn test_header_only_file_contributes_header() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"first,header\n");
        write(dir.path(), "b.csv", b"second,header\nv1,v2\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(lines(&summary.output_file), vec!["first,header", "v1,v2"]);
        assert_eq!(summary.stats.success_files, 2);
        assert_eq!(summary.stats.total_source_rows, 1);
    }

    #[test]
    fn test_detected_delimiter_is_rewritten_as_comma_with_quoting() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"name;note\nAcme;\"x, y\"\n");
        write(dir.path(), "b.csv", b"name\tnote\nGlobex\tplain\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(
            lines(&summary.output_file),
            vec!["name,note", "Acme,\"x, y\"", "Globex,plain"]
        );
        assert_eq!(summary.detection.files_detected(), 2);
    }

    #[test]
    fn test_legacy_encoded_file_is_merged() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"city\n\xe9\xe8\n");

        let summary = merge(dir.path(), 0);
        // utf-8 keeps "city\n\n" and so is selected; the undecodable row turns blank
        assert_eq!(summary.detection.encoding_count(TextEncoding::Utf8), 1);
        assert_eq!(lines(&summary.output_file), vec!["city"]);
        assert_eq!(summary.stats.total_source_rows, 1);
        assert_eq!(summary.stats.duplicate_count, 0);
    }

    #[test]
    fn test_blank_lines_count_as_source_rows() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"h1,h2\n1,2\n\n3,4\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(lines(&summary.output_file), vec!["h1,h2", "1,2", "3,4"]);

        let stats = &summary.stats;
        assert_eq!(stats.total_source_rows, 3);
        assert_eq!(stats.rows_written, 2);
        assert_eq!(stats.duplicate_count, 0);
        // only non-blank rows are split between written and duplicate
        assert_eq!(stats.rows_written + stats.duplicate_count + 1, stats.total_source_rows);
    }

    #[test]
    fn test_quoted_field_spanning_lines_stays_one_row() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"id,note\n1,\"two\n\nlines\"\n2,x\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(summary.stats.total_source_rows, 2);
        assert_eq!(summary.stats.rows_written, 2);
        assert_eq!(
            std::fs::read_to_string(&summary.output_file).unwrap(),
            "id,note\n1,\"two\n\nlines\"\n2,x\n"
        );
    }

    #[test]
    fn test_bom_only_file_does_not_become_the_header() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"\xef\xbb\xbf");
        write(dir.path(), "b.csv", b"id,name\n1,Alice\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(lines(&summary.output_file), vec!["id,name", "1,Alice"]);
        assert!(summary.stats.errors.is_empty());
        assert_eq!(summary.stats.success_files, 1);
    }

    #[test]
    fn test_unreadable_file_is_a_soft_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"");
        write(dir.path(), "b.csv", b"k,v\n1,2\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(summary.stats.errors, vec!["a.csv: Could not read file"]);
        assert_eq!(summary.stats.success_files, 1);
        assert_eq!(lines(&summary.output_file), vec!["k,v", "1,2"]);
    }

    #[test]
    fn test_blank_only_file_is_merged_with_an_empty_header() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"\n\n");
        write(dir.path(), "b.csv", b"k,v\n1,2\n");

        let summary = merge(dir.path(), 0);
        let stats = &summary.stats;
        assert!(stats.errors.is_empty());
        assert_eq!(stats.success_files, 2);
        assert_eq!(stats.total_source_rows, 2);
        assert_eq!(stats.rows_written, 1);

        let output = lines(&summary.output_file);
        assert_eq!(output.last().map(String::as_str), Some("1,2"));
        assert!(!output.contains(&"k,v".to_string()));
    }

    #[test]
    fn test_no_csv_files_creates_no_output() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "notes.txt", b"a,b\n");
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let outcome = MergeEngine::new()
            .merge_folder_at(dir.path(), at(0), &mut SilentProgress)
            .unwrap();
        assert!(matches!(outcome, MergeOutcome::NoFiles));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.CSV", b"x\n1\n");
        write(dir.path(), "a.Csv", b"x\n2\n");
        write(dir.path(), "c.csv.bak", b"x\n3\n");

        let names: Vec<_> = discover_candidates(dir.path())
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["a.Csv", "b.CSV"]);
    }

    #[test]
    fn test_progress_reported_before_and_after_each_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"h\n1\n");
        write(dir.path(), "b.csv", b"");

        let mut sink = RecordingSink::default();
        MergeEngine::new()
            .merge_folder_at(dir.path(), at(0), &mut sink)
            .unwrap();
        assert_eq!(
            sink.0,
            vec!["start 0/2 a.csv", "done 0/2 a.csv", "start 1/2 b.csv", "done 1/2 b.csv"]
        );
    }

    #[test]
    fn test_summary_lists_first_three_errors() {
        let dir = TempDir::new().unwrap();
        for name in ["e1.csv", "e2.csv", "e3.csv", "e4.csv", "e5.csv"] {
            write(dir.path(), name, b"");
        }
        write(dir.path(), "ok.csv", b"n\n1234\n");

        let summary = merge(dir.path(), 0);
        assert_eq!(summary.reported_errors().len(), 3);
        assert_eq!(summary.unreported_error_count(), 2);

        let report = summary.to_string();
        assert!(report.contains("• Total CSV Files Found: 6"));
        assert!(report.contains("• Successfully Processed: 1"));
        assert!(report.contains("MERGED_ALL_DATA_20240315_103000.csv"));
        assert!(report.contains("❌ ERRORS (5 files):"));
        assert!(report.contains("• e3.csv: Could not read file"));
        assert!(!report.contains("e4.csv"));
        assert!(report.contains("• ... and 2 more errors"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_repeated_runs_produce_same_rows_under_new_names() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"id,name\n1,Alice\n2,Bob\n");
        write(dir.path(), "b.csv", b"id,name\n2,bob\n3,Carol\n");

        let first = merge(dir.path(), 0);
        let second = merge(dir.path(), 1);

        assert_ne!(first.output_file, second.output_file);
        assert_eq!(
            std::fs::read_to_string(&first.output_file).unwrap(),
            std::fs::read_to_string(&second.output_file).unwrap()
        );
    }

    #[test]
    fn test_existing_output_name_is_a_hard_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.csv", b"h\n1\n");
        write(dir.path(), &output_file_name(at(0)), b"keep me");

        let result = MergeEngine::new().merge_folder_at(dir.path(), at(0), &mut SilentProgress);
        assert!(matches!(result, Err(MergerError::OutputCreate { .. })));
        assert_eq!(
            std::fs::read(dir.path().join(output_file_name(at(0)))).unwrap(),
            b"keep me"
        );
    }

    #[test]
    fn test_missing_folder_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let result = MergeEngine::new().merge_folder_at(
            &dir.path().join("missing"),
            at(0),
            &mut SilentProgress,
        );
        assert!(matches!(
            result,
            Err(MergerError::Config(ConfigError::FolderNotFound(_)))
        ));
    }

    #[test]
    fn test_row_key_normalization() {
        let record = StringRecord::from(vec![" A ", "", "  ", "b"]);
        let key = RowKey::from_record(&record);
        assert_eq!(key, RowKey(vec!["a".to_string(), "b".to_string()]));
        assert!(RowKey::from_record(&StringRecord::from(vec!["", " "])).is_empty());
    }
}
