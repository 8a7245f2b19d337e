use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Analysis window selected by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeRange {
    /// Latest snapshot only.
    Today,
    /// Snapshots from the last 7 days.
    LastWeek,
    /// Snapshots from the last 30 days.
    LastMonth,
    /// Every available snapshot.
    All,
}

impl TimeRange {
    /// Short label used in provenance strings ("day analysis", etc.).
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Today => "day",
            TimeRange::LastWeek => "week",
            TimeRange::LastMonth => "month",
            TimeRange::All => "all",
        }
    }

    /// Days back from now for the cutoff filter. None means no cutoff.
    pub fn cutoff_days(&self) -> Option<i64> {
        match self {
            TimeRange::Today => None,
            TimeRange::LastWeek => Some(7),
            TimeRange::LastMonth => Some(30),
            TimeRange::All => None,
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "today" => Ok(TimeRange::Today),
            "week" => Ok(TimeRange::LastWeek),
            "month" => Ok(TimeRange::LastMonth),
            "all" => Ok(TimeRange::All),
            other => Err(format!("unknown time range: {other}")),
        }
    }
}

/// User-facing loader options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub data_dir: PathBuf,            // local fallback directory of snapshots
    pub parallelism: Option<usize>,   // Some(N) to set rayon threads, None to use default
    pub file_concurrency: usize,      // limit number of snapshot files parsed concurrently
    pub progress: bool,               // show progress bar
    pub progress_label: Option<String>, // optional label for progress bar

    // IO tuning
    pub read_buffer_bytes: usize,     // BufReader capacity for local snapshot reads
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            parallelism: None,
            file_concurrency: 4,
            progress: true,
            progress_label: None,
            read_buffer_bytes: 256 * 1024,
        }
    }
}

impl LoadOptions {
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }
    pub fn with_file_concurrency(mut self, n: usize) -> Self {
        self.file_concurrency = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
}
