use crate::config::{LoadOptions, TimeRange};
use crate::date::SnapDate;
use crate::post::Post;
use crate::progress::make_count_progress;
use crate::sentiment::{enrich, SentimentAnalyzer};
use crate::snapshot::parse_snapshot;
use crate::store::{discover_snapshots, DirStore, SnapshotStore};
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use time::{Duration, OffsetDateTime};

/// A loaded, cleaned and enriched table plus where it came from.
#[derive(Clone, Debug)]
pub struct Loaded {
    pub posts: Vec<Post>,
    pub provenance: String,
}

impl Loaded {
    fn empty(provenance: impl Into<String>) -> Self {
        Self { posts: Vec::new(), provenance: provenance.into() }
    }
}

/// Facade over snapshot discovery, download, cleaning and enrichment.
///
/// A primary (remote) store is optional; the local data directory is always
/// the fallback. All I/O failures degrade to an empty table with a
/// descriptive provenance string.
pub struct SnapshotLoader {
    opts: LoadOptions,
    primary: Option<Box<dyn SnapshotStore>>,
    analyzer: SentimentAnalyzer,
}

impl SnapshotLoader {
    pub fn new() -> Self {
        Self {
            opts: LoadOptions::default(),
            primary: None,
            analyzer: SentimentAnalyzer::new(),
        }
    }

    // -------- Builder methods --------
    pub fn data_dir(mut self, dir: impl AsRef<std::path::Path>) -> Self { self.opts = self.opts.with_data_dir(dir); self }
    pub fn parallelism(mut self, threads: usize) -> Self { self.opts = self.opts.with_parallelism(threads); self }
    pub fn file_concurrency(mut self, n: usize) -> Self { self.opts = self.opts.with_file_concurrency(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }

    /// Install a primary store (the remote bucket). The local data directory
    /// stays as fallback.
    pub fn store(mut self, store: Box<dyn SnapshotStore>) -> Self {
        self.primary = Some(store);
        self
    }

    /// Inject a sentiment analyzer (a default one is built otherwise).
    pub fn analyzer(mut self, analyzer: SentimentAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Load the requested range. Never fails: source problems degrade to an
    /// empty table with an explanatory provenance string.
    pub fn load(&self, range: TimeRange) -> Loaded {
        init_tracing_once();
        if let Some(n) = self.opts.parallelism {
            if n > 0 {
                rayon::ThreadPoolBuilder::new().num_threads(n).build_global().ok();
            }
        }

        if let Some(primary) = &self.primary {
            match self.load_from_store(primary.as_ref(), range) {
                Ok(Some(loaded)) => return loaded,
                Ok(None) => {
                    tracing::info!(store = primary.label(), "no snapshots found, trying local fallback");
                }
                Err(e) => {
                    tracing::warn!(store = primary.label(), error = %e, "store failed, trying local fallback");
                }
            }
        }

        let local = DirStore::new(&self.opts.data_dir);
        match self.load_from_store(&local, range) {
            Ok(Some(loaded)) => return loaded,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(dir = %self.opts.data_dir.display(), error = %e, "local load failed");
            }
        }

        Loaded::empty("No data source found.")
    }

    /// Load from one store. `Ok(None)` means the store holds no usable
    /// snapshots (the caller falls through to the next source).
    fn load_from_store(&self, store: &dyn SnapshotStore, range: TimeRange) -> Result<Option<Loaded>> {
        let snapshots = discover_snapshots(store)?;
        if snapshots.is_empty() {
            return Ok(None);
        }

        if range == TimeRange::Today {
            // Single latest file by embedded date.
            let Some((date, name)) = snapshots.iter().next_back() else {
                return Ok(None);
            };
            let bytes = store.fetch(name).with_context(|| format!("fetch {name}"))?;
            let mut posts = parse_snapshot(&bytes, Some(*date))
                .with_context(|| format!("parse {name}"))?;
            tracing::info!(file = %name, rows = posts.len(), "loaded latest snapshot");
            enrich(&mut posts, &self.analyzer);
            return Ok(Some(Loaded {
                posts,
                provenance: format!("{}: {}", store.label(), name),
            }));
        }

        // Multi-file path: fetch and parse everything, newest first.
        let entries: Vec<(SnapDate, String)> =
            snapshots.into_iter().rev().collect();

        let pb = if self.opts.progress {
            let label = self.opts.progress_label.as_deref().unwrap_or("Loading snapshots");
            Some(make_count_progress(entries.len() as u64, label))
        } else {
            None
        };

        let parts: Mutex<Vec<(SnapDate, Vec<Post>)>> = Mutex::new(Vec::new());
        crate::concurrency::for_each_limited(&entries, self.opts.file_concurrency, |(date, name)| {
            match store.fetch(name).and_then(|bytes| parse_snapshot(&bytes, Some(*date))) {
                Ok(posts) => parts.lock().push((*date, posts)),
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "error downloading or processing snapshot, skipping");
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            Ok(())
        })?;
        if let Some(pb) = pb {
            pb.finish_with_message("snapshots loaded");
        }

        let mut parts = parts.into_inner();
        if parts.is_empty() {
            return Ok(None);
        }
        parts.sort_by(|a, b| b.0.cmp(&a.0));
        let file_count = parts.len();

        if let Some(days) = range.cutoff_days() {
            let cutoff = OffsetDateTime::now_utc().date() - Duration::days(days);
            parts.retain(|(date, _)| date.to_date().map(|d| d >= cutoff).unwrap_or(false));
        }

        let mut posts: Vec<Post> = parts.into_iter().flat_map(|(_, p)| p).collect();
        if posts.is_empty() {
            return Ok(Some(Loaded::empty(format!(
                "{}: 0 files after time filter ({} analysis)",
                store.label(),
                range.label()
            ))));
        }

        tracing::info!(files = file_count, rows = posts.len(), "loaded snapshot range");
        enrich(&mut posts, &self.analyzer);
        Ok(Some(Loaded {
            posts,
            provenance: format!("{}: {} files ({} analysis)", store.label(), file_count, range.label()),
        }))
    }
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new()
    }
}
