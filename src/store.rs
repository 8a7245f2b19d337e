//! Snapshot storage seam. The real object-storage client lives outside this
//! crate; the loader only needs list-by-name and fetch-by-name, so that is
//! the whole trait. `DirStore` is the local-directory implementation used
//! both as primary source in dev and as the fallback in production.

use crate::date::SnapDate;
use crate::util::open_with_backoff;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Minimal blob-store surface the loader depends on.
pub trait SnapshotStore: Send + Sync {
    /// Human-readable source label used in provenance strings ("Local", "Remote", ...).
    fn label(&self) -> &str;
    /// Names of all blobs in the store (flat namespace).
    fn list(&self) -> Result<Vec<String>>;
    /// Fetch a blob's full contents by name.
    fn fetch(&self, name: &str) -> Result<Vec<u8>>;
}

/// Snapshot filenames look like `reddit_trends_20240521.csv`.
fn snapshot_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^reddit_trends_(\d{8})\.csv$").unwrap())
}

/// Parse the embedded date out of a snapshot filename, if it matches the pattern.
pub fn parse_snapshot_name(name: &str) -> Option<SnapDate> {
    let caps = snapshot_name_re().captures(name)?;
    match SnapDate::parse_compact(&caps[1]) {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!(name, error = %e, "Skipping file with unexpected name format");
            None
        }
    }
}

/// Map the store's blob names to dated snapshots, newest last.
/// Non-matching names are ignored; matching names with an invalid embedded
/// date are skipped with a warning.
pub fn discover_snapshots(store: &dyn SnapshotStore) -> Result<BTreeMap<SnapDate, String>> {
    let mut map = BTreeMap::new();
    for name in store.list()? {
        if let Some(date) = parse_snapshot_name(&name) {
            map.insert(date, name);
        }
    }
    Ok(map)
}

/// Local directory of snapshot CSVs.
#[derive(Clone, Debug)]
pub struct DirStore {
    dir: PathBuf,
    label: String,
}

impl DirStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf(), label: "Local".to_string() }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotStore for DirStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        if !self.dir.exists() {
            return Ok(names);
        }
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            if let Ok(ent) = entry {
                if let Some(name) = ent.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(name);
        let mut file = open_with_backoff(&path, 16, 50)
            .with_context(|| format!("open {}", path.display()))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        Ok(buf)
    }
}
