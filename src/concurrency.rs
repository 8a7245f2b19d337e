//! Concurrency helper: limit the number of snapshot files processed in parallel.

use anyhow::Result;
use rayon::prelude::*;

/// Limit parallelism across snapshot files: at most `limit` parsers in flight.
pub fn for_each_limited<T, F>(items: &[T], limit: usize, f: F) -> Result<()>
where
    T: Sync,
    F: Sync + Fn(&T) -> Result<()>,
{
    if limit <= 1 {
        for item in items {
            f(item)?;
        }
        return Ok(());
    }
    for chunk in items.chunks(limit) {
        chunk.par_iter().try_for_each(|item| f(item))?;
    }
    Ok(())
}
