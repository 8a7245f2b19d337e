use anyhow::Result;
use rtrends::{
    competitive_mentions, compute_kpis, detect_trending, rows_to_json, segment_audience,
    KeywordSet, SnapshotLoader, TimeRange, TrendWindow,
};
use serde_json::json;

const DATA_ROOT: &str = "./data";

/// Stand-in for the dashboard: load a range, print the analysis results as
/// JSON row-records.
///
/// Usage: rtrends [day|week|month|all] [keyword,keyword,...]
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let range: TimeRange = args
        .next()
        .as_deref()
        .unwrap_or("day")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let keywords = args.next().and_then(|raw| KeywordSet::parse(&raw));

    let loaded = SnapshotLoader::new()
        .data_dir(DATA_ROOT)
        .progress(true)
        .progress_label("Loading snapshots")
        .load(range);

    eprintln!("source: {}", loaded.provenance);

    let window = TrendWindow::for_span(&loaded.posts);
    let mut out = json!({
        "provenance": loaded.provenance,
        "kpis": compute_kpis(&loaded.posts),
        "trending": detect_trending(&loaded.posts, window),
        "segments": segment_audience(&loaded.posts),
    });
    if let Some(set) = keywords {
        out["competitive"] = json!(competitive_mentions(&loaded.posts, &set));
    }
    out["rows"] = rows_to_json(&loaded.posts);

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
