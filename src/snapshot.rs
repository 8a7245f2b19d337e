//! CSV snapshot parsing and row cleaning.
//!
//! A snapshot is one dated CSV export with a header row. Rows that cannot be
//! brought up to the `Post` invariants (unparseable timestamp, non-numeric or
//! negative score/comment counts) are dropped, not errors; files that are not
//! CSV at all surface as an error the loader turns into a skip.

use crate::date::SnapDate;
use crate::post::Post;
use anyhow::{Context, Result};
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Raw CSV row, everything optional. Missing columns and empty fields both
/// deserialize to `None`; the cleaner decides what is required.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub selftext: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub num_comments: Option<String>,
    #[serde(default)]
    pub subreddit: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub created_utc: Option<String>,
    #[serde(default)]
    pub flair: Option<String>,
    #[serde(default)]
    pub is_video: Option<String>,
    #[serde(default)]
    pub is_self: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Parse an ISO-8601-ish timestamp into UTC. The scraper writes RFC 3339 with
/// an explicit offset; older snapshots carried bare "YYYY-MM-DDTHH:MM:SS"
/// (assumed UTC) and the space-separated variant.
pub fn parse_timestamp(s: &str) -> Option<OffsetDateTime> {
    let s = s.trim();
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt.to_offset(time::UtcOffset::UTC));
    }
    let t_fmt = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(s, &t_fmt) {
        return Some(dt.assume_utc());
    }
    let space_fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(s, &space_fmt) {
        return Some(dt.assume_utc());
    }
    None
}

/// Numeric coercion for count columns: integers pass through, floats are
/// truncated, anything else fails.
fn parse_count(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
}

fn parse_flag(s: Option<&str>) -> bool {
    matches!(
        s.map(str::trim),
        Some("true") | Some("True") | Some("TRUE") | Some("1")
    )
}

/// Bring a raw row up to the `Post` invariants. Returns `None` when the row
/// must be dropped (bad timestamp, bad or negative counts).
pub fn clean_record(raw: RawRecord, snapshot: Option<SnapDate>) -> Option<Post> {
    let created_utc = parse_timestamp(raw.created_utc.as_deref()?)?;
    let score = parse_count(raw.score.as_deref()?)?;
    let num_comments = parse_count(raw.num_comments.as_deref()?)?;
    if score < 0 || num_comments < 0 {
        return None;
    }

    let author = match raw.author.as_deref().map(str::trim) {
        Some(a) if !a.is_empty() => a.to_string(),
        _ => "N/A".to_string(),
    };
    let flair = match raw.flair.as_deref().map(str::trim) {
        Some(f) if !f.is_empty() => f.to_string(),
        _ => "None".to_string(),
    };

    Some(Post {
        id: raw.id.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        selftext: raw.selftext.unwrap_or_default(),
        score,
        num_comments,
        subreddit: raw.subreddit.unwrap_or_default(),
        url: raw.url.unwrap_or_default(),
        permalink: raw.permalink.unwrap_or_default(),
        created_utc,
        flair,
        is_video: parse_flag(raw.is_video.as_deref()),
        is_self: parse_flag(raw.is_self.as_deref()),
        domain: raw.domain.unwrap_or_default(),
        author,
        snapshot,
        sentiment: None,
    })
}

/// Parse one snapshot's bytes into cleaned posts. Rows that fail CSV
/// deserialization or cleaning are skipped and counted; a snapshot with no
/// header at all errors out so the loader can skip the whole file.
pub fn parse_snapshot(bytes: &[u8], snapshot: Option<SnapDate>) -> Result<Vec<Post>> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(bytes);
    // Force header parsing up front so a non-CSV blob fails loudly.
    rdr.headers().context("reading snapshot header")?;

    let mut posts = Vec::new();
    let mut dropped = 0u64;
    for row in rdr.deserialize::<RawRecord>() {
        match row {
            Ok(raw) => match clean_record(raw, snapshot) {
                Some(post) => posts.push(post),
                None => dropped += 1,
            },
            Err(e) => {
                tracing::debug!(error = %e, "malformed CSV row");
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        tracing::warn!(dropped, kept = posts.len(), "dropped rows while cleaning snapshot");
    }
    Ok(posts)
}
