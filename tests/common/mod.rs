use rtrends::{Post, SnapDate};
use std::fs;
use std::path::{Path, PathBuf};
use time::{Duration, OffsetDateTime};

/// Header row every snapshot fixture uses, in the scraper's column order.
pub const CSV_HEADER: &str =
    "id,title,score,num_comments,subreddit,url,permalink,created_utc,flair,is_video,is_self,domain,author";

/// Write one snapshot CSV named for `compact_date` (YYYYMMDD) under `dir`.
pub fn write_snapshot(dir: &Path, compact_date: &str, rows: &[String]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("reddit_trends_{compact_date}.csv"));
    let mut contents = String::from(CSV_HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&path, contents).unwrap();
    path
}

/// One CSV row with sane defaults for the columns tests rarely care about.
pub fn csv_row(
    id: &str,
    title: &str,
    score: &str,
    num_comments: &str,
    subreddit: &str,
    created: &str,
    author: &str,
) -> String {
    format!(
        "{id},{title},{score},{num_comments},{subreddit},\
         https://example.com/{id},https://reddit.com/{id},{created},,false,true,self.{subreddit},{author}"
    )
}

/// Compact date string `days_ago` days before today (UTC), for cutoff tests.
pub fn recent_compact(days_ago: i64) -> String {
    SnapDate::from(OffsetDateTime::now_utc().date() - Duration::days(days_ago)).compact()
}

/// RFC 3339 timestamp on the given compact date.
pub fn ts_on(compact_date: &str) -> String {
    let d = SnapDate::parse_compact(compact_date).unwrap();
    format!("{d}T10:00:00+00:00")
}

/// Timestamp `h` hours after the epoch, for bucket-level tests.
pub fn hour_ts(h: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(h * 3600).unwrap()
}

/// In-memory post for the pure-function analyzers.
pub fn make_post(
    author: &str,
    subreddit: &str,
    score: i64,
    num_comments: i64,
    title: &str,
    selftext: &str,
    created_utc: OffsetDateTime,
) -> Post {
    Post {
        id: format!("{author}-{score}"),
        title: title.to_string(),
        selftext: selftext.to_string(),
        score,
        num_comments,
        subreddit: subreddit.to_string(),
        url: String::new(),
        permalink: String::new(),
        created_utc,
        flair: "None".to_string(),
        is_video: false,
        is_self: true,
        domain: format!("self.{subreddit}"),
        author: author.to_string(),
        snapshot: None,
        sentiment: None,
    }
}
