#[path = "common/mod.rs"]
mod common;

use common::*;
use rtrends::{
    enrich, parse_snapshot, parse_snapshot_name, parse_timestamp, rows_to_json, SentimentAnalyzer,
    SnapDate,
};

/// Snapshot dates round-trip through both the compact and dashed forms.
#[test]
fn snap_date_forms() {
    let d: SnapDate = "20240521".parse().unwrap();
    assert_eq!(d, SnapDate::new(2024, 5, 21));
    assert_eq!(d.compact(), "20240521");
    assert_eq!(d.to_string(), "2024-05-21");
    assert_eq!("2024-05-21".parse::<SnapDate>().unwrap(), d);

    assert!("2024052".parse::<SnapDate>().is_err());
    assert!("20241301".parse::<SnapDate>().is_err());
    assert!("20240532".parse::<SnapDate>().is_err());
}

/// Only exactly-shaped snapshot names carry a date.
#[test]
fn snapshot_name_pattern() {
    assert_eq!(
        parse_snapshot_name("reddit_trends_20240521.csv"),
        Some(SnapDate::new(2024, 5, 21))
    );
    assert_eq!(parse_snapshot_name("reddit_trends_2024052.csv"), None);
    assert_eq!(parse_snapshot_name("reddit_trends_20240521.csv.bak"), None);
    assert_eq!(parse_snapshot_name("other_20240521.csv"), None);
}

/// The scraper's RFC 3339 output and the older bare forms all parse to UTC.
#[test]
fn timestamp_formats() {
    let rfc = parse_timestamp("2024-05-21T14:30:00+00:00").unwrap();
    assert_eq!(rfc.unix_timestamp(), 1716301800);

    let frac = parse_timestamp("2024-05-21T14:30:00.123456+00:00").unwrap();
    assert_eq!(frac.unix_timestamp(), 1716301800);

    let bare = parse_timestamp("2024-05-21T14:30:00").unwrap();
    assert_eq!(bare.unix_timestamp(), 1716301800);

    let spaced = parse_timestamp("2024-05-21 14:30:00").unwrap();
    assert_eq!(spaced.unix_timestamp(), 1716301800);

    assert!(parse_timestamp("yesterday").is_none());
    assert!(parse_timestamp("").is_none());
}

/// A snapshot whose header lacks the selftext column still yields posts with
/// an empty body, and quoted fields with commas survive.
#[test]
fn parse_snapshot_handles_quoting_and_missing_columns() {
    let csv = "id,title,score,num_comments,subreddit,url,permalink,created_utc,flair,is_video,is_self,domain,author\n\
               p1,\"Hello, world\",5,1,rust,u,l,2024-05-21T14:30:00+00:00,,false,true,d,alice\n";
    let posts = parse_snapshot(csv.as_bytes(), Some(SnapDate::new(2024, 5, 21))).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello, world");
    assert_eq!(posts[0].selftext, "");
    assert_eq!(posts[0].snapshot, Some(SnapDate::new(2024, 5, 21)));
}

/// Row-records carry the sentiment columns once enriched, in the shape the
/// presentation layer expects.
#[test]
fn row_records_include_sentiment() {
    let analyzer = SentimentAnalyzer::new();
    let mut posts = vec![make_post("alice", "rust", 5, 1, "a great day", "", hour_ts(0))];
    enrich(&mut posts, &analyzer);

    let rows = rows_to_json(&posts);
    let row = &rows[0];
    assert_eq!(row["author"], "alice");
    assert_eq!(row["score"], 5);
    assert!(row["sentiment_compound"].as_f64().unwrap() > 0.0);
    assert_eq!(row["sentiment_category"], "Positif");
    assert!(row["created_utc"].as_str().unwrap().starts_with("1970-01-01T00:00:00"));
}
