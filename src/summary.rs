//! Table-level aggregations behind the dashboard's KPI cards and charts.

use crate::post::Post;
use crate::sentiment::SentimentLabel;
use crate::trend::{TrendPoint, TrendWindow};
use crate::util::normalize_sub;
use ahash::AHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Headline numbers: post count plus means rounded to one decimal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Kpis {
    pub total_posts: u64,
    pub avg_score: f64,
    pub avg_comments: f64,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn compute_kpis(posts: &[Post]) -> Kpis {
    if posts.is_empty() {
        return Kpis { total_posts: 0, avg_score: 0.0, avg_comments: 0.0 };
    }
    let n = posts.len() as f64;
    let score_sum: i64 = posts.iter().map(|p| p.score).sum();
    let comments_sum: i64 = posts.iter().map(|p| p.num_comments).sum();
    Kpis {
        total_posts: posts.len() as u64,
        avg_score: round1(score_sum as f64 / n),
        avg_comments: round1(comments_sum as f64 / n),
    }
}

/// Keep only posts from the named subreddits (case-insensitive, "r/" tolerated).
/// An empty filter keeps everything.
pub fn filter_subreddits(mut posts: Vec<Post>, subreddits: &[String]) -> Vec<Post> {
    if subreddits.is_empty() {
        return posts;
    }
    let wanted: Vec<String> = subreddits.iter().map(|s| normalize_sub(s)).collect();
    posts.retain(|p| wanted.iter().any(|w| p.subreddit.eq_ignore_ascii_case(w)));
    posts
}

/// Post counts per time bucket, sorted by bucket start.
pub fn posts_over_time(posts: &[Post], window: TrendWindow) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<i64, u64> = BTreeMap::new();
    for post in posts {
        *buckets.entry(window.bucket(post.created_utc)).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(bucket, count)| TrendPoint { start: window.bucket_start(bucket), count })
        .collect()
}

/// Post counts per sentiment category, in Positive/Neutral/Negative order.
/// Unenriched posts are not counted.
pub fn sentiment_distribution(posts: &[Post]) -> Vec<(SentimentLabel, u64)> {
    let mut counts: AHashMap<SentimentLabel, u64> = AHashMap::new();
    for post in posts {
        if let Some(s) = &post.sentiment {
            *counts.entry(s.label()).or_insert(0) += 1;
        }
    }
    [SentimentLabel::Positive, SentimentLabel::Neutral, SentimentLabel::Negative]
        .into_iter()
        .map(|label| (label, counts.get(&label).copied().unwrap_or(0)))
        .collect()
}

/// Mean compound score per subreddit.
#[derive(Clone, Debug, Serialize)]
pub struct SubredditSentiment {
    pub subreddit: String,
    pub mean_compound: f64,
}

/// Top subreddits by mean compound sentiment, descending. Posts without a
/// sentiment annotation are skipped.
pub fn sentiment_by_subreddit(posts: &[Post], top_n: usize) -> Vec<SubredditSentiment> {
    let mut sums: AHashMap<&str, (f64, u64)> = AHashMap::new();
    for post in posts {
        if let Some(s) = &post.sentiment {
            let acc = sums.entry(post.subreddit.as_str()).or_insert((0.0, 0));
            acc.0 += s.compound;
            acc.1 += 1;
        }
    }
    let mut rows: Vec<SubredditSentiment> = sums
        .into_iter()
        .map(|(sub, (sum, n))| SubredditSentiment {
            subreddit: sub.to_string(),
            mean_compound: sum / n as f64,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.mean_compound
            .partial_cmp(&a.mean_compound)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.subreddit.cmp(&b.subreddit))
    });
    rows.truncate(top_n);
    rows
}

/// Top subreddits by post count, descending.
pub fn top_subreddits(posts: &[Post], top_n: usize) -> Vec<(String, u64)> {
    let mut counts: AHashMap<&str, u64> = AHashMap::new();
    for post in posts {
        *counts.entry(post.subreddit.as_str()).or_insert(0) += 1;
    }
    let mut rows: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(sub, n)| (sub.to_string(), n))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows.truncate(top_n);
    rows
}
