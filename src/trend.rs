//! Trending-token detection over time buckets.
//!
//! One pass tokenizes every post and builds an inverted index from token to
//! the distinct posts containing it; the spike test then runs off the index
//! without rescanning the table.

use crate::post::Post;
use ahash::{AHashMap, AHashSet};
use std::sync::OnceLock;
use time::OffsetDateTime;

/// Bucket granularity for time-series style analyses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendWindow {
    Hour,
    Day,
}

impl TrendWindow {
    /// Hour-level when every post falls on one calendar day, day-level otherwise.
    pub fn for_span(posts: &[Post]) -> Self {
        let mut days = posts.iter().map(|p| p.created_utc.date());
        match days.next() {
            Some(first) if days.all(|d| d == first) => TrendWindow::Hour,
            _ => TrendWindow::Day,
        }
    }

    fn seconds(&self) -> i64 {
        match self {
            TrendWindow::Hour => 3600,
            TrendWindow::Day => 86_400,
        }
    }

    /// Bucket index for a timestamp.
    pub fn bucket(&self, ts: OffsetDateTime) -> i64 {
        ts.unix_timestamp().div_euclid(self.seconds())
    }

    /// Start of a bucket as a timestamp, for chart axes.
    pub fn bucket_start(&self, bucket: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(bucket * self.seconds())
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

/// One point of a bucketed count series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrendPoint {
    pub start: OffsetDateTime,
    pub count: u64,
}

/// Standard English stopword list (NLTK's set, including the bare contraction
/// stems the tokenizer produces).
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "youre", "youve", "youll", "youd", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "shes", "her",
    "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that",
    "thatll", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did",
    "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when",
    "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
    "don", "dont", "should", "shouldve", "now", "d", "ll", "m", "o", "re",
    "ve", "y", "ain", "aren", "arent", "couldn", "couldnt", "didn", "didnt",
    "doesn", "doesnt", "hadn", "hadnt", "hasn", "hasnt", "haven", "havent",
    "isn", "isnt", "ma", "mightn", "mightnt", "mustn", "mustnt", "needn",
    "neednt", "shan", "shant", "shouldn", "shouldnt", "wasn", "wasnt",
    "weren", "werent", "won", "wont", "wouldn", "wouldnt",
];

fn stopwords() -> &'static AHashSet<&'static str> {
    static SET: OnceLock<AHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

/// Lowercased alphanumeric tokens with stopwords removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let stop = stopwords();
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !stop.contains(t))
        .map(str::to_string)
        .collect()
}

/// Tokens whose busiest time bucket exceeds twice their mean bucket count.
/// Candidates need a global frequency above one and at least two distinct
/// matching posts; a token seen in a single post is never flagged. Output
/// preserves first-seen order.
pub fn detect_trending(posts: &[Post], window: TrendWindow) -> Vec<String> {
    if posts.is_empty() {
        return Vec::new();
    }

    let mut counts: AHashMap<String, u64> = AHashMap::new();
    let mut index: AHashMap<String, Vec<usize>> = AHashMap::new();
    let mut order: Vec<String> = Vec::new();

    for (i, post) in posts.iter().enumerate() {
        for token in tokenize(&post.combined_text()) {
            let count = counts.entry(token.clone()).or_insert(0);
            if *count == 0 {
                order.push(token.clone());
            }
            *count += 1;
            let entries = index.entry(token).or_default();
            if entries.last() != Some(&i) {
                entries.push(i);
            }
        }
    }

    let mut trending = Vec::new();
    for token in &order {
        if counts[token.as_str()] <= 1 {
            continue;
        }
        let matching = &index[token.as_str()];
        if matching.len() <= 1 {
            continue;
        }
        let mut buckets: AHashMap<i64, u64> = AHashMap::new();
        for &i in matching {
            *buckets.entry(window.bucket(posts[i].created_utc)).or_insert(0) += 1;
        }
        let max = buckets.values().copied().max().unwrap_or(0);
        let mean = matching.len() as f64 / buckets.len() as f64;
        if max as f64 > mean * 2.0 {
            trending.push(token.clone());
        }
    }
    trending
}
