//! Keyword, competitive-mention and contextual analyzers.
//!
//! Matching policy is case-insensitive substring matching everywhere: the
//! alternation regex over escaped keywords matches anywhere in the title or
//! body ("foo" matches "food"). Contextual extraction uses the same policy.

use crate::post::Post;
use crate::trend::{TrendPoint, TrendWindow};
use ahash::AHashMap;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// A normalized keyword list with its compiled search patterns.
#[derive(Clone, Debug)]
pub struct KeywordSet {
    keywords: Vec<String>,
    pattern: Regex,
}

impl KeywordSet {
    /// Parse the UI's comma-separated form: trim, lowercase, drop empties,
    /// dedup preserving first occurrence. Returns None when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::from_keywords(raw.split(','))
    }

    pub fn from_keywords<I, S>(iter: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<String> = Vec::new();
        for kw in iter {
            let kw = kw.as_ref().trim().to_lowercase();
            if !kw.is_empty() && !keywords.contains(&kw) {
                keywords.push(kw);
            }
        }
        if keywords.is_empty() {
            return None;
        }
        let escaped: Vec<String> = keywords.iter().map(|kw| regex::escape(kw)).collect();
        let pattern = Regex::new(&format!("(?i)({})", escaped.join("|")))
            .expect("escaped keywords always form a valid pattern");
        Some(Self { keywords, pattern })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Does any keyword occur in the post's title or body?
    pub fn matches_post(&self, post: &Post) -> bool {
        self.pattern.is_match(&post.title) || self.pattern.is_match(&post.selftext)
    }
}

/// Indices of posts matching any keyword, for the keyword-post listing.
pub fn keyword_posts(posts: &[Post], set: &KeywordSet) -> Vec<usize> {
    posts
        .iter()
        .enumerate()
        .filter(|(_, p)| set.matches_post(p))
        .map(|(i, _)| i)
        .collect()
}

/// Per-keyword engagement aggregate for competitive analysis.
#[derive(Clone, Debug, Serialize)]
pub struct KeywordMention {
    pub keyword: String,
    pub mentions_count: u64,
    pub avg_score: f64,
    pub avg_comments: f64,
    pub total_engagement: i64,
}

#[derive(Default)]
struct MentionAcc {
    count: u64,
    score_sum: i64,
    comments_sum: i64,
    engagement_sum: i64,
}

/// Aggregate engagement per keyword. A post mentioning several keywords
/// contributes one row to each; keywords with no mentions are omitted.
/// Output is sorted by keyword.
pub fn competitive_mentions(posts: &[Post], set: &KeywordSet) -> Vec<KeywordMention> {
    let mut by_keyword: AHashMap<&str, MentionAcc> = AHashMap::new();
    for post in posts {
        if !set.matches_post(post) {
            continue;
        }
        let title = post.title.to_lowercase();
        let selftext = post.selftext.to_lowercase();
        for kw in set.keywords() {
            if title.contains(kw.as_str()) || selftext.contains(kw.as_str()) {
                let acc = by_keyword.entry(kw.as_str()).or_default();
                acc.count += 1;
                acc.score_sum += post.score;
                acc.comments_sum += post.num_comments;
                acc.engagement_sum += post.score + post.num_comments;
            }
        }
    }

    let mut mentions: Vec<KeywordMention> = by_keyword
        .into_iter()
        .map(|(kw, acc)| KeywordMention {
            keyword: kw.to_string(),
            mentions_count: acc.count,
            avg_score: acc.score_sum as f64 / acc.count as f64,
            avg_comments: acc.comments_sum as f64 / acc.count as f64,
            total_engagement: acc.engagement_sum,
        })
        .collect();
    mentions.sort_by(|a, b| a.keyword.cmp(&b.keyword));
    mentions
}

/// A fixed-width character window around every keyword occurrence in `text`.
/// Windows are counted in characters and clipped to the text bounds.
pub fn extract_context(text: &str, set: &KeywordSet, window: usize) -> Result<Vec<String>> {
    let chars: Vec<char> = text.chars().collect();
    let mut contexts = Vec::new();
    for kw in set.keywords() {
        let re = Regex::new(&format!("(?i){}", regex::escape(kw)))
            .with_context(|| format!("keyword pattern for {kw:?}"))?;
        for m in re.find_iter(text) {
            let start_char = text[..m.start()].chars().count();
            let end_char = start_char + m.as_str().chars().count();
            let lo = start_char.saturating_sub(window);
            let hi = (end_char + window).min(chars.len());
            contexts.push(chars[lo..hi].iter().collect());
        }
    }
    Ok(contexts)
}

/// Bucketed mention counts for the keyword trend chart.
pub fn mentions_over_time(posts: &[Post], set: &KeywordSet, window: TrendWindow) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<i64, u64> = BTreeMap::new();
    for post in posts {
        if set.matches_post(post) {
            *buckets.entry(window.bucket(post.created_utc)).or_insert(0) += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(bucket, count)| TrendPoint { start: window.bucket_start(bucket), count })
        .collect()
}
