//! Per-author activity aggregation and tiering.

use crate::post::Post;
use ahash::AHashMap;
use serde::Serialize;

/// Ordinal activity tier by total post count. Boundaries are fixed:
/// the lower bound of each tier is inclusive, so a count of exactly 10
/// lands in `Occasional`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ActivityTier {
    #[serde(rename = "Inactif")]
    Inactive,
    #[serde(rename = "Occasionnel")]
    Occasional,
    #[serde(rename = "Actif")]
    Active,
    #[serde(rename = "Très Actif")]
    VeryActive,
}

impl ActivityTier {
    pub fn from_count(total_posts: u64) -> Self {
        match total_posts {
            0..=9 => ActivityTier::Inactive,
            10..=49 => ActivityTier::Occasional,
            50..=99 => ActivityTier::Active,
            _ => ActivityTier::VeryActive,
        }
    }

    /// Display labels kept from the dashboard UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityTier::Inactive => "Inactif",
            ActivityTier::Occasional => "Occasionnel",
            ActivityTier::Active => "Actif",
            ActivityTier::VeryActive => "Très Actif",
        }
    }
}

impl std::fmt::Display for ActivityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row per distinct author.
#[derive(Clone, Debug, Serialize)]
pub struct AudienceSegment {
    pub author: String,
    pub total_posts: u64,
    pub avg_score: f64,
    pub avg_comments: f64,
    pub top_subreddit: String,
    pub tier: ActivityTier,
}

#[derive(Default)]
struct AuthorAcc {
    posts: u64,
    score_sum: i64,
    comments_sum: i64,
    subreddits: AHashMap<String, u64>,
}

/// Aggregate posts by author. Empty input yields an empty table.
/// Output is sorted by descending post count, then author, for stable display.
pub fn segment_audience(posts: &[Post]) -> Vec<AudienceSegment> {
    let mut by_author: AHashMap<&str, AuthorAcc> = AHashMap::new();
    for post in posts {
        let acc = by_author.entry(post.author.as_str()).or_default();
        acc.posts += 1;
        acc.score_sum += post.score;
        acc.comments_sum += post.num_comments;
        *acc.subreddits.entry(post.subreddit.clone()).or_insert(0) += 1;
    }

    let mut segments: Vec<AudienceSegment> = by_author
        .into_iter()
        .map(|(author, acc)| {
            // Mode with a deterministic tie-break on name.
            let top_subreddit = acc
                .subreddits
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(sub, _)| sub.clone())
                .unwrap_or_else(|| "N/A".to_string());
            AudienceSegment {
                author: author.to_string(),
                total_posts: acc.posts,
                avg_score: acc.score_sum as f64 / acc.posts as f64,
                avg_comments: acc.comments_sum as f64 / acc.posts as f64,
                top_subreddit,
                tier: ActivityTier::from_count(acc.posts),
            }
        })
        .collect();

    segments.sort_by(|a, b| b.total_posts.cmp(&a.total_posts).then_with(|| a.author.cmp(&b.author)));
    segments
}
