#[path = "common/mod.rs"]
mod common;

use common::*;
use rtrends::{segment_audience, ActivityTier, Post};

/// Tier boundaries are lower-inclusive: exactly 10 posts is Occasionnel,
/// exactly 50 is Actif, exactly 100 is Très Actif.
#[test]
fn tier_boundaries() {
    assert_eq!(ActivityTier::from_count(0), ActivityTier::Inactive);
    assert_eq!(ActivityTier::from_count(9), ActivityTier::Inactive);
    assert_eq!(ActivityTier::from_count(10), ActivityTier::Occasional);
    assert_eq!(ActivityTier::from_count(49), ActivityTier::Occasional);
    assert_eq!(ActivityTier::from_count(50), ActivityTier::Active);
    assert_eq!(ActivityTier::from_count(99), ActivityTier::Active);
    assert_eq!(ActivityTier::from_count(100), ActivityTier::VeryActive);
    assert_eq!(ActivityTier::from_count(5000), ActivityTier::VeryActive);

    assert_eq!(ActivityTier::Occasional.as_str(), "Occasionnel");
}

/// Tier assignment is monotonic in post count.
#[test]
fn tiers_are_monotonic() {
    let mut prev = ActivityTier::from_count(0);
    for n in 1..200 {
        let tier = ActivityTier::from_count(n);
        assert!(tier >= prev, "tier regressed at {n}");
        prev = tier;
    }
}

/// One row per author with count/mean aggregates and the modal subreddit.
#[test]
fn aggregates_per_author() {
    let posts = vec![
        make_post("alice", "rust", 10, 1, "a", "", hour_ts(0)),
        make_post("alice", "rust", 20, 3, "b", "", hour_ts(1)),
        make_post("alice", "golang", 30, 2, "c", "", hour_ts(2)),
        make_post("bob", "python", 4, 4, "d", "", hour_ts(0)),
    ];

    let segments = segment_audience(&posts);
    assert_eq!(segments.len(), 2);

    // Sorted by descending post count.
    let alice = &segments[0];
    assert_eq!(alice.author, "alice");
    assert_eq!(alice.total_posts, 3);
    assert_eq!(alice.avg_score, 20.0);
    assert_eq!(alice.avg_comments, 2.0);
    assert_eq!(alice.top_subreddit, "rust");
    assert_eq!(alice.tier, ActivityTier::Inactive);

    let bob = &segments[1];
    assert_eq!(bob.author, "bob");
    assert_eq!(bob.total_posts, 1);
    assert_eq!(bob.top_subreddit, "python");
}

/// Authors reach higher tiers once their counts cross the thresholds.
#[test]
fn busy_author_lands_in_higher_tier() {
    let mut posts: Vec<Post> = Vec::new();
    for i in 0..12 {
        posts.push(make_post("prolific", "rust", i, 0, "t", "", hour_ts(i)));
    }
    let segments = segment_audience(&posts);
    assert_eq!(segments[0].tier, ActivityTier::Occasional);
}

/// Empty input yields an empty table, not an error.
#[test]
fn empty_input_is_empty_output() {
    let posts: Vec<Post> = Vec::new();
    assert!(segment_audience(&posts).is_empty());
}
