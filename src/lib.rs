mod config;
mod date;
mod store;
mod snapshot;
mod post;
mod loader;

mod sentiment;
mod trend;
mod segment;
mod keywords;
mod summary;

mod progress;
mod concurrency;
mod util;

pub use crate::config::{LoadOptions, TimeRange};
pub use crate::date::SnapDate;
pub use crate::loader::{Loaded, SnapshotLoader};
pub use crate::post::{rows_to_json, Post};
pub use crate::snapshot::{clean_record, parse_snapshot, parse_timestamp, RawRecord};
pub use crate::store::{discover_snapshots, parse_snapshot_name, DirStore, SnapshotStore};

pub use crate::sentiment::{enrich, SentimentAnalyzer, SentimentLabel, SentimentScores};
pub use crate::trend::{detect_trending, tokenize, TrendPoint, TrendWindow};
pub use crate::segment::{segment_audience, ActivityTier, AudienceSegment};
pub use crate::keywords::{
    competitive_mentions, extract_context, keyword_posts, mentions_over_time, KeywordMention,
    KeywordSet,
};
pub use crate::summary::{
    compute_kpis, filter_subreddits, posts_over_time, sentiment_by_subreddit,
    sentiment_distribution, top_subreddits, Kpis, SubredditSentiment,
};

// Expose multiprogress and progress helpers.
pub use crate::progress::{make_count_progress, set_global_multiprogress};

// Export robust file ops and logging setup so binaries can import from crate root.
pub use crate::util::{init_tracing_once, normalize_sub, open_with_backoff};
