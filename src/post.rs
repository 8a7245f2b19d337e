use crate::date::SnapDate;
use crate::sentiment::SentimentScores;
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// One cleaned post row. Invariants established by the snapshot parser:
/// `score` and `num_comments` are non-negative, `created_utc` is UTC,
/// `author`/`flair` carry sentinels instead of nulls, `title`/`selftext`
/// are never missing (empty string at worst).
#[derive(Clone, Debug)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub score: i64,
    pub num_comments: i64,
    pub subreddit: String,
    pub url: String,
    pub permalink: String,
    pub created_utc: OffsetDateTime,
    pub flair: String,
    pub is_video: bool,
    pub is_self: bool,
    pub domain: String,
    pub author: String,
    /// Date of the snapshot file this row came from, when known.
    pub snapshot: Option<SnapDate>,
    /// Attached by the sentiment enricher; recomputed on every load.
    pub sentiment: Option<SentimentScores>,
}

impl Post {
    /// Title and body joined the way the enricher and analyzers see them.
    pub fn combined_text(&self) -> String {
        let mut s = String::with_capacity(self.title.len() + self.selftext.len() + 1);
        s.push_str(&self.title);
        s.push(' ');
        s.push_str(&self.selftext);
        s
    }

    /// One row-record for the presentation collaborator.
    pub fn to_row(&self) -> Value {
        let created = self
            .created_utc
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.created_utc.unix_timestamp().to_string());
        let mut row = json!({
            "id": self.id,
            "title": self.title,
            "selftext": self.selftext,
            "score": self.score,
            "num_comments": self.num_comments,
            "subreddit": self.subreddit,
            "url": self.url,
            "permalink": self.permalink,
            "created_utc": created,
            "flair": self.flair,
            "is_video": self.is_video,
            "is_self": self.is_self,
            "domain": self.domain,
            "author": self.author,
        });
        if let Some(snap) = self.snapshot {
            row["file_date"] = json!(snap.to_string());
        }
        if let Some(s) = &self.sentiment {
            row["sentiment_compound"] = json!(s.compound);
            row["sentiment_negative"] = json!(s.neg);
            row["sentiment_neutral"] = json!(s.neu);
            row["sentiment_positive"] = json!(s.pos);
            row["sentiment_category"] = json!(s.label().as_str());
        }
        row
    }
}

/// Convert a table to the row-record array the presentation layer consumes.
pub fn rows_to_json(posts: &[Post]) -> Value {
    Value::Array(posts.iter().map(Post::to_row).collect())
}
