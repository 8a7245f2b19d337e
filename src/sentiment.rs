//! Lexicon-based sentiment scoring tuned for social-media text.
//!
//! The analyzer is an explicitly constructed resource: build one, pass it to
//! `enrich`. Scores follow the familiar social-text model: per-token valences
//! from an embedded lexicon, booster/dampener and negation adjustment from
//! the preceding tokens, a compound score normalized into [-1, 1], and
//! neg/neu/pos proportions that sum to 1 for non-empty text.

use crate::post::Post;
use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use regex::Regex;

/// Compound threshold above which text counts as positive (and, negated,
/// negative). Matches the conventional social-text cutoff.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Empirical normalization constant for the compound score.
const NORMALIZE_ALPHA: f64 = 15.0;

/// Valence multiplier applied when a token is negated.
const NEGATION_SCALAR: f64 = -0.74;

/// Valence shift contributed by a booster/dampener immediately before a token.
const BOOST_STEP: f64 = 0.293;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Display labels kept from the dashboard UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positif",
            SentimentLabel::Neutral => "Neutre",
            SentimentLabel::Negative => "Négatif",
        }
    }

    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= -POSITIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-post sentiment annotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentimentScores {
    pub compound: f64,
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
}

impl SentimentScores {
    pub const ZERO: SentimentScores = SentimentScores { compound: 0.0, neg: 0.0, neu: 0.0, pos: 0.0 };

    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

/// Token valences, roughly on the usual [-4, 4] social-lexicon scale.
/// Apostrophes never survive `clean_text`, so contracted forms are listed bare.
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8), ("awesome", 3.1), ("beautiful", 2.9), ("best", 3.2),
    ("better", 1.9), ("brilliant", 2.8), ("clever", 1.9), ("cool", 1.3),
    ("easy", 1.4), ("enjoy", 2.2), ("enjoyed", 2.3), ("epic", 2.4),
    ("excellent", 2.7), ("excited", 2.4), ("exciting", 2.2), ("fantastic", 3.0),
    ("favorite", 2.0), ("free", 1.6), ("fun", 2.3), ("funny", 1.9),
    ("glad", 2.0), ("good", 1.9), ("great", 3.1), ("haha", 2.0),
    ("happy", 2.7), ("helpful", 1.8), ("hope", 1.9), ("hopeful", 1.8),
    ("impressive", 2.3), ("improved", 1.9), ("improvement", 1.6),
    ("incredible", 2.8), ("interesting", 1.7), ("like", 1.5), ("liked", 1.7),
    ("likes", 1.6), ("lol", 1.6), ("love", 3.2), ("loved", 2.9),
    ("loves", 2.7), ("nice", 1.8), ("perfect", 2.7), ("promising", 1.7),
    ("recommend", 1.5), ("safe", 1.6), ("smart", 1.7), ("solid", 1.5),
    ("strong", 1.5), ("succeed", 2.2), ("success", 2.7), ("successful", 2.6),
    ("super", 2.9), ("sweet", 1.8), ("thank", 1.5), ("thanks", 1.9),
    ("useful", 1.9), ("win", 2.8), ("winner", 2.8), ("wins", 2.7),
    ("won", 2.7), ("wonderful", 2.7), ("wow", 2.8), ("yes", 1.7),
    // negative
    ("afraid", -2.2), ("angry", -2.3), ("annoying", -1.8), ("attack", -2.1),
    ("awful", -2.0), ("bad", -2.5), ("ban", -1.6), ("banned", -2.0),
    ("boring", -1.3), ("broken", -1.6), ("bug", -1.3), ("bugs", -1.3),
    ("cancer", -2.9), ("cheat", -2.4), ("crash", -1.6), ("crashes", -1.5),
    ("crisis", -2.5), ("dead", -2.2), ("death", -2.9), ("died", -2.6),
    ("disappointed", -2.3), ("disappointing", -2.2), ("disaster", -2.5),
    ("dumb", -2.3), ("expensive", -1.1), ("fail", -2.5), ("failed", -2.3),
    ("fails", -2.1), ("failure", -2.0), ("fake", -1.8), ("fear", -2.2),
    ("garbage", -2.2), ("hate", -2.7), ("hated", -2.6), ("hates", -1.9),
    ("horrible", -2.5), ("issue", -1.1), ("issues", -1.2), ("kill", -2.7),
    ("liar", -2.8), ("lie", -2.3), ("lies", -2.1), ("lose", -1.9),
    ("loser", -2.5), ("loses", -1.6), ("lost", -1.5), ("pain", -2.5),
    ("painful", -2.3), ("poor", -2.1), ("problem", -1.7), ("problems", -1.7),
    ("sad", -2.1), ("scam", -2.6), ("scary", -2.2), ("slow", -1.2),
    ("stupid", -2.4), ("suck", -1.5), ("sucks", -1.5), ("terrible", -2.1),
    ("threat", -2.4), ("toxic", -2.5), ("trash", -2.2), ("ugly", -2.3),
    ("useless", -1.8), ("war", -2.9), ("waste", -1.8), ("worried", -1.8),
    ("worry", -1.6), ("worse", -2.1), ("worst", -3.1), ("wrong", -2.1),
];

const INTENSIFIERS: &[&str] = &[
    "absolutely", "amazingly", "completely", "considerably", "decidedly",
    "deeply", "enormously", "entirely", "especially", "exceptionally",
    "extremely", "greatly", "highly", "hugely", "incredibly", "intensely",
    "particularly", "purely", "quite", "really", "remarkably", "so",
    "substantially", "thoroughly", "totally", "tremendously", "unbelievably",
    "unusually", "utterly", "very",
];

const DAMPENERS: &[&str] = &[
    "almost", "barely", "hardly", "kind", "kinda", "less", "little",
    "marginally", "occasionally", "partly", "scarcely", "slightly",
    "somewhat", "sorta",
];

const NEGATIONS: &[&str] = &[
    "aint", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "isnt",
    "neither", "never", "no", "nobody", "none", "nor", "not", "nothing",
    "nowhere", "rarely", "seldom", "shouldnt", "wasnt", "without", "wont",
    "wouldnt",
];

/// How far back a booster or negation can reach, in tokens.
const LOOKBACK: usize = 3;

/// Distance decay for boosters two and three tokens away.
const BOOST_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

pub struct SentimentAnalyzer {
    lexicon: AHashMap<&'static str, f64>,
    intensifiers: AHashSet<&'static str>,
    dampeners: AHashSet<&'static str>,
    negations: AHashSet<&'static str>,
    url_re: Regex,
    nonword_re: Regex,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            dampeners: DAMPENERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            url_re: Regex::new(r"http\S+|www\S+").unwrap(),
            nonword_re: Regex::new(r"[^\w\s]").unwrap(),
        }
    }

    /// Strip URLs and non-word characters before scoring.
    pub fn clean_text(&self, text: &str) -> String {
        let no_urls = self.url_re.replace_all(text, "");
        self.nonword_re.replace_all(&no_urls, "").into_owned()
    }

    /// Score one text. Empty (or cleaned-to-empty) text scores all zeros.
    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        let cleaned = self.clean_text(text).to_lowercase();
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if tokens.is_empty() {
            return SentimentScores::ZERO;
        }

        let mut sum = 0.0f64;
        let mut pos_sum = 0.0f64;
        let mut neg_sum = 0.0f64;
        let mut neu_count = 0u64;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.lexicon.get(token) else {
                neu_count += 1;
                continue;
            };
            let mut valence = base;
            let mut negated = false;
            for dist in 1..=LOOKBACK.min(i) {
                let prev = tokens[i - dist];
                let decay = BOOST_DECAY[dist - 1];
                if self.intensifiers.contains(prev) {
                    valence += valence.signum() * BOOST_STEP * decay;
                } else if self.dampeners.contains(prev) {
                    valence -= valence.signum() * BOOST_STEP * decay;
                } else if !negated && self.negations.contains(prev) {
                    valence *= NEGATION_SCALAR;
                    negated = true;
                }
            }
            sum += valence;
            if valence > 0.0 {
                pos_sum += valence + 1.0;
            } else if valence < 0.0 {
                neg_sum += valence.abs() + 1.0;
            } else {
                neu_count += 1;
            }
        }

        let compound = (sum / (sum * sum + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0);
        let total = pos_sum + neg_sum + neu_count as f64;
        if total == 0.0 {
            return SentimentScores { compound, neg: 0.0, neu: 0.0, pos: 0.0 };
        }
        SentimentScores {
            compound,
            neg: neg_sum / total,
            neu: neu_count as f64 / total,
            pos: pos_sum / total,
        }
    }
}

/// Attach sentiment to every post, overwriting any existing annotation.
/// Empty input is a no-op.
pub fn enrich(posts: &mut [Post], analyzer: &SentimentAnalyzer) {
    posts.par_iter_mut().for_each(|post| {
        post.sentiment = Some(analyzer.polarity_scores(&post.combined_text()));
    });
}
