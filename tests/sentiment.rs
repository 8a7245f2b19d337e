#[path = "common/mod.rs"]
mod common;

use common::*;
use rtrends::{enrich, SentimentAnalyzer, SentimentLabel};

/// Category assignment is a pure function of the compound score with exact
/// thresholds at ±0.05.
#[test]
fn label_thresholds_are_exact() {
    assert_eq!(SentimentLabel::from_compound(0.05), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_compound(-0.05), SentimentLabel::Negative);
    assert_eq!(SentimentLabel::from_compound(0.0), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_compound(0.049), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_compound(-0.049), SentimentLabel::Neutral);
    assert_eq!(SentimentLabel::from_compound(1.0), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_compound(-1.0), SentimentLabel::Negative);
}

/// Clearly polar texts land on the expected side; lexicon-free text is neutral.
#[test]
fn polarity_direction() {
    let analyzer = SentimentAnalyzer::new();

    let pos = analyzer.polarity_scores("I love this, the release is great");
    assert_eq!(pos.label(), SentimentLabel::Positive);
    assert!(pos.pos > pos.neg);

    let neg = analyzer.polarity_scores("This is terrible and the update is awful");
    assert_eq!(neg.label(), SentimentLabel::Negative);
    assert!(neg.neg > neg.pos);

    let neu = analyzer.polarity_scores("The table has four wooden legs");
    assert_eq!(neu.label(), SentimentLabel::Neutral);
    assert_eq!(neu.compound, 0.0);
}

/// Compound stays inside [-1, 1] no matter how loaded the text is, and the
/// component proportions sum to 1 for non-empty text.
#[test]
fn compound_bounds_and_component_sum() {
    let analyzer = SentimentAnalyzer::new();
    let gushing = "love love love best great awesome amazing wonderful ".repeat(20);
    let scores = analyzer.polarity_scores(&gushing);
    assert!(scores.compound <= 1.0 && scores.compound >= -1.0);
    assert!(scores.compound > 0.9);
    assert!((scores.pos + scores.neu + scores.neg - 1.0).abs() < 1e-9);

    let seething = "hate hate worst terrible awful horrible ".repeat(20);
    let scores = analyzer.polarity_scores(&seething);
    assert!(scores.compound >= -1.0);
    assert!(scores.compound < -0.9);
}

/// Empty or cleaned-to-empty text scores all zeros.
#[test]
fn empty_text_is_all_zeros() {
    let analyzer = SentimentAnalyzer::new();
    for text in ["", "   ", "https://example.com/only-a-url", "!!! ??? ..."] {
        let scores = analyzer.polarity_scores(text);
        assert_eq!(scores.compound, 0.0, "text: {text:?}");
        assert_eq!(scores.pos + scores.neu + scores.neg, 0.0, "text: {text:?}");
    }
}

/// URLs are stripped before scoring: a hostile-looking URL must not move the
/// score of an otherwise neutral sentence.
#[test]
fn urls_do_not_affect_scores() {
    let analyzer = SentimentAnalyzer::new();
    let plain = analyzer.polarity_scores("See the changelog entry");
    let with_url = analyzer.polarity_scores("See the changelog entry https://awful-terrible.example/worst");
    assert_eq!(plain.compound, with_url.compound);
}

/// Negation flips polarity across the cutoff.
#[test]
fn negation_flips_polarity() {
    let analyzer = SentimentAnalyzer::new();
    let plain = analyzer.polarity_scores("this is good");
    let negated = analyzer.polarity_scores("this is not good");
    assert_eq!(plain.label(), SentimentLabel::Positive);
    assert_eq!(negated.label(), SentimentLabel::Negative);
}

/// Re-enriching overwrites the annotation instead of stacking a second one,
/// and scoring is deterministic.
#[test]
fn enrich_is_idempotent() {
    let analyzer = SentimentAnalyzer::new();
    let mut posts = vec![
        make_post("alice", "rust", 10, 1, "I love this great release", "", hour_ts(0)),
        make_post("bob", "rust", 2, 0, "worst update", "everything is broken", hour_ts(1)),
    ];

    enrich(&mut posts, &analyzer);
    let first: Vec<_> = posts.iter().map(|p| p.sentiment.unwrap()).collect();
    enrich(&mut posts, &analyzer);
    let second: Vec<_> = posts.iter().map(|p| p.sentiment.unwrap()).collect();
    assert_eq!(first, second);
    assert_eq!(posts[0].sentiment.unwrap().label(), SentimentLabel::Positive);
    assert_eq!(posts[1].sentiment.unwrap().label(), SentimentLabel::Negative);
}

/// Empty input passes through untouched.
#[test]
fn enrich_empty_is_noop() {
    let analyzer = SentimentAnalyzer::new();
    let mut posts: Vec<rtrends::Post> = Vec::new();
    enrich(&mut posts, &analyzer);
    assert!(posts.is_empty());
}
