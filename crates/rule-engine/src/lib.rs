//! Score computation rules
//!
//! Maps raw financial features to a base score, adjusts it with
//! keyword-driven news rules, and clamps the result to the valid range.
//! All functions here are total over well-formed inputs.

use credit_core::{FeatureVector, NewsKeyword, NewsSignal};

pub const SCORE_MIN: i32 = 0;
pub const SCORE_MAX: i32 = 100;

/// Base score from financial features, truncated toward zero (rounding
/// choice documented in DESIGN.md).
pub fn base_score(features: &FeatureVector) -> i32 {
    (50.0 + features.profit_margin * 50.0 - features.debt_ratio * 30.0 + features.growth * 40.0)
        as i32
}

/// Signed score adjustment for one news keyword. Categories are mutually
/// exclusive, so effects are additive and order-independent.
pub fn keyword_adjustment(keyword: NewsKeyword) -> i32 {
    match keyword {
        NewsKeyword::Fraud | NewsKeyword::Bankruptcy | NewsKeyword::Loss => -20,
        NewsKeyword::Profit | NewsKeyword::Innovation | NewsKeyword::Expansion => 10,
        NewsKeyword::Merger | NewsKeyword::Acquisition => 5,
    }
}

/// Apply every keyword rule to the score. No clamping here.
pub fn apply_news_rules(score: i32, signal: &NewsSignal) -> i32 {
    signal
        .keywords
        .iter()
        .fold(score, |acc, kw| acc + keyword_adjustment(*kw))
}

/// Clamp to the valid score range. Applied once, as the last step.
pub fn clamp_score(score: i32) -> i32 {
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// Full rule pipeline: base score, news adjustment, final clamp.
pub fn score(features: &FeatureVector, signal: &NewsSignal) -> i32 {
    clamp_score(apply_news_rules(base_score(features), signal))
}
