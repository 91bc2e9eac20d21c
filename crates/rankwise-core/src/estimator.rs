//! Ranking estimation by linear interpolation.
//!
//! Scores live on a 0-10 scale while the source data tracks ranking per 0.1
//! point, so the ranking slope between two records is divided by
//! [`SCORE_GRANULARITY`] times their score distance.

use crate::bracket::{BracketPair, BracketRecord};

/// Score steps per point in the source data.
pub const SCORE_GRANULARITY: f64 = 10.0;

/// Ranking change per tenth of a point between two records.
pub fn ranking_step_per_tenth(lower: &BracketRecord, higher: &BracketRecord) -> f64 {
    let score_step = higher.score - lower.score;
    (higher.ranking - lower.ranking) / (SCORE_GRANULARITY * score_step)
}

/// Estimate the ranking of `target_score` from two records.
///
/// Callers must guarantee `lower.score != higher.score`; use [`estimate`]
/// with a [`BracketPair`] to have that checked. The target does not need to
/// lie between the two scores.
pub fn estimate_between(target_score: f64, lower: &BracketRecord, higher: &BracketRecord) -> f64 {
    lower.ranking + (target_score - lower.score) * ranking_step_per_tenth(lower, higher)
}

/// Estimate the ranking of `target_score` within a bracketing pair.
pub fn estimate(target_score: f64, pair: &BracketPair) -> f64 {
    estimate_between(target_score, pair.lower(), pair.higher())
}
