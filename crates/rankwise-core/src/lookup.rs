//! The data source that supplies bracketing records.

use std::fmt::Display;
use std::future::Future;

use crate::bracket::BracketRecord;

/// Source of the records closest to a target score.
///
/// Implementations return the nearest record at or below `score` and the
/// nearest record above it for the given year and combination, so at most
/// two records. Errors are reported to the caller, which treats them as
/// "no data".
pub trait LookupProvider: Sync {
    type Error: Display + Send;

    fn closest_scores(
        &self,
        year: u16,
        combination: &str,
        score: f64,
    ) -> impl Future<Output = Result<Vec<BracketRecord>, Self::Error>> + Send;
}
