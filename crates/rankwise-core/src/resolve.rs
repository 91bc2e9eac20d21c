//! Batch resolution of submitted entries into ranking estimates.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::bracket::BracketPair;
use crate::entry::{CompleteEntry, Entry, validate_entries};
use crate::error::{Error, Result};
use crate::estimator::estimate;
use crate::lookup::LookupProvider;

/// Ranking estimate for one resolved entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileResult {
    /// Position of the originating entry in the batch.
    pub index: usize,
    pub year: u16,
    pub combination: String,
    pub score: f64,
    /// Estimated ranking position.
    pub percentage: f64,
}

/// Results of one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Estimates in submission order.
    pub results: Vec<PercentileResult>,
    /// Complete entries that produced no estimate.
    pub unresolved: usize,
}

impl BatchOutcome {
    /// Results grouped by year, years ascending.
    pub fn by_year(&self) -> BTreeMap<u16, Vec<&PercentileResult>> {
        let mut grouped: BTreeMap<u16, Vec<&PercentileResult>> = BTreeMap::new();
        for result in &self.results {
            grouped.entry(result.year).or_default().push(result);
        }
        grouped
    }
}

/// Validate `entries`, look up every complete one concurrently, and
/// estimate a ranking for each entry that yields a bracketing pair.
///
/// Entries without a score are skipped. Lookups that fail or do not return
/// exactly two usable records drop their entry without an error.
pub async fn resolve_batch<P: LookupProvider>(
    provider: &P,
    entries: &[Entry],
) -> Result<BatchOutcome> {
    validate_entries(entries).map_err(Error::Validation)?;

    let complete: Vec<CompleteEntry> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| entry.complete(index))
        .collect();

    if complete.is_empty() {
        return Err(Error::EmptyBatch);
    }

    tracing::debug!(
        submitted = entries.len(),
        lookups = complete.len(),
        "resolving entry batch"
    );

    let lookups: Vec<_> = complete
        .iter()
        .map(|entry| async move {
            match provider
                .closest_scores(entry.year, &entry.combination, entry.score)
                .await
            {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(
                        year = entry.year,
                        combination = %entry.combination,
                        error = %e,
                        "closest score lookup failed"
                    );
                    Vec::new()
                }
            }
        })
        .collect();

    let lookups = futures::future::join_all(lookups).await;

    let mut outcome = BatchOutcome::default();
    for (entry, records) in complete.into_iter().zip(lookups) {
        let found = records.len();
        match BracketPair::from_records(records) {
            Ok(Some(pair)) => outcome.results.push(PercentileResult {
                index: entry.index,
                percentage: estimate(entry.score, &pair),
                year: entry.year,
                combination: entry.combination,
                score: entry.score,
            }),
            Ok(None) => {
                tracing::debug!(
                    index = entry.index,
                    year = entry.year,
                    records = found,
                    "no bracketing pair for entry"
                );
                outcome.unresolved += 1;
            }
            Err(e) => {
                tracing::debug!(index = entry.index, error = %e, "unusable bracketing pair");
                outcome.unresolved += 1;
            }
        }
    }

    Ok(outcome)
}
