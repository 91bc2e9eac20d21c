//! Ranking estimation endpoint.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use rankwise_core::{BatchOutcome, Entry, PercentileResult, resolve_batch};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::query::ClickHouseLookup;
use crate::state::AppState;

/// Request body for a batch estimate.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRequest {
    pub entries: Vec<Entry>,
}

/// Estimates for every resolved entry, flat and grouped by year.
#[derive(Debug, Clone, Serialize)]
pub struct EstimateResponse {
    pub results: Vec<PercentileResult>,
    pub by_year: BTreeMap<u16, Vec<PercentileResult>>,
    /// Complete entries without a bracketing pair.
    pub unresolved: usize,
}

impl From<BatchOutcome> for EstimateResponse {
    fn from(outcome: BatchOutcome) -> Self {
        let by_year = outcome
            .by_year()
            .into_iter()
            .map(|(year, results)| (year, results.into_iter().cloned().collect()))
            .collect();

        Self {
            by_year,
            unresolved: outcome.unresolved,
            results: outcome.results,
        }
    }
}

/// `POST /api/v1/estimate`
///
/// Validates the submitted entries and estimates a ranking for each complete
/// one. Lookups run concurrently; entries whose lookup fails or does not
/// bracket the score are left out of the results.
pub async fn estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let lookup = ClickHouseLookup::new(state.clickhouse.clone());
    let outcome = resolve_batch(&lookup, &request.entries).await?;

    tracing::info!(
        submitted = request.entries.len(),
        resolved = outcome.results.len(),
        unresolved = outcome.unresolved,
        "estimate batch complete"
    );

    Ok(Json(EstimateResponse::from(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankwise_core::ScoreValue;

    fn result(index: usize, year: u16, combination: &str, percentage: f64) -> PercentileResult {
        PercentileResult {
            index,
            year,
            combination: combination.to_string(),
            score: 8.0,
            percentage,
        }
    }

    #[test]
    fn test_response_groups_by_year() {
        let outcome = BatchOutcome {
            results: vec![
                result(0, 2024, "A00", 990.0),
                result(1, 2023, "A00", 1200.0),
                result(2, 2024, "D01", 450.0),
            ],
            unresolved: 1,
        };

        let response = EstimateResponse::from(outcome);
        assert_eq!(response.results.len(), 3);
        assert_eq!(response.unresolved, 1);
        assert_eq!(response.by_year[&2024].len(), 2);
        assert_eq!(response.by_year[&2024][1].combination, "D01");
        assert_eq!(response.by_year[&2023][0].index, 1);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["by_year"]["2024"].is_array());
    }

    #[test]
    fn test_request_deserializes() {
        let request: EstimateRequest = serde_json::from_str(
            r#"{"entries": [{"year": 2024, "combination": "A00", "score": "8.5"}]}"#,
        )
        .unwrap();
        assert_eq!(request.entries.len(), 1);
        assert_eq!(
            request.entries[0].score,
            Some(ScoreValue::Text("8.5".to_string()))
        );
    }
}
