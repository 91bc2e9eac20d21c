//! Reference catalog endpoints.

use axum::Json;
use axum::extract::State;
use rankwise_core::{CatalogOption, Entry, EntryForm};
use serde::Serialize;

use crate::cache::get_or_compute;
use crate::error::ApiError;
use crate::query;
use crate::state::AppState;

async fn cached_years(state: &AppState) -> Result<Vec<CatalogOption<u16>>, ApiError> {
    get_or_compute(&state.cache, "unique_years", || async {
        Ok(query::fetch_years(&state.clickhouse).await?)
    })
    .await
}

async fn cached_combinations(state: &AppState) -> Result<Vec<CatalogOption<String>>, ApiError> {
    get_or_compute(&state.cache, "unique_combinations", || async {
        Ok(query::fetch_combinations(&state.clickhouse).await?)
    })
    .await
}

/// `GET /api/v1/years`
///
/// Available years, most recent first. Cached for the catalog TTL.
pub async fn years(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogOption<u16>>>, ApiError> {
    Ok(Json(cached_years(&state).await?))
}

/// `GET /api/v1/combinations`
///
/// Available combinations in ascending order. Cached for the catalog TTL.
pub async fn combinations(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogOption<String>>>, ApiError> {
    Ok(Json(cached_combinations(&state).await?))
}

/// Initial form state.
#[derive(Debug, Clone, Serialize)]
pub struct FormResponse {
    pub entries: Vec<Entry>,
    pub max_entries: usize,
    pub can_add: bool,
    pub can_remove: bool,
    pub years: Vec<CatalogOption<u16>>,
    pub combinations: Vec<CatalogOption<String>>,
}

impl FormResponse {
    fn build(
        years: Vec<CatalogOption<u16>>,
        combinations: Vec<CatalogOption<String>>,
    ) -> Result<Self, ApiError> {
        let form = EntryForm::new(years.clone(), combinations.clone())?;
        Ok(Self {
            max_entries: form.max_entries(),
            can_add: form.can_add(),
            can_remove: form.can_remove(),
            entries: form.into_entries(),
            years,
            combinations,
        })
    }
}

/// `GET /api/v1/form`
///
/// Returns the starting form: one entry for the most recent year and the
/// first combination, plus both catalogs.
pub async fn form(State(state): State<AppState>) -> Result<Json<FormResponse>, ApiError> {
    let (years, combinations) =
        tokio::try_join!(cached_years(&state), cached_combinations(&state))?;

    Ok(Json(FormResponse::build(years, combinations)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_response_defaults() {
        let years = vec![CatalogOption::new(2024u16), CatalogOption::new(2023u16)];
        let combinations = vec![CatalogOption::new("A00".to_string())];

        let response = FormResponse::build(years, combinations).unwrap();
        assert_eq!(response.entries, vec![Entry::new(2024, "A00", None)]);
        assert_eq!(response.max_entries, 2);
        assert!(response.can_add);
        assert!(!response.can_remove);
    }

    #[test]
    fn test_form_response_empty_catalog() {
        let err = FormResponse::build(vec![], vec![CatalogOption::new("A00".to_string())])
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
