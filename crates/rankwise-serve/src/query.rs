//! ClickHouse query layer for score records and reference catalogs.
//!
//! Scores live in the `exam_scores` table, one row per known
//! (year, combination, score) threshold with its cumulative ranking. The
//! `unique_years` and `unique_combinations` views list the catalog values.

use clickhouse::{Client, Row};
use rankwise_core::{BracketRecord, CatalogOption, LookupProvider};
use serde::Deserialize;

/// A row from the `exam_scores` table.
#[derive(Debug, Clone, Deserialize, Row)]
pub struct ScoreRow {
    pub year: u16,
    pub combination: String,
    pub score: f64,
    /// Cumulative ranking within the combination at this score.
    pub ranking_in_combination: u64,
}

impl From<ScoreRow> for BracketRecord {
    fn from(row: ScoreRow) -> Self {
        BracketRecord {
            year: row.year,
            combination: row.combination,
            score: row.score,
            ranking: row.ranking_in_combination as f64,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Row)]
struct YearRow {
    year: u16,
}

#[derive(Debug, Clone, Deserialize, Row)]
struct CombinationRow {
    combination: String,
}

/// Fetch the records bracketing `score`: the closest at or below it and the
/// closest above it, ordered by score ascending.
pub async fn fetch_closest_scores(
    client: &Client,
    year: u16,
    combination: &str,
    score: f64,
) -> Result<Vec<ScoreRow>, clickhouse::error::Error> {
    client
        .query(
            "SELECT year, combination, score, ranking_in_combination
            FROM (
                (SELECT year, combination, score, ranking_in_combination
                 FROM exam_scores
                 WHERE year = ? AND combination = ? AND score <= ?
                 ORDER BY score DESC
                 LIMIT 1)
                UNION ALL
                (SELECT year, combination, score, ranking_in_combination
                 FROM exam_scores
                 WHERE year = ? AND combination = ? AND score > ?
                 ORDER BY score ASC
                 LIMIT 1)
            )
            ORDER BY score ASC",
        )
        .bind(year)
        .bind(combination)
        .bind(score)
        .bind(year)
        .bind(combination)
        .bind(score)
        .fetch_all::<ScoreRow>()
        .await
}

/// Distinct years, most recent first.
pub async fn fetch_years(
    client: &Client,
) -> Result<Vec<CatalogOption<u16>>, clickhouse::error::Error> {
    let rows: Vec<YearRow> = client
        .query("SELECT year FROM unique_years ORDER BY year DESC")
        .fetch_all()
        .await?;

    Ok(rows.into_iter().map(|r| CatalogOption::new(r.year)).collect())
}

/// Distinct combination identifiers, ascending.
pub async fn fetch_combinations(
    client: &Client,
) -> Result<Vec<CatalogOption<String>>, clickhouse::error::Error> {
    let rows: Vec<CombinationRow> = client
        .query("SELECT combination FROM unique_combinations ORDER BY combination ASC")
        .fetch_all()
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| CatalogOption::new(r.combination))
        .collect())
}

/// [`LookupProvider`] backed by the `exam_scores` table.
#[derive(Clone)]
pub struct ClickHouseLookup {
    client: Client,
}

impl ClickHouseLookup {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl LookupProvider for ClickHouseLookup {
    type Error = clickhouse::error::Error;

    async fn closest_scores(
        &self,
        year: u16,
        combination: &str,
        score: f64,
    ) -> Result<Vec<BracketRecord>, Self::Error> {
        let rows = fetch_closest_scores(&self.client, year, combination, score).await?;
        Ok(rows.into_iter().map(BracketRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_row_into_record() {
        let row = ScoreRow {
            year: 2024,
            combination: "A00".to_string(),
            score: 27.5,
            ranking_in_combination: 1_234,
        };

        let record = BracketRecord::from(row);
        assert_eq!(record, BracketRecord::new(2024, "A00", 27.5, 1234.0));
    }
}
