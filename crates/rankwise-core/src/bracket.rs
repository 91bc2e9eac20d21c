//! Bracketing records returned by the lookup provider.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A known (score, ranking) pair for one year and combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketRecord {
    pub year: u16,
    pub combination: String,
    pub score: f64,
    /// Cumulative ranking count at this score threshold.
    pub ranking: f64,
}

impl BracketRecord {
    pub fn new(year: u16, combination: impl Into<String>, score: f64, ranking: f64) -> Self {
        Self {
            year,
            combination: combination.into(),
            score,
            ranking,
        }
    }

    fn group_label(&self) -> String {
        format!("{}/{}", self.year, self.combination)
    }
}

/// Two records of the same year and combination, lower score first.
///
/// The scores are guaranteed to differ, so interpolating between them never
/// divides by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketPair {
    lower: BracketRecord,
    higher: BracketRecord,
}

impl BracketPair {
    /// Build a pair from two records in any order.
    pub fn new(a: BracketRecord, b: BracketRecord) -> Result<Self> {
        if a.year != b.year || a.combination != b.combination {
            return Err(Error::MismatchedBracket {
                lower: a.group_label(),
                higher: b.group_label(),
            });
        }

        let (lower, higher) = match a.score.partial_cmp(&b.score) {
            Some(std::cmp::Ordering::Less) => (a, b),
            Some(std::cmp::Ordering::Greater) => (b, a),
            _ => return Err(Error::DegenerateBracket { score: a.score }),
        };

        Ok(Self { lower, higher })
    }

    /// Build a pair from a lookup result.
    ///
    /// Returns `Ok(None)` unless exactly two records were returned.
    pub fn from_records(records: Vec<BracketRecord>) -> Result<Option<Self>> {
        let Ok([a, b]) = <[BracketRecord; 2]>::try_from(records) else {
            return Ok(None);
        };
        Self::new(a, b).map(Some)
    }

    pub fn lower(&self) -> &BracketRecord {
        &self.lower
    }

    pub fn higher(&self) -> &BracketRecord {
        &self.higher
    }
}
