//! Submitted entries and their validation.

use serde::{Deserialize, Serialize};

use crate::score::{MAX_SCORE, MIN_SCORE, PARTIAL_DECIMAL, ScoreValue};

/// One (year, combination, score) row as submitted by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub combination: Option<String>,
    #[serde(default)]
    pub score: Option<ScoreValue>,
}

impl Entry {
    pub fn new(year: u16, combination: impl Into<String>, score: Option<ScoreValue>) -> Self {
        Self {
            year: Some(year),
            combination: Some(combination.into()),
            score,
        }
    }

    /// Convert into a [`CompleteEntry`] if every field is filled in.
    ///
    /// A year of 0 or an empty combination counts as missing.
    pub fn complete(&self, index: usize) -> Option<CompleteEntry> {
        let year = self.year.filter(|y| *y != 0)?;
        let combination = self.combination.as_deref().filter(|c| !c.is_empty())?;
        let score = self.score.as_ref()?.as_number()?;

        Some(CompleteEntry {
            index,
            year,
            combination: combination.to_string(),
            score,
        })
    }
}

/// An entry with every field present, ready for lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteEntry {
    /// Position of the entry in the submitted batch.
    pub index: usize,
    pub year: u16,
    pub combination: String,
    pub score: f64,
}

/// A validation message attached to a form field path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Field path such as `entries.0.score`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered collection of field errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Message strings in the order the errors were found.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.message.as_str()).collect()
    }

    /// All messages joined for display.
    pub fn joined(&self) -> String {
        self.messages().join("\n")
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

fn check_range(field: &str, n: f64, errors: &mut ValidationErrors) {
    if !n.is_finite() {
        errors.push(FieldError::new(field, "Score must be a number"));
    } else if n < MIN_SCORE {
        errors.push(FieldError::new(field, "Score must be at least 0"));
    } else if n > MAX_SCORE {
        errors.push(FieldError::new(field, "Score must be at most 10"));
    }
}

/// Check a batch of entries at submission time.
///
/// Year and combination are required. A score may be absent (the entry is
/// then skipped), but when present it must be numeric, or numeric text, in
/// the 0-10 range.
pub fn validate_entries(entries: &[Entry]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if entries.is_empty() {
        errors.push(FieldError::new("entries", "At least one entry is required"));
        return Err(errors);
    }

    for (index, entry) in entries.iter().enumerate() {
        if entry.year.is_none() {
            errors.push(FieldError::new(
                format!("entries.{index}.year"),
                "Year is required",
            ));
        }

        if entry.combination.is_none() {
            errors.push(FieldError::new(
                format!("entries.{index}.combination"),
                "Combination is required",
            ));
        }

        let field = format!("entries.{index}.score");
        match &entry.score {
            None => {}
            Some(ScoreValue::Number(n)) => check_range(&field, *n, &mut errors),
            Some(ScoreValue::Text(s)) => {
                if !PARTIAL_DECIMAL.is_match(s) {
                    errors.push(FieldError::new(&field, "Invalid score format"));
                } else if let Ok(n) = s.parse::<f64>() {
                    check_range(&field, n, &mut errors);
                } else {
                    errors.push(FieldError::new(&field, "Invalid score format"));
                }
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
