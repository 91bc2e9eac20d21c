//! Score field input handling.
//!
//! A score field holds nothing, a finalized number, or the text the user is
//! still typing. Each keystroke passes the full field text through
//! [`normalize_score_input`]; [`ScoreField`] applies the outcome.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score.
pub const MAX_SCORE: f64 = 10.0;

/// `digits.digits` - a complete decimal.
static COMPLETE_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("complete decimal regex should compile"));

/// `digits(.digits?)?` - a number that may still be typed.
pub(crate) static PARTIAL_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?\d*$").expect("partial decimal regex should compile"));

/// Value stored in a score field.
///
/// Serialized untagged, so JSON numbers become [`ScoreValue::Number`] and
/// JSON strings become [`ScoreValue::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Number(f64),
    Text(String),
}

impl ScoreValue {
    /// Numeric value, if the field content can be read as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Outcome of normalizing one keystroke.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreInput {
    /// The field was cleared.
    Empty,
    /// Still being typed, or out of range; validated at submission.
    Partial(String),
    /// A complete decimal within range.
    Final(f64),
    /// Nothing usable was typed; the previous value stays.
    Rejected,
}

impl ScoreInput {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Partial(_) => "partial",
            Self::Final(_) => "final",
            Self::Rejected => "rejected",
        }
    }
}

/// Normalize raw score field text.
///
/// A comma decimal separator becomes a period. Non-digit characters are
/// dropped, and a period survives only if it is not the first character and
/// no period precedes it.
pub fn normalize_score_input(raw: &str) -> ScoreInput {
    let value = raw.replacen(',', ".", 1);

    if value.is_empty() {
        return ScoreInput::Empty;
    }

    let mut seen_period = false;
    let filtered: String = value
        .chars()
        .enumerate()
        .filter(|&(index, c)| {
            if c.is_ascii_digit() {
                return true;
            }
            if c == '.' {
                let keep = index > 0 && !seen_period;
                seen_period = true;
                return keep;
            }
            false
        })
        .map(|(_, c)| c)
        .collect();

    if COMPLETE_DECIMAL.is_match(&filtered) {
        if let Ok(n) = filtered.parse::<f64>() {
            if (MIN_SCORE..=MAX_SCORE).contains(&n) {
                return ScoreInput::Final(n);
            }
        }
    }

    if PARTIAL_DECIMAL.is_match(&filtered) {
        return ScoreInput::Partial(filtered);
    }

    ScoreInput::Rejected
}

/// Score field state: empty, partial text, or finalized number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreField {
    value: Option<ScoreValue>,
}

impl ScoreField {
    pub fn new(value: Option<ScoreValue>) -> Self {
        Self { value }
    }

    /// Apply the field's new raw text and return the normalization outcome.
    pub fn apply(&mut self, raw: &str) -> ScoreInput {
        let input = normalize_score_input(raw);
        match &input {
            ScoreInput::Empty => self.value = None,
            ScoreInput::Partial(s) => self.value = Some(ScoreValue::Text(s.clone())),
            ScoreInput::Final(n) => self.value = Some(ScoreValue::Number(*n)),
            ScoreInput::Rejected => {}
        }
        input
    }

    pub fn value(&self) -> Option<&ScoreValue> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<ScoreValue> {
        self.value
    }

    /// Text shown in the input box.
    pub fn display(&self) -> String {
        self.value.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}
