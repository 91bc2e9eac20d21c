//! Error types for ranking estimation and entry handling.

use thiserror::Error;

use crate::entry::ValidationErrors;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating, resolving or editing entries.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more entries failed schema validation.
    #[error("validation failed: {}", .0.joined())]
    Validation(ValidationErrors),

    /// No entry in the batch was complete enough to look up.
    #[error("Please fill in at least one valid entry.")]
    EmptyBatch,

    /// Both bracketing records share the same score.
    #[error("degenerate bracket: both records have score {score}")]
    DegenerateBracket {
        /// The shared score.
        score: f64,
    },

    /// The bracketing records belong to different years or combinations.
    #[error("mismatched bracket: {lower} vs {higher}")]
    MismatchedBracket {
        /// `year/combination` of the first record.
        lower: String,
        /// `year/combination` of the second record.
        higher: String,
    },

    /// A reference catalog needed to build the form is empty.
    #[error("no {0} available")]
    EmptyCatalog(&'static str),

    /// Every available year already has an entry.
    #[error("entry limit reached: at most {max} entries")]
    EntryLimit {
        /// Maximum number of entries (one per available year).
        max: usize,
    },

    /// The entry cannot be removed.
    #[error("cannot remove entry {index} from a form with {len} entries")]
    CannotRemove {
        /// Requested index.
        index: usize,
        /// Current number of entries.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FieldError;

    #[test]
    fn test_empty_batch_display() {
        let err = Error::EmptyBatch;
        assert_eq!(err.to_string(), "Please fill in at least one valid entry.");
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let errors = ValidationErrors::from(vec![
            FieldError::new("entries.0.year", "Year is required"),
            FieldError::new("entries.1.score", "Score must be at most 10"),
        ]);
        let msg = Error::Validation(errors).to_string();
        assert!(msg.starts_with("validation failed"));
        assert!(msg.contains("Year is required\nScore must be at most 10"));
    }

    #[test]
    fn test_degenerate_bracket_display() {
        let err = Error::DegenerateBracket { score: 20.5 };
        assert!(err.to_string().contains("20.5"));
    }

    #[test]
    fn test_entry_limit_display() {
        let err = Error::EntryLimit { max: 3 };
        assert_eq!(err.to_string(), "entry limit reached: at most 3 entries");
    }
}
