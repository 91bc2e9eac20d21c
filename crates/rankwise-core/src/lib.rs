//! Core types and estimation logic for Rankwise.
//!
//! This crate provides:
//! - Linear interpolation of a ranking position between two bracketing records
//! - The keystroke normalizer for score text fields
//! - Entry validation and the entry form model
//! - Concurrent batch resolution against a [`LookupProvider`]
//! - Shared error types
//!
//! Database access lives outside this crate; anything that can return the
//! records bracketing a score implements [`LookupProvider`].

mod bracket;
mod entry;
mod error;
mod estimator;
pub mod form;
mod lookup;
mod resolve;
pub mod score;

pub use bracket::{BracketPair, BracketRecord};
pub use entry::{CompleteEntry, Entry, FieldError, ValidationErrors, validate_entries};
pub use error::{Error, Result};
pub use estimator::{SCORE_GRANULARITY, estimate, estimate_between, ranking_step_per_tenth};
pub use form::{CatalogOption, EntryForm};
pub use lookup::LookupProvider;
pub use resolve::{BatchOutcome, PercentileResult, resolve_batch};
pub use score::{MAX_SCORE, MIN_SCORE, ScoreField, ScoreInput, ScoreValue, normalize_score_input};
