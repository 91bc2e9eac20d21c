//! Entry form model.
//!
//! The form always holds at least one entry and never more entries than
//! there are years to choose from. New entries default to the next unused
//! year position and the first combination.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::{Error, Result};

/// A selectable catalog value with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogOption<T> {
    pub label: String,
    pub value: T,
}

impl<T: Display> CatalogOption<T> {
    pub fn new(value: T) -> Self {
        Self {
            label: value.to_string(),
            value,
        }
    }
}

/// Editable list of entries backed by the year and combination catalogs.
#[derive(Debug, Clone)]
pub struct EntryForm {
    years: Vec<CatalogOption<u16>>,
    combinations: Vec<CatalogOption<String>>,
    entries: Vec<Entry>,
}

impl EntryForm {
    /// Create a form with one entry for the first year and combination.
    pub fn new(
        years: Vec<CatalogOption<u16>>,
        combinations: Vec<CatalogOption<String>>,
    ) -> Result<Self> {
        let first_year = years.first().ok_or(Error::EmptyCatalog("years"))?.value;
        let first_combination = combinations
            .first()
            .ok_or(Error::EmptyCatalog("combinations"))?
            .value
            .clone();

        Ok(Self {
            entries: vec![Entry::new(first_year, first_combination, None)],
            years,
            combinations,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// One entry per available year at most.
    pub fn max_entries(&self) -> usize {
        self.years.len()
    }

    pub fn can_add(&self) -> bool {
        self.entries.len() < self.max_entries()
    }

    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }

    /// Append an entry for the year at the next position.
    pub fn add_entry(&mut self) -> Result<&Entry> {
        let year = self
            .years
            .get(self.entries.len())
            .ok_or(Error::EntryLimit {
                max: self.max_entries(),
            })?
            .value;
        let combination = self.combinations[0].value.clone();

        self.entries.push(Entry::new(year, combination, None));
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove the entry at `index`; the last remaining entry stays.
    pub fn remove_entry(&mut self, index: usize) -> Result<Entry> {
        if !self.can_remove() || index >= self.entries.len() {
            return Err(Error::CannotRemove {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }
}
