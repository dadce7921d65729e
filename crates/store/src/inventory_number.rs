//! Inventory number generation: `PREFIX-CODE-YEAR-NNNNNN`.
//!
//! The sequence is shared across all category codes and years and is never
//! reset when the calendar year changes.

use chrono::{Datelike, Local};

use museum_core::SequenceCounter;

pub const DEFAULT_PREFIX: &str = "MUS";
pub const DEFAULT_FALLBACK_CODE: &str = "GEN";

/// Components of a parsed inventory number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryNumberParts {
    pub prefix: String,
    pub code: String,
    pub year: i32,
    pub sequence: u64,
}

#[derive(Debug)]
pub struct InventoryNumberGenerator {
    prefix: String,
    fallback_code: String,
    counter: SequenceCounter,
}

impl InventoryNumberGenerator {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX, DEFAULT_FALLBACK_CODE)
    }

    pub fn with_prefix(prefix: impl Into<String>, fallback_code: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            fallback_code: fallback_code.into(),
            counter: SequenceCounter::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number for `category_code` stamped with the current local year. A
    /// missing or blank code falls back to the configured fallback code.
    pub fn generate(&self, category_code: Option<&str>) -> String {
        self.generate_for_year(category_code, Local::now().year())
    }

    pub fn generate_for_year(&self, category_code: Option<&str>, year: i32) -> String {
        let code = category_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.fallback_code);
        let sequence = self.counter.next();
        format!("{}-{}-{}-{:06}", self.prefix, code, year, sequence)
    }

    /// Sequence number the next call will use.
    pub fn current_counter(&self) -> u64 {
        self.counter.current()
    }

    pub fn set_counter(&self, value: u64) {
        self.counter.set(value);
    }

    pub fn reset(&self) {
        self.counter.reset();
    }

    /// Advances the counter past the highest sequence among `numbers` that
    /// carry this generator's prefix. Never lowers the counter.
    pub fn restore_from<'a>(&self, numbers: impl IntoIterator<Item = &'a str>) {
        let highest = numbers
            .into_iter()
            .filter_map(Self::parse)
            .filter(|parts| parts.prefix == self.prefix)
            .map(|parts| parts.sequence)
            .max();

        if let Some(highest) = highest {
            self.counter.advance_past(highest);
            tracing::info!(
                next = self.counter.current(),
                "restored inventory number counter"
            );
        }
    }

    /// Splits a number into its components. The code may itself contain
    /// dashes; prefix, year and sequence may not.
    pub fn parse(number: &str) -> Option<InventoryNumberParts> {
        let (rest, sequence) = number.trim().rsplit_once('-')?;
        let (rest, year) = rest.rsplit_once('-')?;
        let (prefix, code) = rest.split_once('-')?;

        if prefix.is_empty() || code.is_empty() {
            return None;
        }
        if !sequence.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        Some(InventoryNumberParts {
            prefix: prefix.to_string(),
            code: code.to_string(),
            year: year.parse().ok()?,
            sequence: sequence.parse().ok()?,
        })
    }
}

impl Default for InventoryNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
