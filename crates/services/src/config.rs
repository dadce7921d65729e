//! Runtime configuration.
//!
//! Loaded from environment variables, with defaults for everything.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::env;

use museum_store::{DEFAULT_FALLBACK_CODE, DEFAULT_PREFIX};

pub const PREFIX_VAR: &str = "MUSEUM_INVENTORY_PREFIX";
pub const FALLBACK_CODE_VAR: &str = "MUSEUM_FALLBACK_CATEGORY_CODE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuseumConfig {
    /// Leading segment of every generated inventory number.
    pub inventory_prefix: String,
    /// Code used when an exhibit's category has no code.
    pub fallback_category_code: String,
}

impl Default for MuseumConfig {
    fn default() -> Self {
        Self {
            inventory_prefix: DEFAULT_PREFIX.to_string(),
            fallback_category_code: DEFAULT_FALLBACK_CODE.to_string(),
        }
    }
}

impl MuseumConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            inventory_prefix: lookup(PREFIX_VAR).unwrap_or(defaults.inventory_prefix),
            fallback_category_code: lookup(FALLBACK_CODE_VAR)
                .unwrap_or(defaults.fallback_category_code),
        };
        config.validate()?;
        Ok(config)
    }

    /// Both segments must survive the `PREFIX-CODE-YEAR-NNNNNN` layout intact.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            (PREFIX_VAR, &self.inventory_prefix),
            (FALLBACK_CODE_VAR, &self.fallback_category_code),
        ] {
            if value.trim().is_empty() {
                bail!("{name} cannot be blank");
            }
            if value.contains('-') || value.chars().any(char::is_whitespace) {
                bail!("{name} cannot contain dashes or whitespace (got '{value}')");
            }
        }
        Ok(())
    }
}
