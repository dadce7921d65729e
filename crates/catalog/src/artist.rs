use serde::{Deserialize, Serialize};

use museum_core::{ArtistId, DomainError, DomainResult, Entity};

/// Author of exhibits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(default)]
    id: Option<ArtistId>,
    pub full_name: String,
    pub birth_year: i32,
    #[serde(default)]
    pub death_year: Option<i32>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub biography: String,
}

impl Artist {
    pub const MIN_YEAR: i32 = 1000;
    pub const MAX_YEAR: i32 = 2025;

    pub fn new(full_name: impl Into<String>, birth_year: i32, country: impl Into<String>) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            birth_year,
            death_year: None,
            country: country.into(),
            biography: String::new(),
        }
    }

    pub fn with_death_year(mut self, year: i32) -> Self {
        self.death_year = Some(year);
        self
    }

    pub fn with_biography(mut self, biography: impl Into<String>) -> Self {
        self.biography = biography.into();
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(DomainError::invalid_data("artist name is required"));
        }
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&self.birth_year) {
            return Err(DomainError::invalid_data(format!(
                "birth year must be between {} and {}",
                Self::MIN_YEAR,
                Self::MAX_YEAR
            )));
        }
        if let Some(death) = self.death_year {
            if death < self.birth_year || death > Self::MAX_YEAR {
                return Err(DomainError::invalid_data(format!(
                    "death year must be between birth year and {}",
                    Self::MAX_YEAR
                )));
            }
        }
        Ok(())
    }

    /// Lifespan overlaps `[start, end]`; living artists extend to the present.
    pub fn lived_during(&self, start: i32, end: i32) -> bool {
        self.birth_year <= end && self.death_year.is_none_or(|death| death >= start)
    }
}

impl Entity for Artist {
    type Id = ArtistId;

    fn id(&self) -> Option<ArtistId> {
        self.id
    }

    fn assign_id(&mut self, id: ArtistId) {
        self.id = Some(id);
    }
}

impl core::fmt::Display for Artist {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({}, {}", self.full_name, self.country, self.birth_year)?;
        if let Some(death) = self.death_year {
            write!(f, "-{death}")?;
        }
        f.write_str(")")
    }
}
