use serde::{Deserialize, Serialize};

use museum_core::{DomainError, DomainResult, ValueObject};

/// A display case inside an exhibition hall.
///
/// Invariants: `capacity > 0` and `0 <= current_count <= capacity`. Both are
/// checked on construction and on deserialization. A location never changes
/// in place; a new occupancy means a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLocation")]
pub struct Location {
    hall_name: String,
    display_number: String,
    capacity: u32,
    current_count: u32,
}

impl ValueObject for Location {}

impl Location {
    pub fn new(
        hall_name: impl Into<String>,
        display_number: impl Into<String>,
        capacity: u32,
    ) -> DomainResult<Self> {
        let hall_name = hall_name.into();
        let display_number = display_number.into();

        if hall_name.trim().is_empty() {
            return Err(DomainError::invalid_data("hall name cannot be empty"));
        }
        if display_number.trim().is_empty() {
            return Err(DomainError::invalid_data("display number cannot be empty"));
        }
        if capacity == 0 {
            return Err(DomainError::invalid_data("capacity must be greater than zero"));
        }

        Ok(Self {
            hall_name,
            display_number,
            capacity,
            current_count: 0,
        })
    }

    pub fn hall_name(&self) -> &str {
        &self.hall_name
    }

    pub fn display_number(&self) -> &str {
        &self.display_number
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn current_count(&self) -> u32 {
        self.current_count
    }

    /// The same display case holding `count` exhibits.
    pub fn with_current_count(self, count: u32) -> DomainResult<Self> {
        if count > self.capacity {
            return Err(DomainError::invalid_data(format!(
                "current count {count} exceeds capacity {}",
                self.capacity
            )));
        }
        Ok(Self {
            current_count: count,
            ..self
        })
    }

    pub fn has_space(&self) -> bool {
        self.current_count < self.capacity
    }

    /// Same hall and display case, regardless of occupancy.
    pub fn same_place(&self, other: &Location) -> bool {
        self.hall_name == other.hall_name && self.display_number == other.display_number
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} ({}, {}/{})",
            self.hall_name, self.display_number, self.current_count, self.capacity
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    hall_name: String,
    display_number: String,
    capacity: u32,
    #[serde(default)]
    current_count: u32,
}

impl TryFrom<RawLocation> for Location {
    type Error = DomainError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Location::new(raw.hall_name, raw.display_number, raw.capacity)?
            .with_current_count(raw.current_count)
    }
}
