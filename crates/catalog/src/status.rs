use serde::{Deserialize, Serialize};

/// Lifecycle state of a catalogued item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    OnDisplay,
    #[default]
    InStorage,
    OnRestoration,
    OnLoan,
}

impl ItemStatus {
    /// Fixed enumeration order used by every status histogram.
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::OnDisplay,
        ItemStatus::InStorage,
        ItemStatus::OnRestoration,
        ItemStatus::OnLoan,
    ];

    /// Human-readable label (reports, CSV).
    pub fn display_name(self) -> &'static str {
        match self {
            ItemStatus::OnDisplay => "On display",
            ItemStatus::InStorage => "In storage",
            ItemStatus::OnRestoration => "On restoration",
            ItemStatus::OnLoan => "On loan",
        }
    }

    /// Stable machine code, identical to the serialized form.
    pub fn code(self) -> &'static str {
        match self {
            ItemStatus::OnDisplay => "ON_DISPLAY",
            ItemStatus::InStorage => "IN_STORAGE",
            ItemStatus::OnRestoration => "ON_RESTORATION",
            ItemStatus::OnLoan => "ON_LOAN",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}
