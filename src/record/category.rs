//! Fixed vocabulary of place associations.
//!
//! The form page, the form controller and the server all reference this
//! enum, so a detail field is addressed by its category rather than by a
//! concatenated field name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A place a saint is associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlaceCategory {
    /// Place of birth.
    Birth,
    /// Place of spiritual practice.
    Sadhana,
    /// Place of realization.
    Enlightenment,
    /// Place where the saint taught.
    Teaching,
    /// Place of passing / final resting place.
    Samadhi,
}

impl PlaceCategory {
    /// Every category, in the order the form renders them.
    pub const ALL: [PlaceCategory; 5] = [
        PlaceCategory::Birth,
        PlaceCategory::Sadhana,
        PlaceCategory::Enlightenment,
        PlaceCategory::Teaching,
        PlaceCategory::Samadhi,
    ];

    /// The label used on the wire and on the checkbox.
    pub fn label(self) -> &'static str {
        match self {
            PlaceCategory::Birth => "Birth",
            PlaceCategory::Sadhana => "Sadhana",
            PlaceCategory::Enlightenment => "Enlightenment",
            PlaceCategory::Teaching => "Teaching",
            PlaceCategory::Samadhi => "Samadhi",
        }
    }

    /// DOM id of the detail input tied to this category.
    pub fn input_id(self) -> String {
        format!("place_{}", self.label())
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a label is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown place category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for PlaceCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlaceCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
