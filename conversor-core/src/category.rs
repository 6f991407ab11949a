//! Measurement categories

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::ConversionError;

/// One of the four supported measurement categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Temperature,
    Currency,
}

impl Category {
    /// All categories in menu order
    pub const ALL: [Category; 4] = [
        Category::Length,
        Category::Mass,
        Category::Temperature,
        Category::Currency,
    ];

    /// Lowercase identifier (e.g., "length")
    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Mass => "mass",
            Category::Temperature => "temperature",
            Category::Currency => "currency",
        }
    }

    /// Human-readable title for selection menus
    pub fn title(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Mass => "Weights & Masses",
            Category::Temperature => "Temperature",
            Category::Currency => "Currency",
        }
    }

    /// Default number of decimals used when displaying a result
    pub fn precision(&self) -> usize {
        match self {
            Category::Length => 4,
            Category::Mass => 3,
            Category::Temperature => 2,
            Category::Currency => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ");
        match key.as_str() {
            "length" | "lengths" | "longitude" | "longitudes" => Ok(Category::Length),
            "mass" | "masses" | "weight" | "weights"
            | "weights and masses" | "weights & masses" => Ok(Category::Mass),
            "temperature" | "temperatures" => Ok(Category::Temperature),
            "currency" | "currencies" => Ok(Category::Currency),
            _ => Err(ConversionError::UnknownCategory { input: s.to_string() }),
        }
    }
}
