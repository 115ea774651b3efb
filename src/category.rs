//! # Category — Competition Weight Classes
//!
//! The six fixed weight categories, ordered by increasing bound. Each is a
//! closed integer interval in kilograms and together they tile [0, 999] with
//! no gaps and no overlaps, so every weight in that range has exactly one home.
//!
//! Lookup by name is forgiving: case, whitespace, and hyphens are ignored, so
//! "light middleweight", "LightMiddleweight" and "Light-Middleweight" all
//! resolve to the same class.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A competition weight class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightCategory {
    Flyweight,
    Lightweight,
    LightMiddleweight,
    Middleweight,
    LightHeavyweight,
    Heavyweight,
}

/// Table order is the display order and the 1-based menu order.
const CATEGORIES: [WeightCategory; 6] = [
    WeightCategory::Flyweight,
    WeightCategory::Lightweight,
    WeightCategory::LightMiddleweight,
    WeightCategory::Middleweight,
    WeightCategory::LightHeavyweight,
    WeightCategory::Heavyweight,
];

/// No category matched the given name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weight category: {0:?}")]
pub struct UnknownCategory(pub String);

impl WeightCategory {
    pub fn name(self) -> &'static str {
        match self {
            WeightCategory::Flyweight => "Flyweight",
            WeightCategory::Lightweight => "Lightweight",
            WeightCategory::LightMiddleweight => "Light-Middleweight",
            WeightCategory::Middleweight => "Middleweight",
            WeightCategory::LightHeavyweight => "Light-Heavyweight",
            WeightCategory::Heavyweight => "Heavyweight",
        }
    }

    /// Inclusive lower bound in kg.
    pub fn lower_bound(self) -> u32 {
        self.bounds().0
    }

    /// Inclusive upper bound in kg.
    pub fn upper_bound(self) -> u32 {
        self.bounds().1
    }

    fn bounds(self) -> (u32, u32) {
        match self {
            WeightCategory::Flyweight => (0, 66),
            WeightCategory::Lightweight => (67, 73),
            WeightCategory::LightMiddleweight => (74, 81),
            WeightCategory::Middleweight => (82, 90),
            WeightCategory::LightHeavyweight => (91, 100),
            WeightCategory::Heavyweight => (101, 999),
        }
    }

    /// True when `weight` lies within the class. Both bounds are inclusive.
    pub fn contains(self, weight: u32) -> bool {
        let (lower, upper) = self.bounds();
        lower <= weight && weight <= upper
    }

    /// One-line summary with both limits, as shown in selection menus.
    pub fn bounds_line(self) -> String {
        format!(
            "{} - lower weight limit: {}kg - upper weight limit: {}kg",
            self.name(),
            self.lower_bound(),
            self.upper_bound()
        )
    }
}

impl fmt::Display for WeightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Table Lookups ───────────────────────────────────────────────

/// All categories in increasing-bound order.
pub fn categories_in_order() -> &'static [WeightCategory] {
    &CATEGORIES
}

/// Resolve a category from free-form text, ignoring case, whitespace and hyphens.
pub fn find_by_name(text: &str) -> Result<WeightCategory, UnknownCategory> {
    let wanted = normalize(text);
    CATEGORIES
        .iter()
        .copied()
        .find(|c| normalize(c.name()) == wanted)
        .ok_or_else(|| UnknownCategory(text.to_string()))
}

/// Category for a 1-based menu index.
pub fn by_index(one_based: usize) -> Option<WeightCategory> {
    one_based
        .checked_sub(1)
        .and_then(|i| CATEGORIES.get(i))
        .copied()
}

/// The unique category whose interval holds `weight`, if any.
pub fn category_for_weight(weight: u32) -> Option<WeightCategory> {
    CATEGORIES.iter().copied().find(|c| c.contains(weight))
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}
