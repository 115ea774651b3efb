//! # Athlete — Registered Athlete Records
//!
//! An `AthleteRecord` is the unit the session builds and the store persists.
//! Names are validated and normalised here so every record carries a name in
//! the same title-cased, single-spaced form, which is what lookups compare on.

use crate::category::WeightCategory;
use crate::plan::TrainingPlan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted name, in characters, before normalisation.
pub const MAX_NAME_LEN: usize = 50;
/// Names must be strictly longer than this.
pub const MIN_NAME_LEN: usize = 3;

/// Weekly private coaching is capped at this many hours.
pub const MAX_COACHING_HOURS: u32 = 5;
/// Monthly competition entries are capped at this many.
pub const MAX_COMPETITIONS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Invalid name. Please enter a valid name (no numbers, max 50 characters).")]
    InvalidCharacters,
    #[error("Name must be more than 3 characters. Please enter again.")]
    TooShort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteRecord {
    pub name: String,
    pub plan: TrainingPlan,
    pub current_weight: u32,
    pub coaching_hours_per_week: u32,
    pub competitions_entered: u32,
    pub weight_category: WeightCategory,
}

impl AthleteRecord {
    /// Case-insensitive name comparison used by the lookup menu.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.eq_ignore_ascii_case(query.trim())
    }
}

impl fmt::Display for AthleteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Athlete{{name='{}', Training Plan = {}, Current Weight = {}kg, \
             Private CoachingHours = {}hr, Competition(s) Entered = {}, Weight Category = {}}}",
            self.name,
            self.plan,
            self.current_weight,
            self.coaching_hours_per_week,
            self.competitions_entered,
            self.weight_category
        )
    }
}

/// Validate a raw name and return it in display form.
///
/// Accepts ASCII letters and whitespace only, at most [`MAX_NAME_LEN`]
/// characters as typed. The result collapses whitespace runs, title-cases each
/// word, and must be longer than [`MIN_NAME_LEN`] characters.
pub fn normalize_name(raw: &str) -> Result<String, NameError> {
    let valid_chars = raw
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace());
    if !valid_chars || raw.chars().count() > MAX_NAME_LEN {
        return Err(NameError::InvalidCharacters);
    }

    let formatted = raw
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    if formatted.len() <= MIN_NAME_LEN {
        return Err(NameError::TooShort);
    }
    Ok(formatted)
}

fn title_case(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
