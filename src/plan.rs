//! Training plan tiers and their weekly fees.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPlan {
    Beginner,
    Intermediate,
    Elite,
}

const PLANS: [TrainingPlan; 3] = [
    TrainingPlan::Beginner,
    TrainingPlan::Intermediate,
    TrainingPlan::Elite,
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown training plan: {0:?}")]
pub struct UnknownPlan(pub String);

impl TrainingPlan {
    pub fn all() -> &'static [TrainingPlan] {
        &PLANS
    }

    pub fn name(self) -> &'static str {
        match self {
            TrainingPlan::Beginner => "Beginner",
            TrainingPlan::Intermediate => "Intermediate",
            TrainingPlan::Elite => "Elite",
        }
    }

    pub fn weekly_fee(self) -> Decimal {
        match self {
            TrainingPlan::Beginner => dec!(25.00),
            TrainingPlan::Intermediate => dec!(30.00),
            TrainingPlan::Elite => dec!(35.00),
        }
    }

    /// Beginners train only; competition entry starts at Intermediate.
    pub fn allows_competitions(self) -> bool {
        self != TrainingPlan::Beginner
    }

    /// Case-insensitive match on the plan name (surrounding whitespace ignored).
    pub fn from_name(text: &str) -> Result<Self, UnknownPlan> {
        let wanted = text.trim();
        PLANS
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPlan(text.to_string()))
    }
}

impl fmt::Display for TrainingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fees_match_tiers() {
        assert_eq!(TrainingPlan::Beginner.weekly_fee(), dec!(25));
        assert_eq!(TrainingPlan::Intermediate.weekly_fee(), dec!(30));
        assert_eq!(TrainingPlan::Elite.weekly_fee(), dec!(35));
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(TrainingPlan::from_name("elite"), Ok(TrainingPlan::Elite));
        assert_eq!(TrainingPlan::from_name(" INTERMEDIATE "), Ok(TrainingPlan::Intermediate));
        assert!(TrainingPlan::from_name("pro").is_err());
    }

    #[test]
    fn only_beginner_is_barred_from_competitions() {
        assert!(!TrainingPlan::Beginner.allows_competitions());
        assert!(TrainingPlan::Intermediate.allows_competitions());
        assert!(TrainingPlan::Elite.allows_competitions());
    }
}
