//! Monthly cost model for a registered athlete.
//!
//! A month is billed as four weeks. The plan fee and coaching hours are
//! weekly; competitions are charged per entry. Everything is exact decimal
//! arithmetic and rounds to cents only when rendered.

use crate::plan::TrainingPlan;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

pub const WEEKS_PER_MONTH: u32 = 4;
pub const COMPETITION_FEE: Decimal = dec!(22.00);
pub const COACHING_HOURLY_RATE: Decimal = dec!(9.00);
/// Coaching hours beyond this per week are not billed.
pub const COACHING_HOURS_CAP: u32 = 5;

/// Monthly cost breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostEstimate {
    pub plan: TrainingPlan,
    pub competitions_entered: u32,
    pub coaching_hours_per_week: u32,
    pub plan_cost: Decimal,
    pub competitions_cost: Decimal,
    pub coaching_cost: Decimal,
    pub total: Decimal,
}

/// Estimate the month's cost for a plan, competition count and weekly coaching hours.
pub fn estimate(
    plan: TrainingPlan,
    competitions_entered: u32,
    coaching_hours_per_week: u32,
) -> CostEstimate {
    let weeks = Decimal::from(WEEKS_PER_MONTH);
    let plan_cost = plan.weekly_fee() * weeks;
    let competitions_cost = Decimal::from(competitions_entered) * COMPETITION_FEE;
    let billed_hours = coaching_hours_per_week.min(COACHING_HOURS_CAP);
    let coaching_cost = Decimal::from(billed_hours) * COACHING_HOURLY_RATE * weeks;

    CostEstimate {
        plan,
        competitions_entered,
        coaching_hours_per_week,
        plan_cost,
        competitions_cost,
        coaching_cost,
        total: plan_cost + competitions_cost + coaching_cost,
    }
}

/// Two-decimal currency rendering.
fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training Plan Cost:")?;
        writeln!(
            f,
            "{} ${} per week => {} weeks per month => Total ${}",
            self.plan,
            money(self.plan.weekly_fee()),
            WEEKS_PER_MONTH,
            money(self.plan_cost)
        )?;
        writeln!(f)?;
        writeln!(f, "Competitions Cost:")?;
        writeln!(
            f,
            "${} per Competition => {} entered this month => Total ${}",
            money(COMPETITION_FEE),
            self.competitions_entered,
            money(self.competitions_cost)
        )?;
        writeln!(f)?;
        writeln!(f, "Private Coaching Cost:")?;
        writeln!(
            f,
            "${} per hour => selected {} hr per week => {} weeks per month => Total ${}",
            money(COACHING_HOURLY_RATE),
            self.coaching_hours_per_week,
            WEEKS_PER_MONTH,
            money(self.coaching_cost)
        )?;
        writeln!(f)?;
        write!(f, "Total cost for this month ${}", money(self.total))
    }
}
