//! # Reconcile — Weight vs. Weight-Category Negotiation
//!
//! After registration collects a weight and a chosen category, the two may not
//! agree. `reconcile` walks the user through fixing that: on a mismatch it asks
//! whether to change anything, then lets them replace either the weight or the
//! category and checks the new pair again, for as many rounds as they like.
//!
//! ## States
//!
//! ```text
//!            ┌───────────── fits ─────────────> Fit (return weight)
//!  check ────┤
//!            └─ mismatch ─> change? ── no ────> Declined (return weight)
//!                 ^            │
//!                 │           yes
//!                 │            ├─ 1: new weight   (category unchanged)
//!                 └────────────┴─ 2: new category (weight unchanged)
//! ```
//!
//! The `(weight, category)` pair lives in locals and every correction is
//! written straight through to the record, so the record always holds the
//! last values entered. A `Declined` exit deliberately leaves a mismatched
//! pair on the record; only `Fit` guarantees consistency.

use crate::athlete::AthleteRecord;
use crate::category::{self, WeightCategory};
use crate::prompt::{parse_yes_no, PromptResult, Prompter};
use std::io::{BufRead, Write};
use tracing::debug;

/// Largest weight accepted when correcting, in kg.
pub const MAX_CORRECTED_WEIGHT: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Weight lies within the category bounds.
    Fit,
    /// User stopped making changes while the pair still disagreed.
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub weight: u32,
    pub outcome: Outcome,
    /// Number of weight or category changes applied before the exit.
    pub corrections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Correction {
    Weight,
    Category,
}

/// Bring `record.current_weight` and `record.weight_category` into agreement,
/// asking the user how to fix a mismatch. A consistent pair returns without
/// reading any input.
pub fn reconcile<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    record: &mut AthleteRecord,
) -> PromptResult<Reconciliation> {
    let mut weight = record.current_weight;
    let mut category = record.weight_category;
    let mut corrections = 0;

    loop {
        if category.contains(weight) {
            report_fit(prompter, weight, category)?;
            return Ok(Reconciliation {
                weight,
                outcome: Outcome::Fit,
                corrections,
            });
        }

        debug!(weight, category = %category, corrections, "weight outside category");
        report_mismatch(prompter, weight, category)?;

        if !ask_to_change(prompter)? {
            report_declined(prompter, weight, category)?;
            return Ok(Reconciliation {
                weight,
                outcome: Outcome::Declined,
                corrections,
            });
        }

        match ask_correction(prompter)? {
            Correction::Weight => {
                weight = ask_weight(prompter)?;
                record.current_weight = weight;
            }
            Correction::Category => {
                category = ask_category(prompter)?;
                record.weight_category = category;
            }
        }
        corrections += 1;
    }
}

// ── Reports ─────────────────────────────────────────────────────

fn chosen_line(category: WeightCategory) -> String {
    format!(
        "Your chosen weight category is {} - lower weight limit: {}kg. - upper weight limit: {}kg.",
        category,
        category.lower_bound(),
        category.upper_bound()
    )
}

fn report_fit<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    weight: u32,
    category: WeightCategory,
) -> PromptResult<()> {
    p.say(format!("Your current weight is {} kg.", weight))?;
    p.say(chosen_line(category))?;
    p.say("You fit the weight class perfectly.")
}

fn report_mismatch<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    weight: u32,
    category: WeightCategory,
) -> PromptResult<()> {
    p.blank()?;
    p.say("Your current weight and chosen competition's weight category do not match.")?;
    p.say(chosen_line(category))?;
    p.say(format!("Your current weight is {} kg.", weight))
}

fn report_declined<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    weight: u32,
    category: WeightCategory,
) -> PromptResult<()> {
    p.say(format!("Your current weight is {} kg.", weight))?;
    p.say(chosen_line(category))?;
    p.say("Your current weight and your chosen weight category do not match.")?;
    p.say("You did not change the weight or chosen weight category.")
}

// ── Questions ───────────────────────────────────────────────────

fn ask_to_change<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> PromptResult<bool> {
    p.blank()?;
    p.ask_until(
        "Do you want to change weight category or current weight? (Yes/No): ",
        |answer| {
            parse_yes_no(answer).ok_or_else(|| "Invalid choice. Please enter 'yes' or 'no'.".into())
        },
    )
}

/// The option menu is shown again before every attempt.
fn ask_correction<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> PromptResult<Correction> {
    loop {
        p.blank()?;
        p.say("Choose an option:")?;
        p.say("1. Change current weight")?;
        p.say("2. Change weight category")?;
        let answer = p.ask("Enter option: ")?;
        match answer.trim().parse::<i64>() {
            Ok(1) => return Ok(Correction::Weight),
            Ok(2) => return Ok(Correction::Category),
            Ok(_) => p.say("Invalid option. Please choose 1 or 2.")?,
            Err(_) => p.say("Invalid input. Please enter a number.")?,
        }
    }
}

fn ask_weight<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> PromptResult<u32> {
    p.blank()?;
    let weight = p.ask_until("Enter current weight: ", |answer| {
        match answer.trim().parse::<i64>() {
            Ok(w) if (0..=i64::from(MAX_CORRECTED_WEIGHT)).contains(&w) => Ok(w as u32),
            Ok(_) => Err(format!(
                "Invalid weight. Please enter a number between 0 and {}.",
                MAX_CORRECTED_WEIGHT
            )),
            Err(_) => Err("Invalid input. Please enter a number.".into()),
        }
    })?;
    p.say(format!("You have set your current weight to {} kg.", weight))?;
    Ok(weight)
}

fn ask_category<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> PromptResult<WeightCategory> {
    let chosen = loop {
        p.blank()?;
        p.say("Choose a weight category:")?;
        for (i, c) in category::categories_in_order().iter().enumerate() {
            p.say(format!("{}. {}", i + 1, c))?;
        }
        let answer = p.ask("Enter category number: ")?;
        match answer.trim().parse::<usize>() {
            Ok(n) => match category::by_index(n) {
                Some(c) => break c,
                None => p.say("Invalid category. Please choose a valid category.")?,
            },
            Err(_) => p.say("Invalid input. Please enter a number.")?,
        }
    };
    p.blank()?;
    p.say(format!("Your chosen weight category is {}", chosen))?;
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::TrainingPlan;
    use crate::prompt::tests::{printed, remaining, scripted};

    fn record(weight: u32, category: WeightCategory) -> AthleteRecord {
        AthleteRecord {
            name: "Test Athlete".into(),
            plan: TrainingPlan::Intermediate,
            current_weight: weight,
            coaching_hours_per_week: 0,
            competitions_entered: 0,
            weight_category: category,
        }
    }

    #[test]
    fn consistent_pair_reads_no_input() {
        let mut p = scripted(&["yes", "1", "50"]);
        let mut r = record(70, WeightCategory::Lightweight);
        let out = reconcile(&mut p, &mut r).unwrap();

        assert_eq!(out.weight, 70);
        assert_eq!(out.outcome, Outcome::Fit);
        assert_eq!(out.corrections, 0);
        assert_eq!(remaining(&p), 3, "no prompt should have consumed input");
        assert!(printed(p).contains("You fit the weight class perfectly."));
    }

    #[test]
    fn bounds_are_inclusive() {
        for (w, c) in [
            (67, WeightCategory::Lightweight),
            (73, WeightCategory::Lightweight),
            (0, WeightCategory::Flyweight),
            (999, WeightCategory::Heavyweight),
        ] {
            let mut p = scripted(&[]);
            let mut r = record(w, c);
            let out = reconcile(&mut p, &mut r).unwrap();
            assert_eq!(out.outcome, Outcome::Fit, "{w}kg in {c}");
        }
    }

    #[test]
    fn declining_keeps_mismatched_pair() {
        let mut p = scripted(&["no"]);
        let mut r = record(95, WeightCategory::Lightweight);
        let out = reconcile(&mut p, &mut r).unwrap();

        assert_eq!(out.weight, 95);
        assert_eq!(out.outcome, Outcome::Declined);
        assert_eq!(r.current_weight, 95);
        assert_eq!(r.weight_category, WeightCategory::Lightweight);
        let text = printed(p);
        assert!(text.contains("do not match"));
        assert!(text.contains("You did not change the weight or chosen weight category."));
    }

    #[test]
    fn changing_weight_into_category_fits() {
        let mut p = scripted(&["yes", "1", "72"]);
        let mut r = record(95, WeightCategory::Lightweight);
        let out = reconcile(&mut p, &mut r).unwrap();

        assert_eq!(out.weight, 72);
        assert_eq!(out.outcome, Outcome::Fit);
        assert_eq!(out.corrections, 1);
        assert_eq!(r.current_weight, 72);
        assert_eq!(r.weight_category, WeightCategory::Lightweight);
    }

    #[test]
    fn changing_category_keeps_weight() {
        // 5 = Light-Heavyweight [91, 100]
        let mut p = scripted(&["y", "2", "5"]);
        let mut r = record(95, WeightCategory::Lightweight);
        let out = reconcile(&mut p, &mut r).unwrap();

        assert_eq!(out.weight, 95);
        assert_eq!(out.outcome, Outcome::Fit);
        assert_eq!(r.weight_category, WeightCategory::LightHeavyweight);
        assert_eq!(r.current_weight, 95);
    }

    #[test]
    fn category_change_checks_the_changed_weight() {
        // Weight 95 -> 60 (still not Lightweight), then category -> Flyweight.
        let mut p = scripted(&["yes", "1", "60", "yes", "2", "1"]);
        let mut r = record(95, WeightCategory::Lightweight);
        let out = reconcile(&mut p, &mut r).unwrap();

        assert_eq!(out.weight, 60);
        assert_eq!(out.outcome, Outcome::Fit);
        assert_eq!(out.corrections, 2);
        assert_eq!(r.current_weight, 60);
        assert_eq!(r.weight_category, WeightCategory::Flyweight);
    }

    #[test]
    fn decline_after_corrections_returns_latest_values() {
        // Category -> Heavyweight (95 still outside), then give up.
        let mut p = scripted(&["yes", "2", "6", "no"]);
        let mut r = record(95, WeightCategory::Lightweight);
        let out = reconcile(&mut p, &mut r).unwrap();

        assert_eq!(out.weight, 95);
        assert_eq!(out.outcome, Outcome::Declined);
        assert_eq!(out.corrections, 1);
        assert_eq!(r.weight_category, WeightCategory::Heavyweight);
    }

    #[test]
    fn invalid_answers_are_reasked() {
        let mut p = scripted(&[
            "perhaps", // yes/no
            "yes", "3", "x", "1", // option
            "1001", "-1", "abc", "70", // weight
        ]);
        let mut r = record(95, WeightCategory::Lightweight);
        let out = reconcile(&mut p, &mut r).unwrap();

        assert_eq!(out.weight, 70);
        assert_eq!(out.outcome, Outcome::Fit);
        let text = printed(p);
        assert!(text.contains("Invalid choice. Please enter 'yes' or 'no'."));
        assert!(text.contains("Invalid option. Please choose 1 or 2."));
        assert!(text.contains("Invalid weight. Please enter a number between 0 and 1000."));
        assert!(text.contains("Invalid input. Please enter a number."));
    }

    #[test]
    fn invalid_category_index_is_reasked() {
        let mut p = scripted(&["yes", "2", "0", "7", "two", "2"]);
        let mut r = record(70, WeightCategory::Heavyweight);
        let out = reconcile(&mut p, &mut r).unwrap();

        assert_eq!(out.outcome, Outcome::Fit);
        assert_eq!(r.weight_category, WeightCategory::Lightweight);
        let text = printed(p);
        assert_eq!(
            text.matches("Invalid category. Please choose a valid category.").count(),
            2
        );
        // Four attempts, four listings.
        assert_eq!(text.matches("Choose a weight category:").count(), 4);
        assert_eq!(text.matches("6. Heavyweight").count(), 4);
    }

    #[test]
    fn option_menu_is_shown_for_each_attempt() {
        let mut p = scripted(&["yes", "3", "x", "1", "70"]);
        let mut r = record(95, WeightCategory::Lightweight);
        reconcile(&mut p, &mut r).unwrap();

        let text = printed(p);
        assert_eq!(text.matches("Choose an option:").count(), 3);
        assert_eq!(text.matches("2. Change weight category").count(), 3);
    }

    #[test]
    fn weight_of_1000_never_fits() {
        let mut p = scripted(&["yes", "1", "1000", "no"]);
        let mut r = record(95, WeightCategory::Heavyweight);
        let out = reconcile(&mut p, &mut r).unwrap();
        assert_eq!(out.weight, 1000);
        assert_eq!(out.outcome, Outcome::Declined);
    }

    #[test]
    fn long_sessions_do_not_grow_the_stack() {
        let mut script = Vec::new();
        for _ in 0..20_000 {
            script.extend(["yes", "2", "1"]);
        }
        script.push("no");
        let mut p = scripted(&script);
        let mut r = record(500, WeightCategory::Lightweight);
        let out = reconcile(&mut p, &mut r).unwrap();
        assert_eq!(out.outcome, Outcome::Declined);
        assert_eq!(out.corrections, 20_000);
    }

    #[test]
    fn closed_input_mid_negotiation_is_an_error() {
        let mut p = scripted(&["yes"]);
        let mut r = record(95, WeightCategory::Lightweight);
        assert!(reconcile(&mut p, &mut r).is_err());
    }
}
