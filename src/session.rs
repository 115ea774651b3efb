//! # Session — Registration and Lookup Dialogue
//!
//! Drives one interactive sitting: register athletes one after another until
//! the user stops, save the roster, then optionally browse it from a small
//! menu.
//!
//! ## Registration order
//!
//! name → rules → plan (confirmed) → category → weight → coaching hours →
//! competitions → weight/category reconciliation → cost breakdown → store.
//!
//! ## Persistence
//!
//! Each finished athlete is appended to the store straight away, and the full
//! session list overwrites the store once registration ends. Store failures
//! are logged and the session carries on with what it holds in memory.

use crate::athlete::{self, AthleteRecord, MAX_COACHING_HOURS, MAX_COMPETITIONS};
use crate::category::{self, WeightCategory};
use crate::cost::{self, COACHING_HOURLY_RATE, COACHING_HOURS_CAP, COMPETITION_FEE};
use crate::plan::TrainingPlan;
use crate::prompt::{PromptResult, Prompter};
use crate::reconcile::{self, Outcome};
use crate::store::Store;
use std::io::{BufRead, Write};
use tracing::{error, info};

pub const WELCOME: &str = "Welcome to the North Sussex Judo training System";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ShowAll,
    ShowOne,
    Exit,
}

pub struct Session<R, W> {
    prompter: Prompter<R, W>,
    store: Store,
    athletes: Vec<AthleteRecord>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(prompter: Prompter<R, W>, store: Store) -> Self {
        Session {
            prompter,
            store,
            athletes: Vec::new(),
        }
    }

    /// Athletes registered during this session, in registration order.
    pub fn athletes(&self) -> &[AthleteRecord] {
        &self.athletes
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Full sitting: welcome, registration loop, save, optional browsing.
    pub fn run(&mut self) -> PromptResult<()> {
        self.prompter.say(WELCOME)?;
        self.register_all()?;
        self.save_roster()?;
        self.prompter.say("Registration complete. Thank you!")?;
        self.prompter.blank()?;

        if self
            .prompter
            .confirm("Do you want to view registered athletes' information?")?
        {
            self.prompter.blank()?;
            self.browse()?;
        }
        Ok(())
    }

    /// Register athletes until the user declines another.
    pub fn register_all(&mut self) -> PromptResult<()> {
        loop {
            let athlete = self.register_athlete()?;
            self.athletes.push(athlete);
            if !self
                .prompter
                .confirm("Do you want to register another athlete?")?
            {
                return Ok(());
            }
        }
    }

    /// Collect one athlete, reconcile weight against category, show the
    /// month's cost, and append the record to the store.
    pub fn register_athlete(&mut self) -> PromptResult<AthleteRecord> {
        let name = self.ask_name()?;
        self.show_rules()?;
        self.prompter.blank()?;

        let plan = self.ask_plan()?;
        self.prompter.blank()?;

        let weight_category = self.ask_category()?;
        self.prompter.blank()?;

        let current_weight = self
            .prompter
            .ask_number("Enter current weight in kilograms: ")?;
        self.prompter
            .say(format!("Your current weight is {} kg.", current_weight))?;
        self.prompter.blank()?;

        let coaching_hours_per_week = self.ask_coaching_hours()?;
        self.prompter.blank()?;

        let competitions_entered = self.ask_competitions(plan)?;
        self.prompter.blank()?;

        let mut record = AthleteRecord {
            name,
            plan,
            current_weight,
            coaching_hours_per_week,
            competitions_entered,
            weight_category,
        };

        let settled = reconcile::reconcile(&mut self.prompter, &mut record)?;
        if settled.outcome == Outcome::Declined {
            info!(
                athlete = %record.name,
                weight = record.current_weight,
                category = %record.weight_category,
                "registered with weight outside category"
            );
        }

        self.prompter.blank()?;
        self.prompter.say(format!("Athlete's name: {}", record.name))?;
        self.prompter.blank()?;
        let estimate = cost::estimate(
            record.plan,
            record.competitions_entered,
            record.coaching_hours_per_week,
        );
        self.prompter.say(estimate.to_string())?;
        self.prompter.blank()?;

        if let Err(e) = self.store.append(&record) {
            error!(path = %self.store.path().display(), error = %e, "error saving athlete information");
        }
        Ok(record)
    }

    /// Overwrite the store with everything registered this session.
    fn save_roster(&mut self) -> PromptResult<()> {
        match self.store.save_all(&self.athletes) {
            Ok(()) => self.prompter.say("Athlete information saved successfully."),
            Err(e) => {
                error!(path = %self.store.path().display(), error = %e, "error saving athlete information");
                Ok(())
            }
        }
    }

    // ── Field prompts ───────────────────────────────────────────

    fn ask_name(&mut self) -> PromptResult<String> {
        let name = self
            .prompter
            .ask_until("Enter athlete's name: ", |raw| {
                athlete::normalize_name(raw).map_err(|e| e.to_string())
            })?;
        self.prompter
            .say(format!("Name successfully inserted: {}", name))?;
        self.prompter.blank()?;
        Ok(name)
    }

    fn show_rules(&mut self) -> PromptResult<()> {
        self.prompter.say(rules_text())
    }

    fn ask_plan(&mut self) -> PromptResult<TrainingPlan> {
        loop {
            let plan = self.select_plan()?;
            self.prompter.blank()?;
            self.prompter
                .say(format!("Selected training plan: {}", plan))?;
            self.prompter.blank()?;
            if self
                .prompter
                .confirm(&format!("Confirm {} training plan?", plan))?
            {
                return Ok(plan);
            }
        }
    }

    fn select_plan(&mut self) -> PromptResult<TrainingPlan> {
        loop {
            self.prompter.say("Select a training plan:")?;
            for plan in TrainingPlan::all() {
                self.prompter.say(format!(
                    "{} - weekly fee: ${:.2}",
                    plan,
                    plan.weekly_fee()
                ))?;
            }
            let answer = self.prompter.ask("Enter training plan name: ")?;
            match TrainingPlan::from_name(&answer) {
                Ok(plan) => return Ok(plan),
                Err(_) => {
                    self.prompter.blank()?;
                    self.prompter
                        .say("Invalid training plan. Please select from the options.")?;
                }
            }
        }
    }

    fn ask_category(&mut self) -> PromptResult<WeightCategory> {
        self.prompter.say("Select a weight category:")?;
        for c in category::categories_in_order() {
            self.prompter.say(c.bounds_line())?;
        }
        let chosen = self
            .prompter
            .ask_until("Enter weight category name: ", |answer| {
                category::find_by_name(answer)
                    .map_err(|_| "Invalid input. Please enter a valid weight category name.".into())
            })?;
        self.prompter.say(format!("You have chosen {}.", chosen))?;
        Ok(chosen)
    }

    fn ask_coaching_hours(&mut self) -> PromptResult<u32> {
        if !self.prompter.confirm("Have you taken private coaching?")? {
            return Ok(0);
        }
        let prompt = format!(
            "Enter number of private coaching hours per week (maximum {}): ",
            MAX_COACHING_HOURS
        );
        let complaint = format!(
            "Invalid input. Please enter a number between 1 and {}.",
            MAX_COACHING_HOURS
        );
        self.prompter
            .ask_number_in(&prompt, 1, MAX_COACHING_HOURS, &complaint)
    }

    fn ask_competitions(&mut self, plan: TrainingPlan) -> PromptResult<u32> {
        if !plan.allows_competitions() {
            return Ok(0);
        }
        let complaint = format!(
            "Invalid input. Please enter a number between 0 and {}.",
            MAX_COMPETITIONS
        );
        let n = self.prompter.ask_number_in(
            "Enter number of competitions entered this month: ",
            0,
            MAX_COMPETITIONS,
            &complaint,
        )?;
        self.prompter
            .say(format!("You have entered {} competition(s) this month.", n))?;
        Ok(n)
    }

    // ── Browsing ────────────────────────────────────────────────

    /// Menu loop over the saved roster until the user picks exit.
    pub fn browse(&mut self) -> PromptResult<()> {
        loop {
            self.prompter.say("Select an option:")?;
            self.prompter.say("1. Show all athletes' information")?;
            self.prompter.say("2. Show individual athlete information")?;
            self.prompter.say("0. Exit")?;
            self.prompter.blank()?;
            let choice = self.prompter.ask_number("Enter choice: ")?;
            self.prompter.blank()?;

            match parse_menu_choice(choice) {
                Some(MenuChoice::ShowAll) => self.show_all()?,
                Some(MenuChoice::ShowOne) => self.show_one()?,
                Some(MenuChoice::Exit) => {
                    self.prompter.say("Exiting program.")?;
                    return Ok(());
                }
                None => self.prompter.say("Invalid choice. Please try again.")?,
            }
        }
    }

    fn show_all(&mut self) -> PromptResult<()> {
        let roster = self.store.load_all();
        self.prompter
            .say(format!("Number of registered athletes: {}", roster.len()))?;
        self.prompter.say("All athletes' information:")?;
        for a in &roster {
            self.prompter.say(a.to_string())?;
        }
        self.prompter.blank()
    }

    fn show_one(&mut self) -> PromptResult<()> {
        let roster = self.store.load_all();
        self.prompter
            .say(format!("Number of registered athletes: {}", roster.len()))?;
        self.prompter.say("List of athlete names:")?;
        for a in &roster {
            self.prompter.say(&a.name)?;
        }
        self.prompter.blank()?;

        let query = self.prompter.ask("Enter athlete name: ")?;
        match find_athlete(&roster, &query) {
            Some(a) => {
                self.prompter.blank()?;
                self.prompter.say("Athlete information:")?;
                self.prompter.say(a.to_string())?;
                self.prompter.blank()
            }
            None => self.prompter.say("Athlete not found."),
        }
    }
}

fn parse_menu_choice(n: u32) -> Option<MenuChoice> {
    match n {
        1 => Some(MenuChoice::ShowAll),
        2 => Some(MenuChoice::ShowOne),
        0 => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// First athlete whose name matches `query`, ignoring case.
pub fn find_athlete<'a>(roster: &'a [AthleteRecord], query: &str) -> Option<&'a AthleteRecord> {
    roster.iter().find(|a| a.name_matches(query))
}

/// Club rules shown before plan selection.
pub fn rules_text() -> String {
    let mut text = String::from("Competition rules:\n");
    for plan in TrainingPlan::all() {
        text.push_str(&format!(
            "- {} plan: ${:.2} per week\n",
            plan,
            plan.weekly_fee()
        ));
    }
    text.push_str("- Beginners cannot enter competitions.\n");
    text.push_str(&format!(
        "- Intermediate and Elite athletes may enter up to {} competitions a month at ${:.2} each.\n",
        MAX_COMPETITIONS, COMPETITION_FEE
    ));
    text.push_str(&format!(
        "- Private coaching is limited to {} hours a week at ${:.2} per hour.\n",
        COACHING_HOURS_CAP, COACHING_HOURLY_RATE
    ));
    text.push_str("- Athletes compete in the weight category that matches their current weight:");
    for c in category::categories_in_order() {
        text.push_str(&format!("\n  {}", c.bounds_line()));
    }
    text
}
