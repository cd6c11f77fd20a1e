//! Client-side guard on generation requests.
//!
//! The server remains the authority on the horizon ceiling. These checks
//! only keep obviously invalid requests from being sent and drive which
//! actions are offered.

use serde::Serialize;

use crate::PLANNING_HORIZON_DAYS;

pub fn can_generate(planned: usize, requested: usize) -> bool {
    planned < PLANNING_HORIZON_DAYS
        && requested >= 1
        && planned.saturating_add(requested) <= PLANNING_HORIZON_DAYS
}

pub fn remaining_capacity(planned: usize) -> usize {
    PLANNING_HORIZON_DAYS.saturating_sub(planned)
}

pub fn validate_request(planned: usize, requested: usize) -> mealcal_shared::Result<()> {
    if can_generate(planned, requested) {
        return Ok(());
    }

    if requested == 0 {
        mealcal_shared::user!("Choose at least one day to generate");
    }

    match remaining_capacity(planned) {
        0 => mealcal_shared::user!(
            "All {PLANNING_HORIZON_DAYS} days are already planned. Complete a day to make room."
        ),
        remaining => mealcal_shared::user!(
            "You can generate up to {remaining} more day{}",
            plural(remaining)
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    pub planned: usize,
    pub remaining: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Self::from_planned(0)
    }
}

impl Capacity {
    pub fn from_planned(planned: usize) -> Self {
        Self {
            planned,
            remaining: remaining_capacity(planned),
        }
    }

    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }

    pub fn can_generate(&self, requested: usize) -> bool {
        can_generate(self.planned, requested)
    }

    pub fn summary(&self) -> String {
        let head = format!(
            "You have {} out of {PLANNING_HORIZON_DAYS} possible days planned.",
            self.planned
        );

        if self.is_full() {
            return head;
        }

        format!(
            "{head} You can generate up to {} more day{}.",
            self.remaining,
            plural(self.remaining)
        )
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
