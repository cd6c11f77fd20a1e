use serde::Serialize;

use crate::{CalendarDay, Capacity, MealPlanRecord, Week, aggregate, group_by_week};

/// Everything a view needs from one fetch of meal-plan records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub days: Vec<CalendarDay>,
    pub weeks: Vec<Week>,
    pub capacity: Capacity,
}

impl Calendar {
    pub fn build(records: &[MealPlanRecord]) -> Self {
        let days = aggregate(records);
        let weeks = group_by_week(&days);
        let capacity = Capacity::from_planned(days.len());

        Self {
            days,
            weeks,
            capacity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
