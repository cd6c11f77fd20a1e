use std::collections::BTreeMap;

use mealcal_shared::date;
use serde::Serialize;

use crate::{DayMeals, MealAssignment, MealPlanRecord, MealType};

/// Number of dates a user may have planned at once.
pub const PLANNING_HORIZON_DAYS: usize = 7;

/// Meals planned for one calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: String,
    pub breakfast: Option<MealAssignment>,
    pub lunch: Option<MealAssignment>,
    pub dinner: Option<MealAssignment>,
}

impl CalendarDay {
    fn new(date: &str, meals: &DayMeals) -> Self {
        Self {
            date: date.to_owned(),
            breakfast: meals.breakfast.clone(),
            lunch: meals.lunch.clone(),
            dinner: meals.dinner.clone(),
        }
    }

    pub fn meal(&self, meal_type: MealType) -> Option<&MealAssignment> {
        match meal_type {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breakfast.is_none() && self.lunch.is_none() && self.dinner.is_none()
    }

    pub fn is_today(&self) -> bool {
        self.date == date::today_canonical()
    }
}

/// Flattens meal-plan records into one entry per planned date, ascending.
///
/// The first record (in input order) that supplies a date wins. Entries
/// whose day key has no meals, or whose date is not canonical, are dropped.
/// At most [`PLANNING_HORIZON_DAYS`] entries are returned, the earliest ones.
pub fn aggregate(records: &[MealPlanRecord]) -> Vec<CalendarDay> {
    let mut by_date: BTreeMap<&str, CalendarDay> = BTreeMap::new();

    for record in records {
        for (day_key, value) in &record.dates {
            let Some(meals) = record.days.get(day_key).filter(|meals| !meals.is_empty()) else {
                tracing::debug!(
                    record = record.id.as_deref().unwrap_or_default(),
                    day_key = day_key.as_str(),
                    "meal plan date has no meals, skipped"
                );
                continue;
            };

            if date::parse(value).is_err() {
                tracing::warn!(
                    record = record.id.as_deref().unwrap_or_default(),
                    day_key = day_key.as_str(),
                    date = value.as_str(),
                    "meal plan date is not canonical, skipped"
                );
                continue;
            }

            by_date
                .entry(value.as_str())
                .or_insert_with(|| CalendarDay::new(value, meals));
        }
    }

    let mut days: Vec<CalendarDay> = by_date.into_values().collect();

    if days.len() > PLANNING_HORIZON_DAYS {
        tracing::warn!(
            planned = days.len(),
            "more dates than the planning horizon, keeping the earliest"
        );
        days.truncate(PLANNING_HORIZON_DAYS);
    }

    days
}

/// How many of the horizon's slots are filled.
pub fn planned_day_count(records: &[MealPlanRecord]) -> usize {
    aggregate(records).len()
}

/// `days` must be sorted, as returned by [`aggregate`].
pub fn find_day<'a>(days: &'a [CalendarDay], date: &str) -> Option<&'a CalendarDay> {
    days.binary_search_by(|day| day.date.as_str().cmp(date))
        .ok()
        .map(|index| &days[index])
}

/// Meal shown on the calendar for `date` and `meal_type`.
pub fn find_meal(
    records: &[MealPlanRecord],
    date: &str,
    meal_type: MealType,
) -> Option<MealAssignment> {
    let days = aggregate(records);

    find_day(&days, date)
        .and_then(|day| day.meal(meal_type))
        .cloned()
}

pub fn today(days: &[CalendarDay]) -> Option<&CalendarDay> {
    find_day(days, &date::today_canonical())
}

/// Up to `limit` days on or after `from`.
pub fn upcoming_from<'a>(days: &'a [CalendarDay], from: &str, limit: usize) -> &'a [CalendarDay] {
    let start = days.partition_point(|day| day.date.as_str() < from);
    let end = days.len().min(start + limit);

    &days[start..end]
}

pub fn upcoming(days: &[CalendarDay], limit: usize) -> &[CalendarDay] {
    upcoming_from(days, &date::today_canonical(), limit)
}
