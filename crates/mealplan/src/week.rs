use std::collections::BTreeMap;

use mealcal_shared::date;
use serde::Serialize;

use crate::CalendarDay;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    /// Canonical date of the Sunday opening this week.
    pub week_start: String,
    pub days: Vec<CalendarDay>,
}

impl Week {
    /// `"Mar 10 - 16, 2024"`
    pub fn label(&self) -> mealcal_shared::Result<String> {
        date::format_week_range(&self.week_start)
    }
}

/// Buckets calendar days by the Sunday starting their week. Buckets and the
/// days inside them are ascending by date.
pub fn group_by_week(days: &[CalendarDay]) -> Vec<Week> {
    let mut weeks: BTreeMap<String, Vec<CalendarDay>> = BTreeMap::new();

    for day in days {
        let week_start = match date::week_start_of(&day.date) {
            Ok(week_start) => week_start,
            Err(err) => {
                tracing::warn!(date = day.date.as_str(), err = %err, "calendar day without a valid date, skipped");
                continue;
            }
        };

        weeks.entry(week_start).or_default().push(day.clone());
    }

    weeks
        .into_iter()
        .map(|(week_start, mut days)| {
            days.sort_by(|a, b| a.date.cmp(&b.date));
            Week { week_start, days }
        })
        .collect()
}
