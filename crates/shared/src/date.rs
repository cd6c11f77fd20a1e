//! Canonical `YYYY-MM-DD` date keys.
//!
//! A canonical date is a local wall-clock calendar date. It is never read as
//! a UTC instant: doing so and rendering the result west of UTC moves the
//! weekday back by one. Every conversion here goes through [`time::Date`],
//! which carries no offset at all.

use time::{
    Date, Duration, Month, OffsetDateTime, Time, UtcOffset,
    format_description::BorrowedFormatItem, macros::format_description,
};

use crate::Result;

const CANONICAL: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Builds a canonical key from local calendar components.
pub fn to_canonical(year: i32, month: u8, day: u8) -> Result<String> {
    let month = Month::try_from(month)?;
    let date = Date::from_calendar_date(year, month, day)?;

    Ok(canonical(date))
}

pub fn canonical(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Strict parse of a canonical key.
pub fn parse(value: &str) -> Result<Date> {
    Ok(Date::parse(value, CANONICAL)?)
}

/// Parses a canonical key as a local calendar date for display.
///
/// `time::Date` carries no offset, so this is the plain parse; it never
/// shifts the day the way a UTC midnight instant would.
pub fn parse_for_display(value: &str) -> Result<Date> {
    parse(value)
}

/// The instant of local midnight for `value` at the given offset.
pub fn local_midnight(value: &str, offset: UtcOffset) -> Result<OffsetDateTime> {
    Ok(parse(value)?.with_time(Time::MIDNIGHT).assume_offset(offset))
}

/// `"Sunday, Mar 10"`
pub fn format_for_display(value: &str) -> Result<String> {
    let date = parse_for_display(value)?;

    Ok(format!(
        "{}, {} {}",
        date.weekday(),
        short_month(date.month()),
        date.day()
    ))
}

pub fn today() -> Date {
    let now = OffsetDateTime::now_local().unwrap_or_else(|err| {
        tracing::debug!(err = %err, "local offset unavailable, using UTC");
        OffsetDateTime::now_utc()
    });

    now.date()
}

pub fn today_canonical() -> String {
    canonical(today())
}

/// Start of the week bucket holding `date`. Weeks start on Sunday.
pub fn week_start(date: Date) -> Date {
    date - Duration::days(date.weekday().number_days_from_sunday().into())
}

pub fn week_start_of(value: &str) -> Result<String> {
    Ok(canonical(week_start(parse(value)?)))
}

/// `"Mar 10 - 16, 2024"`, or `"Mar 31 - Apr 6, 2024"` when the week spans
/// two months.
pub fn format_week_range(week_start: &str) -> Result<String> {
    let start = parse(week_start)?;
    let end = start + Duration::days(6);

    if start.month() == end.month() {
        return Ok(format!(
            "{} {} - {}, {}",
            short_month(start.month()),
            start.day(),
            end.day(),
            start.year()
        ));
    }

    Ok(format!(
        "{} {} - {} {}, {}",
        short_month(start.month()),
        start.day(),
        short_month(end.month()),
        end.day(),
        start.year()
    ))
}

fn short_month(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
