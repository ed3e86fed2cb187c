use std::fmt;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::super::holidayerror::HolidayError;
use super::super::utility::end_of_month;
use super::recurringholiday::RecurringHoliday;

/// Which occurrence of a weekday within a month.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Occurrence {
    Nth(u8),
    Last
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occurrence::Last => write!(f, "last"),
            Occurrence::Nth(n) => {
                let suffix = match (n % 10, n % 100) {
                    (_, 11..=13) => "th",
                    (1, _) => "st",
                    (2, _) => "nd",
                    (3, _) => "rd",
                    _ => "th"
                };
                write!(f, "{}{}", n, suffix)
            }
        }
    }
}

/// First `weekday` falling on or after `d`, `None` past the end of the calendar.
pub fn weekday_on_or_after(d: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let days_forward = (weekday.num_days_from_monday() + 7
                        - d.weekday().num_days_from_monday()) % 7;
    d.checked_add_days(Days::new(days_forward as u64))
}

/// Last `weekday` falling on or before `d`, `None` before the start of the calendar.
pub fn weekday_on_or_before(d: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let days_back = (d.weekday().num_days_from_monday() + 7
                     - weekday.num_days_from_monday()) % 7;
    d.checked_sub_days(Days::new(days_back as u64))
}

/// The `occurrence`-th `weekday` of `month` in `year`.
///
/// Fails with [`HolidayError::InvalidOccasion`] when the month has no such
/// occurrence (a 5th Monday in February, say) or the month is invalid.
pub fn nth_weekday(year: i32, month: u32, weekday: Weekday, occurrence: Occurrence) -> Result<NaiveDate, HolidayError> {
    let invalid = || HolidayError::InvalidOccasion { year, month, weekday, occurrence };
    match occurrence {
        Occurrence::Nth(n) => NaiveDate::from_weekday_of_month_opt(year, month, weekday, n).ok_or_else(invalid),
        Occurrence::Last => end_of_month(year, month)
            .and_then(|eom| weekday_on_or_before(eom, weekday))
            .ok_or_else(invalid)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NthWeekdayHoliday {
    month: u32,
    occurrence: Occurrence,
    weekday: Weekday,
}

impl NthWeekdayHoliday {
    pub fn new(month: u32, occurrence: Occurrence, weekday: Weekday) -> Option<NthWeekdayHoliday> {
        let valid_occurrence = match occurrence {
            Occurrence::Nth(n) => (1..=5).contains(&n),
            Occurrence::Last => true
        };
        if !(1..=12).contains(&month) || !valid_occurrence {
            None
        } else {
            Some(NthWeekdayHoliday { month, occurrence, weekday })
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl RecurringHoliday for NthWeekdayHoliday {
    fn get_holiday(&self, year: i32) -> Result<Option<NaiveDate>, HolidayError> {
        nth_weekday(year, self.month, self.weekday, self.occurrence).map(Some)
    }
}

/// Which side of the anchor day a [`RelativeWeekdayHoliday`] searches.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum WeekdayDirection {
    OnOrAfter,
    OnOrBefore
}

/// A weekday on or after (or before) a fixed anchor day, e.g. the first
/// Monday on or after May 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativeWeekdayHoliday {
    month: u32,
    day: u32,
    weekday: Weekday,
    direction: WeekdayDirection
}

impl RelativeWeekdayHoliday {
    pub fn new(month: u32, day: u32, weekday: Weekday, direction: WeekdayDirection) -> Option<RelativeWeekdayHoliday> {
        NaiveDate::from_ymd_opt(2000, month, day)?;
        Some(RelativeWeekdayHoliday { month, day, weekday, direction })
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn direction(&self) -> WeekdayDirection {
        self.direction
    }
}

impl RecurringHoliday for RelativeWeekdayHoliday {
    fn get_holiday(&self, year: i32) -> Result<Option<NaiveDate>, HolidayError> {
        let anchor = match NaiveDate::from_ymd_opt(year, self.month, self.day) {
            Some(anchor) => anchor,
            None => return Ok(None)
        };
        let d = match self.direction {
            WeekdayDirection::OnOrAfter => weekday_on_or_after(anchor, self.weekday),
            WeekdayDirection::OnOrBefore => weekday_on_or_before(anchor, self.weekday)
        };
        Ok(d.filter(|d| d.year() == year))
    }
}
