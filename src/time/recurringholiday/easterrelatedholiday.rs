use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::super::holidayerror::HolidayError;
use super::super::utility::shift_days;
use super::recurringholiday::RecurringHoliday;

/// Years for which both Easter computations are defined (Gregorian era).
pub const EASTER_SUPPORTED_YEARS: RangeInclusive<i32> = 1583..=4099;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum EasterType {
    Western,
    Orthodox
}

/// Easter Sunday of `year`, as a Gregorian date.
pub fn easter(year: i32, easter_type: EasterType) -> Result<NaiveDate, HolidayError> {
    if !EASTER_SUPPORTED_YEARS.contains(&year) {
        return Err(HolidayError::YearOutOfSupportedRange {
            year,
            min: *EASTER_SUPPORTED_YEARS.start(),
            max: *EASTER_SUPPORTED_YEARS.end()
        });
    }

    let g = year % 19;

    // p: days after March 21 of the paschal Sunday, may be negative
    let p = match easter_type {
        EasterType::Orthodox => {
            let i = (19 * g + 15) % 30;
            let j = (year + year / 4 + i) % 7;
            let e = if year <= 1600 {
                10
            } else {
                10 + year / 100 - 16 - (year / 100 - 16) / 4
            };
            i - j + e
        },
        EasterType::Western => {
            let c = year / 100;
            let c_div_4 = c / 4;
            let h = (c - c_div_4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
            let h_div_28 = h / 28;
            let i = h - h_div_28 * (1 - h_div_28 * (29 / (h + 1)) * ((21 - g) / 11));
            let j = (year + year / 4 + i + 2 - c + c_div_4) % 7;
            i - j
        }
    };

    let day = 1 + (p + 27 + (p + 6) / 40) % 31;
    let month = 3 + (p + 26) / 30;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32).ok_or(HolidayError::YearOutOfSupportedRange {
        year,
        min: *EASTER_SUPPORTED_YEARS.start(),
        max: *EASTER_SUPPORTED_YEARS.end()
    })
}

/// A holiday a fixed number of days away from Easter Sunday
/// (Good Friday is -2, Easter Monday +1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EasterRelatedHoliday {
    easter_type: EasterType,
    shift_days: i64
}

impl EasterRelatedHoliday {
    pub fn new(easter_type: EasterType, shift_days: i64) -> EasterRelatedHoliday {
        EasterRelatedHoliday { easter_type, shift_days }
    }

    pub fn easter_type(&self) -> EasterType {
        self.easter_type
    }

    pub fn shift_days(&self) -> i64 {
        self.shift_days
    }
}

impl RecurringHoliday for EasterRelatedHoliday {
    fn get_holiday(&self, year: i32) -> Result<Option<NaiveDate>, HolidayError> {
        let easter_day = easter(year, self.easter_type)?;
        Ok(shift_days(easter_day, self.shift_days).filter(|d| d.year() == year))
    }
}
