use chrono::NaiveDate;

use super::super::holidayerror::HolidayError;
use super::recurringholiday::RecurringHoliday;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedDateHoliday {
    month: u32,
    day: u32
}

impl FixedDateHoliday {
    /// Returns `None` unless `month`/`day` names a real date (Feb 29 is accepted).
    pub fn new(month: u32, day: u32) -> Option<FixedDateHoliday> {
        // 2000 is a leap year, so Feb 29 validates here
        NaiveDate::from_ymd_opt(2000, month, day)?;
        Some(FixedDateHoliday { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl RecurringHoliday for FixedDateHoliday {
    fn get_holiday(&self, year: i32) -> Result<Option<NaiveDate>, HolidayError> {
        Ok(NaiveDate::from_ymd_opt(year, self.month, self.day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_impossible_dates() {
        assert!(FixedDateHoliday::new(4, 31).is_none());
        assert!(FixedDateHoliday::new(13, 1).is_none());
        assert!(FixedDateHoliday::new(2, 29).is_some());
    }

    #[test]
    fn leap_day_only_in_leap_years() {
        let holiday = FixedDateHoliday::new(2, 29).unwrap();
        assert_eq!(holiday.get_holiday(2023), Ok(None));
        assert_eq!(holiday.get_holiday(2024), Ok(NaiveDate::from_ymd_opt(2024, 2, 29)));
    }
}
