use chrono::{Datelike, NaiveDate};

use crate::time::calendar::holidaycatalog::HolidayCatalog;
use crate::time::calendar::holidaymap::HolidayMap;
use crate::time::holidayerror::HolidayError;

/// Query surface shared by the plain and the cached engine.
pub trait HolidayCalendar {
    fn catalog(&self) -> &HolidayCatalog;

    fn holidays_for_year(&self, year: i32, subdivision: &str, observed: bool) -> Result<HolidayMap, HolidayError>;

    /// Holiday name on `d`, if any.
    fn is_holiday(&self, d: NaiveDate, subdivision: &str, observed: bool) -> Result<Option<String>, HolidayError> {
        let holidays = self.holidays_for_year(d.year(), subdivision, observed)?;
        Ok(holidays.get(&d).map(str::to_owned))
    }

    /// Holidays in `[start, end]`, ordered by date.
    fn holidays_between(&self, start: NaiveDate, end: NaiveDate, subdivision: &str, observed: bool)
        -> Result<Vec<(NaiveDate, String)>, HolidayError> {
        let mut result = Vec::new();
        for year in start.year()..=end.year() {
            let holidays = self.holidays_for_year(year, subdivision, observed)?;
            result.extend(
                holidays.iter()
                    .filter(|(d, _)| start <= **d && **d <= end)
                    .map(|(d, name)| (*d, name.clone()))
            );
        }
        Ok(result)
    }

    fn supported_subdivisions(&self) -> &[String] {
        self.catalog().subdivisions()
    }

    fn default_subdivision(&self) -> &str {
        self.catalog().default_subdivision()
    }
}
