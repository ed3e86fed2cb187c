use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use super::super::holidayerror::HolidayError;

/// A date-computation strategy: where a recurring holiday falls in a given year.
///
/// `Ok(None)` means the holiday simply does not occur that year.
pub trait RecurringHoliday: fmt::Debug + Send + Sync {

    fn get_holiday(&self, year: i32) -> Result<Option<NaiveDate>, HolidayError>;

    fn is_holiday(&self, d: &NaiveDate) -> Result<bool, HolidayError> {
        Ok(self.get_holiday(d.year())? == Some(*d))
    }
}

pub type CustomHolidayFn = dyn Fn(i32) -> Option<NaiveDate> + Send + Sync;

/// Holiday computed by an injected function, identified by name so that
/// catalogs loaded from JSON can refer to it.
#[derive(Clone)]
pub struct CustomHoliday {
    name: String,
    compute: Arc<CustomHolidayFn>
}

impl CustomHoliday {
    pub fn new(name: impl Into<String>, compute: Arc<CustomHolidayFn>) -> CustomHoliday {
        CustomHoliday { name: name.into(), compute }
    }

    pub fn from_fn<F>(name: impl Into<String>, f: F) -> CustomHoliday
        where F: Fn(i32) -> Option<NaiveDate> + Send + Sync + 'static {
        CustomHoliday::new(name, Arc::new(f))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomHoliday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomHoliday").field("name", &self.name).finish()
    }
}

impl RecurringHoliday for CustomHoliday {
    fn get_holiday(&self, year: i32) -> Result<Option<NaiveDate>, HolidayError> {
        Ok((self.compute)(year).filter(|d| d.year() == year))
    }
}
