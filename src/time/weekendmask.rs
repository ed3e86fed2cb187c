use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Weekend days as a bitmask.
/// Each bit represents a day: Mon(0), Tue(1), ..., Sun(6)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WeekendMask(u8);

impl WeekendMask {
    pub fn new(weekends: &HashSet<Weekday>) -> WeekendMask {
        let mut mask = 0u8;
        for &weekday in weekends {
            mask |= 1u8 << weekday.num_days_from_monday();
        }
        WeekendMask(mask)
    }

    #[inline]
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        let bit = 1u8 << weekday.num_days_from_monday();
        (self.0 & bit) != 0
    }

    #[inline]
    pub fn is_weekend_date(&self, d: NaiveDate) -> bool {
        self.is_weekend(d.weekday())
    }
}

impl Default for WeekendMask {
    fn default() -> Self {
        WeekendMask::new(&HashSet::from([Weekday::Sat, Weekday::Sun]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_saturday_and_sunday() {
        let mask = WeekendMask::default();
        assert!(mask.is_weekend(Weekday::Sat));
        assert!(mask.is_weekend(Weekday::Sun));
        assert!(!mask.is_weekend(Weekday::Fri));
        assert!(!mask.is_weekend(Weekday::Mon));
    }

    #[test]
    fn custom_weekend_days() {
        let mask = WeekendMask::new(&HashSet::from([Weekday::Fri, Weekday::Sat]));
        assert!(mask.is_weekend(Weekday::Fri));
        assert!(!mask.is_weekend(Weekday::Sun));
        assert!(mask.is_weekend_date(NaiveDate::from_ymd_opt(2023, 6, 2).unwrap()));
    }
}
