//! United Kingdom bank holidays.
//!
//! Rule order matters: on a date collision the later rule wins. A Monday
//! "New Year Holiday" replaces the observed "New Year's Day" and moves its own
//! substitute to Tuesday.

use std::sync::Arc;

use chrono::{NaiveDate, Weekday};

use crate::time::calendar::holidaycatalog::HolidayCatalog;
use crate::time::calendar::holidayrule::HolidayRule;
use crate::time::calendar::specialoccasion::SpecialOccasion;
use crate::time::holidayerror::HolidayError;
use crate::time::recurringholiday::easterrelatedholiday::{EasterRelatedHoliday, EasterType};
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::nthweekdayholiday::{
    NthWeekdayHoliday,
    Occurrence,
    RelativeWeekdayHoliday,
    WeekdayDirection
};
use crate::time::recurringholiday::observedpolicy::ObservedPolicy;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;

pub const COUNTRY: &str = "GB";
pub const UK: &str = "UK";
pub const ENGLAND: &str = "England";
pub const NORTHERN_IRELAND: &str = "Northern Ireland";
pub const SCOTLAND: &str = "Scotland";
pub const WALES: &str = "Wales";
pub const ISLE_OF_MAN: &str = "Isle of Man";

const ISLE_OF_MAN_DEPRECATION: &str =
    "Isle of Man as a subdivision of GB is deprecated, use country code IM instead.";

const SPECIAL_OCCASIONS: [(i32, u32, u32, &str); 8] = [
    (1977, 6, 7, "Silver Jubilee of Elizabeth II"),
    (1981, 7, 29, "Wedding of Charles and Diana"),
    (1999, 12, 31, "Millennium Celebrations"),
    (2002, 6, 3, "Golden Jubilee of Elizabeth II"),
    (2011, 4, 29, "Wedding of William and Catherine"),
    (2012, 6, 5, "Diamond Jubilee of Elizabeth II"),
    (2022, 6, 3, "Platinum Jubilee of Elizabeth II"),
    (2022, 9, 19, "State Funeral of Queen Elizabeth II"),
];

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, HolidayError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| HolidayError::InvalidCatalog(format!("{}: invalid date {}-{}-{}", COUNTRY, year, month, day)))
}

pub(crate) fn fixed(month: u32, day: u32) -> Result<Arc<dyn RecurringHoliday>, HolidayError> {
    FixedDateHoliday::new(month, day)
        .map(|h| Arc::new(h) as Arc<dyn RecurringHoliday>)
        .ok_or_else(|| HolidayError::InvalidCatalog(format!("{}: invalid fixed date {}-{}", COUNTRY, month, day)))
}

pub(crate) fn nth_monday(month: u32, occurrence: Occurrence) -> Result<Arc<dyn RecurringHoliday>, HolidayError> {
    NthWeekdayHoliday::new(month, occurrence, Weekday::Mon)
        .map(|h| Arc::new(h) as Arc<dyn RecurringHoliday>)
        .ok_or_else(|| HolidayError::InvalidCatalog(format!("{}: invalid weekday rule in month {}", COUNTRY, month)))
}

pub(crate) fn easter_offset(shift_days: i64) -> Arc<dyn RecurringHoliday> {
    Arc::new(EasterRelatedHoliday::new(EasterType::Western, shift_days))
}

pub(crate) fn tt_bank_holiday() -> Result<HolidayRule, HolidayError> {
    // first Friday in June
    let holiday = NthWeekdayHoliday::new(6, Occurrence::Nth(1), Weekday::Fri)
        .ok_or_else(|| HolidayError::InvalidCatalog(format!("{}: invalid TT Bank Holiday", COUNTRY)))?;
    Ok(HolidayRule::new("TT Bank Holiday", Arc::new(holiday)))
}

pub(crate) fn tynwald_day() -> Result<HolidayRule, HolidayError> {
    Ok(HolidayRule::new("Tynwald Day", fixed(7, 5)?))
}

pub(crate) fn easter_monday() -> HolidayRule {
    HolidayRule::new("Easter Monday", easter_offset(1))
}

pub(crate) fn late_summer_bank_holiday() -> Result<HolidayRule, HolidayError> {
    Ok(HolidayRule::new("Late Summer Bank Holiday", nth_monday(8, Occurrence::Last)?).since(1971))
}

/// The GB catalog: aggregate code "UK" plus the four nations, with the
/// legacy "Isle of Man" alias.
pub fn united_kingdom() -> Result<HolidayCatalog, HolidayError> {
    let may_day = RelativeWeekdayHoliday::new(5, 1, Weekday::Mon, WeekdayDirection::OnOrAfter)
        .ok_or_else(|| HolidayError::InvalidCatalog(format!("{}: invalid May Day", COUNTRY)))?;

    let mut builder = HolidayCatalog::builder(COUNTRY)
        .subdivisions([UK, ENGLAND, NORTHERN_IRELAND, SCOTLAND, WALES])
        .deprecated_subdivision(ISLE_OF_MAN, ISLE_OF_MAN_DEPRECATION)
        .default_subdivision(UK)
        .add_rule(
            HolidayRule::new("New Year's Day", fixed(1, 1)?)
                .since(1974)
                .observed(ObservedPolicy::WeekendDeltas { saturday: 2, sunday: 1 })
        )
        .add_rule(
            HolidayRule::new("New Year Holiday", fixed(1, 2)?)
                .only_in([SCOTLAND])
                .observed(ObservedPolicy::weekday_deltas(&[
                    (Weekday::Sat, 2),
                    (Weekday::Sun, 2),
                    (Weekday::Mon, 1)
                ]))
        )
        .add_rule(
            HolidayRule::new("St. Patrick's Day", fixed(3, 17)?)
                .only_in([NORTHERN_IRELAND])
                .observed(ObservedPolicy::NextMonday)
        )
        .add_rule(HolidayRule::new("Battle of the Boyne", fixed(7, 12)?).only_in([NORTHERN_IRELAND]))
        .add_rule(HolidayRule::new("Summer Bank Holiday", nth_monday(8, Occurrence::Nth(1))?).only_in([SCOTLAND]))
        .add_rule(HolidayRule::new("St. Andrew's Day", fixed(11, 30)?).only_in([SCOTLAND]))
        .add_rule(
            HolidayRule::new("Christmas Day", fixed(12, 25)?)
                .observed(ObservedPolicy::WeekendDeltas { saturday: 2, sunday: 2 })
        )
        .add_rule(HolidayRule::new("Good Friday", easter_offset(-2)))
        .add_rule(easter_monday().only_in([ENGLAND, WALES, NORTHERN_IRELAND, ISLE_OF_MAN]))
        .add_rule(
            HolidayRule::new("May Day", Arc::new(may_day))
                .since(1978)
                .with_override(1995, date(1995, 5, 8)?)
                // 75th anniversary of VE Day
                .with_override(2020, date(2020, 5, 8)?)
        )
        .add_rule(
            HolidayRule::new("Spring Bank Holiday", nth_monday(5, Occurrence::Last)?)
                .since(1971)
                .with_override(2012, date(2012, 6, 4)?)
                .with_override(2022, date(2022, 6, 2)?)
        )
        .add_rule(late_summer_bank_holiday()?.only_in([ENGLAND, WALES, NORTHERN_IRELAND, ISLE_OF_MAN]))
        .add_rule(
            HolidayRule::new("Boxing Day", fixed(12, 26)?)
                .observed(ObservedPolicy::WeekendDeltas { saturday: 2, sunday: 2 })
        )
        .add_rule(tt_bank_holiday()?.only_in([ISLE_OF_MAN]))
        .add_rule(tynwald_day()?.only_in([ISLE_OF_MAN]));

    for (year, month, day, name) in SPECIAL_OCCASIONS {
        builder = builder.add_special_occasion(SpecialOccasion::new(date(year, month, day)?, name));
    }

    builder.build()
}
