//! Isle of Man, derived from the United Kingdom catalog.

use crate::countries::unitedkingdom::{
    easter_monday,
    late_summer_bank_holiday,
    tt_bank_holiday,
    tynwald_day,
    united_kingdom
};
use crate::time::calendar::holidaycatalog::{HolidayCatalog, HolidayCatalogBuilder};
use crate::time::holidayerror::HolidayError;

pub const COUNTRY: &str = "IM";

/// UK rules observed island-wide, without the Scottish and Northern Irish
/// holidays, plus TT Bank Holiday and Tynwald Day.
pub fn isle_of_man() -> Result<HolidayCatalog, HolidayError> {
    HolidayCatalogBuilder::from_base(&united_kingdom()?, COUNTRY)
        .subdivisions([COUNTRY])
        .without_deprecated_subdivisions()
        .remove_rule("New Year Holiday")
        .remove_rule("St. Patrick's Day")
        .remove_rule("Battle of the Boyne")
        .remove_rule("Summer Bank Holiday")
        .remove_rule("St. Andrew's Day")
        .replace_rule(easter_monday())
        .replace_rule(late_summer_bank_holiday()?)
        .replace_rule(tt_bank_holiday()?)
        .replace_rule(tynwald_day()?)
        .build()
}
