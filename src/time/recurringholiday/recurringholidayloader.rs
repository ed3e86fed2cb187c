use std::collections::HashMap;
use std::sync::Arc;

use chrono::Weekday;
use serde::Deserialize;
use serde_json;

use crate::manager::managererror::{ManagerError, parse_json_value};
use crate::time::recurringholiday::easterrelatedholiday::{EasterRelatedHoliday, EasterType};
use crate::time::recurringholiday::fixeddateholiday::FixedDateHoliday;
use crate::time::recurringholiday::nthweekdayholiday::{
    NthWeekdayHoliday,
    Occurrence,
    RelativeWeekdayHoliday,
    WeekdayDirection
};
use crate::time::recurringholiday::recurringholiday::{CustomHoliday, RecurringHoliday};

/// Named holiday functions that JSON catalogs may reference with
/// `"holiday_type": "Custom"`.
#[derive(Clone, Default)]
pub struct CustomHolidayRegistry {
    functions: HashMap<String, CustomHoliday>
}

impl CustomHolidayRegistry {
    pub fn new() -> CustomHolidayRegistry {
        CustomHolidayRegistry::default()
    }

    pub fn register(&mut self, holiday: CustomHoliday) {
        self.functions.insert(holiday.name().to_owned(), holiday);
    }

    pub fn get(&self, name: &str) -> Option<CustomHoliday> {
        self.functions.get(name).cloned()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON properties of each holiday type
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FixedDateHolidayJsonProp {
    month: u32,
    day: u32
}

fn fixed_date_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: FixedDateHolidayJsonProp = parse_json_value(json)?;
    let holiday = FixedDateHoliday::new(json_prop.month, json_prop.day)
        .ok_or_else(|| ManagerError::invalid_catalog(format!("invalid fixed date {}-{}", json_prop.month, json_prop.day)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OccurrenceJsonProp {
    Nth(u8),
    Named(Occurrence)
}

#[derive(Deserialize)]
struct NthWeekdayHolidayJsonProp {
    month: u32,
    occurrence: OccurrenceJsonProp,
    weekday: Weekday,
}

fn nth_weekday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: NthWeekdayHolidayJsonProp = parse_json_value(json)?;
    let occurrence = match json_prop.occurrence {
        OccurrenceJsonProp::Nth(n) => Occurrence::Nth(n),
        OccurrenceJsonProp::Named(occurrence) => occurrence
    };
    let holiday = NthWeekdayHoliday::new(json_prop.month, occurrence, json_prop.weekday)
        .ok_or_else(|| ManagerError::invalid_catalog(format!("invalid {} {} of month {}", occurrence, json_prop.weekday, json_prop.month)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
struct RelativeWeekdayHolidayJsonProp {
    month: u32,
    day: u32,
    weekday: Weekday
}

fn relative_weekday_from_json(json: serde_json::Value, direction: WeekdayDirection) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: RelativeWeekdayHolidayJsonProp = parse_json_value(json)?;
    let holiday = RelativeWeekdayHoliday::new(json_prop.month, json_prop.day, json_prop.weekday, direction)
        .ok_or_else(|| ManagerError::invalid_catalog(format!("invalid anchor date {}-{}", json_prop.month, json_prop.day)))?;
    Ok(Arc::new(holiday))
}

fn default_easter_type() -> EasterType {
    EasterType::Western
}

#[derive(Deserialize)]
struct EasterRelatedHolidayJsonProp {
    #[serde(default = "default_easter_type")]
    easter_type: EasterType,
    shift_days: i64
}

fn easter_related_holiday_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: EasterRelatedHolidayJsonProp = parse_json_value(json)?;
    Ok(Arc::new(EasterRelatedHoliday::new(json_prop.easter_type, json_prop.shift_days)))
}

#[derive(Deserialize)]
struct CustomHolidayJsonProp {
    function: String
}

fn custom_holiday_from_json(json: serde_json::Value, registry: &CustomHolidayRegistry) -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let json_prop: CustomHolidayJsonProp = parse_json_value(json)?;
    let holiday = registry.get(&json_prop.function)
        .ok_or_else(|| ManagerError::invalid_catalog(format!("custom holiday function '{}' is not registered", json_prop.function)))?;
    Ok(Arc::new(holiday))
}

#[derive(Deserialize)]
enum HolidayType {
    FixedDate,
    NthWeekday,
    WeekdayOnOrAfter,
    WeekdayOnOrBefore,
    EasterRelated,
    Custom
}

#[derive(Deserialize)]
struct HolidayTypedObject {
    holiday_type: HolidayType
}

pub fn get_recurring_holiday_from_json(json: serde_json::Value, registry: &CustomHolidayRegistry)
    -> Result<Arc<dyn RecurringHoliday>, ManagerError> {
    let holiday_type_obj: HolidayTypedObject = parse_json_value(json.clone())?;
    match holiday_type_obj.holiday_type {
        HolidayType::FixedDate         => fixed_date_holiday_from_json(json),
        HolidayType::NthWeekday        => nth_weekday_from_json(json),
        HolidayType::WeekdayOnOrAfter  => relative_weekday_from_json(json, WeekdayDirection::OnOrAfter),
        HolidayType::WeekdayOnOrBefore => relative_weekday_from_json(json, WeekdayDirection::OnOrBefore),
        HolidayType::EasterRelated     => easter_related_holiday_from_json(json),
        HolidayType::Custom            => custom_holiday_from_json(json, registry)
    }
}
