use std::cell::{RefCell, RefMut};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use serde_json;
use tracing::{debug, info};

use crate::manager::manager::IManager;
use crate::manager::managererror::{ManagerError, parse_json_value};
use crate::time::calendar::holidaycatalog::{
    DeprecatedSubdivision,
    HolidayCatalog,
    HolidayCatalogBuilder
};
use crate::time::calendar::holidayrule::{HolidayRule, SubdivisionVariant, YearRange};
use crate::time::calendar::specialoccasion::SpecialOccasion;
use crate::time::recurringholiday::observedpolicy::ObservedPolicy;
use crate::time::recurringholiday::recurringholidayloader::{
    CustomHolidayRegistry,
    get_recurring_holiday_from_json
};

// ─────────────────────────────────────────────────────────────────────────────
// Rules
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SubdivisionVariantJsonProp {
    subdivisions: Vec<String>,
    #[serde(default)]
    name: Option<String>,
    holiday: serde_json::Value
}

#[derive(Deserialize)]
struct HolidayRuleJsonProp {
    name: String,
    #[serde(default)]
    subdivisions: Option<Vec<String>>,
    #[serde(default)]
    years: YearRange,
    #[serde(default)]
    year_overrides: BTreeMap<i32, NaiveDate>,
    #[serde(default)]
    observed: ObservedPolicy,
    #[serde(default)]
    variants: Vec<SubdivisionVariantJsonProp>
}

/// Parses one rule. The date strategy fields (`holiday_type`, ...) sit next
/// to the rule fields in the same object.
pub fn holiday_rule_from_json(json: serde_json::Value, registry: &CustomHolidayRegistry) -> Result<HolidayRule, ManagerError> {
    let json_prop: HolidayRuleJsonProp = parse_json_value(json.clone())?;
    let strategy = get_recurring_holiday_from_json(json, registry)?;

    let mut rule = HolidayRule::new(json_prop.name, strategy)
        .years(json_prop.years)
        .observed(json_prop.observed);
    if let Some(subdivisions) = json_prop.subdivisions {
        rule = rule.only_in(subdivisions);
    }
    for (year, d) in json_prop.year_overrides {
        rule = rule.with_override(year, d);
    }
    for variant in json_prop.variants {
        let strategy = get_recurring_holiday_from_json(variant.holiday, registry)?;
        rule = rule.with_variant(SubdivisionVariant::new(variant.subdivisions, variant.name, strategy));
    }
    Ok(rule)
}

fn holiday_rules_from_json(json_vec: Vec<serde_json::Value>, registry: &CustomHolidayRegistry) -> Result<Vec<HolidayRule>, ManagerError> {
    json_vec.into_iter()
        .map(|json| holiday_rule_from_json(json, registry))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalogs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CatalogTypedObject {
    name: String,
    #[serde(default)]
    base: Option<String>
}

#[derive(Deserialize)]
struct HolidayCatalogJsonProp {
    subdivisions: Vec<String>,
    #[serde(default)]
    default_subdivision: Option<String>,
    #[serde(default)]
    deprecated_subdivisions: Vec<DeprecatedSubdivision>,
    #[serde(default)]
    weekends: Option<HashSet<Weekday>>,
    #[serde(default)]
    rules: Vec<serde_json::Value>,
    #[serde(default)]
    special_occasions: Vec<SpecialOccasion>
}

#[derive(Deserialize)]
struct ComposedCatalogJsonProp {
    #[serde(default)]
    subdivisions: Option<Vec<String>>,
    #[serde(default)]
    default_subdivision: Option<String>,
    #[serde(default)]
    deprecated_subdivisions: Option<Vec<DeprecatedSubdivision>>,
    #[serde(default)]
    weekends: Option<HashSet<Weekday>>,
    #[serde(default)]
    remove: Vec<String>,
    #[serde(default)]
    replace: Vec<serde_json::Value>,
    #[serde(default)]
    add: Vec<serde_json::Value>,
    #[serde(default)]
    special_occasions: Vec<SpecialOccasion>
}

fn with_deprecated_subdivisions(mut builder: HolidayCatalogBuilder, deprecated: Vec<DeprecatedSubdivision>) -> HolidayCatalogBuilder {
    for d in deprecated {
        builder = builder.deprecated_subdivision(d.code(), d.message());
    }
    builder
}

fn with_special_occasions(mut builder: HolidayCatalogBuilder, occasions: Vec<SpecialOccasion>) -> HolidayCatalogBuilder {
    for occasion in occasions {
        builder = builder.add_special_occasion(occasion);
    }
    builder
}

fn holiday_catalog_from_json(name: &str, json_value: serde_json::Value, registry: &CustomHolidayRegistry) -> Result<HolidayCatalog, ManagerError> {
    let json_prop: HolidayCatalogJsonProp = parse_json_value(json_value)?;

    let mut builder = HolidayCatalog::builder(name).subdivisions(json_prop.subdivisions);
    if let Some(default) = json_prop.default_subdivision {
        builder = builder.default_subdivision(default);
    }
    if let Some(weekends) = json_prop.weekends {
        builder = builder.weekends(&weekends);
    }
    builder = with_deprecated_subdivisions(builder, json_prop.deprecated_subdivisions);
    for rule in holiday_rules_from_json(json_prop.rules, registry)? {
        builder = builder.add_rule(rule);
    }
    builder = with_special_occasions(builder, json_prop.special_occasions);
    Ok(builder.build()?)
}

fn composed_catalog_from_json(name: &str,
                              base: &HolidayCatalog,
                              json_value: serde_json::Value,
                              registry: &CustomHolidayRegistry) -> Result<HolidayCatalog, ManagerError> {
    let json_prop: ComposedCatalogJsonProp = parse_json_value(json_value)?;

    let mut builder = HolidayCatalogBuilder::from_base(base, name);
    if let Some(subdivisions) = json_prop.subdivisions {
        builder = builder.subdivisions(subdivisions);
    }
    if let Some(default) = json_prop.default_subdivision {
        builder = builder.default_subdivision(default);
    }
    if let Some(weekends) = json_prop.weekends {
        builder = builder.weekends(&weekends);
    }
    if let Some(deprecated) = json_prop.deprecated_subdivisions {
        builder = with_deprecated_subdivisions(builder.without_deprecated_subdivisions(), deprecated);
    }
    for rule_name in json_prop.remove.iter() {
        builder = builder.remove_rule(rule_name);
    }
    for rule in holiday_rules_from_json(json_prop.replace, registry)? {
        builder = builder.replace_rule(rule);
    }
    for rule in holiday_rules_from_json(json_prop.add, registry)? {
        builder = builder.add_rule(rule);
    }
    builder = with_special_occasions(builder, json_prop.special_occasions);
    Ok(builder.build()?)
}

// ─────────────────────────────────────────────────────────────────────────────
// HolidayCatalogManager
// ─────────────────────────────────────────────────────────────────────────────

/// Registry of named catalogs.
///
/// A composed catalog (one with a `base`) needs its base loaded first, but the
/// JSON array may list it earlier. `insert_obj_from_json_vec` therefore keeps
/// retrying the failed entries until every entry is loaded or a whole round
/// makes no progress, in which case the last error is returned.
#[derive(Default)]
pub struct HolidayCatalogManager {
    map_cell: RefCell<HashMap<String, Arc<HolidayCatalog>>>
}

impl HolidayCatalogManager {
    pub fn new() -> HolidayCatalogManager {
        HolidayCatalogManager::default()
    }

    pub fn insert(&self, name: impl Into<String>, catalog: Arc<HolidayCatalog>) {
        self.map().insert(name.into(), catalog);
    }
}

impl IManager<Arc<HolidayCatalog>, CustomHolidayRegistry> for HolidayCatalogManager {
    fn map(&self) -> RefMut<'_, HashMap<String, Arc<HolidayCatalog>>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self,
                            json_value: serde_json::Value,
                            supports: &CustomHolidayRegistry) -> Result<(), ManagerError> {
        let typed_obj: CatalogTypedObject = parse_json_value(json_value.clone())?;

        let catalog = match typed_obj.base {
            None => holiday_catalog_from_json(&typed_obj.name, json_value, supports)?,
            Some(base_name) => {
                // missing base → Err → retried in the next round
                let base = self.get(&base_name)?;
                composed_catalog_from_json(&typed_obj.name, &base, json_value, supports)?
            }
        };

        info!(
            catalog = %typed_obj.name,
            rules = catalog.rules().len(),
            subdivisions = catalog.subdivisions().len(),
            "loaded holiday catalog"
        );
        self.insert(typed_obj.name, Arc::new(catalog));
        Ok(())
    }

    fn insert_obj_from_json_vec(&self,
                                json_vec: &[serde_json::Value],
                                supports: &CustomHolidayRegistry) -> Result<(), ManagerError> {
        let mut remain_indices: Vec<usize> = (0..json_vec.len()).collect();
        let mut result: Result<(), ManagerError> = Ok(());

        loop {
            let mut new_remain_indices: Vec<usize> = Vec::new();

            for &index in remain_indices.iter() {
                if let Err(error) = self.insert_obj_from_json(json_vec[index].clone(), supports) {
                    debug!(index, %error, "catalog not loaded, will retry");
                    result = Err(error);
                    new_remain_indices.push(index);
                }
            }

            if new_remain_indices.is_empty() {
                return Ok(());
            }
            if remain_indices == new_remain_indices {
                return result;
            }

            remain_indices = new_remain_indices;
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rule_fields_and_strategy_share_one_object() {
        let json = json!({
            "name": "Spring Bank Holiday",
            "holiday_type": "NthWeekday",
            "month": 5,
            "occurrence": "Last",
            "weekday": "Mon",
            "years": {"from": 1971},
            "year_overrides": {"2022": "2022-06-02"},
            "observed": {"policy": "None"}
        });
        let rule = holiday_rule_from_json(json, &CustomHolidayRegistry::new()).unwrap();
        assert_eq!(rule.name(), "Spring Bank Holiday");
        assert_eq!(rule.year_range(), YearRange::new(Some(1971), None));
        assert_eq!(rule.default_date(2022).unwrap(), Some(ymd(2022, 6, 2)));
        assert_eq!(rule.default_date(2023).unwrap(), Some(ymd(2023, 5, 29)));
        assert_eq!(rule.observed_policy(), ObservedPolicy::None);
    }

    #[test]
    fn composed_catalog_declared_before_its_base() {
        let catalogs = json!([
            {
                "name": "Derived",
                "base": "Base",
                "subdivisions": ["DD"],
                "remove": ["Regional"],
                "add": [{"name": "Extra", "holiday_type": "FixedDate", "month": 6, "day": 1}]
            },
            {
                "name": "Base",
                "subdivisions": ["BB", "North"],
                "rules": [
                    {"name": "National", "holiday_type": "FixedDate", "month": 1, "day": 1},
                    {"name": "Regional", "subdivisions": ["North"], "holiday_type": "FixedDate", "month": 2, "day": 1}
                ]
            }
        ]);
        let manager = HolidayCatalogManager::new();
        manager.insert_from_json_value(catalogs, &CustomHolidayRegistry::new()).unwrap();

        let derived = manager.get("Derived").unwrap();
        let names: Vec<&str> = derived.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["National", "Extra"]);
        assert_eq!(manager.names(), ["Base", "Derived"]);
    }

    #[test]
    fn missing_base_is_reported() {
        let catalogs = json!([{"name": "Orphan", "base": "Nowhere"}]);
        let manager = HolidayCatalogManager::new();
        let result = manager.insert_from_json_value(catalogs, &CustomHolidayRegistry::new());
        assert!(matches!(result, Err(ManagerError::NameNotFoundError(name)) if name == "Nowhere"));
    }

    #[test]
    fn invalid_catalog_is_reported() {
        let catalog = json!({
            "name": "Broken",
            "subdivisions": ["BB"],
            "rules": [{"name": "Ghost", "subdivisions": ["Elsewhere"], "holiday_type": "FixedDate", "month": 1, "day": 1}]
        });
        let manager = HolidayCatalogManager::new();
        let result = manager.insert_from_json_value(catalog, &CustomHolidayRegistry::new());
        assert!(matches!(result, Err(ManagerError::HolidayError(_))));
    }
}
