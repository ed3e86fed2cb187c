use std::collections::HashSet;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::calendar::holidayrule::HolidayRule;
use crate::time::calendar::specialoccasion::{SpecialOccasion, SpecialOccasionTable};
use crate::time::holidayerror::HolidayError;
use crate::time::weekendmask::WeekendMask;

/// A legacy subdivision code that is still accepted but reported on every query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeprecatedSubdivision {
    code: String,
    message: String
}

impl DeprecatedSubdivision {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> DeprecatedSubdivision {
        DeprecatedSubdivision { code: code.into(), message: message.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Read-only rule table of one country.
///
/// Built and validated once through [`HolidayCatalogBuilder`]; every query
/// borrows it. The first declared subdivision is the aggregate (national) code.
#[derive(Clone, Debug)]
pub struct HolidayCatalog {
    uuid: Uuid,
    country: String,
    subdivisions: Vec<String>,
    deprecated_subdivisions: Vec<DeprecatedSubdivision>,
    default_subdivision: String,
    weekends: WeekendMask,
    rules: Vec<HolidayRule>,
    special_occasions: SpecialOccasionTable
}

impl HolidayCatalog {
    pub fn builder(country: impl Into<String>) -> HolidayCatalogBuilder {
        HolidayCatalogBuilder::new(country)
    }

    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn aggregate_subdivision(&self) -> &str {
        &self.subdivisions[0]
    }

    /// Every official subdivision code, aggregate first.
    pub fn subdivisions(&self) -> &[String] {
        &self.subdivisions
    }

    /// Official subdivisions other than the aggregate code.
    pub fn regions(&self) -> &[String] {
        &self.subdivisions[1..]
    }

    pub fn deprecated_subdivisions(&self) -> &[DeprecatedSubdivision] {
        &self.deprecated_subdivisions
    }

    pub fn deprecation(&self, subdivision: &str) -> Option<&DeprecatedSubdivision> {
        self.deprecated_subdivisions.iter().find(|d| d.code == subdivision)
    }

    pub fn is_aggregate(&self, subdivision: &str) -> bool {
        self.aggregate_subdivision() == subdivision
    }

    /// Whether `subdivision` may be queried, deprecated aliases included.
    pub fn accepts(&self, subdivision: &str) -> bool {
        self.subdivisions.iter().any(|s| s == subdivision) || self.deprecation(subdivision).is_some()
    }

    pub fn default_subdivision(&self) -> &str {
        &self.default_subdivision
    }

    pub fn weekends(&self) -> &WeekendMask {
        &self.weekends
    }

    pub fn rules(&self) -> &[HolidayRule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&HolidayRule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn special_occasions(&self) -> &SpecialOccasionTable {
        &self.special_occasions
    }
}

/// Builds a [`HolidayCatalog`], either from scratch or by tweaking a base
/// catalog (`from_base` followed by `remove_rule` / `replace_rule` / `add_rule`).
///
/// Authoring errors are collected and reported by [`build`](Self::build).
#[derive(Clone, Debug)]
pub struct HolidayCatalogBuilder {
    country: String,
    subdivisions: Vec<String>,
    deprecated_subdivisions: Vec<DeprecatedSubdivision>,
    default_subdivision: Option<String>,
    weekends: WeekendMask,
    rules: Vec<HolidayRule>,
    special_occasions: SpecialOccasionTable,
    errors: Vec<String>
}

impl HolidayCatalogBuilder {
    pub fn new(country: impl Into<String>) -> HolidayCatalogBuilder {
        HolidayCatalogBuilder {
            country: country.into(),
            subdivisions: Vec::new(),
            deprecated_subdivisions: Vec::new(),
            default_subdivision: None,
            weekends: WeekendMask::default(),
            rules: Vec::new(),
            special_occasions: SpecialOccasionTable::new(),
            errors: Vec::new()
        }
    }

    /// Starts from a copy of `base`: same subdivisions, rules and special occasions.
    pub fn from_base(base: &HolidayCatalog, country: impl Into<String>) -> HolidayCatalogBuilder {
        HolidayCatalogBuilder {
            country: country.into(),
            subdivisions: base.subdivisions.clone(),
            deprecated_subdivisions: base.deprecated_subdivisions.clone(),
            default_subdivision: Some(base.default_subdivision.clone()),
            weekends: base.weekends,
            rules: base.rules.clone(),
            special_occasions: base.special_occasions.clone(),
            errors: Vec::new()
        }
    }

    /// Declares the subdivision codes; the first is the aggregate code.
    pub fn subdivisions<S: Into<String>>(mut self, subdivisions: impl IntoIterator<Item = S>) -> HolidayCatalogBuilder {
        self.subdivisions = subdivisions.into_iter().map(Into::into).collect();
        if let Some(default) = &self.default_subdivision {
            if !self.subdivisions.contains(default) {
                self.default_subdivision = None;
            }
        }
        self
    }

    pub fn deprecated_subdivision(mut self, code: impl Into<String>, message: impl Into<String>) -> HolidayCatalogBuilder {
        self.deprecated_subdivisions.push(DeprecatedSubdivision::new(code, message));
        self
    }

    pub fn without_deprecated_subdivisions(mut self) -> HolidayCatalogBuilder {
        self.deprecated_subdivisions.clear();
        self
    }

    pub fn default_subdivision(mut self, subdivision: impl Into<String>) -> HolidayCatalogBuilder {
        self.default_subdivision = Some(subdivision.into());
        self
    }

    pub fn weekends(mut self, weekends: &HashSet<Weekday>) -> HolidayCatalogBuilder {
        self.weekends = WeekendMask::new(weekends);
        self
    }

    pub fn add_rule(mut self, rule: HolidayRule) -> HolidayCatalogBuilder {
        self.rules.push(rule);
        self
    }

    pub fn remove_rule(mut self, name: &str) -> HolidayCatalogBuilder {
        let before = self.rules.len();
        self.rules.retain(|r| r.name() != name);
        if self.rules.len() == before {
            self.errors.push(format!("cannot remove unknown rule '{}'", name));
        }
        self
    }

    /// Replaces the rule with the same name, keeping its position in the rule order.
    pub fn replace_rule(mut self, rule: HolidayRule) -> HolidayCatalogBuilder {
        match self.rules.iter().position(|r| r.name() == rule.name()) {
            Some(idx) => self.rules[idx] = rule,
            None => self.errors.push(format!("cannot replace unknown rule '{}'", rule.name()))
        }
        self
    }

    pub fn add_special_occasion(mut self, occasion: SpecialOccasion) -> HolidayCatalogBuilder {
        self.special_occasions.insert(occasion);
        self
    }

    pub fn build(self) -> Result<HolidayCatalog, HolidayError> {
        let invalid = |message: String| HolidayError::InvalidCatalog(format!("{}: {}", self.country, message));

        if let Some(error) = self.errors.first() {
            return Err(invalid(error.clone()));
        }
        if self.subdivisions.is_empty() {
            return Err(invalid("no subdivisions declared".to_owned()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for code in self.subdivisions.iter() {
            if !seen.insert(code) {
                return Err(invalid(format!("duplicate subdivision '{}'", code)));
            }
        }
        for deprecated in self.deprecated_subdivisions.iter() {
            if !seen.insert(&deprecated.code) {
                return Err(invalid(format!("deprecated subdivision '{}' declared twice", deprecated.code)));
            }
        }

        let mut rule_names: HashSet<&str> = HashSet::new();
        for rule in self.rules.iter() {
            if !rule_names.insert(rule.name()) {
                return Err(invalid(format!("duplicate rule '{}'", rule.name())));
            }
            if let Some(code) = rule.referenced_subdivisions().find(|s| !seen.contains(s.as_str())) {
                return Err(invalid(format!("rule '{}' names unknown subdivision '{}'", rule.name(), code)));
            }
        }

        let default_subdivision = self.default_subdivision.clone()
            .unwrap_or_else(|| self.subdivisions[0].clone());
        if !self.subdivisions.contains(&default_subdivision) {
            return Err(invalid(format!("default subdivision '{}' is not declared", default_subdivision)));
        }

        Ok(HolidayCatalog {
            uuid: Uuid::new_v4(),
            country: self.country,
            subdivisions: self.subdivisions,
            deprecated_subdivisions: self.deprecated_subdivisions,
            default_subdivision,
            weekends: self.weekends,
            rules: self.rules,
            special_occasions: self.special_occasions
        })
    }
}
