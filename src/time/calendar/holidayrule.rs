use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::holidayerror::HolidayError;
use crate::time::recurringholiday::observedpolicy::ObservedPolicy;
use crate::time::recurringholiday::recurringholiday::RecurringHoliday;

/// Inclusive range of years in which a rule fires; `None` is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    #[serde(default)]
    from: Option<i32>,
    #[serde(default)]
    to: Option<i32>
}

impl YearRange {
    pub fn new(from: Option<i32>, to: Option<i32>) -> YearRange {
        YearRange { from, to }
    }

    pub fn from(&self) -> Option<i32> {
        self.from
    }

    pub fn to(&self) -> Option<i32> {
        self.to
    }

    #[inline]
    pub fn contains(&self, year: i32) -> bool {
        self.from.is_none_or(|from| from <= year) && self.to.is_none_or(|to| year <= to)
    }
}

/// Subdivisions in which a rule applies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applicability {
    All,
    Only(Vec<String>)
}

impl Applicability {
    pub fn contains(&self, subdivision: &str) -> bool {
        match self {
            Applicability::All => true,
            Applicability::Only(subdivisions) => subdivisions.iter().any(|s| s == subdivision)
        }
    }

    pub fn subdivisions(&self) -> Option<&[String]> {
        match self {
            Applicability::All => None,
            Applicability::Only(subdivisions) => Some(subdivisions)
        }
    }
}

/// Replaces a rule's date strategy (and optionally its name) inside a set of
/// subdivisions.
#[derive(Clone, Debug)]
pub struct SubdivisionVariant {
    subdivisions: Vec<String>,
    name: Option<String>,
    strategy: Arc<dyn RecurringHoliday>
}

impl SubdivisionVariant {
    pub fn new<S: Into<String>>(
        subdivisions: impl IntoIterator<Item = S>,
        name: Option<String>,
        strategy: Arc<dyn RecurringHoliday>
    ) -> SubdivisionVariant {
        SubdivisionVariant {
            subdivisions: subdivisions.into_iter().map(Into::into).collect(),
            name,
            strategy
        }
    }

    pub fn subdivisions(&self) -> &[String] {
        &self.subdivisions
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn strategy(&self) -> &Arc<dyn RecurringHoliday> {
        &self.strategy
    }
}

/// One entry of a catalog's ordered rule set.
#[derive(Clone, Debug)]
pub struct HolidayRule {
    name: String,
    applicability: Applicability,
    years: YearRange,
    strategy: Arc<dyn RecurringHoliday>,
    year_overrides: BTreeMap<i32, NaiveDate>,
    observed: ObservedPolicy,
    variants: Vec<SubdivisionVariant>
}

impl HolidayRule {
    pub fn new(name: impl Into<String>, strategy: Arc<dyn RecurringHoliday>) -> HolidayRule {
        HolidayRule {
            name: name.into(),
            applicability: Applicability::All,
            years: YearRange::default(),
            strategy,
            year_overrides: BTreeMap::new(),
            observed: ObservedPolicy::None,
            variants: Vec::new()
        }
    }

    pub fn only_in<S: Into<String>>(mut self, subdivisions: impl IntoIterator<Item = S>) -> HolidayRule {
        self.applicability = Applicability::Only(subdivisions.into_iter().map(Into::into).collect());
        self
    }

    pub fn years(mut self, years: YearRange) -> HolidayRule {
        self.years = years;
        self
    }

    pub fn since(self, year: i32) -> HolidayRule {
        let to = self.years.to;
        self.years(YearRange::new(Some(year), to))
    }

    pub fn with_override(mut self, year: i32, d: NaiveDate) -> HolidayRule {
        self.year_overrides.insert(year, d);
        self
    }

    pub fn observed(mut self, policy: ObservedPolicy) -> HolidayRule {
        self.observed = policy;
        self
    }

    pub fn with_variant(mut self, variant: SubdivisionVariant) -> HolidayRule {
        self.variants.push(variant);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    pub fn year_range(&self) -> YearRange {
        self.years
    }

    pub fn year_overrides(&self) -> &BTreeMap<i32, NaiveDate> {
        &self.year_overrides
    }

    pub fn observed_policy(&self) -> ObservedPolicy {
        self.observed
    }

    pub fn variants(&self) -> &[SubdivisionVariant] {
        &self.variants
    }

    /// Whether the rule fires in `year` for `subdivision`.
    pub fn applies(&self, year: i32, subdivision: &str) -> bool {
        self.years.contains(year) && self.applicability.contains(subdivision)
    }

    /// Variant owning `subdivision`, if any.
    pub fn variant_for(&self, subdivision: &str) -> Option<&SubdivisionVariant> {
        self.variants.iter().find(|v| v.subdivisions.iter().any(|s| s == subdivision))
    }

    /// Default date of the rule in `year`; a per-year override wins over the strategy.
    pub fn default_date(&self, year: i32) -> Result<Option<NaiveDate>, HolidayError> {
        match self.year_overrides.get(&year) {
            Some(&d) => Ok(Some(d)),
            None => self.strategy.get_holiday(year)
        }
    }

    /// Subdivisions named anywhere in the rule.
    pub(crate) fn referenced_subdivisions(&self) -> impl Iterator<Item = &String> {
        self.applicability.subdivisions().unwrap_or(&[]).iter()
            .chain(self.variants.iter().flat_map(|v| v.subdivisions.iter()))
    }
}
