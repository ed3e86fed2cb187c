use std::collections::BTreeMap;
use std::collections::btree_map;

use chrono::NaiveDate;

/// Non-fatal notice attached to a query result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    DeprecatedSubdivision {
        subdivision: String,
        message: String
    }
}

/// Holidays of one (year, subdivision) query, ordered by date.
///
/// Built by the engine, immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayMap {
    year: i32,
    subdivision: String,
    observed: bool,
    holidays: BTreeMap<NaiveDate, String>,
    diagnostics: Vec<Diagnostic>
}

impl HolidayMap {
    pub(crate) fn new(year: i32, subdivision: &str, observed: bool) -> HolidayMap {
        HolidayMap {
            year,
            subdivision: subdivision.to_owned(),
            observed,
            holidays: BTreeMap::new(),
            diagnostics: Vec::new()
        }
    }

    /// Last write wins on a date collision.
    pub(crate) fn insert(&mut self, d: NaiveDate, name: String) {
        self.holidays.insert(d, name);
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn subdivision(&self) -> &str {
        &self.subdivision
    }

    pub fn observed(&self) -> bool {
        self.observed
    }

    pub fn get(&self, d: &NaiveDate) -> Option<&str> {
        self.holidays.get(d).map(String::as_str)
    }

    pub fn contains(&self, d: &NaiveDate) -> bool {
        self.holidays.contains_key(d)
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, NaiveDate, String> {
        self.holidays.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.holidays.keys()
    }

    /// Dates holding `name`, exact match.
    pub fn dates_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NaiveDate> + 'a {
        self.holidays.iter().filter(move |(_, n)| n.as_str() == name).map(|(d, _)| *d)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn as_map(&self) -> &BTreeMap<NaiveDate, String> {
        &self.holidays
    }
}

impl<'a> IntoIterator for &'a HolidayMap {
    type Item = (&'a NaiveDate, &'a String);
    type IntoIter = btree_map::Iter<'a, NaiveDate, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.holidays.iter()
    }
}
