use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A one-off named holiday, added regardless of subdivision and never shifted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialOccasion {
    date: NaiveDate,
    name: String
}

impl SpecialOccasion {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> SpecialOccasion {
        SpecialOccasion { date, name: name.into() }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Special occasions grouped by year, kept in declaration order within a year.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecialOccasionTable {
    by_year: BTreeMap<i32, Vec<SpecialOccasion>>
}

impl SpecialOccasionTable {
    pub fn new() -> SpecialOccasionTable {
        SpecialOccasionTable::default()
    }

    pub fn insert(&mut self, occasion: SpecialOccasion) {
        self.by_year.entry(occasion.date.year()).or_default().push(occasion);
    }

    pub fn for_year(&self, year: i32) -> &[SpecialOccasion] {
        self.by_year.get(&year).map_or(&[], |v| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecialOccasion> {
        self.by_year.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_year.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}

impl FromIterator<SpecialOccasion> for SpecialOccasionTable {
    fn from_iter<T: IntoIterator<Item = SpecialOccasion>>(iter: T) -> Self {
        let mut table = SpecialOccasionTable::new();
        for occasion in iter {
            table.insert(occasion);
        }
        table
    }
}
