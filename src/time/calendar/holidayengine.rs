use chrono::{Datelike, NaiveDate};
use tracing::{debug, trace, warn};

use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::holidaycatalog::HolidayCatalog;
use crate::time::calendar::holidaymap::{Diagnostic, HolidayMap};
use crate::time::calendar::holidayrule::{Applicability, HolidayRule};
use crate::time::holidayerror::HolidayError;

const OBSERVED_SUFFIX: &str = " (Observed)";

/// Evaluates a borrowed catalog. Holds no state between queries.
#[derive(Clone, Copy, Debug)]
pub struct HolidayEngine<'a> {
    catalog: &'a HolidayCatalog
}

/// Date and undecorated name of one rule evaluation.
type Resolved<'r> = (NaiveDate, &'r str);

impl<'a> HolidayEngine<'a> {
    pub fn new(catalog: &'a HolidayCatalog) -> HolidayEngine<'a> {
        HolidayEngine { catalog }
    }

    /// Date and name of `rule` in `year` as seen from `subdivision`, taking
    /// subdivision variants and per-year overrides into account.
    fn resolve<'r>(rule: &'r HolidayRule, year: i32, subdivision: &str) -> Result<Option<Resolved<'r>>, HolidayError> {
        match rule.variant_for(subdivision) {
            Some(variant) => {
                let name = variant.name().unwrap_or(rule.name());
                Ok(variant.strategy().get_holiday(year)?.map(|d| (d, name)))
            },
            None => Ok(rule.default_date(year)?.map(|d| (d, rule.name())))
        }
    }

    /// Entries `rule` contributes to a query on the aggregate code: the union
    /// of every region's result, labelled with the owning regions unless all
    /// regions agree.
    fn aggregate_entries(&self, rule: &HolidayRule, year: i32) -> Result<Vec<(NaiveDate, String)>, HolidayError> {
        let aggregate = self.catalog.aggregate_subdivision();
        let regions = self.catalog.regions();

        if regions.is_empty() {
            if !rule.applicability().contains(aggregate) {
                return Ok(Vec::new());
            }
            return Ok(Self::resolve(rule, year, aggregate)?
                .map(|(d, name)| (d, name.to_owned()))
                .into_iter()
                .collect());
        }

        let covered: Vec<&String> = match rule.applicability() {
            Applicability::Only(list) if !list.iter().any(|s| s == aggregate) => list.iter()
                .filter(|s| regions.contains(s))
                .collect(),
            _ => regions.iter().collect()
        };

        let mut groups: Vec<(NaiveDate, &str, Vec<&str>)> = Vec::new();
        for region in covered {
            if let Some((d, name)) = Self::resolve(rule, year, region)? {
                match groups.iter_mut().find(|(gd, gname, _)| *gd == d && *gname == name) {
                    Some(group) => group.2.push(region),
                    None => groups.push((d, name, vec![region.as_str()]))
                }
            }
        }

        Ok(groups.into_iter()
            .map(|(d, name, owners)| {
                if owners.len() == regions.len() {
                    (d, name.to_owned())
                } else {
                    (d, format!("{} [{}]", name, owners.join("/")))
                }
            })
            .collect())
    }

    fn subdivision_entries(rule: &HolidayRule, year: i32, subdivision: &str) -> Result<Vec<(NaiveDate, String)>, HolidayError> {
        if !rule.applies(year, subdivision) {
            return Ok(Vec::new());
        }
        Ok(Self::resolve(rule, year, subdivision)?
            .map(|(d, name)| (d, name.to_owned()))
            .into_iter()
            .collect())
    }

    /// Inserts a holiday and, when `observed` is set, its substitute day.
    ///
    /// The substitute is computed against the map as it stood before this
    /// holiday was inserted; it is kept only when it stays within the year.
    fn insert_with_observed(&self, holidays: &mut HolidayMap, rule: &HolidayRule, d: NaiveDate, name: String, observed: bool) {
        let substitute = if observed {
            rule.observed_policy()
                .observed_date(d, self.catalog.weekends(), |x| holidays.contains(&x))
                .filter(|x| x.year() == d.year())
        } else {
            None
        };

        trace!(rule = rule.name(), date = %d, name = %name, "holiday");
        if let Some(substitute) = substitute {
            trace!(rule = rule.name(), date = %substitute, "observed substitute");
            let observed_name = format!("{}{}", name, OBSERVED_SUFFIX);
            holidays.insert(d, name);
            holidays.insert(substitute, observed_name);
        } else {
            holidays.insert(d, name);
        }
    }

    pub fn holidays_for_year(&self, year: i32, subdivision: &str, observed: bool) -> Result<HolidayMap, HolidayError> {
        if !self.catalog.accepts(subdivision) {
            return Err(HolidayError::UnknownSubdivision(subdivision.to_owned()));
        }

        let mut holidays = HolidayMap::new(year, subdivision, observed);
        if let Some(deprecation) = self.catalog.deprecation(subdivision) {
            warn!(country = self.catalog.country(), subdivision, "{}", deprecation.message());
            holidays.push_diagnostic(Diagnostic::DeprecatedSubdivision {
                subdivision: subdivision.to_owned(),
                message: deprecation.message().to_owned()
            });
        }

        let is_aggregate = self.catalog.is_aggregate(subdivision);
        for rule in self.catalog.rules().iter().filter(|r| r.year_range().contains(year)) {
            let entries = if is_aggregate {
                self.aggregate_entries(rule, year)?
            } else {
                Self::subdivision_entries(rule, year, subdivision)?
            };
            for (d, name) in entries {
                self.insert_with_observed(&mut holidays, rule, d, name, observed);
            }
        }

        for occasion in self.catalog.special_occasions().for_year(year) {
            holidays.insert(occasion.date(), occasion.name().to_owned());
        }

        debug!(
            country = self.catalog.country(),
            year,
            subdivision,
            observed,
            holidays = holidays.len(),
            "evaluated holiday catalog"
        );
        Ok(holidays)
    }
}

impl<'a> HolidayCalendar for HolidayEngine<'a> {
    fn catalog(&self) -> &HolidayCatalog {
        self.catalog
    }

    fn holidays_for_year(&self, year: i32, subdivision: &str, observed: bool) -> Result<HolidayMap, HolidayError> {
        HolidayEngine::holidays_for_year(self, year, subdivision, observed)
    }
}

pub fn holidays_for_year(catalog: &HolidayCatalog, year: i32, subdivision: &str, observed: bool) -> Result<HolidayMap, HolidayError> {
    HolidayEngine::new(catalog).holidays_for_year(year, subdivision, observed)
}

pub fn is_holiday(catalog: &HolidayCatalog, d: NaiveDate, subdivision: &str, observed: bool) -> Result<Option<String>, HolidayError> {
    HolidayCalendar::is_holiday(&HolidayEngine::new(catalog), d, subdivision, observed)
}

pub fn supported_subdivisions(catalog: &HolidayCatalog) -> &[String] {
    catalog.subdivisions()
}

pub fn default_subdivision(catalog: &HolidayCatalog) -> &str {
    catalog.default_subdivision()
}
