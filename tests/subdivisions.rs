use std::collections::BTreeSet;

use chrono::NaiveDate;
use proptest::prelude::*;

use holidaycalc::countries::unitedkingdom::{UK, united_kingdom};
use holidaycalc::time::calendar::holidayengine::holidays_for_year;

/// Splits "Name [A/B]" into ("Name", ["A", "B"]).
fn qualified(name: &str) -> Option<(&str, Vec<&str>)> {
    let (base, rest) = name.split_once(" [")?;
    let (owners, _) = rest.split_once(']')?;
    Some((base, owners.split('/').collect()))
}

proptest! {
    #[test]
    fn national_view_is_union_of_regions(year in 1583i32..2100, observed in any::<bool>()) {
        let catalog = united_kingdom().unwrap();
        let national = holidays_for_year(&catalog, year, UK, observed).unwrap();

        let mut union: BTreeSet<NaiveDate> = BTreeSet::new();
        for region in catalog.regions() {
            let holidays = holidays_for_year(&catalog, year, region, observed).unwrap();
            prop_assert!(holidays.iter().all(|(_, name)| !name.contains(" [")));
            union.extend(holidays.dates().copied());
        }
        let national_dates: BTreeSet<NaiveDate> = national.dates().copied().collect();
        prop_assert_eq!(national_dates, union);
    }

    #[test]
    fn qualifiers_name_the_owning_regions(year in 1583i32..2100) {
        let catalog = united_kingdom().unwrap();
        let national = holidays_for_year(&catalog, year, UK, false).unwrap();

        for (d, name) in national.iter() {
            match qualified(name) {
                Some((base, owners)) => {
                    prop_assert!(owners.len() < catalog.regions().len());
                    for owner in owners {
                        prop_assert!(catalog.regions().iter().any(|r| r == owner));
                        let regional = holidays_for_year(&catalog, year, owner, false).unwrap();
                        prop_assert_eq!(regional.get(d), Some(base));
                    }
                },
                None => {
                    for region in catalog.regions() {
                        let regional = holidays_for_year(&catalog, year, region, false).unwrap();
                        prop_assert_eq!(regional.get(d), Some(name.as_str()));
                    }
                }
            }
        }
    }

    #[test]
    fn repeated_queries_agree(year in 1583i32..2500, observed in any::<bool>()) {
        let catalog = united_kingdom().unwrap();
        for subdivision in catalog.subdivisions() {
            let first = holidays_for_year(&catalog, year, subdivision, observed).unwrap();
            let second = holidays_for_year(&catalog, year, subdivision, observed).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
