use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::super::utility::{shift_days, ONE_DAY};
use super::super::weekendmask::WeekendMask;
use super::nthweekdayholiday::weekday_on_or_after;

// A substitute day search never needs to look further than two weeks ahead.
const MAX_SEARCH_DAYS: usize = 14;

/// Where the "(Observed)" substitute of a holiday lands when the holiday
/// itself falls on a weekend. Each rule declares its own policy.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "policy")]
pub enum ObservedPolicy {
    #[default]
    None,
    /// Weekend dates move to the following Monday (Saturday +2, Sunday +1).
    NextMonday,
    /// Saturday and Sunday each move by their own fixed number of days.
    WeekendDeltas {
        saturday: i64,
        sunday: i64
    },
    /// Weekend dates, and dates already taken by an earlier holiday, move to
    /// the next weekday not already holding a holiday.
    NextFreeWeekday,
    /// Each weekday moves by its own number of days, Monday first; zero means
    /// no substitute. The weekend set is not consulted.
    WeekdayDeltas {
        deltas: [i64; 7]
    }
}

impl ObservedPolicy {
    pub fn is_none(&self) -> bool {
        *self == ObservedPolicy::None
    }

    /// [`ObservedPolicy::WeekdayDeltas`] from `(weekday, delta)` pairs; unlisted days stay put.
    pub fn weekday_deltas(shifts: &[(Weekday, i64)]) -> ObservedPolicy {
        let mut deltas = [0; 7];
        for &(weekday, delta) in shifts {
            deltas[weekday.num_days_from_monday() as usize] = delta;
        }
        ObservedPolicy::WeekdayDeltas { deltas }
    }

    /// Substitute date for a holiday falling on `raw`.
    ///
    /// `occupied` reports whether a date already holds a holiday evaluated
    /// earlier in the same year; it is only consulted by
    /// [`ObservedPolicy::NextFreeWeekday`].
    pub fn observed_date<F>(&self, raw: NaiveDate, weekends: &WeekendMask, occupied: F) -> Option<NaiveDate>
        where F: Fn(NaiveDate) -> bool {
        let on_weekend = weekends.is_weekend_date(raw);
        match *self {
            ObservedPolicy::None => None,
            ObservedPolicy::NextMonday => {
                if !on_weekend {
                    return None;
                }
                raw.checked_add_days(ONE_DAY)
                    .and_then(|d| weekday_on_or_after(d, Weekday::Mon))
            },
            ObservedPolicy::WeekendDeltas { saturday, sunday } => {
                if !on_weekend {
                    return None;
                }
                let delta = match raw.weekday() {
                    Weekday::Sat => saturday,
                    Weekday::Sun => sunday,
                    _ => 0
                };
                if delta == 0 {
                    None
                } else {
                    shift_days(raw, delta)
                }
            },
            ObservedPolicy::NextFreeWeekday => {
                if !on_weekend && !occupied(raw) {
                    return None;
                }
                raw.iter_days()
                    .skip(1)
                    .take(MAX_SEARCH_DAYS)
                    .find(|&d| !weekends.is_weekend_date(d) && !occupied(d))
            },
            ObservedPolicy::WeekdayDeltas { deltas } => {
                match deltas[raw.weekday().num_days_from_monday() as usize] {
                    0 => None,
                    delta => shift_days(raw, delta)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn nothing_taken(_: NaiveDate) -> bool {
        false
    }

    #[test]
    fn next_monday_from_saturday_and_sunday() {
        let weekends = WeekendMask::default();
        let policy = ObservedPolicy::NextMonday;
        // 2022-01-01 Saturday, 2023-01-01 Sunday, 2024-01-01 Monday
        assert_eq!(policy.observed_date(ymd(2022, 1, 1), &weekends, nothing_taken), Some(ymd(2022, 1, 3)));
        assert_eq!(policy.observed_date(ymd(2023, 1, 1), &weekends, nothing_taken), Some(ymd(2023, 1, 2)));
        assert_eq!(policy.observed_date(ymd(2024, 1, 1), &weekends, nothing_taken), None);
    }

    #[test]
    fn weekend_deltas_are_independent() {
        let weekends = WeekendMask::default();
        let policy = ObservedPolicy::WeekendDeltas { saturday: 2, sunday: 2 };
        // Christmas 2021 Saturday, 2022 Sunday
        assert_eq!(policy.observed_date(ymd(2021, 12, 25), &weekends, nothing_taken), Some(ymd(2021, 12, 27)));
        assert_eq!(policy.observed_date(ymd(2022, 12, 25), &weekends, nothing_taken), Some(ymd(2022, 12, 27)));
        assert_eq!(policy.observed_date(ymd(2023, 12, 25), &weekends, nothing_taken), None);
    }

    #[test]
    fn next_free_weekday_skips_taken_dates() {
        let weekends = WeekendMask::default();
        let policy = ObservedPolicy::NextFreeWeekday;
        // 2022-01-02 Sunday, Monday 3rd already holds New Year's Day (Observed)
        let taken = HashSet::from([ymd(2022, 1, 1), ymd(2022, 1, 3)]);
        assert_eq!(policy.observed_date(ymd(2022, 1, 2), &weekends, |d| taken.contains(&d)), Some(ymd(2022, 1, 4)));
        // 2021-01-02 Saturday, nothing on Monday 4th
        assert_eq!(policy.observed_date(ymd(2021, 1, 2), &weekends, nothing_taken), Some(ymd(2021, 1, 4)));
        // 2023-01-02 Monday already taken, moves to Tuesday
        let taken = HashSet::from([ymd(2023, 1, 1), ymd(2023, 1, 2)]);
        assert_eq!(policy.observed_date(ymd(2023, 1, 2), &weekends, |d| taken.contains(&d)), Some(ymd(2023, 1, 3)));
        // free weekday: nothing to do
        assert_eq!(policy.observed_date(ymd(2024, 1, 2), &weekends, nothing_taken), None);
    }

    #[test]
    fn weekday_deltas_ignore_taken_dates() {
        let weekends = WeekendMask::default();
        let policy = ObservedPolicy::weekday_deltas(&[(Weekday::Sat, 2), (Weekday::Sun, 2), (Weekday::Mon, 1)]);
        let everything_taken = |_: NaiveDate| true;
        // 1972-01-02 Sunday, 1967-01-02 Monday, 1971-01-02 Saturday, 1973-01-02 Tuesday
        assert_eq!(policy.observed_date(ymd(1972, 1, 2), &weekends, nothing_taken), Some(ymd(1972, 1, 4)));
        assert_eq!(policy.observed_date(ymd(1967, 1, 2), &weekends, nothing_taken), Some(ymd(1967, 1, 3)));
        assert_eq!(policy.observed_date(ymd(1971, 1, 2), &weekends, nothing_taken), Some(ymd(1971, 1, 4)));
        assert_eq!(policy.observed_date(ymd(1973, 1, 2), &weekends, everything_taken), None);
        assert_eq!(policy.observed_date(ymd(1972, 1, 2), &weekends, everything_taken), Some(ymd(1972, 1, 4)));
    }

    #[test]
    fn custom_weekend_set() {
        let weekends = WeekendMask::new(&HashSet::from([Weekday::Fri, Weekday::Sat]));
        // 2023-06-02 is a Friday
        let policy = ObservedPolicy::NextFreeWeekday;
        assert_eq!(policy.observed_date(ymd(2023, 6, 2), &weekends, nothing_taken), Some(ymd(2023, 6, 4)));
        assert_eq!(ObservedPolicy::None.observed_date(ymd(2023, 6, 2), &weekends, nothing_taken), None);
    }

    #[test]
    fn policy_json_shape() {
        let policy: ObservedPolicy =
            serde_json::from_str(r#"{"policy": "WeekendDeltas", "saturday": 2, "sunday": 1}"#).unwrap();
        assert_eq!(policy, ObservedPolicy::WeekendDeltas { saturday: 2, sunday: 1 });
        let policy: ObservedPolicy = serde_json::from_str(r#"{"policy": "NextMonday"}"#).unwrap();
        assert_eq!(policy, ObservedPolicy::NextMonday);
        let policy: ObservedPolicy =
            serde_json::from_str(r#"{"policy": "WeekdayDeltas", "deltas": [1, 0, 0, 0, 0, 2, 2]}"#).unwrap();
        assert_eq!(policy, ObservedPolicy::weekday_deltas(&[(Weekday::Mon, 1), (Weekday::Sat, 2), (Weekday::Sun, 2)]));
    }
}
