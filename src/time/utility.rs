use chrono::{Days, NaiveDate};

pub const ONE_DAY: Days = Days::new(1);

#[inline]
pub const fn is_leap(year: i32) -> bool {
    ((year % 4 == 0) && (year % 100 != 0)) || (year % 400 == 0)
}

/// Number of days in `month` of `year`, or `None` for a month outside 1..=12.
pub const fn days_of_month(year: i32, month: u32) -> Option<u32> {
    const NO_LEAP_EOM: [u32; 13] = [
        0, 31, 28, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    const LEAP_EOM: [u32; 13] = [
        0, 31, 29, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    if month == 0 || month > 12 {
        return None;
    }

    if is_leap(year) {
        Some(LEAP_EOM[month as usize])
    } else {
        Some(NO_LEAP_EOM[month as usize])
    }
}

#[inline]
pub fn end_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    days_of_month(year, month).and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
}

/// Shifts `d` by a signed number of days, `None` on calendar overflow.
#[inline]
pub fn shift_days(d: NaiveDate, n: i64) -> Option<NaiveDate> {
    if n >= 0 {
        d.checked_add_days(Days::new(n as u64))
    } else {
        d.checked_sub_days(Days::new(n.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap(2000));
        assert!(is_leap(2024));
        assert!(!is_leap(1900));
        assert!(!is_leap(2023));
    }

    #[test]
    fn february_length_follows_leap_rule() {
        assert_eq!(days_of_month(2024, 2), Some(29));
        assert_eq!(days_of_month(2100, 2), Some(28));
        assert_eq!(days_of_month(2023, 13), None);
        assert_eq!(days_of_month(2023, 0), None);
    }

    #[test]
    fn shift_days_both_directions() {
        let d = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        assert_eq!(shift_days(d, 1), NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(shift_days(d, -31), NaiveDate::from_ymd_opt(2022, 11, 30));
        assert_eq!(end_of_month(2022, 8), NaiveDate::from_ymd_opt(2022, 8, 31));
    }
}
