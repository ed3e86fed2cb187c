use chrono::Weekday;

use super::recurringholiday::nthweekdayholiday::Occurrence;

/// Errors raised while evaluating or building a holiday catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HolidayError {
    /// A weekday occurrence that does not exist in the given month.
    #[error("no {occurrence} {weekday} in {year}-{month:02}")]
    InvalidOccasion {
        year: i32,
        month: u32,
        weekday: Weekday,
        occurrence: Occurrence,
    },

    #[error("unknown subdivision '{0}'")]
    UnknownSubdivision(String),

    #[error("year {year} outside supported range {min}..={max}")]
    YearOutOfSupportedRange { year: i32, min: i32, max: i32 },

    /// Catalog authoring error, reported when the catalog is built.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_occasion_message() {
        let e = HolidayError::InvalidOccasion {
            year: 2023,
            month: 2,
            weekday: Weekday::Mon,
            occurrence: Occurrence::Nth(5),
        };
        assert_eq!(e.to_string(), "no 5th Mon in 2023-02");
    }

    #[test]
    fn year_out_of_range_message() {
        let e = HolidayError::YearOutOfSupportedRange { year: 1200, min: 1583, max: 4099 };
        assert_eq!(e.to_string(), "year 1200 outside supported range 1583..=4099");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<HolidayError>();
    }
}
