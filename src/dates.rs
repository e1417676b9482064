use chrono::{Datelike, Months, NaiveDate};

use crate::errors::{AccrualError, Result};
use crate::types::ElapsedPeriod;

/// length of every month for day proration, regardless of the calendar
pub const DAYS_PER_MONTH: u32 = 30;

/// split an interval into whole months and leftover days
///
/// Leftover days are counted against a fixed 30-day month rather than the
/// calendar month they fall in, so a start on the 31st can produce 30 days.
pub fn months_and_days_between(start: NaiveDate, end: NaiveDate) -> Result<ElapsedPeriod> {
    if end < start {
        return Err(AccrualError::InvalidInterval { start, end });
    }

    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let days = if end.day() < start.day() {
        months -= 1;
        end.day() + DAYS_PER_MONTH - start.day()
    } else {
        end.day() - start.day()
    };

    Ok(ElapsedPeriod::new(months as u32, days))
}

/// shift a date by whole calendar years; Feb 29 lands on Feb 28 in common years
pub fn add_years(date: NaiveDate, years: u32) -> Result<NaiveDate> {
    years
        .checked_mul(12)
        .and_then(|months| date.checked_add_months(Months::new(months)))
        .ok_or_else(|| AccrualError::InvalidTerms {
            message: format!("{} + {} years is out of range", date, years),
        })
}

/// check if the date is in the given calendar month
pub fn falls_in_month(date: NaiveDate, month: u32, year: i32) -> bool {
    date.month() == month && date.year() == year
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_is_zero() {
        for d in [date(2020, 1, 1), date(2024, 2, 29), date(2023, 12, 31)] {
            assert_eq!(months_and_days_between(d, d).unwrap(), ElapsedPeriod::ZERO);
        }
    }

    #[test]
    fn test_whole_months() {
        let period = months_and_days_between(date(2020, 1, 1), date(2023, 1, 1)).unwrap();
        assert_eq!(period, ElapsedPeriod::new(36, 0));

        let period = months_and_days_between(date(2020, 1, 1), date(2020, 7, 1)).unwrap();
        assert_eq!(period, ElapsedPeriod::new(6, 0));
    }

    #[test]
    fn test_months_and_days() {
        let period = months_and_days_between(date(2023, 1, 1), date(2023, 2, 15)).unwrap();
        assert_eq!(period, ElapsedPeriod::new(1, 14));
    }

    #[test]
    fn test_borrow_uses_thirty_day_month() {
        // jan 20 -> mar 5: one whole month, then 5 + 30 - 20 days
        let period = months_and_days_between(date(2024, 1, 20), date(2024, 3, 5)).unwrap();
        assert_eq!(period, ElapsedPeriod::new(1, 15));

        // feb has 29 days in 2024 but the borrow is still 30
        let period = months_and_days_between(date(2024, 2, 10), date(2024, 3, 9)).unwrap();
        assert_eq!(period, ElapsedPeriod::new(0, 29));
    }

    #[test]
    fn test_start_on_31st() {
        let period = months_and_days_between(date(2024, 1, 31), date(2024, 3, 30)).unwrap();
        assert_eq!(period, ElapsedPeriod::new(1, 29));

        let period = months_and_days_between(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(period, ElapsedPeriod::new(0, 30));
    }

    #[test]
    fn test_reversed_interval_is_rejected() {
        let result = months_and_days_between(date(2024, 3, 1), date(2024, 2, 1));
        assert_eq!(
            result,
            Err(AccrualError::InvalidInterval {
                start: date(2024, 3, 1),
                end: date(2024, 2, 1),
            })
        );
    }

    #[test]
    fn test_add_years() {
        assert_eq!(add_years(date(2020, 1, 1), 3).unwrap(), date(2023, 1, 1));
        assert_eq!(add_years(date(2020, 2, 29), 3).unwrap(), date(2023, 2, 28));
        assert_eq!(add_years(date(2020, 2, 29), 4).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_add_years_out_of_range() {
        // years * 12 does not fit in a month count
        let result = add_years(date(2020, 1, 1), u32::MAX);
        assert!(matches!(result, Err(AccrualError::InvalidTerms { .. })));

        // fits as months but lands past the calendar
        let result = add_years(date(2020, 1, 1), 300_000_000);
        assert!(matches!(result, Err(AccrualError::InvalidTerms { .. })));
    }

    #[test]
    fn test_leap_day_anniversary_split() {
        let end = add_years(date(2020, 2, 29), 3).unwrap();
        let period = months_and_days_between(date(2020, 2, 29), end).unwrap();
        assert_eq!(period, ElapsedPeriod::new(35, 29));
    }

    #[test]
    fn test_falls_in_month() {
        assert!(falls_in_month(date(2025, 6, 30), 6, 2025));
        assert!(!falls_in_month(date(2025, 6, 30), 6, 2024));
        assert!(!falls_in_month(date(2025, 7, 1), 6, 2025));
    }
}
