use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::dates::{months_and_days_between, DAYS_PER_MONTH};
use crate::decimal::{Money, Rate};
use crate::errors::{AccrualError, Result};
use crate::interest::{InterestCalculation, InterestCalculator};
use crate::types::ElapsedPeriod;

/// simple interest on a 30-day month: whole months at the full monthly rate,
/// leftover days prorated at days/30 of it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleInterestCalculator;

impl SimpleInterestCalculator {
    pub fn new() -> Self {
        Self
    }

    /// interest for an already split period
    ///
    /// Intermediate products keep full decimal precision; only the total is
    /// rounded to ledger scale.
    pub fn interest_for_period(
        &self,
        principal: Money,
        rate: Rate,
        period: ElapsedPeriod,
    ) -> Result<Money> {
        let overflow = || AccrualError::Overflow {
            message: format!("interest on {} at {} for {}", principal, rate, period),
        };

        let monthly = principal
            .as_decimal()
            .checked_mul(rate.monthly_fraction())
            .ok_or_else(overflow)?;
        let whole_months = monthly
            .checked_mul(Decimal::from(period.months))
            .ok_or_else(overflow)?;
        let prorated_days = monthly
            .checked_mul(Decimal::from(period.days))
            .and_then(|d| d.checked_div(Decimal::from(DAYS_PER_MONTH)))
            .ok_or_else(overflow)?;
        let total = whole_months.checked_add(prorated_days).ok_or_else(overflow)?;

        Ok(Money::from_decimal(total))
    }
}

impl InterestCalculator for SimpleInterestCalculator {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<InterestCalculation> {
        let period = months_and_days_between(start_date, end_date)?;

        Ok(InterestCalculation {
            interest_amount: self.interest_for_period(principal, rate, period)?,
            period,
            principal_base: principal,
            rate,
        })
    }
}

/// simple interest accrued on `principal` between two dates
pub fn accrue(principal: Money, rate: Rate, start: NaiveDate, end: NaiveDate) -> Result<Money> {
    SimpleInterestCalculator
        .calculate_interest(principal, rate, start, end)
        .map(|calc| calc.interest_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_whole_months() {
        let interest = accrue(
            Money::from_major(100_000),
            Rate::per_hundred(dec!(2)),
            date(2020, 1, 1),
            date(2023, 1, 1),
        )
        .unwrap();

        assert_eq!(interest, Money::from_major(72_000));
    }

    #[test]
    fn test_partial_month_proration() {
        let interest = accrue(
            Money::from_major(172_000),
            Rate::per_hundred(dec!(2)),
            date(2023, 1, 1),
            date(2023, 2, 15),
        )
        .unwrap();

        // 3440 for the month plus 14/30 of it
        assert_eq!(interest.as_decimal(), dec!(5045.33333333));
        assert_eq!(interest.round_dp(2).as_decimal(), dec!(5045.33));
    }

    #[test]
    fn test_fractional_rate() {
        let interest = accrue(
            Money::from_major(20_000),
            Rate::per_hundred(dec!(7.25)),
            date(2024, 3, 1),
            date(2024, 4, 1),
        )
        .unwrap();

        assert_eq!(interest, Money::from_major(1_450));
    }

    #[test]
    fn test_empty_interval_accrues_nothing() {
        let interest = accrue(
            Money::from_major(50_000),
            Rate::per_hundred(dec!(3)),
            date(2024, 5, 5),
            date(2024, 5, 5),
        )
        .unwrap();

        assert!(interest.is_zero());
    }

    #[test]
    fn test_zero_rate() {
        let interest = accrue(
            Money::from_major(50_000),
            Rate::ZERO,
            date(2020, 5, 5),
            date(2024, 5, 5),
        )
        .unwrap();

        assert!(interest.is_zero());
    }

    #[test]
    fn test_reversed_interval_propagates() {
        let result = accrue(
            Money::from_major(50_000),
            Rate::per_hundred(dec!(3)),
            date(2024, 5, 5),
            date(2024, 5, 4),
        );

        assert!(matches!(result, Err(AccrualError::InvalidInterval { .. })));
    }

    #[test]
    fn test_calculation_reports_period_and_base() {
        let principal = Money::from_major(10_000);
        let rate = Rate::per_hundred(dec!(1.5));
        let calc = SimpleInterestCalculator::new()
            .calculate_interest(principal, rate, date(2024, 1, 20), date(2024, 3, 5))
            .unwrap();

        assert_eq!(calc.period, ElapsedPeriod::new(1, 15));
        assert_eq!(calc.principal_base, principal);
        assert_eq!(calc.rate, rate);
        // 150 for the month plus 15/30 of 150
        assert_eq!(calc.interest_amount, Money::from_major(225));
    }

    #[test]
    fn test_out_of_range_principal_is_an_error() {
        let result = accrue(
            Money::from_decimal(Decimal::MAX),
            Rate::per_hundred(dec!(10)),
            date(2020, 1, 1),
            date(2023, 1, 1),
        );

        assert!(matches!(result, Err(AccrualError::Overflow { .. })));
    }

    #[test]
    fn test_monotonic_in_interval_length() {
        let principal = Money::from_major(25_000);
        let rate = Rate::per_hundred(dec!(2.5));

        for start in [date(2023, 1, 15), date(2023, 1, 30), date(2023, 1, 31), date(2024, 2, 29)] {
            let mut previous = Money::ZERO;
            for offset in 0..800 {
                let end = start + Duration::days(offset);
                let interest = accrue(principal, rate, start, end).unwrap();
                assert!(
                    interest >= previous,
                    "interest dropped from {} to {} at {} (start {})",
                    previous,
                    interest,
                    end,
                    start
                );
                previous = interest;
            }
        }
    }
}
