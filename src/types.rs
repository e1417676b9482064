use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{AccrualError, Result};

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a borrower
pub type BorrowerId = Uuid;

/// whole months plus leftover days, counted on a 30-day month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct ElapsedPeriod {
    pub months: u32,
    pub days: u32,
}

impl ElapsedPeriod {
    pub const ZERO: ElapsedPeriod = ElapsedPeriod { months: 0, days: 0 };

    pub fn new(months: u32, days: u32) -> Self {
        Self { months, days }
    }

    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0
    }
}

impl fmt::Display for ElapsedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month_unit = if self.months == 1 { "month" } else { "months" };
        let day_unit = if self.days == 1 { "day" } else { "days" };
        write!(f, "{} {} {} {}", self.months, month_unit, self.days, day_unit)
    }
}

/// loan terms for one interest computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub loan_id: LoanId,
    pub borrower_id: BorrowerId,
    pub principal: Money,
    pub rate: Rate,
    pub start_date: NaiveDate,
    pub partial_payment: Money,
    pub partial_payment_date: Option<NaiveDate>,
    pub monthly_interest_payer: bool,
    pub non_cycled: bool,
    /// evaluation instant; every "remaining period" figure is relative to it
    pub as_of: DateTime<Utc>,
}

impl LoanTerms {
    /// builder for loan terms
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// calendar date of the evaluation instant
    pub fn as_of_date(&self) -> NaiveDate {
        self.as_of.date_naive()
    }

    /// check the combination of fields the accrual steps rely on
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(AccrualError::InvalidTerms {
                message: format!("principal must be positive, got {}", self.principal),
            });
        }

        if self.rate.is_negative() {
            return Err(AccrualError::InvalidTerms {
                message: format!("rate must not be negative, got {}", self.rate),
            });
        }

        if self.partial_payment.is_negative() {
            return Err(AccrualError::InvalidTerms {
                message: format!(
                    "partial payment must not be negative, got {}",
                    self.partial_payment
                ),
            });
        }

        if self.partial_payment.is_positive() && self.partial_payment_date.is_none() {
            return Err(AccrualError::InvalidTerms {
                message: format!(
                    "partial payment of {} has no payment date",
                    self.partial_payment
                ),
            });
        }

        if let Some(paid_on) = self.partial_payment_date {
            if paid_on < self.start_date {
                return Err(AccrualError::InvalidInterval {
                    start: self.start_date,
                    end: paid_on,
                });
            }
        }

        Ok(())
    }
}

/// builder for loan terms
#[derive(Debug, Default)]
pub struct LoanTermsBuilder {
    loan_id: Option<LoanId>,
    borrower_id: Option<BorrowerId>,
    principal: Option<Money>,
    rate: Option<Rate>,
    start_date: Option<NaiveDate>,
    partial_payment: Option<(Money, NaiveDate)>,
    monthly_interest_payer: bool,
    non_cycled: bool,
    as_of: Option<DateTime<Utc>>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loan_id(mut self, id: LoanId) -> Self {
        self.loan_id = Some(id);
        self
    }

    pub fn borrower_id(mut self, id: BorrowerId) -> Self {
        self.borrower_id = Some(id);
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn partial_payment(mut self, amount: Money, paid_on: NaiveDate) -> Self {
        self.partial_payment = Some((amount, paid_on));
        self
    }

    pub fn monthly_interest_payer(mut self, enabled: bool) -> Self {
        self.monthly_interest_payer = enabled;
        self
    }

    pub fn non_cycled(mut self, enabled: bool) -> Self {
        self.non_cycled = enabled;
        self
    }

    pub fn as_of(mut self, instant: DateTime<Utc>) -> Self {
        self.as_of = Some(instant);
        self
    }

    pub fn build(self) -> Result<LoanTerms> {
        let principal = self.principal.ok_or(AccrualError::InvalidTerms {
            message: "principal is required".to_string(),
        })?;
        let rate = self.rate.ok_or(AccrualError::InvalidTerms {
            message: "rate is required".to_string(),
        })?;
        let start_date = self.start_date.ok_or(AccrualError::InvalidTerms {
            message: "start date is required".to_string(),
        })?;
        let as_of = self.as_of.ok_or(AccrualError::InvalidTerms {
            message: "evaluation instant is required".to_string(),
        })?;

        let (partial_payment, partial_payment_date) = match self.partial_payment {
            Some((amount, date)) => (amount, Some(date)),
            None => (Money::ZERO, None),
        };

        Ok(LoanTerms {
            loan_id: self.loan_id.unwrap_or_else(Uuid::nil),
            borrower_id: self.borrower_id.unwrap_or_else(Uuid::nil),
            principal,
            rate,
            start_date,
            partial_payment,
            partial_payment_date,
            monthly_interest_payer: self.monthly_interest_payer,
            non_cycled: self.non_cycled,
            as_of,
        })
    }
}

/// one completed compounding window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    /// 1-based
    pub cycle_number: u32,
    pub cycle_start: NaiveDate,
    pub cycle_end: NaiveDate,
    pub principal_start: Money,
    pub interest: Money,
    pub principal_end: Money,
}

impl CycleRecord {
    /// same record with every amount rounded to `dp` places
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            principal_start: self.principal_start.round_dp(dp),
            interest: self.interest.round_dp(dp),
            principal_end: self.principal_end.round_dp(dp),
            ..self.clone()
        }
    }
}

/// accrual breakdown for one loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualResult {
    // identity and terms
    pub loan_id: LoanId,
    pub borrower_id: BorrowerId,
    pub principal: Money,
    pub rate: Rate,
    pub start_date: NaiveDate,
    pub partial_payment: Money,
    pub partial_payment_date: Option<NaiveDate>,
    pub monthly_interest_payer: bool,
    pub non_cycled: bool,
    pub as_of: DateTime<Utc>,

    // partial payment sub-period
    pub partial_period: ElapsedPeriod,
    pub partial_interest: Money,
    pub rebased_principal: Money,

    // compounding ledger
    pub cycles: Vec<CycleRecord>,
    pub full_cycles: u32,
    /// anchor the remaining period is measured from
    pub last_cycle_start: NaiveDate,

    // remaining sub-period
    pub remaining_period: ElapsedPeriod,
    pub remaining_interest: Money,

    // totals
    pub final_principal: Money,
    pub total_interest: Money,
    pub total_payable: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(10_000))
            .rate(Rate::per_hundred(dec!(1.5)))
            .start_date(date(2022, 5, 10))
            .as_of(as_of())
            .build()
            .unwrap();

        assert_eq!(terms.partial_payment, Money::ZERO);
        assert_eq!(terms.partial_payment_date, None);
        assert!(!terms.monthly_interest_payer);
        assert!(!terms.non_cycled);
        assert_eq!(terms.loan_id, Uuid::nil());
        assert_eq!(terms.as_of_date(), date(2024, 1, 1));
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn test_builder_requires_principal() {
        let result = LoanTerms::builder()
            .rate(Rate::per_hundred(dec!(2)))
            .start_date(date(2022, 5, 10))
            .as_of(as_of())
            .build();

        assert!(matches!(result, Err(AccrualError::InvalidTerms { .. })));
    }

    #[test]
    fn test_partial_payment_without_date_is_rejected() {
        let mut terms = LoanTerms::builder()
            .principal(Money::from_major(10_000))
            .rate(Rate::per_hundred(dec!(2)))
            .start_date(date(2022, 5, 10))
            .as_of(as_of())
            .build()
            .unwrap();
        terms.partial_payment = Money::from_major(500);

        assert!(matches!(terms.validate(), Err(AccrualError::InvalidTerms { .. })));
    }

    #[test]
    fn test_partial_payment_before_start_is_rejected() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(10_000))
            .rate(Rate::per_hundred(dec!(2)))
            .start_date(date(2022, 5, 10))
            .partial_payment(Money::from_major(500), date(2022, 5, 9))
            .as_of(as_of())
            .build()
            .unwrap();

        assert_eq!(
            terms.validate(),
            Err(AccrualError::InvalidInterval {
                start: date(2022, 5, 10),
                end: date(2022, 5, 9),
            })
        );
    }

    #[test]
    fn test_non_positive_principal_is_rejected() {
        let terms = LoanTerms::builder()
            .principal(Money::ZERO)
            .rate(Rate::per_hundred(dec!(2)))
            .start_date(date(2022, 5, 10))
            .as_of(as_of())
            .build()
            .unwrap();

        assert!(matches!(terms.validate(), Err(AccrualError::InvalidTerms { .. })));
    }

    #[test]
    fn test_elapsed_period_display() {
        assert_eq!(ElapsedPeriod::new(1, 14).to_string(), "1 month 14 days");
        assert_eq!(ElapsedPeriod::new(36, 1).to_string(), "36 months 1 day");
        assert!(ElapsedPeriod::ZERO.is_zero());
    }
}
