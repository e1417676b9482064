//! serializable views of accrual results

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{AccrualResult, CycleRecord, ElapsedPeriod, LoanId};

/// interest breakdown of one loan as handed to the application layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInterestInfo {
    pub loan_id: LoanId,
    pub borrower_name: String,
    pub principal_amount: Money,
    pub interest_per_month_per_100: Rate,
    pub loan_start_date: NaiveDate,
    pub partial_payment: Money,
    pub as_of: DateTime<Utc>,

    pub partial: PeriodView,
    pub rebase_summary: Option<String>,

    pub full_three_year_cycles: u32,
    pub last_cycle_start: NaiveDate,
    pub cycles: Vec<CycleRecord>,

    pub remaining: PeriodView,

    pub total_interest: Money,
    pub total_payable_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodView {
    pub months: u32,
    pub days: u32,
    pub elapsed: String,
    pub interest: Money,
}

impl PeriodView {
    fn new(period: ElapsedPeriod, interest: Money) -> Self {
        Self {
            months: period.months,
            days: period.days,
            elapsed: period.to_string(),
            interest,
        }
    }
}

impl LoanInterestInfo {
    pub fn from_result(borrower_name: &str, result: &AccrualResult) -> Self {
        let rebased = result.partial_payment.is_positive() && !result.monthly_interest_payer;
        let rebase_summary = result.partial_payment_date.filter(|_| rebased).map(|_| {
            format!(
                "Principal = {:.2} + Partial Interest = {:.2} - Partial Payment = {:.2} = {:.2}",
                result.principal.as_decimal(),
                result.partial_interest.as_decimal(),
                result.partial_payment.as_decimal(),
                result.rebased_principal.as_decimal()
            )
        });

        LoanInterestInfo {
            loan_id: result.loan_id,
            borrower_name: borrower_name.to_string(),
            principal_amount: result.principal,
            interest_per_month_per_100: result.rate,
            loan_start_date: result.start_date,
            partial_payment: result.partial_payment,
            as_of: result.as_of,
            partial: PeriodView::new(result.partial_period, result.partial_interest),
            rebase_summary,
            full_three_year_cycles: result.full_cycles,
            last_cycle_start: result.last_cycle_start,
            cycles: result.cycles.clone(),
            remaining: PeriodView::new(result.remaining_period, result.remaining_interest),
            total_interest: result.total_interest,
            total_payable_amount: result.total_payable,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
