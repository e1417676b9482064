pub mod accrual;
pub mod compound;
pub mod simple;

use chrono::NaiveDate;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::ElapsedPeriod;

pub use accrual::{compute_accrual, AccrualEngine};
pub use compound::{CycleCompounder, CycleLedger};
pub use simple::{accrue, SimpleInterestCalculator};

/// interest calculation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub period: ElapsedPeriod,
    pub principal_base: Money,
    pub rate: Rate,
}

/// trait for interest calculations over a date interval
///
/// Implementations must not compound internally; compounding is driven by
/// feeding a grown principal back in for the next window.
pub trait InterestCalculator: Send + Sync {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<InterestCalculation>;
}
