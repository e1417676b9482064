use chrono::NaiveDate;
use log::trace;

use crate::dates::add_years;
use crate::decimal::{Money, Rate};
use crate::errors::{AccrualError, Result};
use crate::interest::InterestCalculator;
use crate::types::CycleRecord;

/// outcome of walking the compounding windows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleLedger {
    pub cycles: Vec<CycleRecord>,
    /// principal after the last completed window
    pub principal: Money,
    /// start of the window still in progress
    pub next_start: NaiveDate,
}

impl CycleLedger {
    /// ledger with no completed windows
    pub fn empty(principal: Money, anchor: NaiveDate) -> Self {
        Self {
            cycles: Vec::new(),
            principal,
            next_start: anchor,
        }
    }

    pub fn full_cycles(&self) -> u32 {
        self.cycles.len() as u32
    }

    pub fn total_interest(&self) -> Result<Money> {
        self.cycles
            .iter()
            .try_fold(Money::ZERO, |total, cycle| total.checked_add(cycle.interest))
    }
}

/// engine for folding interest into principal at fixed multi-year windows
pub struct CycleCompounder<'a> {
    calculator: &'a dyn InterestCalculator,
    cycle_length_years: u32,
}

impl<'a> CycleCompounder<'a> {
    pub fn new(calculator: &'a dyn InterestCalculator, cycle_length_years: u32) -> Self {
        Self {
            calculator,
            cycle_length_years,
        }
    }

    /// walk every window that has fully elapsed by `as_of`
    ///
    /// A window ending exactly on `as_of` counts as completed. The window in
    /// progress is left to the caller as the remaining period.
    pub fn compound(
        &self,
        principal: Money,
        rate: Rate,
        anchor: NaiveDate,
        as_of: NaiveDate,
    ) -> Result<CycleLedger> {
        if self.cycle_length_years == 0 {
            return Err(AccrualError::InvalidConfiguration {
                message: "cycle length must be at least one year".to_string(),
            });
        }

        let mut ledger = CycleLedger::empty(principal, anchor);

        loop {
            let cycle_start = ledger.next_start;
            let cycle_end = add_years(cycle_start, self.cycle_length_years)?;
            if cycle_end > as_of {
                break;
            }

            let calc = self
                .calculator
                .calculate_interest(ledger.principal, rate, cycle_start, cycle_end)?;
            let record = CycleRecord {
                cycle_number: ledger.full_cycles() + 1,
                cycle_start,
                cycle_end,
                principal_start: ledger.principal,
                interest: calc.interest_amount,
                principal_end: ledger.principal.checked_add(calc.interest_amount)?,
            };

            trace!(
                "cycle {} {}..{}: {} + {} = {}",
                record.cycle_number,
                record.cycle_start,
                record.cycle_end,
                record.principal_start,
                record.interest,
                record.principal_end
            );

            ledger.principal = record.principal_end;
            ledger.next_start = cycle_end;
            ledger.cycles.push(record);
        }

        Ok(ledger)
    }
}
