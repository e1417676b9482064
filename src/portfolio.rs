use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dates::{add_years, falls_in_month};
use crate::decimal::Money;
use crate::errors::{AccrualError, Result};
use crate::interest::{AccrualEngine, InterestCalculator, SimpleInterestCalculator};
use crate::loan::{Borrower, Loan, CYCLE_YEARS};
use crate::report::LoanInterestInfo;
use crate::types::LoanId;

/// aggregate figures over every unpaid loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PortfolioSummary {
    /// original amounts lent, before partial payments
    pub total_principal: Money,
    pub total_interest: Money,
    pub loan_count: usize,
}

/// batch evaluation of a borrower book
pub struct Portfolio<C = SimpleInterestCalculator> {
    engine: AccrualEngine<C>,
}

impl Default for Portfolio<SimpleInterestCalculator> {
    fn default() -> Self {
        Self::new(AccrualEngine::default())
    }
}

impl<C: InterestCalculator> Portfolio<C> {
    pub fn new(engine: AccrualEngine<C>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &AccrualEngine<C> {
        &self.engine
    }

    /// interest breakdown of every unpaid loan, in borrower then loan order
    ///
    /// Paid loans are skipped without being computed. Loans are evaluated in
    /// parallel; the first failing loan fails the whole batch.
    pub fn evaluate(
        &self,
        borrowers: &[Borrower],
        as_of: DateTime<Utc>,
    ) -> Result<Vec<LoanInterestInfo>> {
        let pending: Vec<(&Borrower, &Loan)> = borrowers
            .iter()
            .flat_map(|borrower| borrower.unpaid_loans().map(move |loan| (borrower, loan)))
            .collect();

        debug!("evaluating {} unpaid loans as of {}", pending.len(), as_of);

        pending
            .par_iter()
            .map(|(borrower, loan)| -> Result<LoanInterestInfo> {
                let result = self.engine.compute_accrual(&loan.terms(as_of))?;
                Ok(LoanInterestInfo::from_result(&borrower.full_name, &result))
            })
            .collect()
    }

    /// evaluate at the provider's current instant
    pub fn evaluate_at(
        &self,
        borrowers: &[Borrower],
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<LoanInterestInfo>> {
        self.evaluate(borrowers, time_provider.now())
    }

    /// total lent and total interest across every unpaid loan
    pub fn summary(
        &self,
        borrowers: &[Borrower],
        as_of: DateTime<Utc>,
    ) -> Result<PortfolioSummary> {
        let infos = self.evaluate(borrowers, as_of)?;
        let summary = summarize(&infos)?;

        info!(
            "portfolio as of {}: {} loans, principal {}, interest {}",
            as_of, summary.loan_count, summary.total_principal, summary.total_interest
        );

        Ok(summary)
    }

    /// interest breakdown of a single loan held by `borrower`
    pub fn loan_interest(
        &self,
        borrower: &Borrower,
        loan_id: LoanId,
        as_of: DateTime<Utc>,
    ) -> Result<LoanInterestInfo> {
        let loan = borrower
            .find_loan(loan_id)
            .ok_or(AccrualError::LoanNotFound { id: loan_id })?;
        let result = self.engine.compute_accrual(&loan.terms(as_of))?;
        Ok(LoanInterestInfo::from_result(&borrower.full_name, &result))
    }
}

/// fold evaluated loans into portfolio totals
pub fn summarize(infos: &[LoanInterestInfo]) -> Result<PortfolioSummary> {
    infos.iter().try_fold(PortfolioSummary::default(), |acc, info| {
        Ok(PortfolioSummary {
            total_principal: acc.total_principal.checked_add(info.principal_amount)?,
            total_interest: acc.total_interest.checked_add(info.total_interest)?,
            loan_count: acc.loan_count + 1,
        })
    })
}

/// borrowers holding unpaid loans whose first 3-year anniversary falls in `month`/`year`
///
/// Each returned borrower keeps only the matching loans; borrowers with none are dropped.
pub fn three_year_anniversaries(borrowers: &[Borrower], month: u32, year: i32) -> Vec<Borrower> {
    borrowers
        .iter()
        .filter_map(|borrower| {
            let loans: Vec<Loan> = borrower
                .unpaid_loans()
                .filter(|loan| {
                    add_years(loan.start_date, CYCLE_YEARS)
                        .map(|anniversary| falls_in_month(anniversary, month, year))
                        .unwrap_or(false)
                })
                .cloned()
                .collect();

            if loans.is_empty() {
                None
            } else {
                Some(Borrower {
                    loans,
                    ..borrower.clone()
                })
            }
        })
        .collect()
}
