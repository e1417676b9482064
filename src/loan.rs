use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::add_years;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::{BorrowerId, LoanId, LoanTerms};

/// years after which a loan's interest is folded into principal
pub const CYCLE_YEARS: u32 = 3;

/// loan record as supplied by the loan store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Loan {
    pub id: LoanId,
    pub borrower_id: BorrowerId,
    pub amount: Money,
    pub interest_rate: Rate,
    pub start_date: NaiveDate,
    pub partial_payment: Money,
    pub partial_payment_date: Option<NaiveDate>,
    pub is_paid: bool,
    pub full_payment_date: Option<NaiveDate>,
    pub monthly_interest_payer: bool,
    pub non_cycled: bool,
    pub notes: Option<String>,
}

impl Loan {
    /// full payment date if settled, otherwise the first 3-year anniversary
    pub fn end_date(&self) -> NaiveDate {
        self.full_payment_date
            .or_else(|| add_years(self.start_date, CYCLE_YEARS).ok())
            .unwrap_or(self.start_date)
    }

    /// amount still owed before any interest
    pub fn remaining_amount(&self) -> Result<Money> {
        self.amount.checked_sub(self.partial_payment)
    }

    pub fn has_partial_payment(&self) -> bool {
        self.partial_payment.is_positive()
    }

    /// first 3-year anniversary, counted from the partial payment when there is one
    pub fn three_year_mark(&self) -> Option<NaiveDate> {
        let reference = self.partial_payment_date.unwrap_or(self.start_date);
        add_years(reference, CYCLE_YEARS).ok()
    }

    /// check if the 3-year mark has been reached by `as_of`
    pub fn is_over_three_years(&self, as_of: DateTime<Utc>) -> bool {
        self.three_year_mark()
            .map(|mark| as_of.date_naive() >= mark)
            .unwrap_or(false)
    }

    /// engine input for evaluating this loan at `as_of`
    pub fn terms(&self, as_of: DateTime<Utc>) -> LoanTerms {
        LoanTerms {
            loan_id: self.id,
            borrower_id: self.borrower_id,
            principal: self.amount,
            rate: self.interest_rate,
            start_date: self.start_date,
            partial_payment: self.partial_payment,
            partial_payment_date: self.partial_payment_date,
            monthly_interest_payer: self.monthly_interest_payer,
            non_cycled: self.non_cycled,
            as_of,
        }
    }
}

/// borrower record with every loan extended to them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Borrower {
    pub id: BorrowerId,
    pub full_name: String,
    pub phone_number: String,
    pub address: String,
    pub loans: Vec<Loan>,
}

impl Borrower {
    /// sum of every loan amount, paid or not
    pub fn total_borrowed_amount(&self) -> Result<Money> {
        self.loans
            .iter()
            .try_fold(Money::ZERO, |total, loan| total.checked_add(loan.amount))
    }

    pub fn unpaid_loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans.iter().filter(|loan| !loan.is_paid)
    }

    pub fn find_loan(&self, id: LoanId) -> Option<&Loan> {
        self.loans.iter().find(|loan| loan.id == id)
    }
}
