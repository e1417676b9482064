use hourglass_rs::SafeTimeProvider;
use log::debug;

use crate::config::AccrualConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::interest::{CycleCompounder, CycleLedger, InterestCalculator, SimpleInterestCalculator};
use crate::loan::Loan;
use crate::types::{AccrualResult, ElapsedPeriod, LoanTerms};

/// engine for computing the accrued interest of a single loan
///
/// Each computation is a pure function of the terms (which carry the
/// evaluation instant), so one engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct AccrualEngine<C = SimpleInterestCalculator> {
    pub config: AccrualConfig,
    calculator: C,
}

impl AccrualEngine<SimpleInterestCalculator> {
    pub fn new(config: AccrualConfig) -> Result<Self> {
        Self::with_calculator(config, SimpleInterestCalculator::new())
    }
}

impl Default for AccrualEngine<SimpleInterestCalculator> {
    fn default() -> Self {
        Self {
            config: AccrualConfig::default(),
            calculator: SimpleInterestCalculator::new(),
        }
    }
}

impl<C: InterestCalculator> AccrualEngine<C> {
    /// create an engine around a custom interest calculator
    pub fn with_calculator(config: AccrualConfig, calculator: C) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, calculator })
    }

    /// compute the accrual breakdown for one loan
    pub fn compute_accrual(&self, terms: &LoanTerms) -> Result<AccrualResult> {
        if terms.monthly_interest_payer {
            debug!(
                "loan {}: monthly interest payer, no accrual tracked",
                terms.loan_id
            );
            return self.monthly_payer_result(terms);
        }

        terms.validate()?;
        let as_of = terms.as_of_date();

        // settle interest to the partial payment date and re-base principal there
        let mut principal = terms.principal;
        let mut partial_interest = Money::ZERO;
        let mut partial_period = ElapsedPeriod::ZERO;
        let mut anchor = terms.start_date;

        let rebase_on = terms
            .partial_payment_date
            .filter(|_| terms.partial_payment.is_positive());
        if let Some(paid_on) = rebase_on {
            let calc = self
                .calculator
                .calculate_interest(principal, terms.rate, terms.start_date, paid_on)?;
            partial_interest = calc.interest_amount;
            partial_period = calc.period;
            principal = principal
                .checked_add(partial_interest)?
                .checked_sub(terms.partial_payment)?;
            anchor = paid_on;

            debug!(
                "loan {}: re-based on {}: {} + {} - {} = {}",
                terms.loan_id,
                paid_on,
                terms.principal,
                partial_interest,
                terms.partial_payment,
                principal
            );
        }
        let rebased_principal = principal;

        let ledger = if terms.non_cycled {
            CycleLedger::empty(principal, anchor)
        } else {
            CycleCompounder::new(&self.calculator, self.config.cycle_length_years)
                .compound(principal, terms.rate, anchor, as_of)?
        };
        let principal = ledger.principal;
        let anchor = ledger.next_start;

        let (remaining_period, remaining_interest) = if anchor < as_of {
            let calc = self
                .calculator
                .calculate_interest(principal, terms.rate, anchor, as_of)?;
            (calc.period, calc.interest_amount)
        } else {
            (ElapsedPeriod::ZERO, Money::ZERO)
        };

        debug!(
            "loan {}: {} full cycles, remaining {} from {} accrues {}",
            terms.loan_id,
            ledger.full_cycles(),
            remaining_period,
            anchor,
            remaining_interest
        );

        // cycle interest already lives inside the principal
        let total_interest = partial_interest.checked_add(remaining_interest)?;
        let total_payable = principal.checked_add(remaining_interest)?;

        let dp = self.config.display_scale;
        Ok(AccrualResult {
            loan_id: terms.loan_id,
            borrower_id: terms.borrower_id,
            principal: terms.principal,
            rate: terms.rate,
            start_date: terms.start_date,
            partial_payment: terms.partial_payment,
            partial_payment_date: terms.partial_payment_date,
            monthly_interest_payer: terms.monthly_interest_payer,
            non_cycled: terms.non_cycled,
            as_of: terms.as_of,
            partial_period,
            partial_interest: partial_interest.round_dp(dp),
            rebased_principal: rebased_principal.round_dp(dp),
            full_cycles: ledger.full_cycles(),
            cycles: ledger.cycles.iter().map(|cycle| cycle.rounded(dp)).collect(),
            last_cycle_start: anchor,
            remaining_period,
            remaining_interest: remaining_interest.round_dp(dp),
            final_principal: principal.round_dp(dp),
            total_interest: total_interest.round_dp(dp),
            total_payable: total_payable.round_dp(dp),
        })
    }

    /// compute the accrual for a stored loan at the provider's current instant
    pub fn compute_accrual_at(
        &self,
        loan: &Loan,
        time_provider: &SafeTimeProvider,
    ) -> Result<AccrualResult> {
        self.compute_accrual(&loan.terms(time_provider.now()))
    }

    fn monthly_payer_result(&self, terms: &LoanTerms) -> Result<AccrualResult> {
        let dp = self.config.display_scale;
        let outstanding = terms.principal.checked_sub(terms.partial_payment)?.round_dp(dp);

        Ok(AccrualResult {
            loan_id: terms.loan_id,
            borrower_id: terms.borrower_id,
            principal: terms.principal,
            rate: terms.rate,
            start_date: terms.start_date,
            partial_payment: terms.partial_payment,
            partial_payment_date: terms.partial_payment_date,
            monthly_interest_payer: true,
            non_cycled: terms.non_cycled,
            as_of: terms.as_of,
            partial_period: ElapsedPeriod::ZERO,
            partial_interest: Money::ZERO,
            rebased_principal: outstanding,
            cycles: Vec::new(),
            full_cycles: 0,
            last_cycle_start: terms.start_date,
            remaining_period: ElapsedPeriod::ZERO,
            remaining_interest: Money::ZERO,
            final_principal: outstanding,
            total_interest: Money::ZERO,
            total_payable: outstanding,
        })
    }
}

/// compute the accrual breakdown with the default 3-year configuration
pub fn compute_accrual(terms: &LoanTerms) -> Result<AccrualResult> {
    let engine: AccrualEngine = AccrualEngine::default();
    engine.compute_accrual(terms)
}
