pub mod config;
pub mod dates;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod loan;
pub mod portfolio;
pub mod report;
pub mod types;

// re-export key types
pub use config::AccrualConfig;
pub use dates::{add_years, months_and_days_between};
pub use decimal::{Money, Rate};
pub use errors::{AccrualError, Result};
pub use interest::{
    accrue, compute_accrual, AccrualEngine, CycleCompounder, CycleLedger, InterestCalculation,
    InterestCalculator, SimpleInterestCalculator,
};
pub use loan::{Borrower, Loan};
pub use portfolio::{summarize, three_year_anniversaries, Portfolio, PortfolioSummary};
pub use report::{LoanInterestInfo, PeriodView};
pub use types::{
    AccrualResult, BorrowerId, CycleRecord, ElapsedPeriod, LoanId, LoanTerms, LoanTermsBuilder,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
