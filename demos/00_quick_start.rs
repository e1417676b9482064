/// quick start - minimal example to get started
use chrono::{NaiveDate, TimeZone, Utc};
use loan_interest_rs::{compute_accrual, LoanInterestInfo, LoanTerms, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // 1,00,000 lent at 2 per 100 per month, evaluated a month and a half past the first cycle
    let terms = LoanTerms::builder()
        .principal(Money::from_major(100_000))
        .rate(Rate::per_hundred(dec!(2)))
        .start_date(NaiveDate::from_ymd_opt(2020, 1, 1).ok_or("bad date")?)
        .as_of(Utc.with_ymd_and_hms(2023, 2, 15, 0, 0, 0).unwrap())
        .build()?;

    let result = compute_accrual(&terms)?;

    println!("{}", LoanInterestInfo::from_result("Quick Start", &result).to_json_pretty()?);

    Ok(())
}
