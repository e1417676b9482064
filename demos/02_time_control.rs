/// time control - deterministic evaluation with an injected clock
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_interest_rs::{AccrualEngine, Loan, Money, Rate, SafeTimeProvider, TimeSource, Uuid};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2022, 12, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let loan = Loan {
        id: Uuid::new_v4(),
        amount: Money::from_major(100_000),
        interest_rate: Rate::per_hundred(dec!(2)),
        start_date: NaiveDate::from_ymd_opt(2020, 1, 1).ok_or("bad date")?,
        ..Loan::default()
    };
    let engine: AccrualEngine = AccrualEngine::default();

    // step across the first 3-year anniversary a month at a time
    for _ in 0..4 {
        let result = engine.compute_accrual_at(&loan, &time)?;
        println!(
            "{}: cycles {}, remaining {}, payable {}",
            time.now().format("%Y-%m-%d"),
            result.full_cycles,
            result.remaining_period,
            result.total_payable
        );
        controller.advance(Duration::days(31));
    }

    Ok(())
}
