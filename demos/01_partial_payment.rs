/// partial payment - re-basing principal before the compounding cycles start
use chrono::{NaiveDate, TimeZone, Utc};
use loan_interest_rs::{compute_accrual, LoanTerms, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== partial payment ===\n");

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).ok_or("bad date")?;
    let paid_on = NaiveDate::from_ymd_opt(2020, 7, 1).ok_or("bad date")?;

    for non_cycled in [false, true] {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(100_000))
            .rate(Rate::per_hundred(dec!(2)))
            .start_date(start)
            .partial_payment(Money::from_major(20_000), paid_on)
            .non_cycled(non_cycled)
            .as_of(Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap())
            .build()?;

        let result = compute_accrual(&terms)?;

        println!("{}", if non_cycled { "non-cycled member" } else { "cycled member" });
        println!("-----------------");
        println!(
            "partial period: {} -> interest {}, re-based principal {}",
            result.partial_period, result.partial_interest, result.rebased_principal
        );
        for cycle in &result.cycles {
            println!(
                "cycle {}: {} to {}  {} + {} = {}",
                cycle.cycle_number,
                cycle.cycle_start,
                cycle.cycle_end,
                cycle.principal_start,
                cycle.interest,
                cycle.principal_end
            );
        }
        println!(
            "remaining: {} -> interest {}",
            result.remaining_period, result.remaining_interest
        );
        println!(
            "total interest {}, total payable {}\n",
            result.total_interest, result.total_payable
        );
    }

    Ok(())
}
