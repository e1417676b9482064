/// portfolio - batch evaluation, totals and upcoming anniversaries
use chrono::{NaiveDate, TimeZone, Utc};
use loan_interest_rs::{
    three_year_anniversaries, Borrower, Decimal, Loan, Money, Portfolio, Rate, Uuid,
};
use rust_decimal_macros::dec;

fn loan(amount: i64, rate: Decimal, start: NaiveDate) -> Loan {
    Loan {
        id: Uuid::new_v4(),
        amount: Money::from_major(amount),
        interest_rate: Rate::per_hundred(rate),
        start_date: start,
        ..Loan::default()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== portfolio ===\n");

    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or("bad date");

    let book = vec![
        Borrower {
            id: Uuid::new_v4(),
            full_name: "Meena Iyer".to_string(),
            loans: vec![
                loan(100_000, dec!(2), date(2020, 1, 1)?),
                Loan {
                    is_paid: true,
                    full_payment_date: Some(date(2021, 1, 1)?),
                    ..loan(40_000, dec!(1.5), date(2019, 1, 1)?)
                },
            ],
            ..Borrower::default()
        },
        Borrower {
            id: Uuid::new_v4(),
            full_name: "Joseph Mathew".to_string(),
            loans: vec![
                Loan {
                    monthly_interest_payer: true,
                    ..loan(50_000, dec!(1.25), date(2022, 10, 5)?)
                },
                Loan {
                    non_cycled: true,
                    partial_payment: Money::from_major(5_000),
                    partial_payment_date: Some(date(2023, 4, 1)?),
                    ..loan(30_000, dec!(2.5), date(2022, 10, 5)?)
                },
            ],
            ..Borrower::default()
        },
    ];

    let as_of = Utc.with_ymd_and_hms(2025, 10, 17, 0, 0, 0).unwrap();
    let portfolio: Portfolio = Portfolio::default();

    for info in portfolio.evaluate(&book, as_of)? {
        println!(
            "{:<15} principal {:>10}  cycles {}  interest {:>10}  payable {:>10}",
            info.borrower_name,
            info.principal_amount,
            info.full_three_year_cycles,
            info.total_interest,
            info.total_payable_amount
        );
    }

    let summary = portfolio.summary(&book, as_of)?;
    println!(
        "\n{} unpaid loans, total lent {}, total interest {}",
        summary.loan_count, summary.total_principal, summary.total_interest
    );

    println!("\nloans completing 3 years in october 2025:");
    for borrower in three_year_anniversaries(&book, 10, 2025) {
        for loan in &borrower.loans {
            println!("  {} - {} from {}", borrower.full_name, loan.amount, loan.start_date);
        }
    }

    Ok(())
}
