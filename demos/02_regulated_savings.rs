/// regulated savings - fortnight accrual versus strict accrual
use chrono::NaiveDate;
use placement_sim::{AccrualPolicy, Money, PlacementConfig, Rate};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 10).ok_or("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2025, 1, 10).ok_or("invalid end date")?;

    let regulated = PlacementConfig::regulated_savings(
        Money::from_major(1_000),
        Rate::from(dec!(0.03)),
        Money::from_major(150),
        start,
        end,
    );
    let strict = regulated.clone().with_policy(AccrualPolicy::Strict);

    let fortnight = regulated.into_placement()?.schedule()?;
    let strict = strict.into_placement()?.schedule()?;

    println!("=== deposits and effective dates ===\n");
    for (f, s) in fortnight.installments.iter().zip(&strict.installments) {
        let effective = f
            .variation_effective_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10}  deposit {:>7}  earns from {:<10}  fortnight {:>6}  strict {:>6}",
            f.date,
            f.variation.round_dp(2),
            effective,
            f.interest.round_dp(2),
            s.interest.round_dp(2),
        );
    }

    println!("\ntotal interest (fortnight): {}", fortnight.total_interest.round_dp(2));
    println!("total interest (strict):    {}", strict.total_interest.round_dp(2));
    println!(
        "cost of deferred deposits:  {}",
        (strict.total_interest - fortnight.total_interest).round_dp(2)
    );

    Ok(())
}
