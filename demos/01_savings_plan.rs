/// savings plan - monthly deposits with annual capitalization
use chrono::NaiveDate;
use placement_sim::{Money, Placement, Rate, VariationFrequency};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let start = NaiveDate::from_ymd_opt(2015, 1, 1).ok_or("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2017, 2, 4).ok_or("invalid end date")?;

    // 10,000 at 12% with 100 added every month
    let placement = Placement::builder()
        .initial_capital(Money::from_major(10_000))
        .annual_rate(Rate::from_percentage(12))
        .frequency(VariationFrequency::Monthly)
        .variation(Money::from_major(100))
        .start_date(start)
        .end_date(end)
        .build()?;

    let schedule = placement.schedule()?;
    println!("=== installments ===\n");
    println!(
        "{:>3}  {:<10}  {:>4}  {:>12}  {:>8}  {:>10}  {:>12}",
        "#", "date", "days", "capital", "variation", "interest", "cumulative"
    );
    for row in &schedule.installments {
        println!(
            "{:>3}  {:<10}  {:>4}  {:>12}  {:>8}  {:>10}  {:>12}{}",
            row.index,
            row.date,
            row.days,
            row.capital.round_dp(2),
            row.variation.round_dp(2),
            row.interest.round_dp(2),
            row.cumulative_interest.round_dp(2),
            if row.partial { "  (partial)" } else { "" },
        );
    }

    println!("\n=== annual summaries ===\n");
    for year in placement.annual_summaries()? {
        println!(
            "{} ({} installments): opening {}  closing {}  interest {}  acquired {}",
            year.year,
            year.installments.len(),
            year.opening_capital.round_dp(2),
            year.closing_capital.round_dp(2),
            year.interest.round_dp(2),
            year.acquired_value.round_dp(2),
        );
    }

    println!("\nacquired value at {}: {}", end, schedule.acquired_value.round_dp(2));
    println!("exact: {}", schedule.acquired_value);

    Ok(())
}
