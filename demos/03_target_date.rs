/// target date - when does a placement reach a given value
use chrono::NaiveDate;
use placement_sim::{Money, Placement, PlacementError, Rate};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let start = NaiveDate::from_ymd_opt(2015, 1, 1).ok_or("invalid start date")?;

    // end date derived from the target at build time
    let placement = Placement::builder()
        .initial_capital(Money::from_major(10_000))
        .annual_rate(Rate::from_percentage(12))
        .start_date(start)
        .target_value(Money::from_major(12_000))
        .build()?;
    println!("12,000 reached on {}", placement.end_date());

    for target in [11_000, 15_000, 20_000] {
        let date = placement.estimate_end_date(start, &Money::from_major(target))?;
        println!("{target:>6} reached on {date}");
    }

    // no interest and no deposits never gets there
    let idle = Placement::builder()
        .initial_capital(Money::from_major(10_000))
        .annual_rate(Rate::zero())
        .start_date(start)
        .end_date(start)
        .build()?;
    match idle.estimate_end_date(start, &Money::from_major(12_000)) {
        Err(PlacementError::UnreachableTarget { reason, .. }) => println!("\nidle placement: {reason}"),
        other => println!("\nunexpected: {other:?}"),
    }

    Ok(())
}
