/// json report - serialize a full simulation for a display layer
use chrono::NaiveDate;
use placement_sim::{Money, PlacementConfig, Rate, SimulationReport, VariationFrequency};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let start = NaiveDate::from_ymd_opt(2015, 1, 1).ok_or("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2016, 2, 1).ok_or("invalid end date")?;

    let config = PlacementConfig::savings_plan(
        Money::from_major(10_000),
        Rate::from_percentage(12),
        Money::from_major(300),
        VariationFrequency::Quarterly,
        start,
        end,
    );

    println!("=== request ===\n");
    println!("{}\n", serde_json::to_string_pretty(&config)?);

    let report = SimulationReport::from_placement(&config.into_placement()?)?;
    let json = report.to_json_pretty()?;
    println!("=== report ===\n");
    println!("{json}");

    // every figure survives the round trip exactly
    let parsed = SimulationReport::from_json(&json)?;
    assert_eq!(parsed, report);

    // presentation values for a fixed-scale display
    println!("\nacquired value: {}", report.totals.acquired_value.to_decimal(2)?);

    Ok(())
}
