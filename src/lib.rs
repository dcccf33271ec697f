pub mod accrual;
pub mod annual;
pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod estimate;
pub mod placement;
pub mod report;
pub mod schedule;
pub mod types;

// re-export key types
pub use accrual::{AccrualRule, FortnightAccrual, StrictAccrual};
pub use annual::{to_annual_summaries, AnnualSummary};
pub use config::{Horizon, PlacementConfig};
pub use decimal::{Money, Rate};
pub use errors::{PlacementError, Result};
pub use estimate::{estimate_end_date, MAX_ESTIMATION_PERIODS};
pub use placement::{Placement, PlacementBuilder};
pub use report::SimulationReport;
pub use schedule::{Installment, Schedule};
pub use types::{AccrualPolicy, DayCountConvention, VariationFrequency};

// re-export external dependencies that users will need
pub use bigdecimal::BigDecimal;
pub use chrono;
pub use rust_decimal::Decimal;
