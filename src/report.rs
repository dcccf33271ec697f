/// serializable simulation results
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::annual::{to_annual_summaries, AnnualSummary};
use crate::config::PlacementConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::placement::Placement;
use crate::schedule::Installment;

/// everything a display layer needs to render one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub parameters: PlacementConfig,
    pub end_date: NaiveDate,
    pub installments: Vec<Installment>,
    pub annual_summaries: Vec<AnnualSummary>,
    pub totals: TotalsView,
    /// set when the end date was derived from a target value
    pub estimated_end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsView {
    pub total_variations: Money,
    pub total_interest: Money,
    pub acquired_value: Money,
}

impl SimulationReport {
    pub fn from_placement(placement: &Placement) -> Result<Self> {
        let schedule = placement.schedule()?;
        let annual_summaries = to_annual_summaries(&schedule.installments);
        Ok(SimulationReport {
            parameters: placement.to_config(),
            end_date: placement.end_date(),
            totals: TotalsView {
                total_variations: schedule.total_variations,
                total_interest: schedule.total_interest,
                acquired_value: schedule.acquired_value,
            },
            installments: schedule.installments,
            annual_summaries,
            estimated_end_date: placement.target_value().map(|_| placement.end_date()),
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
