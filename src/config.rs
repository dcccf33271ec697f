use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{PlacementError, Result};
use crate::placement::Placement;
use crate::types::{AccrualPolicy, DayCountConvention, VariationFrequency};

/// placement request
///
/// The inbound shape of a simulation: everything a caller fills in before
/// asking for a schedule. Amounts and rates serialize as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub initial_capital: Money,
    pub annual_rate: Rate,
    #[serde(default)]
    pub frequency: VariationFrequency,
    #[serde(default)]
    pub variation: Money,
    pub start_date: NaiveDate,
    pub horizon: Horizon,
    #[serde(default)]
    pub policy: AccrualPolicy,
    #[serde(default)]
    pub day_count: DayCountConvention,
}

/// how the end of the placement is fixed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    EndDate(NaiveDate),
    /// end date estimated from a target acquired value
    TargetValue(Money),
}

impl PlacementConfig {
    /// periodic savings plan, strict accrual
    pub fn savings_plan(
        initial_capital: Money,
        annual_rate: Rate,
        deposit: Money,
        frequency: VariationFrequency,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            initial_capital,
            annual_rate,
            frequency,
            variation: deposit,
            start_date,
            horizon: Horizon::EndDate(end_date),
            policy: AccrualPolicy::Strict,
            day_count: DayCountConvention::Actual365,
        }
    }

    /// regulated passbook account (Livret A style)
    ///
    /// Monthly deposits that only start earning on the next 1st or 16th.
    pub fn regulated_savings(
        initial_capital: Money,
        annual_rate: Rate,
        monthly_deposit: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            initial_capital,
            annual_rate,
            frequency: VariationFrequency::Monthly,
            variation: monthly_deposit,
            start_date,
            horizon: Horizon::EndDate(end_date),
            policy: AccrualPolicy::Fortnight,
            day_count: DayCountConvention::Actual365,
        }
    }

    /// fixed-capital term deposit
    pub fn term_deposit(
        initial_capital: Money,
        annual_rate: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            initial_capital,
            annual_rate,
            frequency: VariationFrequency::Annual,
            variation: Money::zero(),
            start_date,
            horizon: Horizon::EndDate(end_date),
            policy: AccrualPolicy::Strict,
            day_count: DayCountConvention::Actual365,
        }
    }

    /// solve for the end date instead of fixing it
    pub fn with_target_value(mut self, target: Money) -> Self {
        self.horizon = Horizon::TargetValue(target);
        self
    }

    pub fn with_policy(mut self, policy: AccrualPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// check the request without running the estimator
    pub fn validate(&self) -> Result<()> {
        if !self.initial_capital.is_positive() {
            return Err(PlacementError::NonPositiveCapital {
                capital: self.initial_capital.clone(),
            });
        }
        if self.annual_rate.is_negative() {
            return Err(PlacementError::NegativeRate {
                rate: self.annual_rate.clone(),
            });
        }
        match &self.horizon {
            Horizon::EndDate(end) if *end < self.start_date => Err(PlacementError::EndBeforeStart {
                start: self.start_date,
                end: *end,
            }),
            Horizon::TargetValue(target) if !target.is_positive() => {
                Err(PlacementError::InvalidConfiguration {
                    message: format!("target value must be positive: {target}"),
                })
            }
            _ => Ok(()),
        }
    }

    /// validate and resolve into a placement
    pub fn into_placement(self) -> Result<Placement> {
        self.validate()?;
        let builder = Placement::builder()
            .initial_capital(self.initial_capital)
            .annual_rate(self.annual_rate)
            .frequency(self.frequency)
            .variation(self.variation)
            .start_date(self.start_date)
            .policy(self.policy)
            .day_count(self.day_count);
        match self.horizon {
            Horizon::EndDate(end) => builder.end_date(end),
            Horizon::TargetValue(target) => builder.target_value(target),
        }
        .build()
    }
}
