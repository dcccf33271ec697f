use chrono::NaiveDate;
use tracing::debug;

use crate::annual::{to_annual_summaries, AnnualSummary};
use crate::config::{Horizon, PlacementConfig};
use crate::decimal::{Money, Rate};
use crate::errors::{PlacementError, Result};
use crate::estimate::estimate_end_date;
use crate::schedule::Schedule;
use crate::types::{AccrualPolicy, DayCountConvention, VariationFrequency};

/// validated placement parameters
///
/// Built once through [`PlacementBuilder`] or [`PlacementConfig`], then
/// read-only: every computation is a pure function of these fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    initial_capital: Money,
    annual_rate: Rate,
    frequency: VariationFrequency,
    variation: Money,
    start_date: NaiveDate,
    end_date: NaiveDate,
    policy: AccrualPolicy,
    day_count: DayCountConvention,
    target_value: Option<Money>,
}

impl Placement {
    /// builder for creating placements
    pub fn builder() -> PlacementBuilder {
        PlacementBuilder::new()
    }

    pub fn initial_capital(&self) -> &Money {
        &self.initial_capital
    }

    pub fn annual_rate(&self) -> &Rate {
        &self.annual_rate
    }

    pub fn frequency(&self) -> VariationFrequency {
        self.frequency
    }

    pub fn variation(&self) -> &Money {
        &self.variation
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn policy(&self) -> AccrualPolicy {
        self.policy
    }

    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// target acquired value the end date was derived from, if any
    pub fn target_value(&self) -> Option<&Money> {
        self.target_value.as_ref()
    }

    /// daily factor for the configured rate and day count
    pub fn daily_rate(&self) -> Rate {
        self.annual_rate.daily_rate(self.day_count.year_basis())
    }

    /// generate the installment ledger
    #[doc(alias = "tableauPlacement")]
    pub fn schedule(&self) -> Result<Schedule> {
        Schedule::generate(self)
    }

    /// generate the ledger and fold it into annual summaries
    pub fn annual_summaries(&self) -> Result<Vec<AnnualSummary>> {
        let schedule = self.schedule()?;
        Ok(to_annual_summaries(&schedule.installments))
    }

    /// earliest grid date on or after `start` where the acquired value reaches `target`
    #[doc(alias = "estimeDateFin")]
    pub fn estimate_end_date(&self, start: NaiveDate, target: &Money) -> Result<NaiveDate> {
        estimate_end_date(self, start, target)
    }

    /// request object describing this placement
    pub fn to_config(&self) -> PlacementConfig {
        let horizon = match &self.target_value {
            Some(target) => Horizon::TargetValue(target.clone()),
            None => Horizon::EndDate(self.end_date),
        };
        PlacementConfig {
            initial_capital: self.initial_capital.clone(),
            annual_rate: self.annual_rate.clone(),
            frequency: self.frequency,
            variation: self.variation.clone(),
            start_date: self.start_date,
            horizon,
            policy: self.policy,
            day_count: self.day_count,
        }
    }
}

/// fluent builder for [`Placement`]
#[derive(Debug, Clone, Default)]
pub struct PlacementBuilder {
    initial_capital: Option<Money>,
    annual_rate: Option<Rate>,
    frequency: Option<VariationFrequency>,
    variation: Option<Money>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    target_value: Option<Money>,
    policy: Option<AccrualPolicy>,
    day_count: Option<DayCountConvention>,
}

impl PlacementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_capital(mut self, capital: Money) -> Self {
        self.initial_capital = Some(capital);
        self
    }

    pub fn annual_rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn frequency(mut self, frequency: VariationFrequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn variation(mut self, variation: Money) -> Self {
        self.variation = Some(variation);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// derive the end date from a target acquired value instead
    pub fn target_value(mut self, target: Money) -> Self {
        self.target_value = Some(target);
        self
    }

    pub fn policy(mut self, policy: AccrualPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// validate and build
    pub fn build(self) -> Result<Placement> {
        let initial_capital = self
            .initial_capital
            .ok_or(PlacementError::MissingParameter { name: "initial_capital" })?;
        if !initial_capital.is_positive() {
            return Err(PlacementError::NonPositiveCapital { capital: initial_capital });
        }

        let annual_rate = self
            .annual_rate
            .ok_or(PlacementError::MissingParameter { name: "annual_rate" })?;
        if annual_rate.is_negative() {
            return Err(PlacementError::NegativeRate { rate: annual_rate });
        }

        let start_date = self
            .start_date
            .ok_or(PlacementError::MissingParameter { name: "start_date" })?;

        let mut placement = Placement {
            initial_capital,
            annual_rate,
            frequency: self.frequency.unwrap_or_default(),
            variation: self.variation.unwrap_or_default(),
            start_date,
            end_date: start_date,
            policy: self.policy.unwrap_or_default(),
            day_count: self.day_count.unwrap_or_default(),
            target_value: None,
        };

        match (self.end_date, self.target_value) {
            (Some(end), None) => {
                if end < start_date {
                    return Err(PlacementError::EndBeforeStart { start: start_date, end });
                }
                placement.end_date = end;
            }
            (None, Some(target)) => {
                if !target.is_positive() {
                    return Err(PlacementError::InvalidConfiguration {
                        message: format!("target value must be positive: {target}"),
                    });
                }
                placement.end_date = estimate_end_date(&placement, start_date, &target)?;
                placement.target_value = Some(target);
            }
            (Some(_), Some(_)) => {
                return Err(PlacementError::InvalidConfiguration {
                    message: "set either end_date or target_value, not both".to_string(),
                });
            }
            (None, None) => {
                return Err(PlacementError::MissingParameter {
                    name: "end_date or target_value",
                });
            }
        }

        debug!(
            capital = %placement.initial_capital,
            rate = %placement.annual_rate,
            frequency = %placement.frequency,
            start = %placement.start_date,
            end = %placement.end_date,
            policy = ?placement.policy,
            "placement built"
        );
        Ok(placement)
    }
}
