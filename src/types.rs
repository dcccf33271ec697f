use serde::{Deserialize, Serialize};
use std::fmt;

/// cadence at which the capital variation is applied
#[doc(alias = "FrequenceVariation")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VariationFrequency {
    #[default]
    Monthly,
    Bimonthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl VariationFrequency {
    pub const ALL: [VariationFrequency; 5] = [
        VariationFrequency::Monthly,
        VariationFrequency::Bimonthly,
        VariationFrequency::Quarterly,
        VariationFrequency::SemiAnnual,
        VariationFrequency::Annual,
    ];

    /// number of months between two variations
    pub fn months_per_period(&self) -> u32 {
        match self {
            VariationFrequency::Monthly => 1,
            VariationFrequency::Bimonthly => 2,
            VariationFrequency::Quarterly => 3,
            VariationFrequency::SemiAnnual => 6,
            VariationFrequency::Annual => 12,
        }
    }

    /// number of variations per year
    pub fn periods_per_year(&self) -> u32 {
        12 / self.months_per_period()
    }

    /// frequency for a period length in months, if one exists
    pub fn from_months(months: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.months_per_period() == months)
    }

    /// whether the variation applies on the `index`-th monthly period (0-based)
    pub fn applies_at(&self, index: u32) -> bool {
        index > 0 && index % self.months_per_period() == 0
    }
}

impl fmt::Display for VariationFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariationFrequency::Monthly => "monthly",
            VariationFrequency::Bimonthly => "bimonthly",
            VariationFrequency::Quarterly => "quarterly",
            VariationFrequency::SemiAnnual => "semi-annual",
            VariationFrequency::Annual => "annual",
        };
        write!(f, "{name}")
    }
}

/// rule set governing when a capital variation starts earning interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccrualPolicy {
    /// variations earn from their nominal date
    #[default]
    Strict,
    /// deposits earn from the next 1st or 16th of the month (quinzaine)
    Fortnight,
}

/// day count convention for the daily rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// actual days / 365
    #[default]
    Actual365,
    /// actual days / 360
    Actual360,
}

impl DayCountConvention {
    /// get year basis for the convention
    pub fn year_basis(&self) -> u32 {
        match self {
            DayCountConvention::Actual365 => 365,
            DayCountConvention::Actual360 => 360,
        }
    }
}
