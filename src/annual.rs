use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::schedule::Installment;

/// one calendar year of the ledger
#[doc(alias = "Annualite")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// 1-based year number of the placement
    pub index: u32,
    pub year: i32,
    /// balance before the year's first variation
    pub opening_capital: Money,
    pub closing_capital: Money,
    /// closing capital plus the year's interest
    pub acquired_value: Money,
    pub interest: Money,
    pub cumulative_interest: Money,
    /// the year's installments, in ledger order
    pub installments: Vec<Installment>,
}

/// fold an installment ledger into one summary per calendar year
///
/// Installments are grouped by the year of their date, in order; an empty
/// ledger gives no summaries.
#[doc(alias = "echeancesToAnnualites")]
pub fn to_annual_summaries(installments: &[Installment]) -> Vec<AnnualSummary> {
    installments
        .chunk_by(|a, b| a.date.year() == b.date.year())
        .zip(1..)
        .filter_map(|(group, index)| {
            let first = group.first()?;
            let last = group.last()?;
            let interest: Money = group.iter().map(|i| &i.interest).sum();
            Some(AnnualSummary {
                index,
                year: first.date.year(),
                opening_capital: first.capital_before_variation(),
                closing_capital: last.capital.clone(),
                acquired_value: &last.capital + &interest,
                interest,
                cumulative_interest: last.cumulative_interest.clone(),
                installments: group.to_vec(),
            })
        })
        .collect()
}
