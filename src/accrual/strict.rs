use chrono::NaiveDate;

use crate::accrual::AccrualRule;
use crate::decimal::Money;
use crate::errors::Result;

/// variations earn interest from their nominal date
#[doc(alias = "PlacementSansQuinzaine")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictAccrual;

impl AccrualRule for StrictAccrual {
    fn effective_date(&self, nominal: NaiveDate, _variation: &Money) -> Result<NaiveDate> {
        Ok(nominal)
    }

    fn name(&self) -> &'static str {
        "strict"
    }
}
