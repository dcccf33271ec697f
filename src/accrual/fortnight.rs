use chrono::NaiveDate;

use crate::accrual::AccrualRule;
use crate::calendar::next_fortnight_start;
use crate::decimal::Money;
use crate::errors::Result;

/// regulated-savings quinzaine rule
///
/// A variation, deposit or withdrawal, takes effect on the first 1st or 16th
/// of a month on or after its nominal date. Until then the previous balance
/// keeps earning.
#[doc(alias = "PlacementAvecQuinzaine")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FortnightAccrual;

impl AccrualRule for FortnightAccrual {
    fn effective_date(&self, nominal: NaiveDate, _variation: &Money) -> Result<NaiveDate> {
        next_fortnight_start(nominal)
    }

    fn name(&self) -> &'static str {
        "fortnight"
    }
}
