pub mod fortnight;
pub mod strict;

use chrono::NaiveDate;

use crate::calendar::{days_between, Period};
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::types::AccrualPolicy;

pub use fortnight::FortnightAccrual;
pub use strict::StrictAccrual;

/// trait for the effective-date rule of an accrual policy
pub trait AccrualRule {
    /// date from which a `variation` applied on `nominal` earns interest
    fn effective_date(&self, nominal: NaiveDate, variation: &Money) -> Result<NaiveDate>;

    fn name(&self) -> &'static str;
}

impl AccrualPolicy {
    /// rule implementing this policy
    pub fn rule(&self) -> &'static dyn AccrualRule {
        match self {
            AccrualPolicy::Strict => &StrictAccrual,
            AccrualPolicy::Fortnight => &FortnightAccrual,
        }
    }
}

/// interest accrued over one period
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodAccrual {
    pub interest: Money,
    /// when the period's variation started earning, if it had one
    pub effective_date: Option<NaiveDate>,
}

/// accrue one period of the grid
///
/// `balance_before` earns until the variation's effective date, then
/// `balance_before + variation` earns until the period's last day. The
/// effective date is clamped into the period.
pub fn accrue_period(
    rule: &dyn AccrualRule,
    period: &Period,
    balance_before: &Money,
    variation: &Money,
    daily_rate: &Rate,
) -> Result<PeriodAccrual> {
    let balance_after = balance_before + variation;

    let (interest, effective_date) = if variation.is_zero() {
        (balance_after.accrue(daily_rate, period.days()), None)
    } else {
        let effective = rule
            .effective_date(period.start, variation)?
            .clamp(period.start, period.last_day);
        let before = balance_before.accrue(daily_rate, days_between(period.start, effective));
        let after = balance_after.accrue(daily_rate, days_between(effective, period.last_day));
        (before + after, Some(effective))
    };

    // a cut-short period is rounded to working precision
    let interest = if period.partial {
        interest.to_working_precision()
    } else {
        interest
    };

    Ok(PeriodAccrual {
        interest,
        effective_date,
    })
}
