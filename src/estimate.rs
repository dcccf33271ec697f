use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::accrual::accrue_period;
use crate::calendar::PeriodGrid;
use crate::decimal::Money;
use crate::errors::{PlacementError, Result};
use crate::placement::Placement;

/// upper bound on the periods walked before giving up, a century of months
pub const MAX_ESTIMATION_PERIODS: u32 = 1200;

/// grid date from which the acquired value reaches `target`
///
/// Walks the monthly grid from `start` with no end date, crediting each
/// period's interest to the running balance, and returns the start of the
/// first period after which `balance + cumulative interest` is at least
/// `target`. Uses the placement's capital, rate, variation, frequency and
/// accrual policy; its end date is ignored.
#[doc(alias = "estimeDateFin")]
pub fn estimate_end_date(placement: &Placement, start: NaiveDate, target: &Money) -> Result<NaiveDate> {
    let capital = placement.initial_capital();
    if target <= capital {
        return Ok(start);
    }
    if placement.annual_rate().is_zero() && !placement.variation().is_positive() {
        return Err(PlacementError::UnreachableTarget {
            target: target.clone(),
            reason: "no interest and no deposits".to_string(),
        });
    }

    let rule = placement.policy().rule();
    let daily_rate = placement.daily_rate();
    let mut balance = capital.clone();
    let mut cumulative_interest = Money::zero();

    for period in PeriodGrid::unbounded(start).take(MAX_ESTIMATION_PERIODS as usize) {
        let period = period?;
        let variation = if placement.frequency().applies_at(period.index) {
            placement.variation().clone()
        } else {
            Money::zero()
        };

        let accrual = accrue_period(rule, &period, &balance, &variation, &daily_rate)?;
        balance += &variation;
        balance += &accrual.interest;
        cumulative_interest += &accrual.interest;

        let acquired_value = &balance + &cumulative_interest;
        trace!(date = %period.start, value = %acquired_value, "estimation step");
        if &acquired_value >= target {
            debug!(
                target_value = %target,
                date = %period.start,
                periods = period.index + 1,
                "target reached"
            );
            return Ok(period.start);
        }
    }

    Err(PlacementError::UnreachableTarget {
        target: target.clone(),
        reason: format!("not reached within {MAX_ESTIMATION_PERIODS} months"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::placement::PlacementBuilder;
    use crate::types::{AccrualPolicy, VariationFrequency};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base(rate: &str) -> PlacementBuilder {
        Placement::builder()
            .initial_capital(Money::from_major(10_000))
            .annual_rate(Rate::from_str_exact(rate).unwrap())
            .start_date(date(2015, 1, 1))
            .end_date(date(2015, 1, 1))
    }

    #[test]
    fn test_reference_estimate() {
        let placement = base("0.12").build().unwrap();
        let estimated = placement
            .estimate_end_date(date(2015, 1, 1), &Money::from_major(12_000))
            .unwrap();
        assert_eq!(estimated, date(2015, 10, 1));
    }

    #[test]
    fn test_lands_on_grid() {
        let placement = base("0.12").build().unwrap();
        let estimated = placement
            .estimate_end_date(date(2015, 1, 1), &Money::from_major(11_000))
            .unwrap();
        assert_eq!(chrono::Datelike::day(&estimated), 1);
        assert!(estimated > date(2015, 1, 1));
    }

    #[test]
    fn test_monotone_in_target() {
        let placement = base("0.05").variation(Money::from_major(50)).build().unwrap();
        let start = date(2015, 1, 1);
        let lower = placement
            .estimate_end_date(start, &Money::from_major(11_000))
            .unwrap();
        let higher = placement
            .estimate_end_date(start, &Money::from_major(13_000))
            .unwrap();
        assert!(lower < higher);
    }

    #[test]
    fn test_target_already_reached() {
        let placement = base("0.12").build().unwrap();
        let start = date(2015, 1, 1);
        assert_eq!(
            placement.estimate_end_date(start, &Money::from_major(10_000)).unwrap(),
            start
        );
        assert_eq!(
            placement.estimate_end_date(start, &Money::from_major(500)).unwrap(),
            start
        );
    }

    #[test]
    fn test_zero_rate_without_deposits_is_unreachable() {
        let placement = base("0").build().unwrap();
        let err = placement
            .estimate_end_date(date(2015, 1, 1), &Money::from_major(12_000))
            .unwrap_err();
        assert!(matches!(err, PlacementError::UnreachableTarget { .. }));
    }

    #[test]
    fn test_zero_rate_with_deposits() {
        let placement = base("0")
            .variation(Money::from_major(500))
            .frequency(VariationFrequency::Quarterly)
            .build()
            .unwrap();
        // deposits land at months 3, 6, 9 and 12
        let estimated = placement
            .estimate_end_date(date(2015, 1, 1), &Money::from_major(12_000))
            .unwrap();
        assert_eq!(estimated, date(2016, 1, 1));
    }

    #[test]
    fn test_withdrawals_hit_the_walk_limit() {
        let placement = base("0.01")
            .variation(Money::from_major(-200))
            .build()
            .unwrap();
        let err = placement
            .estimate_end_date(date(2015, 1, 1), &Money::from_major(20_000))
            .unwrap_err();
        assert!(matches!(err, PlacementError::UnreachableTarget { .. }));
    }

    #[test]
    fn test_fortnight_policy_is_no_earlier() {
        let strict = Placement::builder()
            .initial_capital(Money::from_major(1_000))
            .annual_rate(Rate::from_str_exact("0.03").unwrap())
            .variation(Money::from_major(100))
            .start_date(date(2020, 1, 10))
            .end_date(date(2020, 1, 10));
        let fortnight = strict.clone().policy(AccrualPolicy::Fortnight);
        let target = Money::from_major(5_000);
        let start = date(2020, 1, 10);
        let strict_date = strict.build().unwrap().estimate_end_date(start, &target).unwrap();
        let fortnight_date = fortnight
            .build()
            .unwrap()
            .estimate_end_date(start, &target)
            .unwrap();
        assert!(fortnight_date >= strict_date);
    }
}
