use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::accrual::accrue_period;
use crate::calendar::PeriodGrid;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::placement::Placement;

/// one row of the accrual ledger
#[doc(alias = "Echeance")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position in the ledger
    pub index: u32,
    /// period start, also the nominal date of its variation
    pub date: NaiveDate,
    pub last_day: NaiveDate,
    /// accrued day count, `last_day - date`
    pub days: i64,
    /// the placement's opening capital
    pub initial_capital: Money,
    /// balance after this installment's variation
    pub capital: Money,
    pub variation: Money,
    pub variation_effective_date: Option<NaiveDate>,
    /// interest accrued over this period only
    pub interest: Money,
    pub cumulative_interest: Money,
    /// period cut short by the end date
    pub partial: bool,
}

impl Installment {
    /// balance before this installment's variation
    pub fn capital_before_variation(&self) -> Money {
        &self.capital - &self.variation
    }
}

/// installment ledger for a placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub initial_capital: Money,
    pub annual_rate: Rate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub installments: Vec<Installment>,
    pub total_interest: Money,
    pub total_variations: Money,
    /// closing balance plus interest not yet capitalized
    pub acquired_value: Money,
}

impl Schedule {
    /// generate the ledger from the start date to the end date
    ///
    /// One installment per month of the grid. Interest accrues on the
    /// balance after the period's variation (split at the variation's
    /// effective date under the fortnight policy) and is capitalized when a
    /// period opens in a new calendar year.
    #[doc(alias = "tableauPlacement")]
    pub fn generate(placement: &Placement) -> Result<Self> {
        let rule = placement.policy().rule();
        let daily_rate = placement.daily_rate();
        let initial_capital = placement.initial_capital().clone();

        let mut balance = initial_capital.clone();
        let mut year_interest = Money::zero();
        let mut cumulative_interest = Money::zero();
        let mut total_variations = Money::zero();
        let mut current_year: Option<i32> = None;
        let mut installments = Vec::new();

        for period in PeriodGrid::bounded(placement.start_date(), placement.end_date()) {
            let period = period?;

            let year = period.start.year();
            if current_year.is_some_and(|y| y != year) {
                trace!(year, capitalized = %year_interest, "capitalizing interest");
                balance += std::mem::take(&mut year_interest);
            }
            current_year = Some(year);

            let variation = if placement.frequency().applies_at(period.index) {
                placement.variation().clone()
            } else {
                Money::zero()
            };

            let accrual = accrue_period(rule, &period, &balance, &variation, &daily_rate)?;

            balance += &variation;
            total_variations += &variation;
            cumulative_interest += &accrual.interest;
            year_interest += &accrual.interest;

            installments.push(Installment {
                index: period.index + 1,
                date: period.start,
                last_day: period.last_day,
                days: period.days(),
                initial_capital: initial_capital.clone(),
                capital: balance.clone(),
                variation,
                variation_effective_date: accrual.effective_date,
                interest: accrual.interest,
                cumulative_interest: cumulative_interest.clone(),
                partial: period.partial,
            });
        }

        let acquired_value = &balance + &year_interest;
        debug!(
            installments = installments.len(),
            policy = rule.name(),
            total_interest = %cumulative_interest,
            acquired_value = %acquired_value,
            "schedule generated"
        );

        Ok(Self {
            initial_capital,
            annual_rate: placement.annual_rate().clone(),
            start_date: placement.start_date(),
            end_date: placement.end_date(),
            installments,
            total_interest: cumulative_interest,
            total_variations,
            acquired_value,
        })
    }

    /// get installment by 1-based index
    pub fn get(&self, index: u32) -> Option<&Installment> {
        index
            .checked_sub(1)
            .and_then(|i| self.installments.get(i as usize))
    }

    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccrualPolicy, DayCountConvention, VariationFrequency};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    fn reference(frequency: VariationFrequency, end: NaiveDate) -> Placement {
        Placement::builder()
            .initial_capital(Money::from_major(10_000))
            .annual_rate(Rate::from_str_exact("0.12").unwrap())
            .frequency(frequency)
            .variation(Money::from_major(100))
            .start_date(date(2015, 1, 1))
            .end_date(end)
            .build()
            .unwrap()
    }

    fn assert_row(
        row: &Installment,
        index: u32,
        capital: &str,
        variation: &str,
        interest: &str,
        cumulative: &str,
    ) {
        assert_eq!(row.index, index);
        assert_eq!(row.initial_capital, money("10000"));
        assert_eq!(row.capital, money(capital), "capital of #{index}");
        assert_eq!(row.variation, money(variation), "variation of #{index}");
        assert_eq!(row.interest, money(interest), "interest of #{index}");
        assert_eq!(row.cumulative_interest, money(cumulative), "cumulative of #{index}");
    }

    #[test]
    fn test_monthly_ledger_with_partial_tail() {
        let schedule = reference(VariationFrequency::Monthly, date(2017, 2, 4))
            .schedule()
            .unwrap();
        assert_eq!(schedule.len(), 26);

        let rows = &schedule.installments;
        assert_row(
            &rows[0],
            1,
            "10000",
            "0",
            "98.630136986301369863013698630136990",
            "98.630136986301369863013698630136990",
        );
        assert_row(
            &rows[1],
            2,
            "10100",
            "100",
            "89.654794520547945205479452054794515",
            "188.284931506849315068493150684931505",
        );
        assert_row(
            &rows[12],
            13,
            "12424.690410958904109589041095890411012",
            "100",
            "122.544891724526177519234377932069810",
            "1347.235302683430287108275473822480822",
        );
        assert_row(
            &rows[24],
            25,
            "15134.895475774066428973541002064177245",
            "100",
            "149.275681404894901765218486595701480",
            "2884.171157178961330738759488659878725",
        );
        assert_row(
            &rows[25],
            26,
            "15234.895475774066428973541002064177245",
            "100",
            "15.02619827747579154638486235820028",
            "2899.197355456437122285144351018079005",
        );

        let tail = &rows[25];
        assert!(tail.partial);
        assert_eq!(tail.date, date(2017, 2, 1));
        assert_eq!(tail.last_day, date(2017, 2, 4));
        assert_eq!(tail.days, 3);
        assert!(rows[..25].iter().all(|row| !row.partial));
    }

    #[test]
    fn test_quarterly_variation_timing() {
        let schedule = reference(VariationFrequency::Quarterly, date(2017, 2, 4))
            .schedule()
            .unwrap();
        assert_eq!(schedule.len(), 26);

        let rows = &schedule.installments;
        assert_row(
            &rows[0],
            1,
            "10000",
            "0",
            "98.630136986301369863013698630136990",
            "98.630136986301369863013698630136990",
        );
        assert_row(
            &rows[1],
            2,
            "10000",
            "0",
            "88.767123287671232876712328767123291",
            "187.397260273972602739726027397260281",
        );
        assert_row(
            &rows[3],
            4,
            "10100",
            "100",
            "96.295890410958904109589041095890405",
            "382.323287671232876712328767123287676",
        );
        assert_row(
            &rows[24],
            25,
            "13343.091687596171889660349033589791782",
            "100",
            "131.603096096838955624047278139515760",
            "2674.694783693010845284396311729307542",
        );

        for row in rows {
            let expected = if row.index > 1 && (row.index - 1) % 3 == 0 {
                money("100")
            } else {
                Money::zero()
            };
            assert_eq!(row.variation, expected, "variation of #{}", row.index);
        }
    }

    #[test]
    fn test_frequency_keeps_span() {
        let monthly = reference(VariationFrequency::Monthly, date(2017, 2, 4))
            .schedule()
            .unwrap();
        let quarterly = reference(VariationFrequency::Quarterly, date(2017, 2, 4))
            .schedule()
            .unwrap();
        let days = |s: &Schedule| s.installments.iter().map(|r| r.days).sum::<i64>();
        assert_eq!(monthly.len(), quarterly.len());
        assert_eq!(days(&monthly), days(&quarterly));
        assert_eq!(monthly.total_variations, money("2500"));
        assert_eq!(quarterly.total_variations, money("800"));
    }

    #[test]
    fn test_deterministic() {
        let placement = reference(VariationFrequency::Monthly, date(2017, 2, 4));
        assert_eq!(placement.schedule().unwrap(), placement.schedule().unwrap());
    }

    #[test]
    fn test_ledger_invariants() {
        let schedule = reference(VariationFrequency::Monthly, date(2019, 7, 19))
            .schedule()
            .unwrap();
        assert!(schedule.installments[0].variation.is_zero());

        let mut previous_cumulative = Money::zero();
        for pair in schedule.installments.windows(2) {
            let (prev, row) = (&pair[0], &pair[1]);
            // conservation, allowing for interest capitalized on a new year
            let capitalized = if prev.date.year() != row.date.year() {
                schedule
                    .installments
                    .iter()
                    .filter(|r| r.date.year() == prev.date.year())
                    .map(|r| &r.interest)
                    .sum()
            } else {
                Money::zero()
            };
            assert_eq!(row.capital_before_variation(), &prev.capital + &capitalized);
            assert!(row.cumulative_interest >= previous_cumulative);
            previous_cumulative = row.cumulative_interest.clone();
        }
        assert!(schedule.installments.iter().all(|r| r.days > 0));
    }

    #[test]
    fn test_acquired_value() {
        let schedule = reference(VariationFrequency::Monthly, date(2017, 2, 1))
            .schedule()
            .unwrap();
        assert_eq!(schedule.len(), 25);
        assert_eq!(
            schedule.acquired_value,
            money("15284.171157178961330738759488659878725")
        );
        assert_eq!(
            schedule.total_interest,
            money("2884.171157178961330738759488659878725")
        );
        assert_eq!(schedule.get(25).map(|r| r.date), Some(date(2017, 1, 1)));
        assert_eq!(schedule.get(0), None);
    }

    #[test]
    fn test_fortnight_policy_defers_deposits() {
        let builder = Placement::builder()
            .initial_capital(Money::from_major(1_000))
            .annual_rate(Rate::from_str_exact("0.0365").unwrap())
            .variation(Money::from_major(50))
            .start_date(date(2020, 1, 10))
            .end_date(date(2020, 4, 10));

        let strict = builder.clone().build().unwrap().schedule().unwrap();
        let fortnight = builder
            .policy(AccrualPolicy::Fortnight)
            .build()
            .unwrap()
            .schedule()
            .unwrap();

        let interest = |s: &Schedule| {
            s.installments.iter().map(|r| r.interest.clone()).collect::<Vec<_>>()
        };
        assert_eq!(interest(&strict), vec![money("3"), money("2.94"), money("3.3")]);
        assert_eq!(interest(&fortnight), vec![money("3"), money("2.91"), money("3.27")]);
        assert_eq!(fortnight.total_interest, money("9.18"));

        let effective: Vec<_> = fortnight
            .installments
            .iter()
            .map(|r| r.variation_effective_date)
            .collect();
        assert_eq!(effective, vec![None, Some(date(2020, 2, 16)), Some(date(2020, 3, 16))]);
        // the grid and the balances are unchanged
        let capitals = |s: &Schedule| {
            s.installments.iter().map(|r| r.capital.clone()).collect::<Vec<_>>()
        };
        assert_eq!(capitals(&strict), capitals(&fortnight));
    }

    #[test]
    fn test_fortnight_matches_strict_on_fortnight_grid() {
        let mut config = reference(VariationFrequency::Monthly, date(2017, 2, 4)).to_config();
        let strict = config.clone().into_placement().unwrap().schedule().unwrap();
        config.policy = AccrualPolicy::Fortnight;
        let fortnight = config.into_placement().unwrap().schedule().unwrap();
        assert_eq!(strict.installments, fortnight.installments);
    }

    #[test]
    fn test_withdrawals() {
        let schedule = Placement::builder()
            .initial_capital(Money::from_major(1_000))
            .annual_rate(Rate::from_str_exact("0.0365").unwrap())
            .variation(Money::from_major(-100))
            .start_date(date(2020, 1, 10))
            .end_date(date(2020, 3, 10))
            .policy(AccrualPolicy::Fortnight)
            .build()
            .unwrap()
            .schedule()
            .unwrap();
        assert_eq!(schedule.installments[1].capital, money("900"));
        // 6 days on 1000 until the 16th, then 22 days on 900
        assert_eq!(schedule.installments[1].interest, money("2.58"));
        assert_eq!(
            schedule.installments[1].variation_effective_date,
            Some(date(2020, 2, 16))
        );
    }

    #[test]
    fn test_actual_360_day_count() {
        let builder = Placement::builder()
            .initial_capital(Money::from_major(10_000))
            .annual_rate(Rate::from_str_exact("0.12").unwrap())
            .start_date(date(2015, 1, 1))
            .end_date(date(2015, 3, 1));
        let actual_360 = builder
            .clone()
            .day_count(DayCountConvention::Actual360)
            .build()
            .unwrap()
            .schedule()
            .unwrap();
        let actual_365 = builder.build().unwrap().schedule().unwrap();

        // 0.12 / 360 is kept to 34 significant digits
        let january = &actual_360.installments[0];
        assert_eq!(january.days, 30);
        assert_eq!(january.interest, money("99.999999999999999999999999999999990"));
        assert_eq!(january.interest.round_dp(2), money("100.00"));
        assert_eq!(
            actual_360.total_interest,
            money("189.999999999999999999999999999999981")
        );
        assert!(actual_360.total_interest > actual_365.total_interest);
    }
}
