//! Payday period calculator
//!
//! Turns a payday anchor into rolling salary-to-salary windows. A period
//! starts on the anchor day (clamped to the month's length) and ends the
//! day before the next anchor occurrence, so consecutive periods tile the
//! calendar with no gap and no overlap.
//!
//! Every boundary is derived from a month index and re-clamped for that
//! month; nothing steps by a fixed number of days, so anchors above 28
//! never drift. Plain calendar months are the anchor-1 case.
//!
//! The calculator is a `Copy` value with no interior state and no I/O; it
//! can be shared freely between threads. Callers that want caching own it.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

use crate::error::{PaydayError, PaydayResult};
use crate::models::{LabeledPeriod, PaydayAnchor, Period, PeriodSelection, PeriodType};

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Months since year 0, so month arithmetic is plain integer arithmetic
fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn year_month(index: i32) -> (i32, u32) {
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn out_of_range(what: impl std::fmt::Display) -> PaydayError {
    PaydayError::invalid_argument(format!("{} is outside the supported date range", what))
}

/// Computes payday periods for one anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PeriodCalculator {
    anchor: PaydayAnchor,
}

impl PeriodCalculator {
    pub fn new(anchor: PaydayAnchor) -> Self {
        Self { anchor }
    }

    /// Calculator for plain calendar months (anchor on the 1st)
    pub fn calendar_month() -> Self {
        Self::new(PaydayAnchor::CALENDAR_MONTH)
    }

    /// Validate a raw day-of-month and build a calculator for it
    pub fn for_day(day: u32) -> PaydayResult<Self> {
        Ok(Self::new(PaydayAnchor::new(day)?))
    }

    pub fn anchor(&self) -> PaydayAnchor {
        self.anchor
    }

    /// Anchor date in the month with the given index
    fn occurrence(&self, index: i32) -> PaydayResult<NaiveDate> {
        let (year, month) = year_month(index);
        self.anchor
            .occurrence(year, month)
            .ok_or_else(|| out_of_range(format!("{:04}-{:02}", year, month)))
    }

    /// Month index of the anchor occurrence that opens the period holding `reference`.
    ///
    /// The anchor day itself opens a new period.
    fn opening_month(&self, reference: NaiveDate) -> i32 {
        let index = month_index(reference);
        match self.anchor.effective_day(reference.year(), reference.month()) {
            Some(day) if reference.day() < day => index - 1,
            _ => index,
        }
    }

    /// The period opened by the anchor occurrence in month `index`
    fn period_opening_in(&self, index: i32) -> PaydayResult<Period> {
        let start = self.occurrence(index)?;
        let next_start = self.occurrence(index + 1)?;
        let end = next_start.pred_opt().ok_or_else(|| out_of_range(next_start))?;
        Period::new(start, end)
    }

    /// First day of the period containing `reference`
    pub fn current_period_start(&self, reference: NaiveDate) -> PaydayResult<NaiveDate> {
        self.occurrence(self.opening_month(reference))
    }

    /// Last day of the period containing `reference`: the day before the
    /// next anchor occurrence
    pub fn current_period_end(&self, reference: NaiveDate) -> PaydayResult<NaiveDate> {
        Ok(self.current_period(reference)?.end())
    }

    pub fn current_period(&self, reference: NaiveDate) -> PaydayResult<Period> {
        self.period_opening_in(self.opening_month(reference))
    }

    /// The period immediately before the one containing `reference`.
    ///
    /// Its end is the day before the current start; its start is the anchor
    /// one month earlier, re-clamped for that month.
    pub fn previous_period(&self, reference: NaiveDate) -> PaydayResult<Period> {
        self.period_opening_in(self.opening_month(reference) - 1)
    }

    /// The period immediately after the one containing `reference`
    pub fn next_period(&self, reference: NaiveDate) -> PaydayResult<Period> {
        self.period_opening_in(self.opening_month(reference) + 1)
    }

    /// Resolve a dashboard selection relative to `reference`
    pub fn period_for(
        &self,
        selection: PeriodSelection,
        reference: NaiveDate,
    ) -> PaydayResult<Period> {
        match selection {
            PeriodSelection::Current => self.current_period(reference),
            PeriodSelection::Previous => self.previous_period(reference),
        }
    }

    /// The last `count` periods up to today, oldest first
    pub fn historical_periods(&self, count: usize) -> PaydayResult<Vec<LabeledPeriod>> {
        self.historical_periods_at(count, today())
    }

    /// The last `count` periods up to and including the one containing
    /// `reference`, oldest first.
    ///
    /// Each period is computed from its own month index rather than by
    /// stepping back from its neighbour.
    pub fn historical_periods_at(
        &self,
        count: usize,
        reference: NaiveDate,
    ) -> PaydayResult<Vec<LabeledPeriod>> {
        if count == 0 {
            return Err(PaydayError::invalid_argument(
                "period count must be at least 1",
            ));
        }
        let span = i32::try_from(count).map_err(|_| {
            PaydayError::invalid_argument(format!("period count {} is too large", count))
        })?;

        let current = self.opening_month(reference);
        (0..span)
            .rev()
            .map(|ago| {
                let period = self.period_opening_in(current - ago)?;
                Ok(LabeledPeriod::new(period, ago as usize))
            })
            .collect()
    }

    /// Label of the period containing `reference` ("Dec 25 - Jan 24, 2024")
    pub fn format_period_label(&self, reference: NaiveDate) -> PaydayResult<String> {
        Ok(self.current_period(reference)?.label())
    }

    /// Window used by limits and targets of the given cadence.
    ///
    /// Daily is the reference day, weekly the seven days starting on
    /// `week_start`, monthly the payday period for this anchor.
    pub fn window(
        &self,
        period_type: PeriodType,
        week_start: Weekday,
        reference: NaiveDate,
    ) -> PaydayResult<Period> {
        match period_type {
            PeriodType::Daily => Ok(Period::day(reference)),
            PeriodType::Weekly => {
                let offset = (reference.weekday().num_days_from_monday() + 7
                    - week_start.num_days_from_monday())
                    % 7;
                let start = reference
                    .checked_sub_days(Days::new(u64::from(offset)))
                    .ok_or_else(|| out_of_range(reference))?;
                let end = start
                    .checked_add_days(Days::new(6))
                    .ok_or_else(|| out_of_range(start))?;
                Period::new(start, end)
            }
            PeriodType::Monthly => self.current_period(reference),
        }
    }
}

/// First day of the payday period containing `reference`.
///
/// Fails with `InvalidArgument` when `anchor` is outside `1..=31`.
pub fn current_period_start(anchor: u32, reference: NaiveDate) -> PaydayResult<NaiveDate> {
    PeriodCalculator::for_day(anchor)?.current_period_start(reference)
}

/// Last day of the payday period containing `reference`
pub fn current_period_end(anchor: u32, reference: NaiveDate) -> PaydayResult<NaiveDate> {
    PeriodCalculator::for_day(anchor)?.current_period_end(reference)
}

/// The payday period before the one containing `reference`
pub fn previous_period(anchor: u32, reference: NaiveDate) -> PaydayResult<Period> {
    PeriodCalculator::for_day(anchor)?.previous_period(reference)
}

/// The last `count` payday periods up to today, oldest first
pub fn historical_periods(anchor: u32, count: usize) -> PaydayResult<Vec<LabeledPeriod>> {
    PeriodCalculator::for_day(anchor)?.historical_periods(count)
}

/// The last `count` payday periods up to the one containing `reference`
pub fn historical_periods_at(
    anchor: u32,
    count: usize,
    reference: NaiveDate,
) -> PaydayResult<Vec<LabeledPeriod>> {
    PeriodCalculator::for_day(anchor)?.historical_periods_at(count, reference)
}

/// Inclusive containment test
pub fn is_within_period(date: NaiveDate, period: &Period) -> bool {
    period.contains(date)
}

/// Label of the payday period containing `reference`
pub fn format_period_label(anchor: u32, reference: NaiveDate) -> PaydayResult<String> {
    PeriodCalculator::for_day(anchor)?.format_period_label(reference)
}
