use chrono::Datelike;
use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::CalendarError;
use crate::calendar::MonthWeeks;
use crate::calendar::WeekRange;
use crate::calendar::compute_month_weeks;

/// Month and week selection of the schedule pages.
///
/// Selecting the month that contains `today` lands on today's week; any
/// other month lands on its first week. Week stepping is clamped to the
/// selected month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleNavigator
{
    weeks: MonthWeeks,
    current_week_index: usize,
}

impl ScheduleNavigator
{
    /// Starts on the month and week containing `today`.
    pub fn new(today: NaiveDate) -> Result<Self, CalendarError>
    {
        let weeks = compute_month_weeks(today.year(), month_index(today))?;
        let current_week_index = weeks.find_week_index(today);
        Ok(Self { weeks, current_week_index })
    }

    pub fn year(&self) -> i32
    {
        self.weeks.year()
    }

    /// Zero-based.
    pub fn month(&self) -> u32
    {
        self.weeks.month()
    }

    pub fn weeks(&self) -> &MonthWeeks
    {
        &self.weeks
    }

    pub fn current_week_index(&self) -> usize
    {
        self.current_week_index
    }

    pub fn current_week(&self) -> &WeekRange
    {
        &self.weeks.weeks()[self.current_week_index]
    }

    /// Recomputes the weeks for `(year, month)`. On error the selection is
    /// left untouched.
    pub fn select_month(&mut self, year: i32, month: i32, today: NaiveDate) -> Result<(), CalendarError>
    {
        let weeks = compute_month_weeks(year, month)?;
        let current_week_index = if weeks.is_month_of(today) { weeks.find_week_index(today) } else { 0 };

        debug!(
            target: "schedule_grid::navigation",
            year = weeks.year(),
            month = weeks.month(),
            current_week_index,
            "selected month"
        );

        self.weeks = weeks;
        self.current_week_index = current_week_index;
        Ok(())
    }

    pub fn previous_month(&mut self, today: NaiveDate) -> Result<(), CalendarError>
    {
        self.select_month(self.year(), self.month() as i32 - 1, today)
    }

    pub fn next_month(&mut self, today: NaiveDate) -> Result<(), CalendarError>
    {
        self.select_month(self.year(), self.month() as i32 + 1, today)
    }

    /// Returns the new index. Stays on the first week instead of wrapping.
    pub fn previous_week(&mut self) -> usize
    {
        self.current_week_index = self.current_week_index.saturating_sub(1);
        self.current_week_index
    }

    /// Returns the new index. Stays on the last week instead of wrapping.
    pub fn next_week(&mut self) -> usize
    {
        let last = self.weeks.len().saturating_sub(1);
        self.current_week_index = (self.current_week_index + 1).min(last);
        self.current_week_index
    }

    pub fn go_to_today(&mut self, today: NaiveDate) -> Result<(), CalendarError>
    {
        self.select_month(today.year(), month_index(today), today)
    }
}

fn month_index(date: NaiveDate) -> i32
{
    // `month0` is at most 11.
    date.month0() as i32
}
