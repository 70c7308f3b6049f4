use chrono::DateTime;
use chrono::Datelike;
use chrono::Days;
use chrono::Months;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::TimeDelta;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const DAYS_IN_WEEK: u64 = 7;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CalendarError
{
    #[error("month {month} of year {year} is outside the supported calendar range")]
    DateOutOfRange
    {
        year: i32,
        month: i32,
    },
}

/// A Monday-to-Sunday week.
///
/// `start` is Monday 00:00:00.000 UTC and `end` is the following Sunday
/// 23:59:59.999 UTC. The label is the `D/M - D/M` form shown in the week
/// picker.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct WeekRange
{
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    label: String,
}

impl WeekRange
{
    /// The week containing `date`.
    pub fn containing(date: NaiveDate) -> Option<Self>
    {
        let monday = date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))?;
        Self::from_monday(monday)
    }

    fn from_monday(monday: NaiveDate) -> Option<Self>
    {
        let sunday = monday.checked_add_days(Days::new(DAYS_IN_WEEK - 1))?;
        let start = monday.and_time(NaiveTime::MIN).and_utc();
        let end = sunday
            .and_time(NaiveTime::MIN)
            .and_utc()
            .checked_add_signed(TimeDelta::days(1) - TimeDelta::milliseconds(1))?;

        Some(Self {
            start,
            end,
            label: format!("{}/{} - {}/{}", monday.day(), monday.month(), sunday.day(), sunday.month()),
        })
    }

    pub fn start(&self) -> DateTime<Utc>
    {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc>
    {
        self.end
    }

    pub fn label(&self) -> &str
    {
        &self.label
    }

    pub fn start_date(&self) -> NaiveDate
    {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate
    {
        self.end.date_naive()
    }

    /// Inclusive on both ends. Only the calendar date is compared.
    pub fn contains(&self, date: NaiveDate) -> bool
    {
        self.start_date() <= date && date <= self.end_date()
    }
}

/// The weeks overlapping one calendar month, ascending and gapless.
///
/// `month` is zero-based (0 = January) to match the month picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthWeeks
{
    year: i32,
    month: u32,
    weeks: Vec<WeekRange>,
}

impl MonthWeeks
{
    pub fn year(&self) -> i32
    {
        self.year
    }

    pub fn month(&self) -> u32
    {
        self.month
    }

    pub fn weeks(&self) -> &[WeekRange]
    {
        &self.weeks
    }

    pub fn len(&self) -> usize
    {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.weeks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WeekRange>
    {
        self.weeks.get(index)
    }

    pub fn find_week_index(&self, date: NaiveDate) -> usize
    {
        find_week_index(&self.weeks, date)
    }

    /// Whether `date` falls in this calendar month, not merely in one of its
    /// edge weeks.
    pub fn is_month_of(&self, date: NaiveDate) -> bool
    {
        date.year() == self.year && date.month0() == self.month
    }
}

/// Rolls an out-of-range zero-based month into the adjacent years, so
/// `(2025, -1)` is December 2024 and `(2025, 12)` is January 2026.
pub fn normalize_month(year: i32, month: i32) -> Result<(i32, u32), CalendarError>
{
    let out_of_range = CalendarError::DateOutOfRange { year, month };
    let absolute = i64::from(year) * 12 + i64::from(month);
    let normalized_year = i32::try_from(absolute.div_euclid(12)).map_err(|_| out_of_range.clone())?;
    let normalized_month = u32::try_from(absolute.rem_euclid(12)).map_err(|_| out_of_range)?;
    Ok((normalized_year, normalized_month))
}

/// Computes the Monday-start weeks that overlap the given month.
///
/// The first week contains the 1st of the month and the last week contains
/// its last day, so the edge weeks may reach into the neighbouring months.
/// Week `i` starts exactly `7 * i` days after the first Monday.
pub fn compute_month_weeks(year: i32, month: i32) -> Result<MonthWeeks, CalendarError>
{
    let out_of_range = || CalendarError::DateOutOfRange { year, month };
    let (normalized_year, normalized_month) = normalize_month(year, month)?;

    let first_of_month = NaiveDate::from_ymd_opt(normalized_year, normalized_month + 1, 1).ok_or_else(out_of_range)?;
    let last_of_month = first_of_month
        .checked_add_months(Months::new(1))
        .and_then(|first_of_next| first_of_next.pred_opt())
        .ok_or_else(out_of_range)?;

    let first_monday = first_of_month
        .checked_sub_days(Days::new(u64::from(first_of_month.weekday().num_days_from_monday())))
        .ok_or_else(out_of_range)?;
    let last_sunday = last_of_month
        .checked_add_days(Days::new(DAYS_IN_WEEK - 1 - u64::from(last_of_month.weekday().num_days_from_monday())))
        .ok_or_else(out_of_range)?;

    let mut weeks = Vec::with_capacity(6);
    for week_number in 0.. {
        let week_start = first_monday
            .checked_add_days(Days::new(DAYS_IN_WEEK * week_number))
            .ok_or_else(out_of_range)?;
        if week_start > last_sunday {
            break;
        }

        let week = WeekRange::from_monday(week_start).ok_or_else(out_of_range)?;
        if week.end_date() >= first_of_month && week.start_date() <= last_of_month {
            weeks.push(week);
        }
    }

    debug!(
        target: "schedule_grid::calendar",
        year = normalized_year,
        month = normalized_month,
        weeks = weeks.len(),
        "computed month weeks"
    );

    Ok(MonthWeeks {
        year: normalized_year,
        month: normalized_month,
        weeks,
    })
}

/// Index of the week containing `date`, or `0` when no week does. The
/// caller always gets an index it can display.
pub fn find_week_index(weeks: &[WeekRange], date: NaiveDate) -> usize
{
    weeks.iter().position(|week| week.contains(date)).unwrap_or(0)
}
