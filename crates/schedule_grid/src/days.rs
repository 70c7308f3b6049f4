use chrono::Datelike;
use chrono::Days;
use chrono::NaiveDate;
use chrono::Weekday;
use schedule_environment::WORK_DATE_FORMAT;
use serde::Serialize;

use crate::calendar::CalendarError;

/// One column header of the weekly grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell
{
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub day_num: u32,
    /// 1-based.
    pub month: u32,
    pub is_today: bool,
}

impl DayCell
{
    /// The date in the same `YYYY-MM-DD` form the assignment source uses, so
    /// it can be used as a grouping key.
    pub fn work_date(&self) -> String
    {
        self.date.format(WORK_DATE_FORMAT).to_string()
    }
}

fn day_name(weekday: Weekday) -> &'static str
{
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Seven consecutive day cells starting at `week_start`.
///
/// `today` is passed in rather than read from the system clock. Fails when
/// the seventh day is past the end of the calendar.
pub fn build_week_days(week_start: NaiveDate, today: NaiveDate) -> Result<[DayCell; 7], CalendarError>
{
    week_start.checked_add_days(Days::new(6)).ok_or(CalendarError::DateOutOfRange {
        year: week_start.year(),
        month: week_start.month0() as i32,
    })?;

    // Every offset is at most 6, checked above.
    Ok(std::array::from_fn(|offset| {
        let date = week_start + Days::new(offset as u64);
        DayCell {
            date,
            day_name: day_name(date.weekday()),
            day_num: date.day(),
            month: date.month(),
            is_today: date == today,
        }
    }))
}
