use chrono::NaiveDate;
use schedule_environment::ShiftId;
use schedule_environment::StaffId;
use schedule_grid::calendar::CalendarError;
use schedule_grid::grouping::GroupingError;
use thiserror::Error;

pub mod board;
pub mod options;
pub mod session;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum BoardError
{
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    Grouping(#[from] GroupingError),
    #[error("shift {0} does not exist")]
    ShiftMissing(ShiftId),
    #[error("shift {0} is not active")]
    ShiftInactive(ShiftId),
    #[error("{0} is outside the displayed week")]
    DateOutsideWeek(NaiveDate),
    #[error("staff {0} is not shown on this board")]
    StaffOutsideFilter(StaffId),
    #[error("invalid board options: {0}")]
    InvalidOptions(String),
}
