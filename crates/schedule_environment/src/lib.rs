pub mod assignment;
pub mod shift;

pub type AssignmentId = u64;
pub type StaffId = u64;
pub type ShiftId = u64;

/// ISO `YYYY-MM-DD` date string as delivered by the assignment source.
///
/// It is kept verbatim because it is the grouping key of the schedule grid.
/// Parsing happens only where a calendar comparison is needed.
pub type WorkDate = String;

pub const WORK_DATE_FORMAT: &str = "%Y-%m-%d";
