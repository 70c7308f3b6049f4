use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::AssignmentId;
use crate::ShiftId;
use crate::StaffId;
use crate::WORK_DATE_FORMAT;
use crate::WorkDate;
use crate::shift::ShiftSummary;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSummary
{
    pub id: StaffId,
    #[serde(alias = "name")]
    pub full_name: String,
}

/// One staff member working one shift on one date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment
{
    id: AssignmentId,
    staff_id: StaffId,
    shift_id: ShiftId,
    work_date: WorkDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    staff: Option<StaffSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shift: Option<ShiftSummary>,
}

impl Assignment
{
    pub fn new(id: AssignmentId, staff_id: StaffId, shift_id: ShiftId, work_date: impl Into<WorkDate>) -> Self
    {
        Self {
            id,
            staff_id,
            shift_id,
            work_date: work_date.into(),
            notes: None,
            staff: None,
            shift: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self
    {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_staff(mut self, full_name: impl Into<String>) -> Self
    {
        self.staff = Some(StaffSummary {
            id: self.staff_id,
            full_name: full_name.into(),
        });
        self
    }

    pub fn with_shift(mut self, shift: ShiftSummary) -> Self
    {
        self.shift = Some(shift);
        self
    }

    pub fn id(&self) -> AssignmentId
    {
        self.id
    }

    pub fn staff_id(&self) -> StaffId
    {
        self.staff_id
    }

    pub fn shift_id(&self) -> ShiftId
    {
        self.shift_id
    }

    pub fn work_date(&self) -> &str
    {
        &self.work_date
    }

    pub fn notes(&self) -> Option<&str>
    {
        self.notes.as_deref()
    }

    pub fn staff(&self) -> Option<&StaffSummary>
    {
        self.staff.as_ref()
    }

    pub fn shift(&self) -> Option<&ShiftSummary>
    {
        self.shift.as_ref()
    }

    /// Parsed `work_date`, or `None` when the source sent something that is
    /// not a `YYYY-MM-DD` date.
    pub fn parsed_work_date(&self) -> Option<NaiveDate>
    {
        NaiveDate::parse_from_str(&self.work_date, WORK_DATE_FORMAT).ok()
    }

    /// Name shown in a grid cell. Falls back to the staff id when the
    /// source did not embed the staff record.
    pub fn staff_display_name(&self) -> String
    {
        match &self.staff {
            Some(staff) if !staff.full_name.trim().is_empty() => staff.full_name.clone(),
            _ => format!("#{}", self.staff_id),
        }
    }

    /// The identity used by the duplicate check.
    pub fn slot_key(&self) -> (StaffId, ShiftId, &str)
    {
        (self.staff_id, self.shift_id, &self.work_date)
    }
}
