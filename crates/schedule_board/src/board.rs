use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::NaiveDate;
use chrono::TimeDelta;
use schedule_environment::ShiftId;
use schedule_environment::StaffId;
use schedule_environment::WORK_DATE_FORMAT;
use schedule_environment::WorkDate;
use schedule_environment::assignment::Assignment;
use schedule_environment::shift::ShiftDefinition;
use schedule_grid::calendar::WeekRange;
use schedule_grid::category::ShiftCategory;
use schedule_grid::category::shift_color_category;
use schedule_grid::days::DayCell;
use schedule_grid::days::build_week_days;
use schedule_grid::grouping::DuplicatePolicy;
use schedule_grid::grouping::GroupedSchedule;
use schedule_grid::grouping::GroupingError;
use schedule_grid::grouping::filter_to_week;
use schedule_grid::grouping::group_with_policy;
use serde::Serialize;
use tracing::debug;

use crate::BoardError;
use crate::options::BoardOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShiftRow<'a>
{
    pub shift: &'a ShiftDefinition,
    pub category: ShiftCategory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary
{
    pub date: NaiveDate,
    pub assignments: usize,
    /// Assignments in the displayed rows only. Differs from `assignments`
    /// when hidden or unknown shifts carry work.
    pub visible_assignments: usize,
    pub staff: usize,
    pub scheduled_minutes: i64,
}

impl DaySummary
{
    pub fn scheduled_hours(&self) -> f64
    {
        self.scheduled_minutes as f64 / 60.0
    }
}

/// A validated quick-assign request, ready to be sent to the assignment
/// source. The board is rebuilt from a fresh fetch afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDraft
{
    pub staff_id: StaffId,
    pub shift_id: ShiftId,
    pub work_date: WorkDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The (day × shift) grid of one week, shared by the manager schedule page
/// and the personal schedule page.
#[derive(Debug)]
pub struct WeekBoard<'a>
{
    week: WeekRange,
    days: [DayCell; 7],
    rows: Vec<ShiftRow<'a>>,
    shift_lookup: HashMap<ShiftId, &'a ShiftDefinition>,
    grouped: GroupedSchedule<'a>,
    duplicate_policy: DuplicatePolicy,
    staff_filter: Option<StaffId>,
}

impl<'a> WeekBoard<'a>
{
    pub fn build(
        week: &WeekRange,
        shifts: &'a [ShiftDefinition],
        assignments: &'a [Assignment],
        today: NaiveDate,
        options: &BoardOptions,
    ) -> Result<Self, BoardError>
    {
        let mut in_week = filter_to_week(assignments, week);
        if let Some(staff_id) = options.staff_filter {
            in_week.retain(|assignment| assignment.staff_id() == staff_id);
        }
        let grouped = group_with_policy(in_week, options.duplicate_policy)?;

        let mut visible_shifts = shifts
            .iter()
            .filter(|shift| options.include_inactive_shifts || shift.is_active())
            .collect::<Vec<_>>();
        visible_shifts.sort_by_key(|shift| (shift.start_time(), shift.id()));
        let rows = visible_shifts
            .into_iter()
            .map(|shift| ShiftRow {
                shift,
                category: shift_color_category(shift.name()),
            })
            .collect::<Vec<_>>();

        debug!(
            target: "schedule_board",
            week = week.label(),
            shifts = rows.len(),
            assignments = grouped.len(),
            staff_filter = ?options.staff_filter,
            "built week board"
        );

        Ok(Self {
            week: week.clone(),
            days: build_week_days(week.start_date(), today)?,
            rows,
            shift_lookup: shifts.iter().map(|shift| (shift.id(), shift)).collect(),
            grouped,
            duplicate_policy: options.duplicate_policy,
            staff_filter: options.staff_filter,
        })
    }

    pub fn week(&self) -> &WeekRange
    {
        &self.week
    }

    pub fn days(&self) -> &[DayCell; 7]
    {
        &self.days
    }

    /// Displayed shifts ordered by start time.
    pub fn rows(&self) -> &[ShiftRow<'a>]
    {
        &self.rows
    }

    pub fn grouped(&self) -> &GroupedSchedule<'a>
    {
        &self.grouped
    }

    pub fn cell(&self, date: NaiveDate, shift_id: ShiftId) -> &[&'a Assignment]
    {
        self.grouped.bucket(&work_date_key(date), shift_id)
    }

    pub fn staff_names(&self, date: NaiveDate, shift_id: ShiftId) -> Vec<String>
    {
        self.grouped.staff_names(&work_date_key(date), shift_id)
    }

    /// Totals for one day. Minutes are summed over the assigned shifts;
    /// assignments to shift ids without a definition add no time.
    pub fn day_summary(&self, date: NaiveDate) -> DaySummary
    {
        let key = work_date_key(date);
        let scheduled = self
            .grouped
            .shifts_on(&key)
            .into_iter()
            .flatten()
            .filter_map(|(shift_id, bucket)| {
                let shift = self.shift_lookup.get(shift_id)?;
                Some(shift.duration() * bucket.len() as i32)
            })
            .fold(TimeDelta::zero(), |total, duration| total + duration);

        DaySummary {
            date,
            assignments: self.grouped.day_total(&key),
            visible_assignments: self.rows.iter().map(|row| self.grouped.bucket(&key, row.shift.id()).len()).sum(),
            staff: self.grouped.day_staff(&key).len(),
            scheduled_minutes: scheduled.num_minutes(),
        }
    }

    pub fn week_summary(&self) -> Vec<DaySummary>
    {
        self.days.iter().map(|day| self.day_summary(day.date)).collect()
    }

    pub fn week_total(&self) -> usize
    {
        self.grouped.len()
    }

    /// Sum of the cells actually drawn, i.e. the displayed rows across the
    /// seven days.
    pub fn visible_week_total(&self) -> usize
    {
        self.days
            .iter()
            .map(|day| {
                let key = day.work_date();
                self.rows
                    .iter()
                    .map(|row| self.grouped.bucket(&key, row.shift.id()).len())
                    .sum::<usize>()
            })
            .sum()
    }

    /// Every staff member on the board with the first name seen for them,
    /// ordered by id.
    pub fn staff_roster(&self) -> Vec<(StaffId, String)>
    {
        let mut roster = BTreeMap::new();
        for (_, _, bucket) in self.grouped.iter() {
            for assignment in bucket {
                roster
                    .entry(assignment.staff_id())
                    .or_insert_with(|| assignment.staff_display_name());
            }
        }
        roster.into_iter().collect()
    }

    /// Checks a quick-assign of `staff_id` to `shift_id` on `date` against
    /// this board.
    pub fn draft_assignment(&self, staff_id: StaffId, shift_id: ShiftId, date: NaiveDate, notes: Option<String>) -> Result<AssignmentDraft, BoardError>
    {
        let shift = self.shift_lookup.get(&shift_id).ok_or(BoardError::ShiftMissing(shift_id))?;
        if !shift.is_active() {
            return Err(BoardError::ShiftInactive(shift_id));
        }
        if !self.week.contains(date) {
            return Err(BoardError::DateOutsideWeek(date));
        }
        if let Some(filtered_staff) = self.staff_filter
            && filtered_staff != staff_id
        {
            return Err(BoardError::StaffOutsideFilter(staff_id));
        }

        let work_date = work_date_key(date);
        if self.duplicate_policy == DuplicatePolicy::Reject
            && self
                .grouped
                .bucket(&work_date, shift_id)
                .iter()
                .any(|assignment| assignment.staff_id() == staff_id)
        {
            return Err(GroupingError::DuplicateAssignment {
                staff_id,
                shift_id,
                work_date,
            }
            .into());
        }

        Ok(AssignmentDraft {
            staff_id,
            shift_id,
            work_date,
            notes: notes.filter(|notes| !notes.trim().is_empty()),
        })
    }
}

fn work_date_key(date: NaiveDate) -> WorkDate
{
    date.format(WORK_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;
    use chrono::NaiveTime;
    use schedule_environment::assignment::Assignment;
    use schedule_environment::shift::ShiftDefinition;
    use schedule_grid::calendar::WeekRange;
    use schedule_grid::category::ShiftCategory;
    use schedule_grid::grouping::DuplicatePolicy;
    use schedule_grid::grouping::GroupingError;

    use super::AssignmentDraft;
    use super::WeekBoard;
    use crate::BoardError;
    use crate::options::BoardOptions;

    fn date(day: u32) -> NaiveDate
    {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    fn time(hour: u32) -> NaiveTime
    {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    fn shifts() -> Vec<ShiftDefinition>
    {
        vec![
            ShiftDefinition::new(3, "Ca tối", time(18), time(23), true),
            ShiftDefinition::new(1, "Ca sáng", time(6), time(12), true),
            ShiftDefinition::new(2, "Ca chiều", time(12), time(18), true),
            ShiftDefinition::new(4, "Ca gãy", time(10), time(14), false),
        ]
    }

    fn assignments() -> Vec<Assignment>
    {
        vec![
            Assignment::new(1, 10, 1, "2025-10-13").with_staff("An"),
            Assignment::new(2, 11, 1, "2025-10-13").with_staff("Bình"),
            Assignment::new(3, 10, 3, "2025-10-13").with_staff("An"),
            Assignment::new(4, 12, 2, "2025-10-15").with_staff("Chi"),
            Assignment::new(5, 10, 1, "2025-10-20").with_staff("An"),
            Assignment::new(6, 11, 9, "2025-10-14").with_staff("Bình"),
        ]
    }

    fn week() -> WeekRange
    {
        WeekRange::containing(date(15)).unwrap()
    }

    #[test]
    fn test_rows_are_active_shifts_by_start_time()
    {
        let shifts = shifts();
        let assignments = assignments();

        let board = WeekBoard::build(&week(), &shifts, &assignments, date(15), &BoardOptions::default()).unwrap();

        let ids = board.rows().iter().map(|row| row.shift.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(board.rows()[0].category, ShiftCategory::Morning);
        assert_eq!(board.rows()[2].category, ShiftCategory::Evening);
    }

    #[test]
    fn test_inactive_shifts_can_be_shown()
    {
        let shifts = shifts();
        let options = BoardOptions {
            include_inactive_shifts: true,
            ..BoardOptions::default()
        };

        let board = WeekBoard::build(&week(), &shifts, &[], date(15), &options).unwrap();

        let ids = board.rows().iter().map(|row| row.shift.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_cells_only_hold_the_displayed_week()
    {
        let shifts = shifts();
        let assignments = assignments();

        let board = WeekBoard::build(&week(), &shifts, &assignments, date(15), &BoardOptions::default()).unwrap();

        assert_eq!(board.staff_names(date(13), 1), vec!["An", "Bình"]);
        assert_eq!(board.cell(date(15), 2).len(), 1);
        assert_eq!(board.week_total(), 5);
        assert!(board.days()[2].is_today);
    }

    #[test]
    fn test_staff_filter_builds_personal_schedule()
    {
        let shifts = shifts();
        let assignments = assignments();

        let board = WeekBoard::build(&week(), &shifts, &assignments, date(15), &BoardOptions::for_staff(10)).unwrap();

        assert_eq!(board.week_total(), 2);
        assert_eq!(board.staff_roster(), vec![(10, "An".to_string())]);
    }

    #[test]
    fn test_day_summary()
    {
        let shifts = shifts();
        let assignments = assignments();

        let board = WeekBoard::build(&week(), &shifts, &assignments, date(15), &BoardOptions::default()).unwrap();

        let monday = board.day_summary(date(13));
        assert_eq!(monday.assignments, 3);
        assert_eq!(monday.visible_assignments, 3);
        assert_eq!(monday.staff, 2);
        assert_eq!(monday.scheduled_minutes, (6 + 6 + 5) * 60);

        // Shift 9 has no definition.
        let tuesday = board.day_summary(date(14));
        assert_eq!(tuesday.assignments, 1);
        assert_eq!(tuesday.visible_assignments, 0);
        assert_eq!(tuesday.scheduled_minutes, 0);

        let summary = board.week_summary();
        assert_eq!(summary.len(), 7);
        assert_eq!(summary.iter().map(|day| day.assignments).sum::<usize>(), board.week_total());
        assert_eq!(summary.iter().map(|day| day.visible_assignments).sum::<usize>(), board.visible_week_total());
        assert_eq!(board.visible_week_total(), 4);
        assert_eq!(summary[2].scheduled_hours(), 6.0);
    }

    #[test]
    fn test_draft_assignment()
    {
        let shifts = shifts();
        let assignments = assignments();
        let board = WeekBoard::build(&week(), &shifts, &assignments, date(15), &BoardOptions::default()).unwrap();

        assert_eq!(
            board.draft_assignment(12, 1, date(13), Some("  ".to_string())),
            Ok(AssignmentDraft {
                staff_id: 12,
                shift_id: 1,
                work_date: "2025-10-13".to_string(),
                notes: None,
            })
        );
        assert_eq!(board.draft_assignment(12, 7, date(13), None), Err(BoardError::ShiftMissing(7)));
        assert_eq!(board.draft_assignment(12, 4, date(13), None), Err(BoardError::ShiftInactive(4)));
        assert_eq!(board.draft_assignment(12, 1, date(20), None), Err(BoardError::DateOutsideWeek(date(20))));
        assert!(board.draft_assignment(10, 1, date(13), None).is_ok(), "duplicates are allowed by default");
    }

    #[test]
    fn test_draft_assignment_rejects_duplicates_when_configured()
    {
        let shifts = shifts();
        let assignments = assignments();
        let options = BoardOptions {
            duplicate_policy: DuplicatePolicy::Reject,
            ..BoardOptions::default()
        };
        let board = WeekBoard::build(&week(), &shifts, &assignments, date(15), &options).unwrap();

        assert_eq!(
            board.draft_assignment(10, 1, date(13), None),
            Err(BoardError::Grouping(GroupingError::DuplicateAssignment {
                staff_id: 10,
                shift_id: 1,
                work_date: "2025-10-13".to_string(),
            }))
        );
        assert!(board.draft_assignment(10, 2, date(13), None).is_ok());
    }

    #[test]
    fn test_personal_board_only_drafts_for_its_staff()
    {
        let shifts = shifts();
        let board = WeekBoard::build(&week(), &shifts, &[], date(15), &BoardOptions::for_staff(10)).unwrap();

        assert_eq!(board.draft_assignment(11, 1, date(13), None), Err(BoardError::StaffOutsideFilter(11)));
        assert!(board.draft_assignment(10, 1, date(13), None).is_ok());
    }

    #[test]
    fn test_build_fails_on_duplicate_data_under_reject()
    {
        let shifts = shifts();
        let mut assignments = assignments();
        assignments.push(Assignment::new(7, 11, 1, "2025-10-13"));
        let options = BoardOptions {
            duplicate_policy: DuplicatePolicy::Reject,
            ..BoardOptions::default()
        };

        let board = WeekBoard::build(&week(), &shifts, &assignments, date(15), &options);

        assert!(matches!(board, Err(BoardError::Grouping(_))));
    }
}
