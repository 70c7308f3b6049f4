use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashSet;

use schedule_environment::ShiftId;
use schedule_environment::StaffId;
use schedule_environment::assignment::Assignment;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

use crate::calendar::WeekRange;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GroupingError
{
    #[error("staff {staff_id} is already assigned to shift {shift_id} on {work_date}")]
    DuplicateAssignment
    {
        staff_id: StaffId,
        shift_id: ShiftId,
        work_date: String,
    },
}

/// What to do when the same staff member appears twice on the same shift
/// and date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy
{
    #[default]
    Allow,
    Reject,
}

type ShiftBuckets<'a> = BTreeMap<ShiftId, Vec<&'a Assignment>>;

/// Assignments bucketed by `work_date` and then by shift.
///
/// Buckets keep the order the assignments were supplied in. The work date is
/// used verbatim as the key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupedSchedule<'a>
{
    buckets: BTreeMap<&'a str, ShiftBuckets<'a>>,
    total: usize,
}

impl<'a> GroupedSchedule<'a>
{
    fn insert(&mut self, assignment: &'a Assignment)
    {
        self.buckets
            .entry(assignment.work_date())
            .or_default()
            .entry(assignment.shift_id())
            .or_default()
            .push(assignment);
        self.total += 1;
    }

    pub fn bucket(&self, work_date: &str, shift_id: ShiftId) -> &[&'a Assignment]
    {
        self.buckets
            .get(work_date)
            .and_then(|shifts| shifts.get(&shift_id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn shifts_on(&self, work_date: &str) -> Option<&ShiftBuckets<'a>>
    {
        self.buckets.get(work_date)
    }

    pub fn dates(&self) -> impl Iterator<Item = &'a str> + '_
    {
        self.buckets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, ShiftId, &[&'a Assignment])> + '_
    {
        self.buckets
            .iter()
            .flat_map(|(&work_date, shifts)| shifts.iter().map(move |(&shift_id, bucket)| (work_date, shift_id, bucket.as_slice())))
    }

    /// Display names of the staff in one cell, in bucket order.
    pub fn staff_names(&self, work_date: &str, shift_id: ShiftId) -> Vec<String>
    {
        self.bucket(work_date, shift_id).iter().map(|assignment| assignment.staff_display_name()).collect()
    }

    pub fn day_total(&self, work_date: &str) -> usize
    {
        self.buckets.get(work_date).map_or(0, |shifts| shifts.values().map(Vec::len).sum())
    }

    pub fn day_staff(&self, work_date: &str) -> BTreeSet<StaffId>
    {
        self.buckets
            .get(work_date)
            .into_iter()
            .flat_map(|shifts| shifts.values().flatten())
            .map(|assignment| assignment.staff_id())
            .collect()
    }

    pub fn date_count(&self) -> usize
    {
        self.buckets.len()
    }

    pub fn len(&self) -> usize
    {
        self.total
    }

    pub fn is_empty(&self) -> bool
    {
        self.total == 0
    }
}

/// Groups assignments into `work_date -> shift -> [assignment]`.
///
/// Nothing is filtered or parsed here; use [`filter_to_week`] first to
/// restrict the input to the displayed week.
pub fn group_by_date_and_shift<'a, I>(assignments: I) -> GroupedSchedule<'a>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    let mut grouped = GroupedSchedule::default();
    for assignment in assignments {
        grouped.insert(assignment);
    }
    grouped
}

/// Same as [`group_by_date_and_shift`] but fails on the first repeated
/// `(staff, shift, work_date)` when the policy is [`DuplicatePolicy::Reject`].
pub fn group_with_policy<'a, I>(assignments: I, policy: DuplicatePolicy) -> Result<GroupedSchedule<'a>, GroupingError>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    if policy == DuplicatePolicy::Allow {
        return Ok(group_by_date_and_shift(assignments));
    }

    let mut grouped = GroupedSchedule::default();
    let mut seen = HashSet::new();
    for assignment in assignments {
        if !seen.insert(assignment.slot_key()) {
            warn!(
                target: "schedule_grid::grouping",
                assignment = assignment.id(),
                staff = assignment.staff_id(),
                shift = assignment.shift_id(),
                work_date = assignment.work_date(),
                "duplicate assignment rejected"
            );
            return Err(GroupingError::DuplicateAssignment {
                staff_id: assignment.staff_id(),
                shift_id: assignment.shift_id(),
                work_date: assignment.work_date().to_string(),
            });
        }
        grouped.insert(assignment);
    }
    Ok(grouped)
}

/// Keeps the assignments whose work date lies inside `week`.
///
/// Work dates that are not `YYYY-MM-DD` cannot be placed on the grid and are
/// dropped with a warning.
pub fn filter_to_week<'a, I>(assignments: I, week: &WeekRange) -> Vec<&'a Assignment>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    let mut skipped = 0usize;
    let in_week = assignments
        .into_iter()
        .filter(|assignment| match assignment.parsed_work_date() {
            Some(work_date) => week.contains(work_date),
            None => {
                warn!(
                    target: "schedule_grid::grouping",
                    assignment = assignment.id(),
                    work_date = assignment.work_date(),
                    "skipping assignment with malformed work date"
                );
                skipped += 1;
                false
            }
        })
        .collect::<Vec<_>>();

    debug!(
        target: "schedule_grid::grouping",
        week = week.label(),
        kept = in_week.len(),
        skipped,
        "filtered assignments to week"
    );
    in_week
}
