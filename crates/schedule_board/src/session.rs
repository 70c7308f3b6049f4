use schedule_environment::StaffId;
use schedule_environment::assignment::Assignment;
use schedule_environment::shift::ShiftDefinition;
use schedule_grid::clock::Clock;
use schedule_grid::navigation::ScheduleNavigator;
use serde::Serialize;
use tracing::debug;

use crate::BoardError;
use crate::board::WeekBoard;
use crate::options::BoardOptions;

/// Parameters for the external assignment fetch. `month` is 1-based here
/// because that is what the assignment endpoint expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentQuery
{
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<StaffId>,
    pub month: u32,
    pub year: i32,
}

/// State behind one schedule page: the navigation, the latest snapshots of
/// shifts and assignments, and the board options.
///
/// Snapshots are replaced wholesale. Whatever was loaded last is what the
/// board shows.
pub struct ScheduleSession<C: Clock>
{
    clock: C,
    navigator: ScheduleNavigator,
    options: BoardOptions,
    shifts: Vec<ShiftDefinition>,
    assignments: Vec<Assignment>,
}

impl<C: Clock> ScheduleSession<C>
{
    pub fn new(clock: C, options: BoardOptions) -> Result<Self, BoardError>
    {
        let navigator = ScheduleNavigator::new(clock.today())?;
        Ok(Self {
            clock,
            navigator,
            options,
            shifts: Vec::new(),
            assignments: Vec::new(),
        })
    }

    pub fn navigator(&self) -> &ScheduleNavigator
    {
        &self.navigator
    }

    pub fn options(&self) -> &BoardOptions
    {
        &self.options
    }

    /// What to fetch for the selected month.
    pub fn assignment_query(&self) -> AssignmentQuery
    {
        AssignmentQuery {
            staff_id: self.options.staff_filter,
            month: self.navigator.month() + 1,
            year: self.navigator.year(),
        }
    }

    pub fn select_month(&mut self, year: i32, month: i32) -> Result<(), BoardError>
    {
        Ok(self.navigator.select_month(year, month, self.clock.today())?)
    }

    pub fn previous_month(&mut self) -> Result<(), BoardError>
    {
        Ok(self.navigator.previous_month(self.clock.today())?)
    }

    pub fn next_month(&mut self) -> Result<(), BoardError>
    {
        Ok(self.navigator.next_month(self.clock.today())?)
    }

    pub fn previous_week(&mut self) -> usize
    {
        self.navigator.previous_week()
    }

    pub fn next_week(&mut self) -> usize
    {
        self.navigator.next_week()
    }

    pub fn go_to_today(&mut self) -> Result<(), BoardError>
    {
        Ok(self.navigator.go_to_today(self.clock.today())?)
    }

    pub fn replace_shifts(&mut self, shifts: Vec<ShiftDefinition>)
    {
        debug!(target: "schedule_board::session", shifts = shifts.len(), "replaced shift snapshot");
        self.shifts = shifts;
    }

    pub fn replace_assignments(&mut self, assignments: Vec<Assignment>)
    {
        debug!(target: "schedule_board::session", assignments = assignments.len(), "replaced assignment snapshot");
        self.assignments = assignments;
    }

    /// The board for the currently selected week.
    pub fn board(&self) -> Result<WeekBoard<'_>, BoardError>
    {
        WeekBoard::build(
            self.navigator.current_week(),
            &self.shifts,
            &self.assignments,
            self.clock.today(),
            &self.options,
        )
    }
}
