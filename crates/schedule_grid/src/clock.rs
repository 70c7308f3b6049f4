use chrono::Local;
use chrono::NaiveDate;

/// Source of "today" for the call sites that need it. The grid functions
/// themselves take the date as a parameter.
pub trait Clock
{
    fn today(&self) -> NaiveDate;
}

/// The local calendar date of the machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock
{
    fn today(&self) -> NaiveDate
    {
        Local::now().date_naive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock
{
    fn today(&self) -> NaiveDate
    {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C
{
    fn today(&self) -> NaiveDate
    {
        (**self).today()
    }
}
