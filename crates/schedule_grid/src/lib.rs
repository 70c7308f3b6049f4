//! Week partitioning and shift-assignment grouping for the weekly schedule
//! grid.
//!
//! Everything here is pure over in-memory data. Callers load assignments
//! and shift definitions themselves and pass "today" explicitly.

pub mod calendar;
pub mod category;
pub mod clock;
pub mod days;
pub mod grouping;
pub mod navigation;
