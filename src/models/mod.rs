//! Timetabling domain models.
//!
//! Provides the data types the planner consumes and produces. Inputs
//! (allocations, venues) are supplied by the surrounding administration
//! layer; the output is a [`TermPlan`].
//!
//! # Domain Mappings
//!
//! | u-timetable | Registry | Facilities |
//! |-------------|----------|------------|
//! | Allocation | Class session requirement | Booking request |
//! | Venue | Teaching space | Room |
//! | Slot | Timetable entry | Booking |
//! | TermPlan | Term timetable | Booking sheet |

mod allocation;
mod calendar;
mod plan;
mod venue;

pub use allocation::{Allocation, AllocationDefect};
pub use calendar::{
    start_times, TimeOfDay, TimeOutOfRange, TimeWindow, Weekday, MINUTES_PER_DAY,
};
pub use plan::{Slot, TermPlan, UnresolvedAllocation, UnresolvedReason};
pub use venue::Venue;
