//! Term timetable planning for university course administration.
//!
//! Assigns a weekday, a start time and a venue to every recurring class
//! session ("allocation") of an academic term, so that no lecturer and no
//! venue is double-booked, every venue is eligible for the session it
//! hosts, and sessions stay inside their permitted days and windows.
//! Sessions are spread across the week by shuffling candidates instead of
//! packing them at the earliest free time.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Allocation`, `Venue`, `Slot`, `TermPlan`,
//!   and the weekly time grid (`TimeOfDay`, `Weekday`, `TimeWindow`)
//! - **`eligibility`**: Static capacity / type / school rules
//! - **`occupancy`**: Per-run lecturer and venue bookings
//! - **`planner`**: Candidate generation, ordering, the planner itself, KPIs
//! - **`validation`**: Input checks and finished-plan audits
//!
//! # Architecture
//!
//! The planner is a pure computation. It never touches storage: callers
//! pass in allocations and venues and get back a `TermPlan` listing
//! committed slots and unresolved allocations. Infeasibility is a normal
//! outcome, not an error.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Carter & Laporte (1998), "Recent Developments in Practical Course Timetabling"

pub mod eligibility;
pub mod error;
pub mod models;
pub mod occupancy;
pub mod planner;
pub mod validation;

pub use error::{PlanError, Result};
