//! Term timetable planner.
//!
//! Assigns a day, start time and venue to every allocation of a term
//! without double-booking any lecturer or venue.
//!
//! # Algorithm
//!
//! `TermPlanner` is a randomized one-pass greedy: allocations are taken in
//! a deterministic order, and each one takes the first feasible entry of
//! its uniformly shuffled candidate list. The shuffle spreads sessions
//! across the week instead of stacking them at the earliest time in the
//! first venue.
//!
//! # KPI
//!
//! `TermPlanKpi` reports placement rate, venue utilization and how evenly
//! start times are spread.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod candidates;
mod config;
mod kpi;
mod ordering;
mod term;

pub use candidates::{Candidate, CandidateGenerator};
pub use config::{PlannerConfig, DEFAULT_GRANULARITY_MINUTES};
pub use kpi::TermPlanKpi;
pub use ordering::OrderingPolicy;
pub use term::TermPlanner;
