//! Candidate placements for one allocation.
//!
//! # Algorithm
//! 1. Enumerate valid start times inside the allocation's window.
//! 2. Take the full cross product `allowed_days × start_times × venues`.
//! 3. Shuffle the whole list uniformly (Fisher-Yates).
//!
//! The shuffle is over complete tuples, never per dimension.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{start_times, Allocation, TimeOfDay, TimeWindow, Weekday};

/// One `(day, start, venue)` placement option.
///
/// `venue` indexes the venue slice passed to the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Day of the week.
    pub day: Weekday,
    /// Session start.
    pub start: TimeOfDay,
    /// Index into the venue list.
    pub venue: usize,
}

impl Candidate {
    /// The interval a session of `duration_minutes` would occupy.
    pub fn interval(&self, duration_minutes: u32) -> Option<TimeWindow> {
        TimeWindow::starting_at(self.start, duration_minutes)
    }
}

/// Produces shuffled candidate lists on a fixed time grid.
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator {
    granularity_minutes: u32,
}

impl CandidateGenerator {
    /// Creates a generator stepping start times by `granularity_minutes`.
    pub fn new(granularity_minutes: u32) -> Self {
        Self {
            granularity_minutes,
        }
    }

    /// Step between start times.
    pub fn granularity_minutes(&self) -> u32 {
        self.granularity_minutes
    }

    /// All candidates for `allocation` over `venue_count` venues, in grid order.
    ///
    /// Empty when the allocation is malformed or there are no venues.
    pub fn enumerate(&self, allocation: &Allocation, venue_count: usize) -> Vec<Candidate> {
        let starts = start_times(
            &allocation.window,
            allocation.duration_minutes,
            self.granularity_minutes,
        );
        if starts.is_empty() || venue_count == 0 {
            return Vec::new();
        }

        let mut out =
            Vec::with_capacity(allocation.allowed_days.len() * starts.len() * venue_count);
        for &day in &allocation.allowed_days {
            for &start in &starts {
                for venue in 0..venue_count {
                    out.push(Candidate { day, start, venue });
                }
            }
        }
        out
    }

    /// All candidates for `allocation`, uniformly shuffled.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        allocation: &Allocation,
        venue_count: usize,
        rng: &mut R,
    ) -> Vec<Candidate> {
        let mut candidates = self.enumerate(allocation, venue_count);
        candidates.shuffle(rng);
        candidates
    }
}
