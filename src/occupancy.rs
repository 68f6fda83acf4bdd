//! Per-run occupancy tracking.
//!
//! Records, for one planning run, which `(day, interval)` ranges each
//! lecturer and each venue has already been committed to. The tracker is
//! created fresh by every planning call and owned exclusively by it.
//!
//! # Single writer
//! All mutation goes through `&mut self`, so the check-then-commit
//! sequence in [`OccupancyTracker::try_commit`] is atomic with respect to
//! any other user of the same tracker. Sharing one tracker between
//! threads requires an external lock around that call.

use std::collections::HashMap;

use crate::models::{TimeWindow, Weekday};

/// A committed range on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booking {
    /// Day of the booking.
    pub day: Weekday,
    /// Occupied interval.
    pub interval: TimeWindow,
}

impl Booking {
    fn clashes(&self, day: Weekday, interval: &TimeWindow) -> bool {
        self.day == day && self.interval.overlaps(interval)
    }
}

/// Lecturer and venue bookings for a single planning run.
#[derive(Debug, Clone, Default)]
pub struct OccupancyTracker {
    lecturers: HashMap<String, Vec<Booking>>,
    venues: HashMap<String, Vec<Booking>>,
    commits: usize,
}

impl OccupancyTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the lecturer already teaches during `interval` on `day`.
    pub fn lecturer_conflict(&self, lecturer_id: &str, day: Weekday, interval: &TimeWindow) -> bool {
        has_conflict(&self.lecturers, lecturer_id, day, interval)
    }

    /// Whether the venue is already booked during `interval` on `day`.
    pub fn venue_conflict(&self, venue_id: &str, day: Weekday, interval: &TimeWindow) -> bool {
        has_conflict(&self.venues, venue_id, day, interval)
    }

    /// Whether both the lecturer and the venue are free.
    pub fn is_free(
        &self,
        lecturer_id: &str,
        venue_id: &str,
        day: Weekday,
        interval: &TimeWindow,
    ) -> bool {
        !self.lecturer_conflict(lecturer_id, day, interval)
            && !self.venue_conflict(venue_id, day, interval)
    }

    /// Records a session for both the lecturer and the venue.
    ///
    /// Does not re-check feasibility; callers confirm it first
    /// (or use [`Self::try_commit`]).
    pub fn commit(&mut self, lecturer_id: &str, venue_id: &str, day: Weekday, interval: TimeWindow) {
        let booking = Booking { day, interval };
        self.lecturers
            .entry(lecturer_id.to_string())
            .or_default()
            .push(booking);
        self.venues
            .entry(venue_id.to_string())
            .or_default()
            .push(booking);
        self.commits += 1;
    }

    /// Commits only if neither resource has a conflict.
    ///
    /// Returns `true` when the booking was recorded.
    pub fn try_commit(
        &mut self,
        lecturer_id: &str,
        venue_id: &str,
        day: Weekday,
        interval: TimeWindow,
    ) -> bool {
        if !self.is_free(lecturer_id, venue_id, day, &interval) {
            return false;
        }
        self.commit(lecturer_id, venue_id, day, interval);
        true
    }

    /// Bookings recorded for a lecturer.
    pub fn lecturer_bookings(&self, lecturer_id: &str) -> &[Booking] {
        self.lecturers
            .get(lecturer_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Bookings recorded for a venue.
    pub fn venue_bookings(&self, venue_id: &str) -> &[Booking] {
        self.venues.get(venue_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of commits made.
    pub fn len(&self) -> usize {
        self.commits
    }

    /// Whether nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.commits == 0
    }
}

fn has_conflict(
    bookings: &HashMap<String, Vec<Booking>>,
    id: &str,
    day: Weekday,
    interval: &TimeWindow,
) -> bool {
    bookings
        .get(id)
        .is_some_and(|list| list.iter().any(|b| b.clashes(day, interval)))
}
