//! Term plan (planner output) model.
//!
//! A term plan is the full output of one planning run: the slots that were
//! committed plus every allocation that could not be placed. Plans are
//! rebuilt wholesale on each run and never mutated incrementally by the
//! planner after they are returned.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Allocation, AllocationDefect, TimeOfDay, TimeWindow, Weekday};

/// A concrete day, time and venue assignment for one allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Placed allocation.
    pub allocation_id: String,
    /// Lecturer of the allocation (denormalized for queries and audits).
    pub lecturer_id: String,
    /// Course section of the allocation (denormalized).
    pub course_section_id: String,
    /// Assigned venue.
    pub venue_id: String,
    /// Day of the week.
    pub day: Weekday,
    /// Session start (inclusive).
    pub start: TimeOfDay,
    /// Session end (exclusive); `start + duration`.
    pub end: TimeOfDay,
}

impl Slot {
    /// Creates a slot for `allocation` in `venue_id` over `interval`.
    pub fn place(
        allocation: &Allocation,
        venue_id: impl Into<String>,
        day: Weekday,
        interval: TimeWindow,
    ) -> Self {
        Self {
            allocation_id: allocation.id.clone(),
            lecturer_id: allocation.lecturer_id.clone(),
            course_section_id: allocation.course_section_id.clone(),
            venue_id: venue_id.into(),
            day,
            start: interval.start,
            end: interval.end,
        }
    }

    /// The occupied interval `[start, end)`.
    #[inline]
    pub fn interval(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Session length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.interval().duration_minutes()
    }

    /// Whether two slots occupy overlapping time on the same day.
    pub fn clashes_with(&self, other: &Self) -> bool {
        self.day == other.day && self.interval().overlaps(&other.interval())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {}",
            self.allocation_id,
            self.day,
            self.interval(),
            self.venue_id
        )
    }
}

/// Why an allocation was left unplaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedReason {
    /// The allocation itself cannot be placed anywhere.
    Malformed(AllocationDefect),
    /// The venue set was empty.
    NoVenues,
    /// No venue satisfies capacity, type and school rules.
    NoEligibleVenue,
    /// Eligible candidates existed, but all clashed with committed slots.
    NoConflictFreeSlot,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::Malformed(defect) => write!(f, "malformed allocation: {defect}"),
            UnresolvedReason::NoVenues => f.write_str("no venues configured"),
            UnresolvedReason::NoEligibleVenue => f.write_str("no eligible venue"),
            UnresolvedReason::NoConflictFreeSlot => f.write_str("no conflict-free slot"),
        }
    }
}

/// An allocation that could not be placed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedAllocation {
    /// Allocation identifier.
    pub allocation_id: String,
    /// Why it could not be placed.
    pub reason: UnresolvedReason,
}

impl UnresolvedAllocation {
    /// Creates a new unresolved entry.
    pub fn new(allocation_id: impl Into<String>, reason: UnresolvedReason) -> Self {
        Self {
            allocation_id: allocation_id.into(),
            reason,
        }
    }
}

/// The output of one planning run for a term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPlan {
    /// Term the plan was built for.
    pub term_id: String,
    /// Committed slots, in placement order.
    pub slots: Vec<Slot>,
    /// Allocations that could not be placed, in processing order.
    pub unresolved: Vec<UnresolvedAllocation>,
}

impl TermPlan {
    /// Creates an empty plan for a term.
    pub fn new(term_id: impl Into<String>) -> Self {
        Self {
            term_id: term_id.into(),
            ..Self::default()
        }
    }

    /// Adds a committed slot.
    pub fn add_slot(&mut self, slot: Slot) {
        self.slots.push(slot);
    }

    /// Records an unplaced allocation.
    pub fn add_unresolved(&mut self, allocation_id: impl Into<String>, reason: UnresolvedReason) {
        self.unresolved
            .push(UnresolvedAllocation::new(allocation_id, reason));
    }

    /// Identifiers of all unplaced allocations.
    pub fn unresolved_ids(&self) -> Vec<&str> {
        self.unresolved
            .iter()
            .map(|u| u.allocation_id.as_str())
            .collect()
    }

    /// Whether every allocation was placed.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Number of committed slots.
    pub fn placed_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of unplaced allocations.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }

    /// Total number of allocations the plan accounts for.
    pub fn allocation_count(&self) -> usize {
        self.placed_count() + self.unresolved_count()
    }

    /// Finds the slot for a given allocation.
    pub fn slot_for_allocation(&self, allocation_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.allocation_id == allocation_id)
    }

    /// Finds the unresolved entry for a given allocation.
    pub fn unresolved_for(&self, allocation_id: &str) -> Option<&UnresolvedAllocation> {
        self.unresolved
            .iter()
            .find(|u| u.allocation_id == allocation_id)
    }

    /// Returns all slots in a venue.
    pub fn slots_for_venue(&self, venue_id: &str) -> Vec<&Slot> {
        self.slots.iter().filter(|s| s.venue_id == venue_id).collect()
    }

    /// Returns all slots taught by a lecturer.
    pub fn slots_for_lecturer(&self, lecturer_id: &str) -> Vec<&Slot> {
        self.slots
            .iter()
            .filter(|s| s.lecturer_id == lecturer_id)
            .collect()
    }

    /// Returns all slots on a day, sorted by start time.
    pub fn slots_on(&self, day: Weekday) -> Vec<&Slot> {
        let mut slots: Vec<&Slot> = self.slots.iter().filter(|s| s.day == day).collect();
        slots.sort_by_key(|s| (s.start, s.venue_id.as_str()));
        slots
    }

    /// One-line operator summary of the run.
    pub fn summary_message(&self) -> String {
        let total = self.allocation_count();
        if self.is_complete() {
            format!("scheduled all {total} sessions for term {}", self.term_id)
        } else {
            format!(
                "could not schedule {} of {total} sessions for term {}; adjust venues or time windows",
                self.unresolved_count(),
                self.term_id
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(id: &str, lecturer: &str) -> Allocation {
        Allocation::new(id, lecturer, format!("{id}-S"), "T1")
    }

    fn at(h: u32, len: u32) -> TimeWindow {
        TimeWindow::starting_at(TimeOfDay::hm(h, 0), len).unwrap()
    }

    fn sample_plan() -> TermPlan {
        let mut p = TermPlan::new("T1");
        p.add_slot(Slot::place(&alloc("A1", "L1"), "V1", Weekday::Monday, at(9, 60)));
        p.add_slot(Slot::place(&alloc("A2", "L2"), "V1", Weekday::Monday, at(8, 60)));
        p.add_slot(Slot::place(&alloc("A3", "L1"), "V2", Weekday::Tuesday, at(10, 120)));
        p.add_unresolved("A4", UnresolvedReason::NoEligibleVenue);
        p
    }

    #[test]
    fn test_slot_place() {
        let a = alloc("A1", "L1");
        let s = Slot::place(&a, "V1", Weekday::Friday, at(14, 90));
        assert_eq!(s.allocation_id, "A1");
        assert_eq!(s.lecturer_id, "L1");
        assert_eq!(s.course_section_id, "A1-S");
        assert_eq!(s.start, TimeOfDay::hm(14, 0));
        assert_eq!(s.end, TimeOfDay::hm(15, 30));
        assert_eq!(s.duration_minutes(), 90);
        assert_eq!(s.to_string(), "A1 friday 14:00-15:30 @ V1");
    }

    #[test]
    fn test_slot_clash() {
        let a = Slot::place(&alloc("A1", "L1"), "V1", Weekday::Monday, at(9, 60));
        let b = Slot::place(&alloc("A2", "L2"), "V2", Weekday::Monday, at(9, 120));
        let c = Slot::place(&alloc("A3", "L3"), "V1", Weekday::Tuesday, at(9, 60));
        let d = Slot::place(&alloc("A4", "L4"), "V1", Weekday::Monday, at(10, 60));
        assert!(a.clashes_with(&b));
        assert!(!a.clashes_with(&c)); // different day
        assert!(!a.clashes_with(&d)); // touching
    }

    #[test]
    fn test_plan_counts() {
        let p = sample_plan();
        assert_eq!(p.placed_count(), 3);
        assert_eq!(p.unresolved_count(), 1);
        assert_eq!(p.allocation_count(), 4);
        assert!(!p.is_complete());
        assert_eq!(p.unresolved_ids(), vec!["A4"]);
    }

    #[test]
    fn test_plan_queries() {
        let p = sample_plan();
        assert_eq!(p.slot_for_allocation("A1").unwrap().venue_id, "V1");
        assert!(p.slot_for_allocation("A4").is_none());
        assert_eq!(
            p.unresolved_for("A4").unwrap().reason,
            UnresolvedReason::NoEligibleVenue
        );
        assert_eq!(p.slots_for_venue("V1").len(), 2);
        assert_eq!(p.slots_for_lecturer("L1").len(), 2);

        let monday = p.slots_on(Weekday::Monday);
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].allocation_id, "A2"); // 08:00 before 09:00
        assert!(p.slots_on(Weekday::Sunday).is_empty());
    }

    #[test]
    fn test_summary_message() {
        let p = sample_plan();
        assert_eq!(
            p.summary_message(),
            "could not schedule 1 of 4 sessions for term T1; adjust venues or time windows"
        );

        let mut done = TermPlan::new("T2");
        done.add_slot(Slot::place(&alloc("A1", "L1"), "V1", Weekday::Monday, at(9, 60)));
        assert!(done.is_complete());
        assert_eq!(done.summary_message(), "scheduled all 1 sessions for term T2");
    }

    #[test]
    fn test_reason_display() {
        let r = UnresolvedReason::Malformed(AllocationDefect::NoAllowedDays);
        assert_eq!(r.to_string(), "malformed allocation: no allowed days");
        assert_eq!(UnresolvedReason::NoVenues.to_string(), "no venues configured");
    }

    #[test]
    fn test_empty_plan() {
        let p = TermPlan::new("T1");
        assert!(p.is_complete());
        assert_eq!(p.allocation_count(), 0);
        assert!(p.unresolved_ids().is_empty());
    }
}
