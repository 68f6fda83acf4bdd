//! Randomized one-pass term planner.
//!
//! # Algorithm
//!
//! 1. Order allocations by the configured [`OrderingPolicy`](super::OrderingPolicy).
//! 2. For each allocation, draw its shuffled candidate list
//!    (`days × start times × venues`).
//! 3. Accept the first candidate whose venue is eligible and where neither
//!    the lecturer nor the venue is already booked on that day.
//! 4. Commit it to the occupancy tracker and emit a slot; if the list runs
//!    out, record the allocation as unresolved.
//!
//! # Complexity
//! O(n · d · t · v) where n=allocations, d=days, t=start times, v=venues,
//! times the per-resource booking scan. No backtracking: an allocation
//! that loses contention stays unresolved.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{CandidateGenerator, PlannerConfig};
use crate::eligibility::is_eligible;
use crate::error::{PlanError, Result};
use crate::models::{Allocation, Slot, TermPlan, UnresolvedReason, Venue};
use crate::occupancy::OccupancyTracker;

/// Builds term timetables from allocations and venues.
///
/// Holds configuration only; every call owns its own occupancy state and
/// random source, so one planner may serve concurrent calls.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Allocation, TimeOfDay, Venue, Weekday};
/// use u_timetable::planner::TermPlanner;
///
/// let allocations = vec![
///     Allocation::new("A1", "L1", "CS101-01", "2026S1")
///         .with_students(60)
///         .with_duration(120)
///         .with_days(Weekday::WORKDAYS)
///         .with_window(TimeOfDay::hm(8, 0), TimeOfDay::hm(17, 0))
///         .with_venue_type("lecture-hall"),
/// ];
/// let venues = vec![Venue::new("V1", "lecture-hall", 80)];
///
/// let plan = TermPlanner::new()
///     .build_term_plan("2026S1", &allocations, &venues)
///     .unwrap();
/// assert_eq!(plan.placed_count(), 1);
/// assert!(plan.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TermPlanner {
    config: PlannerConfig,
}

impl TermPlanner {
    /// Creates a planner with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a planner from a validated configuration.
    pub fn with_config(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans a term.
    ///
    /// Uses the configured seed, or a fresh OS-seeded generator per call.
    /// Never fails for infeasible or malformed allocations; those are
    /// reported in [`TermPlan::unresolved`]. Fails only when strict term
    /// checking finds an allocation from another term.
    pub fn build_term_plan(
        &self,
        term_id: &str,
        allocations: &[Allocation],
        venues: &[Venue],
    ) -> Result<TermPlan> {
        let mut rng = match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.build_term_plan_with_rng(term_id, allocations, venues, &mut rng)
    }

    /// Plans a term using a caller-supplied random source.
    pub fn build_term_plan_with_rng<R: Rng + ?Sized>(
        &self,
        term_id: &str,
        allocations: &[Allocation],
        venues: &[Venue],
        rng: &mut R,
    ) -> Result<TermPlan> {
        if self.config.strict_term {
            check_term(term_id, allocations)?;
        }

        info!(
            event = "plan_start",
            term = term_id,
            allocations = allocations.len(),
            venues = venues.len(),
            granularity = self.config.granularity_minutes,
            ordering = ?self.config.ordering,
        );

        if venues.is_empty() && !allocations.is_empty() {
            warn!(
                event = "no_venues",
                term = term_id,
                allocations = allocations.len(),
                "no venues configured; every allocation is unresolved"
            );
        }

        let mut plan = TermPlan::new(term_id);
        let mut tracker = OccupancyTracker::new();
        let generator = CandidateGenerator::new(self.config.granularity_minutes);
        let order =
            self.config
                .ordering
                .sort_indices(allocations, venues, self.config.granularity_minutes);

        for idx in order {
            let allocation = &allocations[idx];
            match place(allocation, venues, &generator, &mut tracker, rng) {
                Ok(slot) => {
                    debug!(
                        event = "placed",
                        allocation = %allocation.id,
                        venue = %slot.venue_id,
                        day = %slot.day,
                        start = %slot.start,
                        end = %slot.end,
                    );
                    plan.add_slot(slot);
                }
                Err(reason) => {
                    // Already reported once as `no_venues`.
                    if reason != UnresolvedReason::NoVenues {
                        warn!(event = "unresolved", allocation = %allocation.id, reason = %reason);
                    }
                    plan.add_unresolved(allocation.id.clone(), reason);
                }
            }
        }

        info!(
            event = "plan_end",
            term = term_id,
            placed = plan.placed_count(),
            unresolved = plan.unresolved_count(),
        );

        Ok(plan)
    }
}

/// Places one allocation, committing it to `tracker` on success.
fn place<R: Rng + ?Sized>(
    allocation: &Allocation,
    venues: &[Venue],
    generator: &CandidateGenerator,
    tracker: &mut OccupancyTracker,
    rng: &mut R,
) -> std::result::Result<Slot, UnresolvedReason> {
    if let Some(defect) = allocation.defect() {
        return Err(UnresolvedReason::Malformed(defect));
    }
    if venues.is_empty() {
        return Err(UnresolvedReason::NoVenues);
    }

    let eligible: Vec<bool> = venues.iter().map(|v| is_eligible(allocation, v)).collect();
    if !eligible.contains(&true) {
        return Err(UnresolvedReason::NoEligibleVenue);
    }

    for candidate in generator.generate(allocation, venues.len(), rng) {
        if !eligible[candidate.venue] {
            continue;
        }
        let Some(interval) = candidate.interval(allocation.duration_minutes) else {
            continue;
        };
        let venue = &venues[candidate.venue];
        if tracker.try_commit(&allocation.lecturer_id, &venue.id, candidate.day, interval) {
            return Ok(Slot::place(allocation, &venue.id, candidate.day, interval));
        }
    }

    Err(UnresolvedReason::NoConflictFreeSlot)
}

fn check_term(term_id: &str, allocations: &[Allocation]) -> Result<()> {
    match allocations.iter().find(|a| a.term_id != term_id) {
        Some(a) => Err(PlanError::TermMismatch {
            allocation_id: a.id.clone(),
            expected: term_id.to_string(),
            found: a.term_id.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationDefect, TimeOfDay, Weekday};
    use crate::planner::OrderingPolicy;

    fn seeded(seed: u64) -> TermPlanner {
        TermPlanner::with_config(PlannerConfig::new().with_seed(seed)).unwrap()
    }

    fn alloc(id: &str, lecturer: &str) -> Allocation {
        Allocation::new(id, lecturer, format!("{id}-S"), "T1")
    }

    #[test]
    fn test_single_lecture_hall() {
        let a = Allocation::new("A1", "L1", "CS101-01", "T1")
            .with_students(60)
            .with_duration(120)
            .with_days(Weekday::WORKDAYS)
            .with_window(TimeOfDay::hm(8, 0), TimeOfDay::hm(17, 0))
            .with_venue_type("lecture-hall");
        let venues = vec![Venue::new("V1", "lecture-hall", 80)];

        let plan = seeded(1).build_term_plan("T1", &[a.clone()], &venues).unwrap();
        assert_eq!(plan.placed_count(), 1);
        assert!(plan.unresolved.is_empty());

        let slot = plan.slot_for_allocation("A1").unwrap();
        assert_eq!(slot.venue_id, "V1");
        assert_eq!(slot.lecturer_id, "L1");
        assert_eq!(slot.duration_minutes(), 120);
        assert!(a.window.encloses(&slot.interval()));
        assert!(a.allowed_days.contains(&slot.day));
    }

    #[test]
    fn test_same_lecturer_narrow_window() {
        // Window admits exactly one 60 min start: 09:00
        let make = |id: &str| {
            alloc(id, "L1")
                .with_duration(60)
                .with_days([Weekday::Monday])
                .with_window(TimeOfDay::hm(9, 0), TimeOfDay::hm(10, 0))
        };
        let allocations = vec![make("A1"), make("A2")];
        let venues = vec![Venue::new("V1", "room", 50), Venue::new("V2", "room", 50)];

        for seed in 0..20 {
            let plan = seeded(seed)
                .build_term_plan("T1", &allocations, &venues)
                .unwrap();
            assert_eq!(plan.placed_count(), 1);
            assert_eq!(plan.unresolved_count(), 1);
            assert_eq!(
                plan.unresolved[0].reason,
                UnresolvedReason::NoConflictFreeSlot
            );
        }
    }

    #[test]
    fn test_capacity_never_sufficient() {
        let a = alloc("A1", "L1").with_students(100);
        let venues = vec![Venue::new("V1", "room", 99), Venue::new("V2", "hall", 50)];

        let plan = seeded(3).build_term_plan("T1", &[a], &venues).unwrap();
        assert_eq!(plan.placed_count(), 0);
        assert_eq!(plan.unresolved_ids(), vec!["A1"]);
        assert_eq!(plan.unresolved[0].reason, UnresolvedReason::NoEligibleVenue);
    }

    #[test]
    fn test_malformed_allocation_unresolved() {
        let allocations = vec![
            alloc("short", "L1")
                .with_duration(90)
                .with_window(TimeOfDay::hm(9, 0), TimeOfDay::hm(10, 0)),
            alloc("nodays", "L2").with_days([]),
            alloc("fine", "L3"),
        ];
        let venues = vec![Venue::new("V1", "room", 50)];

        let plan = seeded(5).build_term_plan("T1", &allocations, &venues).unwrap();
        assert_eq!(plan.placed_count(), 1);
        assert!(plan.slot_for_allocation("fine").is_some());
        assert!(matches!(
            plan.unresolved_for("short").unwrap().reason,
            UnresolvedReason::Malformed(AllocationDefect::WindowTooShort { .. })
        ));
        assert_eq!(
            plan.unresolved_for("nodays").unwrap().reason,
            UnresolvedReason::Malformed(AllocationDefect::NoAllowedDays)
        );
    }

    #[test]
    fn test_empty_venues_all_unresolved() {
        let allocations = vec![alloc("A1", "L1"), alloc("A2", "L2")];
        let plan = seeded(0).build_term_plan("T1", &allocations, &[]).unwrap();
        assert_eq!(plan.placed_count(), 0);
        assert_eq!(plan.unresolved_count(), 2);
        assert!(plan
            .unresolved
            .iter()
            .all(|u| u.reason == UnresolvedReason::NoVenues));
    }

    #[test]
    fn test_empty_input() {
        let plan = TermPlanner::new().build_term_plan("T1", &[], &[]).unwrap();
        assert_eq!(plan.term_id, "T1");
        assert!(plan.is_complete());
        assert_eq!(plan.allocation_count(), 0);
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let allocations: Vec<Allocation> = (0..8)
            .map(|i| alloc(&format!("A{i}"), &format!("L{}", i % 3)))
            .collect();
        let venues = vec![Venue::new("V1", "room", 50), Venue::new("V2", "room", 50)];

        let p1 = seeded(99).build_term_plan("T1", &allocations, &venues).unwrap();
        let p2 = seeded(99).build_term_plan("T1", &allocations, &venues).unwrap();
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_larger_cohort_wins_contention() {
        // One venue, one start time: only one of the two can be placed.
        let make = |id: &str, lecturer: &str, students: u32| {
            alloc(id, lecturer)
                .with_students(students)
                .with_days([Weekday::Monday])
                .with_window(TimeOfDay::hm(9, 0), TimeOfDay::hm(10, 0))
        };
        let allocations = vec![make("small", "L1", 10), make("large", "L2", 40)];
        let venues = vec![Venue::new("V1", "room", 50)];

        let plan = seeded(11).build_term_plan("T1", &allocations, &venues).unwrap();
        assert!(plan.slot_for_allocation("large").is_some());
        assert_eq!(plan.unresolved_ids(), vec!["small"]);

        let by_input = TermPlanner::with_config(
            PlannerConfig::new()
                .with_seed(11)
                .with_ordering(OrderingPolicy::Submission),
        )
        .unwrap();
        let plan = by_input.build_term_plan("T1", &allocations, &venues).unwrap();
        assert!(plan.slot_for_allocation("small").is_some());
        assert_eq!(plan.unresolved_ids(), vec!["large"]);
    }

    #[test]
    fn test_ineligible_venue_never_used() {
        let a = alloc("A1", "L1").with_students(30).with_venue_type("lab");
        let venues = vec![
            Venue::new("hall", "lecture-hall", 300),
            Venue::new("lab", "lab", 30),
            Venue::new("tiny-lab", "lab", 10),
        ];
        for seed in 0..20 {
            let plan = seeded(seed).build_term_plan("T1", &[a.clone()], &venues).unwrap();
            assert_eq!(plan.slot_for_allocation("A1").unwrap().venue_id, "lab");
        }
    }

    #[test]
    fn test_strict_term() {
        let allocations = vec![alloc("A1", "L1"), alloc("A2", "L2")];
        let mut other = alloc("A3", "L3");
        other.term_id = "T2".into();
        let mixed = [allocations.clone(), vec![other]].concat();
        let venues = vec![Venue::new("V1", "room", 50)];

        let strict =
            TermPlanner::with_config(PlannerConfig::new().with_seed(1).with_strict_term(true))
                .unwrap();
        assert!(strict.build_term_plan("T1", &allocations, &venues).is_ok());
        assert_eq!(
            strict.build_term_plan("T1", &mixed, &venues).unwrap_err(),
            PlanError::TermMismatch {
                allocation_id: "A3".into(),
                expected: "T1".into(),
                found: "T2".into(),
            }
        );

        // Lenient planners ignore the term field.
        assert_eq!(
            seeded(1)
                .build_term_plan("T1", &mixed, &venues)
                .unwrap()
                .allocation_count(),
            3
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = TermPlanner::with_config(PlannerConfig::new().with_granularity(0)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidConfig(_)));
    }

    #[test]
    fn test_custom_rng() {
        let allocations = vec![alloc("A1", "L1")];
        let venues = vec![Venue::new("V1", "room", 50)];
        let mut rng = StdRng::seed_from_u64(123);
        let plan = TermPlanner::new()
            .build_term_plan_with_rng("T1", &allocations, &venues, &mut rng)
            .unwrap();
        assert_eq!(plan.placed_count(), 1);
    }
}
