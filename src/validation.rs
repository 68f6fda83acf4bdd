//! Input validation and plan auditing.
//!
//! [`validate_input`] checks allocations and venues before submission.
//! Detects:
//! - Duplicate IDs
//! - Empty venue set
//! - Zero durations, headcounts or capacities
//! - Empty day sets and windows shorter than the session
//!
//! The planner does not require validation to pass; malformed allocations
//! are simply reported as unresolved. Validating first lets the caller
//! surface one precise message per problem instead.
//!
//! [`audit_plan`] re-checks a finished plan against every hard rule:
//! no double-booking, eligibility, day/window bounds, and that each
//! allocation is accounted for exactly once.

use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::eligibility::{self, Ineligibility};
use crate::models::{Allocation, AllocationDefect, Slot, TermPlan, Venue};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// No venues were supplied.
    NoVenues,
    /// An allocation cannot be placed as specified.
    MalformedAllocation,
    /// A venue has zero capacity.
    ZeroCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a planning run.
///
/// Checks:
/// 1. No duplicate allocation IDs
/// 2. No duplicate venue IDs
/// 3. At least one venue
/// 4. Every venue seats at least one student
/// 5. Every allocation is well-formed (see [`AllocationDefect`])
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(allocations: &[Allocation], venues: &[Venue]) -> ValidationResult {
    let mut errors = Vec::new();

    if venues.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoVenues,
            "No venues configured",
        ));
    }

    let mut venue_ids = HashSet::new();
    for v in venues {
        if !venue_ids.insert(v.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate venue ID: {}", v.id),
            ));
        }
        if v.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Venue '{}' has zero capacity", v.id),
            ));
        }
    }

    let mut allocation_ids = HashSet::new();
    for a in allocations {
        if !allocation_ids.insert(a.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate allocation ID: {}", a.id),
            ));
        }
        if let Some(defect) = a.defect() {
            errors.push(malformed(a, &defect));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn malformed(a: &Allocation, defect: &AllocationDefect) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::MalformedAllocation,
        format!("Allocation '{}': {defect}", a.id),
    )
}

/// A hard-rule violation found in a finished plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Type of violation.
    pub kind: ViolationKind,
    /// Related entity ID (allocation, lecturer or venue).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of plan violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A lecturer teaches two overlapping sessions.
    LecturerDoubleBooked,
    /// A venue hosts two overlapping sessions.
    VenueDoubleBooked,
    /// Venue capacity below headcount.
    CapacityExceeded,
    /// Venue type not among the preferred types.
    VenueTypeMismatch,
    /// Venue restricted to other schools.
    SchoolRestricted,
    /// Session not fully inside the allocation window, or wrong length.
    OutsideWindow,
    /// Session on a day the allocation does not allow.
    DayNotAllowed,
    /// Plan references an allocation that was not supplied.
    UnknownAllocation,
    /// Slot references a venue that was not supplied.
    UnknownVenue,
    /// An allocation appears more than once in the plan.
    DuplicatePlacement,
    /// An allocation appears neither as a slot nor as unresolved.
    MissingAllocation,
}

impl Violation {
    fn new(kind: ViolationKind, entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

/// Audits a plan against the allocations and venues it was built from.
///
/// Returns every violation found; an empty vector means the plan is
/// conflict-free, respects eligibility and windows, and accounts for each
/// allocation exactly once.
///
/// Totality is counted per input entry, so an id repeated in `allocations`
/// may appear that many times. Per-slot checks resolve a repeated id to its
/// last entry; run [`validate_input`] first to rule such inputs out.
pub fn audit_plan(plan: &TermPlan, allocations: &[Allocation], venues: &[Venue]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let allocation_by_id: HashMap<&str, &Allocation> =
        allocations.iter().map(|a| (a.id.as_str(), a)).collect();
    let venue_by_id: HashMap<&str, &Venue> = venues.iter().map(|v| (v.id.as_str(), v)).collect();

    // Totality: each input allocation exactly once across slots and
    // unresolved. Counts are per id, so a duplicated input id may appear
    // once per input entry.
    let mut expected: HashMap<&str, usize> = HashMap::new();
    for a in allocations {
        *expected.entry(a.id.as_str()).or_insert(0) += 1;
    }
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let plan_ids = plan
        .slots
        .iter()
        .map(|s| s.allocation_id.as_str())
        .chain(plan.unresolved.iter().map(|u| u.allocation_id.as_str()));
    for id in plan_ids {
        *seen.entry(id).or_insert(0) += 1;
    }
    for (&id, &count) in &seen {
        match expected.get(id) {
            None => violations.push(Violation::new(
                ViolationKind::UnknownAllocation,
                id,
                format!("Plan references unknown allocation '{id}'"),
            )),
            Some(&want) if count > want => violations.push(Violation::new(
                ViolationKind::DuplicatePlacement,
                id,
                format!("Allocation '{id}' appears {count} times in the plan"),
            )),
            Some(_) => {}
        }
    }
    let mut reported = HashSet::new();
    for a in allocations {
        let id = a.id.as_str();
        let count = seen.get(id).copied().unwrap_or(0);
        if count < expected[id] && reported.insert(id) {
            violations.push(Violation::new(
                ViolationKind::MissingAllocation,
                id,
                format!("Allocation '{id}' is neither placed nor unresolved"),
            ));
        }
    }

    // Per-slot rules.
    for slot in &plan.slots {
        let Some(allocation) = allocation_by_id.get(slot.allocation_id.as_str()) else {
            continue;
        };
        audit_bounds(slot, allocation, &mut violations);

        match venue_by_id.get(slot.venue_id.as_str()) {
            None => violations.push(Violation::new(
                ViolationKind::UnknownVenue,
                &slot.venue_id,
                format!(
                    "Slot for '{}' uses unknown venue '{}'",
                    slot.allocation_id, slot.venue_id
                ),
            )),
            Some(venue) => {
                if let Err(reason) = eligibility::check(allocation, venue) {
                    let kind = match reason {
                        Ineligibility::Capacity { .. } => ViolationKind::CapacityExceeded,
                        Ineligibility::VenueType { .. } => ViolationKind::VenueTypeMismatch,
                        Ineligibility::School => ViolationKind::SchoolRestricted,
                    };
                    violations.push(Violation::new(
                        kind,
                        &slot.allocation_id,
                        format!(
                            "Venue '{}' is not eligible for '{}': {reason}",
                            venue.id, slot.allocation_id
                        ),
                    ));
                }
            }
        }
    }

    // Pairwise clashes per lecturer and per venue.
    let mut by_lecturer: HashMap<&str, Vec<&Slot>> = HashMap::new();
    let mut by_venue: HashMap<&str, Vec<&Slot>> = HashMap::new();
    for slot in &plan.slots {
        let lecturer = allocation_by_id
            .get(slot.allocation_id.as_str())
            .map(|a| a.lecturer_id.as_str())
            .unwrap_or(slot.lecturer_id.as_str());
        by_lecturer.entry(lecturer).or_default().push(slot);
        by_venue.entry(slot.venue_id.as_str()).or_default().push(slot);
    }
    audit_clashes(&by_lecturer, ViolationKind::LecturerDoubleBooked, "Lecturer", &mut violations);
    audit_clashes(&by_venue, ViolationKind::VenueDoubleBooked, "Venue", &mut violations);

    violations
}

fn audit_bounds(slot: &Slot, allocation: &Allocation, violations: &mut Vec<Violation>) {
    if !allocation.allowed_days.contains(&slot.day) {
        violations.push(Violation::new(
            ViolationKind::DayNotAllowed,
            &slot.allocation_id,
            format!("'{}' placed on {}, which is not allowed", slot.allocation_id, slot.day),
        ));
    }
    if slot.end < slot.start
        || slot.duration_minutes() != allocation.duration_minutes
        || !allocation.window.encloses(&slot.interval())
    {
        violations.push(Violation::new(
            ViolationKind::OutsideWindow,
            &slot.allocation_id,
            format!(
                "'{}' placed at {}, outside window {} or not {} min long",
                slot.allocation_id,
                slot.interval(),
                allocation.window,
                allocation.duration_minutes
            ),
        ));
    }
}

fn audit_clashes(
    groups: &HashMap<&str, Vec<&Slot>>,
    kind: ViolationKind,
    label: &str,
    violations: &mut Vec<Violation>,
) {
    for (&id, slots) in groups {
        for (i, a) in slots.iter().enumerate() {
            for b in &slots[i + 1..] {
                if a.clashes_with(b) {
                    violations.push(Violation::new(
                        kind.clone(),
                        id,
                        format!(
                            "{label} '{id}' double-booked on {}: '{}' {} and '{}' {}",
                            a.day,
                            a.allocation_id,
                            a.interval(),
                            b.allocation_id,
                            b.interval()
                        ),
                    ));
                }
            }
        }
    }
}
