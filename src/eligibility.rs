//! Static venue eligibility.
//!
//! Decides whether a venue can host an allocation at all, independent of
//! what has already been placed. A venue is eligible iff:
//! - its capacity is at least the allocation's headcount, AND
//! - the allocation accepts any type, or lists the venue's type, AND
//! - the venue is open to all schools, or shares a school with the allocation.
//!
//! Time conflicts are not checked here; see [`crate::occupancy`].

use std::fmt;

use crate::models::{Allocation, Venue};

/// The first rule a venue fails for an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ineligibility {
    /// Venue seats fewer students than expected.
    Capacity { capacity: u32, required: u32 },
    /// Venue type is not among the allocation's preferred types.
    VenueType { venue_type: String },
    /// Venue is restricted to schools the allocation does not belong to.
    School,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligibility::Capacity { capacity, required } => {
                write!(f, "capacity {capacity} below required {required}")
            }
            Ineligibility::VenueType { venue_type } => {
                write!(f, "venue type '{venue_type}' not accepted")
            }
            Ineligibility::School => f.write_str("venue restricted to other schools"),
        }
    }
}

/// Checks every eligibility rule, returning the first failure.
pub fn check(allocation: &Allocation, venue: &Venue) -> Result<(), Ineligibility> {
    if !venue.seats(allocation.number_of_students) {
        return Err(Ineligibility::Capacity {
            capacity: venue.capacity,
            required: allocation.number_of_students,
        });
    }

    if !allocation.preferred_venue_types.is_empty()
        && !allocation.preferred_venue_types.contains(&venue.venue_type)
    {
        return Err(Ineligibility::VenueType {
            venue_type: venue.venue_type.clone(),
        });
    }

    if !venue.is_open()
        && venue
            .permitted_schools
            .is_disjoint(&allocation.owner_schools)
    {
        return Err(Ineligibility::School);
    }

    Ok(())
}

/// Whether `venue` is structurally usable for `allocation`.
#[inline]
pub fn is_eligible(allocation: &Allocation, venue: &Venue) -> bool {
    check(allocation, venue).is_ok()
}

/// Venues usable for `allocation`, in input order.
pub fn eligible_venues<'a>(
    allocation: &'a Allocation,
    venues: &'a [Venue],
) -> impl Iterator<Item = &'a Venue> + 'a {
    venues.iter().filter(move |v| is_eligible(allocation, v))
}
