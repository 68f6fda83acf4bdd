//! Venue model.
//!
//! Venues are the bookable physical spaces sessions are placed into:
//! lecture halls, labs, seminar rooms. Each venue has a seating capacity,
//! a single type, and an optional school-ownership restriction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A bookable physical space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Unique venue identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Seating capacity.
    pub capacity: u32,
    /// Venue type identifier (e.g. "lecture-hall", "lab").
    pub venue_type: String,
    /// Schools allowed to book this venue. Empty = open to all schools.
    pub permitted_schools: BTreeSet<String>,
}

impl Venue {
    /// Creates an unrestricted venue.
    pub fn new(id: impl Into<String>, venue_type: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            venue_type: venue_type.into(),
            permitted_schools: BTreeSet::new(),
        }
    }

    /// Sets the venue name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restricts the venue to an additional school.
    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.permitted_schools.insert(school.into());
        self
    }

    /// Whether any school may book this venue.
    pub fn is_open(&self) -> bool {
        self.permitted_schools.is_empty()
    }

    /// Whether a headcount fits.
    #[inline]
    pub fn seats(&self, students: u32) -> bool {
        self.capacity >= students
    }
}
