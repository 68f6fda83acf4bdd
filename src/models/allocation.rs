//! Timetable allocation model.
//!
//! An allocation is one recurring weekly teaching session that needs a
//! day, a start time and a venue: one lecturer teaching one course section
//! for a fixed duration, to an expected headcount, inside a permitted
//! window on a permitted set of days.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use super::{TimeOfDay, TimeWindow, Weekday};

/// A weekly class session requirement to be placed by the planner.
///
/// Immutable for the duration of a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Unique allocation identifier.
    pub id: String,
    /// Lecturer who teaches the session.
    pub lecturer_id: String,
    /// Course section being taught.
    pub course_section_id: String,
    /// Academic term the allocation belongs to.
    pub term_id: String,
    /// Session length in minutes.
    pub duration_minutes: u32,
    /// Expected headcount.
    pub number_of_students: u32,
    /// Days on which the session may run.
    pub allowed_days: BTreeSet<Weekday>,
    /// Permitted time-of-day window; the whole session must fit inside.
    pub window: TimeWindow,
    /// Acceptable venue types. Empty = any type.
    pub preferred_venue_types: BTreeSet<String>,
    /// Schools the lecturer is assigned to, matched against venue ownership.
    pub owner_schools: BTreeSet<String>,
}

/// Structural defect that makes an allocation impossible to place.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AllocationDefect {
    /// Duration is zero.
    #[error("duration is zero")]
    ZeroDuration,
    /// Headcount is zero.
    #[error("number of students is zero")]
    ZeroStudents,
    /// No allowed days.
    #[error("no allowed days")]
    NoAllowedDays,
    /// Window is shorter than the session.
    #[error("window of {window_minutes} min is shorter than the {duration_minutes} min session")]
    WindowTooShort {
        window_minutes: u32,
        duration_minutes: u32,
    },
}

impl Allocation {
    /// Creates an allocation with a one-hour, weekday, 08:00-17:00 default shape.
    pub fn new(
        id: impl Into<String>,
        lecturer_id: impl Into<String>,
        course_section_id: impl Into<String>,
        term_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            lecturer_id: lecturer_id.into(),
            course_section_id: course_section_id.into(),
            term_id: term_id.into(),
            duration_minutes: 60,
            number_of_students: 1,
            allowed_days: Weekday::WORKDAYS.into_iter().collect(),
            window: TimeWindow::new(TimeOfDay::hm(8, 0), TimeOfDay::hm(17, 0)),
            preferred_venue_types: BTreeSet::new(),
            owner_schools: BTreeSet::new(),
        }
    }

    /// Sets the session duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Sets the expected headcount.
    pub fn with_students(mut self, count: u32) -> Self {
        self.number_of_students = count;
        self
    }

    /// Replaces the allowed days.
    pub fn with_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.allowed_days = days.into_iter().collect();
        self
    }

    /// Sets the permitted window.
    pub fn with_window(mut self, start: TimeOfDay, end: TimeOfDay) -> Self {
        self.window = TimeWindow::new(start, end);
        self
    }

    /// Adds an acceptable venue type.
    pub fn with_venue_type(mut self, venue_type: impl Into<String>) -> Self {
        self.preferred_venue_types.insert(venue_type.into());
        self
    }

    /// Adds an owning school.
    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.owner_schools.insert(school.into());
        self
    }

    /// Returns the first structural defect, if any.
    ///
    /// A defective allocation has no candidates and always ends up unresolved.
    pub fn defect(&self) -> Option<AllocationDefect> {
        if self.duration_minutes == 0 {
            return Some(AllocationDefect::ZeroDuration);
        }
        if self.number_of_students == 0 {
            return Some(AllocationDefect::ZeroStudents);
        }
        if self.allowed_days.is_empty() {
            return Some(AllocationDefect::NoAllowedDays);
        }
        if !self.window.fits(self.duration_minutes) {
            return Some(AllocationDefect::WindowTooShort {
                window_minutes: self.window.duration_minutes(),
                duration_minutes: self.duration_minutes,
            });
        }
        None
    }

    /// Whether the allocation can be placed at all, ignoring venues.
    pub fn is_well_formed(&self) -> bool {
        self.defect().is_none()
    }

    /// Whether a session on `day` at `[start, start + duration)` respects
    /// the allowed days and the window.
    pub fn permits(&self, day: Weekday, start: TimeOfDay) -> bool {
        self.allowed_days.contains(&day)
            && TimeWindow::starting_at(start, self.duration_minutes)
                .is_some_and(|session| self.window.encloses(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_builder() {
        let a = Allocation::new("A1", "L1", "CS101-01", "2026S1")
            .with_duration(120)
            .with_students(60)
            .with_days([Weekday::Monday, Weekday::Wednesday])
            .with_window(TimeOfDay::hm(9, 0), TimeOfDay::hm(15, 0))
            .with_venue_type("lecture-hall")
            .with_school("SCI");

        assert_eq!(a.id, "A1");
        assert_eq!(a.lecturer_id, "L1");
        assert_eq!(a.course_section_id, "CS101-01");
        assert_eq!(a.term_id, "2026S1");
        assert_eq!(a.duration_minutes, 120);
        assert_eq!(a.number_of_students, 60);
        assert_eq!(a.allowed_days.len(), 2);
        assert!(a.preferred_venue_types.contains("lecture-hall"));
        assert!(a.owner_schools.contains("SCI"));
        assert!(a.is_well_formed());
    }

    #[test]
    fn test_defaults() {
        let a = Allocation::new("A1", "L1", "S1", "T1");
        assert_eq!(a.duration_minutes, 60);
        assert_eq!(a.allowed_days.len(), 5);
        assert!(a.preferred_venue_types.is_empty());
        assert!(a.is_well_formed());
    }

    #[test]
    fn test_defects() {
        let base = Allocation::new("A1", "L1", "S1", "T1");

        assert_eq!(
            base.clone().with_duration(0).defect(),
            Some(AllocationDefect::ZeroDuration)
        );
        assert_eq!(
            base.clone().with_students(0).defect(),
            Some(AllocationDefect::ZeroStudents)
        );
        assert_eq!(
            base.clone().with_days([]).defect(),
            Some(AllocationDefect::NoAllowedDays)
        );
        assert_eq!(
            base.with_window(TimeOfDay::hm(8, 0), TimeOfDay::hm(8, 45)).defect(),
            Some(AllocationDefect::WindowTooShort {
                window_minutes: 45,
                duration_minutes: 60
            })
        );
    }

    #[test]
    fn test_permits() {
        let a = Allocation::new("A1", "L1", "S1", "T1")
            .with_duration(60)
            .with_days([Weekday::Tuesday])
            .with_window(TimeOfDay::hm(9, 0), TimeOfDay::hm(12, 0));

        assert!(a.permits(Weekday::Tuesday, TimeOfDay::hm(9, 0)));
        assert!(a.permits(Weekday::Tuesday, TimeOfDay::hm(11, 0)));
        assert!(!a.permits(Weekday::Tuesday, TimeOfDay::hm(11, 30))); // ends 12:30
        assert!(!a.permits(Weekday::Tuesday, TimeOfDay::hm(8, 30)));
        assert!(!a.permits(Weekday::Monday, TimeOfDay::hm(9, 0)));
    }

    #[test]
    fn test_defect_message() {
        let d = AllocationDefect::WindowTooShort {
            window_minutes: 30,
            duration_minutes: 60,
        };
        assert_eq!(
            d.to_string(),
            "window of 30 min is shorter than the 60 min session"
        );
    }

    #[test]
    fn test_deserialize_rejects_window_past_midnight() {
        let json = r#"{
            "id": "A1", "lecturer_id": "L1", "course_section_id": "S1", "term_id": "T1",
            "duration_minutes": 60, "number_of_students": 20,
            "allowed_days": ["monday"],
            "window": {"start": 1430, "end": 100000},
            "preferred_venue_types": [], "owner_schools": []
        }"#;
        assert!(serde_json::from_str::<Allocation>(json).is_err());

        let ok = json.replace("100000", "1440");
        let a: Allocation = serde_json::from_str(&ok).unwrap();
        assert_eq!(a.window.end, TimeOfDay::END_OF_DAY);
        assert_eq!(
            a.defect(),
            Some(AllocationDefect::WindowTooShort {
                window_minutes: 10,
                duration_minutes: 60,
            })
        );
    }
}
