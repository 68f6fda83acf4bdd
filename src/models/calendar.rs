//! Weekly time grid.
//!
//! Models the teaching week as seven days, each day as minutes since
//! midnight, and provides half-open interval arithmetic plus the
//! discretisation of a window into candidate start times.
//!
//! # Time Model
//! Times of day are whole minutes in `0..=1440`; `24:00` is a valid
//! exclusive end. Intervals are half-open: `[start, end)`.
//!
//! # Overlap
//! Two intervals `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && s2 < e1`.
//! Touching intervals (one ends exactly when the other starts) do not.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minutes in a day; the largest valid [`TimeOfDay`].
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day, stored as minutes since midnight.
///
/// Serialized as a bare minute count. Deserializing a value above `1440`
/// fails with [`TimeOutOfRange`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimeOfDay(u32);

/// A minute count past `24:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("time of day {0} is past 24:00 (1440 minutes)")]
pub struct TimeOutOfRange(pub u32);

impl TimeOfDay {
    /// Midnight (start of day).
    pub const MIDNIGHT: Self = Self(0);
    /// End of day (`24:00`), usable as an exclusive bound.
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Creates a time from minutes since midnight, clamped to `24:00`.
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes.min(MINUTES_PER_DAY))
    }

    /// Creates a time from hours and minutes (e.g. `hm(8, 30)` = 08:30).
    pub fn hm(hours: u32, minutes: u32) -> Self {
        Self::from_minutes(hours.saturating_mul(60).saturating_add(minutes))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// This time shifted forward by `minutes`, or `None` past `24:00`.
    pub fn checked_add(self, minutes: u32) -> Option<Self> {
        let t = self.0.checked_add(minutes)?;
        (t <= MINUTES_PER_DAY).then_some(Self(t))
    }
}

impl TryFrom<u32> for TimeOfDay {
    type Error = TimeOutOfRange;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        if minutes > MINUTES_PER_DAY {
            return Err(TimeOutOfRange(minutes));
        }
        Ok(Self(minutes))
    }
}

impl From<TimeOfDay> for u32 {
    fn from(time: TimeOfDay) -> Self {
        time.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Day of the teaching week.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Monday through Friday.
    pub const WORKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Lowercase English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A time-of-day interval `[start, end)`.
///
/// Used both for permitted windows and for committed session intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: TimeOfDay,
    /// Interval end (exclusive).
    pub end: TimeOfDay,
}

impl TimeWindow {
    /// Creates a new window.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Creates the interval `[start, start + duration)`, or `None` if it
    /// would run past midnight.
    pub fn starting_at(start: TimeOfDay, duration_minutes: u32) -> Option<Self> {
        start
            .checked_add(duration_minutes)
            .map(|end| Self::new(start, end))
    }

    /// Length of this window in minutes (0 if inverted).
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Whether a time falls within this window.
    #[inline]
    pub fn contains(&self, time: TimeOfDay) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether `other` lies entirely inside this window.
    pub fn encloses(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether two windows overlap (half-open test).
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether a session of `duration_minutes` fits inside this window.
    pub fn fits(&self, duration_minutes: u32) -> bool {
        self.duration_minutes() >= duration_minutes
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Enumerates every valid start time for a session inside a window.
///
/// Produces `window.start, window.start + granularity, ...` for as long as
/// `t + duration <= window.end`. Returns an empty vector when the window is
/// too small, the duration is zero, or the granularity is zero.
///
/// # Example
/// ```
/// use u_timetable::models::{start_times, TimeOfDay, TimeWindow};
///
/// let window = TimeWindow::new(TimeOfDay::hm(8, 0), TimeOfDay::hm(10, 0));
/// let starts = start_times(&window, 60, 30);
/// assert_eq!(starts, vec![TimeOfDay::hm(8, 0), TimeOfDay::hm(8, 30), TimeOfDay::hm(9, 0)]);
/// ```
pub fn start_times(window: &TimeWindow, duration_minutes: u32, granularity: u32) -> Vec<TimeOfDay> {
    if granularity == 0 || duration_minutes == 0 || !window.fits(duration_minutes) {
        return Vec::new();
    }

    let first = window.start.minutes();
    let last = window.end.minutes() - duration_minutes;
    (first..=last)
        .step_by(granularity as usize)
        .map(TimeOfDay::from_minutes)
        .collect()
}
