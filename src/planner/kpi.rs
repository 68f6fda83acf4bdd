//! Term plan quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement Rate | placed / (placed + unresolved) |
//! | Venue Utilization | booked minutes / weekly horizon, per venue |
//! | Sessions by Day | slot count per weekday |
//! | Distinct Start Times | number of different start times used |
//! | Earliest-Start Share | fraction of slots starting at their window's opening |
//!
//! A high earliest-start share with few distinct start times is the
//! signature of a congested, front-loaded timetable.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{Allocation, TermPlan, Weekday};

/// Term plan indicators.
///
/// All durations are in minutes.
#[derive(Debug, Clone)]
pub struct TermPlanKpi {
    /// Fraction of allocations placed (0.0..1.0).
    pub placement_rate: f64,
    /// Booked minutes per venue that has at least one slot.
    pub busy_minutes_by_venue: HashMap<String, u32>,
    /// Per-venue utilization over the horizon.
    pub utilization_by_venue: HashMap<String, f64>,
    /// Mean utilization across venues with slots.
    pub avg_utilization: f64,
    /// Number of slots on each day.
    pub sessions_by_day: BTreeMap<Weekday, usize>,
    /// Number of distinct start times across all slots.
    pub distinct_start_times: usize,
    /// Fraction of slots starting exactly at their allocation's window start.
    pub earliest_start_share: f64,
}

impl TermPlanKpi {
    /// Computes KPIs from a plan and its input allocations.
    ///
    /// # Arguments
    /// * `plan` - The finished term plan.
    /// * `allocations` - The allocations the plan was built from (for windows).
    /// * `horizon_minutes` - Bookable minutes per venue per week
    ///   (e.g. 5 days × 600 min for 08:00-18:00 weekdays).
    pub fn calculate(plan: &TermPlan, allocations: &[Allocation], horizon_minutes: u32) -> Self {
        let total = plan.allocation_count();
        let placement_rate = if total == 0 {
            1.0
        } else {
            plan.placed_count() as f64 / total as f64
        };

        let mut busy_minutes_by_venue: HashMap<String, u32> = HashMap::new();
        let mut sessions_by_day: BTreeMap<Weekday, usize> = BTreeMap::new();
        let mut starts = BTreeSet::new();
        for slot in &plan.slots {
            *busy_minutes_by_venue
                .entry(slot.venue_id.clone())
                .or_insert(0) += slot.duration_minutes();
            *sessions_by_day.entry(slot.day).or_insert(0) += 1;
            starts.insert(slot.start);
        }

        let utilization_by_venue: HashMap<String, f64> = if horizon_minutes == 0 {
            HashMap::new()
        } else {
            busy_minutes_by_venue
                .iter()
                .map(|(id, &busy)| (id.clone(), busy as f64 / horizon_minutes as f64))
                .collect()
        };
        let avg_utilization = if utilization_by_venue.is_empty() {
            0.0
        } else {
            utilization_by_venue.values().sum::<f64>() / utilization_by_venue.len() as f64
        };

        let window_start: HashMap<&str, _> = allocations
            .iter()
            .map(|a| (a.id.as_str(), a.window.start))
            .collect();
        let at_earliest = plan
            .slots
            .iter()
            .filter(|s| window_start.get(s.allocation_id.as_str()) == Some(&s.start))
            .count();
        let earliest_start_share = if plan.slots.is_empty() {
            0.0
        } else {
            at_earliest as f64 / plan.slots.len() as f64
        };

        Self {
            placement_rate,
            busy_minutes_by_venue,
            utilization_by_venue,
            avg_utilization,
            sessions_by_day,
            distinct_start_times: starts.len(),
            earliest_start_share,
        }
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement_rate: f64, max_earliest_share: f64) -> bool {
        self.placement_rate >= min_placement_rate && self.earliest_start_share <= max_earliest_share
    }
}
