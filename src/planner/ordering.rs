//! Allocation processing order.
//!
//! Under contention, allocations processed earlier win scarce slots.
//! Every policy here is deterministic and breaks remaining ties by
//! allocation ID, so results never depend on input order (except for
//! [`OrderingPolicy::Submission`], which keeps it on purpose).

use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};

use crate::eligibility::eligible_venues;
use crate::models::{start_times, Allocation, Venue};

/// Policy for sequencing allocations before placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Largest headcount first, then longest session, then ID.
    ///
    /// Big cohorts fit fewer venues, so they go while the grid is open.
    #[default]
    LargestCohortFirst,
    /// Fewest eligible venues first, then fewest grid positions
    /// (days × start times), then largest headcount, then ID.
    MostConstrainedFirst,
    /// Input order.
    Submission,
}

impl OrderingPolicy {
    /// Returns indices into `allocations` in processing order.
    pub fn sort_indices(
        &self,
        allocations: &[Allocation],
        venues: &[Venue],
        granularity_minutes: u32,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..allocations.len()).collect();

        match self {
            OrderingPolicy::Submission => {}
            OrderingPolicy::LargestCohortFirst => {
                indices.sort_by(|&a, &b| {
                    let (x, y) = (&allocations[a], &allocations[b]);
                    y.number_of_students
                        .cmp(&x.number_of_students)
                        .then(y.duration_minutes.cmp(&x.duration_minutes))
                        .then_with(|| by_id(x, y))
                });
            }
            OrderingPolicy::MostConstrainedFirst => {
                let keys: Vec<_> = allocations
                    .iter()
                    .map(|a| {
                        let venue_count = eligible_venues(a, venues).count();
                        let positions = a.allowed_days.len()
                            * start_times(&a.window, a.duration_minutes, granularity_minutes)
                                .len();
                        (venue_count, positions, Reverse(a.number_of_students))
                    })
                    .collect();
                indices.sort_by(|&a, &b| {
                    keys[a]
                        .cmp(&keys[b])
                        .then_with(|| by_id(&allocations[a], &allocations[b]))
                });
            }
        }

        indices
    }
}

fn by_id(a: &Allocation, b: &Allocation) -> Ordering {
    a.id.cmp(&b.id)
}
