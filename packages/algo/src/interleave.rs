//! Weighted bucket interleaving
//!
//! Merges already-shuffled priority buckets into one sequence. Buckets are
//! considered in priority order at every position; the first bucket whose
//! draw succeeds supplies the next element.
//!
//! A bucket with remaining elements is taken when any of these holds:
//! - it is a `lead` bucket and none of its elements has been placed yet
//! - the position is inside its `position_window` and a uniform draw falls
//!   below its `draw_probability`
//! - every other bucket is exhausted
//!
//! If no bucket fires, the highest-priority non-empty bucket is used. The
//! result is biased, not ordered: high-priority items tend to land earlier.

use std::collections::VecDeque;

use rand::Rng;
use tracing::trace;

use crate::config::{BucketWeight, InterleaveConfig};
use crate::sampling::shuffle;

struct Lane<T> {
    weight: BucketWeight,
    items: VecDeque<T>,
    taken: usize,
}

impl<T> Lane<T> {
    fn has_remaining(&self) -> bool {
        !self.items.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct WeightedInterleaver {
    config: InterleaveConfig,
}

impl WeightedInterleaver {
    /// Unchecked: `config` is expected to come from a validated [`crate::SrsConfig`]
    pub fn new(config: InterleaveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterleaveConfig {
        &self.config
    }

    /// Interleave the high / medium / low buckets
    ///
    /// Sessions no larger than `small_session_threshold` are shuffled flat.
    pub fn interleave<T: Clone, R: Rng + ?Sized>(
        &self,
        high: Vec<T>,
        medium: Vec<T>,
        low: Vec<T>,
        rng: &mut R,
    ) -> Vec<T> {
        let total = high.len() + medium.len() + low.len();
        if total <= self.config.small_session_threshold {
            let mut all = high;
            all.extend(medium);
            all.extend(low);
            return shuffle(&all, rng);
        }

        self.merge(
            vec![
                (self.config.high.clone(), high),
                (self.config.medium.clone(), medium),
                (self.config.low.clone(), low),
            ],
            rng,
        )
    }

    /// Merge any number of buckets, highest priority first
    pub fn merge<T, R: Rng + ?Sized>(
        &self,
        buckets: Vec<(BucketWeight, Vec<T>)>,
        rng: &mut R,
    ) -> Vec<T> {
        let mut lanes: Vec<Lane<T>> = buckets
            .into_iter()
            .map(|(weight, items)| Lane {
                weight,
                items: items.into(),
                taken: 0,
            })
            .collect();
        let total: usize = lanes.iter().map(|lane| lane.items.len()).sum();
        let mut out = Vec::with_capacity(total);

        for position in 0..total {
            let progress = position as f64 / total as f64;
            let idx = Self::pick_lane(&lanes, progress, rng)
                .or_else(|| lanes.iter().position(Lane::has_remaining));

            let Some(idx) = idx else { break };
            let lane = &mut lanes[idx];
            if let Some(item) = lane.items.pop_front() {
                lane.taken += 1;
                trace!(position, lane = idx, "interleave pick");
                out.push(item);
            }
        }

        out
    }

    fn pick_lane<T, R: Rng + ?Sized>(lanes: &[Lane<T>], progress: f64, rng: &mut R) -> Option<usize> {
        for (idx, lane) in lanes.iter().enumerate() {
            if !lane.has_remaining() {
                continue;
            }

            let lead = lane.weight.lead && lane.taken == 0;
            let in_window = lane
                .weight
                .position_window
                .map_or(true, |window| progress < window);
            let drawn = in_window && draw(lane.weight.draw_probability, rng);
            let others_exhausted = lanes
                .iter()
                .enumerate()
                .all(|(other, l)| other == idx || !l.has_remaining());

            if lead || drawn || others_exhausted {
                return Some(idx);
            }
        }
        None
    }
}

fn draw<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> bool {
    if probability >= 1.0 {
        true
    } else if probability <= 0.0 {
        false
    } else {
        rng.gen::<f64>() < probability
    }
}
