//! Bucket routing
//!
//! The router owns every accumulator of an aggregation run, keyed by
//! period. Accumulators, the default one included, are created the first
//! time a fact is routed to them, so only touched buckets are reported.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;
use log::debug;

use crate::algorithm::statistics::accumulator::Accumulator;
use crate::algorithm::statistics::period::{Period, route_period};
use crate::algorithm::statistics::report::Statistics;
use crate::config::BinningConfig;

/// Maps fact dates to the accumulator of their period
#[derive(Debug, Clone)]
pub struct BucketRouter {
    binning: BinningConfig,
    buckets: BTreeMap<Period, Accumulator>,
}

impl BucketRouter {
    /// Create a router with no buckets yet
    #[must_use]
    pub fn new(binning: BinningConfig) -> Self {
        Self {
            binning,
            buckets: BTreeMap::new(),
        }
    }

    /// The binning this router applies
    #[must_use]
    pub const fn binning(&self) -> &BinningConfig {
        &self.binning
    }

    /// The accumulator for a fact dated `date`, created if not seen before
    pub fn route(&mut self, date: Option<NaiveDate>) -> &mut Accumulator {
        let period = route_period(date, &self.binning);
        self.buckets.entry(period).or_insert_with(|| {
            debug!("Opening bucket for period {period}");
            Accumulator::new(period)
        })
    }

    /// The accumulator of a period, if any fact was routed to it
    #[must_use]
    pub fn bucket(&self, period: Period) -> Option<&Accumulator> {
        self.buckets.get(&period)
    }

    /// Number of buckets touched so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no fact has been routed yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Touched periods in ascending order
    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.buckets.keys().copied()
    }

    /// Finalize every touched bucket, in ascending period order
    #[must_use]
    pub fn finalize(&self) -> Vec<Statistics> {
        self.buckets.values().map(Accumulator::finalize).collect()
    }

    /// Fold the buckets of a router that processed later records into this one
    pub fn merge(&mut self, other: Self) {
        for (period, accumulator) in other.buckets {
            match self.buckets.entry(period) {
                Entry::Vacant(slot) => {
                    slot.insert(accumulator);
                }
                Entry::Occupied(mut slot) => slot.get_mut().merge(accumulator),
            }
        }
    }
}
