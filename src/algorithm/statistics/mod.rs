//! Period-bucketed demographic statistics
//!
//! This module computes average ages at marriage and death, birth and
//! death counts and the average number of children per marriage, either
//! over the whole dataset or per calendar-year period.

pub mod accumulator;
pub mod aggregate;
pub mod ledger;
pub mod parallel;
pub mod period;
pub mod report;
pub mod router;

// Re-export commonly used items
pub use accumulator::{AgeTally, Accumulator, SexTallies};
pub use aggregate::{
    accumulate, aggregate, aggregate_by_interval, aggregate_rows, aggregate_unbinned,
    process_record,
};
pub use ledger::{CoupleKey, Ledger, ParentKey, UnorderedPair};
pub use parallel::{accumulate_parallel, aggregate_parallel};
pub use period::{Period, route_period};
pub use report::{Statistics, generate_summary};
pub use router::BucketRouter;
