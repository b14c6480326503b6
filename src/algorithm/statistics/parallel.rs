//! Parallel aggregation
//!
//! Records are split into contiguous chunks that are accumulated on the
//! rayon pool. Chunk routers are merged in chunk order, so a relation id
//! keeps the couple of its earliest record exactly as in a sequential run.

use std::time::Instant;

use log::info;
use rayon::prelude::*;

use crate::algorithm::statistics::aggregate::{accumulate, ensure_records};
use crate::algorithm::statistics::report::Statistics;
use crate::algorithm::statistics::router::BucketRouter;
use crate::config::BinningConfig;
use crate::error::Result;
use crate::models::PersonRecord;

/// Smallest chunk handed to a worker
pub const MIN_CHUNK_SIZE: usize = 1024;

/// Chunk size spreading `record_count` records over the available CPUs
#[must_use]
pub fn chunk_size(record_count: usize) -> usize {
    record_count
        .div_ceil(num_cpus::get().max(1))
        .max(MIN_CHUNK_SIZE)
}

/// Process records in parallel chunks and merge the chunk routers
#[must_use]
pub fn accumulate_parallel(
    records: &[PersonRecord],
    binning: BinningConfig,
    chunk_size: usize,
) -> BucketRouter {
    let partials: Vec<BucketRouter> = records
        .par_chunks(chunk_size.max(1))
        .map(|chunk| accumulate(chunk, binning))
        .collect();

    let mut merged = BucketRouter::new(binning);
    for partial in partials {
        merged.merge(partial);
    }
    merged
}

/// Parallel equivalent of [`aggregate`](crate::algorithm::statistics::aggregate::aggregate)
pub fn aggregate_parallel(
    records: &[PersonRecord],
    binning: BinningConfig,
) -> Result<Vec<Statistics>> {
    ensure_records(records)?;

    let start = Instant::now();
    let chunk_size = chunk_size(records.len());
    let router = accumulate_parallel(records, binning, chunk_size);
    let stats = router.finalize();

    info!(
        "Aggregated {} records in chunks of {chunk_size} into {} period(s) ({binning}) in {:?}",
        records.len(),
        stats.len(),
        start.elapsed()
    );
    Ok(stats)
}
