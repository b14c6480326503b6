//! Aggregation driver
//!
//! Runs a single pass over person records, routing the marriage, death and
//! birth facts of every record to their buckets, then finalizes every
//! touched bucket.

use std::time::Instant;

use log::info;

use crate::algorithm::statistics::report::Statistics;
use crate::algorithm::statistics::router::BucketRouter;
use crate::config::{BinningConfig, ColumnConfig};
use crate::error::{Result, StatsError};
use crate::models::PersonRecord;
use crate::normalize::{RawRow, normalize_rows};

/// Route and process the three facts of one record
pub fn process_record(router: &mut BucketRouter, record: &PersonRecord) {
    let bucket = router.route(record.marriage_date);
    bucket.process_children_at_marriage(
        record.id,
        record.father_id,
        record.mother_id,
        record.relation_id,
        record.partner_id,
        record.relation_type,
    );
    bucket.process_age_at_marriage(
        record.birth_date,
        record.marriage_date,
        record.relation_type,
        record.sex,
    );

    let bucket = router.route(record.death_date);
    bucket.process_age_at_death(record.birth_date, record.death_date, record.sex);
    bucket.process_death(record.death_date);

    let bucket = router.route(record.birth_date);
    bucket.process_birth(record.birth_date);
}

/// Process records in order into a fresh router
#[must_use]
pub fn accumulate(records: &[PersonRecord], binning: BinningConfig) -> BucketRouter {
    let mut router = BucketRouter::new(binning);
    for record in records {
        process_record(&mut router, record);
    }
    router
}

pub(crate) fn ensure_records(records: &[PersonRecord]) -> Result<()> {
    if records.is_empty() {
        return Err(StatsError::no_data("no person records to aggregate"));
    }
    Ok(())
}

/// Compute statistics per touched period, in ascending period order
///
/// Facts without a date, or dated outside the configured range, are
/// reported under [`Period::Unbounded`](crate::algorithm::statistics::Period::Unbounded).
pub fn aggregate(records: &[PersonRecord], binning: BinningConfig) -> Result<Vec<Statistics>> {
    ensure_records(records)?;

    let start = Instant::now();
    let router = accumulate(records, binning);
    let stats = router.finalize();

    info!(
        "Aggregated {} records into {} period(s) ({binning}) in {:?}",
        records.len(),
        stats.len(),
        start.elapsed()
    );
    Ok(stats)
}

/// Compute statistics over the whole dataset without period binning
pub fn aggregate_unbinned(records: &[PersonRecord]) -> Result<Statistics> {
    aggregate(records, BinningConfig::disabled())?
        .into_iter()
        .next()
        .ok_or_else(|| StatsError::no_data("no bucket was touched"))
}

/// Compute statistics in windows of `interval` years over the full year range
pub fn aggregate_by_interval(records: &[PersonRecord], interval: i32) -> Result<Vec<Statistics>> {
    aggregate(records, BinningConfig::by_interval(interval))
}

/// Normalize raw rows and compute statistics per touched period
pub fn aggregate_rows(
    rows: &[RawRow],
    columns: &ColumnConfig,
    binning: BinningConfig,
) -> Result<Vec<Statistics>> {
    if rows.is_empty() {
        return Err(StatsError::no_data("no rows to aggregate"));
    }
    aggregate(&normalize_rows(rows, columns), binning)
}
