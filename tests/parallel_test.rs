#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use famtree_stats::algorithm::statistics::{accumulate, accumulate_parallel};
    use famtree_stats::{
        BinningConfig, PersonId, PersonRecord, RelationType, Sex, StatsError, aggregate,
        aggregate_parallel,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_date(rng: &mut StdRng, from_year: i32, to_year: i32) -> Option<NaiveDate> {
        if rng.random_bool(0.15) {
            return None;
        }
        NaiveDate::from_ymd_opt(
            rng.random_range(from_year..=to_year),
            rng.random_range(1..=12),
            rng.random_range(1..=28),
        )
    }

    fn random_id(rng: &mut StdRng, max: u32) -> Option<PersonId> {
        if rng.random_bool(0.1) {
            None
        } else {
            Some(PersonId(rng.random_range(0..max)))
        }
    }

    /// Records with heavily colliding ids, so relation ids are registered
    /// with different partners across chunks
    fn random_records(seed: u64, count: usize) -> Vec<PersonRecord> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                let birth_date = random_date(&mut rng, 1800, 1950);
                PersonRecord {
                    birth_date,
                    marriage_date: random_date(&mut rng, 1820, 1990),
                    death_date: random_date(&mut rng, 1820, 2020),
                    relation_type: RelationType::ALL[rng.random_range(0..RelationType::ALL.len())],
                    sex: [Sex::Male, Sex::Female, Sex::Unknown][rng.random_range(0..3)],
                    id: random_id(&mut rng, 300),
                    father_id: random_id(&mut rng, 60),
                    mother_id: random_id(&mut rng, 60),
                    relation_id: random_id(&mut rng, 40),
                    partner_id: random_id(&mut rng, 300),
                }
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records = random_records(7, 2_000);

        for binning in [
            BinningConfig::disabled(),
            BinningConfig::new(1850, 1950, 0),
            BinningConfig::new(1850, 1950, 10),
            BinningConfig::by_interval(33),
        ] {
            let sequential = accumulate(&records, binning);
            for chunk_size in [1, 7, 128, 5_000] {
                let parallel = accumulate_parallel(&records, binning, chunk_size);

                assert_eq!(
                    parallel.periods().collect::<Vec<_>>(),
                    sequential.periods().collect::<Vec<_>>()
                );
                for period in sequential.periods() {
                    assert_eq!(parallel.bucket(period), sequential.bucket(period));
                }
                assert_eq!(parallel.finalize(), sequential.finalize());
            }
        }
    }

    #[test]
    fn test_aggregate_parallel_entry_point() {
        let records = random_records(11, 3_000);
        let binning = BinningConfig::new(1800, 2020, 25);

        assert_eq!(
            aggregate_parallel(&records, binning).unwrap(),
            aggregate(&records, binning).unwrap()
        );
        assert!(matches!(
            aggregate_parallel(&[], binning),
            Err(StatsError::NoData(_))
        ));
    }

    #[test]
    fn test_merge_equals_concatenated_input() {
        let records = random_records(23, 500);
        let binning = BinningConfig::new(1800, 2000, 50);
        let (head, tail) = records.split_at(180);

        let mut merged = accumulate(head, binning);
        merged.merge(accumulate(tail, binning));

        assert_eq!(merged.finalize(), accumulate(&records, binning).finalize());
    }
}
