#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use famtree_stats::algorithm::statistics::{Statistics, accumulate};
    use famtree_stats::{
        BinningConfig, ColumnConfig, Period, PersonRecord, RawRow, RelationType, Sex,
        StatsError, aggregate, aggregate_by_interval, aggregate_rows, aggregate_unbinned,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Two partners married on the same day, sharing relation 1
    fn married_couple() -> Vec<PersonRecord> {
        let wedding = Some(date(1925, 6, 15));
        vec![
            PersonRecord::new(1)
                .with_birth_date(date(1900, 1, 1))
                .with_sex(Sex::Male)
                .with_relation(RelationType::Marriage, 1, 2, wedding),
            PersonRecord::new(2)
                .with_birth_date(date(1905, 1, 1))
                .with_sex(Sex::Female)
                .with_relation(RelationType::Marriage, 1, 1, wedding),
        ]
    }

    /// Statistics with the period blanked out, for comparing totals
    fn totals(stats: &Statistics) -> Statistics {
        Statistics {
            period: Period::Unbounded,
            ..*stats
        }
    }

    #[test]
    fn test_married_couple_without_children() {
        let stats = aggregate(&married_couple(), BinningConfig::new(0, 0, 0)).unwrap();

        assert_eq!(stats.len(), 1);
        let stats = &stats[0];
        assert_eq!(stats.period, Period::Unbounded);
        assert_eq!(stats.age_at_marriage_male, Some(25));
        assert_eq!(stats.age_at_marriage_female, Some(20));
        assert_eq!(stats.age_at_marriage_both, Some(23));
        assert_eq!(stats.children_per_marriage, Some(0));
        assert_eq!(stats.births, 2);
        assert_eq!(stats.deaths, 0);
        assert_eq!(stats.age_at_death_both, None);
        assert_eq!(stats.age_at_death_male, None);
        assert_eq!(stats.age_at_death_female, None);
    }

    #[test]
    fn test_unbinned_convenience_returns_single_result() {
        let stats = aggregate_unbinned(&married_couple()).unwrap();
        assert_eq!(stats.period, Period::Unbounded);
        assert_eq!(stats.births, 2);
    }

    #[test]
    fn test_empty_input_is_no_data() {
        assert!(matches!(
            aggregate(&[], BinningConfig::disabled()),
            Err(StatsError::NoData(_))
        ));
        assert!(matches!(aggregate_unbinned(&[]), Err(StatsError::NoData(_))));
        assert!(matches!(
            aggregate_rows(&[], &ColumnConfig::default(), BinningConfig::disabled()),
            Err(StatsError::NoData(_))
        ));
    }

    #[test]
    fn test_children_per_marriage_counts_each_child_once() {
        let mut records = married_couple();
        // The same child appears on two rows, one per relation of the child
        records.push(PersonRecord::new(3).with_parents(1, 2));
        records.push(
            PersonRecord::new(3)
                .with_parents(2, 1)
                .with_relation(RelationType::LivingTogether, 7, 8, None),
        );
        records.push(PersonRecord::new(4).with_parents(1, 2));

        let stats = aggregate_unbinned(&records).unwrap();
        assert_eq!(stats.children_per_marriage, Some(2));
    }

    #[test]
    fn test_only_marriages_count_for_marriage_age_and_couples() {
        let wedding = Some(date(1930, 1, 1));
        let records = vec![
            PersonRecord::new(1)
                .with_birth_date(date(1900, 1, 1))
                .with_sex(Sex::Male)
                .with_relation(RelationType::LivingTogether, 5, 2, wedding),
            PersonRecord::new(2)
                .with_birth_date(date(1910, 1, 1))
                .with_sex(Sex::Unknown)
                .with_relation(RelationType::RegisteredPartnership, 6, 3, wedding),
        ];

        let stats = aggregate_unbinned(&records).unwrap();
        assert_eq!(stats.age_at_marriage_both, Some(20));
        assert_eq!(stats.age_at_marriage_male, None);
        assert_eq!(stats.age_at_marriage_female, None);
        assert_eq!(stats.children_per_marriage, Some(0));
    }

    #[test]
    fn test_age_at_death_by_sex() {
        let records = vec![
            PersonRecord::new(1)
                .with_birth_date(date(1900, 1, 1))
                .with_death_date(date(1970, 1, 1))
                .with_sex(Sex::Male),
            PersonRecord::new(2)
                .with_birth_date(date(1900, 1, 1))
                .with_death_date(date(1980, 1, 1))
                .with_sex(Sex::Female),
            PersonRecord::new(3).with_death_date(date(1950, 1, 1)),
        ];

        let stats = aggregate_unbinned(&records).unwrap();
        assert_eq!(stats.age_at_death_male, Some(70));
        assert_eq!(stats.age_at_death_female, Some(80));
        assert_eq!(stats.age_at_death_both, Some(75));
        assert_eq!(stats.deaths, 3);
        assert_eq!(stats.births, 2);
    }

    #[test]
    fn test_facts_of_one_record_land_in_separate_buckets() {
        let record = PersonRecord::new(1)
            .with_birth_date(date(1901, 5, 1))
            .with_death_date(date(1968, 2, 1))
            .with_sex(Sex::Female)
            .with_relation(RelationType::Marriage, 9, 2, Some(date(1923, 8, 1)));

        let stats = aggregate(&[record], BinningConfig::new(1900, 1999, 10)).unwrap();
        let periods: Vec<Period> = stats.iter().map(|s| s.period).collect();
        assert_eq!(
            periods,
            vec![
                Period::years(1900, 1909),
                Period::years(1920, 1929),
                Period::years(1960, 1969),
            ]
        );

        assert_eq!(stats[0].births, 1);
        assert_eq!(stats[0].age_at_marriage_female, None);
        assert_eq!(stats[1].age_at_marriage_female, Some(22));
        assert_eq!(stats[1].children_per_marriage, Some(0));
        assert_eq!(stats[2].deaths, 1);
        assert_eq!(stats[2].age_at_death_female, Some(67));
    }

    #[test]
    fn test_out_of_range_facts_go_to_default_bucket() {
        let records = vec![
            PersonRecord::new(1).with_birth_date(date(1907, 1, 1)),
            PersonRecord::new(2).with_birth_date(date(2000, 1, 1)),
        ];

        let stats = aggregate(&records, BinningConfig::new(1900, 1999, 10)).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].period, Period::Unbounded);
        assert_eq!(stats[0].births, 1);
        assert_eq!(stats[1].period, Period::years(1900, 1909));
        assert_eq!(stats[1].births, 1);
    }

    #[test]
    fn test_results_are_ordered_by_period() {
        let records: Vec<PersonRecord> = [1985, 1901, 1950, 1903, 1999]
            .into_iter()
            .zip(1..)
            .map(|(year, id)| PersonRecord::new(id).with_birth_date(date(year, 1, 1)))
            .collect();

        let stats = aggregate(&records, BinningConfig::new(1900, 1999, 25)).unwrap();
        let periods: Vec<Period> = stats.iter().map(|s| s.period).collect();
        assert_eq!(
            periods,
            vec![
                Period::Unbounded,
                Period::years(1900, 1924),
                Period::years(1950, 1974),
                Period::years(1975, 1999),
            ]
        );
    }

    #[test]
    fn test_single_wide_bucket_matches_unbinned_totals() {
        let records: Vec<PersonRecord> = (0..40u32)
            .map(|i| {
                let year = 1850 + i32::try_from(i).unwrap();
                PersonRecord::new(i)
                    .with_birth_date(date(year, 1 + i % 12, 1 + i % 28))
                    .with_death_date(date(year + 50 + i32::try_from(i % 30).unwrap(), 6, 1))
                    .with_sex(if i % 2 == 0 { Sex::Male } else { Sex::Female })
                    .with_parents(1000 + i % 5, 2000 + i % 5)
                    .with_relation(
                        RelationType::Marriage,
                        500 + i / 2,
                        i ^ 1,
                        Some(date(year + 22 + i32::try_from(i % 7).unwrap(), 5, 5)),
                    )
            })
            .collect();

        let wide = aggregate(&records, BinningConfig::new(1, 3000, 0)).unwrap();
        let unbinned = aggregate_unbinned(&records).unwrap();

        assert_eq!(wide.len(), 1);
        assert_eq!(wide[0].period, Period::years(1, 3000));
        assert_eq!(totals(&wide[0]), totals(&unbinned));
    }

    #[test]
    fn test_interval_mode_covers_full_year_range() {
        let records = vec![PersonRecord::new(1).with_birth_date(date(1234, 1, 1))];
        let stats = aggregate_by_interval(&records, 100).unwrap();
        let periods: Vec<Period> = stats.iter().map(|s| s.period).collect();
        assert_eq!(periods, vec![Period::Unbounded, Period::years(1201, 1300)]);
    }

    #[test]
    fn test_finalize_is_repeatable() {
        let router = accumulate(&married_couple(), BinningConfig::new(1900, 1999, 10));
        assert_eq!(router.finalize(), router.finalize());
    }

    #[test]
    fn test_aggregate_raw_rows() {
        let row = |pairs: &[(&str, &str)]| -> RawRow {
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect()
        };
        let rows = vec![
            row(&[
                ("Intern_nummer", "1"),
                ("Geslacht", "M"),
                ("Geboorte", "01-01-1900"),
                ("datum", "1925-06-15"),
                ("huw.type", "Huwelijk"),
                ("RelatieID", "1"),
                ("PartnerID", "2"),
            ]),
            row(&[
                ("Intern_nummer", "2"),
                ("Geslacht", "V"),
                ("Geboorte", "N-01-01-1905"),
                ("datum", "1925-06-15"),
                ("huw.type", " Huwelijk "),
                ("RelatieID", "1"),
                ("PartnerID", "1"),
                ("Overlijden", "not a date"),
            ]),
        ];

        let stats = aggregate_rows(&rows, &ColumnConfig::default(), BinningConfig::disabled())
            .unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].age_at_marriage_both, Some(23));
        assert_eq!(stats[0].age_at_marriage_female, Some(20));
        assert_eq!(stats[0].children_per_marriage, Some(0));
        assert_eq!(stats[0].deaths, 0);
    }
}
