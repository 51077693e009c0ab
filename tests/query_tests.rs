//! Query compiler tests

use retro_query::query::{
    ColumnSelection, DateQuery, DateResolver, DayMonth, FranchiseResolver, GameId, QueryCompiler,
    QueryError, QueryRequest, Tool, YearBounds, compile_columns, compress_range,
};
use retro_query::tables::{FranchiseTable, Tables};

fn franchises() -> FranchiseTable {
    FranchiseTable::from_json(
        r#"{
            "ATL": [[1966, 2023, "NL", "Atlanta Braves", ".EVN"]],
            "SEA": [[1977, 2023, "AL", "Seattle Mariners", ".EVA"]],
            "MIL": [[1970, 1997, "AL", "Milwaukee Brewers", ".EVA"],
                    [1998, 2023, "NL", "Milwaukee Brewers", ".EVN"]],
            "WS2": [[2005, 2023, "NL", "Washington Nationals", ".EVN"]]
        }"#,
    )
    .unwrap()
}

fn bounds() -> YearBounds {
    YearBounds::new(1918, 2023)
}

mod column_tests {
    use super::*;

    #[test]
    fn test_negative_indices_are_absolute() {
        let compiled = compile_columns(&ColumnSelection::new([-3, 1, 2]), Tool::Bevent).unwrap();
        assert_eq!(compiled.columns, vec![1, 2, 3]);
        assert_eq!(compiled.range, "1-3");
    }

    #[test]
    fn test_all_columns_use_shorthand() {
        let bevent = compile_columns(&ColumnSelection::all(Tool::Bevent), Tool::Bevent).unwrap();
        assert_eq!(bevent.range, "0-96");
        let bgame = compile_columns(&ColumnSelection::all(Tool::Bgame), Tool::Bgame).unwrap();
        assert_eq!(bgame.range, "0-84");
        assert_eq!(bgame.columns.len(), 85);
    }

    #[test]
    fn test_out_of_range_lists_offenders() {
        let err = compile_columns(&ColumnSelection::new([0, 85, 90]), Tool::Bgame).unwrap_err();
        match err {
            QueryError::InvalidColumnSet { tool, reason } => {
                assert_eq!(tool, Tool::Bgame);
                assert!(reason.contains("84"));
                assert!(reason.contains("85"));
                assert!(reason.contains("90"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bevent_accepts_column_96() {
        assert!(compile_columns(&ColumnSelection::new([96]), Tool::Bevent).is_ok());
        assert!(compile_columns(&ColumnSelection::new([97]), Tool::Bevent).is_err());
    }

    #[test]
    fn test_time_without_date_injects_date() {
        let compiled = compile_columns(&ColumnSelection::new([4, 10]), Tool::Bgame).unwrap();
        assert_eq!(compiled.columns, vec![1, 4, 10]);
        assert_eq!(compiled.range, "1,4,10");
        let link = compiled.link.unwrap();
        assert_eq!(link.offset, 1);
        assert_eq!(link.date_position(1), Some(0));
    }

    #[test]
    fn test_link_offset_counts_positions_between() {
        let compiled = compile_columns(&ColumnSelection::new([0, 1, 2, 3, 4]), Tool::Bgame).unwrap();
        let link = compiled.link.unwrap();
        assert_eq!(link.offset, 3);
        assert_eq!(link.date_position(4), Some(1));
    }

    #[test]
    fn test_date_alone_has_no_link() {
        let compiled = compile_columns(&ColumnSelection::new([1, 2]), Tool::Bgame).unwrap();
        assert!(compiled.link.is_none());
    }

    #[test]
    fn test_range_round_trips_through_parse() {
        let selection = ColumnSelection::new([0, 1, 2, 5, 7, 8, 9, 40]);
        let compiled = compile_columns(&selection, Tool::Bevent).unwrap();
        let reparsed = ColumnSelection::parse(Tool::Bevent, &compiled.range).unwrap();
        assert_eq!(reparsed, selection);
        assert_eq!(compress_range(&compiled.columns), compiled.range);
    }

    #[test]
    fn test_box_rejects_columns() {
        assert!(matches!(
            compile_columns(&ColumnSelection::new([0]), Tool::Box),
            Err(QueryError::InvalidColumnSet { .. })
        ));
    }
}

mod date_tests {
    use super::*;

    #[test]
    fn test_start_and_end_arguments() {
        let franchises = franchises();
        let resolver = DateResolver::new(bounds(), &franchises);
        let query = DateQuery::default()
            .start(DayMonth::new(4, 1).unwrap())
            .end(DayMonth::new(4, 30).unwrap());
        assert_eq!(
            resolver.resolve(2019, &query).unwrap(),
            vec!["-y", "2019", "-s", "0401", "-e", "0430"]
        );
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let franchises = franchises();
        let resolver = DateResolver::new(bounds(), &franchises);
        let query = DateQuery::default()
            .start(DayMonth::new(5, 1).unwrap())
            .end(DayMonth::new(4, 1).unwrap());
        assert!(matches!(
            resolver.resolve(2019, &query),
            Err(QueryError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_game_id_overrides_dates() {
        let franchises = franchises();
        let resolver = DateResolver::new(bounds(), &franchises);
        let query = DateQuery::default()
            .start(DayMonth::new(4, 1).unwrap())
            .game_id("atl201904150");
        assert!(query.has_conflict());
        assert_eq!(
            resolver.resolve(2019, &query).unwrap(),
            vec!["-y", "2019", "-i", "ATL201904150"]
        );
    }

    #[test]
    fn test_year_outside_bounds() {
        let franchises = franchises();
        let resolver = DateResolver::new(bounds(), &franchises);
        assert!(matches!(
            resolver.resolve(1875, &DateQuery::default()),
            Err(QueryError::InvalidYear { .. })
        ));
        assert!(matches!(
            resolver.resolve(2024, &DateQuery::default()),
            Err(QueryError::InvalidYear { .. })
        ));
        assert!(resolver.resolve(1876, &DateQuery::default()).is_ok());
    }

    #[test]
    fn test_game_id_validation() {
        assert!(GameId::parse("ATL201904150").is_ok());
        assert!(GameId::parse("WS2201904150").is_ok());
        assert!(GameId::parse("ATL20190415").is_err());
        assert!(GameId::parse("ATL201902300").is_err());
        assert!(GameId::parse("ATL201904153").is_err());
        assert!(GameId::parse("AT-201904150").is_err());
    }

    #[test]
    fn test_game_id_unknown_team() {
        let franchises = franchises();
        let resolver = DateResolver::new(bounds(), &franchises);
        let query = DateQuery::default().game_id("XYZ201904150");
        assert!(matches!(
            resolver.resolve(2019, &query),
            Err(QueryError::InvalidGameIdentifier { .. })
        ));
    }

    #[test]
    fn test_day_month_shapes() {
        let expected = DayMonth::new(4, 15).unwrap();
        for text in ["0415", "415", "4-15", "4/15", "2019-04-15"] {
            assert_eq!(text.parse::<DayMonth>().unwrap(), expected, "{text}");
        }
        assert!("0231".parse::<DayMonth>().is_err());
        assert!("1301".parse::<DayMonth>().is_err());
    }
}

mod franchise_tests {
    use super::*;

    #[test]
    fn test_relocated_team_extension_by_year() {
        let table = franchises();
        let resolver = FranchiseResolver::new(&table);
        assert_eq!(resolver.resolve("MIL", 1997).unwrap(), ".EVA");
        assert_eq!(resolver.resolve("MIL", 1998).unwrap(), ".EVN");
    }

    #[test]
    fn test_inactive_year_reports_active_range() {
        let table = franchises();
        let resolver = FranchiseResolver::new(&table);
        match resolver.resolve("SEA", 1970).unwrap_err() {
            QueryError::TeamInactiveForYear { team, year, active } => {
                assert_eq!(team, "SEA");
                assert_eq!(year, 1970);
                assert!(active.contains("1977"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_team() {
        let table = franchises();
        let resolver = FranchiseResolver::new(&table);
        assert!(matches!(
            resolver.resolve("XYZ", 2019),
            Err(QueryError::UnknownTeam { .. })
        ));
    }
}

mod compiler_tests {
    use super::*;

    #[test]
    fn test_one_query_per_season() {
        let tables = Tables::with_franchises(franchises());
        let compiler = QueryCompiler::new(&tables, bounds());
        let request = QueryRequest::bevent("ATL", 2019)
            .seasons(2019, 2021)
            .columns(ColumnSelection::new([0, 1, 2, 5]));
        let plan = compiler.compile(&request).unwrap();

        let lines: Vec<String> = plan.queries.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "bevent -y 2019 -f 0-2,5 2019ATL.EVN",
                "bevent -y 2020 -f 0-2,5 2020ATL.EVN",
                "bevent -y 2021 -f 0-2,5 2021ATL.EVN",
            ]
        );
    }

    #[test]
    fn test_inactive_seasons_are_skipped() {
        let tables = Tables::with_franchises(franchises());
        let compiler = QueryCompiler::new(&tables, bounds());
        let request = QueryRequest::bgame("WS2", 2003)
            .seasons(2003, 2006)
            .columns(ColumnSelection::new([0]));
        let plan = compiler.compile(&request).unwrap();
        let seasons: Vec<i32> = plan.queries.iter().map(|q| q.season).collect();
        assert_eq!(seasons, vec![2005, 2006]);
    }

    #[test]
    fn test_all_seasons_inactive() {
        let tables = Tables::with_franchises(franchises());
        let compiler = QueryCompiler::new(&tables, bounds());
        let request = QueryRequest::bgame("WS2", 2001)
            .seasons(2001, 2003)
            .columns(ColumnSelection::new([0]));
        assert!(matches!(
            compiler.compile(&request),
            Err(QueryError::NoActiveSeasons { .. })
        ));
    }

    #[test]
    fn test_unknown_team_fails_before_season_loop() {
        let tables = Tables::with_franchises(franchises());
        let compiler = QueryCompiler::new(&tables, bounds());
        let request = QueryRequest::bevent("XYZ", 2019).columns(ColumnSelection::new([0]));
        assert!(matches!(
            compiler.compile(&request),
            Err(QueryError::UnknownTeam { .. })
        ));
    }

    #[test]
    fn test_reversed_season_range() {
        let tables = Tables::with_franchises(franchises());
        let compiler = QueryCompiler::new(&tables, bounds());
        let request = QueryRequest::bevent("ATL", 2021).seasons(2021, 2019);
        assert!(matches!(
            compiler.compile(&request),
            Err(QueryError::InvalidSeasonRange { .. })
        ));
    }

    #[test]
    fn test_game_id_with_box() {
        let tables = Tables::with_franchises(franchises());
        let compiler = QueryCompiler::new(&tables, bounds());
        let request = QueryRequest::box_score("ATL", 2019).game_id("ATL201904150");
        let plan = compiler.compile(&request).unwrap();
        assert_eq!(
            plan.queries[0].arguments,
            vec!["box", "-y", "2019", "-i", "ATL201904150", "2019ATL.EVN"]
        );
        assert_eq!(plan.queries[0].args()[0], "-y");
    }
}
