//! Output decoder tests

use chrono::NaiveDate;
use retro_query::decode::{ColumnKind, DecodeError, FieldValue, OutputDecoder, decode};
use retro_query::query::{ColumnSelection, Tool, compile_columns};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> FieldValue {
    FieldValue::DateTime(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap(),
    )
}

mod bgame_tests {
    use super::*;

    #[test]
    fn test_date_and_linked_time_merge() {
        let compiled = compile_columns(&ColumnSelection::new([0, 1, 4]), Tool::Bgame).unwrap();
        let rows = decode("\"ATL201904150\",\"190415\",\"705\"\n", &compiled).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], FieldValue::Text("ATL201904150".to_string()));
        assert_eq!(
            rows[0][1],
            FieldValue::Date(NaiveDate::from_ymd_opt(2019, 4, 15).unwrap())
        );
        assert_eq!(rows[0][2], at(2019, 4, 15, 19, 5));
    }

    #[test]
    fn test_time_with_injected_date() {
        let compiled = compile_columns(&ColumnSelection::new([4]), Tool::Bgame).unwrap();
        assert_eq!(compiled.columns, vec![1, 4]);
        let rows = decode("190415,1310\n190416,0\n", &compiled).unwrap();
        assert_eq!(rows[0][1], at(2019, 4, 15, 13, 10));
        assert_eq!(rows[1][1], at(2019, 4, 16, 1, 0));
    }

    #[test]
    fn test_linked_time_across_intervening_columns() {
        let compiled = compile_columns(&ColumnSelection::new([1, 2, 3, 4]), Tool::Bgame).unwrap();
        let rows = decode("190415,1,\"D\",200\n", &compiled).unwrap();
        assert_eq!(rows[0][1], FieldValue::Integer(1));
        assert_eq!(rows[0][2], FieldValue::Text("D".to_string()));
        assert_eq!(rows[0][3], at(2019, 4, 15, 14, 0));
    }

    #[test]
    fn test_decoding_twice_gives_identical_rows() {
        let compiled = compile_columns(&ColumnSelection::new([0, 4, 22]), Tool::Bgame).unwrap();
        let decoder = OutputDecoder::for_columns(&compiled);
        let raw = "\"ATL201904150\",\"190415\",\"705\",\"2019/04/15 21:47:03\"\n\
                   \"ATL201904160\",\"190416\",\"1310\",(none)\n";

        let first = decoder.decode(raw).unwrap();
        let second = decoder.decode(raw).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(first[1][2], at(2019, 4, 16, 13, 10));
    }

    #[test]
    fn test_timestamp_column() {
        let compiled = compile_columns(&ColumnSelection::new([22]), Tool::Bgame).unwrap();
        let rows = decode("\"2019/04/15 21:47:03\"\n", &compiled).unwrap();
        assert_eq!(
            rows[0][0],
            FieldValue::DateTime(
                NaiveDate::from_ymd_opt(2019, 4, 15)
                    .unwrap()
                    .and_hms_opt(21, 47, 3)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_malformed_time_reports_line() {
        let compiled = compile_columns(&ColumnSelection::new([1, 4]), Tool::Bgame).unwrap();
        let err = decode("190415,705\n190416,12345\n", &compiled).unwrap_err();
        match err {
            DecodeError::MalformedTime { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "12345");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_date_makes_time_malformed() {
        let compiled = compile_columns(&ColumnSelection::new([1, 4]), Tool::Bgame).unwrap();
        assert!(matches!(
            decode("(none),705\n", &compiled),
            Err(DecodeError::MalformedTime { .. })
        ));
    }
}

mod bevent_tests {
    use super::*;

    #[test]
    fn test_best_effort_numbers() {
        let compiled = compile_columns(&ColumnSelection::new([0, 2, 3, 4]), Tool::Bevent).unwrap();
        let rows = decode("\"ATL201904150\",1,(none),0.5\n", &compiled).unwrap();
        assert_eq!(rows[0][0], FieldValue::Text("ATL201904150".to_string()));
        assert_eq!(rows[0][1], FieldValue::Integer(1));
        assert_eq!(rows[0][2], FieldValue::Missing);
        assert_eq!(rows[0][3], FieldValue::Float(0.5));
    }

    #[test]
    fn test_bevent_never_merges_times() {
        let decoder = OutputDecoder::for_columns(
            &compile_columns(&ColumnSelection::new([1, 4]), Tool::Bevent).unwrap(),
        );
        assert_eq!(decoder.kinds(), &[ColumnKind::Integer, ColumnKind::Integer]);
    }
}

mod framing_tests {
    use super::*;

    #[test]
    fn test_empty_output() {
        let compiled = compile_columns(&ColumnSelection::new([0]), Tool::Bevent).unwrap();
        assert_eq!(decode("", &compiled), Err(DecodeError::EmptyResult));
        assert_eq!(decode("\n\n", &compiled), Err(DecodeError::EmptyResult));
    }

    #[test]
    fn test_truncated_output() {
        let compiled = compile_columns(&ColumnSelection::new([0, 1]), Tool::Bevent).unwrap();
        assert!(matches!(
            decode("1,2\n3,", &compiled),
            Err(DecodeError::TruncatedOutput { .. })
        ));
    }

    #[test]
    fn test_field_count_mismatch() {
        let compiled = compile_columns(&ColumnSelection::new([0, 1, 2]), Tool::Bevent).unwrap();
        assert_eq!(
            decode("1,2,3\n4,5\n", &compiled),
            Err(DecodeError::FieldCountMismatch {
                line: 2,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let compiled = compile_columns(&ColumnSelection::new([0]), Tool::Bevent).unwrap();
        let rows = decode("1\n\n2\n", &compiled).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
