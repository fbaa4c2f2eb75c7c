use super::partition_date::{
    date_at_offset, date_at_offset_from_today, format_partition_date, parse_partition_date,
    partition_path_at_offset_from_today, strip_partition_keys, today,
};
use crate::engine::errors::CompactionError;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn offsets_cross_month_and_year_boundaries() {
    assert_eq!(date_at_offset(date(2017, 1, 1), -1).unwrap(), date(2016, 12, 31));
    assert_eq!(date_at_offset(date(2016, 2, 28), 1).unwrap(), date(2016, 2, 29));
    assert_eq!(date_at_offset(date(2017, 1, 3), 0).unwrap(), date(2017, 1, 3));
    assert_eq!(date_at_offset(date(2017, 1, 3), 30).unwrap(), date(2017, 2, 2));
}

#[test]
fn offset_out_of_calendar_range_is_an_error() {
    let err = date_at_offset(NaiveDate::MAX, 1).unwrap_err();
    assert!(matches!(err, CompactionError::DateOutOfRange(1)));
}

#[test]
fn offset_from_today_is_relative_to_local_date() {
    let now = today();
    assert_eq!(date_at_offset_from_today(0).unwrap(), now);
    assert!(date_at_offset_from_today(-3).unwrap() < now);
    assert!(date_at_offset_from_today(5).unwrap() > now);
}

#[test]
fn partition_paths_round_trip_through_the_day_format() {
    assert_eq!(format_partition_date(date(2017, 1, 3)), "2017/01/03");

    let path = partition_path_at_offset_from_today(-2).unwrap();
    assert_eq!(
        parse_partition_date(&path).unwrap(),
        date_at_offset_from_today(-2).unwrap()
    );
}

#[test]
fn hive_style_partition_keys_are_stripped() {
    assert_eq!(strip_partition_keys("2017/01/03"), "2017/01/03");
    assert_eq!(
        strip_partition_keys("year=2017/month=01/day=03"),
        "2017/01/03"
    );
    assert_eq!(
        parse_partition_date("year=2017/month=01/day=03").unwrap(),
        date(2017, 1, 3)
    );
}

#[test]
fn non_date_partition_is_rejected() {
    let err = parse_partition_date("region=eu/bucket-7").unwrap_err();
    match err {
        CompactionError::InvalidPartitionDate { partition, .. } => {
            assert_eq!(partition, "region=eu/bucket-7");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
