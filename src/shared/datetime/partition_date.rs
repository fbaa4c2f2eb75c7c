use std::borrow::Cow;

use chrono::{Days, Local, NaiveDate};

use crate::engine::errors::CompactionError;

/// Layout of day partition paths, e.g. `2017/01/03`.
pub const DATE_PARTITION_FORMAT: &str = "%Y/%m/%d";

/// Current calendar date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Shifts `anchor` by a signed number of days (negative = past).
pub fn date_at_offset(anchor: NaiveDate, offset_days: i64) -> Result<NaiveDate, CompactionError> {
    let shifted = if offset_days >= 0 {
        anchor.checked_add_days(Days::new(offset_days as u64))
    } else {
        anchor.checked_sub_days(Days::new(offset_days.unsigned_abs()))
    };
    shifted.ok_or(CompactionError::DateOutOfRange(offset_days))
}

/// Today's date shifted by `offset_days`.
pub fn date_at_offset_from_today(offset_days: i64) -> Result<NaiveDate, CompactionError> {
    date_at_offset(today(), offset_days)
}

pub fn format_partition_date(date: NaiveDate) -> String {
    date.format(DATE_PARTITION_FORMAT).to_string()
}

/// Day partition path for today's date shifted by `offset_days`.
pub fn partition_path_at_offset_from_today(offset_days: i64) -> Result<String, CompactionError> {
    date_at_offset_from_today(offset_days).map(format_partition_date)
}

/// Drops hive-style `key=` prefixes: `year=2017/month=01/day=03` -> `2017/01/03`.
pub fn strip_partition_keys(partition_path: &str) -> Cow<'_, str> {
    if !partition_path.contains('=') {
        return Cow::Borrowed(partition_path);
    }
    let stripped = partition_path
        .split('/')
        .map(|segment| match segment.split_once('=') {
            Some((_, value)) => value,
            None => segment,
        })
        .collect::<Vec<_>>()
        .join("/");
    Cow::Owned(stripped)
}

/// Parses a day partition path into its calendar date.
pub fn parse_partition_date(partition_path: &str) -> Result<NaiveDate, CompactionError> {
    let normalized = strip_partition_keys(partition_path);
    NaiveDate::parse_from_str(&normalized, DATE_PARTITION_FORMAT).map_err(|source| {
        CompactionError::InvalidPartitionDate {
            partition: partition_path.to_string(),
            source,
        }
    })
}
