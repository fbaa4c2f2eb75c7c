//! Day-partition windowing.
//!
//! Candidates are grouped by partition, partitions are ranked newest day
//! first, and a [`PartitionWindow`] decides which ranked partitions survive.
//! The three day-aware strategies differ only in the window they build.

use chrono::{Days, NaiveDate};
use indexmap::IndexMap;
use tracing::debug;

use super::config::CompactionConfig;
use super::operation::CompactionOperation;
use super::strategy::{CompactionStrategy, PartitionComparator, StrategyKind};
use crate::engine::errors::CompactionError;
use crate::shared::datetime::partition_date::{parse_partition_date, today};

/// Which ranked day partitions are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionWindow {
    /// The `n` most recent partitions; `None` keeps all.
    Latest(Option<usize>),
    /// Partitions dated on or after the given day; `None` keeps all.
    OnOrAfter(Option<NaiveDate>),
    /// Partitions dated strictly before the given day; `None` keeps none.
    Before(Option<NaiveDate>),
}

impl PartitionWindow {
    fn admits(&self, rank: usize, date: NaiveDate) -> bool {
        match *self {
            PartitionWindow::Latest(None) => true,
            PartitionWindow::Latest(Some(n)) => rank < n,
            PartitionWindow::OnOrAfter(None) => true,
            PartitionWindow::OnOrAfter(Some(earliest)) => date >= earliest,
            PartitionWindow::Before(None) => false,
            PartitionWindow::Before(Some(earliest)) => date < earliest,
        }
    }
}

/// Oldest day still inside the look-back window: today minus the configured
/// number of partitions. A window reaching past the calendar start saturates.
pub fn earliest_partition_date(
    config: &CompactionConfig,
    today: NaiveDate,
) -> Option<NaiveDate> {
    config
        .target_partitions_per_day_based_compaction()
        .map(|days| {
            today
                .checked_sub_days(Days::new(days as u64))
                .unwrap_or(NaiveDate::MIN)
        })
}

/// Ranks partition groups newest day first (ties by path) and keeps the ones
/// admitted by `window`. Items inside a group keep their order.
pub fn select_partitions<T>(
    groups: IndexMap<String, Vec<T>>,
    window: PartitionWindow,
) -> Result<Vec<(String, Vec<T>)>, CompactionError> {
    let mut ranked = groups
        .into_iter()
        .map(|(path, items)| -> Result<_, CompactionError> {
            Ok((parse_partition_date(&path)?, path, items))
        })
        .collect::<Result<Vec<_>, _>>()?;
    ranked.sort_by(|(left_date, left_path, _), (right_date, right_path, _)| {
        right_date
            .cmp(left_date)
            .then_with(|| left_path.cmp(right_path))
    });

    let total = ranked.len();
    let selected: Vec<_> = ranked
        .into_iter()
        .enumerate()
        .filter(|(rank, (date, _, _))| window.admits(*rank, *date))
        .map(|(_, (_, path, items))| (path, items))
        .collect();

    debug!(
        target: "mor_compaction::day_window",
        ?window,
        partitions = total,
        selected = selected.len(),
        "Applied day partition window"
    );
    Ok(selected)
}

/// Keeps the operations of every partition admitted by `window`, partitions
/// in rank order.
pub fn window_operations(
    operations: Vec<CompactionOperation>,
    window: PartitionWindow,
) -> Result<Vec<CompactionOperation>, CompactionError> {
    let mut groups: IndexMap<String, Vec<CompactionOperation>> = IndexMap::new();
    for op in operations {
        groups
            .entry(op.partition_path().to_string())
            .or_default()
            .push(op);
    }

    Ok(select_partitions(groups, window)?
        .into_iter()
        .flat_map(|(_, ops)| ops)
        .collect())
}

/// Ranked, de-duplicated partition paths admitted by `window`.
pub fn window_partition_paths(
    partition_paths: Vec<String>,
    window: PartitionWindow,
) -> Result<Vec<String>, CompactionError> {
    let groups: IndexMap<String, Vec<()>> = partition_paths
        .into_iter()
        .map(|path| (path, Vec::new()))
        .collect();

    Ok(select_partitions(groups, window)?
        .into_iter()
        .map(|(path, _)| path)
        .collect())
}

/// Newest `target_partitions_per_day_based_compaction` day partitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayBasedCompactionStrategy;

impl DayBasedCompactionStrategy {
    fn window(config: &CompactionConfig) -> PartitionWindow {
        PartitionWindow::Latest(config.target_partitions_per_day_based_compaction())
    }
}

impl CompactionStrategy for DayBasedCompactionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DayBased
    }

    fn order_and_filter(
        &self,
        config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        _pending: &[CompactionOperation],
    ) -> Result<Vec<CompactionOperation>, CompactionError> {
        window_operations(operations, Self::window(config))
    }

    fn comparator(&self) -> PartitionComparator {
        PartitionComparator::DateDescending
    }

    fn filter_partition_paths(
        &self,
        config: &CompactionConfig,
        partition_paths: Vec<String>,
    ) -> Result<Vec<String>, CompactionError> {
        window_partition_paths(partition_paths, Self::window(config))
    }
}

/// Partitions from `today - target_partitions_per_day_based_compaction`
/// onwards, future days included. Older partitions are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedPartitionAwareCompactionStrategy;

impl BoundedPartitionAwareCompactionStrategy {
    fn window(config: &CompactionConfig) -> PartitionWindow {
        PartitionWindow::OnOrAfter(earliest_partition_date(config, today()))
    }
}

impl CompactionStrategy for BoundedPartitionAwareCompactionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BoundedPartitionAware
    }

    fn order_and_filter(
        &self,
        config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        _pending: &[CompactionOperation],
    ) -> Result<Vec<CompactionOperation>, CompactionError> {
        window_operations(operations, Self::window(config))
    }

    fn comparator(&self) -> PartitionComparator {
        PartitionComparator::DateDescending
    }

    fn filter_partition_paths(
        &self,
        config: &CompactionConfig,
        partition_paths: Vec<String>,
    ) -> Result<Vec<String>, CompactionError> {
        window_partition_paths(partition_paths, Self::window(config))
    }
}

/// Complement of [`BoundedPartitionAwareCompactionStrategy`]: only partitions
/// older than the recent window, which are unlikely to still receive writes.
/// No cap on how many older partitions are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnBoundedPartitionAwareCompactionStrategy;

impl UnBoundedPartitionAwareCompactionStrategy {
    fn window(config: &CompactionConfig) -> PartitionWindow {
        PartitionWindow::Before(earliest_partition_date(config, today()))
    }
}

impl CompactionStrategy for UnBoundedPartitionAwareCompactionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::UnBoundedPartitionAware
    }

    fn order_and_filter(
        &self,
        config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        _pending: &[CompactionOperation],
    ) -> Result<Vec<CompactionOperation>, CompactionError> {
        window_operations(operations, Self::window(config))
    }

    fn comparator(&self) -> PartitionComparator {
        PartitionComparator::DateDescending
    }

    fn filter_partition_paths(
        &self,
        config: &CompactionConfig,
        partition_paths: Vec<String>,
    ) -> Result<Vec<String>, CompactionError> {
        window_partition_paths(partition_paths, Self::window(config))
    }
}
