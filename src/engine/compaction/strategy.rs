use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::bounded_io::{
    BoundedIoCompactionStrategy, LogFileNumBasedCompactionStrategy,
    LogFileSizeBasedCompactionStrategy,
};
use super::config::CompactionConfig;
use super::day_window::{
    BoundedPartitionAwareCompactionStrategy, DayBasedCompactionStrategy,
    UnBoundedPartitionAwareCompactionStrategy,
};
use super::metrics::Metrics;
use super::operation::{BaseFile, CompactionOperation, CompactionPlan, LogFile};
use crate::engine::errors::CompactionError;
use crate::shared::datetime::partition_date::parse_partition_date;

/// Pluggable policy deciding which file groups get compacted, and in what order.
///
/// Implementations are pure: no I/O, no shared state, inputs are never
/// mutated. One `order_and_filter` call produces one plan.
pub trait CompactionStrategy {
    fn kind(&self) -> StrategyKind;

    /// Computes the fixed metric vocabulary for one candidate file group.
    fn capture_metrics(
        &self,
        _config: &CompactionConfig,
        base_file: Option<&BaseFile>,
        _partition_path: &str,
        log_files: &[LogFile],
    ) -> Metrics {
        Metrics::capture(base_file, log_files)
    }

    /// Selects and orders a subset of `operations`.
    ///
    /// `pending` holds operations owned by compactions that are still running.
    fn order_and_filter(
        &self,
        config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        pending: &[CompactionOperation],
    ) -> Result<Vec<CompactionOperation>, CompactionError>;

    /// Order over partition paths used to rank candidates.
    fn comparator(&self) -> PartitionComparator {
        PartitionComparator::Lexicographic
    }

    /// Prunes the partitions discovery has to scan for candidates.
    fn filter_partition_paths(
        &self,
        _config: &CompactionConfig,
        partition_paths: Vec<String>,
    ) -> Result<Vec<String>, CompactionError> {
        Ok(partition_paths)
    }

    fn generate_compaction_plan(
        &self,
        config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        pending: &[CompactionOperation],
    ) -> Result<CompactionPlan, CompactionError> {
        let operations = self.order_and_filter(config, operations, pending)?;
        Ok(CompactionPlan::new(self.kind(), operations))
    }
}

/// Total order over partition path strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionComparator {
    /// Plain ascending string comparison.
    Lexicographic,
    /// Most recent day first; equal days fall back to string order.
    DateDescending,
}

impl PartitionComparator {
    /// Fails when a day-aware comparator meets a path that is not a date.
    pub fn compare(&self, left: &str, right: &str) -> Result<Ordering, CompactionError> {
        match self {
            PartitionComparator::Lexicographic => Ok(left.cmp(right)),
            PartitionComparator::DateDescending => {
                let left_date = parse_partition_date(left)?;
                let right_date = parse_partition_date(right)?;
                Ok(right_date
                    .cmp(&left_date)
                    .then_with(|| left.cmp(right)))
            }
        }
    }
}

/// Baseline policy: every candidate, in the order given.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnBoundedCompactionStrategy;

impl CompactionStrategy for UnBoundedCompactionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::UnBounded
    }

    fn order_and_filter(
        &self,
        _config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        _pending: &[CompactionOperation],
    ) -> Result<Vec<CompactionOperation>, CompactionError> {
        Ok(operations)
    }
}

/// Strategies selectable through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    #[serde(rename = "unbounded")]
    UnBounded,
    #[serde(rename = "bounded_io")]
    BoundedIo,
    #[default]
    #[serde(rename = "log_file_size_based")]
    LogFileSizeBased,
    #[serde(rename = "log_file_num_based")]
    LogFileNumBased,
    #[serde(rename = "day_based")]
    DayBased,
    #[serde(rename = "bounded_partition_aware")]
    BoundedPartitionAware,
    #[serde(rename = "unbounded_partition_aware")]
    UnBoundedPartitionAware,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 7] = [
        StrategyKind::UnBounded,
        StrategyKind::BoundedIo,
        StrategyKind::LogFileSizeBased,
        StrategyKind::LogFileNumBased,
        StrategyKind::DayBased,
        StrategyKind::BoundedPartitionAware,
        StrategyKind::UnBoundedPartitionAware,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::UnBounded => "unbounded",
            StrategyKind::BoundedIo => "bounded_io",
            StrategyKind::LogFileSizeBased => "log_file_size_based",
            StrategyKind::LogFileNumBased => "log_file_num_based",
            StrategyKind::DayBased => "day_based",
            StrategyKind::BoundedPartitionAware => "bounded_partition_aware",
            StrategyKind::UnBoundedPartitionAware => "unbounded_partition_aware",
        }
    }

    /// The policy implementing this variant.
    pub fn strategy(&self) -> &'static dyn CompactionStrategy {
        match self {
            StrategyKind::UnBounded => &UnBoundedCompactionStrategy,
            StrategyKind::BoundedIo => &BoundedIoCompactionStrategy,
            StrategyKind::LogFileSizeBased => &LogFileSizeBasedCompactionStrategy,
            StrategyKind::LogFileNumBased => &LogFileNumBasedCompactionStrategy,
            StrategyKind::DayBased => &DayBasedCompactionStrategy,
            StrategyKind::BoundedPartitionAware => &BoundedPartitionAwareCompactionStrategy,
            StrategyKind::UnBoundedPartitionAware => &UnBoundedPartitionAwareCompactionStrategy,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = CompactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| CompactionError::UnknownStrategy(s.to_string()))
    }
}

impl CompactionStrategy for StrategyKind {
    fn kind(&self) -> StrategyKind {
        *self
    }

    fn capture_metrics(
        &self,
        config: &CompactionConfig,
        base_file: Option<&BaseFile>,
        partition_path: &str,
        log_files: &[LogFile],
    ) -> Metrics {
        self.strategy()
            .capture_metrics(config, base_file, partition_path, log_files)
    }

    fn order_and_filter(
        &self,
        config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        pending: &[CompactionOperation],
    ) -> Result<Vec<CompactionOperation>, CompactionError> {
        self.strategy().order_and_filter(config, operations, pending)
    }

    fn comparator(&self) -> PartitionComparator {
        self.strategy().comparator()
    }

    fn filter_partition_paths(
        &self,
        config: &CompactionConfig,
        partition_paths: Vec<String>,
    ) -> Result<Vec<String>, CompactionError> {
        self.strategy().filter_partition_paths(config, partition_paths)
    }
}
