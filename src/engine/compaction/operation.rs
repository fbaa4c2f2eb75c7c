use serde::{Deserialize, Serialize};

use super::metrics::{Metric, Metrics};
use super::strategy::StrategyKind;

/// Columnar data file produced by a prior write or compaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFile {
    pub path: String,
    pub file_id: String,
    /// Instant of the commit that produced this file.
    pub commit_time: String,
    pub file_size_bytes: u64,
}

/// Append-only delta file of a file group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFile {
    pub path: String,
    /// `None` while the size is unknown (log still open for append).
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
}

/// Latest view of one file group, as handed over by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSlice {
    pub partition_path: String,
    pub file_id: String,
    pub base_instant_time: String,
    #[serde(default)]
    pub base_file: Option<BaseFile>,
    /// Append order is significant for merging and is preserved as given.
    #[serde(default)]
    pub log_files: Vec<LogFile>,
}

/// Planning-time descriptor of one file group considered for compaction.
///
/// Metrics are captured once on creation and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactionOperation {
    partition_path: String,
    file_id: String,
    base_instant_time: String,
    delta_file_paths: Vec<String>,
    data_file_path: Option<String>,
    metrics: Metrics,
}

impl CompactionOperation {
    pub fn new(
        partition_path: impl Into<String>,
        file_id: impl Into<String>,
        base_instant_time: impl Into<String>,
        delta_file_paths: Vec<String>,
        data_file_path: Option<String>,
        metrics: Metrics,
    ) -> Self {
        Self {
            partition_path: partition_path.into(),
            file_id: file_id.into(),
            base_instant_time: base_instant_time.into(),
            delta_file_paths,
            data_file_path,
            metrics,
        }
    }

    pub fn from_file_slice(slice: &FileSlice, metrics: Metrics) -> Self {
        Self::new(
            slice.partition_path.clone(),
            slice.file_id.clone(),
            slice.base_instant_time.clone(),
            slice.log_files.iter().map(|f| f.path.clone()).collect(),
            slice.base_file.as_ref().map(|f| f.path.clone()),
            metrics,
        )
    }

    pub fn partition_path(&self) -> &str {
        &self.partition_path
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn base_instant_time(&self) -> &str {
        &self.base_instant_time
    }

    pub fn delta_file_paths(&self) -> &[String] {
        &self.delta_file_paths
    }

    pub fn data_file_path(&self) -> Option<&str> {
        self.data_file_path.as_deref()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        self.metrics.value_or_zero(metric)
    }

    /// Two operations target the same file group when partition and file id match.
    pub fn same_file_group(&self, other: &CompactionOperation) -> bool {
        self.file_id == other.file_id && self.partition_path == other.partition_path
    }
}

/// Ordered operations accepted for one compaction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactionPlan {
    pub strategy: StrategyKind,
    /// Execution order: earlier entries are scheduled before later ones.
    pub operations: Vec<CompactionOperation>,
}

impl CompactionPlan {
    pub fn new(strategy: StrategyKind, operations: Vec<CompactionOperation>) -> Self {
        Self {
            strategy,
            operations,
        }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn total_io_mb(&self) -> f64 {
        self.operations
            .iter()
            .map(|op| op.metric(Metric::TotalIoMb))
            .sum()
    }
}
