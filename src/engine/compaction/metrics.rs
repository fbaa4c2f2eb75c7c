use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::operation::{BaseFile, LogFile};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Fixed vocabulary of metrics attached to a compaction operation.
///
/// The string keys are read by monitoring and cost tooling off returned plans,
/// so they must stay stable across strategies and releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Number of log files in the file group.
    TotalLogFiles,
    /// Sum of log file sizes, in MB.
    TotalLogFileSize,
    /// Estimated read + write cost, in MB.
    TotalIoMb,
    /// Base file plus all log files, in MB.
    TotalIoReadMb,
    /// Size of the rewritten base file, in MB.
    TotalIoWriteMb,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::TotalLogFiles,
        Metric::TotalLogFileSize,
        Metric::TotalIoMb,
        Metric::TotalIoReadMb,
        Metric::TotalIoWriteMb,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::TotalLogFiles => "TOTAL_LOG_FILES",
            Metric::TotalLogFileSize => "TOTAL_LOG_FILE_SIZE",
            Metric::TotalIoMb => "TOTAL_IO_MB",
            Metric::TotalIoReadMb => "TOTAL_IO_READ_MB",
            Metric::TotalIoWriteMb => "TOTAL_IO_WRITE_MB",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Truncating bytes -> MB conversion used for every budget comparison.
pub fn bytes_to_mb(bytes: u64) -> u64 {
    bytes / BYTES_PER_MB
}

/// Numeric metrics keyed by their stable string name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics(BTreeMap<String, f64>);

impl Metrics {
    /// Computes the full metric vocabulary for one file group.
    ///
    /// Reading costs the base file plus every log, writing costs roughly one
    /// base file, so `TOTAL_IO_MB` works out to `2 * base + sum(logs)`.
    /// A missing base file and logs of unknown size count as zero bytes.
    pub fn capture(base_file: Option<&BaseFile>, log_files: &[LogFile]) -> Self {
        let base_bytes = base_file.map(|f| f.file_size_bytes).unwrap_or(0);
        let log_bytes: u64 = log_files.iter().filter_map(|f| f.file_size_bytes).sum();

        let read_mb = bytes_to_mb(base_bytes + log_bytes);
        let write_mb = bytes_to_mb(base_bytes);

        let mut metrics = Self::default();
        metrics.insert(Metric::TotalIoReadMb, read_mb as f64);
        metrics.insert(Metric::TotalIoWriteMb, write_mb as f64);
        metrics.insert(Metric::TotalIoMb, (read_mb + write_mb) as f64);
        metrics.insert(Metric::TotalLogFileSize, bytes_to_mb(log_bytes) as f64);
        metrics.insert(Metric::TotalLogFiles, log_files.len() as f64);
        metrics
    }

    fn insert(&mut self, metric: Metric, value: f64) {
        self.0.insert(metric.key().to_string(), value);
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.get(metric.key()).copied()
    }

    /// Value of `metric`, or 0 when the operation was built without it.
    pub fn value_or_zero(&self, metric: Metric) -> f64 {
        self.get(metric).unwrap_or(0.0)
    }

    pub fn get_by_key(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(Metric, f64)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        let mut metrics = Self::default();
        for (metric, value) in iter {
            metrics.insert(metric, value);
        }
        metrics
    }
}
