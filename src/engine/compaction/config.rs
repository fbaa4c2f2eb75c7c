use serde::Deserialize;

use super::strategy::StrategyKind;
use crate::engine::errors::CompactionError;
use crate::shared::config::CONFIG;

/// Raw `[compaction]` settings as they appear in the config file.
///
/// Numeric knobs are signed so a bad value is reported by validation instead
/// of surfacing as an opaque deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompactionSettings {
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Ceiling on cumulative `TOTAL_IO_MB` admitted into one plan (unset = unbounded)
    pub target_io_per_compaction_mb: Option<i64>,
    /// Number of day partitions considered by day-based strategies (unset = unbounded)
    pub target_partitions_per_day_based_compaction: Option<i64>,
    /// Log-size based strategy skips file groups with fewer log MB than this
    #[serde(default)]
    pub log_file_size_threshold_mb: i64,
    /// Log-count based strategy skips file groups with fewer log files than this
    #[serde(default)]
    pub log_file_num_threshold: i64,
}

/// Validated, immutable compaction knobs for one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactionConfig {
    strategy: StrategyKind,
    target_io_per_compaction_mb: Option<u64>,
    target_partitions_per_day_based_compaction: Option<usize>,
    log_file_size_threshold_mb: u64,
    log_file_num_threshold: u64,
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            target_io_per_compaction_mb: None,
            target_partitions_per_day_based_compaction: None,
            log_file_size_threshold_mb: 0,
            log_file_num_threshold: 0,
        }
    }
}

fn non_negative(name: &str, value: i64) -> Result<u64, CompactionError> {
    u64::try_from(value)
        .map_err(|_| CompactionError::InvalidConfig(format!("{name} must be >= 0, got {value}")))
}

impl CompactionConfig {
    pub fn from_settings(settings: &CompactionSettings) -> Result<Self, CompactionError> {
        let target_io_per_compaction_mb = settings
            .target_io_per_compaction_mb
            .map(|v| non_negative("target_io_per_compaction_mb", v))
            .transpose()?;

        let target_partitions_per_day_based_compaction = settings
            .target_partitions_per_day_based_compaction
            .map(|v| {
                non_negative("target_partitions_per_day_based_compaction", v).and_then(|n| {
                    usize::try_from(n).map_err(|_| {
                        CompactionError::InvalidConfig(format!(
                            "target_partitions_per_day_based_compaction too large: {n}"
                        ))
                    })
                })
            })
            .transpose()?;

        Ok(Self {
            strategy: settings.strategy,
            target_io_per_compaction_mb,
            target_partitions_per_day_based_compaction,
            log_file_size_threshold_mb: non_negative(
                "log_file_size_threshold_mb",
                settings.log_file_size_threshold_mb,
            )?,
            log_file_num_threshold: non_negative(
                "log_file_num_threshold",
                settings.log_file_num_threshold,
            )?,
        })
    }

    /// Validated `[compaction]` section of the global settings.
    pub fn from_app_config() -> Result<Self, CompactionError> {
        Self::from_settings(&CONFIG.compaction)
    }

    /// Same knobs with a different strategy selected.
    pub fn with_strategy(&self, strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..self.clone()
        }
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn target_io_per_compaction_mb(&self) -> Option<u64> {
        self.target_io_per_compaction_mb
    }

    pub fn target_partitions_per_day_based_compaction(&self) -> Option<usize> {
        self.target_partitions_per_day_based_compaction
    }

    pub fn log_file_size_threshold_mb(&self) -> u64 {
        self.log_file_size_threshold_mb
    }

    pub fn log_file_num_threshold(&self) -> u64 {
        self.log_file_num_threshold
    }
}
