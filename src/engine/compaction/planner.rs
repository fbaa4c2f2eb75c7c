use std::collections::HashSet;

use tracing::{debug, info};

use super::config::CompactionConfig;
use super::operation::{CompactionOperation, CompactionPlan, FileSlice};
use super::strategy::{CompactionStrategy, StrategyKind};
use crate::engine::errors::CompactionError;

/// Turns discovered file slices into a compaction plan using the configured strategy.
#[derive(Debug, Clone)]
pub struct CompactionPlanner {
    config: CompactionConfig,
}

impl CompactionPlanner {
    pub fn new(config: CompactionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompactionConfig {
        &self.config
    }

    pub fn strategy(&self) -> StrategyKind {
        self.config.strategy()
    }

    /// Builds the candidate operation for one file slice, capturing its metrics.
    pub fn build_operation(&self, slice: &FileSlice) -> CompactionOperation {
        let metrics = self.strategy().capture_metrics(
            &self.config,
            slice.base_file.as_ref(),
            &slice.partition_path,
            &slice.log_files,
        );
        CompactionOperation::from_file_slice(slice, metrics)
    }

    pub fn build_operations(&self, slices: &[FileSlice]) -> Vec<CompactionOperation> {
        slices.iter().map(|s| self.build_operation(s)).collect()
    }

    /// Partitions worth scanning for candidates under the configured strategy.
    pub fn partitions_to_compact(
        &self,
        partition_paths: Vec<String>,
    ) -> Result<Vec<String>, CompactionError> {
        self.strategy()
            .filter_partition_paths(&self.config, partition_paths)
    }

    /// Orders and filters `candidates` into a plan.
    ///
    /// A file group can only belong to one compaction at a time, so candidates
    /// whose file group is already in `pending` are dropped first.
    pub fn plan(
        &self,
        candidates: Vec<CompactionOperation>,
        pending: &[CompactionOperation],
    ) -> Result<CompactionPlan, CompactionError> {
        let discovered = candidates.len();
        let in_flight_groups: HashSet<(&str, &str)> = pending
            .iter()
            .map(|p| (p.partition_path(), p.file_id()))
            .collect();
        let candidates: Vec<_> = candidates
            .into_iter()
            .filter(|op| {
                let in_flight = in_flight_groups.contains(&(op.partition_path(), op.file_id()));
                if in_flight {
                    debug!(
                        target: "mor_compaction::planner",
                        partition = op.partition_path(),
                        file_id = op.file_id(),
                        "Skipping file group with pending compaction"
                    );
                }
                !in_flight
            })
            .collect();

        let plan = self
            .strategy()
            .generate_compaction_plan(&self.config, candidates, pending)?;

        info!(
            target: "mor_compaction::planner",
            strategy = %plan.strategy,
            discovered,
            pending = pending.len(),
            planned = plan.len(),
            total_io_mb = plan.total_io_mb(),
            "Generated compaction plan"
        );
        Ok(plan)
    }
}
