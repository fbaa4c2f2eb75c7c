//! Budget-bounded admission.
//!
//! Candidates are ranked by each strategy, then admitted in rank order while
//! the running `TOTAL_IO_MB` stays under the per-compaction budget. The
//! candidate that reaches the budget is still admitted, so a plan always makes
//! progress even when one file group alone exceeds the budget.

use tracing::debug;

use super::config::CompactionConfig;
use super::metrics::Metric;
use super::operation::CompactionOperation;
use super::strategy::{CompactionStrategy, StrategyKind};
use crate::engine::errors::CompactionError;

/// Admits the shortest prefix of `ranked` whose summed `TOTAL_IO_MB` reaches
/// `budget_mb`, or all of it when the budget is never reached or unset.
pub fn admit_within_budget(
    ranked: Vec<CompactionOperation>,
    budget_mb: Option<u64>,
) -> Vec<CompactionOperation> {
    let Some(budget_mb) = budget_mb else {
        return ranked;
    };
    let budget = budget_mb as f64;
    let candidates = ranked.len();

    let mut admitted = Vec::new();
    let mut io_mb = 0.0;
    for op in ranked {
        io_mb += op.metric(Metric::TotalIoMb);
        admitted.push(op);
        if io_mb >= budget {
            break;
        }
    }

    debug!(
        target: "mor_compaction::bounded_io",
        budget_mb,
        admitted_io_mb = io_mb,
        admitted = admitted.len(),
        candidates,
        "Admitted operations within IO budget"
    );
    admitted
}

/// Ranks by `metric` descending after dropping candidates below `threshold`.
/// The sort is stable: equal values keep their input order.
fn rank_by_metric_desc(
    operations: Vec<CompactionOperation>,
    metric: Metric,
    threshold: u64,
) -> Vec<CompactionOperation> {
    let threshold = threshold as f64;
    let mut ranked: Vec<_> = operations
        .into_iter()
        .filter(|op| op.metric(metric) >= threshold)
        .collect();
    ranked.sort_by(|a, b| b.metric(metric).total_cmp(&a.metric(metric)));
    ranked
}

/// Keeps the caller's order and stops once the IO budget is used up.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedIoCompactionStrategy;

impl CompactionStrategy for BoundedIoCompactionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BoundedIo
    }

    fn order_and_filter(
        &self,
        config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        _pending: &[CompactionOperation],
    ) -> Result<Vec<CompactionOperation>, CompactionError> {
        Ok(admit_within_budget(
            operations,
            config.target_io_per_compaction_mb(),
        ))
    }
}

/// Largest unmerged log backlog first, bounded by the IO budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFileSizeBasedCompactionStrategy;

impl CompactionStrategy for LogFileSizeBasedCompactionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LogFileSizeBased
    }

    fn order_and_filter(
        &self,
        config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        _pending: &[CompactionOperation],
    ) -> Result<Vec<CompactionOperation>, CompactionError> {
        let ranked = rank_by_metric_desc(
            operations,
            Metric::TotalLogFileSize,
            config.log_file_size_threshold_mb(),
        );
        Ok(admit_within_budget(
            ranked,
            config.target_io_per_compaction_mb(),
        ))
    }
}

/// Most log files first, bounded by the IO budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFileNumBasedCompactionStrategy;

impl CompactionStrategy for LogFileNumBasedCompactionStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LogFileNumBased
    }

    fn order_and_filter(
        &self,
        config: &CompactionConfig,
        operations: Vec<CompactionOperation>,
        _pending: &[CompactionOperation],
    ) -> Result<Vec<CompactionOperation>, CompactionError> {
        let ranked = rank_by_metric_desc(
            operations,
            Metric::TotalLogFiles,
            config.log_file_num_threshold(),
        );
        Ok(admit_within_budget(
            ranked,
            config.target_io_per_compaction_mb(),
        ))
    }
}
