use crate::engine::compaction::{
    CompactionConfig, CompactionOperation, CompactionStrategy, StrategyKind,
};
use crate::test_helpers::factory::Factory;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Builds operations the way the planner does: from a file slice, with metrics
/// captured by a strategy.
pub struct CompactionOperationFactory {
    params: HashMap<String, Value>,
    strategy: StrategyKind,
}

impl CompactionOperationFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("partition_path".into(), json!("2017/01/01"));
        params.insert("file_id".into(), json!("file-0"));
        params.insert("base_size_mb".into(), json!(120));
        params.insert("log_sizes_mb".into(), json!([]));
        Self {
            params,
            strategy: StrategyKind::UnBounded,
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn create(self) -> CompactionOperation {
        let mut slice = Factory::file_slice();
        for (key, value) in self.params {
            slice = slice.with(&key, value);
        }
        let slice = slice.create();

        let config = CompactionConfig::default().with_strategy(self.strategy);
        let metrics = self.strategy.capture_metrics(
            &config,
            slice.base_file.as_ref(),
            &slice.partition_path,
            &slice.log_files,
        );
        CompactionOperation::from_file_slice(&slice, metrics)
    }

    /// One operation per `(base MB, log MBs, partition)` entry, in the given order.
    pub fn create_list<P: Into<Value>>(
        self,
        groups: Vec<(u64, Vec<u64>, P)>,
    ) -> Vec<CompactionOperation> {
        groups
            .into_iter()
            .enumerate()
            .map(|(i, (base_mb, logs_mb, partition))| {
                CompactionOperationFactory {
                    params: self.params.clone(),
                    strategy: self.strategy,
                }
                .with("file_id", format!("file-{i}"))
                .with("base_size_mb", base_mb)
                .with("log_sizes_mb", json!(logs_mb))
                .with("partition_path", partition)
                .create()
            })
            .collect()
    }
}
