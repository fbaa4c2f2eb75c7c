use crate::engine::compaction::Metric;
use crate::test_helpers::factory::Factory;

#[test]
fn test_compaction_operation_factory() {
    let op = Factory::compaction_operation()
        .with("partition_path", "2017/01/02")
        .with("base_size_mb", 100)
        .with("log_sizes_mb", serde_json::json!([1]))
        .create();

    assert_eq!(op.partition_path(), "2017/01/02");
    assert_eq!(op.delta_file_paths().len(), 1);
    assert_eq!(op.metric(Metric::TotalIoMb), 201.0);
}

#[test]
fn test_compaction_operation_factory_list() {
    let ops = Factory::compaction_operation().create_list(vec![
        (120, vec![60, 10, 80], "2017/01/03"),
        (110, vec![], "2017/01/03"),
    ]);

    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].file_id(), "file-0");
    assert_eq!(ops[1].file_id(), "file-1");
    assert_eq!(ops[0].metric(Metric::TotalLogFileSize), 150.0);
    assert_eq!(ops[1].metric(Metric::TotalLogFiles), 0.0);
}
