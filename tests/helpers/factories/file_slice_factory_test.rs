use super::file_slice_factory::MB;
use crate::test_helpers::factory::Factory;
use serde_json::json;

#[test]
fn test_file_slice_factory() {
    let slice = Factory::file_slice()
        .with("partition_path", "2017/01/03")
        .with("file_id", "fg-7")
        .with("base_size_mb", 90)
        .with("log_sizes_mb", json!([1024, null]))
        .create();

    assert_eq!(slice.partition_path, "2017/01/03");
    assert_eq!(slice.file_id, "fg-7");
    assert_eq!(slice.base_file.as_ref().unwrap().file_size_bytes, 90 * MB);
    assert_eq!(slice.log_files.len(), 2);
    assert_eq!(slice.log_files[0].file_size_bytes, Some(1024 * MB));
    assert_eq!(slice.log_files[1].file_size_bytes, None);
}

#[test]
fn test_file_slice_factory_without_base_file() {
    let slice = Factory::file_slice().without_base_file().create();
    assert!(slice.base_file.is_none());
    assert!(slice.log_files.is_empty());
}
