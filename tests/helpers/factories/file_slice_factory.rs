use crate::engine::compaction::{BaseFile, FileSlice, LogFile};
use serde_json::{Value, json};
use std::collections::HashMap;

pub const MB: u64 = 1024 * 1024;

pub struct FileSliceFactory {
    params: HashMap<String, Value>,
}

impl FileSliceFactory {
    pub fn new() -> Self {
        let mut params = HashMap::new();
        params.insert("partition_path".into(), json!("2017/01/01"));
        params.insert("file_id".into(), json!("file-0"));
        params.insert("base_instant_time".into(), json!("100"));
        params.insert("base_size_mb".into(), json!(120));
        params.insert("log_sizes_mb".into(), json!([]));
        Self { params }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Drops the base file, leaving a log-only file group.
    pub fn without_base_file(self) -> Self {
        self.with("base_size_mb", Value::Null)
    }

    pub fn create(self) -> FileSlice {
        let partition_path = self.params["partition_path"].as_str().unwrap().to_string();
        let file_id = self.params["file_id"].as_str().unwrap().to_string();
        let base_instant_time = self.params["base_instant_time"]
            .as_str()
            .unwrap()
            .to_string();

        let base_file = self.params["base_size_mb"].as_u64().map(|mb| BaseFile {
            path: format!("/tmp/{partition_path}/{file_id}_{base_instant_time}.parquet"),
            file_id: file_id.clone(),
            commit_time: base_instant_time.clone(),
            file_size_bytes: mb * MB,
        });

        let log_files = self.params["log_sizes_mb"]
            .as_array()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(i, size)| LogFile {
                path: format!(
                    "/tmp/{partition_path}/.{file_id}_{base_instant_time}.log.{}",
                    i + 1
                ),
                file_size_bytes: size.as_u64().map(|mb| mb * MB),
            })
            .collect();

        FileSlice {
            partition_path,
            file_id,
            base_instant_time,
            base_file,
            log_files,
        }
    }
}
