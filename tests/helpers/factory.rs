pub use super::factories::{CompactionOperationFactory, FileSliceFactory};

pub struct Factory;

impl Factory {
    pub fn file_slice() -> FileSliceFactory {
        FileSliceFactory::new()
    }

    pub fn compaction_operation() -> CompactionOperationFactory {
        CompactionOperationFactory::new()
    }
}
