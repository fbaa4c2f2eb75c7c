pub mod compaction_operation_factory;
pub mod file_slice_factory;

pub use compaction_operation_factory::CompactionOperationFactory;
pub use file_slice_factory::FileSliceFactory;

#[cfg(test)]
mod compaction_operation_factory_test;
#[cfg(test)]
mod file_slice_factory_test;
