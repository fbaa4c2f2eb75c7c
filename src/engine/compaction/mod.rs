pub mod bounded_io;
pub mod config;
pub mod day_window;
pub mod metrics;
pub mod operation;
pub mod planner;
pub mod strategy;

pub use self::config::{CompactionConfig, CompactionSettings};
pub use metrics::{Metric, Metrics};
pub use operation::{BaseFile, CompactionOperation, CompactionPlan, FileSlice, LogFile};
pub use planner::CompactionPlanner;
pub use strategy::{CompactionStrategy, PartitionComparator, StrategyKind};
