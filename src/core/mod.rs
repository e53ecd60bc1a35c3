pub mod config;
pub mod sync;
pub mod tracker;

pub use config::TrackerConfig;
pub use sync::{NoopSynchronizer, Synchronizer};
pub use tracker::{StartOutcome, StopReport, StoppedTask, TaskStatus, Tracker};
