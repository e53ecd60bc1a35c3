//! Remote synchronization hook.
//!
//! The Tracker calls `sync` after each committed transition when sync is
//! allowed. Only a no-op implementation ships here; a network client plugs
//! in through the same trait.

use crate::errors::AppResult;
use crate::models::Task;

pub trait Synchronizer {
    fn sync(&self, task: &Task) -> AppResult<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSynchronizer;

impl Synchronizer for NoopSynchronizer {
    fn sync(&self, _task: &Task) -> AppResult<()> {
        Ok(())
    }
}
