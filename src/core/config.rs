use std::path::PathBuf;

/// Everything a Tracker needs, resolved by the caller beforehand.
/// The core never reads the environment or the config file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub database: PathBuf,
    pub project: String,
    pub allow_sync: bool,
}

impl TrackerConfig {
    pub fn new(database: impl Into<PathBuf>, project: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            project: project.into(),
            allow_sync: false,
        }
    }

    pub fn with_sync(mut self, allow_sync: bool) -> Self {
        self.allow_sync = allow_sync;
        self
    }
}
