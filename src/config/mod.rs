use crate::core::TrackerConfig;
use crate::errors::{AppError, AppResult};
use crate::utils::path::{dir_basename, expand_tilde};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_DATABASE: &str = "TT_DATABASE";
/// Name the earlier tool documented; read when `TT_DATABASE` is unset.
pub const ENV_DATABASE_PATH: &str = "TT_DATABASE_PATH";
pub const ENV_PROJECT: &str = "TT_PROJECT";
pub const ENV_ALLOW_SYNC: &str = "TT_ALLOW_SYNC";
pub const ENV_SERVER_ADDRESS: &str = "TT_SERVER_ADDRESS";
pub const ENV_ACCESS_TOKEN: &str = "TT_ACCESS_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub allow_sync: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            project: None,
            allow_sync: false,
            server_address: None,
            api_token: None,
        }
    }
}

impl Config {
    /// `~/.config/TimeTracker`, the directory the earlier tool used too.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("TimeTracker")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tt.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("tt.db")
    }

    /// Load the config file, or defaults when it does not exist.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::parse(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Write the config file, creating its directory.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Apply `TT_*` overrides read through `lookup`.
    ///
    /// Returns warnings for values that could not be used; an unusable
    /// `TT_ALLOW_SYNC` disables sync for this run.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        let database = lookup(ENV_DATABASE)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| lookup(ENV_DATABASE_PATH).filter(|v| !v.trim().is_empty()));
        if let Some(db) = database {
            self.database = db;
        }
        if let Some(project) = lookup(ENV_PROJECT).filter(|v| !v.trim().is_empty()) {
            self.project = Some(project);
        }
        if let Some(raw) = lookup(ENV_ALLOW_SYNC) {
            match raw.trim().parse::<i64>() {
                Ok(v) => self.allow_sync = v != 0,
                Err(_) => {
                    self.allow_sync = false;
                    warnings.push(format!(
                        "Please set {ENV_ALLOW_SYNC} to 1 to allow syncing, or 0 to disallow it. \
                         Syncing has been disabled for this run."
                    ));
                }
            }
        }
        if let Some(server) = lookup(ENV_SERVER_ADDRESS) {
            self.server_address = Some(server);
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            self.api_token = Some(token);
        }

        warnings
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    /// Explicit flag, then configured project, then the basename of `cwd`.
    pub fn resolve_project(&self, flag: Option<&str>, cwd: &Path) -> AppResult<String> {
        if let Some(p) = flag.filter(|p| !p.trim().is_empty()) {
            return Ok(p.to_string());
        }
        if let Some(p) = self.project.as_deref().filter(|p| !p.trim().is_empty()) {
            return Ok(p.to_string());
        }
        dir_basename(cwd).ok_or_else(|| {
            AppError::Config(format!(
                "cannot derive a project name from {}; use --project",
                cwd.display()
            ))
        })
    }

    pub fn tracker_config(&self, project_flag: Option<&str>, cwd: &Path) -> AppResult<TrackerConfig> {
        let project = self.resolve_project(project_flag, cwd)?;
        Ok(TrackerConfig::new(self.database_path(), project).with_sync(self.allow_sync))
    }
}
