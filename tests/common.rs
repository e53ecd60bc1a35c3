#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::PathBuf;
use tempfile::TempDir;

const TT_VARS: [&str; 6] = [
    "TT_DATABASE",
    "TT_DATABASE_PATH",
    "TT_PROJECT",
    "TT_ALLOW_SYNC",
    "TT_SERVER_ADDRESS",
    "TT_ACCESS_TOKEN",
];

pub fn tt() -> Command {
    cargo_bin_cmd!("tt")
}

/// A private HOME and database file per test.
pub struct Sandbox {
    pub home: TempDir,
    pub db: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("tempdir");
        let db = home.path().join("data").join("tt.db");
        Self { home, db }
    }

    pub fn db_str(&self) -> String {
        self.db.to_string_lossy().to_string()
    }

    /// `tt` with isolated HOME, no TT_* variables and `--db` set.
    pub fn bare(&self) -> Command {
        let mut cmd = tt();
        cmd.env("HOME", self.home.path());
        for var in TT_VARS {
            cmd.env_remove(var);
        }
        cmd.args(["--db", &self.db_str()]);
        cmd
    }

    /// `bare()` bound to `project`.
    pub fn cmd(&self, project: &str) -> Command {
        let mut cmd = self.bare();
        cmd.args(["--project", project]);
        cmd
    }
}
