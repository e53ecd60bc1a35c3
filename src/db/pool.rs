//! SQLite store handle (one connection, owned for the lifetime of a Tracker).

use crate::db::initialize::init_db;
use crate::db::log::{self, LogEntry};
use crate::db::queries;
use crate::db::stats::{self, StoreInfo};
use crate::errors::AppResult;
use crate::models::{NewTask, Project, ProjectId, Task, TaskFilter, TaskId, TaskUpdate};
use rusqlite::Connection;
use std::path::Path;

/// Durable CRUD over projects and tasks. Holds no business rules.
pub struct Store {
    pub conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create (or migrate) the projects, tasks and log tables. Idempotent.
    pub fn ensure_schema(&self) -> AppResult<()> {
        init_db(&self.conn)
    }

    pub fn find_or_create_project(&self, name: &str) -> AppResult<ProjectId> {
        queries::find_or_create_project(&self.conn, name)
    }

    /// Look a project up by name without creating it.
    pub fn find_project(&self, name: &str) -> AppResult<Option<Project>> {
        queries::load_project_by_name(&self.conn, name)
    }

    pub fn get_project(&self, id: ProjectId) -> AppResult<Project> {
        queries::load_project(&self.conn, id)
    }

    pub fn list_projects(&self) -> AppResult<Vec<Project>> {
        queries::load_projects(&self.conn)
    }

    pub fn insert_task(&self, task: &NewTask) -> AppResult<TaskId> {
        queries::insert_task(&self.conn, task)
    }

    pub fn update_task(&self, id: TaskId, fields: &TaskUpdate) -> AppResult<()> {
        queries::update_task(&self.conn, id, fields)
    }

    pub fn get_task(&self, id: TaskId) -> AppResult<Task> {
        queries::load_task(&self.conn, id)
    }

    pub fn query_tasks(&self, filter: &TaskFilter) -> AppResult<Vec<Task>> {
        queries::query_tasks(&self.conn, filter)
    }

    /// Append a row to the internal audit log.
    pub fn log(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        log::ttlog(&self.conn, operation, target, message)
    }

    pub fn load_log(&self, limit: Option<usize>) -> AppResult<Vec<LogEntry>> {
        log::load_log(&self.conn, limit)
    }

    pub fn info(&self) -> AppResult<StoreInfo> {
        stats::collect(&self.conn)
    }

    /// Run `PRAGMA integrity_check`; `Ok(None)` means the file is sound.
    pub fn integrity_check(&self) -> AppResult<Option<String>> {
        let integrity: String = self
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
        Ok(if integrity == "ok" {
            None
        } else {
            Some(integrity)
        })
    }

    /// Release the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> AppResult<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        Ok(())
    }
}
