//! Schema creation and upgrades.
//!
//! Every step is idempotent. One-shot migrations are recorded in the `log`
//! table with `operation = 'migration_applied'` and never run twice.
//! Databases written by the earlier tool use `projects(name, created)` and
//! `tasks(project, name, start, stop, active, synced[, paused])`; those are
//! rebuilt into the current layout keeping their row ids.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

const MIGRATION_LEGACY_PROJECTS: &str = "20190601_0001_projects_created_at";
const MIGRATION_LEGACY_TASKS: &str = "20190601_0002_tasks_named_columns";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_columns(conn: &Connection, table: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

fn has_column(columns: &[String], name: &str) -> bool {
    columns.iter().any(|c| c == name)
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now', 'localtime'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

const PROJECTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        name       TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    );
"#;

const TASKS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL,
        name       TEXT NOT NULL,
        start_time TEXT NOT NULL,
        stop_time  TEXT,
        active     INTEGER NOT NULL DEFAULT 0,
        paused     INTEGER NOT NULL DEFAULT 0,
        synced     INTEGER NOT NULL DEFAULT 0
    );
"#;

const TASK_INDEXES: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_tasks_project_active ON tasks(project_id, active);
    CREATE INDEX IF NOT EXISTS idx_tasks_project_paused ON tasks(project_id, paused);
    CREATE INDEX IF NOT EXISTS idx_tasks_project_name ON tasks(project_id, name);
"#;

/// Rebuild `projects(name, created)` into the current layout.
fn migrate_legacy_projects(conn: &Connection) -> AppResult<()> {
    if migration_applied(conn, MIGRATION_LEGACY_PROJECTS)? {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&format!(
        r#"
        ALTER TABLE projects RENAME TO projects_old;
        {PROJECTS_DDL}
        INSERT INTO projects (id, name, created_at)
        SELECT rowid, name, COALESCE(created, datetime('now', 'localtime'))
        FROM projects_old
        WHERE name IS NOT NULL;
        DROP TABLE projects_old;
        "#
    ))
    .map_err(|e| AppError::Migration(format!("projects table: {}", e)))?;

    mark_applied(
        &tx,
        MIGRATION_LEGACY_PROJECTS,
        "Rebuilt legacy projects table with id/created_at columns",
    )?;
    tx.commit()?;
    Ok(())
}

/// Rebuild `tasks(project, name, start, stop, active, synced[, paused])`.
///
/// Rows without a name get the default label of their project.
fn migrate_legacy_tasks(conn: &Connection, legacy_has_paused: bool) -> AppResult<()> {
    if migration_applied(conn, MIGRATION_LEGACY_TASKS)? {
        return Ok(());
    }

    let paused_expr = if legacy_has_paused {
        "COALESCE(t.paused, 0)"
    } else {
        "0"
    };

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&format!(
        r#"
        ALTER TABLE tasks RENAME TO tasks_old;
        {TASKS_DDL}
        INSERT INTO tasks (id, project_id, name, start_time, stop_time, active, paused, synced)
        SELECT t.rowid,
               t.project,
               COALESCE(t.name, 'Working on ' || COALESCE(p.name, '')),
               t.start,
               t.stop,
               COALESCE(t.active, 0),
               {paused_expr},
               COALESCE(t.synced, 0)
        FROM tasks_old t
        LEFT JOIN projects p ON p.id = t.project;
        DROP TABLE tasks_old;
        "#
    ))
    .map_err(|e| AppError::Migration(format!("tasks table: {}", e)))?;

    let message = if legacy_has_paused {
        "Rebuilt legacy tasks table with named columns"
    } else {
        "Rebuilt legacy tasks table with named columns (added paused flag)"
    };
    mark_applied(&tx, MIGRATION_LEGACY_TASKS, message)?;
    tx.commit()?;
    Ok(())
}

/// Public entry point: create missing tables and run pending migrations.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) log first, migrations are tracked there
    ensure_log_table(conn)?;

    // 2) projects
    if table_exists(conn, "projects")? {
        let cols = table_columns(conn, "projects")?;
        if has_column(&cols, "created") && !has_column(&cols, "created_at") {
            migrate_legacy_projects(conn)?;
        }
    }
    conn.execute_batch(PROJECTS_DDL)?;

    // 3) tasks (after projects: legacy rows borrow the project name)
    if table_exists(conn, "tasks")? {
        let cols = table_columns(conn, "tasks")?;
        if has_column(&cols, "project") && !has_column(&cols, "project_id") {
            migrate_legacy_tasks(conn, has_column(&cols, "paused"))?;
        }
    }
    conn.execute_batch(TASKS_DDL)?;
    conn.execute_batch(TASK_INDEXES)?;

    Ok(())
}
