use crate::errors::{AppError, AppResult};
use crate::models::{NewTask, Project, ProjectId, Task, TaskFilter, TaskId, TaskUpdate};
use crate::utils::time::{format_ts, now, parse_ts};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const TASK_COLUMNS: &str =
    "id, project_id, name, start_time, stop_time, active, paused, synced";

/// Wrap a timestamp parse failure into a row conversion error.
fn ts_column(row: &Row, idx: &str) -> Result<chrono::NaiveDateTime> {
    let raw: String = row.get(idx)?;
    parse_ts(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub fn map_task_row(row: &Row) -> Result<Task> {
    let stop_time = match row.get::<_, Option<String>>("stop_time")? {
        Some(raw) if !raw.trim().is_empty() => Some(parse_ts(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?),
        _ => None,
    };

    Ok(Task {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        name: row.get("name")?,
        start_time: ts_column(row, "start_time")?,
        stop_time,
        active: row.get("active")?,
        paused: row.get("paused")?,
        synced: row.get("synced")?,
    })
}

pub fn map_project_row(row: &Row) -> Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: ts_column(row, "created_at")?,
    })
}

/// Turn row conversion failures caused by bad timestamps back into
/// `AppError::InvalidTimestamp` so callers see a storage error, not a
/// generic rusqlite message.
fn lift(err: rusqlite::Error) -> AppError {
    if let rusqlite::Error::FromSqlConversionFailure(_, _, inner) = &err
        && let Some(AppError::InvalidTimestamp(raw)) = inner.downcast_ref::<AppError>()
    {
        return AppError::InvalidTimestamp(raw.clone());
    }
    AppError::Db(err)
}

pub fn load_project_by_name(conn: &Connection, name: &str) -> AppResult<Option<Project>> {
    conn.query_row(
        "SELECT id, name, created_at FROM projects WHERE name = ?1",
        [name],
        map_project_row,
    )
    .optional()
    .map_err(lift)
}

pub fn load_project(conn: &Connection, id: ProjectId) -> AppResult<Project> {
    conn.query_row(
        "SELECT id, name, created_at FROM projects WHERE id = ?1",
        [id],
        map_project_row,
    )
    .optional()
    .map_err(lift)?
    .ok_or(AppError::ProjectNotFound(id))
}

pub fn load_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM projects ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_project_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(lift)?);
    }
    Ok(out)
}

/// Look a project up by name, inserting it with `created_at = now` if absent.
pub fn find_or_create_project(conn: &Connection, name: &str) -> AppResult<ProjectId> {
    let tx = conn.unchecked_transaction()?;

    let existing: Option<ProjectId> = tx
        .query_row("SELECT id FROM projects WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .optional()?;

    let id = match existing {
        Some(id) => id,
        None => {
            tx.execute(
                "INSERT INTO projects (name, created_at) VALUES (?1, ?2)",
                params![name, format_ts(&now())],
            )?;
            tx.last_insert_rowid()
        }
    };

    tx.commit()?;
    Ok(id)
}

pub fn insert_task(conn: &Connection, task: &NewTask) -> AppResult<TaskId> {
    conn.execute(
        "INSERT INTO tasks (project_id, name, start_time, stop_time, active, paused, synced)
         VALUES (?1, ?2, ?3, NULL, ?4, ?5, ?6)",
        params![
            task.project_id,
            task.name,
            format_ts(&task.start_time),
            task.active,
            task.paused,
            task.synced,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Partial update of stop_time / active / paused for one task.
pub fn update_task(conn: &Connection, id: TaskId, fields: &TaskUpdate) -> AppResult<()> {
    if fields.is_empty() {
        // nothing to write, but the id must still exist
        load_task(conn, id)?;
        return Ok(());
    }

    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(stop) = &fields.stop_time {
        sets.push("stop_time = ?");
        values.push(match stop {
            Some(ts) => Value::Text(format_ts(ts)),
            None => Value::Null,
        });
    }
    if let Some(active) = fields.active {
        sets.push("active = ?");
        values.push(Value::Integer(active as i64));
    }
    if let Some(paused) = fields.paused {
        sets.push("paused = ?");
        values.push(Value::Integer(paused as i64));
    }

    let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));
    values.push(Value::Integer(id));

    let changed = conn.execute(&sql, params_from_iter(values))?;
    if changed == 0 {
        return Err(AppError::TaskNotFound(id));
    }
    Ok(())
}

pub fn load_task(conn: &Connection, id: TaskId) -> AppResult<Task> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        [id],
        map_task_row,
    )
    .optional()
    .map_err(lift)?
    .ok_or(AppError::TaskNotFound(id))
}

/// Tasks matching every set filter column, in insertion order.
pub fn query_tasks(conn: &Connection, filter: &TaskFilter) -> AppResult<Vec<Task>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(project_id) = filter.project_id {
        clauses.push("project_id = ?");
        values.push(Value::Integer(project_id));
    }
    if let Some(name) = &filter.name {
        clauses.push("name = ?");
        values.push(Value::Text(name.clone()));
    }
    if let Some(active) = filter.active {
        clauses.push("active = ?");
        values.push(Value::Integer(active as i64));
    }
    if let Some(paused) = filter.paused {
        clauses.push("paused = ?");
        values.push(Value::Integer(paused as i64));
    }

    let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks");
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_task_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(lift)?);
    }
    Ok(out)
}
