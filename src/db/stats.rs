use crate::errors::AppResult;
use rusqlite::Connection;
use serde::Serialize;

/// Row counts shown by `tt db --info`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StoreInfo {
    pub projects: i64,
    pub tasks: i64,
    pub active: i64,
    pub paused: i64,
    pub first_start: Option<String>,
    pub last_start: Option<String>,
}

fn count(conn: &Connection, sql: &str) -> rusqlite::Result<i64> {
    conn.query_row(sql, [], |row| row.get(0))
}

pub fn collect(conn: &Connection) -> AppResult<StoreInfo> {
    let (first_start, last_start): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(start_time), MAX(start_time) FROM tasks",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(StoreInfo {
        projects: count(conn, "SELECT COUNT(*) FROM projects")?,
        tasks: count(conn, "SELECT COUNT(*) FROM tasks")?,
        active: count(conn, "SELECT COUNT(*) FROM tasks WHERE active = 1")?,
        paused: count(conn, "SELECT COUNT(*) FROM tasks WHERE paused = 1")?,
        first_start,
        last_start,
    })
}
