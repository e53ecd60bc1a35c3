use crate::errors::AppResult;
use crate::utils::time::{format_ts, now};
use rusqlite::Connection;
use rusqlite::params;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![format_ts(&now()), operation, target, message])?;

    Ok(())
}

/// Read log rows oldest first; with a limit, only the most recent ones.
pub fn load_log(conn: &Connection, limit: Option<usize>) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, COALESCE(target, ''), message
         FROM log ORDER BY id DESC LIMIT ?1",
    )?;

    // SQLite treats a negative LIMIT as "no limit"
    let lim: i64 = limit.map(|l| l as i64).unwrap_or(-1);

    let rows = stmt.query_map([lim], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    out.reverse();
    Ok(out)
}
