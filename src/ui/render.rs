//! Plain-text rendering of tracker results.

use crate::core::TaskStatus;
use crate::db::log::LogEntry;
use crate::db::stats::StoreInfo;
use unicode_width::UnicodeWidthStr;

const TIME_FMT: &str = "%Y-%m-%d %H:%M";

/// Left-align `cell` to `width` terminal columns.
fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(cell));
    format!("{}{}", cell, " ".repeat(fill))
}

/// Column-aligned table; widths follow the widest cell of each column.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(headers.to_vec());
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

pub fn history_table(entries: &[TaskStatus]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|s| {
            vec![
                s.task.id.to_string(),
                s.state.to_string(),
                s.task.start_time.format(TIME_FMT).to_string(),
                s.task
                    .stop_time
                    .map(|t| t.format(TIME_FMT).to_string())
                    .unwrap_or_else(|| "--".to_string()),
                s.elapsed.clone(),
                s.task.name.clone(),
            ]
        })
        .collect();

    table(&["ID", "STATE", "START", "STOP", "ELAPSED", "TASK"], &rows)
}

pub fn log_table(entries: &[LogEntry]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.date.chars().take(19).collect(),
                e.operation.clone(),
                e.target.clone(),
                e.message.clone(),
            ]
        })
        .collect();

    table(&["ID", "DATE", "OPERATION", "TARGET", "MESSAGE"], &rows)
}

pub fn store_info(path: &str, info: &StoreInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("• File:     {}\n", path));
    out.push_str(&format!("• Projects: {}\n", info.projects));
    out.push_str(&format!(
        "• Tasks:    {} ({} active, {} paused)\n",
        info.tasks, info.active, info.paused
    ));
    out.push_str(&format!(
        "• Range:    {} → {}\n",
        info.first_start.as_deref().map(short).unwrap_or("--"),
        info.last_start.as_deref().map(short).unwrap_or("--"),
    ));
    out
}

fn short(ts: &str) -> &str {
    ts.get(..16).unwrap_or(ts)
}
