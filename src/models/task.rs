use super::project::ProjectId;
use crate::utils::time::{pretty_elapsed, seconds_between};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

pub type TaskId = i64;

/// A single tracked work session.
///
/// Built once from a `tasks` row at the store boundary; everything above the
/// store works with this typed record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub name: String,
    pub start_time: NaiveDateTime,
    pub stop_time: Option<NaiveDateTime>,
    pub active: bool,
    pub paused: bool,
    pub synced: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Active,
    Paused,
    Finished,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskState::Active => "active",
            TaskState::Paused => "paused",
            TaskState::Finished => "finished",
        };
        f.write_str(s)
    }
}

impl Task {
    pub fn state(&self) -> TaskState {
        if self.active {
            TaskState::Active
        } else if self.paused {
            TaskState::Paused
        } else {
            TaskState::Finished
        }
    }

    /// Seconds between start and stop, or start and `now` while running.
    pub fn elapsed_seconds(&self, now: &NaiveDateTime) -> i64 {
        let end = self.stop_time.as_ref().unwrap_or(now);
        seconds_between(&self.start_time, end)
    }

    pub fn pretty_elapsed(&self, now: &NaiveDateTime) -> String {
        pretty_elapsed(self.elapsed_seconds(now))
    }
}

/// Values for a row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: ProjectId,
    pub name: String,
    pub start_time: NaiveDateTime,
    pub active: bool,
    pub paused: bool,
    pub synced: bool,
}

impl NewTask {
    /// A freshly started task: active, not paused, not synced.
    pub fn started(project_id: ProjectId, name: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            project_id,
            name: name.into(),
            start_time: at,
            active: true,
            paused: false,
            synced: false,
        }
    }
}

/// Partial update of a task. `None` leaves the column untouched;
/// `stop_time: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub stop_time: Option<Option<NaiveDateTime>>,
    pub active: Option<bool>,
    pub paused: Option<bool>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.stop_time.is_none() && self.active.is_none() && self.paused.is_none()
    }
}

/// Conjunction of optional column filters for `query_tasks`.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub project_id: Option<ProjectId>,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub paused: Option<bool>,
}

impl TaskFilter {
    pub fn project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = Some(paused);
        self
    }
}
