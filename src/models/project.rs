use chrono::NaiveDateTime;
use serde::Serialize;

pub type ProjectId = i64;

/// A named grouping of tasks, one per tracked codebase or work context.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl Project {
    /// Name given to tasks started without an explicit label.
    pub fn default_task_name(&self) -> String {
        default_task_name(&self.name)
    }
}

pub fn default_task_name(project: &str) -> String {
    format!("Working on {}", project)
}
