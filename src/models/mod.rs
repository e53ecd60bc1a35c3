pub mod project;
pub mod task;

pub use project::{Project, ProjectId};
pub use task::{NewTask, Task, TaskFilter, TaskId, TaskState, TaskUpdate};
