//! Per-project task state machine.
//!
//! A project is `Idle` (nothing active or paused), `Running` (exactly one
//! active task) or `Suspended` (one or more paused tasks, none active). Only
//! one task per project may be active; any number may be paused.
//!
//! Every operation returns structured results. Prompting the user (pause the
//! other task? resume this one?) is left to the caller, which chains the
//! explicit operations below.

use crate::core::config::TrackerConfig;
use crate::core::sync::{NoopSynchronizer, Synchronizer};
use crate::db::Store;
use crate::errors::{AppError, AppResult};
use crate::models::{NewTask, Project, Task, TaskFilter, TaskId, TaskState, TaskUpdate};
use crate::utils::time::{self, format_ts};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Result of `Tracker::start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new task row was inserted.
    Started(Task),
    /// A task with the same name is already active; nothing changed.
    AlreadyActive(Task),
}

impl StartOutcome {
    pub fn task(&self) -> &Task {
        match self {
            StartOutcome::Started(t) | StartOutcome::AlreadyActive(t) => t,
        }
    }
}

/// A task annotated for display: elapsed time and pause flag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskStatus {
    pub task: Task,
    pub state: TaskState,
    pub elapsed: String,
    pub paused: bool,
}

impl TaskStatus {
    fn from_task(task: Task, now: &NaiveDateTime) -> Self {
        let elapsed = task.pretty_elapsed(now);
        Self {
            state: task.state(),
            paused: task.paused,
            elapsed,
            task,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.task.name, self.elapsed)?;
        if self.paused {
            write!(f, " [Paused]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoppedTask {
    pub task: Task,
    pub elapsed: String,
}

/// Result of `Tracker::stop`.
///
/// `paused` lists the tasks still suspended; the caller decides per task
/// whether to `resume` or `finalize_paused` them.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StopReport {
    pub stopped: Vec<StoppedTask>,
    pub paused: Vec<Task>,
}

impl StopReport {
    /// Nothing was active and nothing is paused.
    pub fn is_empty(&self) -> bool {
        self.stopped.is_empty() && self.paused.is_empty()
    }
}

pub struct Tracker {
    store: Store,
    project: Project,
    allow_sync: bool,
    synchronizer: Box<dyn Synchronizer>,
    clock: fn() -> NaiveDateTime,
}

impl Tracker {
    /// Open the store at `config.database`, ensure the schema and bind to
    /// `config.project`, creating the project on first use.
    pub fn open(config: &TrackerConfig) -> AppResult<Self> {
        let store = Store::open(&config.database)?;
        Self::with_store(store, &config.project, config.allow_sync)
    }

    pub fn with_store(store: Store, project: &str, allow_sync: bool) -> AppResult<Self> {
        store.ensure_schema()?;

        let known = store.find_project(project)?.is_some();
        let project_id = store.find_or_create_project(project)?;
        if !known {
            store.log("project", project, "Project created")?;
        }
        let project = store.get_project(project_id)?;

        Ok(Self {
            store,
            project,
            allow_sync,
            synchronizer: Box::new(NoopSynchronizer),
            clock: time::now,
        })
    }

    pub fn with_synchronizer(mut self, synchronizer: Box<dyn Synchronizer>) -> Self {
        self.synchronizer = synchronizer;
        self
    }

    /// Replace the wall clock; tests use this to control elapsed times.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    fn active_tasks(&self) -> AppResult<Vec<Task>> {
        self.store
            .query_tasks(&TaskFilter::project(self.project.id).active(true))
    }

    fn paused_tasks(&self) -> AppResult<Vec<Task>> {
        self.store
            .query_tasks(&TaskFilter::project(self.project.id).paused(true))
    }

    /// Load a task and make sure it belongs to this tracker's project.
    fn own_task(&self, id: TaskId) -> AppResult<Task> {
        let task = self.store.get_task(id)?;
        if task.project_id != self.project.id {
            return Err(AppError::InvalidState(format!(
                "task #{} belongs to another project",
                id
            )));
        }
        Ok(task)
    }

    /// Audit row plus optional sync, after a transition has been written.
    fn committed(&self, operation: &str, task: &Task, message: &str) -> AppResult<()> {
        self.store.log(operation, &task.name, message)?;
        if self.allow_sync {
            self.synchronizer.sync(task)?;
        }
        Ok(())
    }

    /// Start tracking `taskname` (or the project's default task name).
    ///
    /// Fails with `AnotherTaskActive` when a differently named task is
    /// running; the caller may `pause_active` and retry.
    pub fn start(&self, taskname: Option<&str>) -> AppResult<StartOutcome> {
        let name = match taskname {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ => self.project.default_task_name(),
        };

        let active = self.active_tasks()?;
        if let Some(same) = active.iter().find(|t| t.name == name) {
            return Ok(StartOutcome::AlreadyActive(same.clone()));
        }
        if let Some(other) = active.first() {
            return Err(AppError::AnotherTaskActive {
                id: other.id,
                name: other.name.clone(),
            });
        }

        let now = self.now();
        let id = self
            .store
            .insert_task(&NewTask::started(self.project.id, name, now))?;
        let task = self.store.get_task(id)?;

        self.committed("start", &task, &format!("Started at {}", format_ts(&now)))?;
        Ok(StartOutcome::Started(task))
    }

    /// Pause every active task of the project. Empty when nothing was running.
    pub fn pause_active(&self) -> AppResult<Vec<Task>> {
        let now = self.now();
        let mut paused = Vec::new();

        for task in self.active_tasks()? {
            self.store.update_task(
                task.id,
                &TaskUpdate {
                    stop_time: Some(Some(now)),
                    active: Some(false),
                    paused: Some(true),
                },
            )?;
            let task = self.store.get_task(task.id)?;
            self.committed("pause", &task, &format!("Paused after {}", task.pretty_elapsed(&now)))?;
            paused.push(task);
        }

        Ok(paused)
    }

    /// Make a paused task active again. Its start time is kept, so elapsed
    /// time keeps counting from the original start.
    pub fn resume(&self, id: TaskId) -> AppResult<Task> {
        let task = self.own_task(id)?;
        if !task.paused {
            return Err(AppError::InvalidState(format!(
                "task #{} '{}' is not paused ({})",
                task.id,
                task.name,
                task.state()
            )));
        }
        if let Some(other) = self.active_tasks()?.into_iter().next() {
            return Err(AppError::AnotherTaskActive {
                id: other.id,
                name: other.name,
            });
        }

        self.store.update_task(
            id,
            &TaskUpdate {
                stop_time: Some(None),
                active: Some(true),
                paused: Some(false),
            },
        )?;
        let task = self.store.get_task(id)?;
        self.committed("resume", &task, "Resumed")?;
        Ok(task)
    }

    /// Stop every active task and report elapsed times. Paused tasks are
    /// reported untouched.
    pub fn stop(&self) -> AppResult<StopReport> {
        let now = self.now();
        let mut report = StopReport::default();

        for task in self.active_tasks()? {
            self.store.update_task(
                task.id,
                &TaskUpdate {
                    stop_time: Some(Some(now)),
                    active: Some(false),
                    paused: Some(false),
                },
            )?;
            let task = self.store.get_task(task.id)?;
            let elapsed = task.pretty_elapsed(&now);
            self.committed("stop", &task, &format!("Completed in {}", elapsed))?;
            report.stopped.push(StoppedTask { task, elapsed });
        }

        report.paused = self.paused_tasks()?;
        Ok(report)
    }

    /// Terminate a paused task without resuming it. An existing stop time
    /// (set when it was paused) is kept.
    pub fn finalize_paused(&self, id: TaskId) -> AppResult<Task> {
        let task = self.own_task(id)?;
        if !task.paused {
            return Err(AppError::InvalidState(format!(
                "task #{} '{}' is not paused ({})",
                task.id,
                task.name,
                task.state()
            )));
        }

        let stop_time = match task.stop_time {
            Some(_) => None,
            None => Some(Some(self.now())),
        };
        self.store.update_task(
            id,
            &TaskUpdate {
                stop_time,
                active: Some(false),
                paused: Some(false),
            },
        )?;

        let task = self.store.get_task(id)?;
        self.committed(
            "finalize",
            &task,
            &format!("Finalized after {}", task.pretty_elapsed(&self.now())),
        )?;
        Ok(task)
    }

    /// Active then paused tasks of the project. Read-only.
    pub fn status(&self) -> AppResult<Vec<TaskStatus>> {
        let now = self.now();
        let mut tasks = self.active_tasks()?;
        tasks.extend(self.paused_tasks()?);

        Ok(tasks
            .into_iter()
            .map(|t| TaskStatus::from_task(t, &now))
            .collect())
    }

    /// Every task of the project, finished ones included, optionally only
    /// those named `taskname`. Read-only.
    pub fn history(&self, taskname: Option<&str>) -> AppResult<Vec<TaskStatus>> {
        let now = self.now();
        let mut filter = TaskFilter::project(self.project.id);
        if let Some(name) = taskname {
            filter = filter.name(name);
        }

        Ok(self
            .store
            .query_tasks(&filter)?
            .into_iter()
            .map(|t| TaskStatus::from_task(t, &now))
            .collect())
    }

    /// Release the store handle.
    pub fn close(self) -> AppResult<()> {
        self.store.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn nine() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn ten_past_ten() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(10, 10, 0)
            .unwrap()
    }

    fn tracker(project: &str) -> Tracker {
        Tracker::with_store(Store::open_in_memory().unwrap(), project, false).unwrap()
    }

    #[test]
    fn start_uses_default_name() {
        let t = tracker("parser");
        let out = t.start(None).unwrap();
        assert!(matches!(out, StartOutcome::Started(_)));
        assert_eq!(out.task().name, "Working on parser");
        assert!(out.task().active);
    }

    #[test]
    fn start_same_name_is_a_no_op() {
        let t = tracker("p");
        let first = t.start(Some("docs")).unwrap();
        let again = t.start(Some("docs")).unwrap();
        assert_eq!(again, StartOutcome::AlreadyActive(first.task().clone()));
        assert_eq!(t.history(None).unwrap().len(), 1);
    }

    #[test]
    fn start_other_name_requires_pause_first() {
        let t = tracker("p");
        let first = t.start(Some("docs")).unwrap();

        let err = t.start(Some("tests")).unwrap_err();
        match &err {
            AppError::AnotherTaskActive { id, name } => {
                assert_eq!(*id, first.task().id);
                assert_eq!(name, "docs");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.is_invalid_state());

        // the two-step resolution
        assert_eq!(t.pause_active().unwrap().len(), 1);
        let second = t.start(Some("tests")).unwrap();
        assert!(matches!(second, StartOutcome::Started(_)));

        let status = t.status().unwrap();
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].task.name, "tests");
        assert!(!status[0].paused);
        assert_eq!(status[1].task.name, "docs");
        assert!(status[1].paused);
    }

    #[test]
    fn elapsed_strings_follow_the_clock() {
        let t = tracker("p").with_clock(nine);
        t.start(Some("docs")).unwrap();

        let t = t.with_clock(ten_past_ten);
        let status = t.status().unwrap();
        assert_eq!(status[0].elapsed, "1 hours, 10 minutes");
        assert_eq!(status[0].to_string(), "docs (1 hours, 10 minutes)");

        let report = t.stop().unwrap();
        assert_eq!(report.stopped[0].elapsed, "1 hours, 10 minutes");
        assert_eq!(report.stopped[0].task.stop_time, Some(ten_past_ten()));
    }

    #[test]
    fn paused_status_is_annotated() {
        let t = tracker("p").with_clock(nine);
        t.start(None).unwrap();
        let paused = t.pause_active().unwrap();
        assert!(paused[0].paused && !paused[0].active);
        assert_eq!(paused[0].stop_time, Some(nine()));

        let status = t.status().unwrap();
        assert_eq!(status[0].to_string(), "Working on p (0 minutes) [Paused]");
        assert_eq!(status[0].state, TaskState::Paused);
    }

    #[test]
    fn resume_clears_stop_time() {
        let t = tracker("p").with_clock(nine);
        let id = t.start(None).unwrap().task().id;
        t.pause_active().unwrap();

        let t = t.with_clock(ten_past_ten);
        let resumed = t.resume(id).unwrap();
        assert!(resumed.active && !resumed.paused);
        assert_eq!(resumed.stop_time, None);
        assert_eq!(resumed.start_time, nine());
    }

    #[test]
    fn resume_rejects_bad_targets() {
        let t = tracker("p");
        let id = t.start(Some("a")).unwrap().task().id;

        assert!(matches!(t.resume(id), Err(AppError::InvalidState(_))));
        assert!(matches!(t.resume(4242), Err(AppError::TaskNotFound(4242))));
        assert!(matches!(
            t.finalize_paused(777),
            Err(AppError::TaskNotFound(777))
        ));

        t.pause_active().unwrap();
        t.start(Some("b")).unwrap();
        assert!(matches!(
            t.resume(id),
            Err(AppError::AnotherTaskActive { .. })
        ));
    }

    #[test]
    fn finalize_keeps_pause_time() {
        let t = tracker("p").with_clock(nine);
        let id = t.start(None).unwrap().task().id;
        t.pause_active().unwrap();

        let t = t.with_clock(ten_past_ten);
        let done = t.finalize_paused(id).unwrap();
        assert_eq!(done.state(), TaskState::Finished);
        assert_eq!(done.stop_time, Some(nine()));
        assert!(t.status().unwrap().is_empty());

        assert!(matches!(t.finalize_paused(id), Err(AppError::InvalidState(_))));
    }

    #[test]
    fn finalize_sets_missing_stop_time_from_clock() {
        let t = tracker("p").with_clock(ten_past_ten);
        let id = t
            .store()
            .insert_task(&NewTask {
                paused: true,
                active: false,
                ..NewTask::started(t.project().id, "imported", nine())
            })
            .unwrap();
        assert_eq!(t.store().get_task(id).unwrap().stop_time, None);

        let done = t.finalize_paused(id).unwrap();
        assert_eq!(done.stop_time, Some(ten_past_ten()));
        assert_eq!(done.state(), TaskState::Finished);
    }

    #[test]
    fn corrupt_row_in_another_project_does_not_block_opening() {
        let store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO projects (name, created_at) VALUES ('other', 'garbage')",
                [],
            )
            .unwrap();

        let t = Tracker::with_store(store, "mine", false).unwrap();
        assert_eq!(t.project().name, "mine");
        assert!(matches!(t.start(None).unwrap(), StartOutcome::Started(_)));
    }

    #[test]
    fn stop_reports_paused_without_touching_them() {
        let t = tracker("p");
        t.start(Some("a")).unwrap();
        t.pause_active().unwrap();
        t.start(Some("b")).unwrap();

        let report = t.stop().unwrap();
        assert_eq!(report.stopped.len(), 1);
        assert_eq!(report.stopped[0].task.name, "b");
        assert_eq!(report.paused.len(), 1);
        assert!(report.paused[0].paused);
        assert!(!report.is_empty());
    }

    #[test]
    fn empty_project_stop_and_pause_are_no_ops() {
        let t = tracker("p");
        assert!(t.stop().unwrap().is_empty());
        assert!(t.pause_active().unwrap().is_empty());
        assert!(t.status().unwrap().is_empty());
    }

    #[test]
    fn tasks_of_other_projects_are_out_of_reach() {
        let store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        let other = store.find_or_create_project("other").unwrap();
        let foreign = store
            .insert_task(&NewTask::started(other, "x", nine()))
            .unwrap();
        store
            .update_task(
                foreign,
                &TaskUpdate {
                    stop_time: Some(Some(nine())),
                    active: Some(false),
                    paused: Some(true),
                },
            )
            .unwrap();

        let t = Tracker::with_store(store, "mine", false).unwrap();
        assert!(t.status().unwrap().is_empty());
        assert!(matches!(t.resume(foreign), Err(AppError::InvalidState(_))));
        assert!(matches!(
            t.finalize_paused(foreign),
            Err(AppError::InvalidState(_))
        ));
        // a running task elsewhere does not block this project
        assert!(matches!(t.start(None).unwrap(), StartOutcome::Started(_)));
    }

    struct Recording(Rc<RefCell<Vec<String>>>);

    impl Synchronizer for Recording {
        fn sync(&self, task: &Task) -> AppResult<()> {
            self.0.borrow_mut().push(task.name.clone());
            Ok(())
        }
    }

    #[test]
    fn synchronizer_runs_only_when_allowed() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let t = Tracker::with_store(Store::open_in_memory().unwrap(), "p", true)
            .unwrap()
            .with_synchronizer(Box::new(Recording(calls.clone())));
        t.start(Some("a")).unwrap();
        t.stop().unwrap();
        assert_eq!(*calls.borrow(), vec!["a".to_string(), "a".to_string()]);

        let quiet = Rc::new(RefCell::new(Vec::new()));
        let t = Tracker::with_store(Store::open_in_memory().unwrap(), "p", false)
            .unwrap()
            .with_synchronizer(Box::new(Recording(quiet.clone())));
        t.start(Some("a")).unwrap();
        assert!(quiet.borrow().is_empty());
        assert!(!t.status().unwrap()[0].task.synced);
    }

    #[test]
    fn transitions_are_audited() {
        let t = tracker("p");
        t.start(Some("a")).unwrap();
        t.pause_active().unwrap();
        let id = t.status().unwrap()[0].task.id;
        t.resume(id).unwrap();
        t.stop().unwrap();

        let ops: Vec<String> = t
            .store()
            .load_log(None)
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(ops, vec!["project", "start", "pause", "resume", "stop"]);
    }
}
