use timetracker::core::{StartOutcome, Tracker, TrackerConfig};
use timetracker::db::Store;
use timetracker::errors::AppError;
use timetracker::models::{TaskFilter, TaskState};

fn config(dir: &tempfile::TempDir, project: &str) -> TrackerConfig {
    TrackerConfig::new(dir.path().join("tt.db"), project)
}

/// Small deterministic generator so the interleaving is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

fn assert_invariants(store: &Store) {
    for project in store.list_projects().unwrap() {
        let tasks = store.query_tasks(&TaskFilter::project(project.id)).unwrap();
        let active = tasks.iter().filter(|t| t.active).count();
        assert!(active <= 1, "project {} has {} active tasks", project.name, active);
        for t in &tasks {
            assert!(!(t.active && t.paused), "task #{} both active and paused", t.id);
            if t.active {
                assert!(t.stop_time.is_none(), "active task #{} has a stop time", t.id);
            }
        }
    }
}

#[test]
fn at_most_one_active_task_per_project_under_random_interleaving() {
    let dir = tempfile::tempdir().unwrap();
    let trackers = [
        Tracker::open(&config(&dir, "alpha")).unwrap(),
        Tracker::open(&config(&dir, "beta")).unwrap(),
    ];
    let names = ["design", "code", "review"];
    let mut rng = Lcg(0x5eed);

    for _ in 0..400 {
        let t = &trackers[rng.next(2) as usize];
        let result = match rng.next(5) {
            0 | 1 => {
                let name = names[rng.next(3) as usize];
                t.start(Some(name)).map(|_| ())
            }
            2 => t.pause_active().map(|_| ()),
            3 => {
                let paused: Vec<_> = t
                    .status()
                    .unwrap()
                    .into_iter()
                    .filter(|s| s.paused)
                    .collect();
                if paused.is_empty() {
                    t.resume(i64::MAX).map(|_| ())
                } else {
                    let pick = &paused[rng.next(paused.len() as u64) as usize];
                    t.resume(pick.task.id).map(|_| ())
                }
            }
            _ => t.stop().and_then(|report| {
                for p in report.paused.iter().filter(|_| rng.next(2) == 0) {
                    t.finalize_paused(p.id)?;
                }
                Ok(())
            }),
        };

        match result {
            Ok(()) => {}
            Err(e) if e.is_invalid_state() || e.is_not_found() => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
        assert_invariants(trackers[0].store());
    }
}

#[test]
fn start_then_status_shows_one_entry() {
    let dir = tempfile::tempdir().unwrap();
    let t = Tracker::open(&config(&dir, "site")).unwrap();

    t.start(Some("landing page")).unwrap();
    let status = t.status().unwrap();
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].task.name, "landing page");
    assert_eq!(status[0].elapsed, "0 minutes");
    assert!(!status[0].paused);
}

#[test]
fn stop_finishes_the_active_task() {
    let dir = tempfile::tempdir().unwrap();
    let t = Tracker::open(&config(&dir, "site")).unwrap();

    let id = t.start(None).unwrap().task().id;
    let report = t.stop().unwrap();
    assert_eq!(report.stopped.len(), 1);
    assert_eq!(report.stopped[0].elapsed, "0 minutes");

    let task = t.store().get_task(id).unwrap();
    assert!(!task.active && !task.paused);
    assert!(task.stop_time.is_some());
    assert_eq!(task.state(), TaskState::Finished);
    assert!(t.status().unwrap().is_empty());
}

#[test]
fn state_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();

    let t = Tracker::open(&config(&dir, "site")).unwrap();
    let project_id = t.project().id;
    t.start(Some("persisted")).unwrap();
    t.close().unwrap();

    let t = Tracker::open(&config(&dir, "site")).unwrap();
    assert_eq!(t.project().id, project_id);
    assert_eq!(
        t.start(Some("persisted")).unwrap(),
        StartOutcome::AlreadyActive(t.status().unwrap()[0].task.clone())
    );
    assert!(matches!(
        t.start(Some("other")),
        Err(AppError::AnotherTaskActive { .. })
    ));
}

#[test]
fn find_or_create_project_inserts_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(&dir.path().join("tt.db")).unwrap();
    store.ensure_schema().unwrap();

    let a = store.find_or_create_project("X").unwrap();
    let b = store.find_or_create_project("X").unwrap();
    assert_eq!(a, b);
    assert_eq!(store.list_projects().unwrap().len(), 1);
    store.close().unwrap();
}

#[test]
fn history_keeps_finished_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let t = Tracker::open(&config(&dir, "site")).unwrap();

    t.start(Some("one")).unwrap();
    t.stop().unwrap();
    t.start(Some("two")).unwrap();

    let all = t.history(None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].state, TaskState::Finished);
    assert_eq!(all[1].state, TaskState::Active);

    let only_one = t.history(Some("one")).unwrap();
    assert_eq!(only_one.len(), 1);
}
