use chrono::{DateTime, Duration, TimeZone, Utc};

use opsboard::lifecycle::{assign, complete, is_assigned, pause, start, unassign, update_notes};
use opsboard::models::{Category, Priority, Status, Task, TaskAssignment};

fn catalog_task(id: u64, estimated_minutes: u32, priority: Priority) -> Task {
    Task {
        id,
        name: format!("Task {}", id),
        description: String::new(),
        category: Category::Payments,
        estimated_minutes,
        priority,
        is_recurring: true,
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

#[test]
fn test_assign_creates_not_started_record() {
    let mut assignments: Vec<TaskAssignment> = Vec::new();
    let task = catalog_task(7, 30, Priority::Urgent);

    let id = assign(&mut assignments, &task, 2, "Tamer", t0());

    assert_eq!(id, 1);
    let a = &assignments[0];
    assert_eq!(a.task_id, 7);
    assert_eq!(a.employee_id, 2);
    assert_eq!(a.status, Status::NotStarted);
    assert_eq!(a.assigned_at, t0());
    assert_eq!(a.date, t0().date_naive());
    assert!(a.started_at.is_none());
    assert!(a.completed_at.is_none());
    assert!(a.actual_minutes.is_none());
    // Priority is denormalized from the task at creation time
    assert_eq!(a.priority, Priority::Urgent);
}

#[test]
fn test_assign_ids_are_sequential() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    assign(&mut assignments, &task, 1, "Tamer", t0());
    let second = assign(&mut assignments, &task, 2, "Tamer", t0());
    assert_eq!(second, 2);
    assert_eq!(assignments.len(), 2);
}

#[test]
fn test_start_sets_started_at_once() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    let id = assign(&mut assignments, &task, 1, "Tamer", t0());

    assert!(start(&mut assignments, id, t0() + Duration::minutes(5)));
    assert_eq!(assignments[0].status, Status::InProgress);
    assert_eq!(assignments[0].started_at, Some(t0() + Duration::minutes(5)));
}

#[test]
fn test_resume_preserves_original_start_time() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    let id = assign(&mut assignments, &task, 1, "Tamer", t0());

    let started = t0() + Duration::minutes(10);
    assert!(start(&mut assignments, id, started));
    assert!(pause(&mut assignments, id));
    assert_eq!(assignments[0].status, Status::Paused);
    // startedAt survives the pause
    assert_eq!(assignments[0].started_at, Some(started));

    // Resume 30 minutes later must not move the start time
    assert!(start(&mut assignments, id, started + Duration::minutes(30)));
    assert_eq!(assignments[0].started_at, Some(started));

    // Completion measures from the original start, not the resume
    let done = started + Duration::minutes(50);
    assert!(complete(&mut assignments, id, "done", done));
    assert_eq!(assignments[0].actual_minutes, Some(50));
}

#[test]
fn test_complete_requires_in_progress() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    let id = assign(&mut assignments, &task, 1, "Tamer", t0());

    // No direct not_started -> completed transition
    assert!(!complete(&mut assignments, id, "nope", t0()));
    assert_eq!(assignments[0].status, Status::NotStarted);

    assert!(start(&mut assignments, id, t0()));
    assert!(pause(&mut assignments, id));
    assert!(!complete(&mut assignments, id, "nope", t0()));
    assert_eq!(assignments[0].status, Status::Paused);
}

#[test]
fn test_complete_sets_timestamps_and_notes() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    let id = assign(&mut assignments, &task, 1, "Tamer", t0());
    start(&mut assignments, id, t0());
    update_notes(&mut assignments, id, "halfway");

    let done = t0() + Duration::minutes(20);
    assert!(complete(&mut assignments, id, "all settled", done));
    let a = &assignments[0];
    assert_eq!(a.status, Status::Completed);
    assert_eq!(a.completed_at, Some(done));
    assert_eq!(a.actual_minutes, Some(20));
    // Completion notes overwrite any prior notes
    assert_eq!(a.notes, "all settled");
}

#[test]
fn test_complete_without_start_is_rejected_but_completed_implies_invariants() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    let id = assign(&mut assignments, &task, 1, "Tamer", t0());
    start(&mut assignments, id, t0());
    complete(&mut assignments, id, "", t0() + Duration::minutes(3));

    for a in &assignments {
        if a.status == Status::Completed {
            assert!(a.completed_at.is_some());
            assert!(a.actual_minutes.unwrap() >= 0);
        }
    }
}

#[test]
fn test_no_transition_out_of_completed() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    let id = assign(&mut assignments, &task, 1, "Tamer", t0());
    start(&mut assignments, id, t0());
    complete(&mut assignments, id, "done", t0() + Duration::minutes(5));

    assert!(!start(&mut assignments, id, t0() + Duration::hours(1)));
    assert!(!pause(&mut assignments, id));
    assert!(!complete(&mut assignments, id, "again", t0() + Duration::hours(1)));
    assert_eq!(assignments[0].status, Status::Completed);
    assert_eq!(assignments[0].actual_minutes, Some(5));
}

#[test]
fn test_pause_changes_no_timestamps() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    let id = assign(&mut assignments, &task, 1, "Tamer", t0());
    start(&mut assignments, id, t0());

    let before = assignments[0].clone();
    assert!(pause(&mut assignments, id));
    assert_eq!(assignments[0].assigned_at, before.assigned_at);
    assert_eq!(assignments[0].started_at, before.started_at);
    assert_eq!(assignments[0].completed_at, before.completed_at);
}

#[test]
fn test_update_notes_at_any_stage() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    let id = assign(&mut assignments, &task, 1, "Tamer", t0());

    assert!(update_notes(&mut assignments, id, "before start"));
    start(&mut assignments, id, t0());
    complete(&mut assignments, id, "done", t0() + Duration::minutes(5));
    assert!(update_notes(&mut assignments, id, "amended afterwards"));
    assert_eq!(assignments[0].notes, "amended afterwards");
    assert_eq!(assignments[0].status, Status::Completed);
}

#[test]
fn test_unknown_id_is_a_noop_for_every_operation() {
    let mut assignments = Vec::new();
    let task = catalog_task(1, 30, Priority::Medium);
    assign(&mut assignments, &task, 1, "Tamer", t0());
    let before = assignments.clone();

    assert!(!start(&mut assignments, 99, t0()));
    assert!(!complete(&mut assignments, 99, "x", t0()));
    assert!(!pause(&mut assignments, 99));
    assert!(!update_notes(&mut assignments, 99, "x"));
    assert_eq!(unassign(&mut assignments, 99, t0().date_naive()), 0);

    assert_eq!(assignments.len(), before.len());
    assert_eq!(assignments[0].status, before[0].status);
    assert_eq!(assignments[0].notes, before[0].notes);
}

#[test]
fn test_unassign_removes_live_records_for_the_day() {
    let mut assignments = Vec::new();
    let task = catalog_task(4, 30, Priority::Medium);
    assign(&mut assignments, &task, 1, "Tamer", t0());
    // Duplicate assignment for the same task and day is permitted
    assign(&mut assignments, &task, 2, "Tamer", t0());
    assert!(is_assigned(&assignments, 4, t0().date_naive()));

    let removed = unassign(&mut assignments, 4, t0().date_naive());
    assert_eq!(removed, 2);
    assert!(assignments.is_empty());
    assert!(!is_assigned(&assignments, 4, t0().date_naive()));
}

#[test]
fn test_unassign_leaves_other_days_alone() {
    let mut assignments = Vec::new();
    let task = catalog_task(4, 30, Priority::Medium);
    assign(&mut assignments, &task, 1, "Tamer", t0());
    assign(&mut assignments, &task, 1, "Tamer", t0() + Duration::days(1));

    let removed = unassign(&mut assignments, 4, t0().date_naive());
    assert_eq!(removed, 1);
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].date, (t0() + Duration::days(1)).date_naive());
}
