//! State-machine transitions for task assignments.
//!
//! All functions take the assignment collection and an explicit `now` so
//! callers (and tests) control the clock. Operating on a missing id or an
//! invalid source state leaves the collection unchanged and reports it
//! through the return value; nothing here panics or errors.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Status, Task, TaskAssignment};
use crate::timeutil::minutes_between;

/// Creates a new assignment for `task` in `not_started`, returning its id.
///
/// The task's priority is copied onto the record so later overdue checks
/// survive catalog deletions. The assignment belongs to `now`'s UTC day.
pub fn assign(
    assignments: &mut Vec<TaskAssignment>,
    task: &Task,
    employee_id: u64,
    assigned_by: &str,
    now: DateTime<Utc>,
) -> u64 {
    let next_id = assignments.iter().map(|a| a.id).max().unwrap_or(0) + 1;
    assignments.push(TaskAssignment {
        id: next_id,
        task_id: task.id,
        employee_id,
        assigned_by: assigned_by.to_string(),
        date: now.date_naive(),
        assigned_at: now,
        started_at: None,
        completed_at: None,
        status: Status::NotStarted,
        notes: String::new(),
        actual_minutes: None,
        priority: task.priority,
    });
    next_id
}

/// Starts (or resumes) an assignment: `not_started | paused -> in_progress`.
///
/// `started_at` is only set if still unset. Resuming after a pause keeps the
/// original start time, otherwise elapsed-time tracking would break.
pub fn start(assignments: &mut [TaskAssignment], id: u64, now: DateTime<Utc>) -> bool {
    if let Some(a) = assignments.iter_mut().find(|a| a.id == id) {
        if a.status != Status::NotStarted && a.status != Status::Paused {
            return false;
        }
        a.status = Status::InProgress;
        if a.started_at.is_none() {
            a.started_at = Some(now);
        }
        true
    } else {
        false
    }
}

/// Completes an assignment: `in_progress -> completed`.
///
/// Sets `completed_at`, replaces the notes, and derives `actual_minutes`
/// from the original start time (0 if the assignment was never started).
pub fn complete(
    assignments: &mut [TaskAssignment],
    id: u64,
    notes: &str,
    now: DateTime<Utc>,
) -> bool {
    if let Some(a) = assignments.iter_mut().find(|a| a.id == id) {
        if a.status != Status::InProgress {
            return false;
        }
        a.status = Status::Completed;
        a.completed_at = Some(now);
        a.actual_minutes = Some(match a.started_at {
            Some(started) => minutes_between(started, now),
            None => 0,
        });
        a.notes = notes.to_string();
        true
    } else {
        false
    }
}

/// Pauses an assignment: `in_progress -> paused`. No timestamp changes.
pub fn pause(assignments: &mut [TaskAssignment], id: u64) -> bool {
    if let Some(a) = assignments.iter_mut().find(|a| a.id == id) {
        if a.status != Status::InProgress {
            return false;
        }
        a.status = Status::Paused;
        true
    } else {
        false
    }
}

/// Replaces the notes on an assignment at any lifecycle stage. Status and
/// timestamps are untouched.
pub fn update_notes(assignments: &mut [TaskAssignment], id: u64, notes: &str) -> bool {
    if let Some(a) = assignments.iter_mut().find(|a| a.id == id) {
        a.notes = notes.to_string();
        true
    } else {
        false
    }
}

/// Removes every assignment of `task_id` on `date` from the live set,
/// returning how many were removed. Leader-only, used for reassignment.
pub fn unassign(assignments: &mut Vec<TaskAssignment>, task_id: u64, date: NaiveDate) -> usize {
    let len_before = assignments.len();
    assignments.retain(|a| !(a.task_id == task_id && a.date == date));
    len_before - assignments.len()
}

/// Whether `task_id` already has an assignment for `date`. Candidate
/// listings use this to hide already-assigned tasks; the store itself stays
/// permissive about duplicates.
pub fn is_assigned(assignments: &[TaskAssignment], task_id: u64, date: NaiveDate) -> bool {
    assignments
        .iter()
        .any(|a| a.task_id == task_id && a.date == date)
}
