//! The store owns the four persistent collections and exposes the lifecycle
//! and archival operations as its only mutators. Views (CLI listings, TUI)
//! read from it and dispatch events into it.

use chrono::{NaiveDate, Utc};

use crate::archive::{build_report, upsert_report};
use crate::lifecycle;
use crate::models::{DailyReport, Employee, PerformanceMetric, Task, TaskAssignment};
use crate::performance::compute_metric;
use crate::storage;

/// In-memory view of the database: task catalog, employee roster, live
/// assignments and archived daily reports.
pub struct Store {
    pub tasks: Vec<Task>,
    pub employees: Vec<Employee>,
    pub assignments: Vec<TaskAssignment>,
    pub reports: Vec<DailyReport>,
}

impl Store {
    /// Loads all four collections from storage. Missing files load as empty
    /// collections.
    pub fn load() -> Store {
        Store {
            tasks: storage::load_catalog(),
            employees: storage::load_roster(),
            assignments: storage::load_assignments(),
            reports: storage::load_reports(),
        }
    }

    /// Persists all four collections. Each write is fire-and-forget from the
    /// caller's point of view; the first failing file aborts the rest.
    pub fn save(&self) -> std::io::Result<()> {
        storage::save_catalog(&self.tasks)?;
        storage::save_roster(&self.employees)?;
        storage::save_assignments(&self.assignments)?;
        storage::save_reports(&self.reports)
    }

    /// Looks up a catalog task.
    pub fn task(&self, task_id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Looks up an employee.
    pub fn employee(&self, employee_id: u64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == employee_id)
    }

    /// Creates a new `not_started` assignment for today and returns its id.
    /// Fails (returns `None`) only when the task id does not resolve.
    pub fn assign(&mut self, task_id: u64, employee_id: u64, assigned_by: &str) -> Option<u64> {
        let task = self.tasks.iter().find(|t| t.id == task_id)?.clone();
        Some(lifecycle::assign(
            &mut self.assignments,
            &task,
            employee_id,
            assigned_by,
            Utc::now(),
        ))
    }

    /// Starts or resumes an assignment. `false` when the id is unknown or
    /// the assignment is not in a startable state.
    pub fn start(&mut self, assignment_id: u64) -> bool {
        lifecycle::start(&mut self.assignments, assignment_id, Utc::now())
    }

    /// Completes an in-progress assignment, storing the notes.
    pub fn complete(&mut self, assignment_id: u64, notes: &str) -> bool {
        lifecycle::complete(&mut self.assignments, assignment_id, notes, Utc::now())
    }

    /// Pauses an in-progress assignment.
    pub fn pause(&mut self, assignment_id: u64) -> bool {
        lifecycle::pause(&mut self.assignments, assignment_id)
    }

    /// Replaces the notes on an assignment at any stage.
    pub fn update_notes(&mut self, assignment_id: u64, notes: &str) -> bool {
        lifecycle::update_notes(&mut self.assignments, assignment_id, notes)
    }

    /// Removes a task's assignments for `date` from the live set, returning
    /// how many were removed.
    pub fn unassign(&mut self, task_id: u64, date: NaiveDate) -> usize {
        lifecycle::unassign(&mut self.assignments, task_id, date)
    }

    /// Archives `date`: freezes its assignments and the roster metrics into
    /// a report and upserts it into the report collection. `false` when the
    /// day has nothing to archive.
    pub fn archive_day(&mut self, date: NaiveDate) -> bool {
        match build_report(
            date,
            &self.assignments,
            &self.tasks,
            &self.employees,
            Utc::now(),
        ) {
            Some(report) => {
                upsert_report(&mut self.reports, report);
                true
            }
            None => false,
        }
    }

    /// The live assignments belonging to `date`.
    pub fn assignments_for(&self, date: NaiveDate) -> Vec<&TaskAssignment> {
        self.assignments.iter().filter(|a| a.date == date).collect()
    }

    /// Catalog tasks not yet assigned on `date`, the candidate list for the
    /// assign flow. The store itself stays permissive about duplicates.
    pub fn available_tasks(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| !lifecycle::is_assigned(&self.assignments, t.id, date))
            .collect()
    }

    /// Active employees, the candidate list for the assign flow.
    pub fn active_employees(&self) -> Vec<&Employee> {
        self.employees.iter().filter(|e| e.is_active).collect()
    }

    /// Full-history metric for one employee.
    pub fn metric_for(&self, employee: &Employee) -> PerformanceMetric {
        compute_metric(&self.assignments, &self.tasks, employee.id, &employee.name)
    }

    /// Full-history metrics for the whole roster.
    pub fn metrics(&self) -> Vec<PerformanceMetric> {
        self.employees.iter().map(|e| self.metric_for(e)).collect()
    }
}
