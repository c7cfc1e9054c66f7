//! Daily archival: freezing a day's assignments and roster metrics into a
//! report.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{DailyReport, DailySummary, Employee, Status, Task, TaskAssignment};
use crate::performance::compute_metric;
use crate::timeutil::is_overdue;

/// Builds the report for `date` from the live assignments.
///
/// Returns `None` when the day has no assignments ("nothing to archive" is
/// the caller's message to surface, not an error). The summary covers only
/// the day's assignments; the employee metrics cover the full history for
/// every employee in the roster, active or not.
pub fn build_report(
    date: NaiveDate,
    assignments: &[TaskAssignment],
    tasks: &[Task],
    employees: &[Employee],
    now: DateTime<Utc>,
) -> Option<DailyReport> {
    let todays: Vec<TaskAssignment> = assignments
        .iter()
        .filter(|a| a.date == date)
        .cloned()
        .collect();
    if todays.is_empty() {
        return None;
    }

    let completed_tasks = todays
        .iter()
        .filter(|a| a.status == Status::Completed)
        .count();
    let overdue_tasks = todays.iter().filter(|a| is_overdue(a, now)).count();

    let timed: Vec<i64> = todays
        .iter()
        .filter_map(|a| a.actual_minutes)
        .filter(|m| *m > 0)
        .collect();
    let average_completion_time = if timed.is_empty() {
        0
    } else {
        (timed.iter().sum::<i64>() as f64 / timed.len() as f64).round() as i64
    };

    let employee_metrics = employees
        .iter()
        .map(|e| compute_metric(assignments, tasks, e.id, &e.name))
        .collect();

    Some(DailyReport {
        date,
        summary: DailySummary {
            total_tasks: todays.len(),
            completed_tasks,
            overdue_tasks,
            average_completion_time,
        },
        assignments: todays,
        employee_metrics,
    })
}

/// Inserts or replaces the report for its date, keeping the collection
/// sorted descending by date. Re-archiving a day overwrites the prior
/// report.
pub fn upsert_report(reports: &mut Vec<DailyReport>, report: DailyReport) {
    if let Some(existing) = reports.iter_mut().find(|r| r.date == report.date) {
        *existing = report;
    } else {
        reports.push(report);
        reports.sort_by(|a, b| b.date.cmp(&a.date));
    }
}
