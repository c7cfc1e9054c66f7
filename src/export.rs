//! Presentational exports of the archived history: a flat CSV and a JSON
//! snapshot of all four collections.

use serde::Serialize;

use crate::models::{DailyReport, Employee, Task, TaskAssignment};
use crate::timeutil::format_duration;

/// Renders the archived reports as CSV, one row per archived assignment.
///
/// Columns: Date, Employee Name, Task Name, Status, Start Time, End Time,
/// Duration, Notes. Dangling task or employee ids fall back to placeholder
/// names.
pub fn history_csv(reports: &[DailyReport], tasks: &[Task], employees: &[Employee]) -> String {
    let mut rows: Vec<String> = Vec::new();
    rows.push(
        [
            "Date",
            "Employee Name",
            "Task Name",
            "Status",
            "Start Time",
            "End Time",
            "Duration",
            "Notes",
        ]
        .join(","),
    );

    for report in reports {
        for assignment in &report.assignments {
            let task_name = tasks
                .iter()
                .find(|t| t.id == assignment.task_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "Unknown Task".to_string());
            let employee_name = employees
                .iter()
                .find(|e| e.id == assignment.employee_id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| "Unknown Employee".to_string());
            let started = assignment
                .started_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            let completed = assignment
                .completed_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            let duration = assignment
                .actual_minutes
                .filter(|m| *m > 0)
                .map(format_duration)
                .unwrap_or_default();

            let row = [
                report.date.to_string(),
                employee_name,
                task_name,
                assignment.status.to_string(),
                started,
                completed,
                duration,
                assignment.notes.clone(),
            ]
            .map(|field| csv_field(&field))
            .join(",");
            rows.push(row);
        }
    }

    rows.join("\n")
}

/// Quotes a field when it contains a comma, quote or newline.
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    tasks: &'a [Task],
    employees: &'a [Employee],
    assignments: &'a [TaskAssignment],
    reports: &'a [DailyReport],
}

/// Serializes all four collections into one pretty-printed JSON blob.
pub fn snapshot_json(
    tasks: &[Task],
    employees: &[Employee],
    assignments: &[TaskAssignment],
    reports: &[DailyReport],
) -> String {
    serde_json::to_string_pretty(&Snapshot {
        tasks,
        employees,
        assignments,
        reports,
    })
    .unwrap()
}
