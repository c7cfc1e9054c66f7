use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use opsboard::archive::build_report;
use opsboard::export::{history_csv, snapshot_json};
use opsboard::models::{Category, Employee, Priority, Status, Task, TaskAssignment};

fn catalog_task(id: u64) -> Task {
    Task {
        id,
        name: format!("Task {}", id),
        description: String::new(),
        category: Category::Reconciliation,
        estimated_minutes: 30,
        priority: Priority::Medium,
        is_recurring: true,
    }
}

fn employee(id: u64, name: &str) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        role: "Analyst".to_string(),
        is_active: true,
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

fn completed(id: u64, task_id: u64, employee_id: u64, date: NaiveDate, notes: &str) -> TaskAssignment {
    TaskAssignment {
        id,
        task_id,
        employee_id,
        assigned_by: "Tamer".to_string(),
        date,
        assigned_at: morning(),
        started_at: Some(morning() + Duration::minutes(30)),
        completed_at: Some(morning() + Duration::hours(2)),
        status: Status::Completed,
        notes: notes.to_string(),
        actual_minutes: Some(90),
        priority: Priority::Medium,
    }
}

#[test]
fn test_csv_has_header_and_one_row_per_archived_assignment() {
    let tasks = vec![catalog_task(1), catalog_task(2)];
    let employees = vec![employee(1, "Sarah Johnson"), employee(2, "Michael Chen")];
    let assignments = vec![
        completed(1, 1, 1, day(), "all clear"),
        completed(2, 2, 2, day(), ""),
        completed(3, 1, 1, day() + Duration::days(1), ""),
    ];
    let reports = vec![
        build_report(day() + Duration::days(1), &assignments, &tasks, &employees, morning())
            .unwrap(),
        build_report(day(), &assignments, &tasks, &employees, morning()).unwrap(),
    ];

    let csv = history_csv(&reports, &tasks, &employees);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "Date,Employee Name,Task Name,Status,Start Time,End Time,Duration,Notes"
    );
    // Newest report first, then the older day's two rows in archive order
    assert!(lines[1].starts_with("2024-06-02,"));
    assert_eq!(
        lines[2],
        "2024-06-01,Sarah Johnson,Task 1,completed,2024-06-01 09:30,2024-06-01 11:00,1h 30m,all clear"
    );
    assert!(lines[3].starts_with("2024-06-01,Michael Chen,Task 2,"));
}

#[test]
fn test_csv_quotes_fields_with_commas_and_quotes() {
    let tasks = vec![catalog_task(1)];
    let employees = vec![employee(1, "Sarah Johnson")];
    let assignments = vec![
        completed(1, 1, 1, day(), "short on cash, recount drawer"),
        completed(2, 1, 1, day(), r#"guest said "done""#),
    ];
    let report = build_report(day(), &assignments, &tasks, &employees, morning()).unwrap();

    let csv = history_csv(&[report], &tasks, &employees);
    assert!(csv.contains("\"short on cash, recount drawer\""));
    assert!(csv.contains("\"guest said \"\"done\"\"\""));
}

#[test]
fn test_csv_falls_back_on_dangling_ids() {
    let tasks = vec![catalog_task(1)];
    let employees = vec![employee(1, "Sarah Johnson")];
    let assignments = vec![completed(1, 1, 1, day(), "")];
    let report = build_report(day(), &assignments, &tasks, &employees, morning()).unwrap();

    // Catalog and roster entries removed after the day was archived
    let csv = history_csv(&[report], &[], &[]);
    assert!(csv.contains("Unknown Task"));
    assert!(csv.contains("Unknown Employee"));
}

#[test]
fn test_snapshot_holds_all_four_collections() {
    let tasks = vec![catalog_task(1), catalog_task(2)];
    let employees = vec![employee(1, "Sarah Johnson")];
    let assignments = vec![completed(1, 1, 1, day(), "")];
    let reports =
        vec![build_report(day(), &assignments, &tasks, &employees, morning()).unwrap()];

    let json = snapshot_json(&tasks, &employees, &assignments, &reports);
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(value["employees"].as_array().unwrap().len(), 1);
    assert_eq!(value["assignments"].as_array().unwrap().len(), 1);
    assert_eq!(value["reports"].as_array().unwrap().len(), 1);
    assert_eq!(value["reports"][0]["summary"]["completed_tasks"], 1);
}
