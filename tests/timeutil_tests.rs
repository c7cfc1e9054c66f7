use chrono::{Duration, TimeZone, Utc};

use opsboard::models::{Priority, Status, TaskAssignment};
use opsboard::timeutil::{format_date, format_duration, format_time, is_overdue, minutes_between};

fn assignment(priority: Priority, status: Status) -> TaskAssignment {
    let assigned = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    TaskAssignment {
        id: 1,
        task_id: 1,
        employee_id: 1,
        assigned_by: "Tamer".to_string(),
        date: assigned.date_naive(),
        assigned_at: assigned,
        started_at: None,
        completed_at: None,
        status,
        notes: String::new(),
        actual_minutes: None,
        priority,
    }
}

#[test]
fn test_format_date_and_time() {
    let d = Utc.with_ymd_and_hms(2024, 6, 1, 7, 5, 30).unwrap();
    assert_eq!(format_date(d), "2024-06-01");
    assert_eq!(format_time(d), "07:05");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0m");
    assert_eq!(format_duration(45), "45m");
    assert_eq!(format_duration(60), "1h 0m");
    assert_eq!(format_duration(95), "1h 35m");
    assert_eq!(format_duration(150), "2h 30m");
}

#[test]
fn test_minutes_between_rounds_to_nearest() {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    assert_eq!(minutes_between(start, start + Duration::minutes(20)), 20);
    assert_eq!(minutes_between(start, start + Duration::seconds(89)), 1);
    assert_eq!(minutes_between(start, start + Duration::seconds(91)), 2);
    // Negative when end precedes start; callers avoid this
    assert_eq!(minutes_between(start, start - Duration::minutes(3)), -3);
}

#[test]
fn test_overdue_thresholds_are_strictly_greater_than() {
    let a = assignment(Priority::Urgent, Status::NotStarted);
    let assigned = a.assigned_at;

    // Exactly 8 hours is not yet overdue; 9 hours is
    assert!(!is_overdue(&a, assigned + Duration::hours(8)));
    assert!(is_overdue(&a, assigned + Duration::hours(9)));

    // Non-urgent priorities get 12 hours
    let medium = assignment(Priority::Medium, Status::InProgress);
    assert!(!is_overdue(&medium, assigned + Duration::hours(9)));
    assert!(!is_overdue(&medium, assigned + Duration::hours(12)));
    assert!(is_overdue(&medium, assigned + Duration::hours(13)));
}

#[test]
fn test_completed_and_paused_are_never_overdue() {
    let assigned = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let completed = assignment(Priority::Urgent, Status::Completed);
    let paused = assignment(Priority::Urgent, Status::Paused);
    assert!(!is_overdue(&completed, assigned + Duration::days(10)));
    assert!(!is_overdue(&paused, assigned + Duration::days(10)));
}
