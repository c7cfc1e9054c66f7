use chrono::{DateTime, Duration, TimeZone, Utc};

use opsboard::models::{Category, Priority, Status, Task, TaskAssignment};
use opsboard::performance::{compute_metric, performance_level};

fn catalog_task(id: u64, estimated_minutes: u32, priority: Priority) -> Task {
    Task {
        id,
        name: format!("Task {}", id),
        description: String::new(),
        category: Category::Reconciliation,
        estimated_minutes,
        priority,
        is_recurring: true,
    }
}

fn assigned_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

/// A completed assignment started at 10:00 and finished `actual_minutes`
/// later.
fn completed(id: u64, task_id: u64, employee_id: u64, actual_minutes: i64) -> TaskAssignment {
    let started = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    let done = started + Duration::minutes(actual_minutes);
    TaskAssignment {
        id,
        task_id,
        employee_id,
        assigned_by: "Tamer".to_string(),
        date: assigned_at().date_naive(),
        assigned_at: assigned_at(),
        started_at: Some(started),
        completed_at: Some(done),
        status: Status::Completed,
        notes: String::new(),
        actual_minutes: Some(actual_minutes),
        priority: Priority::Medium,
    }
}

fn pending(id: u64, task_id: u64, employee_id: u64) -> TaskAssignment {
    TaskAssignment {
        id,
        task_id,
        employee_id,
        assigned_by: "Tamer".to_string(),
        date: assigned_at().date_naive(),
        assigned_at: assigned_at(),
        started_at: None,
        completed_at: None,
        status: Status::NotStarted,
        notes: String::new(),
        actual_minutes: None,
        priority: Priority::Medium,
    }
}

#[test]
fn test_metric_with_no_assignments_is_neutral() {
    let metric = compute_metric(&[], &[], 1, "Sarah Johnson");
    assert_eq!(metric.total_tasks, 0);
    assert_eq!(metric.completed_tasks, 0);
    assert_eq!(metric.average_completion_time, 0);
    // Efficiency defaults to 100, not 0; quality lands at 50
    assert_eq!(metric.efficiency_score, 100);
    assert_eq!(metric.on_time_rate, 0);
    assert_eq!(metric.quality_score, 50);
}

#[test]
fn test_single_fast_completion_scores_133() {
    // 30-minute estimate completed in 20 minutes: ratio 0.667
    let tasks = vec![catalog_task(1, 30, Priority::Medium)];
    let assignments = vec![completed(1, 1, 1, 20)];

    let metric = compute_metric(&assignments, &tasks, 1, "Sarah Johnson");
    assert_eq!(metric.completed_tasks, 1);
    assert_eq!(metric.average_completion_time, 20);
    assert_eq!(metric.efficiency_score, 133);
    // Finished within the 8-hour medium ceiling
    assert_eq!(metric.on_time_rate, 100);
}

#[test]
fn test_mean_ratio_of_one_scores_100() {
    // Ratios 20/30 = 0.667 and 40/30 = 1.333 average to 1.0
    let tasks = vec![catalog_task(1, 30, Priority::Medium)];
    let assignments = vec![completed(1, 1, 1, 20), completed(2, 1, 1, 40)];

    let metric = compute_metric(&assignments, &tasks, 1, "Sarah Johnson");
    assert_eq!(metric.efficiency_score, 100);
    assert_eq!(metric.average_completion_time, 30);
}

#[test]
fn test_quality_score_is_unclamped() {
    // 30-minute estimate in 10 minutes: ratio 0.333, efficiency 167
    let tasks = vec![catalog_task(1, 30, Priority::Medium)];
    let assignments = vec![completed(1, 1, 1, 10)];

    let metric = compute_metric(&assignments, &tasks, 1, "Sarah Johnson");
    assert_eq!(metric.efficiency_score, 167);
    assert_eq!(metric.on_time_rate, 100);
    // (100 + 167) / 2 rounds to 134; no clamping at 100
    assert_eq!(metric.quality_score, 134);
}

#[test]
fn test_missing_task_is_a_neutral_ratio_and_never_on_time() {
    // No catalog at all: ratio falls back to 1.0 and on-time cannot resolve
    let assignments = vec![completed(1, 42, 1, 20)];

    let metric = compute_metric(&assignments, &[], 1, "Sarah Johnson");
    assert_eq!(metric.efficiency_score, 100);
    assert_eq!(metric.on_time_rate, 0);
    assert_eq!(metric.quality_score, 50);
}

#[test]
fn test_zero_actual_minutes_is_treated_as_unset() {
    // Completed without ever starting: actual_minutes = 0 is neutral
    let tasks = vec![catalog_task(1, 30, Priority::Medium)];
    let mut a = completed(1, 1, 1, 0);
    a.started_at = None;

    let metric = compute_metric(&[a], &tasks, 1, "Sarah Johnson");
    assert_eq!(metric.efficiency_score, 100);
    assert_eq!(metric.on_time_rate, 0);
}

#[test]
fn test_on_time_uses_priority_ceiling_from_assignment_to_completion() {
    let tasks = vec![catalog_task(1, 60, Priority::Urgent)];

    // Urgent ceiling is 4 hours from assignment, not from start
    let mut on_time = completed(1, 1, 1, 30);
    on_time.completed_at = Some(assigned_at() + Duration::hours(3));
    let mut late = completed(2, 1, 1, 30);
    late.completed_at = Some(assigned_at() + Duration::hours(5));

    let metric = compute_metric(&[on_time, late], &tasks, 1, "Sarah Johnson");
    assert_eq!(metric.completed_tasks, 2);
    assert_eq!(metric.on_time_rate, 50);
}

#[test]
fn test_totals_count_all_statuses_but_completed_drives_scores() {
    let tasks = vec![catalog_task(1, 30, Priority::Medium)];
    let assignments = vec![
        completed(1, 1, 1, 30),
        pending(2, 1, 1),
        pending(3, 1, 1),
        // Another employee's work is excluded entirely
        completed(4, 1, 2, 10),
    ];

    let metric = compute_metric(&assignments, &tasks, 1, "Sarah Johnson");
    assert_eq!(metric.total_tasks, 3);
    assert_eq!(metric.completed_tasks, 1);
    assert_eq!(metric.efficiency_score, 100);
}

#[test]
fn test_duplicate_assignments_for_one_task_are_tolerated() {
    let tasks = vec![catalog_task(1, 30, Priority::Medium)];
    // Same task assigned twice on the same day; both count
    let assignments = vec![completed(1, 1, 1, 30), completed(2, 1, 1, 30)];

    let metric = compute_metric(&assignments, &tasks, 1, "Sarah Johnson");
    assert_eq!(metric.total_tasks, 2);
    assert_eq!(metric.completed_tasks, 2);
    assert_eq!(metric.efficiency_score, 100);
}

#[test]
fn test_performance_levels() {
    assert_eq!(performance_level(95), "Excellent");
    assert_eq!(performance_level(90), "Excellent");
    assert_eq!(performance_level(85), "Very Good");
    assert_eq!(performance_level(75), "Good");
    assert_eq!(performance_level(65), "Fair");
    assert_eq!(performance_level(40), "Needs Improvement");
    // Unclamped scores still map to the top band
    assert_eq!(performance_level(134), "Excellent");
}
