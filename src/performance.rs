use crate::models::{PerformanceMetric, Priority, Status, Task, TaskAssignment};

/// Computes the performance metric for one employee from the full assignment
/// history and the task catalog.
///
/// Pure and recomputed on every call. Lookup misses degrade to neutral
/// values: a dangling `task_id` or an unset (or zero) `actual_minutes`
/// contributes a neutral 1.0 efficiency ratio and never counts as on-time.
///
/// With no completed assignments the efficiency score defaults to 100
/// (neutral) while the average completion time and on-time rate default
/// to 0; that asymmetry is intentional.
pub fn compute_metric(
    assignments: &[TaskAssignment],
    tasks: &[Task],
    employee_id: u64,
    employee_name: &str,
) -> PerformanceMetric {
    let employee_assignments: Vec<&TaskAssignment> = assignments
        .iter()
        .filter(|a| a.employee_id == employee_id)
        .collect();
    let completed: Vec<&&TaskAssignment> = employee_assignments
        .iter()
        .filter(|a| a.status == Status::Completed)
        .collect();

    let average_completion_time = if completed.is_empty() {
        0
    } else {
        let total_minutes: i64 = completed.iter().map(|a| a.actual_minutes.unwrap_or(0)).sum();
        (total_minutes as f64 / completed.len() as f64).round() as i64
    };

    // 100 = exactly on estimate, >100 = faster, floored at 0 but uncapped.
    let efficiency_score = if completed.is_empty() {
        100
    } else {
        let ratios: Vec<f64> = completed
            .iter()
            .map(|a| {
                let task = tasks.iter().find(|t| t.id == a.task_id);
                match (task, a.actual_minutes) {
                    (Some(t), Some(m)) if m > 0 && t.estimated_minutes > 0 => {
                        m as f64 / t.estimated_minutes as f64
                    }
                    _ => 1.0,
                }
            })
            .collect();
        let avg_ratio: f64 = ratios.iter().sum::<f64>() / ratios.len() as f64;
        (200.0 - avg_ratio * 100.0).round().max(0.0) as i64
    };

    let on_time_count = completed
        .iter()
        .filter(|a| {
            let (Some(minutes), Some(completed_at)) = (a.actual_minutes, a.completed_at) else {
                return false;
            };
            if minutes <= 0 {
                return false;
            }
            let Some(task) = tasks.iter().find(|t| t.id == a.task_id) else {
                return false;
            };
            let actual_hours =
                (completed_at - a.assigned_at).num_seconds() as f64 / 3600.0;
            let max_hours = match task.priority {
                Priority::Urgent => 4.0,
                Priority::High => 6.0,
                Priority::Medium => 8.0,
                Priority::Low => 12.0,
            };
            actual_hours <= max_hours
        })
        .count();

    let on_time_rate = if completed.is_empty() {
        0
    } else {
        (on_time_count as f64 / completed.len() as f64 * 100.0).round() as i64
    };

    let quality_score = ((on_time_rate + efficiency_score) as f64 / 2.0).round() as i64;

    PerformanceMetric {
        employee_id,
        employee_name: employee_name.to_string(),
        total_tasks: employee_assignments.len(),
        completed_tasks: completed.len(),
        average_completion_time,
        efficiency_score,
        on_time_rate,
        quality_score,
    }
}

/// Human-readable label for a quality score, used by listings.
pub fn performance_level(score: i64) -> &'static str {
    if score >= 90 {
        "Excellent"
    } else if score >= 80 {
        "Very Good"
    } else if score >= 70 {
        "Good"
    } else if score >= 60 {
        "Fair"
    } else {
        "Needs Improvement"
    }
}
