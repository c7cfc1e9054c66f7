use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task category within the operations workflow.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Reservations,
    Payments,
    Reconciliation,
    Tracking,
    Admin,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Reservations => "reservations",
            Category::Payments => "payments",
            Category::Reconciliation => "reconciliation",
            Category::Tracking => "tracking",
            Category::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reservations" => Ok(Category::Reservations),
            "payments" => Ok(Category::Payments),
            "reconciliation" => Ok(Category::Reconciliation),
            "tracking" => Ok(Category::Tracking),
            "admin" => Ok(Category::Admin),
            other => Err(format!(
                "unknown category '{}' (expected reservations, payments, reconciliation, tracking or admin)",
                other
            )),
        }
    }
}

/// Task priority. Drives the overdue threshold and the on-time ceiling.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!(
                "unknown priority '{}' (expected low, medium, high or urgent)",
                other
            )),
        }
    }
}

/// Lifecycle state of an assignment.
///
/// `NotStarted -> InProgress -> Completed`, with `InProgress <-> Paused` as a
/// side loop. There is no transition out of `Completed`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
    Paused,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::NotStarted => "not_started",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::Paused => "paused",
        };
        write!(f, "{}", s)
    }
}

/// A catalog entry managed by the team leader.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: u64,
    /// Short task name shown in listings.
    pub name: String,
    /// Longer description of what the task involves.
    #[serde(default)]
    pub description: String,
    /// Workflow category.
    pub category: Category,
    /// Estimated duration in minutes.
    pub estimated_minutes: u32,
    /// Priority, copied onto assignments at creation time.
    #[serde(default)]
    pub priority: Priority,
    /// Whether the task recurs every day.
    #[serde(default)]
    pub is_recurring: bool,
}

/// A member of the operations team.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Free-text job title.
    pub role: String,
    /// Inactive employees keep their history but are excluded from
    /// new-assignment candidates.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// A task bound to an employee for one calendar day, carrying lifecycle
/// status and timing.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TaskAssignment {
    /// Unique identifier for the assignment.
    pub id: u64,
    /// The catalog task. May dangle after a catalog deletion; consumers
    /// must tolerate that.
    pub task_id: u64,
    /// The assigned employee.
    pub employee_id: u64,
    /// Name of whoever created the assignment.
    #[serde(default)]
    pub assigned_by: String,
    /// Calendar day the assignment belongs to.
    pub date: NaiveDate,
    /// Set at creation, never null.
    pub assigned_at: DateTime<Utc>,
    /// Set on the first start; resuming from pause does not reset it.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// Set on completion.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Lifecycle state.
    pub status: Status,
    /// Free text, mutable at any lifecycle stage.
    #[serde(default)]
    pub notes: String,
    /// Minutes between start and completion, set on completion.
    #[serde(default)]
    pub actual_minutes: Option<i64>,
    /// Copied from the task at assignment time so the overdue check needs no
    /// catalog lookup.
    #[serde(default)]
    pub priority: Priority,
}

/// Per-employee scores derived from the assignment history.
///
/// Never persisted on its own; only frozen into `DailyReport` snapshots.
/// `efficiency_score` and `quality_score` are deliberately unclamped and can
/// exceed 100 for faster-than-estimate work.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PerformanceMetric {
    pub employee_id: u64,
    pub employee_name: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Mean actual minutes over completed assignments, rounded.
    pub average_completion_time: i64,
    /// `round(200 - 100 * mean(actual/estimated))`, floored at 0.
    pub efficiency_score: i64,
    /// Percentage of completed assignments finished within the
    /// priority-dependent ceiling.
    pub on_time_rate: i64,
    /// Rounded mean of on-time rate and efficiency score.
    pub quality_score: i64,
}

/// Aggregate counters for one archived day.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DailySummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub average_completion_time: i64,
}

/// Frozen snapshot of one day, produced by the archive operation.
///
/// The assignment copies are decoupled from the live collection; mutating a
/// live record after archiving does not touch the report.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub assignments: Vec<TaskAssignment>,
    pub summary: DailySummary,
    /// Roster metrics computed over the full history available at archive
    /// time, not scoped to the day.
    pub employee_metrics: Vec<PerformanceMetric>,
}
