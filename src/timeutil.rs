use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Priority, Status, TaskAssignment};

/// Formats a timestamp as its UTC calendar-day key (`YYYY-MM-DD`).
pub fn format_date(d: DateTime<Utc>) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Formats a timestamp as a zero-padded 24-hour clock time (`HH:MM`), UTC.
pub fn format_time(d: DateTime<Utc>) -> String {
    d.format("%H:%M").to_string()
}

/// Renders a duration as `"Xh Ym"`, or just `"Ym"` under an hour.
///
/// Callers must not pass negative values.
pub fn format_duration(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let mins = total_minutes % 60;
    if hours == 0 {
        format!("{}m", mins)
    } else {
        format!("{}h {}m", hours, mins)
    }
}

/// Whole minutes between two instants, rounded to nearest.
///
/// Negative when `end` precedes `start`; callers are expected to avoid that.
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    ((end - start).num_seconds() as f64 / 60.0).round() as i64
}

/// Whether `date` is today's UTC calendar day.
pub fn is_today(date: NaiveDate) -> bool {
    date == Utc::now().date_naive()
}

/// Whether an assignment has sat unfinished past its overdue threshold.
///
/// Completed and paused assignments are never overdue. Otherwise the
/// threshold on wall-clock time since `assigned_at` is 8 hours for urgent
/// priority and 12 hours for everything else, strictly greater-than: an
/// assignment exactly at the threshold is not yet overdue.
pub fn is_overdue(assignment: &TaskAssignment, now: DateTime<Utc>) -> bool {
    if assignment.status == Status::Completed || assignment.status == Status::Paused {
        return false;
    }
    let hours_elapsed = (now - assignment.assigned_at).num_seconds() as f64 / 3600.0;
    let overdue_hours = if assignment.priority == Priority::Urgent {
        8.0
    } else {
        12.0
    };
    hours_elapsed > overdue_hours
}
