use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::defaults::{default_catalog, default_roster};
use crate::export::{history_csv, snapshot_json};
use crate::models::{Category, Employee, Priority, Status, Task};
use crate::performance::performance_level;
use crate::storage::delete_database;
use crate::store::Store;
use crate::timeutil::{format_duration, format_time, is_overdue};

fn parse_date(s: &str, silent: bool) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            if !silent {
                eprintln!("Invalid date '{}': {}. Use YYYY-MM-DD.", s, e);
            }
            None
        }
    }
}

fn parse_category(s: &str, silent: bool) -> Option<Category> {
    match s.parse() {
        Ok(c) => Some(c),
        Err(e) => {
            if !silent {
                eprintln!("{}", e);
            }
            None
        }
    }
}

fn parse_priority(s: &str, silent: bool) -> Option<Priority> {
    match s.parse() {
        Ok(p) => Some(p),
        Err(e) => {
            if !silent {
                eprintln!("{}", e);
            }
            None
        }
    }
}

fn save_store(store: &Store, silent: bool) -> bool {
    if let Err(e) = store.save() {
        if !silent {
            eprintln!("Failed to save database: {}", e);
        }
        false
    } else {
        true
    }
}

/// Writes the default hospitality catalog and roster. Refuses to overwrite
/// existing data unless `force` is set.
pub fn cmd_seed(force: bool, silent: bool) {
    let mut store = Store::load();
    if (!store.tasks.is_empty() || !store.employees.is_empty()) && !force {
        if !silent {
            eprintln!("Catalog or roster already populated. Use --force to overwrite.");
        }
        return;
    }
    store.tasks = default_catalog();
    store.employees = default_roster();
    if save_store(&store, silent) && !silent {
        println!(
            "Seeded {} tasks and {} employees.",
            store.tasks.len(),
            store.employees.len()
        );
    }
}

/// Adds a task to the catalog.
pub fn cmd_task_add(
    name: String,
    description: Option<String>,
    category: String,
    minutes: u32,
    priority: String,
    recurring: bool,
    silent: bool,
) {
    let Some(category) = parse_category(&category, silent) else { return };
    let Some(priority) = parse_priority(&priority, silent) else { return };
    if minutes == 0 {
        if !silent {
            eprintln!("Estimated minutes must be positive.");
        }
        return;
    }

    let mut store = Store::load();
    let next_id = store.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    store.tasks.push(Task {
        id: next_id,
        name,
        description: description.unwrap_or_default(),
        category,
        estimated_minutes: minutes,
        priority,
        is_recurring: recurring,
    });
    if save_store(&store, silent) && !silent {
        println!("Task added (id = {})", next_id);
    }
}

/// Lists the task catalog.
pub fn cmd_task_list() {
    let store = Store::load();
    if store.tasks.is_empty() {
        println!("No tasks in the catalog. Run `opsboard seed` to load the defaults.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Est").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Recurring").add_attribute(Attribute::Bold),
        ]);

    for t in &store.tasks {
        let priority_color = match t.priority {
            Priority::Urgent => Color::Red,
            Priority::High => Color::Yellow,
            Priority::Medium => Color::Reset,
            Priority::Low => Color::Grey,
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.name),
            Cell::new(t.category),
            Cell::new(format_duration(t.estimated_minutes as i64)),
            Cell::new(t.priority).fg(priority_color),
            Cell::new(if t.is_recurring { "yes" } else { "no" }),
        ]);
    }
    println!("{table}");
}

/// Edits a catalog task's details.
pub fn cmd_task_edit(
    id: u64,
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    minutes: Option<u32>,
    priority: Option<String>,
    recurring: Option<bool>,
    silent: bool,
) {
    let mut store = Store::load();
    let Some(t) = store.tasks.iter_mut().find(|t| t.id == id) else {
        if !silent {
            eprintln!("Task {} not found.", id);
        }
        return;
    };
    if let Some(n) = name {
        t.name = n;
    }
    if let Some(d) = description {
        t.description = d;
    }
    if let Some(c) = category {
        match parse_category(&c, silent) {
            Some(c) => t.category = c,
            None => return,
        }
    }
    if let Some(m) = minutes {
        if m == 0 {
            if !silent {
                eprintln!("Estimated minutes must be positive.");
            }
            return;
        }
        t.estimated_minutes = m;
    }
    if let Some(p) = priority {
        match parse_priority(&p, silent) {
            Some(p) => t.priority = p,
            None => return,
        }
    }
    if let Some(r) = recurring {
        t.is_recurring = r;
    }
    if save_store(&store, silent) && !silent {
        println!("Task {} updated.", id);
    }
}

/// Removes a task from the catalog. Historical assignments keep the dangling
/// task id; the performance engine treats them as neutral.
pub fn cmd_task_remove(id: u64, silent: bool) {
    let mut store = Store::load();
    let len_before = store.tasks.len();
    store.tasks.retain(|t| t.id != id);
    if store.tasks.len() == len_before {
        if !silent {
            eprintln!("Task {} not found.", id);
        }
        return;
    }
    if save_store(&store, silent) && !silent {
        println!("Task {} removed from the catalog.", id);
    }
}

/// Adds an employee to the roster.
pub fn cmd_employee_add(name: String, role: String, silent: bool) {
    let mut store = Store::load();
    let next_id = store.employees.iter().map(|e| e.id).max().unwrap_or(0) + 1;
    store.employees.push(Employee {
        id: next_id,
        name,
        role,
        is_active: true,
    });
    if save_store(&store, silent) && !silent {
        println!("Employee added (id = {})", next_id);
    }
}

/// Lists the roster. Hides inactive employees unless `all` is set.
pub fn cmd_employee_list(all: bool) {
    let store = Store::load();
    let employees: Vec<&Employee> = if all {
        store.employees.iter().collect()
    } else {
        store.active_employees()
    };
    if employees.is_empty() {
        println!("No employees found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["ID", "Name", "Role", "Active"]);
    for e in employees {
        table.add_row(vec![
            Cell::new(e.id),
            Cell::new(&e.name),
            Cell::new(&e.role),
            Cell::new(if e.is_active { "yes" } else { "no" })
                .fg(if e.is_active { Color::Green } else { Color::Grey }),
        ]);
    }
    println!("{table}");
}

/// Activates or deactivates an employee. Deactivation keeps history and only
/// removes the employee from assignment candidates.
pub fn cmd_employee_set_active(id: u64, active: bool, silent: bool) {
    let mut store = Store::load();
    let Some(e) = store.employees.iter_mut().find(|e| e.id == id) else {
        if !silent {
            eprintln!("Employee {} not found.", id);
        }
        return;
    };
    e.is_active = active;
    if save_store(&store, silent) && !silent {
        println!(
            "Employee {} {}.",
            id,
            if active { "activated" } else { "deactivated" }
        );
    }
}

/// Assigns a catalog task to an employee for today.
pub fn cmd_assign(task_id: u64, employee_id: u64, assigned_by: Option<String>, silent: bool) {
    let mut store = Store::load();
    if store.task(task_id).is_none() {
        if !silent {
            eprintln!("Task {} not found.", task_id);
        }
        return;
    }
    let Some(employee) = store.employee(employee_id) else {
        if !silent {
            eprintln!("Employee {} not found.", employee_id);
        }
        return;
    };
    if !employee.is_active && !silent {
        eprintln!("Warning: employee {} is inactive.", employee_id);
    }

    let today = Utc::now().date_naive();
    if !silent && !store.available_tasks(today).iter().any(|t| t.id == task_id) {
        eprintln!("Warning: task {} is already assigned for {}.", task_id, today);
    }

    let by = assigned_by.unwrap_or_else(|| "Team Leader".to_string());
    if let Some(id) = store.assign(task_id, employee_id, &by) {
        if save_store(&store, silent) && !silent {
            println!("Assignment created (id = {})", id);
        }
    }
}

/// Shows the assignment board for a day (today by default).
pub fn cmd_board(date: Option<String>) {
    let date = match date {
        Some(s) => match parse_date(&s, false) {
            Some(d) => d,
            None => return,
        },
        None => Utc::now().date_naive(),
    };

    let store = Store::load();
    let todays = store.assignments_for(date);
    if todays.is_empty() {
        println!("No assignments for {}.", date);
        return;
    }

    let now = Utc::now();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Employee").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Assigned").add_attribute(Attribute::Bold),
            Cell::new("Started").add_attribute(Attribute::Bold),
            Cell::new("Actual").add_attribute(Attribute::Bold),
            Cell::new("Notes").add_attribute(Attribute::Bold),
        ]);

    for a in todays {
        let task_name = store
            .task(a.task_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| "Unknown Task".to_string());
        let employee_name = store
            .employee(a.employee_id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "Unknown Employee".to_string());

        let overdue = is_overdue(a, now);
        let status_color = if overdue {
            Color::Red
        } else {
            match a.status {
                Status::Completed => Color::Green,
                Status::InProgress => Color::Yellow,
                Status::Paused => Color::Grey,
                Status::NotStarted => Color::Reset,
            }
        };
        let status_text = if overdue {
            format!("{} (overdue)", a.status)
        } else {
            a.status.to_string()
        };

        table.add_row(vec![
            Cell::new(a.id),
            Cell::new(task_name),
            Cell::new(employee_name),
            Cell::new(a.priority),
            Cell::new(status_text).fg(status_color),
            Cell::new(format_time(a.assigned_at)),
            Cell::new(a.started_at.map(format_time).unwrap_or_default()),
            Cell::new(
                a.actual_minutes
                    .map(format_duration)
                    .unwrap_or_default(),
            ),
            Cell::new(&a.notes),
        ]);
    }
    println!("{table}");
}

/// Starts (or resumes) an assignment.
pub fn cmd_start(id: u64, silent: bool) {
    let mut store = Store::load();
    if store.start(id) {
        if save_store(&store, silent) && !silent {
            println!("Assignment {} started.", id);
        }
    } else if !silent {
        eprintln!("Assignment {} not found or not startable.", id);
    }
}

/// Completes an in-progress assignment.
pub fn cmd_complete(id: u64, notes: Option<String>, silent: bool) {
    let mut store = Store::load();
    if store.complete(id, notes.as_deref().unwrap_or("")) {
        if save_store(&store, silent) && !silent {
            println!("Assignment {} completed.", id);
        }
    } else if !silent {
        eprintln!("Assignment {} not found or not in progress.", id);
    }
}

/// Pauses an in-progress assignment.
pub fn cmd_pause(id: u64, silent: bool) {
    let mut store = Store::load();
    if store.pause(id) {
        if save_store(&store, silent) && !silent {
            println!("Assignment {} paused.", id);
        }
    } else if !silent {
        eprintln!("Assignment {} not found or not in progress.", id);
    }
}

/// Replaces the notes on an assignment.
pub fn cmd_notes(id: u64, notes: String, silent: bool) {
    let mut store = Store::load();
    if store.update_notes(id, &notes) {
        if save_store(&store, silent) && !silent {
            println!("Assignment {} notes updated.", id);
        }
    } else if !silent {
        eprintln!("Assignment {} not found.", id);
    }
}

/// Removes a task's assignment for a day (today by default) from the live
/// set, freeing the task for reassignment.
pub fn cmd_unassign(task_id: u64, date: Option<String>, silent: bool) {
    let date = match date {
        Some(s) => match parse_date(&s, silent) {
            Some(d) => d,
            None => return,
        },
        None => Utc::now().date_naive(),
    };
    let mut store = Store::load();
    let removed = store.unassign(task_id, date);
    if removed == 0 {
        if !silent {
            eprintln!("No assignment of task {} on {}.", task_id, date);
        }
        return;
    }
    if save_store(&store, silent) && !silent {
        println!("Removed {} assignment(s) of task {} on {}.", removed, task_id, date);
    }
}

/// Shows the performance table for the roster (or one employee).
pub fn cmd_performance(employee_id: Option<u64>) {
    let store = Store::load();
    let employees: Vec<&Employee> = match employee_id {
        Some(id) => match store.employee(id) {
            Some(e) => vec![e],
            None => {
                eprintln!("Employee {} not found.", id);
                return;
            }
        },
        None => store.employees.iter().collect(),
    };
    if employees.is_empty() {
        println!("No employees found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Employee").add_attribute(Attribute::Bold),
            Cell::new("Tasks").add_attribute(Attribute::Bold),
            Cell::new("Done").add_attribute(Attribute::Bold),
            Cell::new("Avg Time").add_attribute(Attribute::Bold),
            Cell::new("Efficiency").add_attribute(Attribute::Bold),
            Cell::new("On-Time").add_attribute(Attribute::Bold),
            Cell::new("Quality").add_attribute(Attribute::Bold),
            Cell::new("Level").add_attribute(Attribute::Bold),
        ]);

    for e in employees {
        let m = store.metric_for(e);
        let level = performance_level(m.quality_score);
        let level_color = if m.quality_score >= 90 {
            Color::Green
        } else if m.quality_score >= 70 {
            Color::Yellow
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new(&m.employee_name),
            Cell::new(m.total_tasks),
            Cell::new(m.completed_tasks),
            Cell::new(format_duration(m.average_completion_time)),
            Cell::new(m.efficiency_score),
            Cell::new(format!("{}%", m.on_time_rate)),
            Cell::new(m.quality_score),
            Cell::new(level).fg(level_color),
        ]);
    }
    println!("{table}");
}

/// Archives a day (today by default) into the report collection.
pub fn cmd_archive(date: Option<String>, silent: bool) {
    let date = match date {
        Some(s) => match parse_date(&s, silent) {
            Some(d) => d,
            None => return,
        },
        None => Utc::now().date_naive(),
    };
    let mut store = Store::load();
    if store.archive_day(date) {
        if save_store(&store, silent) && !silent {
            println!("Day {} archived.", date);
        }
    } else if !silent {
        println!("No tasks assigned on {} to archive.", date);
    }
}

/// Lists archived daily reports, or the detail of one date.
pub fn cmd_history(date: Option<String>) {
    let store = Store::load();
    if store.reports.is_empty() {
        println!("No archived reports.");
        return;
    }

    if let Some(s) = date {
        let Some(date) = parse_date(&s, false) else { return };
        let Some(report) = store.reports.iter().find(|r| r.date == date) else {
            println!("No report for {}.", date);
            return;
        };
        println!(
            "{}: {} tasks, {} completed, {} overdue, avg {}",
            report.date,
            report.summary.total_tasks,
            report.summary.completed_tasks,
            report.summary.overdue_tasks,
            format_duration(report.summary.average_completion_time),
        );
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Task", "Employee", "Status", "Actual", "Notes"]);
        for a in &report.assignments {
            let task_name = store
                .task(a.task_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "Unknown Task".to_string());
            let employee_name = store
                .employee(a.employee_id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| "Unknown Employee".to_string());
            table.add_row(vec![
                Cell::new(task_name),
                Cell::new(employee_name),
                Cell::new(a.status),
                Cell::new(a.actual_minutes.map(format_duration).unwrap_or_default()),
                Cell::new(&a.notes),
            ]);
        }
        println!("{table}");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        Cell::new("Date").add_attribute(Attribute::Bold),
        Cell::new("Tasks").add_attribute(Attribute::Bold),
        Cell::new("Completed").add_attribute(Attribute::Bold),
        Cell::new("Overdue").add_attribute(Attribute::Bold),
        Cell::new("Avg Time").add_attribute(Attribute::Bold),
    ]);
    for r in &store.reports {
        table.add_row(vec![
            Cell::new(r.date),
            Cell::new(r.summary.total_tasks),
            Cell::new(r.summary.completed_tasks),
            Cell::new(r.summary.overdue_tasks)
                .fg(if r.summary.overdue_tasks > 0 { Color::Red } else { Color::Reset }),
            Cell::new(format_duration(r.summary.average_completion_time)),
        ]);
    }
    println!("{table}");
}

/// Exports the archived history as CSV, to a file or stdout.
pub fn cmd_export_csv(out: Option<PathBuf>) {
    let store = Store::load();
    let csv = history_csv(&store.reports, &store.tasks, &store.employees);
    match out {
        Some(path) => match fs::write(&path, csv) {
            Ok(()) => println!("History exported to {}.", path.display()),
            Err(e) => eprintln!("Failed to write {}: {}", path.display(), e),
        },
        None => println!("{}", csv),
    }
}

/// Exports a JSON snapshot of all four collections, to a file or stdout.
pub fn cmd_export_json(out: Option<PathBuf>) {
    let store = Store::load();
    let json = snapshot_json(
        &store.tasks,
        &store.employees,
        &store.assignments,
        &store.reports,
    );
    match out {
        Some(path) => match fs::write(&path, json) {
            Ok(()) => println!("Snapshot exported to {}.", path.display()),
            Err(e) => eprintln!("Failed to write {}: {}", path.display(), e),
        },
        None => println!("{}", json),
    }
}

/// Resets the database by deleting all collections.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Delete all tasks, employees, assignments and reports? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return;
        }
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
