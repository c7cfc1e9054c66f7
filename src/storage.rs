use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::models::{DailyReport, Employee, Task, TaskAssignment};

/// Returns the path to the assignments database file (`assignments.json`).
///
/// The path is determined in the following order:
/// 1. `OPSBOARD_DB` environment variable.
/// 2. `~/.local/share/opsboard/assignments.json` (on Linux).
/// 3. `./assignments.json` (fallback).
fn db_path() -> PathBuf {
    std::env::var("OPSBOARD_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("opsboard");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("assignments.json");
        p
    })
}

/// Path to the task catalog file (`tasks.json`), next to the assignments
/// database.
fn catalog_path() -> PathBuf {
    sibling("tasks.json")
}

/// Path to the employee roster file (`employees.json`).
fn roster_path() -> PathBuf {
    sibling("employees.json")
}

/// Path to the daily report archive file (`reports.json`).
fn reports_path() -> PathBuf {
    sibling("reports.json")
}

fn sibling(name: &str) -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push(name);
    p
}

fn read_collection<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Vec<T> {
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|_| Vec::new())
}

fn write_collection<T: serde::Serialize>(path: &PathBuf, items: &[T]) -> std::io::Result<()> {
    let s = serde_json::to_string_pretty(items).unwrap();
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Loads all live assignments.
///
/// Returns an empty vector if the file does not exist or cannot be read.
pub fn load_assignments() -> Vec<TaskAssignment> {
    read_collection(&db_path())
}

/// Saves the live assignment collection, overwriting the existing file.
pub fn save_assignments(assignments: &[TaskAssignment]) -> std::io::Result<()> {
    write_collection(&db_path(), assignments)
}

/// Loads the task catalog.
pub fn load_catalog() -> Vec<Task> {
    read_collection(&catalog_path())
}

/// Saves the task catalog.
pub fn save_catalog(tasks: &[Task]) -> std::io::Result<()> {
    write_collection(&catalog_path(), tasks)
}

/// Loads the employee roster.
pub fn load_roster() -> Vec<Employee> {
    read_collection(&roster_path())
}

/// Saves the employee roster.
pub fn save_roster(employees: &[Employee]) -> std::io::Result<()> {
    write_collection(&roster_path(), employees)
}

/// Loads the archived daily reports.
pub fn load_reports() -> Vec<DailyReport> {
    read_collection(&reports_path())
}

/// Saves the archived daily reports.
pub fn save_reports(reports: &[DailyReport]) -> std::io::Result<()> {
    write_collection(&reports_path(), reports)
}

/// Deletes all database files (assignments, catalog, roster, reports).
pub fn delete_database() -> std::io::Result<()> {
    for path in [db_path(), catalog_path(), roster_path(), reports_path()] {
        if path.exists() {
            fs::remove_file(path)?;
        }
    }
    Ok(())
}
