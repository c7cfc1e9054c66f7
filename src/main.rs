//! # Opsboard
//!
//! A terminal task-assignment and performance-tracking tool for a small
//! operations team. A team leader assigns recurring daily tasks from a
//! catalog to employees; employees move assignments through a lifecycle
//! (`not_started -> in_progress -> completed`, with pause/resume); the tool
//! derives daily reports and per-employee performance scores from the
//! resulting history.
//!
//! ## Features
//!
//! *   **Assignment board**: today's tasks per employee with status and
//!     overdue highlighting.
//! *   **Lifecycle tracking**: start, pause, resume and complete with
//!     automatic elapsed-time capture.
//! *   **Performance scores**: efficiency (actual vs estimated time),
//!     on-time rate and a headline quality score per employee.
//! *   **Daily archive**: freeze a day's board and roster metrics into a
//!     report; browse and export the history.
//! *   **Dual interface**: scriptable CLI plus an interactive TUI board.
//! *   **Data persistence**: JSON files in the standard XDG data directory.
//!
//! ## Usage
//!
//! ```bash
//! # First run: load the default catalog and roster
//! opsboard seed
//!
//! # Leader: assign catalog task 3 to employee 2
//! opsboard assign 3 2
//!
//! # Employee: work the assignment
//! opsboard start 1
//! opsboard pause 1
//! opsboard start 1          # resume keeps the original start time
//! opsboard complete 1 --notes "all card batches settled"
//!
//! # Review
//! opsboard board
//! opsboard performance
//!
//! # End of day
//! opsboard archive
//! opsboard history
//! opsboard export csv --out history.csv
//! ```
//!
//! Run without arguments (or `opsboard ui`) for the interactive board.
//!
//! ## Data Storage
//!
//! Collections are saved in your local data directory:
//! *   Linux: `~/.local/share/opsboard/`
//! *   macOS: `~/Library/Application Support/opsboard/`
//! *   Windows: `%APPDATA%\opsboard\`
//!
//! Override with the `OPSBOARD_DB` environment variable (path of
//! `assignments.json`; the other collections live beside it).

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use opsboard::commands::*;
use opsboard::tui::run_tui;

#[derive(Parser)]
#[command(name = "opsboard")]
#[command(about = "Terminal task board and performance tracker for operations teams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the default task catalog and employee roster
    Seed {
        /// Overwrite an already-populated catalog/roster
        #[arg(short, long)]
        force: bool,
    },
    /// Manage the task catalog
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage the employee roster
    Employee {
        #[command(subcommand)]
        command: EmployeeCommands,
    },
    /// Assign a catalog task to an employee for today
    Assign {
        /// Catalog task id
        task_id: u64,
        /// Employee id
        employee_id: u64,
        /// Name recorded as the assigner
        #[arg(short, long)]
        by: Option<String>,
    },
    /// Show the assignment board for a day
    Board {
        /// Day to show in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Start (or resume) an assignment
    Start { id: u64 },
    /// Complete an in-progress assignment
    Complete {
        id: u64,
        /// Completion notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Pause an in-progress assignment
    Pause { id: u64 },
    /// Replace the notes on an assignment
    Notes { id: u64, notes: String },
    /// Remove a task's assignment for a day (for reassignment)
    Unassign {
        /// Catalog task id
        task_id: u64,
        /// Day in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show performance scores for the roster
    Performance {
        /// Limit to one employee id
        #[arg(short, long)]
        employee: Option<u64>,
    },
    /// Archive a day's assignments into a report
    Archive {
        /// Day in YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Browse archived daily reports
    History {
        /// Show the detail of one day in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Export the history
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Reset the database (delete all collections)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI board
    Ui,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task to the catalog
    Add {
        /// Task name (quoted if it has spaces)
        name: String,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Category (reservations, payments, reconciliation, tracking, admin)
        #[arg(short, long)]
        category: String,
        /// Estimated minutes
        #[arg(short, long)]
        minutes: u32,
        /// Priority (low, medium, high, urgent)
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Mark as a daily recurring task
        #[arg(short, long)]
        recurring: bool,
    },
    /// List the catalog
    List,
    /// Edit a catalog task
    Edit {
        id: u64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New estimated minutes
        #[arg(short, long)]
        minutes: Option<u32>,
        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
        /// New recurring flag
        #[arg(short, long)]
        recurring: Option<bool>,
    },
    /// Remove a task from the catalog (historical assignments keep its id)
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum EmployeeCommands {
    /// Add an employee to the roster
    Add {
        /// Employee name
        name: String,
        /// Job title
        #[arg(short, long, default_value = "General Staff")]
        role: String,
    },
    /// List the roster
    List {
        /// Include deactivated employees
        #[arg(short, long)]
        all: bool,
    },
    /// Reactivate an employee
    Activate { id: u64 },
    /// Deactivate an employee (history is kept)
    Deactivate { id: u64 },
}

#[derive(Subcommand)]
enum ExportCommands {
    /// Flat CSV of all archived assignments
    Csv {
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// JSON snapshot of all four collections
    Json {
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Seed { force }) => cmd_seed(force, false),
        Some(Commands::Task { command }) => match command {
            TaskCommands::Add { name, description, category, minutes, priority, recurring } => {
                cmd_task_add(name, description, category, minutes, priority, recurring, false)
            }
            TaskCommands::List => cmd_task_list(),
            TaskCommands::Edit { id, name, description, category, minutes, priority, recurring } => {
                cmd_task_edit(id, name, description, category, minutes, priority, recurring, false)
            }
            TaskCommands::Remove { id } => cmd_task_remove(id, false),
        },
        Some(Commands::Employee { command }) => match command {
            EmployeeCommands::Add { name, role } => cmd_employee_add(name, role, false),
            EmployeeCommands::List { all } => cmd_employee_list(all),
            EmployeeCommands::Activate { id } => cmd_employee_set_active(id, true, false),
            EmployeeCommands::Deactivate { id } => cmd_employee_set_active(id, false, false),
        },
        Some(Commands::Assign { task_id, employee_id, by }) => {
            cmd_assign(task_id, employee_id, by, false)
        }
        Some(Commands::Board { date }) => cmd_board(date),
        Some(Commands::Start { id }) => cmd_start(id, false),
        Some(Commands::Complete { id, notes }) => cmd_complete(id, notes, false),
        Some(Commands::Pause { id }) => cmd_pause(id, false),
        Some(Commands::Notes { id, notes }) => cmd_notes(id, notes, false),
        Some(Commands::Unassign { task_id, date }) => cmd_unassign(task_id, date, false),
        Some(Commands::Performance { employee }) => cmd_performance(employee),
        Some(Commands::Archive { date }) => cmd_archive(date, false),
        Some(Commands::History { date }) => cmd_history(date),
        Some(Commands::Export { command }) => match command {
            ExportCommands::Csv { out } => cmd_export_csv(out),
            ExportCommands::Json { out } => cmd_export_json(out),
        },
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "opsboard", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
