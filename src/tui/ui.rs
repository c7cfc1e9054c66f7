use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::models::Status;
use crate::performance::performance_level;
use crate::timeutil::{format_duration, format_time, is_overdue, is_today};

use super::app::{App, InputField, InputMode, ViewMode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    match app.view_mode {
        ViewMode::Board => {
            let now = Utc::now();

            let rows: Vec<Row> = app
                .board
                .iter()
                .map(|a| {
                    let task_name = app
                        .store
                        .task(a.task_id)
                        .map(|t| t.name.clone())
                        .unwrap_or_else(|| "Unknown Task".to_string());
                    let employee_name = app
                        .store
                        .employee(a.employee_id)
                        .map(|e| e.name.clone())
                        .unwrap_or_else(|| "Unknown Employee".to_string());

                    let overdue = is_overdue(a, now);
                    let style = if overdue {
                        Style::default().fg(Color::Red)
                    } else {
                        match a.status {
                            Status::Completed => Style::default().fg(Color::Green),
                            Status::InProgress => Style::default().fg(Color::Yellow),
                            Status::Paused => Style::default().fg(Color::DarkGray),
                            Status::NotStarted => Style::default(),
                        }
                    };
                    let status_text = if overdue {
                        format!("{} (overdue)", a.status)
                    } else {
                        a.status.to_string()
                    };

                    Row::new(vec![
                        Cell::from(a.id.to_string()),
                        Cell::from(task_name),
                        Cell::from(employee_name),
                        Cell::from(a.priority.to_string()),
                        Cell::from(status_text),
                        Cell::from(format_time(a.assigned_at)),
                        Cell::from(a.started_at.map(format_time).unwrap_or_default()),
                        Cell::from(a.actual_minutes.map(format_duration).unwrap_or_default()),
                        Cell::from(a.notes.clone()),
                    ])
                    .style(style)
                })
                .collect();

            let widths = [
                Constraint::Length(4),
                Constraint::Min(20),
                Constraint::Length(18),
                Constraint::Length(8),
                Constraint::Length(20),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Min(10),
            ];

            let title = if is_today(app.today) {
                format!("Opsboard - Today ({})", app.today)
            } else {
                format!("Opsboard - {}", app.today)
            };
            let table = Table::new(rows, widths)
                .header(Row::new(vec![
                    "ID", "Task", "Employee", "Pri", "Status", "Assigned", "Started", "Actual",
                    "Notes",
                ])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1))
                .block(Block::default().borders(Borders::ALL).title(title))
                .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, chunks[0], &mut app.state);
        }
        ViewMode::Performance => {
            let rows: Vec<Row> = app
                .metrics
                .iter()
                .map(|m| {
                    let style = if m.quality_score >= 90 {
                        Style::default().fg(Color::Green)
                    } else if m.quality_score >= 70 {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::Red)
                    };
                    Row::new(vec![
                        Cell::from(m.employee_name.clone()),
                        Cell::from(m.total_tasks.to_string()),
                        Cell::from(m.completed_tasks.to_string()),
                        Cell::from(format_duration(m.average_completion_time)),
                        Cell::from(m.efficiency_score.to_string()),
                        Cell::from(format!("{}%", m.on_time_rate)),
                        Cell::from(m.quality_score.to_string()),
                        Cell::from(performance_level(m.quality_score)),
                    ])
                    .style(style)
                })
                .collect();

            let widths = [
                Constraint::Min(18),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(18),
            ];

            let table = Table::new(rows, widths)
                .header(Row::new(vec![
                    "Employee", "Tasks", "Done", "Avg", "Eff", "On-Time", "Quality", "Level",
                ])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1))
                .block(Block::default().borders(Borders::ALL).title("Opsboard - Performance"));

            f.render_widget(table, chunks[0]);
        }
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match app.view_mode {
            ViewMode::Board => {
                "q: Quit | a: Assign | s: Start/Resume | p: Pause | Space: Complete | n: Notes | u: Unassign | y: Archive Day | v: Performance"
            }
            ViewMode::Performance => "q: Quit | v: Back to Board",
        },
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[1]);

    // Render Input Box if needed
    match app.input_mode {
        InputMode::Editing | InputMode::Adding => {
            let height = if app.input_mode == InputMode::Adding { 4 } else { 3 };
            let area = centered_rect(60, height, f.area());
            f.render_widget(Clear, area); // Clear the area first

            let title = match app.input_mode {
                InputMode::Adding => match app.assign_state.step {
                    0 => "Assign Task: Enter Task ID",
                    1 => "Assign Task: Enter Employee ID",
                    _ => "Assign Task",
                },
                InputMode::Editing => match app.input_field {
                    InputField::CompleteNotes => "Complete: Enter Notes",
                    InputField::Notes => "Edit Notes",
                    InputField::None => "Edit",
                },
                _ => "",
            };

            let text = match app.input_mode {
                // Second line lists the valid ids for the current step
                InputMode::Adding => format!("{}\n{}", app.input_buffer, app.assign_candidates()),
                _ => app.input_buffer.clone(),
            };
            let input = Paragraph::new(text)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(title));

            f.render_widget(input, area);
        }
        _ => {}
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height - height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
