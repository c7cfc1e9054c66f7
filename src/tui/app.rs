use chrono::{NaiveDate, Utc};
use ratatui::widgets::TableState;

use crate::models::{PerformanceMetric, TaskAssignment};
use crate::store::Store;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

pub enum ViewMode {
    Board,
    Performance,
}

pub enum InputField {
    None,
    /// Notes prompt shown by the complete action.
    CompleteNotes,
    /// Plain notes edit on the selected assignment.
    Notes,
}

/// State for the two-step "Assign Task" wizard.
#[derive(Default)]
pub struct AssignState {
    pub task_id: Option<u64>,
    pub step: usize, // 0: Task ID, 1: Employee ID
}

pub struct App {
    pub store: Store,
    pub today: NaiveDate,
    /// Today's assignments, the board rows.
    pub board: Vec<TaskAssignment>,
    /// Roster metrics for the performance view.
    pub metrics: Vec<PerformanceMetric>,
    pub state: TableState,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub target_id: Option<u64>,
    pub assign_state: AssignState,
}

impl App {
    /// Creates a new App instance and loads initial data.
    pub fn new() -> App {
        let mut app = App {
            store: Store::load(),
            today: Utc::now().date_naive(),
            board: Vec::new(),
            metrics: Vec::new(),
            state: TableState::default(),
            view_mode: ViewMode::Board,
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_id: None,
            assign_state: AssignState::default(),
        };
        app.reload();
        app
    }

    /// Refreshes the board rows and metrics from the store and clamps the
    /// selection.
    pub fn reload(&mut self) {
        self.today = Utc::now().date_naive();
        self.board = self
            .store
            .assignments_for(self.today)
            .into_iter()
            .cloned()
            .collect();
        self.metrics = self.store.metrics();

        if self.board.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.board.len() {
                self.state.select(Some(self.board.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Selects the next board row.
    pub fn next(&mut self) {
        if self.board.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.board.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous board row.
    pub fn previous(&mut self) {
        if self.board.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.board.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn selected_assignment(&self) -> Option<&TaskAssignment> {
        self.state.selected().and_then(|i| self.board.get(i))
    }

    fn commit(&mut self) {
        let _ = self.store.save();
        self.reload();
    }

    /// Starts (or resumes) the selected assignment.
    pub fn start_selected(&mut self) {
        if let Some(id) = self.selected_assignment().map(|a| a.id) {
            if self.store.start(id) {
                self.commit();
            }
        }
    }

    /// Pauses the selected assignment.
    pub fn pause_selected(&mut self) {
        if let Some(id) = self.selected_assignment().map(|a| a.id) {
            if self.store.pause(id) {
                self.commit();
            }
        }
    }

    /// Opens the completion-notes prompt for the selected assignment.
    pub fn begin_complete(&mut self) {
        if let Some(id) = self.selected_assignment().map(|a| a.id) {
            self.target_id = Some(id);
            self.input_mode = InputMode::Editing;
            self.input_field = InputField::CompleteNotes;
            self.input_buffer.clear();
        }
    }

    /// Opens an edit prompt for the selected assignment.
    pub fn begin_edit(&mut self, field: InputField) {
        if let Some((id, notes)) = self
            .selected_assignment()
            .map(|a| (a.id, a.notes.clone()))
        {
            self.target_id = Some(id);
            self.input_buffer = match field {
                InputField::Notes => notes,
                _ => String::new(),
            };
            self.input_mode = InputMode::Editing;
            self.input_field = field;
        }
    }

    /// Opens the two-step assign wizard.
    pub fn begin_assign(&mut self) {
        self.input_mode = InputMode::Adding;
        self.assign_state = AssignState::default();
        self.input_buffer.clear();
    }

    /// Removes the selected assignment's task from today's board.
    pub fn unassign_selected(&mut self) {
        if let Some(task_id) = self.selected_assignment().map(|a| a.task_id) {
            if self.store.unassign(task_id, self.today) > 0 {
                self.commit();
            }
        }
    }

    /// Archives today's board into the report collection.
    pub fn archive_today(&mut self) {
        if self.store.archive_day(self.today) {
            self.commit();
        }
    }

    /// Toggles between the board and the performance view.
    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Board => ViewMode::Performance,
            ViewMode::Performance => ViewMode::Board,
        };
    }

    /// Handles a submitted input line based on the current mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_assign_input(),
            InputMode::Editing => self.handle_editing_input(),
            _ => {}
        }
    }

    /// Candidate list for the wizard's current step: tasks not yet assigned
    /// today, then active employees.
    pub fn assign_candidates(&self) -> String {
        match self.assign_state.step {
            0 => self
                .store
                .available_tasks(self.today)
                .iter()
                .map(|t| format!("{} {}", t.id, t.name))
                .collect::<Vec<_>>()
                .join(" | "),
            _ => self
                .store
                .active_employees()
                .iter()
                .map(|e| format!("{} {}", e.id, e.name))
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    fn handle_assign_input(&mut self) {
        match self.assign_state.step {
            0 => {
                if let Ok(task_id) = self.input_buffer.parse::<u64>() {
                    // Ids outside the candidate list keep the prompt open
                    if !self
                        .store
                        .available_tasks(self.today)
                        .iter()
                        .any(|t| t.id == task_id)
                    {
                        return;
                    }
                    self.assign_state.task_id = Some(task_id);
                    self.assign_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                let employee_id = match self.input_buffer.parse::<u64>() {
                    Ok(id) => id,
                    Err(_) => return,
                };
                if !self
                    .store
                    .active_employees()
                    .iter()
                    .any(|e| e.id == employee_id)
                {
                    return;
                }
                if let Some(task_id) = self.assign_state.task_id {
                    if self.store.assign(task_id, employee_id, "Team Leader").is_some() {
                        self.commit();
                    }
                }
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            _ => {}
        }
    }

    fn handle_editing_input(&mut self) {
        if let Some(id) = self.target_id {
            match self.input_field {
                InputField::CompleteNotes => {
                    if self.store.complete(id, &self.input_buffer) {
                        self.commit();
                    }
                }
                InputField::Notes => {
                    if self.store.update_notes(id, &self.input_buffer) {
                        self.commit();
                    }
                }
                InputField::None => {}
            }
        }
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }
}
