//! Application state and logic

use std::time::Instant;

use company_core::{Controller, Repository, Store};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Typing into one of the form fields
    Input(FormField),
}

/// Text field being edited on the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Name of a new department
    DepartmentName,
    /// Name of a new employee in the selected department
    EmployeeName,
    /// Term for searching departments
    DepartmentSearch,
    /// Term for searching employees across departments
    EmployeeSearch,
}

impl FormField {
    /// Prompt shown before the input text
    pub fn prompt(self) -> &'static str {
        match self {
            FormField::DepartmentName => "New department: ",
            FormField::EmployeeName => "New employee: ",
            FormField::DepartmentSearch => "Search departments: ",
            FormField::EmployeeSearch => "Search employees: ",
        }
    }
}

/// Application state
pub struct App<R: Repository = Store> {
    /// Session state and derived views
    pub controller: Controller<R>,
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Input line buffer
    pub input: String,
    /// Cursor position in the input line, in characters
    pub input_cursor: usize,
    /// Whether help overlay is visible
    pub show_help: bool,
}

impl<R: Repository> App<R> {
    pub fn new(controller: Controller<R>) -> Self {
        Self {
            controller,
            should_quit: false,
            input_mode: InputMode::Normal,
            input: String::new(),
            input_cursor: 0,
            show_help: false,
        }
    }

    /// Hide the notification once its ttl has passed
    pub fn tick(&mut self, now: Instant) {
        self.controller.expire_notification(now);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Select the previous department in the list
    pub fn move_up(&mut self) {
        let Some(index) = self.controller.selected_index() else {
            return;
        };
        if index > 0 {
            let id = self.controller.departments()[index - 1].id;
            self.controller.select_department(id);
        }
    }

    /// Select the next department in the list
    pub fn move_down(&mut self) {
        let next = match self.controller.selected_index() {
            Some(index) => index + 1,
            None => 0,
        };
        if let Some(department) = self.controller.departments().get(next) {
            let id = department.id;
            self.controller.select_department(id);
        }
    }

    /// Reload employees of the selected department
    pub fn refresh_employees(&mut self) {
        self.controller.refresh_employee_list();
    }

    /// Dismiss the notification and restore the full department list
    pub fn reset(&mut self) {
        self.controller.dismiss_notification();
        if self.controller.department_filter().is_some() {
            self.controller.clear_department_search();
        }
    }

    /// Start editing a form field
    pub fn enter_input_mode(&mut self, field: FormField) {
        self.input_mode = InputMode::Input(field);
        self.input.clear();
        self.input_cursor = 0;
    }

    /// Leave the input line without submitting
    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.input_cursor = 0;
    }

    /// Submit the input line to the intent for its field
    pub fn submit(&mut self) {
        let InputMode::Input(field) = self.input_mode else {
            return;
        };
        let text = std::mem::take(&mut self.input);
        self.exit_input_mode();

        match field {
            FormField::DepartmentName => self.controller.create_department(&text),
            FormField::EmployeeName => self.controller.create_employee(&text),
            FormField::DepartmentSearch => self.controller.search_departments(&text),
            FormField::EmployeeSearch => self.controller.search_employees(&text),
        }
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.input_cursor);
        self.input.insert(at, c);
        self.input_cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.input_cursor > 0 {
            self.input_cursor -= 1;
            let at = self.byte_offset(self.input_cursor);
            self.input.remove(at);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.input_cursor < self.input.chars().count() {
            self.input_cursor += 1;
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map_or(self.input.len(), |(i, _)| i)
    }
}
