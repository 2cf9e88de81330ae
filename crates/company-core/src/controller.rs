//! Application controller
//!
//! Turns user intents into store calls and keeps the derived views
//! (department list, employee list, employee count) in step with the store.
//!
//! ## Session state
//!
//! - `departments`: the selectable set, either every department or the
//!   result of the last department search
//! - `selected`: the current department, always a member of `departments`
//! - `employees`: rows of the employee pane, from either the selected
//!   department or a global name search
//! - `employee_count`: snapshot of the selected department's head count
//!
//! Every view update goes through [`Controller::refresh_derived_views`].
//! Errors never escape an intent: they become failure notifications and
//! the action is abandoned without retry.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::models::{Department, DepartmentId, EmployeeRow};
use crate::notification::{Notification, Notifier};
use crate::repository::Repository;
use crate::storage::{StoreError, StoreResult};
use crate::store::Store;

const EMPTY_DEPARTMENT_NAME: &str = "Please enter a department name.";
const EMPTY_EMPLOYEE_INPUT: &str = "Please enter employee name and select a department.";
const EMPTY_SEARCH_TERM: &str = "Please enter a search term.";

/// Where the rows of the employee pane came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeSource {
    /// Nothing loaded yet
    None,
    /// Employees of one department
    Department(DepartmentId),
    /// Global name search
    Search(String),
}

/// Which derived views to recompute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refresh {
    pub departments: bool,
    pub employees: bool,
    pub count: bool,
}

impl Refresh {
    pub const DEPARTMENTS: Refresh = Refresh {
        departments: true,
        employees: false,
        count: false,
    };
    pub const EMPLOYEES: Refresh = Refresh {
        departments: false,
        employees: true,
        count: false,
    };
    pub const COUNT: Refresh = Refresh {
        departments: false,
        employees: false,
        count: true,
    };

    /// Combine two refresh requests
    pub const fn and(self, other: Refresh) -> Refresh {
        Refresh {
            departments: self.departments || other.departments,
            employees: self.employees || other.employees,
            count: self.count || other.count,
        }
    }
}

/// Session state plus the store handle it drives
pub struct Controller<R: Repository = Store> {
    repo: R,
    departments: Vec<Department>,
    /// Active department search term (None shows every department)
    department_filter: Option<String>,
    selected: Option<DepartmentId>,
    employees: Vec<EmployeeRow>,
    employee_source: EmployeeSource,
    employee_count: i64,
    notifier: Notifier,
}

impl<R: Repository> Controller<R> {
    /// Create a controller and load the initial views
    ///
    /// Loading failures are reported as a notification; the controller
    /// starts with empty views in that case.
    pub fn new(repo: R, notification_ttl: Duration) -> Self {
        let mut controller = Self {
            repo,
            departments: Vec::new(),
            department_filter: None,
            selected: None,
            employees: Vec::new(),
            employee_source: EmployeeSource::None,
            employee_count: 0,
            notifier: Notifier::new(notification_ttl),
        };

        if let Err(e) = controller.refresh_derived_views(Refresh::DEPARTMENTS.and(Refresh::COUNT)) {
            controller.report("Failed to load departments", e);
        }
        controller
    }

    // ==================== Intents ====================

    /// Create a department, then reload the full department list and count
    pub fn create_department(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.notifier.failure(EMPTY_DEPARTMENT_NAME);
            return;
        }

        let department = match self.repo.add_department(name) {
            Ok(department) => department,
            Err(e) => return self.report("Failed to add department", e),
        };
        debug!("Created department {} ({})", department.id, department.name);

        let previous = self.department_filter.take();
        match self.refresh_derived_views(Refresh::DEPARTMENTS.and(Refresh::COUNT)) {
            Ok(()) => self.notifier.success("Department added successfully!"),
            Err(e) => {
                self.department_filter = previous;
                self.report_stale_view("Department added successfully!", e);
            }
        }
    }

    /// Create an employee in the selected department, then reload its
    /// employee list and count
    pub fn create_employee(&mut self, name: &str) {
        let name = name.trim();
        let department_id = match self.selected {
            Some(id) if !name.is_empty() => id,
            _ => {
                self.notifier.failure(EMPTY_EMPLOYEE_INPUT);
                return;
            }
        };

        let employee = match self.repo.add_employee(name, department_id) {
            Ok(employee) => employee,
            Err(e) => return self.report("Failed to add employee", e),
        };
        debug!("Created employee {} ({})", employee.id, employee.name);

        let previous = std::mem::replace(
            &mut self.employee_source,
            EmployeeSource::Department(department_id),
        );
        match self.refresh_derived_views(Refresh::EMPLOYEES.and(Refresh::COUNT)) {
            Ok(()) => self.notifier.success("Employee added successfully!"),
            Err(e) => {
                self.employee_source = previous;
                self.report_stale_view("Employee added successfully!", e);
            }
        }
    }

    /// Replace the selectable departments with those matching `term`
    ///
    /// An empty term restores the full list and reports a failure.
    pub fn search_departments(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            self.clear_department_search();
            self.notifier.failure(EMPTY_SEARCH_TERM);
            return;
        }

        let previous = self.department_filter.replace(term.to_string());
        match self.refresh_derived_views(Refresh::DEPARTMENTS) {
            Ok(()) => {
                self.notifier
                    .success(format!("Found {} departments.", self.departments.len()));
            }
            Err(e) => {
                self.department_filter = previous;
                self.report("Department search failed", e);
            }
        }
    }

    /// Show every department again
    pub fn clear_department_search(&mut self) {
        let previous = self.department_filter.take();
        if let Err(e) = self.refresh_derived_views(Refresh::DEPARTMENTS) {
            self.department_filter = previous;
            self.report("Failed to load departments", e);
        }
    }

    /// Show employees from any department whose name matches `term`
    pub fn search_employees(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            self.notifier.failure(EMPTY_SEARCH_TERM);
            return;
        }

        let result = self
            .repo
            .find_employees_by_name(term)
            .and_then(|employees| self.repo.with_department_names(employees, &self.departments));
        match result {
            Ok(rows) => {
                self.employees = rows;
                self.employee_source = EmployeeSource::Search(term.to_string());
                self.notifier
                    .success(format!("Found {} employees.", self.employees.len()));
            }
            Err(e) => self.report("Employee search failed", e),
        }
    }

    /// Select a department from the current list and recompute its count
    ///
    /// Does not reload the employee list.
    pub fn select_department(&mut self, id: DepartmentId) {
        if !self.departments.iter().any(|d| d.id == id) {
            self.notifier
                .failure(format!("Department {} is not in the current list.", id));
            return;
        }

        let previous = self.selected.replace(id);
        if let Err(e) = self.refresh_derived_views(Refresh::COUNT) {
            self.selected = previous;
            self.report("Failed to count employees", e);
        }
    }

    /// Reload the employees of the selected department
    ///
    /// With no selection the list is cleared.
    pub fn refresh_employee_list(&mut self) {
        let previous = std::mem::replace(
            &mut self.employee_source,
            match self.selected {
                Some(id) => EmployeeSource::Department(id),
                None => EmployeeSource::None,
            },
        );
        if let Err(e) = self.refresh_derived_views(Refresh::EMPLOYEES) {
            self.employee_source = previous;
            self.report("Failed to load employees", e);
        }
    }

    // ==================== Derived views ====================

    /// Recompute the requested views from the store
    ///
    /// Reloading departments reconciles the selection: the current one is
    /// kept if still listed, otherwise the first department is selected.
    /// A selection change always recomputes the count.
    ///
    /// Every store read happens before any view is replaced, so on error
    /// the views are left exactly as they were.
    pub fn refresh_derived_views(&mut self, refresh: Refresh) -> StoreResult<()> {
        let mut selected = self.selected;
        let departments = if refresh.departments {
            let departments = match &self.department_filter {
                Some(term) => self.repo.find_departments_by_name(term)?,
                None => self.repo.list_departments()?,
            };
            selected = match selected {
                Some(id) if departments.iter().any(|d| d.id == id) => Some(id),
                _ => departments.first().map(|d| d.id),
            };
            Some(departments)
        } else {
            None
        };
        let known = departments.as_deref().unwrap_or(&self.departments);

        let employees = if refresh.employees {
            let employees = match &self.employee_source {
                EmployeeSource::None => Vec::new(),
                EmployeeSource::Department(id) => self.repo.list_employees_by_department(*id)?,
                EmployeeSource::Search(term) => self.repo.find_employees_by_name(term)?,
            };
            Some(self.repo.with_department_names(employees, known)?)
        } else {
            None
        };

        let selection_changed = selected != self.selected;
        let count = if refresh.count || selection_changed {
            Some(match selected {
                Some(id) => self.repo.count_employees_by_department(id)?,
                None => 0,
            })
        } else {
            None
        };

        if selection_changed {
            debug!("Selection changed from {:?} to {:?}", self.selected, selected);
        }
        self.selected = selected;
        if let Some(departments) = departments {
            self.departments = departments;
        }
        if let Some(employees) = employees {
            self.employees = employees;
        }
        if let Some(count) = count {
            self.employee_count = count;
        }
        Ok(())
    }

    fn report(&mut self, context: &str, error: StoreError) {
        warn!("{}: {}", context, error);
        let message = match error.recovery_suggestion() {
            Some(hint) => format!("{}: {} {}", context, error, hint),
            None => format!("{}: {}", context, error),
        };
        self.notifier.failure(message);
    }

    /// A write committed but the views could not be reloaded afterwards
    fn report_stale_view(&mut self, done: &str, error: StoreError) {
        warn!("View refresh after write failed: {}", error);
        self.notifier.failure(format!(
            "{} The view could not be refreshed: {}",
            done, error
        ));
    }

    // ==================== Notifications ====================

    /// The visible notification, if any
    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current()
    }

    /// Hide the notification
    pub fn dismiss_notification(&mut self) {
        self.notifier.dismiss();
    }

    /// Auto-dismiss an expired notification; returns true if one was hidden
    pub fn expire_notification(&mut self, now: Instant) -> bool {
        self.notifier.expire(now)
    }

    // ==================== Accessors ====================

    /// The selectable departments
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// The active department search term
    pub fn department_filter(&self) -> Option<&str> {
        self.department_filter.as_deref()
    }

    pub fn selected_id(&self) -> Option<DepartmentId> {
        self.selected
    }

    pub fn selected_department(&self) -> Option<&Department> {
        self.selected
            .and_then(|id| self.departments.iter().find(|d| d.id == id))
    }

    /// Position of the selected department in `departments()`
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
            .and_then(|id| self.departments.iter().position(|d| d.id == id))
    }

    pub fn employees(&self) -> &[EmployeeRow] {
        &self.employees
    }

    pub fn employee_source(&self) -> &EmployeeSource {
        &self.employee_source
    }

    /// Cached employee count of the selected department
    pub fn employee_count(&self) -> i64 {
        self.employee_count
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Give the store handle back for shutdown
    pub fn into_repository(self) -> R {
        self.repo
    }
}
