//! Employee command handlers

use anyhow::{bail, Context, Result};

use company_core::{DepartmentId, Repository, Store};

use crate::output::Output;

/// Create a new employee in an existing department
pub fn add(store: &mut Store, name: String, department: i64, output: &Output) -> Result<()> {
    let employee = store
        .add_employee(&name, DepartmentId(department))
        .context("Failed to create employee")?;

    output.success(&format!("Created employee: {}", employee.id));
    output.print_employee(&employee)
}

/// List the employees of one department
pub fn list(store: &Store, department: i64, output: &Output) -> Result<()> {
    let department = store
        .get_department(DepartmentId(department))?
        .ok_or_else(|| anyhow::anyhow!("Department not found: {}", department))?;

    let employees = store.list_employees_by_department(department.id)?;
    let rows = store.with_department_names(employees, std::slice::from_ref(&department))?;
    output.print_employees(&rows)
}

/// Search employees across all departments
pub fn search(store: &Store, term: String, output: &Output) -> Result<()> {
    let term = term.trim();
    if term.is_empty() {
        bail!("Please enter a search term.");
    }

    let employees = store
        .find_employees_by_name(term)
        .context("Failed to search employees")?;
    let rows = store.with_department_names(employees, &[])?;
    output.print_employees(&rows)
}
