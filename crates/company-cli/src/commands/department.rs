//! Department command handlers

use anyhow::{bail, Context, Result};

use company_core::{DepartmentId, Store};

use crate::output::Output;

/// Create a new department
pub fn add(store: &mut Store, name: String, output: &Output) -> Result<()> {
    let department = store
        .add_department(&name)
        .context("Failed to create department")?;

    output.success(&format!("Created department: {}", department.id));
    output.print_department(&department)
}

/// List all departments
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let departments = store.list_departments()?;
    output.print_departments(&departments)
}

/// Search departments by name
pub fn search(store: &Store, term: String, output: &Output) -> Result<()> {
    let term = term.trim();
    if term.is_empty() {
        bail!("Please enter a search term.");
    }

    let departments = store
        .find_departments_by_name(term)
        .context("Failed to search departments")?;
    output.print_departments(&departments)
}

/// Show the number of employees in a department
pub fn count(store: &Store, id: i64, output: &Output) -> Result<()> {
    let department = store
        .get_department(DepartmentId(id))?
        .ok_or_else(|| anyhow::anyhow!("Department not found: {}", id))?;

    let count = store.count_employees_by_department(department.id)?;
    output.print_count(&department, count);
    Ok(())
}
