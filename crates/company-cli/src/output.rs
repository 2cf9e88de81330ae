//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use company_core::{Department, Employee, EmployeeRow};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single department
    pub fn print_department(&self, department: &Department) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("ID:   {}", department.id);
                println!("Name: {}", department.name);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(department)?);
            }
            OutputFormat::Quiet => {
                println!("{}", department.id);
            }
        }
        Ok(())
    }

    /// Print a list of departments
    pub fn print_departments(&self, departments: &[Department]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if departments.is_empty() {
                    println!("No departments found.");
                    return Ok(());
                }
                for department in departments {
                    println!("{:>6} | {}", department.id, truncate(&department.name, 60));
                }
                println!("\n{} department(s)", departments.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(departments)?);
            }
            OutputFormat::Quiet => {
                for department in departments {
                    println!("{}", department.id);
                }
            }
        }
        Ok(())
    }

    /// Print a single employee
    pub fn print_employee(&self, employee: &Employee) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("ID:         {}", employee.id);
                println!("Name:       {}", employee.name);
                println!("Department: {}", employee.department_id);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(employee)?);
            }
            OutputFormat::Quiet => {
                println!("{}", employee.id);
            }
        }
        Ok(())
    }

    /// Print employees, each with the name of its department if known
    pub fn print_employees(&self, employees: &[EmployeeRow]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if employees.is_empty() {
                    println!("No employees found.");
                    return Ok(());
                }
                for row in employees {
                    println!(
                        "{:>6} | {} | {}",
                        row.employee.id,
                        truncate(&row.employee.name, 40),
                        department_label(&row.employee, row.department_name.as_deref())
                    );
                }
                println!("\n{} employee(s)", employees.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(employees)?);
            }
            OutputFormat::Quiet => {
                for row in employees {
                    println!("{}", row.employee.id);
                }
            }
        }
        Ok(())
    }

    /// Print an employee count for a department
    pub fn print_count(&self, department: &Department, count: i64) {
        match self.format {
            OutputFormat::Human => println!("{}: {} employee(s)", department.name, count),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"department_id": department.id, "count": count})
                );
            }
            OutputFormat::Quiet => println!("{}", count),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// "Name (#id)" when the department is known, otherwise "#id"
fn department_label(employee: &Employee, department_name: Option<&str>) -> String {
    match department_name {
        Some(name) => format!("{} (#{})", name, employee.department_id),
        None => format!("#{}", employee.department_id),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use company_core::{DepartmentId, EmployeeId};

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("Ünïcödé name here", 8), "Ünïcö...");
    }

    #[test]
    fn test_department_label() {
        let employee = Employee {
            id: EmployeeId(1),
            name: "Ada".to_string(),
            department_id: DepartmentId(4),
        };

        assert_eq!(
            department_label(&employee, Some("Engineering")),
            "Engineering (#4)"
        );
        assert_eq!(department_label(&employee, None), "#4");
    }
}
