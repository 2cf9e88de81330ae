//! Status command handler

use anyhow::Result;

use company_core::Store;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let departments = store.department_count()?;
    let employees = store.employee_count()?;
    let schema_version = store.schema_version()?;
    let database = store.config().map(|c| c.sqlite_path());

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "database": database,
                    "schema_version": schema_version,
                    "counts": {
                        "departments": departments,
                        "employees": employees
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{} {}", departments, employees);
        }
        OutputFormat::Human => {
            println!("Company Status");
            println!("==============");
            println!();
            println!("Storage:");
            if let Some(path) = &database {
                println!("  Database: {}", path.display());
            }
            println!(
                "  Schema:   {}",
                schema_version
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "(unknown)".to_string())
            );
            println!();
            println!("Contents:");
            println!("  Departments: {}", departments);
            println!("  Employees:   {}", employees);
        }
    }

    Ok(())
}
