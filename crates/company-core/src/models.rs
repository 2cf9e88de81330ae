//! Data models
//!
//! Departments and the employees assigned to them. Identifiers are assigned
//! by the store when a record is first persisted and never change afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a department (SQLite rowid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(pub i64);

/// Identifier of an employee (SQLite rowid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A department
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    /// Store-assigned identifier
    pub id: DepartmentId,
    /// Display name, never empty
    pub name: String,
}

/// An employee belonging to exactly one department
///
/// The department is held by identifier only. Callers that need the
/// department record look it up through the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    /// Store-assigned identifier
    pub id: EmployeeId,
    /// Display name, never empty
    pub name: String,
    /// Department this employee was created in
    pub department_id: DepartmentId,
}

/// An employee as displayed, with its department name looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRow {
    #[serde(flatten)]
    pub employee: Employee,
    /// None if the department could not be found
    pub department_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_as_integers() {
        assert_eq!(DepartmentId(42).to_string(), "42");
        assert_eq!(EmployeeId(7).to_string(), "7");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let employee = Employee {
            id: EmployeeId(3),
            name: "Ada".to_string(),
            department_id: DepartmentId(1),
        };

        let serialized = toml::to_string(&employee).unwrap();
        assert!(serialized.contains("department_id = 1"));
        assert!(serialized.contains("id = 3"));

        let parsed: Employee = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, employee);
    }
}
