//! Unified storage interface
//!
//! The `Store` owns the SQLite connection holding departments and
//! employees. Every mutation runs inside its own transaction, so a failed
//! write leaves nothing behind for later reads to see.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let sales = store.add_department("Sales")?;
//! store.add_employee("Ada", sales.id)?;
//!
//! let count = store.count_employees_by_department(sales.id)?;
//! store.close()?;
//! ```
//!
//! ## Name search
//!
//! `find_*_by_name` match the pattern anywhere in the name. Matching is
//! case-insensitive for ASCII letters and the pattern is taken literally:
//! `%`, `_` and `\` are escaped before reaching `LIKE`.

use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{Department, DepartmentId, Employee, EmployeeId};
use crate::storage::{get_schema_version, init_schema, needs_init, StoreError, StoreResult};

/// Handle to the department/employee database
pub struct Store {
    conn: Connection,
    /// Configuration the store was opened with (None for in-memory stores)
    config: Option<Config>,
}

impl Store {
    /// Open the store using configuration from disk and environment
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::load(None).context("Failed to load configuration")?;
        Self::open_with_config(config).context("Failed to open store")
    }

    /// Open the store with a specific configuration
    ///
    /// Creates the data directory and schema on first run.
    pub fn open_with_config(config: Config) -> StoreResult<Self> {
        let path = config.sqlite_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(&path).map_err(|source| StoreError::Open {
            path: path.clone(),
            source,
        })?;
        prepare_connection(&conn)?;

        info!("Opened store at {:?}", path);
        Ok(Self {
            conn,
            config: Some(config),
        })
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        prepare_connection(&conn)?;
        Ok(Self { conn, config: None })
    }

    /// Close the store, flushing the connection
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, e)| StoreError::from(e))?;
        info!("Closed store");
        Ok(())
    }

    /// Get the configuration (None for in-memory stores)
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// Get the schema version recorded in the database
    pub fn schema_version(&self) -> StoreResult<Option<i32>> {
        Ok(get_schema_version(&self.conn)?)
    }

    // ==================== Department Operations ====================

    /// Create a department
    pub fn add_department(&mut self, name: &str) -> StoreResult<Department> {
        let name = required(name, "Department name")?;

        let tx = self.conn.transaction()?;
        tx.execute("INSERT INTO departments (name) VALUES (?)", params![name])?;
        let id = DepartmentId(tx.last_insert_rowid());
        tx.commit()?;

        debug!("Added department {} ({})", id, name);
        Ok(Department {
            id,
            name: name.to_string(),
        })
    }

    /// Look up a department by ID
    pub fn get_department(&self, id: DepartmentId) -> StoreResult<Option<Department>> {
        let department = self
            .conn
            .query_row(
                "SELECT id, name FROM departments WHERE id = ?",
                params![id.0],
                department_from_row,
            )
            .optional()?;
        Ok(department)
    }

    /// Get all departments in creation order
    pub fn list_departments(&self) -> StoreResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM departments ORDER BY id")?;
        let departments = stmt
            .query_map([], department_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    /// Find departments whose name contains `pattern`
    pub fn find_departments_by_name(&self, pattern: &str) -> StoreResult<Vec<Department>> {
        if pattern.is_empty() {
            return Err(StoreError::Validation {
                field: "Search term",
            });
        }

        let mut stmt = self.conn.prepare(
            r"SELECT id, name FROM departments WHERE name LIKE ? ESCAPE '\' ORDER BY id",
        )?;
        let departments = stmt
            .query_map(params![contains_pattern(pattern)], department_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Department search {:?}: {} match(es)", pattern, departments.len());
        Ok(departments)
    }

    // ==================== Employee Operations ====================

    /// Create an employee in an existing department
    ///
    /// The department check and the insert share one transaction.
    pub fn add_employee(
        &mut self,
        name: &str,
        department_id: DepartmentId,
    ) -> StoreResult<Employee> {
        let name = required(name, "Employee name")?;

        let tx = self.conn.transaction()?;
        let exists = tx
            .prepare("SELECT 1 FROM departments WHERE id = ?")?
            .exists(params![department_id.0])?;
        if !exists {
            return Err(StoreError::DepartmentNotFound { id: department_id });
        }

        tx.execute(
            "INSERT INTO employees (name, department_id) VALUES (?, ?)",
            params![name, department_id.0],
        )?;
        let id = EmployeeId(tx.last_insert_rowid());
        tx.commit()?;

        debug!("Added employee {} ({}) to department {}", id, name, department_id);
        Ok(Employee {
            id,
            name: name.to_string(),
            department_id,
        })
    }

    /// Get employees of a department in creation order
    pub fn list_employees_by_department(
        &self,
        department_id: DepartmentId,
    ) -> StoreResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, department_id FROM employees WHERE department_id = ? ORDER BY id",
        )?;
        let employees = stmt
            .query_map(params![department_id.0], employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    /// Count employees of a department without loading them
    pub fn count_employees_by_department(&self, department_id: DepartmentId) -> StoreResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM employees WHERE department_id = ?",
            params![department_id.0],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Find employees (in any department) whose name contains `pattern`
    pub fn find_employees_by_name(&self, pattern: &str) -> StoreResult<Vec<Employee>> {
        if pattern.is_empty() {
            return Err(StoreError::Validation {
                field: "Search term",
            });
        }

        let mut stmt = self.conn.prepare(
            r"SELECT id, name, department_id FROM employees WHERE name LIKE ? ESCAPE '\' ORDER BY id",
        )?;
        let employees = stmt
            .query_map(params![contains_pattern(pattern)], employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Employee search {:?}: {} match(es)", pattern, employees.len());
        Ok(employees)
    }

    // ==================== Stats ====================

    /// Get count of departments
    pub fn department_count(&self) -> StoreResult<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM departments", [], |row| row.get(0))?)
    }

    /// Get count of employees
    pub fn employee_count(&self) -> StoreResult<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?)
    }
}

// ==================== Private helpers ====================

/// Enable foreign keys, pin LIKE semantics and create the schema if needed
fn prepare_connection(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA case_sensitive_like = OFF;")?;

    if needs_init(conn) {
        init_schema(conn)?;
    }
    Ok(())
}

/// Trim a required text field, rejecting empty values
fn required<'a>(value: &'a str, field: &'static str) -> StoreResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(StoreError::Validation { field })
    } else {
        Ok(trimmed)
    }
}

/// Build a `LIKE` pattern matching `needle` literally anywhere in the text
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: DepartmentId(row.get(0)?),
        name: row.get(1)?,
    })
}

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: EmployeeId(row.get(0)?),
        name: row.get(1)?,
        department_id: DepartmentId(row.get(2)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ErrorKind, SCHEMA_VERSION};
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    fn names(departments: &[Department]) -> Vec<&str> {
        departments.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_open_creates_database() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let store = Store::open_with_config(config.clone()).unwrap();

        assert!(config.sqlite_path().exists());
        assert_eq!(store.schema_version().unwrap(), Some(SCHEMA_VERSION));
        assert!(store.config().is_some());
        store.close().unwrap();
    }

    #[test]
    fn test_open_creates_missing_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().join("a").join("b"),
            ..Config::default()
        };

        Store::open_with_config(config.clone()).unwrap();
        assert!(config.sqlite_path().exists());
    }

    #[test]
    fn test_open_unwritable_location_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the data directory should be
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let config = Config {
            data_dir: blocker.join("data"),
            ..Config::default()
        };

        let err = Store::open_with_config(config).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    }

    #[test]
    fn test_add_department_assigns_unique_ids() {
        let mut store = Store::open_in_memory().unwrap();

        let sales = store.add_department("Sales").unwrap();
        let support = store.add_department("Support").unwrap();

        assert_ne!(sales.id, support.id);
        let departments = store.list_departments().unwrap();
        assert!(departments.contains(&sales));
        assert!(departments.contains(&support));
    }

    #[test]
    fn test_add_department_trims_name() {
        let mut store = Store::open_in_memory().unwrap();

        let department = store.add_department("  Engineering  ").unwrap();
        assert_eq!(department.name, "Engineering");
        assert_eq!(
            store.get_department(department.id).unwrap().unwrap().name,
            "Engineering"
        );
    }

    #[test]
    fn test_add_department_rejects_empty_name() {
        let mut store = Store::open_in_memory().unwrap();

        let err = store.add_department("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store.department_count().unwrap(), 0);
    }

    #[test]
    fn test_list_departments_is_stable() {
        let mut store = Store::open_in_memory().unwrap();
        store.add_department("Zeta").unwrap();
        store.add_department("Alpha").unwrap();
        store.add_department("Mid").unwrap();

        let first = store.list_departments().unwrap();
        let second = store.list_departments().unwrap();

        assert_eq!(first, second);
        // Creation order, not alphabetical
        assert_eq!(names(&first), vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_get_department_missing() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.get_department(DepartmentId(1)).unwrap().is_none());
    }

    #[test]
    fn test_add_and_list_employees() {
        let mut store = Store::open_in_memory().unwrap();
        let engineering = store.add_department("Engineering").unwrap();
        let sales = store.add_department("Sales").unwrap();

        let ada = store.add_employee("Ada", engineering.id).unwrap();
        store.add_employee("Bob", sales.id).unwrap();

        let employees = store.list_employees_by_department(engineering.id).unwrap();
        assert_eq!(employees, vec![ada.clone()]);
        assert_eq!(ada.department_id, engineering.id);
    }

    #[test]
    fn test_add_employee_unknown_department() {
        let mut store = Store::open_in_memory().unwrap();

        let err = store.add_employee("Ada", DepartmentId(404)).unwrap_err();

        assert!(matches!(
            err,
            StoreError::DepartmentNotFound { id: DepartmentId(404) }
        ));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store.employee_count().unwrap(), 0);
    }

    #[test]
    fn test_add_employee_rejects_empty_name() {
        let mut store = Store::open_in_memory().unwrap();
        let department = store.add_department("Sales").unwrap();

        let err = store.add_employee("", department.id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_list_employees_of_empty_department() {
        let mut store = Store::open_in_memory().unwrap();
        let department = store.add_department("Empty").unwrap();

        assert!(store
            .list_employees_by_department(department.id)
            .unwrap()
            .is_empty());
        assert_eq!(store.count_employees_by_department(department.id).unwrap(), 0);
    }

    #[test]
    fn test_count_matches_list_length() {
        let mut store = Store::open_in_memory().unwrap();
        let a = store.add_department("A").unwrap();
        let b = store.add_department("B").unwrap();

        for (i, name) in ["One", "Two", "Three", "Four", "Five"].iter().enumerate() {
            let department = if i % 2 == 0 { a.id } else { b.id };
            store.add_employee(name, department).unwrap();

            for d in [a.id, b.id, DepartmentId(99)] {
                let listed = store.list_employees_by_department(d).unwrap().len() as i64;
                assert_eq!(store.count_employees_by_department(d).unwrap(), listed);
            }
        }
    }

    #[test]
    fn test_find_departments_substring_case_insensitive() {
        let mut store = Store::open_in_memory().unwrap();
        store.add_department("Sales").unwrap();
        store.add_department("Support").unwrap();
        store.add_department("Wholesale").unwrap();

        let results = store.find_departments_by_name("sal").unwrap();
        assert_eq!(names(&results), vec!["Sales", "Wholesale"]);

        let results = store.find_departments_by_name("SUP").unwrap();
        assert_eq!(names(&results), vec!["Support"]);

        assert!(store.find_departments_by_name("xyz").unwrap().is_empty());
    }

    #[test]
    fn test_find_treats_wildcards_literally() {
        let mut store = Store::open_in_memory().unwrap();
        store.add_department("R&D").unwrap();
        store.add_department("100% Growth").unwrap();
        store.add_department("ops_team").unwrap();

        assert_eq!(
            names(&store.find_departments_by_name("%").unwrap()),
            vec!["100% Growth"]
        );
        assert_eq!(
            names(&store.find_departments_by_name("_").unwrap()),
            vec!["ops_team"]
        );
        assert!(store.find_departments_by_name("\\").unwrap().is_empty());
    }

    #[test]
    fn test_find_employees_treats_wildcards_literally() {
        let mut store = Store::open_in_memory().unwrap();
        let ops = store.add_department("Operations").unwrap();
        store.add_employee("Ada", ops.id).unwrap();
        store.add_employee("J_Doe", ops.id).unwrap();
        store.add_employee("50% Part-time", ops.id).unwrap();
        store.add_employee("DOMAIN\\svc", ops.id).unwrap();

        let employee_names = |employees: Vec<Employee>| -> Vec<String> {
            employees.into_iter().map(|e| e.name).collect()
        };

        assert_eq!(
            employee_names(store.find_employees_by_name("%").unwrap()),
            vec!["50% Part-time"]
        );
        assert_eq!(
            employee_names(store.find_employees_by_name("_").unwrap()),
            vec!["J_Doe"]
        );
        assert_eq!(
            employee_names(store.find_employees_by_name("\\").unwrap()),
            vec!["DOMAIN\\svc"]
        );
        assert_eq!(
            employee_names(store.find_employees_by_name("n\\S").unwrap()),
            vec!["DOMAIN\\svc"]
        );
    }

    #[test]
    fn test_find_rejects_empty_pattern() {
        let store = Store::open_in_memory().unwrap();

        let err = store.find_departments_by_name("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = store.find_employees_by_name("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_find_employees_is_global() {
        let mut store = Store::open_in_memory().unwrap();
        let engineering = store.add_department("Engineering").unwrap();
        let research = store.add_department("Research").unwrap();

        store.add_employee("Ada Lovelace", engineering.id).unwrap();
        store.add_employee("Grace Hopper", research.id).unwrap();
        store.add_employee("Adam Smith", research.id).unwrap();

        let results = store.find_employees_by_name("ada").unwrap();
        let found: Vec<(&str, DepartmentId)> = results
            .iter()
            .map(|e| (e.name.as_str(), e.department_id))
            .collect();

        assert_eq!(
            found,
            vec![("Ada Lovelace", engineering.id), ("Adam Smith", research.id)]
        );
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let department_id;
        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            let department = store.add_department("Persistent").unwrap();
            store.add_employee("Ada", department.id).unwrap();
            department_id = department.id;
            store.close().unwrap();
        }

        let store = Store::open_with_config(config).unwrap();
        assert_eq!(store.department_count().unwrap(), 1);
        assert_eq!(store.count_employees_by_department(department_id).unwrap(), 1);
        assert_eq!(store.list_departments().unwrap()[0].name, "Persistent");
    }

    #[test]
    fn test_contains_pattern_escaping() {
        assert_eq!(contains_pattern("abc"), "%abc%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
