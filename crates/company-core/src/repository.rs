//! Data-access contract used by the controller

use std::collections::HashMap;

use crate::models::{Department, DepartmentId, Employee, EmployeeRow};
use crate::storage::StoreResult;
use crate::store::Store;

/// Operations the controller needs from persistent storage
///
/// `Store` is the production implementation. Each mutating call is one
/// unit of work.
pub trait Repository {
    fn add_department(&mut self, name: &str) -> StoreResult<Department>;
    fn add_employee(&mut self, name: &str, department_id: DepartmentId) -> StoreResult<Employee>;
    fn get_department(&self, id: DepartmentId) -> StoreResult<Option<Department>>;
    fn list_departments(&self) -> StoreResult<Vec<Department>>;
    fn list_employees_by_department(&self, department_id: DepartmentId)
        -> StoreResult<Vec<Employee>>;
    fn count_employees_by_department(&self, department_id: DepartmentId) -> StoreResult<i64>;
    fn find_departments_by_name(&self, pattern: &str) -> StoreResult<Vec<Department>>;
    fn find_employees_by_name(&self, pattern: &str) -> StoreResult<Vec<Employee>>;

    /// Pair each employee with its department name
    ///
    /// Names are taken from `known` when present; any other department is
    /// looked up once with `get_department`.
    fn with_department_names(
        &self,
        employees: Vec<Employee>,
        known: &[Department],
    ) -> StoreResult<Vec<EmployeeRow>> {
        let mut names: HashMap<DepartmentId, Option<String>> = known
            .iter()
            .map(|d| (d.id, Some(d.name.clone())))
            .collect();

        let mut rows = Vec::with_capacity(employees.len());
        for employee in employees {
            let department_name = match names.get(&employee.department_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.get_department(employee.department_id)?.map(|d| d.name);
                    names.insert(employee.department_id, name.clone());
                    name
                }
            };
            rows.push(EmployeeRow {
                employee,
                department_name,
            });
        }
        Ok(rows)
    }
}

impl Repository for Store {
    fn add_department(&mut self, name: &str) -> StoreResult<Department> {
        Store::add_department(self, name)
    }

    fn add_employee(&mut self, name: &str, department_id: DepartmentId) -> StoreResult<Employee> {
        Store::add_employee(self, name, department_id)
    }

    fn get_department(&self, id: DepartmentId) -> StoreResult<Option<Department>> {
        Store::get_department(self, id)
    }

    fn list_departments(&self) -> StoreResult<Vec<Department>> {
        Store::list_departments(self)
    }

    fn list_employees_by_department(
        &self,
        department_id: DepartmentId,
    ) -> StoreResult<Vec<Employee>> {
        Store::list_employees_by_department(self, department_id)
    }

    fn count_employees_by_department(&self, department_id: DepartmentId) -> StoreResult<i64> {
        Store::count_employees_by_department(self, department_id)
    }

    fn find_departments_by_name(&self, pattern: &str) -> StoreResult<Vec<Department>> {
        Store::find_departments_by_name(self, pattern)
    }

    fn find_employees_by_name(&self, pattern: &str) -> StoreResult<Vec<Employee>> {
        Store::find_employees_by_name(self, pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_department_names_looks_up_unknown_departments() {
        let mut store = Store::open_in_memory().unwrap();
        let engineering = store.add_department("Engineering").unwrap();
        let research = store.add_department("Research").unwrap();
        store.add_employee("Ada", engineering.id).unwrap();
        store.add_employee("Adam", research.id).unwrap();
        let employees = store.find_employees_by_name("ada").unwrap();

        // Only Engineering is known up front; Research needs a lookup
        let rows = store
            .with_department_names(employees, std::slice::from_ref(&engineering))
            .unwrap();

        let names: Vec<(&str, Option<&str>)> = rows
            .iter()
            .map(|row| (row.employee.name.as_str(), row.department_name.as_deref()))
            .collect();
        assert_eq!(
            names,
            vec![("Ada", Some("Engineering")), ("Adam", Some("Research"))]
        );
    }

    #[test]
    fn test_with_department_names_missing_department() {
        let store = Store::open_in_memory().unwrap();
        let orphan = Employee {
            id: crate::models::EmployeeId(1),
            name: "Ghost".to_string(),
            department_id: DepartmentId(99),
        };

        let rows = store.with_department_names(vec![orphan], &[]).unwrap();

        assert_eq!(rows[0].department_name, None);
    }
}
