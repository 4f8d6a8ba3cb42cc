use serde::{Deserialize, Serialize};

/// A row of `tbemployees`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub department_id: Option<i64>,
    /// Annual salary. Currency is whatever the company books in.
    pub salary: Option<f64>,
}

/// Input for creating an employee. The id is assigned by the database when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub employee_id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub department_id: Option<i64>,
    pub salary: Option<f64>,
}

/// Input for updating an employee. `None` keeps the stored value; for the
/// nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub department_id: Option<Option<i64>>,
    pub salary: Option<Option<f64>>,
}
