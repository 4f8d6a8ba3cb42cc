use serde::{Deserialize, Serialize};

/// A row of `tbdepartments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub department_id: i64,
    pub name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDepartmentInput {
    pub department_id: Option<i64>,
    pub name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDepartmentInput {
    pub name: Option<String>,
    /// `Some(None)` clears the location.
    pub location: Option<Option<String>>,
}
