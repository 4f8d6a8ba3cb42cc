use serde::{Deserialize, Serialize};

/// A row of `tbprojects`.
///
/// Projects optionally belong to the department running them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: i64,
    pub project_name: String,
    pub department_id: Option<i64>,
}

/// Input for creating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub project_id: Option<i64>,
    pub project_name: String,
    pub department_id: Option<i64>,
}

/// Input for updating a project. The name is always rewritten; the department
/// is kept when absent and cleared by `Some(None)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    pub project_name: String,
    pub department_id: Option<Option<i64>>,
}
