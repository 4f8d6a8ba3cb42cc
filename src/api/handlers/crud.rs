use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::dispatch::{Action, Endpoint};
use crate::api::error::ApiError;
use crate::api::params::RequestParams;
use crate::db::Database;
use crate::models::*;

// ============================================================
// Router
// ============================================================

/// Single entry point for `/api`. Authentication has already run.
pub async fn api_router(
    State(db): State<Database>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let params = RequestParams::from_parts(uri.query(), content_type, &body);

    let endpoint_name = params.text("endpoint");
    let action_name = params
        .text("action")
        .map(str::to_string)
        .or_else(|| Action::from_method(&method).map(|a| a.as_str().to_string()));

    let (Some(endpoint_name), Some(action_name)) = (endpoint_name, action_name) else {
        return Err(ApiError::bad_request(
            "Missing 'endpoint' or 'action' parameter",
        ));
    };

    let endpoint_name = endpoint_name.to_lowercase();
    let endpoint = Endpoint::parse(&endpoint_name).ok_or_else(|| {
        ApiError::not_found(format!("Endpoint '{}' not found", endpoint_name))
    })?;
    let action = Action::parse(&action_name).ok_or_else(|| {
        ApiError::bad_request(format!("Invalid action for {}", endpoint.as_str()))
    })?;

    tracing::debug!(
        "{} {} -> {} {}",
        method,
        uri.path(),
        endpoint.as_str(),
        action.as_str()
    );

    match endpoint {
        Endpoint::Employees => handle_employees(&db, action, &params),
        Endpoint::Departments => handle_departments(&db, action, &params),
        Endpoint::Projects => handle_projects(&db, action, &params),
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(serde_json::json!({ "message": text }))).into_response()
}

fn created(text: &str, id: i64) -> Response {
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": text, "id": id })),
    )
        .into_response()
}

fn required_id(params: &RequestParams, verb: &str) -> Result<i64, ApiError> {
    params
        .int("id")?
        .ok_or_else(|| ApiError::bad_request(format!("Missing ID for {}", verb)))
}

fn required_name(params: &RequestParams) -> Result<String, ApiError> {
    params
        .owned_text("name")
        .ok_or_else(|| ApiError::bad_request("Missing 'name' for create"))
}

// ============================================================
// Employees
// ============================================================

fn handle_employees(
    db: &Database,
    action: Action,
    params: &RequestParams,
) -> Result<Response, ApiError> {
    match action {
        Action::Read => {
            let employees = match params.int("id")? {
                Some(id) => db.get_employee(id).map(|e| e.into_iter().collect()),
                None => db.get_employees(),
            }
            .map_err(|e| ApiError::internal("Failed to read employees", e))?;
            Ok(Json(employees).into_response())
        }
        Action::Create => {
            let input = CreateEmployeeInput {
                employee_id: params.int("id")?,
                name: required_name(params)?,
                email: params.owned_text("email"),
                department_id: params.int("department_id")?,
                salary: params.float("salary")?,
            };
            let employee = db
                .create_employee(input)
                .map_err(|e| ApiError::internal("Failed to create employee", e))?;
            Ok(created("Employee created successfully", employee.employee_id))
        }
        Action::Update => {
            let id = required_id(params, "update")?;
            let input = UpdateEmployeeInput {
                name: params.owned_text("name"),
                email: params.nullable_text("email"),
                department_id: params.nullable_int("department_id")?,
                salary: params.nullable_float("salary")?,
            };
            db.update_employee(id, input)
                .map_err(|e| ApiError::internal("Failed to update employee", e))?
                .map(|_| message(StatusCode::OK, "Employee updated"))
                .ok_or_else(|| ApiError::not_found("Employee not found"))
        }
        Action::Delete => {
            let id = required_id(params, "delete")?;
            if db
                .delete_employee(id)
                .map_err(|e| ApiError::internal("Failed to delete employee", e))?
            {
                Ok(message(StatusCode::OK, "Employee deleted"))
            } else {
                Err(ApiError::not_found("Employee not found"))
            }
        }
    }
}

// ============================================================
// Departments
// ============================================================

fn handle_departments(
    db: &Database,
    action: Action,
    params: &RequestParams,
) -> Result<Response, ApiError> {
    match action {
        Action::Read => {
            let departments = match params.int("id")? {
                Some(id) => db.get_department(id).map(|d| d.into_iter().collect()),
                None => db.get_departments(),
            }
            .map_err(|e| ApiError::internal("Failed to read departments", e))?;
            Ok(Json(departments).into_response())
        }
        Action::Create => {
            let input = CreateDepartmentInput {
                department_id: params.int("id")?,
                name: required_name(params)?,
                location: params.owned_text("location"),
            };
            let department = db
                .create_department(input)
                .map_err(|e| ApiError::internal("Failed to create department", e))?;
            Ok(created("Department created", department.department_id))
        }
        Action::Update => {
            let id = required_id(params, "update")?;
            let input = UpdateDepartmentInput {
                name: params.owned_text("name"),
                location: params.nullable_text("location"),
            };
            db.update_department(id, input)
                .map_err(|e| ApiError::internal("Failed to update department", e))?
                .map(|_| message(StatusCode::OK, "Department updated"))
                .ok_or_else(|| ApiError::not_found("Department not found"))
        }
        Action::Delete => {
            let id = required_id(params, "delete")?;
            if db
                .delete_department(id)
                .map_err(|e| ApiError::internal("Failed to delete department", e))?
            {
                Ok(message(StatusCode::OK, "Department deleted"))
            } else {
                Err(ApiError::not_found("Department not found"))
            }
        }
    }
}

// ============================================================
// Projects
// ============================================================

fn handle_projects(
    db: &Database,
    action: Action,
    params: &RequestParams,
) -> Result<Response, ApiError> {
    match action {
        Action::Read => {
            let projects = match params.int("id")? {
                Some(id) => db.get_project(id).map(|p| p.into_iter().collect()),
                None => db.get_projects(),
            }
            .map_err(|e| ApiError::internal("Failed to read projects", e))?;
            Ok(Json(projects).into_response())
        }
        Action::Create => {
            let input = CreateProjectInput {
                project_id: params.int("id")?,
                project_name: required_name(params)?,
                department_id: params.int("department_id")?,
            };
            let project = db
                .create_project(input)
                .map_err(|e| ApiError::internal("Failed to create project", e))?;
            Ok(created("Project created", project.project_id))
        }
        Action::Update => {
            let (Some(id), Some(project_name)) = (params.int("id")?, params.owned_text("name"))
            else {
                return Err(ApiError::bad_request("Missing ID or Name for update"));
            };
            let input = UpdateProjectInput {
                project_name,
                department_id: params.nullable_int("department_id")?,
            };
            db.update_project(id, input)
                .map_err(|e| ApiError::internal("Update failed", e))?
                .map(|_| message(StatusCode::OK, "Project updated"))
                .ok_or_else(|| ApiError::not_found("Project not found"))
        }
        Action::Delete => {
            let id = required_id(params, "delete")?;
            if db
                .delete_project(id)
                .map_err(|e| ApiError::internal("Failed to delete project", e))?
            {
                Ok(message(StatusCode::OK, "Project deleted"))
            } else {
                Err(ApiError::not_found("Project not found"))
            }
        }
    }
}
