//! Resolution of the `endpoint` and `action` router parameters.

use axum::http::Method;

/// A table the CRUD router can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Employees,
    Departments,
    Projects,
}

impl Endpoint {
    /// Case-insensitive, accepting the singular forms and a common misspelling.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "employees" | "employee" | "employess" => Some(Self::Employees),
            "departments" | "department" => Some(Self::Departments),
            "projects" | "project" => Some(Self::Projects),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Departments => "departments",
            Self::Projects => "projects",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "read" => Some(Self::Read),
            "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Default action implied by the HTTP verb when none is given.
    pub fn from_method(method: &Method) -> Option<Self> {
        [
            (Method::GET, Self::Read),
            (Method::POST, Self::Create),
            (Method::PUT, Self::Update),
            (Method::DELETE, Self::Delete),
        ]
        .into_iter()
        .find(|(verb, _)| verb == method)
        .map(|(_, action)| action)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}
