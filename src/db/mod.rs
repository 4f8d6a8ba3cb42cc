mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::config::DatabaseConfig;
use crate::models::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn)
    }

    pub fn open_default() -> Result<Self> {
        let config = DatabaseConfig::from_env()?;
        tracing::debug!("Opening company database at {}", config.path.display());
        Self::open(config.path)
    }

    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        schema::ensure_schema(&mut conn)
    }

    // ============================================================
    // Employee operations
    // ============================================================

    pub fn get_employees(&self) -> Result<Vec<Employee>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT employee_id, name, email, department_id, salary
             FROM tbemployees ORDER BY employee_id",
        )?;

        let employees = stmt
            .query_map([], employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(employees)
    }

    pub fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        select_employee(&conn, id)
    }

    pub fn create_employee(&self, input: CreateEmployeeInput) -> Result<Employee> {
        let conn = self.conn.lock().expect("database lock poisoned");

        conn.execute(
            "INSERT INTO tbemployees (employee_id, name, email, department_id, salary)
             VALUES (?, ?, ?, ?, ?)",
            (
                input.employee_id,
                &input.name,
                &input.email,
                input.department_id,
                input.salary,
            ),
        )?;

        Ok(Employee {
            employee_id: input.employee_id.unwrap_or_else(|| conn.last_insert_rowid()),
            name: input.name,
            email: input.email,
            department_id: input.department_id,
            salary: input.salary,
        })
    }

    pub fn update_employee(&self, id: i64, input: UpdateEmployeeInput) -> Result<Option<Employee>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let Some(existing) = select_employee(&conn, id)? else {
            return Ok(None);
        };

        let updated = Employee {
            employee_id: id,
            name: input.name.unwrap_or(existing.name),
            email: input.email.unwrap_or(existing.email),
            department_id: input.department_id.unwrap_or(existing.department_id),
            salary: input.salary.unwrap_or(existing.salary),
        };

        let rows = conn.execute(
            "UPDATE tbemployees SET name = ?, email = ?, department_id = ?, salary = ?
             WHERE employee_id = ?",
            (
                &updated.name,
                &updated.email,
                updated.department_id,
                updated.salary,
                id,
            ),
        )?;

        Ok((rows > 0).then_some(updated))
    }

    pub fn delete_employee(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM tbemployees WHERE employee_id = ?", [id])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Department operations
    // ============================================================

    pub fn get_departments(&self) -> Result<Vec<Department>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT department_id, name, location FROM tbdepartments ORDER BY department_id",
        )?;

        let departments = stmt
            .query_map([], department_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(departments)
    }

    pub fn get_department(&self, id: i64) -> Result<Option<Department>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        select_department(&conn, id)
    }

    pub fn create_department(&self, input: CreateDepartmentInput) -> Result<Department> {
        let conn = self.conn.lock().expect("database lock poisoned");

        conn.execute(
            "INSERT INTO tbdepartments (department_id, name, location) VALUES (?, ?, ?)",
            (input.department_id, &input.name, &input.location),
        )?;

        Ok(Department {
            department_id: input
                .department_id
                .unwrap_or_else(|| conn.last_insert_rowid()),
            name: input.name,
            location: input.location,
        })
    }

    pub fn update_department(
        &self,
        id: i64,
        input: UpdateDepartmentInput,
    ) -> Result<Option<Department>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let Some(existing) = select_department(&conn, id)? else {
            return Ok(None);
        };

        let updated = Department {
            department_id: id,
            name: input.name.unwrap_or(existing.name),
            location: input.location.unwrap_or(existing.location),
        };

        let rows = conn.execute(
            "UPDATE tbdepartments SET name = ?, location = ? WHERE department_id = ?",
            (&updated.name, &updated.location, id),
        )?;

        Ok((rows > 0).then_some(updated))
    }

    pub fn delete_department(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM tbdepartments WHERE department_id = ?", [id])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Project operations
    // ============================================================

    pub fn get_projects(&self) -> Result<Vec<Project>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT project_id, project_name, department_id FROM tbprojects ORDER BY project_id",
        )?;

        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(projects)
    }

    pub fn get_project(&self, id: i64) -> Result<Option<Project>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        select_project(&conn, id)
    }

    pub fn create_project(&self, input: CreateProjectInput) -> Result<Project> {
        let conn = self.conn.lock().expect("database lock poisoned");

        conn.execute(
            "INSERT INTO tbprojects (project_id, project_name, department_id) VALUES (?, ?, ?)",
            (input.project_id, &input.project_name, input.department_id),
        )?;

        Ok(Project {
            project_id: input.project_id.unwrap_or_else(|| conn.last_insert_rowid()),
            project_name: input.project_name,
            department_id: input.department_id,
        })
    }

    pub fn update_project(&self, id: i64, input: UpdateProjectInput) -> Result<Option<Project>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let Some(existing) = select_project(&conn, id)? else {
            return Ok(None);
        };

        let updated = Project {
            project_id: id,
            project_name: input.project_name,
            department_id: input.department_id.unwrap_or(existing.department_id),
        };

        let rows = conn.execute(
            "UPDATE tbprojects SET project_name = ?, department_id = ? WHERE project_id = ?",
            (&updated.project_name, updated.department_id, id),
        )?;

        Ok((rows > 0).then_some(updated))
    }

    pub fn delete_project(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM tbprojects WHERE project_id = ?", [id])?;
        Ok(rows > 0)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        employee_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        department_id: row.get(3)?,
        salary: row.get(4)?,
    })
}

fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        department_id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        project_id: row.get(0)?,
        project_name: row.get(1)?,
        department_id: row.get(2)?,
    })
}

// Lookups shared by the getters and by updates, which run them under the
// same lock as their UPDATE.

fn select_employee(conn: &Connection, id: i64) -> Result<Option<Employee>> {
    let employee = conn
        .query_row(
            "SELECT employee_id, name, email, department_id, salary
             FROM tbemployees WHERE employee_id = ?",
            [id],
            employee_from_row,
        )
        .optional()?;
    Ok(employee)
}

fn select_department(conn: &Connection, id: i64) -> Result<Option<Department>> {
    let department = conn
        .query_row(
            "SELECT department_id, name, location FROM tbdepartments WHERE department_id = ?",
            [id],
            department_from_row,
        )
        .optional()?;
    Ok(department)
}

fn select_project(conn: &Connection, id: i64) -> Result<Option<Project>> {
    let project = conn
        .query_row(
            "SELECT project_id, project_name, department_id FROM tbprojects WHERE project_id = ?",
            [id],
            project_from_row,
        )
        .optional()?;
    Ok(project)
}
