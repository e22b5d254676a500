// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and department queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use finyearly_domain::{Department, DepartmentId, Role, User, UserId};
use tracing::debug;

use crate::diesel_schema::{departments, users};
use crate::encoding::{decode_enum, decode_flag, decode_timestamp};
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    name: String,
    email: String,
    role: String,
    department_id: i64,
    avatar_url: Option<String>,
    is_archived: i32,
    created_at: String,
}

impl UserRow {
    fn into_domain(self) -> Result<User, PersistenceError> {
        Ok(User {
            id: UserId::new(self.user_id),
            name: self.name,
            email: self.email,
            role: decode_enum::<Role>(&self.role)?,
            department_id: DepartmentId::new(self.department_id),
            created_at: decode_timestamp(&self.created_at)?,
            avatar_url: self.avatar_url,
            archived: decode_flag(self.is_archived),
        })
    }
}

/// Diesel Queryable struct for department rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = departments)]
struct DepartmentRow {
    department_id: i64,
    name: String,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: DepartmentId::new(row.department_id),
            name: row.name,
        }
    }
}

/// Retrieves a user by ID, archived or not.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user(conn: &mut SqliteConnection, user_id: UserId) -> Result<Option<User>, PersistenceError> {
    debug!(user_id = %user_id, "Looking up user");

    users::table
        .filter(users::user_id.eq(user_id.value()))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .map(UserRow::into_domain)
        .transpose()
}

/// Retrieves a user by email address, ignoring case.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user has this email.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<User>, PersistenceError> {
    debug!("Looking up user by email");

    // The column is declared COLLATE NOCASE.
    users::table
        .filter(users::email.eq(email.trim()))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .map(UserRow::into_domain)
        .transpose()
}

/// Lists users ordered by name.
///
/// Archived users are only included when `include_archived` is set.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(
    conn: &mut SqliteConnection,
    include_archived: bool,
) -> Result<Vec<User>, PersistenceError> {
    let mut query = users::table.select(UserRow::as_select()).into_boxed();
    if !include_archived {
        query = query.filter(users::is_archived.eq(0));
    }

    query
        .order((users::name.asc(), users::user_id.asc()))
        .load::<UserRow>(conn)?
        .into_iter()
        .map(UserRow::into_domain)
        .collect()
}

/// Counts users, archived included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(users::table.count().get_result(conn)?)
}

/// Retrieves a department by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the department is not found.
pub fn get_department(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
) -> Result<Option<Department>, PersistenceError> {
    Ok(departments::table
        .filter(departments::department_id.eq(department_id.value()))
        .select(DepartmentRow::as_select())
        .first(conn)
        .optional()?
        .map(Department::from))
}

/// Lists departments ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_departments(conn: &mut SqliteConnection) -> Result<Vec<Department>, PersistenceError> {
    Ok(departments::table
        .select(DepartmentRow::as_select())
        .order((departments::name.asc(), departments::department_id.asc()))
        .load::<DepartmentRow>(conn)?
        .into_iter()
        .map(Department::from)
        .collect())
}
