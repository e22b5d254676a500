// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and department mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use finyearly_domain::{DepartmentId, UserId, UserProfile};
use time::OffsetDateTime;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{departments, users};
use crate::encoding::encode_timestamp;
use crate::error::PersistenceError;

fn map_user_write_error(err: diesel::result::Error, email: &str) -> PersistenceError {
    match err {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::DuplicateEmail(email.to_string())
        }
        other => PersistenceError::from(other),
    }
}

/// Creates a new user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `profile` - Name, email, role, department and avatar
/// * `created_at` - Creation time
///
/// # Errors
///
/// Returns an error if the email is already in use or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    profile: &UserProfile,
    created_at: OffsetDateTime,
) -> Result<UserId, PersistenceError> {
    let email: &str = profile.email.trim();
    info!(
        name = %profile.name,
        role = %profile.role,
        department_id = %profile.department_id,
        "Creating user"
    );

    diesel::insert_into(users::table)
        .values((
            users::name.eq(profile.name.trim()),
            users::email.eq(email),
            users::role.eq(profile.role.as_str()),
            users::department_id.eq(profile.department_id.value()),
            users::avatar_url.eq(profile.avatar_url.as_deref()),
            users::is_archived.eq(0),
            users::created_at.eq(encode_timestamp(created_at)?),
        ))
        .execute(conn)
        .map_err(|e| map_user_write_error(e, email))?;

    let user_id: i64 = get_last_insert_rowid(conn)?;
    info!(user_id, "User created");
    Ok(UserId::new(user_id))
}

/// Replaces the editable fields of a user.
///
/// # Errors
///
/// Returns an error if:
/// - The user does not exist
/// - The email is already used by another user
/// - The update fails
pub fn update_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
    profile: &UserProfile,
) -> Result<(), PersistenceError> {
    let email: &str = profile.email.trim();
    info!(user_id = %user_id, "Updating user");

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id.value()))
        .set((
            users::name.eq(profile.name.trim()),
            users::email.eq(email),
            users::role.eq(profile.role.as_str()),
            users::department_id.eq(profile.department_id.value()),
            users::avatar_url.eq(profile.avatar_url.as_deref()),
        ))
        .execute(conn)
        .map_err(|e| map_user_write_error(e, email))?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }
    Ok(())
}

/// Archives a user. Their requests are kept.
///
/// # Errors
///
/// Returns an error if the user does not exist or the update fails.
pub fn archive_user(conn: &mut SqliteConnection, user_id: UserId) -> Result<(), PersistenceError> {
    info!(user_id = %user_id, "Archiving user");

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id.value()))
        .set(users::is_archived.eq(1))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("User {user_id}")));
    }
    Ok(())
}

/// Creates a department.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_department(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<DepartmentId, PersistenceError> {
    info!(name, "Creating department");

    diesel::insert_into(departments::table)
        .values(departments::name.eq(name.trim()))
        .execute(conn)?;

    Ok(DepartmentId::new(get_last_insert_rowid(conn)?))
}

/// Renames a department.
///
/// # Errors
///
/// Returns an error if the department does not exist or the update fails.
pub fn rename_department(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
    name: &str,
) -> Result<(), PersistenceError> {
    info!(department_id = %department_id, name, "Renaming department");

    let rows_affected: usize = diesel::update(departments::table)
        .filter(departments::department_id.eq(department_id.value()))
        .set(departments::name.eq(name.trim()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Department {department_id}"
        )));
    }
    Ok(())
}

/// Deletes a department. Users referencing it are left unchanged.
///
/// # Errors
///
/// Returns an error if the department does not exist or the delete fails.
pub fn delete_department(
    conn: &mut SqliteConnection,
    department_id: DepartmentId,
) -> Result<(), PersistenceError> {
    info!(department_id = %department_id, "Deleting department");

    let rows_affected: usize = diesel::delete(departments::table)
        .filter(departments::department_id.eq(department_id.value()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Department {department_id}"
        )));
    }
    Ok(())
}
