// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use finyearly_domain::UserId;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::sessions;
use crate::encoding::encode_timestamp;
use crate::error::PersistenceError;

/// Creates a session.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The bearer token
/// * `user_id` - The signed-in user
/// * `created_at` - Login time, also the first activity time
/// * `expires_at` - When the token stops being accepted
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: UserId,
    created_at: OffsetDateTime,
    expires_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    debug!(user_id = %user_id, %expires_at, "Creating session");

    let created_at_str: String = encode_timestamp(created_at)?;
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id.value()),
            sessions::created_at.eq(&created_at_str),
            sessions::last_activity_at.eq(&created_at_str),
            sessions::expires_at.eq(encode_timestamp(expires_at)?),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;
    debug!(session_id, "Session created");
    Ok(session_id)
}

/// Records activity on a session.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
    at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(encode_timestamp(at)?))
        .execute(conn)?;
    Ok(())
}

/// Deletes a session by token. Used for logout.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(conn: &mut SqliteConnection, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;
    Ok(())
}

/// Deletes every session that expired before `now`.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(encode_timestamp(now)?))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}

/// Deletes every session of a user.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_sessions_for_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::user_id.eq(user_id.value()))
        .execute(conn)?;

    info!(user_id = %user_id, "Deleted {} sessions for user", rows_affected);
    Ok(rows_affected)
}
