// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the holiday leave tracker.
//!
//! This crate stores users, departments, financial years, allowances,
//! holiday requests, sessions and settings in `SQLite` through Diesel, and
//! implements the store traits of the `finyearly` crate.
//!
//! ## Storage
//!
//! - Schema changes are embedded migrations applied on open
//! - Foreign key enforcement is turned on and verified for every connection
//! - File databases use write-ahead logging
//! - In-memory databases use a unique shared-cache name per adapter, so
//!   tests never see each other's data
//!
//! ## Testing Philosophy
//!
//! - Every test opens its own in-memory database
//! - Lifecycle operations are exercised through the `finyearly` crate
//!   against this adapter, not against mocks

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use finyearly_domain::{
    DayCount, Department, DepartmentId, FinancialYear, FinancialYearId, HolidayRequest,
    NewHolidayRequest, RequestId, RequestStatus, User, UserId, UserProfile,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod encoding;
mod error;
mod mutations;
mod queries;
mod repository;

#[cfg(test)]
mod tests;

pub use data_models::{ReviewQueueEntry, SessionData};
pub use error::PersistenceError;
pub use queries::ReviewQueueFilter;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;
        mutations::allowances::ensure_default_allowance(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::configure_file_database(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;
        mutations::allowances::ensure_default_allowance(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Users and departments
    // ========================================================================

    /// Retrieves a user by ID, archived or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user(&mut self, user_id: UserId) -> Result<Option<User>, PersistenceError> {
        queries::get_user(&mut self.conn, user_id)
    }

    /// Retrieves a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<Option<User>, PersistenceError> {
        queries::get_user_by_email(&mut self.conn, email)
    }

    /// Lists users by name. Archived users only when asked for.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users(&mut self, include_archived: bool) -> Result<Vec<User>, PersistenceError> {
        queries::list_users(&mut self.conn, include_archived)
    }

    /// Counts all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::count_users(&mut self.conn)
    }

    /// Creates a user and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken or the insert fails.
    pub fn create_user(
        &mut self,
        profile: &UserProfile,
        created_at: OffsetDateTime,
    ) -> Result<User, PersistenceError> {
        let user_id: UserId = mutations::create_user(&mut self.conn, profile, created_at)?;
        self.require_user(user_id)
    }

    /// Replaces a user's editable fields and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist, the email is taken, or
    /// the update fails.
    pub fn update_user(
        &mut self,
        user_id: UserId,
        profile: &UserProfile,
    ) -> Result<User, PersistenceError> {
        mutations::update_user(&mut self.conn, user_id, profile)?;
        self.require_user(user_id)
    }

    /// Archives a user and ends their sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or a write fails.
    pub fn archive_user(&mut self, user_id: UserId) -> Result<(), PersistenceError> {
        mutations::archive_user(&mut self.conn, user_id)?;
        mutations::delete_sessions_for_user(&mut self.conn, user_id)?;
        Ok(())
    }

    fn require_user(&mut self, user_id: UserId) -> Result<User, PersistenceError> {
        self.get_user(user_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("User {user_id}")))
    }

    /// Retrieves a department by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_department(
        &mut self,
        department_id: DepartmentId,
    ) -> Result<Option<Department>, PersistenceError> {
        queries::get_department(&mut self.conn, department_id)
    }

    /// Lists departments by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_departments(&mut self) -> Result<Vec<Department>, PersistenceError> {
        queries::list_departments(&mut self.conn)
    }

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_department(&mut self, name: &str) -> Result<Department, PersistenceError> {
        let department_id: DepartmentId = mutations::create_department(&mut self.conn, name)?;
        self.get_department(department_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Department {department_id}")))
    }

    /// Renames a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the department does not exist or the update fails.
    pub fn rename_department(
        &mut self,
        department_id: DepartmentId,
        name: &str,
    ) -> Result<Department, PersistenceError> {
        mutations::rename_department(&mut self.conn, department_id, name)?;
        self.get_department(department_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Department {department_id}")))
    }

    /// Deletes a department. Its users keep their department id.
    ///
    /// # Errors
    ///
    /// Returns an error if the department does not exist or the delete fails.
    pub fn delete_department(&mut self, department_id: DepartmentId) -> Result<(), PersistenceError> {
        mutations::delete_department(&mut self.conn, department_id)
    }

    // ========================================================================
    // Financial years
    // ========================================================================

    /// Retrieves a financial year by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_financial_year(
        &mut self,
        financial_year_id: FinancialYearId,
    ) -> Result<Option<FinancialYear>, PersistenceError> {
        queries::get_financial_year(&mut self.conn, financial_year_id)
    }

    /// Lists financial years by start.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_financial_years(&mut self) -> Result<Vec<FinancialYear>, PersistenceError> {
        queries::list_financial_years(&mut self.conn)
    }

    /// Creates a financial year and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_financial_year(
        &mut self,
        name: &str,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<FinancialYear, PersistenceError> {
        let financial_year_id: FinancialYearId =
            mutations::create_financial_year(&mut self.conn, name, start, end)?;
        self.get_financial_year(financial_year_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Financial year {financial_year_id}"))
        })
    }

    // ========================================================================
    // Allowances and settings
    // ========================================================================

    /// Retrieves the explicit allowance of a user in a financial year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_allowance_record(
        &mut self,
        user_id: UserId,
        financial_year_id: FinancialYearId,
    ) -> Result<Option<DayCount>, PersistenceError> {
        queries::get_allowance_record(&mut self.conn, user_id, financial_year_id)
    }

    /// Sets the allowance of a user in a financial year.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_allowance(
        &mut self,
        user_id: UserId,
        financial_year_id: FinancialYearId,
        total: DayCount,
    ) -> Result<(), PersistenceError> {
        mutations::set_allowance(&mut self.conn, user_id, financial_year_id, total)
    }

    /// Retrieves the default allowance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_default_allowance(&mut self) -> Result<DayCount, PersistenceError> {
        queries::get_default_allowance(&mut self.conn)
    }

    /// Sets the default allowance.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_default_allowance(&mut self, total: DayCount) -> Result<(), PersistenceError> {
        mutations::set_default_allowance(&mut self.conn, total)
    }

    // ========================================================================
    // Holiday requests
    // ========================================================================

    /// Retrieves a request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_request(
        &mut self,
        request_id: RequestId,
    ) -> Result<Option<HolidayRequest>, PersistenceError> {
        queries::get_request(&mut self.conn, request_id)
    }

    /// Lists a user's requests, newest first, optionally for one year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_requests_for_user(
        &mut self,
        user_id: UserId,
        financial_year_id: Option<FinancialYearId>,
    ) -> Result<Vec<HolidayRequest>, PersistenceError> {
        queries::list_requests_for_user(&mut self.conn, user_id, financial_year_id)
    }

    /// Lists the approved requests of a user in a financial year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_approved_requests(
        &mut self,
        user_id: UserId,
        financial_year_id: FinancialYearId,
    ) -> Result<Vec<HolidayRequest>, PersistenceError> {
        queries::list_approved_requests(&mut self.conn, user_id, financial_year_id)
    }

    /// Lists requests for review, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_review_queue(
        &mut self,
        filter: ReviewQueueFilter,
    ) -> Result<Vec<ReviewQueueEntry>, PersistenceError> {
        queries::list_review_queue(&mut self.conn, filter)
    }

    /// Inserts a new `pending` request.
    ///
    /// Lifecycle rules are not checked here; use `finyearly::create_request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_request(
        &mut self,
        request: &NewHolidayRequest,
    ) -> Result<RequestId, PersistenceError> {
        mutations::insert_request(&mut self.conn, request)
    }

    /// Writes a review outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or the update fails.
    pub fn update_request_status(
        &mut self,
        request_id: RequestId,
        status: RequestStatus,
        reviewed_by: UserId,
        reviewed_at: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::update_request_status(&mut self.conn, request_id, status, reviewed_by, reviewed_at)
    }

    /// Deletes a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not exist or the delete fails.
    pub fn delete_request(&mut self, request_id: RequestId) -> Result<(), PersistenceError> {
        mutations::delete_request(&mut self.conn, request_id)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: UserId,
        created_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::create_session(&mut self.conn, session_token, user_id, created_at, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::get_session_by_token(&mut self.conn, session_token)
    }

    /// Records activity on a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(
        &mut self,
        session_id: i64,
        at: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::update_session_activity(&mut self.conn, session_id, at)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::delete_session(&mut self.conn, session_token)
    }

    /// Deletes sessions that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: OffsetDateTime) -> Result<usize, PersistenceError> {
        mutations::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Demo data
    // ========================================================================

    /// Seeds demo data into an empty database. Returns whether data was
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails.
    pub fn seed_demo_data(&mut self, now: OffsetDateTime) -> Result<bool, PersistenceError> {
        mutations::seed_demo_data(&mut self.conn, now)
    }
}
