// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage collaborators for lifecycle and allowance operations.
//!
//! Every method is a point read or write. None of them wrap a transaction;
//! each operation in this crate is a read-then-write sequence.

use crate::error::CoreError;
use finyearly_domain::{
    DayCount, FinancialYear, FinancialYearId, HolidayRequest, NewHolidayRequest, RequestId,
    RequestStatus, User, UserId,
};
use time::OffsetDateTime;

/// A failure reported by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    message: String,
}

impl RepositoryError {
    /// Creates a repository error with the store's message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the store's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RepositoryError {}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        Self::PersistenceFailure(err.message)
    }
}

/// Looks up users.
pub trait UserRepository {
    /// Returns the user, archived or not, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_user(&mut self, user_id: UserId) -> Result<Option<User>, RepositoryError>;
}

/// Looks up financial years.
pub trait FinancialYearRepository {
    /// Returns the financial year if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_financial_year(
        &mut self,
        financial_year_id: FinancialYearId,
    ) -> Result<Option<FinancialYear>, RepositoryError>;

    /// Returns every financial year, ordered by start.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_financial_years(&mut self) -> Result<Vec<FinancialYear>, RepositoryError>;
}

/// Looks up configured allowances.
pub trait AllowanceRepository {
    /// Returns the explicit allowance for a user in a financial year, if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_allowance_record(
        &mut self,
        user_id: UserId,
        financial_year_id: FinancialYearId,
    ) -> Result<Option<DayCount>, RepositoryError>;

    /// Returns the organisation-wide default allowance.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_default_allowance(&mut self) -> Result<DayCount, RepositoryError>;
}

/// Reads and writes holiday requests.
pub trait RequestRepository {
    /// Returns the request if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_request(
        &mut self,
        request_id: RequestId,
    ) -> Result<Option<HolidayRequest>, RepositoryError>;

    /// Returns the approved requests of a user in a financial year.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_approved_requests(
        &mut self,
        user_id: UserId,
        financial_year_id: FinancialYearId,
    ) -> Result<Vec<HolidayRequest>, RepositoryError>;

    /// Persists a new `pending` request and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn create_request(
        &mut self,
        request: &NewHolidayRequest,
    ) -> Result<HolidayRequest, RepositoryError>;

    /// Writes a review outcome and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the request does not exist.
    fn update_request_status(
        &mut self,
        request_id: RequestId,
        status: RequestStatus,
        reviewed_by: UserId,
        reviewed_at: OffsetDateTime,
    ) -> Result<HolidayRequest, RepositoryError>;

    /// Deletes a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn delete_request(&mut self, request_id: RequestId) -> Result<(), RepositoryError>;
}

/// Everything the lifecycle and allowance operations read and write.
pub trait LeaveStore:
    UserRepository + FinancialYearRepository + AllowanceRepository + RequestRepository
{
}

impl<T> LeaveStore for T where
    T: UserRepository + FinancialYearRepository + AllowanceRepository + RequestRepository + ?Sized
{
}
