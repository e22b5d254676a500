// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use finyearly_domain::{DayCount, DomainError};
use time::Date;

/// Errors that can occur during request lifecycle and allowance operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The end date precedes the start date.
    InvalidRange {
        /// Requested start date.
        start: Date,
        /// Requested end date.
        end: Date,
    },
    /// The range contains no chargeable working time.
    NoWorkingDays {
        /// Requested start date.
        start: Date,
        /// Requested end date.
        end: Date,
    },
    /// The request costs more than the remaining allowance.
    AllowanceExceeded {
        /// Days the request would consume.
        requested: DayCount,
        /// Days left before the request.
        remaining: DayCount,
    },
    /// A referenced record does not exist.
    NotFound {
        /// The kind of record.
        resource: &'static str,
        /// The identifier that was looked up.
        id: i64,
    },
    /// A request date lies outside the financial year it is charged to.
    OutsideFinancialYear {
        /// The offending date.
        date: Date,
        /// The financial year's name.
        financial_year: String,
    },
    /// The request is not in a state that permits the operation.
    InvalidTransition {
        /// The current status.
        from: String,
        /// The attempted status or operation.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The store failed. Carries the store's message unmodified.
    PersistenceFailure(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "End date {end} is before start date {start}")
            }
            Self::NoWorkingDays { start, end } => {
                write!(f, "No working days between {start} and {end}")
            }
            Self::AllowanceExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "Requested {requested} days exceeds the remaining allowance of {remaining} days"
                )
            }
            Self::NotFound { resource, id } => write!(f, "{resource} {id} not found"),
            Self::OutsideFinancialYear {
                date,
                financial_year,
            } => {
                write!(
                    f,
                    "Date {date} is outside financial year '{financial_year}'"
                )
            }
            Self::InvalidTransition { from, to, reason } => {
                write!(
                    f,
                    "Cannot transition request from '{from}' to '{to}': {reason}"
                )
            }
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::PersistenceFailure(msg) => write!(f, "Persistence failure: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidStatusTransition { from, to, reason } => {
                Self::InvalidTransition { from, to, reason }
            }
            other => Self::DomainViolation(other),
        }
    }
}
