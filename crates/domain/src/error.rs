// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User name is empty or invalid.
    InvalidName(String),
    /// User email is empty or malformed.
    InvalidEmail(String),
    /// Department name is empty or invalid.
    InvalidDepartmentName(String),
    /// Role string is not one of the known roles.
    InvalidRole(String),
    /// Day half string is not `full`, `am` or `pm`.
    InvalidDayHalf(String),
    /// Request status string is not a known status.
    InvalidRequestStatus(String),
    /// A day count is not a finite multiple of half a day.
    InvalidDayCount {
        /// The offending value, as supplied.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// An allowance value is out of range.
    InvalidAllowance(String),
    /// Financial year definition is invalid.
    InvalidFinancialYear(String),
    /// Financial year overlaps an existing financial year.
    OverlappingFinancialYear {
        /// The name of the financial year being created.
        name: String,
        /// The name of the existing financial year it overlaps.
        existing: String,
    },
    /// A request status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidDepartmentName(msg) => write!(f, "Invalid department name: {msg}"),
            Self::InvalidRole(role) => {
                write!(
                    f,
                    "Invalid role: '{role}'. Must be 'user', 'manager' or 'admin'"
                )
            }
            Self::InvalidDayHalf(half) => {
                write!(f, "Invalid day half: '{half}'. Must be 'full', 'am' or 'pm'")
            }
            Self::InvalidRequestStatus(status) => {
                write!(
                    f,
                    "Invalid request status: '{status}'. Must be 'pending', 'approved' or 'denied'"
                )
            }
            Self::InvalidDayCount { value, reason } => {
                write!(f, "Invalid day count {value}: {reason}")
            }
            Self::InvalidAllowance(msg) => write!(f, "Invalid allowance: {msg}"),
            Self::InvalidFinancialYear(msg) => write!(f, "Invalid financial year: {msg}"),
            Self::OverlappingFinancialYear { name, existing } => {
                write!(
                    f,
                    "Financial year '{name}' overlaps existing financial year '{existing}'"
                )
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(
                    f,
                    "Cannot transition request from '{from}' to '{to}': {reason}"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
