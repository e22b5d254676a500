// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::allowance_policy::AllowancePolicyError;
use crate::input::InputError;
use finyearly::CoreError;
use finyearly_domain::DomainError;
use finyearly_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the actor may not perform it.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: cannot {action}: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the actor may not perform it.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: cannot {action}: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { action, reason } => Self::Unauthorized { action, reason },
        }
    }
}

impl From<AllowancePolicyError> for ApiError {
    fn from(err: AllowancePolicyError) -> Self {
        Self::InvalidInput {
            field: String::from("allowance"),
            message: err.to_string(),
        }
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) | DomainError::InvalidDepartmentName(msg) => {
            ApiError::InvalidInput {
                field: String::from("name"),
                message: msg,
            }
        }
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidRole(_) => ApiError::InvalidInput {
            field: String::from("role"),
            message: err.to_string(),
        },
        DomainError::InvalidDayHalf(_) => ApiError::InvalidInput {
            field: String::from("half"),
            message: err.to_string(),
        },
        DomainError::InvalidRequestStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message: err.to_string(),
        },
        DomainError::InvalidDayCount { .. } => ApiError::InvalidInput {
            field: String::from("days"),
            message: err.to_string(),
        },
        DomainError::InvalidAllowance(msg) => ApiError::InvalidInput {
            field: String::from("allowance"),
            message: msg,
        },
        DomainError::InvalidFinancialYear(msg) => ApiError::InvalidInput {
            field: String::from("financial_year"),
            message: msg,
        },
        DomainError::OverlappingFinancialYear { name, existing } => {
            ApiError::DomainRuleViolation {
                rule: String::from("non_overlapping_financial_years"),
                message: format!(
                    "Financial year '{name}' overlaps existing financial year '{existing}'"
                ),
            }
        }
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("pending_requests_only"),
                message: format!("Cannot move request from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::InvalidRange { .. } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: err.to_string(),
        },
        CoreError::NoWorkingDays { .. } => ApiError::DomainRuleViolation {
            rule: String::from("working_days_required"),
            message: err.to_string(),
        },
        CoreError::AllowanceExceeded { .. } => ApiError::DomainRuleViolation {
            rule: String::from("allowance_exceeded"),
            message: err.to_string(),
        },
        CoreError::OutsideFinancialYear { .. } => ApiError::DomainRuleViolation {
            rule: String::from("within_financial_year"),
            message: err.to_string(),
        },
        CoreError::NotFound { resource, id } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message: format!("{resource} {id} does not exist"),
        },
        CoreError::InvalidTransition { from, to, reason } => {
            translate_domain_error(DomainError::InvalidStatusTransition { from, to, reason })
        }
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::PersistenceFailure(msg) => ApiError::Internal {
            message: format!("Persistence failure: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateEmail(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: err.to_string(),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        _ => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
