// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of string-typed request fields.

use finyearly_domain::{DayHalf, RequestStatus, Role};
use thiserror::Error;
use time::Date;
use time::format_description::FormatItem;
use time::macros::format_description;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Status filter value selecting every status.
pub const STATUS_FILTER_ALL: &str = "all";

/// Malformed request fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Not a `YYYY-MM-DD` date.
    #[error("'{value}' is not a date in YYYY-MM-DD form")]
    InvalidDate { field: &'static str, value: String },

    /// Not `full`, `am` or `pm`.
    #[error("'{value}' is not one of full, am or pm")]
    InvalidDayHalf { field: &'static str, value: String },

    /// Not a known status filter.
    #[error("'{value}' is not one of pending, approved, denied or all")]
    InvalidStatusFilter { value: String },

    /// Not a review outcome.
    #[error("'{value}' is not a review decision; expected approved or denied")]
    InvalidDecision { value: String },

    /// Not a known role.
    #[error("'{value}' is not one of user, manager or admin")]
    InvalidRole { value: String },
}

impl InputError {
    /// Returns the name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidDate { field, .. } | Self::InvalidDayHalf { field, .. } => *field,
            Self::InvalidStatusFilter { .. } => "status",
            Self::InvalidDecision { .. } => "decision",
            Self::InvalidRole { .. } => "role",
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the value is not a valid calendar date.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date, InputError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|_| InputError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Parses an optional half-day flag. Absent means `full`.
///
/// # Errors
///
/// Returns an error if the value is present and not `full`, `am` or `pm`.
pub fn parse_day_half(field: &'static str, value: Option<&str>) -> Result<DayHalf, InputError> {
    value.map_or(Ok(DayHalf::Full), |half| {
        half.trim()
            .to_lowercase()
            .parse::<DayHalf>()
            .map_err(|_| InputError::InvalidDayHalf {
                field,
                value: half.to_string(),
            })
    })
}

/// Parses the review queue status filter.
///
/// Absent means `pending`. `all` means no filter and yields `None`.
///
/// # Errors
///
/// Returns an error for any other value.
pub fn parse_status_filter(value: Option<&str>) -> Result<Option<RequestStatus>, InputError> {
    let Some(raw) = value else {
        return Ok(Some(RequestStatus::Pending));
    };

    let normalized: String = raw.trim().to_lowercase();
    if normalized == STATUS_FILTER_ALL {
        return Ok(None);
    }

    normalized
        .parse::<RequestStatus>()
        .map(Some)
        .map_err(|_| InputError::InvalidStatusFilter {
            value: raw.to_string(),
        })
}

/// Parses a review decision: `approved` or `denied`.
///
/// # Errors
///
/// Returns an error for any other value, `pending` included.
pub fn parse_decision(value: &str) -> Result<RequestStatus, InputError> {
    match value.trim().to_lowercase().parse::<RequestStatus>() {
        Ok(status @ (RequestStatus::Approved | RequestStatus::Denied)) => Ok(status),
        _ => Err(InputError::InvalidDecision {
            value: value.to_string(),
        }),
    }
}

/// Parses a role name, ignoring case.
///
/// # Errors
///
/// Returns an error if the value is not a known role.
pub fn parse_role(value: &str) -> Result<Role, InputError> {
    value
        .trim()
        .parse::<Role>()
        .map_err(|_| InputError::InvalidRole {
            value: value.to_string(),
        })
}
