// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column encodings.
//!
//! Timestamps are stored as RFC 3339 text in UTC truncated to whole
//! seconds, so stored values sort chronologically as strings. Calendar
//! days are stored as `YYYY-MM-DD`. Day counts are stored as integer half
//! days.

use std::str::FromStr;

use finyearly_domain::{DayCount, DomainError};
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::error::PersistenceError;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Encodes an instant for storage.
///
/// # Errors
///
/// Returns an error if the instant cannot be represented.
pub fn encode_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Decodes a stored instant.
///
/// # Errors
///
/// Returns an error if the text is not RFC 3339.
pub fn decode_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::SerializationError(format!("Invalid timestamp '{value}': {e}"))
    })
}

/// Encodes a calendar day for storage.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn encode_date(value: Date) -> Result<String, PersistenceError> {
    value
        .format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Decodes a stored calendar day.
///
/// # Errors
///
/// Returns an error if the text is not `YYYY-MM-DD`.
pub fn decode_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| {
        PersistenceError::SerializationError(format!("Invalid date '{value}': {e}"))
    })
}

/// Decodes a stored enum column such as a role or status.
///
/// # Errors
///
/// Returns an error if the text is not a known value.
pub fn decode_enum<T>(value: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Decodes a half-day count column.
#[must_use]
pub const fn decode_day_count(half_days: i32) -> DayCount {
    DayCount::from_half_days(half_days)
}

/// Converts an integer flag column.
#[must_use]
pub const fn decode_flag(value: i32) -> bool {
    value != 0
}
