// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::day_count::DayCount;
use crate::error::DomainError;
use crate::types::{User, UserProfile};

/// Validates the editable fields of a user.
///
/// This function checks field shape only. It does NOT check that the
/// email is unique or that the department exists (that requires context).
///
/// # Arguments
///
/// * `profile` - The profile to validate
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The email is empty or has no `@`
pub fn validate_user_profile(profile: &UserProfile) -> Result<(), DomainError> {
    // Rule: name must not be empty
    if profile.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let email: &str = profile.email.trim();
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }

    // Rule: a local part and a domain separated by a single '@'
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(DomainError::InvalidEmail(format!(
            "'{email}' is not an email address"
        ))),
    }
}

/// Validates that an email address is not already used by another user.
///
/// Emails are compared case-insensitively. `exclude` is the user being
/// edited, whose own address never conflicts.
///
/// # Errors
///
/// Returns an error if another user already has this email.
pub fn validate_email_unique(
    email: &str,
    exclude: Option<&User>,
    existing_users: &[User],
) -> Result<(), DomainError> {
    let clash: bool = existing_users.iter().any(|user| {
        exclude.is_none_or(|excluded| excluded.id != user.id)
            && user.email.eq_ignore_ascii_case(email.trim())
    });

    if clash {
        return Err(DomainError::InvalidEmail(format!(
            "'{}' is already in use",
            email.trim()
        )));
    }
    Ok(())
}

/// Validates a department name.
///
/// # Errors
///
/// Returns an error if the name is empty.
pub fn validate_department_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidDepartmentName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates an allowance value, either a user's explicit allowance or
/// the organisation default.
///
/// # Errors
///
/// Returns an error if the allowance is negative.
pub fn validate_allowance(allowance: DayCount) -> Result<(), DomainError> {
    if allowance.is_negative() {
        return Err(DomainError::InvalidAllowance(format!(
            "Allowance cannot be negative, got {allowance}"
        )));
    }
    Ok(())
}
