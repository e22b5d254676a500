// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DayCount, DepartmentId, DomainError, Role, User, UserId, UserProfile, validate_allowance,
    validate_department_name, validate_email_unique, validate_user_profile,
};
use time::macros::datetime;

fn create_test_profile(name: &str, email: &str) -> UserProfile {
    UserProfile {
        name: name.to_string(),
        email: email.to_string(),
        role: Role::User,
        department_id: DepartmentId::new(1),
        avatar_url: None,
    }
}

fn create_test_user(id: i64, email: &str) -> User {
    User {
        id: UserId::new(id),
        name: format!("User {id}"),
        email: email.to_string(),
        role: Role::User,
        department_id: DepartmentId::new(1),
        created_at: datetime!(2025-01-01 00:00 UTC),
        avatar_url: None,
        archived: false,
    }
}

#[test]
fn test_validate_user_profile_accepts_valid_profile() {
    let profile: UserProfile = create_test_profile("Sales Person", "sales@example.com");
    assert!(validate_user_profile(&profile).is_ok());
}

#[test]
fn test_validate_user_profile_rejects_empty_name() {
    let profile: UserProfile = create_test_profile("   ", "sales@example.com");
    assert!(matches!(
        validate_user_profile(&profile),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_user_profile_rejects_malformed_email() {
    for email in ["", "no-at-sign", "@example.com", "someone@", "a@b@c"] {
        let profile: UserProfile = create_test_profile("Someone", email);
        assert!(
            matches!(
                validate_user_profile(&profile),
                Err(DomainError::InvalidEmail(_))
            ),
            "expected '{email}' to be rejected"
        );
    }
}

#[test]
fn test_validate_email_unique_is_case_insensitive() {
    let users: Vec<User> = vec![create_test_user(1, "admin@example.com")];
    assert!(matches!(
        validate_email_unique("Admin@Example.com", None, &users),
        Err(DomainError::InvalidEmail(_))
    ));
    assert!(validate_email_unique("manager@example.com", None, &users).is_ok());
}

#[test]
fn test_validate_email_unique_ignores_the_edited_user() {
    let users: Vec<User> = vec![
        create_test_user(1, "admin@example.com"),
        create_test_user(2, "manager@example.com"),
    ];
    assert!(validate_email_unique("admin@example.com", Some(&users[0]), &users).is_ok());
    assert!(validate_email_unique("manager@example.com", Some(&users[0]), &users).is_err());
}

#[test]
fn test_validate_department_name() {
    assert!(validate_department_name("Engineering").is_ok());
    assert!(matches!(
        validate_department_name(""),
        Err(DomainError::InvalidDepartmentName(_))
    ));
}

#[test]
fn test_validate_allowance_rejects_negative() {
    assert!(validate_allowance(DayCount::ZERO).is_ok());
    assert!(validate_allowance(DayCount::from_half_days(51)).is_ok());
    assert!(matches!(
        validate_allowance(DayCount::from_half_days(-1)),
        Err(DomainError::InvalidAllowance(_))
    ));
}
