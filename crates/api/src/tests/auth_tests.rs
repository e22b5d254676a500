// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;

use super::helpers::{TestOrg, create_test_org, now};
use crate::{
    ApiError, AuthError, AuthenticatedActor, AuthenticationService, LoginRequest, LoginResponse,
    UserInfo, archive_user, login, logout, whoami,
};

#[test]
fn test_login_ignores_email_case() {
    let mut org: TestOrg = create_test_org();

    let response: LoginResponse = login(
        &mut org.persistence,
        &LoginRequest {
            email: String::from("  ELLIS@example.com "),
        },
        now(),
    )
    .unwrap();

    assert!(response.session_token.starts_with("session_"));
    assert_eq!(response.user.user_id, org.engineer.id.value());
    assert_eq!(response.user.department_name.as_deref(), Some("Engineering"));
    assert_eq!(response.expires_at, "2025-07-01T09:30:00Z");
}

#[test]
fn test_login_rejects_unknown_email() {
    let mut org: TestOrg = create_test_org();

    let result: Result<LoginResponse, ApiError> = login(
        &mut org.persistence,
        &LoginRequest {
            email: String::from("nobody@example.com"),
        },
        now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_archived_user_cannot_login() {
    let mut org: TestOrg = create_test_org();
    org.persistence.archive_user(org.salesperson.id).unwrap();

    let result = AuthenticationService::login(&mut org.persistence, "sam@example.com", now());

    assert_eq!(
        result.unwrap_err(),
        AuthError::AuthenticationFailed {
            reason: String::from("User is archived"),
        }
    );
}

#[test]
fn test_session_validates_until_expiry() {
    let mut org: TestOrg = create_test_org();
    let (token, _user, expires_at) =
        AuthenticationService::login(&mut org.persistence, "morgan@example.com", now()).unwrap();

    let (actor, user) =
        AuthenticationService::validate_session(&mut org.persistence, &token, now() + Duration::days(1))
            .unwrap();
    assert_eq!(actor, AuthenticatedActor::from_user(&org.manager));
    assert_eq!(user.id, org.manager.id);

    let expired = AuthenticationService::validate_session(
        &mut org.persistence,
        &token,
        expires_at + Duration::seconds(1),
    );
    assert!(matches!(
        expired,
        Err(AuthError::AuthenticationFailed { ref reason }) if reason == "Session expired"
    ));
}

#[test]
fn test_logout_invalidates_token() {
    let mut org: TestOrg = create_test_org();
    let (token, _user, _expires_at) =
        AuthenticationService::login(&mut org.persistence, "ellis@example.com", now()).unwrap();

    logout(&mut org.persistence, &token).unwrap();

    assert!(AuthenticationService::validate_session(&mut org.persistence, &token, now()).is_err());
}

#[test]
fn test_archiving_a_user_ends_their_sessions() {
    let mut org: TestOrg = create_test_org();
    let (token, _user, _expires_at) =
        AuthenticationService::login(&mut org.persistence, "ellis@example.com", now()).unwrap();

    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);
    archive_user(&mut org.persistence, &admin, org.engineer.id.value()).unwrap();

    assert!(AuthenticationService::validate_session(&mut org.persistence, &token, now()).is_err());
}

#[test]
fn test_tokens_are_unique() {
    let mut org: TestOrg = create_test_org();
    let (first, _, _) =
        AuthenticationService::login(&mut org.persistence, "ellis@example.com", now()).unwrap();
    let (second, _, _) =
        AuthenticationService::login(&mut org.persistence, "ellis@example.com", now()).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_whoami_reports_department() {
    let mut org: TestOrg = create_test_org();
    let engineer = org.engineer.clone();

    let info: UserInfo = whoami(&mut org.persistence, &engineer).unwrap();

    assert_eq!(info.email, "ellis@example.com");
    assert_eq!(info.role, "user");
    assert_eq!(info.department_name.as_deref(), Some("Engineering"));
    assert!(!info.archived);
}
