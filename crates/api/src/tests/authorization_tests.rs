// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use finyearly_domain::{Role, User};

use super::helpers::{TestOrg, booking, calendar, create_test_org, now};
use crate::{
    ApiError, AuthenticatedActor, AuthorizationService, CreateFinancialYearRequest,
    DepartmentRequest, RequestInfo, ReviewRequestRequest, UpdateSettingsRequest, UserRequest,
    cancel_request, create_department, create_financial_year, create_request, create_user,
    get_settings, list_review_queue, list_users, review_request, update_settings,
};

fn assert_unauthorized<T: std::fmt::Debug>(result: Result<T, ApiError>) {
    assert!(
        matches!(result, Err(ApiError::Unauthorized { .. })),
        "expected Unauthorized, got {result:?}"
    );
}

#[test]
fn test_admin_operations_reject_non_admins() {
    let mut org: TestOrg = create_test_org();

    for user in [org.manager.clone(), org.engineer.clone()] {
        let actor: AuthenticatedActor = TestOrg::actor(&user);

        assert_unauthorized(list_users(&mut org.persistence, &actor));
        assert_unauthorized(create_department(
            &mut org.persistence,
            &actor,
            &DepartmentRequest {
                name: String::from("Support"),
            },
        ));
        assert_unauthorized(create_user(
            &mut org.persistence,
            &actor,
            &UserRequest {
                name: String::from("New Starter"),
                email: String::from("new@example.com"),
                role: String::from("user"),
                department_id: org.engineering.id.value(),
                avatar_url: None,
            },
            now(),
        ));
        assert_unauthorized(create_financial_year(
            &mut org.persistence,
            &actor,
            &CreateFinancialYearRequest {
                name: String::from("26/27"),
                start_date: String::from("2026-04-01"),
                end_date: String::from("2027-03-31"),
            },
        ));
        assert_unauthorized(get_settings(&mut org.persistence, &actor));
        assert_unauthorized(update_settings(
            &mut org.persistence,
            &actor,
            &UpdateSettingsRequest {
                default_allowance: 30.0,
            },
        ));
    }
}

#[test]
fn test_users_cannot_view_review_queue() {
    let mut org: TestOrg = create_test_org();
    let actor: AuthenticatedActor = TestOrg::actor(&org.engineer);

    assert_unauthorized(list_review_queue(&mut org.persistence, &actor, None, None));
}

#[test]
fn test_review_scope_follows_role() {
    let org: TestOrg = create_test_org();

    assert_eq!(
        AuthorizationService::review_scope(&TestOrg::actor(&org.manager)),
        Some(org.engineering.id)
    );
    assert_eq!(
        AuthorizationService::review_scope(&TestOrg::actor(&org.admin)),
        None
    );
}

#[test]
fn test_manager_reviews_only_their_department() {
    let org: TestOrg = create_test_org();
    let manager: AuthenticatedActor = TestOrg::actor(&org.manager);

    assert!(AuthorizationService::authorize_review(&manager, &org.engineer).is_ok());
    assert!(AuthorizationService::authorize_review(&manager, &org.salesperson).is_err());
    assert!(AuthorizationService::authorize_review(&manager, &org.manager).is_err());
}

#[test]
fn test_admin_reviews_anyone() {
    let org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    for user in [&org.engineer, &org.salesperson, &org.manager, &org.admin] {
        assert!(AuthorizationService::authorize_review(&admin, user).is_ok());
    }
}

#[test]
fn test_manager_cannot_review_other_department_request() {
    let mut org: TestOrg = create_test_org();
    let salesperson: AuthenticatedActor = TestOrg::actor(&org.salesperson);
    let created: RequestInfo = create_request(
        &mut org.persistence,
        &calendar(),
        &salesperson,
        &booking("2025-09-01", "2025-09-02"),
        now(),
    )
    .unwrap();

    let manager: AuthenticatedActor = TestOrg::actor(&org.manager);
    let result = review_request(
        &mut org.persistence,
        &manager,
        created.request_id,
        &ReviewRequestRequest {
            decision: String::from("approved"),
        },
        now(),
    );

    assert_unauthorized(result);
    let stored = org
        .persistence
        .get_request(finyearly_domain::RequestId::new(created.request_id))
        .unwrap()
        .unwrap();
    assert_eq!(stored.status.as_str(), "pending");
}

#[test]
fn test_only_owner_or_admin_can_cancel() {
    let mut org: TestOrg = create_test_org();
    let engineer: AuthenticatedActor = TestOrg::actor(&org.engineer);
    let first: RequestInfo = create_request(
        &mut org.persistence,
        &calendar(),
        &engineer,
        &booking("2025-09-01", "2025-09-01"),
        now(),
    )
    .unwrap();
    let second: RequestInfo = create_request(
        &mut org.persistence,
        &calendar(),
        &engineer,
        &booking("2025-09-08", "2025-09-08"),
        now(),
    )
    .unwrap();

    let manager: AuthenticatedActor = TestOrg::actor(&org.manager);
    assert_unauthorized(cancel_request(&mut org.persistence, &manager, first.request_id));

    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);
    assert!(cancel_request(&mut org.persistence, &admin, first.request_id).is_ok());
    assert!(cancel_request(&mut org.persistence, &engineer, second.request_id).is_ok());
}

#[test]
fn test_role_changes_take_effect_through_actor() {
    let org: TestOrg = create_test_org();
    let promoted: User = User {
        role: Role::Admin,
        ..org.engineer.clone()
    };

    assert!(
        AuthorizationService::authorize_admin(&TestOrg::actor(&promoted), "list_users").is_ok()
    );
    assert!(
        AuthorizationService::authorize_admin(&TestOrg::actor(&org.engineer), "list_users")
            .is_err()
    );
}
