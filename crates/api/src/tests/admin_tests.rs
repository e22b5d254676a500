// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use finyearly_domain::DayCount;

use super::helpers::{TestOrg, create_test_org, now};
use crate::{
    AllowanceRecordResponse, AllowanceResponse, ApiError, AuthenticatedActor,
    CreateFinancialYearRequest, DepartmentInfo, DepartmentRequest, FinancialYearInfo,
    ListDepartmentsResponse, ListFinancialYearsResponse, ListUsersResponse, SetAllowanceRequest,
    SettingsResponse, UpdateSettingsRequest, UserInfo, UserRequest, archive_user,
    create_department, create_financial_year, create_user, delete_department, get_allowance,
    get_settings, list_departments, list_financial_years, list_users, rename_department,
    set_allowance, update_settings, update_user,
};

fn user_request(name: &str, email: &str, role: &str, department_id: i64) -> UserRequest {
    UserRequest {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        department_id,
        avatar_url: None,
    }
}

fn year_request(name: &str, start_date: &str, end_date: &str) -> CreateFinancialYearRequest {
    CreateFinancialYearRequest {
        name: name.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
    }
}

// ============================================================================
// Users
// ============================================================================

#[test]
fn test_create_user() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    let mut request: UserRequest = user_request(
        " Riley Recruit ",
        "riley@example.com",
        "Manager",
        org.sales.id.value(),
    );
    request.avatar_url = Some(String::from("https://example.com/riley.png"));
    let created: UserInfo = create_user(&mut org.persistence, &admin, &request, now()).unwrap();

    assert_eq!(created.name, "Riley Recruit");
    assert_eq!(created.role, "manager");
    assert_eq!(created.department_name.as_deref(), Some("Sales"));
    assert_eq!(
        created.avatar_url.as_deref(),
        Some("https://example.com/riley.png")
    );
    assert_eq!(created.created_at, "2025-06-01T09:30:00Z");
}

#[test]
fn test_create_user_validation() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);
    let department_id: i64 = org.engineering.id.value();

    let cases: Vec<(UserRequest, &str)> = vec![
        (user_request("", "x@example.com", "user", department_id), "name"),
        (user_request("No At", "not-an-email", "user", department_id), "email"),
        (user_request("Dup", "ELLIS@example.com", "user", department_id), "email"),
        (user_request("Bad Role", "b@example.com", "owner", department_id), "role"),
    ];

    for (request, expected_field) in cases {
        let result = create_user(&mut org.persistence, &admin, &request, now());
        assert!(
            matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == expected_field),
            "expected invalid {expected_field}, got {result:?}"
        );
    }

    let missing_department = create_user(
        &mut org.persistence,
        &admin,
        &user_request("Lost", "lost@example.com", "user", 999),
        now(),
    );
    assert!(matches!(
        missing_department,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Department"
    ));
}

#[test]
fn test_update_user_keeps_own_email() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    let updated: UserInfo = update_user(
        &mut org.persistence,
        &admin,
        org.engineer.id.value(),
        &user_request("Ellis Lead", "ellis@example.com", "manager", org.sales.id.value()),
    )
    .unwrap();

    assert_eq!(updated.name, "Ellis Lead");
    assert_eq!(updated.role, "manager");
    assert_eq!(updated.department_id, org.sales.id.value());

    let clash = update_user(
        &mut org.persistence,
        &admin,
        org.engineer.id.value(),
        &user_request("Ellis Lead", "sam@example.com", "manager", org.sales.id.value()),
    );
    assert!(matches!(clash, Err(ApiError::InvalidInput { ref field, .. }) if field == "email"));

    let missing = update_user(
        &mut org.persistence,
        &admin,
        999,
        &user_request("Ghost", "ghost@example.com", "user", org.sales.id.value()),
    );
    assert!(matches!(missing, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_archive_user_hides_from_listing() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    archive_user(&mut org.persistence, &admin, org.salesperson.id.value()).unwrap();

    let listed: ListUsersResponse = list_users(&mut org.persistence, &admin).unwrap();
    let names: Vec<&str> = listed.users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Avery Admin", "Ellis Engineer", "Morgan Manager"]);

    let archived = org.persistence.get_user(org.salesperson.id).unwrap().unwrap();
    assert!(archived.archived);
}

#[test]
fn test_admin_cannot_archive_self() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    let result = archive_user(&mut org.persistence, &admin, org.admin.id.value());

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "cannot_archive_self"
    ));
}

// ============================================================================
// Departments
// ============================================================================

#[test]
fn test_department_management() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    let support: DepartmentInfo = create_department(
        &mut org.persistence,
        &admin,
        &DepartmentRequest {
            name: String::from(" Support "),
        },
    )
    .unwrap();
    assert_eq!(support.name, "Support");

    let renamed: DepartmentInfo = rename_department(
        &mut org.persistence,
        &admin,
        support.department_id,
        &DepartmentRequest {
            name: String::from("Customer Support"),
        },
    )
    .unwrap();
    assert_eq!(renamed.department_id, support.department_id);

    let listed: ListDepartmentsResponse = list_departments(&mut org.persistence, &admin).unwrap();
    let names: Vec<&str> = listed.departments.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Customer Support", "Engineering", "Sales"]);

    let blank = create_department(
        &mut org.persistence,
        &admin,
        &DepartmentRequest {
            name: String::from("   "),
        },
    );
    assert!(matches!(blank, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_deleting_department_keeps_users() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    delete_department(&mut org.persistence, &admin, org.engineering.id.value()).unwrap();

    let listed: ListUsersResponse = list_users(&mut org.persistence, &admin).unwrap();
    let engineer: &UserInfo = listed
        .users
        .iter()
        .find(|u| u.user_id == org.engineer.id.value())
        .unwrap();
    assert_eq!(engineer.department_id, org.engineering.id.value());
    assert_eq!(engineer.department_name, None);

    let again = delete_department(&mut org.persistence, &admin, org.engineering.id.value());
    assert!(matches!(again, Err(ApiError::ResourceNotFound { .. })));
}

// ============================================================================
// Financial years
// ============================================================================

#[test]
fn test_create_financial_year() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    let created: FinancialYearInfo = create_financial_year(
        &mut org.persistence,
        &admin,
        &year_request("26/27", "2026-04-01", "2027-03-31"),
    )
    .unwrap();
    assert_eq!(created.start_date, "2026-04-01");
    assert_eq!(created.end_date, "2027-03-31");

    let years: ListFinancialYearsResponse = list_financial_years(&mut org.persistence).unwrap();
    let names: Vec<&str> = years.financial_years.iter().map(|y| y.name.as_str()).collect();
    assert_eq!(names, vec!["25/26", "26/27"]);
    assert_eq!(years.current_financial_year_id, Some(created.financial_year_id));
}

#[test]
fn test_create_financial_year_validation() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    let overlapping = create_financial_year(
        &mut org.persistence,
        &admin,
        &year_request("Calendar 2026", "2026-01-01", "2026-12-31"),
    );
    assert!(matches!(
        overlapping,
        Err(ApiError::DomainRuleViolation { ref rule, .. })
            if rule == "non_overlapping_financial_years"
    ));

    let reversed = create_financial_year(
        &mut org.persistence,
        &admin,
        &year_request("Backwards", "2027-03-31", "2026-04-01"),
    );
    assert!(matches!(reversed, Err(ApiError::InvalidInput { .. })));

    let unnamed = create_financial_year(
        &mut org.persistence,
        &admin,
        &year_request(" ", "2026-04-01", "2027-03-31"),
    );
    assert!(matches!(unnamed, Err(ApiError::InvalidInput { .. })));

    let malformed = create_financial_year(
        &mut org.persistence,
        &admin,
        &year_request("26/27", "01/04/2026", "2027-03-31"),
    );
    assert!(matches!(
        malformed,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "start_date"
    ));
}

// ============================================================================
// Allowances and settings
// ============================================================================

#[test]
fn test_set_allowance_overrides_default() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);
    let engineer: AuthenticatedActor = TestOrg::actor(&org.engineer);

    let record: AllowanceRecordResponse = set_allowance(
        &mut org.persistence,
        &admin,
        &SetAllowanceRequest {
            user_id: org.engineer.id.value(),
            financial_year_id: org.financial_year.id.value(),
            total_allowance: 27.5,
        },
    )
    .unwrap();
    assert_eq!(record.total_allowance, DayCount::from_half_days(55));

    let balance: AllowanceResponse = get_allowance(&mut org.persistence, &engineer, None).unwrap();
    assert_eq!(balance.total_allowance, DayCount::from_half_days(55));
    assert_eq!(balance.remaining_days, DayCount::from_half_days(55));
}

#[test]
fn test_set_allowance_validation() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);

    for total_allowance in [-1.0, 10.25, f64::NAN] {
        let result = set_allowance(
            &mut org.persistence,
            &admin,
            &SetAllowanceRequest {
                user_id: org.engineer.id.value(),
                financial_year_id: org.financial_year.id.value(),
                total_allowance,
            },
        );
        assert!(matches!(
            result,
            Err(ApiError::InvalidInput { ref field, .. }) if field == "allowance"
        ));
    }

    let unknown_year = set_allowance(
        &mut org.persistence,
        &admin,
        &SetAllowanceRequest {
            user_id: org.engineer.id.value(),
            financial_year_id: 999,
            total_allowance: 20.0,
        },
    );
    assert!(matches!(unknown_year, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_settings_round_trip() {
    let mut org: TestOrg = create_test_org();
    let admin: AuthenticatedActor = TestOrg::actor(&org.admin);
    let salesperson: AuthenticatedActor = TestOrg::actor(&org.salesperson);

    let initial: SettingsResponse = get_settings(&mut org.persistence, &admin).unwrap();
    assert_eq!(initial.default_allowance, DayCount::from_whole_days(25));

    let updated: SettingsResponse = update_settings(
        &mut org.persistence,
        &admin,
        &UpdateSettingsRequest {
            default_allowance: 22.5,
        },
    )
    .unwrap();
    assert_eq!(updated.default_allowance, DayCount::from_half_days(45));

    let balance: AllowanceResponse =
        get_allowance(&mut org.persistence, &salesperson, None).unwrap();
    assert_eq!(balance.total_allowance, DayCount::from_half_days(45));

    let invalid = update_settings(
        &mut org.persistence,
        &admin,
        &UpdateSettingsRequest {
            default_allowance: 0.3,
        },
    );
    assert!(matches!(invalid, Err(ApiError::InvalidInput { .. })));
}
