// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use finyearly_domain::{
    Department, FinancialYear, Role, StaticHolidayCalendar, User, UserProfile,
};
use finyearly_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{AuthenticatedActor, CreateHolidayRequestRequest};

/// Fixed clock for tests: 1 June 2025, 09:30 UTC.
pub fn now() -> OffsetDateTime {
    datetime!(2025-06-01 09:30:00 UTC)
}

pub fn calendar() -> StaticHolidayCalendar {
    StaticHolidayCalendar::england_and_wales()
}

/// Two departments, an admin, a manager with one report in Engineering,
/// a salesperson and the 25/26 financial year.
pub struct TestOrg {
    pub persistence: Persistence,
    pub engineering: Department,
    pub sales: Department,
    pub admin: User,
    pub manager: User,
    pub engineer: User,
    pub salesperson: User,
    pub financial_year: FinancialYear,
}

impl TestOrg {
    pub fn actor(user: &User) -> AuthenticatedActor {
        AuthenticatedActor::from_user(user)
    }
}

fn add_user(
    persistence: &mut Persistence,
    name: &str,
    email: &str,
    role: Role,
    department: &Department,
) -> User {
    let profile: UserProfile = UserProfile {
        name: name.to_string(),
        email: email.to_string(),
        role,
        department_id: department.id,
        avatar_url: None,
    };
    persistence
        .create_user(&profile, now())
        .expect("Failed to create user")
}

pub fn create_test_org() -> TestOrg {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create persistence");

    let engineering: Department = persistence
        .create_department("Engineering")
        .expect("Failed to create department");
    let sales: Department = persistence
        .create_department("Sales")
        .expect("Failed to create department");

    let admin: User = add_user(
        &mut persistence,
        "Avery Admin",
        "avery@example.com",
        Role::Admin,
        &sales,
    );
    let manager: User = add_user(
        &mut persistence,
        "Morgan Manager",
        "morgan@example.com",
        Role::Manager,
        &engineering,
    );
    let engineer: User = add_user(
        &mut persistence,
        "Ellis Engineer",
        "ellis@example.com",
        Role::User,
        &engineering,
    );
    let salesperson: User = add_user(
        &mut persistence,
        "Sam Sales",
        "sam@example.com",
        Role::User,
        &sales,
    );

    let financial_year: FinancialYear = persistence
        .create_financial_year(
            "25/26",
            datetime!(2025-04-01 00:00:00 UTC),
            datetime!(2026-03-31 23:59:59 UTC),
        )
        .expect("Failed to create financial year");

    TestOrg {
        persistence,
        engineering,
        sales,
        admin,
        manager,
        engineer,
        salesperson,
        financial_year,
    }
}

pub fn booking(start_date: &str, end_date: &str) -> CreateHolidayRequestRequest {
    CreateHolidayRequestRequest {
        financial_year_id: None,
        start_date: start_date.to_string(),
        start_half: None,
        end_date: end_date.to_string(),
        end_half: None,
    }
}
