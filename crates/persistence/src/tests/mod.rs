// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod financial_year_tests;

use crate::Persistence;
use finyearly_domain::{
    DayCount, DayHalf, Department, FinancialYear, NewHolidayRequest, RequestId, Role, User,
    UserProfile,
};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

/// Fixed clock for tests: 1 June 2025, 09:30 UTC.
pub fn now() -> OffsetDateTime {
    datetime!(2025-06-01 09:30:00 UTC)
}

/// A small organisation: one department, a manager, an employee and the
/// 25/26 financial year.
pub struct Fixture {
    pub persistence: Persistence,
    pub department: Department,
    pub manager: User,
    pub employee: User,
    pub financial_year: FinancialYear,
}

pub fn create_test_profile(name: &str, email: &str, role: Role, department: &Department) -> UserProfile {
    UserProfile {
        name: name.to_string(),
        email: email.to_string(),
        role,
        department_id: department.id,
        avatar_url: None,
    }
}

pub fn create_fixture() -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let department: Department = persistence.create_department("Engineering").unwrap();
    let manager: User = persistence
        .create_user(
            &create_test_profile("Morgan Manager", "morgan@example.com", Role::Manager, &department),
            now(),
        )
        .unwrap();
    let employee: User = persistence
        .create_user(
            &create_test_profile("Ellis Employee", "ellis@example.com", Role::User, &department),
            now(),
        )
        .unwrap();
    let financial_year: FinancialYear = persistence
        .create_financial_year(
            "25/26",
            datetime!(2025-04-01 00:00:00 UTC),
            datetime!(2026-03-31 23:59:59 UTC),
        )
        .unwrap();

    Fixture {
        persistence,
        department,
        manager,
        employee,
        financial_year,
    }
}

/// Inserts a pending full-day request for the fixture's employee.
pub fn insert_test_request(fixture: &mut Fixture, start: Date, end: Date, days: i32) -> RequestId {
    let request: NewHolidayRequest = NewHolidayRequest {
        user_id: fixture.employee.id,
        financial_year_id: fixture.financial_year.id,
        start_date: start,
        start_half: DayHalf::Full,
        end_date: end,
        end_half: DayHalf::Full,
        days_count: DayCount::from_whole_days(days),
        created_at: now(),
    };
    fixture.persistence.insert_request(&request).unwrap()
}
