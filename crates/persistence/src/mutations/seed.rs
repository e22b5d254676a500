// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo data for a fresh database.

use diesel::SqliteConnection;
use diesel::prelude::*;
use finyearly_domain::{
    DayCount, DayHalf, DepartmentId, FinancialYearId, HolidayCalendar, HolidaySet,
    NewHolidayRequest, RequestId, RequestStatus, Role, StaticHolidayCalendar, UserId,
    UserProfile, compute_days, holidays_for_range,
};
use time::{Date, OffsetDateTime};
use time::macros::{date, datetime};
use tracing::info;

use super::allowances::set_allowance;
use super::financial_years::create_financial_year;
use super::requests::{insert_request, update_request_status};
use super::users::{create_department, create_user};
use crate::error::PersistenceError;
use crate::queries::users::count_users;

fn profile(name: &str, email: &str, role: Role, department_id: DepartmentId) -> UserProfile {
    UserProfile {
        name: name.to_string(),
        email: email.to_string(),
        role,
        department_id,
        avatar_url: None,
    }
}

/// A demo booking, priced against the holiday calendar like any other
/// request.
struct Booking {
    user_id: UserId,
    start_date: Date,
    start_half: DayHalf,
    end_date: Date,
    end_half: DayHalf,
}

impl Booking {
    fn into_request<C>(
        self,
        calendar: &C,
        financial_year_id: FinancialYearId,
        now: OffsetDateTime,
    ) -> NewHolidayRequest
    where
        C: HolidayCalendar + ?Sized,
    {
        let holidays: HolidaySet = holidays_for_range(calendar, self.start_date, self.end_date);
        let days_count: DayCount = compute_days(
            self.start_date,
            self.end_date,
            &holidays,
            self.start_half,
            self.end_half,
        );

        NewHolidayRequest {
            user_id: self.user_id,
            financial_year_id,
            start_date: self.start_date,
            start_half: self.start_half,
            end_date: self.end_date,
            end_half: self.end_half,
            days_count,
            created_at: now,
        }
    }
}

/// Populates an empty database with demo departments, users, financial
/// years, allowances and requests.
///
/// Does nothing if any user exists. Returns whether data was written.
///
/// # Errors
///
/// Returns an error if any write fails. Nothing is written in that case.
pub fn seed_demo_data(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    if count_users(conn)? > 0 {
        info!("Database already has users; skipping demo data");
        return Ok(false);
    }

    let calendar: StaticHolidayCalendar = StaticHolidayCalendar::england_and_wales();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let management: DepartmentId = create_department(conn, "Management")?;
        let engineering: DepartmentId = create_department(conn, "Engineering")?;
        let sales: DepartmentId = create_department(conn, "Sales")?;

        let admin: UserId = create_user(
            conn,
            &profile("Admin", "admin@example.com", Role::Admin, management),
            now,
        )?;
        let manager: UserId = create_user(
            conn,
            &profile("Manager", "manager@example.com", Role::Manager, engineering),
            now,
        )?;
        let developer: UserId = create_user(
            conn,
            &profile("Dev One", "dev@example.com", Role::User, engineering),
            now,
        )?;
        let salesperson: UserId = create_user(
            conn,
            &profile("Sales Person", "sales@example.com", Role::User, sales),
            now,
        )?;

        let previous_year: FinancialYearId = create_financial_year(
            conn,
            "24/25",
            datetime!(2024-04-01 00:00:00 UTC),
            datetime!(2025-03-31 23:59:59 UTC),
        )?;
        let current_year: FinancialYearId = create_financial_year(
            conn,
            "25/26",
            datetime!(2025-04-01 00:00:00 UTC),
            datetime!(2026-03-31 23:59:59 UTC),
        )?;

        for (user_id, days) in [(admin, 30), (manager, 28), (developer, 25), (salesperson, 25)] {
            for year in [previous_year, current_year] {
                set_allowance(conn, user_id, year, DayCount::from_whole_days(days))?;
            }
        }

        // Mon 4 Aug to Fri 8 Aug 2025.
        let summer: RequestId = insert_request(
            conn,
            &Booking {
                user_id: developer,
                start_date: date!(2025 - 08 - 04),
                start_half: DayHalf::Full,
                end_date: date!(2025 - 08 - 08),
                end_half: DayHalf::Full,
            }
            .into_request(&calendar, current_year, now),
        )?;
        update_request_status(conn, summer, RequestStatus::Approved, manager, now)?;

        // Fri 3 Oct 2025, afternoon only.
        let long_weekend: RequestId = insert_request(
            conn,
            &Booking {
                user_id: developer,
                start_date: date!(2025 - 10 - 03),
                start_half: DayHalf::Pm,
                end_date: date!(2025 - 10 - 03),
                end_half: DayHalf::Full,
            }
            .into_request(&calendar, current_year, now),
        )?;
        update_request_status(conn, long_weekend, RequestStatus::Denied, manager, now)?;

        // Mon 22 Dec 2025 to Fri 2 Jan 2026, across three bank holidays.
        insert_request(
            conn,
            &Booking {
                user_id: salesperson,
                start_date: date!(2025 - 12 - 22),
                start_half: DayHalf::Full,
                end_date: date!(2026 - 01 - 02),
                end_half: DayHalf::Full,
            }
            .into_request(&calendar, current_year, now),
        )?;

        // Mon 2 to Thu 5 Feb 2026.
        insert_request(
            conn,
            &Booking {
                user_id: developer,
                start_date: date!(2026 - 02 - 02),
                start_half: DayHalf::Full,
                end_date: date!(2026 - 02 - 05),
                end_half: DayHalf::Full,
            }
            .into_request(&calendar, current_year, now),
        )?;

        Ok(())
    })?;

    info!("Seeded demo data");
    Ok(true)
}
