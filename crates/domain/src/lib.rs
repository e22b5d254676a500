// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allowance;
mod calendar;
mod day_count;
mod error;
mod financial_year;
mod request_status;
mod types;
mod validation;
mod working_days;

#[cfg(test)]
mod tests;

pub use allowance::{
    AllowanceSummary, DEFAULT_ALLOWANCE, calculate_allowance, resolve_total_allowance,
};
pub use calendar::{HolidayCalendar, HolidaySet, StaticHolidayCalendar, holidays_for_range};
pub use working_days::{compute_days, is_working_day};

// Re-export public types
pub use day_count::{DayCount, DayHalf};
pub use error::DomainError;
pub use financial_year::{FinancialYear, select_financial_year, validate_financial_year};
pub use request_status::{HolidayRequest, NewHolidayRequest, RequestStatus};
pub use types::{
    Department, DepartmentId, FinancialYearId, RequestId, Role, User, UserId, UserProfile,
};
pub use validation::{
    validate_allowance, validate_department_name, validate_email_unique, validate_user_profile,
};
