// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the holiday leave tracker.
//!
//! Handlers here translate transport-neutral request structs into domain
//! values, enforce role-based authorization, call the lifecycle operations
//! in `finyearly` and translate every lower-layer error into [`ApiError`].
//! The HTTP server is a thin layer over these functions.

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
#![allow(clippy::multiple_crate_versions)]

mod allowance_policy;
mod auth;
mod error;
mod handlers;
mod input;
mod request_response;

#[cfg(test)]
mod tests;

pub use allowance_policy::{AllowancePolicy, AllowancePolicyError};
pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    archive_user, cancel_request, create_department, create_financial_year, create_request,
    create_user, delete_department, format_timestamp, get_allowance, get_settings,
    list_departments, list_financial_years, list_my_requests, list_review_queue, list_users,
    login, logout, rename_department, review_request, set_allowance, update_settings,
    update_user, whoami,
};
pub use input::{
    InputError, STATUS_FILTER_ALL, parse_date, parse_day_half, parse_decision, parse_role,
    parse_status_filter,
};
pub use request_response::{
    AllowanceRecordResponse, AllowanceResponse, CreateFinancialYearRequest,
    CreateHolidayRequestRequest, DepartmentInfo, DepartmentRequest, FinancialYearInfo,
    ListDepartmentsResponse, ListFinancialYearsResponse, ListRequestsResponse,
    ListUsersResponse, LoginRequest, LoginResponse, RequestInfo, ReviewQueueItem,
    ReviewQueueResponse, ReviewRequestRequest, SetAllowanceRequest, SettingsResponse,
    UpdateSettingsRequest, UserInfo, UserRequest,
};
