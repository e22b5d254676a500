// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates are `YYYY-MM-DD` strings, instants are RFC 3339 strings and day
//! counts are decimal numbers of days.

use finyearly_domain::DayCount;

/// API request to sign in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The user's email address.
    pub email: String,
}

/// API response for a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub session_token: String,
    /// When the token stops being accepted.
    pub expires_at: String,
    /// The signed-in user.
    pub user: UserInfo,
}

/// User information.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// The user's identifier.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// `user`, `manager` or `admin`.
    pub role: String,
    /// Department identifier.
    pub department_id: i64,
    /// Department name, absent if the department was deleted.
    pub department_name: Option<String>,
    /// Optional avatar reference.
    pub avatar_url: Option<String>,
    /// Whether the user has been archived.
    pub archived: bool,
    /// When the user was created.
    pub created_at: String,
}

/// API response for listing users.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListUsersResponse {
    /// Active users ordered by name.
    pub users: Vec<UserInfo>,
}

/// API request to create or edit a user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// `user`, `manager` or `admin`.
    pub role: String,
    /// Department identifier.
    pub department_id: i64,
    /// Optional avatar reference.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Department information.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepartmentInfo {
    /// The department's identifier.
    pub department_id: i64,
    /// The department's name.
    pub name: String,
}

/// API response for listing departments.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListDepartmentsResponse {
    /// Departments ordered by name.
    pub departments: Vec<DepartmentInfo>,
}

/// API request to create or rename a department.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepartmentRequest {
    /// The department's name.
    pub name: String,
}

/// Financial year information.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FinancialYearInfo {
    /// The financial year's identifier.
    pub financial_year_id: i64,
    /// Display name, e.g. `25/26`.
    pub name: String,
    /// First day of the year.
    pub start_date: String,
    /// Last day of the year.
    pub end_date: String,
}

/// API response for listing financial years.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListFinancialYearsResponse {
    /// Financial years ordered by start.
    pub financial_years: Vec<FinancialYearInfo>,
    /// The latest financial year, if any.
    pub current_financial_year_id: Option<i64>,
}

/// API request to create a financial year.
///
/// The year runs from the start of `start_date` to the end of `end_date`,
/// in UTC.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateFinancialYearRequest {
    /// Display name.
    pub name: String,
    /// First day of the year.
    pub start_date: String,
    /// Last day of the year.
    pub end_date: String,
}

/// API response with a user's leave balance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllowanceResponse {
    /// The user the balance belongs to.
    pub user_id: i64,
    /// The financial year the balance covers.
    pub financial_year: FinancialYearInfo,
    /// Total allowance.
    pub total_allowance: DayCount,
    /// Days of approved leave.
    pub holidays_taken: DayCount,
    /// Days left. Negative when overdrawn.
    pub remaining_days: DayCount,
    /// True when nothing is left.
    pub is_exhausted: bool,
    /// True when more than the allowance has been approved.
    pub is_overdrawn: bool,
}

/// Holiday request information.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RequestInfo {
    /// The request's identifier.
    pub request_id: i64,
    /// The requesting user.
    pub user_id: i64,
    /// The financial year charged.
    pub financial_year_id: i64,
    /// First day.
    pub start_date: String,
    /// `full`, `am` or `pm`.
    pub start_half: String,
    /// Last day.
    pub end_date: String,
    /// `full`, `am` or `pm`.
    pub end_half: String,
    /// Chargeable working days.
    pub days_count: DayCount,
    /// `pending`, `approved` or `denied`.
    pub status: String,
    /// Submission time.
    pub created_at: String,
    /// Reviewer, once reviewed.
    pub reviewed_by: Option<i64>,
    /// Review time, once reviewed.
    pub reviewed_at: Option<String>,
}

/// API response for the current user's request history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListRequestsResponse {
    /// The financial year listed, if any exist.
    pub financial_year_id: Option<i64>,
    /// Requests, newest first.
    pub requests: Vec<RequestInfo>,
}

/// API request to book leave.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateHolidayRequestRequest {
    /// The financial year to charge. The current year when absent.
    #[serde(default)]
    pub financial_year_id: Option<i64>,
    /// First day.
    pub start_date: String,
    /// `full` (default), `am` or `pm`.
    #[serde(default)]
    pub start_half: Option<String>,
    /// Last day.
    pub end_date: String,
    /// `full` (default), `am` or `pm`.
    #[serde(default)]
    pub end_half: Option<String>,
}

/// API request to review a request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewRequestRequest {
    /// `approved` or `denied`.
    pub decision: String,
}

/// A request in a reviewer's queue.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewQueueItem {
    /// The request.
    pub request: RequestInfo,
    /// The requester's name.
    pub requester_name: String,
    /// The requester's department.
    pub department_id: i64,
    /// Department name, absent if the department was deleted.
    pub department_name: Option<String>,
}

/// API response for the review queue.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewQueueResponse {
    /// The status filter applied: a status or `all`.
    pub status: String,
    /// The financial year listed, if any exist.
    pub financial_year_id: Option<i64>,
    /// Matching requests, newest first.
    pub entries: Vec<ReviewQueueItem>,
}

/// API request to set a user's allowance for a financial year.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SetAllowanceRequest {
    /// The user.
    pub user_id: i64,
    /// The financial year.
    pub financial_year_id: i64,
    /// Allowance in days, in steps of 0.5.
    pub total_allowance: f64,
}

/// API response for a stored allowance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllowanceRecordResponse {
    /// The user.
    pub user_id: i64,
    /// The financial year.
    pub financial_year_id: i64,
    /// Allowance in days.
    pub total_allowance: DayCount,
}

/// Organisation settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SettingsResponse {
    /// Allowance for users without an explicit allowance, in days.
    pub default_allowance: DayCount,
}

/// API request to update organisation settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpdateSettingsRequest {
    /// Allowance for users without an explicit allowance, in days.
    pub default_allowance: f64,
}
