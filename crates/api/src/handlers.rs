// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the persistence layer, the authenticated actor and,
//! where time matters, the current instant. Authorization is checked before
//! any write.

use finyearly::RequestDraft;
use finyearly_domain::{
    AllowanceSummary, DayCount, DayHalf, Department, DepartmentId, FinancialYear,
    FinancialYearId, HolidayCalendar, HolidayRequest, RequestId, RequestStatus, Role, User,
    UserId, UserProfile, validate_department_name, validate_email_unique, validate_financial_year,
    validate_user_profile,
};
use finyearly_persistence::{Persistence, ReviewQueueEntry, ReviewQueueFilter};
use time::format_description::well_known::Rfc3339;
use time::macros::time;
use time::{Date, OffsetDateTime, UtcOffset};
use tracing::info;

use crate::allowance_policy::AllowancePolicy;
use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::error::ApiError;
use crate::input::{
    STATUS_FILTER_ALL, parse_date, parse_day_half, parse_decision, parse_role,
    parse_status_filter,
};
use crate::request_response::{
    AllowanceRecordResponse, AllowanceResponse, CreateFinancialYearRequest,
    CreateHolidayRequestRequest, DepartmentInfo, DepartmentRequest, FinancialYearInfo,
    ListDepartmentsResponse, ListFinancialYearsResponse, ListRequestsResponse,
    ListUsersResponse, LoginRequest, LoginResponse, RequestInfo, ReviewQueueItem,
    ReviewQueueResponse, ReviewRequestRequest, SetAllowanceRequest, SettingsResponse,
    UpdateSettingsRequest, UserInfo, UserRequest,
};

/// Formats an instant as RFC 3339 in UTC.
///
/// # Errors
///
/// Returns an error if the instant cannot be formatted.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, ApiError> {
    at.to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

fn user_info(user: &User, department_name: Option<String>) -> Result<UserInfo, ApiError> {
    Ok(UserInfo {
        user_id: user.id.value(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        department_id: user.department_id.value(),
        department_name,
        avatar_url: user.avatar_url.clone(),
        archived: user.archived,
        created_at: format_timestamp(user.created_at)?,
    })
}

fn department_info(department: &Department) -> DepartmentInfo {
    DepartmentInfo {
        department_id: department.id.value(),
        name: department.name.clone(),
    }
}

fn financial_year_info(financial_year: &FinancialYear) -> FinancialYearInfo {
    FinancialYearInfo {
        financial_year_id: financial_year.id.value(),
        name: financial_year.name.clone(),
        start_date: financial_year.start_date().to_string(),
        end_date: financial_year.end_date().to_string(),
    }
}

fn request_info(request: &HolidayRequest) -> Result<RequestInfo, ApiError> {
    let reviewed_at: Option<String> = request.reviewed_at.map(format_timestamp).transpose()?;

    Ok(RequestInfo {
        request_id: request.id.value(),
        user_id: request.user_id.value(),
        financial_year_id: request.financial_year_id.value(),
        start_date: request.start_date.to_string(),
        start_half: request.start_half.as_str().to_string(),
        end_date: request.end_date.to_string(),
        end_half: request.end_half.as_str().to_string(),
        days_count: request.days_count,
        status: request.status.as_str().to_string(),
        created_at: format_timestamp(request.created_at)?,
        reviewed_by: request.reviewed_by.map(|reviewer| reviewer.value()),
        reviewed_at,
    })
}

/// Looks up a department name, or `None` if the department no longer
/// exists.
fn department_name(
    persistence: &mut Persistence,
    department_id: DepartmentId,
) -> Result<Option<String>, ApiError> {
    let department: Option<Department> = persistence.get_department(department_id)?;
    Ok(department.map(|d| d.name))
}

fn require_department(
    persistence: &mut Persistence,
    department_id: DepartmentId,
) -> Result<Department, ApiError> {
    persistence
        .get_department(department_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Department"),
            message: format!("Department {department_id} does not exist"),
        })
}

fn require_user(persistence: &mut Persistence, user_id: UserId) -> Result<User, ApiError> {
    persistence
        .get_user(user_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        })
}

fn require_financial_year(
    persistence: &mut Persistence,
    financial_year_id: FinancialYearId,
) -> Result<FinancialYear, ApiError> {
    persistence
        .get_financial_year(financial_year_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Financial year"),
            message: format!("Financial year {financial_year_id} does not exist"),
        })
}

/// Resolves the financial year a caller works in: the requested one if it
/// exists, else the latest.
fn resolve_financial_year(
    persistence: &mut Persistence,
    requested: Option<i64>,
) -> Result<Option<FinancialYear>, ApiError> {
    let year: Option<FinancialYear> =
        finyearly::current_financial_year(persistence, requested.map(FinancialYearId::new))?;
    Ok(year)
}

fn no_financial_years() -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Financial year"),
        message: String::from("No financial years have been defined"),
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// Signs a user in by email.
///
/// # Errors
///
/// Returns an error if no active user has this email or the session
/// cannot be created.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
    now: OffsetDateTime,
) -> Result<LoginResponse, ApiError> {
    let (session_token, user, expires_at): (String, User, OffsetDateTime) =
        AuthenticationService::login(persistence, request.email.trim(), now)?;

    let department: Option<String> = department_name(persistence, user.department_id)?;

    Ok(LoginResponse {
        session_token,
        expires_at: format_timestamp(expires_at)?,
        user: user_info(&user, department)?,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the signed-in user.
///
/// # Errors
///
/// Returns an error if the department lookup fails.
pub fn whoami(persistence: &mut Persistence, user: &User) -> Result<UserInfo, ApiError> {
    let department: Option<String> = department_name(persistence, user.department_id)?;
    user_info(user, department)
}

// ============================================================================
// Financial years
// ============================================================================

/// Lists financial years ordered by start.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_financial_years(
    persistence: &mut Persistence,
) -> Result<ListFinancialYearsResponse, ApiError> {
    let years: Vec<FinancialYear> = persistence.list_financial_years()?;
    let current: Option<i64> =
        finyearly_domain::select_financial_year(&years, None).map(|year| year.id.value());

    Ok(ListFinancialYearsResponse {
        financial_years: years.iter().map(financial_year_info).collect(),
        current_financial_year_id: current,
    })
}

/// Creates a financial year.
///
/// The year runs from midnight UTC on the start date to the last second
/// of the end date.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - Either date is malformed
/// - The name is empty or the start is not before the end
/// - The year overlaps an existing one
/// - Database operations fail
pub fn create_financial_year(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateFinancialYearRequest,
) -> Result<FinancialYearInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_financial_year")?;

    let start_date: Date = parse_date("start_date", &request.start_date)?;
    let end_date: Date = parse_date("end_date", &request.end_date)?;
    let start: OffsetDateTime = start_date.midnight().assume_utc();
    let end: OffsetDateTime = end_date.with_time(time!(23:59:59)).assume_utc();

    let name: &str = request.name.trim();
    let existing: Vec<FinancialYear> = persistence.list_financial_years()?;
    validate_financial_year(name, start, end, &existing)?;

    let created: FinancialYear = persistence.create_financial_year(name, start, end)?;

    info!(
        financial_year_id = %created.id,
        name = %created.name,
        actor = %actor.user_id,
        "Created financial year"
    );

    Ok(financial_year_info(&created))
}

// ============================================================================
// Allowance and requests
// ============================================================================

/// Returns the actor's leave balance.
///
/// Uses the requested financial year if it exists, otherwise the latest.
///
/// # Errors
///
/// Returns an error if no financial years exist or the database fails.
pub fn get_allowance(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    financial_year_id: Option<i64>,
) -> Result<AllowanceResponse, ApiError> {
    let financial_year: FinancialYear =
        resolve_financial_year(persistence, financial_year_id)?.ok_or_else(no_financial_years)?;

    let summary: AllowanceSummary =
        finyearly::get_allowance(persistence, actor.user_id, financial_year.id)?;

    Ok(AllowanceResponse {
        user_id: actor.user_id.value(),
        financial_year: financial_year_info(&financial_year),
        total_allowance: summary.total_allowance,
        holidays_taken: summary.holidays_taken,
        remaining_days: summary.remaining_days,
        is_exhausted: summary.is_exhausted,
        is_overdrawn: summary.is_overdrawn,
    })
}

/// Lists the actor's requests in a financial year, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_my_requests(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    financial_year_id: Option<i64>,
) -> Result<ListRequestsResponse, ApiError> {
    let Some(financial_year) = resolve_financial_year(persistence, financial_year_id)? else {
        return Ok(ListRequestsResponse {
            financial_year_id: None,
            requests: Vec::new(),
        });
    };

    let requests: Vec<HolidayRequest> =
        persistence.list_requests_for_user(actor.user_id, Some(financial_year.id))?;

    Ok(ListRequestsResponse {
        financial_year_id: Some(financial_year.id.value()),
        requests: requests
            .iter()
            .map(request_info)
            .collect::<Result<Vec<_>, _>>()?,
    })
}

/// Books leave for the actor.
///
/// # Errors
///
/// Returns an error if:
/// - A date or half-day flag is malformed
/// - No financial years exist
/// - The request is rejected by the lifecycle rules
pub fn create_request(
    persistence: &mut Persistence,
    calendar: &dyn HolidayCalendar,
    actor: &AuthenticatedActor,
    request: &CreateHolidayRequestRequest,
    now: OffsetDateTime,
) -> Result<RequestInfo, ApiError> {
    let start_date: Date = parse_date("start_date", &request.start_date)?;
    let end_date: Date = parse_date("end_date", &request.end_date)?;
    let start_half: DayHalf = parse_day_half("start_half", request.start_half.as_deref())?;
    let end_half: DayHalf = parse_day_half("end_half", request.end_half.as_deref())?;

    let financial_year_id: FinancialYearId = match request.financial_year_id {
        Some(id) => FinancialYearId::new(id),
        None => {
            resolve_financial_year(persistence, None)?
                .ok_or_else(no_financial_years)?
                .id
        }
    };

    let draft: RequestDraft = RequestDraft {
        user_id: actor.user_id,
        financial_year_id,
        start_date,
        start_half,
        end_date,
        end_half,
    };

    let created: HolidayRequest = finyearly::create_request(persistence, calendar, &draft, now)?;
    request_info(&created)
}

/// Cancels a pending request.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist
/// - The actor neither owns the request nor is an admin
/// - The request has already been reviewed
pub fn cancel_request(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
) -> Result<RequestInfo, ApiError> {
    let request_id: RequestId = RequestId::new(request_id);
    let existing: HolidayRequest =
        persistence
            .get_request(request_id)?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Request"),
                message: format!("Request {request_id} does not exist"),
            })?;

    AuthorizationService::authorize_cancel(actor, &existing)?;

    let cancelled: HolidayRequest = finyearly::cancel_request(persistence, request_id)?;
    request_info(&cancelled)
}

// ============================================================================
// Review
// ============================================================================

/// Lists the requests the actor reviews, newest first.
///
/// Managers see their own department, excluding their own requests.
/// Admins see every department. The status filter defaults to `pending`;
/// `all` lists every status.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is neither a manager nor an admin
/// - The status filter is not recognised
/// - The database query fails
pub fn list_review_queue(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    status: Option<&str>,
    financial_year_id: Option<i64>,
) -> Result<ReviewQueueResponse, ApiError> {
    AuthorizationService::authorize_view_review_queue(actor)?;

    let status_filter: Option<RequestStatus> = parse_status_filter(status)?;
    let status_label: String =
        status_filter.map_or_else(|| STATUS_FILTER_ALL.to_string(), |s| s.as_str().to_string());

    let Some(financial_year) = resolve_financial_year(persistence, financial_year_id)? else {
        return Ok(ReviewQueueResponse {
            status: status_label,
            financial_year_id: None,
            entries: Vec::new(),
        });
    };

    let filter: ReviewQueueFilter = ReviewQueueFilter {
        status: status_filter,
        financial_year_id: Some(financial_year.id),
        department_id: AuthorizationService::review_scope(actor),
    };

    let entries: Vec<ReviewQueueEntry> = persistence
        .list_review_queue(filter)?
        .into_iter()
        .filter(|entry| actor.role.is_admin() || entry.request.user_id != actor.user_id)
        .collect();

    let items: Vec<ReviewQueueItem> = entries
        .into_iter()
        .map(|entry| {
            Ok(ReviewQueueItem {
                request: request_info(&entry.request)?,
                requester_name: entry.requester_name,
                department_id: entry.department_id.value(),
                department_name: entry.department_name,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(ReviewQueueResponse {
        status: status_label,
        financial_year_id: Some(financial_year.id.value()),
        entries: items,
    })
}

/// Approves or denies a pending request.
///
/// # Errors
///
/// Returns an error if:
/// - The decision is not `approved` or `denied`
/// - The request or its requester does not exist
/// - The actor may not review this request
/// - The request is no longer pending
pub fn review_request(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request_id: i64,
    request: &ReviewRequestRequest,
    now: OffsetDateTime,
) -> Result<RequestInfo, ApiError> {
    let decision: RequestStatus = parse_decision(&request.decision)?;
    let request_id: RequestId = RequestId::new(request_id);

    let existing: HolidayRequest =
        persistence
            .get_request(request_id)?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Request"),
                message: format!("Request {request_id} does not exist"),
            })?;
    let requester: User = require_user(persistence, existing.user_id)?;

    AuthorizationService::authorize_review(actor, &requester)?;

    let reviewed: HolidayRequest =
        finyearly::review_request(persistence, request_id, decision, actor.user_id, now)?;
    request_info(&reviewed)
}

// ============================================================================
// Users
// ============================================================================

fn profile_from_request(
    persistence: &mut Persistence,
    request: &UserRequest,
) -> Result<UserProfile, ApiError> {
    let role: Role = parse_role(&request.role)?;
    let department: Department =
        require_department(persistence, DepartmentId::new(request.department_id))?;

    let profile: UserProfile = UserProfile {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        role,
        department_id: department.id,
        avatar_url: request
            .avatar_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string),
    };
    validate_user_profile(&profile)?;
    Ok(profile)
}

/// Lists active users ordered by name.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListUsersResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "list_users")?;

    let users: Vec<User> = persistence.list_users(false)?;
    let mut infos: Vec<UserInfo> = Vec::with_capacity(users.len());
    for user in &users {
        let department: Option<String> = department_name(persistence, user.department_id)?;
        infos.push(user_info(user, department)?);
    }

    Ok(ListUsersResponse { users: infos })
}

/// Creates a user.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The role is unknown or the department does not exist
/// - The name or email is invalid
/// - Another user already has the email
pub fn create_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &UserRequest,
    now: OffsetDateTime,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_user")?;

    let profile: UserProfile = profile_from_request(persistence, request)?;
    let existing: Vec<User> = persistence.list_users(true)?;
    validate_email_unique(&profile.email, None, &existing)?;

    let created: User = persistence.create_user(&profile, now)?;

    info!(user_id = %created.id, role = %created.role, actor = %actor.user_id, "Created user");

    let department: Option<String> = department_name(persistence, created.department_id)?;
    user_info(&created, department)
}

/// Edits a user.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The user does not exist
/// - The role is unknown or the department does not exist
/// - The name or email is invalid
/// - Another user already has the email
pub fn update_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
    request: &UserRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "update_user")?;

    let target: User = require_user(persistence, UserId::new(user_id))?;
    let profile: UserProfile = profile_from_request(persistence, request)?;
    let existing: Vec<User> = persistence.list_users(true)?;
    validate_email_unique(&profile.email, Some(&target), &existing)?;

    let updated: User = persistence.update_user(target.id, &profile)?;

    info!(user_id = %updated.id, actor = %actor.user_id, "Updated user");

    let department: Option<String> = department_name(persistence, updated.department_id)?;
    user_info(&updated, department)
}

/// Archives a user and ends their sessions.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The actor is archiving themselves
/// - The user does not exist
pub fn archive_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_admin(actor, "archive_user")?;

    let target: User = require_user(persistence, UserId::new(user_id))?;
    if target.id == actor.user_id {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("cannot_archive_self"),
            message: String::from("Admins cannot archive their own account"),
        });
    }

    persistence.archive_user(target.id)?;

    info!(user_id = %target.id, actor = %actor.user_id, "Archived user");
    Ok(())
}

// ============================================================================
// Departments
// ============================================================================

/// Lists departments ordered by name.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn list_departments(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<ListDepartmentsResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "list_departments")?;

    let departments: Vec<Department> = persistence.list_departments()?;
    Ok(ListDepartmentsResponse {
        departments: departments.iter().map(department_info).collect(),
    })
}

/// Creates a department.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the name is empty.
pub fn create_department(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &DepartmentRequest,
) -> Result<DepartmentInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "create_department")?;
    validate_department_name(&request.name)?;

    let created: Department = persistence.create_department(request.name.trim())?;
    info!(department_id = %created.id, name = %created.name, "Created department");
    Ok(department_info(&created))
}

/// Renames a department.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the name is empty or
/// the department does not exist.
pub fn rename_department(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    department_id: i64,
    request: &DepartmentRequest,
) -> Result<DepartmentInfo, ApiError> {
    AuthorizationService::authorize_admin(actor, "rename_department")?;
    validate_department_name(&request.name)?;

    let department: Department = require_department(persistence, DepartmentId::new(department_id))?;
    let renamed: Department = persistence.rename_department(department.id, request.name.trim())?;
    info!(department_id = %renamed.id, name = %renamed.name, "Renamed department");
    Ok(department_info(&renamed))
}

/// Deletes a department. Its users keep their department reference.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the department does
/// not exist.
pub fn delete_department(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    department_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_admin(actor, "delete_department")?;

    let department: Department = require_department(persistence, DepartmentId::new(department_id))?;
    persistence.delete_department(department.id)?;
    info!(department_id = %department.id, "Deleted department");
    Ok(())
}

// ============================================================================
// Allowances and settings
// ============================================================================

/// Sets a user's allowance for a financial year.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The allowance is negative or not a multiple of half a day
/// - The user or financial year does not exist
pub fn set_allowance(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &SetAllowanceRequest,
) -> Result<AllowanceRecordResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "set_allowance")?;

    let total: DayCount = AllowancePolicy::default().validate(request.total_allowance)?;
    let user: User = require_user(persistence, UserId::new(request.user_id))?;
    let financial_year: FinancialYear =
        require_financial_year(persistence, FinancialYearId::new(request.financial_year_id))?;

    persistence.set_allowance(user.id, financial_year.id, total)?;

    info!(
        user_id = %user.id,
        financial_year = %financial_year.name,
        total = %total,
        "Set allowance"
    );

    Ok(AllowanceRecordResponse {
        user_id: user.id.value(),
        financial_year_id: financial_year.id.value(),
        total_allowance: total,
    })
}

/// Returns the organisation settings.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn get_settings(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<SettingsResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "view_settings")?;
    Ok(SettingsResponse {
        default_allowance: persistence.get_default_allowance()?,
    })
}

/// Updates the default allowance.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the allowance is
/// negative or not a multiple of half a day.
pub fn update_settings(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &UpdateSettingsRequest,
) -> Result<SettingsResponse, ApiError> {
    AuthorizationService::authorize_admin(actor, "update_settings")?;

    let default_allowance: DayCount =
        AllowancePolicy::default().validate(request.default_allowance)?;
    persistence.set_default_allowance(default_allowance)?;

    info!(default_allowance = %default_allowance, actor = %actor.user_id, "Updated settings");

    Ok(SettingsResponse { default_allowance })
}
