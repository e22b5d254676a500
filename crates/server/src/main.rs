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
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use finyearly_api::{
    AllowanceRecordResponse, AllowanceResponse, ApiError, CreateFinancialYearRequest,
    CreateHolidayRequestRequest, DepartmentInfo, DepartmentRequest, FinancialYearInfo,
    ListDepartmentsResponse, ListFinancialYearsResponse, ListRequestsResponse,
    ListUsersResponse, LoginRequest, LoginResponse, RequestInfo, ReviewQueueResponse,
    ReviewRequestRequest, SetAllowanceRequest, SettingsResponse, UpdateSettingsRequest,
    UserInfo, UserRequest,
};
use finyearly_domain::StaticHolidayCalendar;
use finyearly_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::session::SessionUser;

/// Finyearly Server - HTTP server for holiday leave tracking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Populate an empty database with demo departments, users, financial
    /// years, allowances and requests
    #[arg(long)]
    seed_demo_data: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer. One connection, serialized by the mutex.
    persistence: Arc<Mutex<Persistence>>,
    /// Public holidays used to price requests.
    calendar: Arc<StaticHolidayCalendar>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Query parameters selecting a financial year.
#[derive(Debug, Deserialize)]
struct FinancialYearQuery {
    /// The financial year. The latest year when absent or unknown.
    financial_year_id: Option<i64>,
}

/// Query parameters for the review queue.
#[derive(Debug, Deserialize)]
struct ReviewQueueQuery {
    /// `pending` (default), `approved`, `denied` or `all`.
    status: Option<String>,
    /// The financial year. The latest year when absent or unknown.
    financial_year_id: Option<i64>,
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

// ============================================================================
// Sessions
// ============================================================================

/// Handler for POST `/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!("Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = finyearly_api::login(&mut persistence, &req, now())?;
    Ok(Json(response))
}

/// Handler for POST `/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<StatusCode, HttpError> {
    info!(user_id = %session.user.id, "Handling logout request");

    let mut persistence = app_state.persistence.lock().await;
    finyearly_api::logout(&mut persistence, &session.token)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/auth/me`.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: UserInfo = finyearly_api::whoami(&mut persistence, &session.user)?;
    Ok(Json(response))
}

// ============================================================================
// Financial years
// ============================================================================

/// Handler for GET `/financial_years`.
async fn handle_list_financial_years(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> Result<Json<ListFinancialYearsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListFinancialYearsResponse =
        finyearly_api::list_financial_years(&mut persistence)?;
    Ok(Json(response))
}

/// Handler for POST `/financial_years`.
async fn handle_create_financial_year(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Json(req): Json<CreateFinancialYearRequest>,
) -> Result<(StatusCode, Json<FinancialYearInfo>), HttpError> {
    info!(name = %req.name, "Handling create_financial_year request");

    let mut persistence = app_state.persistence.lock().await;
    let response: FinancialYearInfo =
        finyearly_api::create_financial_year(&mut persistence, &session.actor, &req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

// ============================================================================
// Allowance and requests
// ============================================================================

/// Handler for GET `/allowance`.
async fn handle_get_allowance(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Query(query): Query<FinancialYearQuery>,
) -> Result<Json<AllowanceResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AllowanceResponse =
        finyearly_api::get_allowance(&mut persistence, &session.actor, query.financial_year_id)?;
    Ok(Json(response))
}

/// Handler for GET `/requests`.
async fn handle_list_requests(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Query(query): Query<FinancialYearQuery>,
) -> Result<Json<ListRequestsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListRequestsResponse =
        finyearly_api::list_my_requests(&mut persistence, &session.actor, query.financial_year_id)?;
    Ok(Json(response))
}

/// Handler for POST `/requests`.
async fn handle_create_request(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Json(req): Json<CreateHolidayRequestRequest>,
) -> Result<(StatusCode, Json<RequestInfo>), HttpError> {
    info!(
        user_id = %session.user.id,
        start_date = %req.start_date,
        end_date = %req.end_date,
        "Handling create_request request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RequestInfo = finyearly_api::create_request(
        &mut persistence,
        app_state.calendar.as_ref(),
        &session.actor,
        &req,
        now(),
    )?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for DELETE `/requests/{request_id}`.
async fn handle_cancel_request(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(request_id): Path<i64>,
) -> Result<Json<RequestInfo>, HttpError> {
    info!(request_id, user_id = %session.user.id, "Handling cancel_request request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RequestInfo =
        finyearly_api::cancel_request(&mut persistence, &session.actor, request_id)?;
    Ok(Json(response))
}

// ============================================================================
// Review
// ============================================================================

/// Handler for GET `/authorisation`.
async fn handle_review_queue(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Query(query): Query<ReviewQueueQuery>,
) -> Result<Json<ReviewQueueResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ReviewQueueResponse = finyearly_api::list_review_queue(
        &mut persistence,
        &session.actor,
        query.status.as_deref(),
        query.financial_year_id,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/authorisation/{request_id}`.
async fn handle_review_request(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(request_id): Path<i64>,
    Json(req): Json<ReviewRequestRequest>,
) -> Result<Json<RequestInfo>, HttpError> {
    info!(
        request_id,
        reviewer = %session.user.id,
        decision = %req.decision,
        "Handling review_request request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RequestInfo = finyearly_api::review_request(
        &mut persistence,
        &session.actor,
        request_id,
        &req,
        now(),
    )?;
    Ok(Json(response))
}

// ============================================================================
// Administration
// ============================================================================

/// Handler for GET `/admin/users`.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListUsersResponse = finyearly_api::list_users(&mut persistence, &session.actor)?;
    Ok(Json(response))
}

/// Handler for POST `/admin/users`.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Json(req): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserInfo>), HttpError> {
    info!(email = %req.email, "Handling create_user request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UserInfo =
        finyearly_api::create_user(&mut persistence, &session.actor, &req, now())?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PUT `/admin/users/{user_id}`.
async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UserRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(user_id, "Handling update_user request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UserInfo =
        finyearly_api::update_user(&mut persistence, &session.actor, user_id, &req)?;
    Ok(Json(response))
}

/// Handler for POST `/admin/users/{user_id}/archive`.
async fn handle_archive_user(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(user_id, "Handling archive_user request");

    let mut persistence = app_state.persistence.lock().await;
    finyearly_api::archive_user(&mut persistence, &session.actor, user_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/admin/departments`.
async fn handle_list_departments(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<ListDepartmentsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListDepartmentsResponse =
        finyearly_api::list_departments(&mut persistence, &session.actor)?;
    Ok(Json(response))
}

/// Handler for POST `/admin/departments`.
async fn handle_create_department(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Json(req): Json<DepartmentRequest>,
) -> Result<(StatusCode, Json<DepartmentInfo>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: DepartmentInfo =
        finyearly_api::create_department(&mut persistence, &session.actor, &req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PUT `/admin/departments/{department_id}`.
async fn handle_rename_department(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(department_id): Path<i64>,
    Json(req): Json<DepartmentRequest>,
) -> Result<Json<DepartmentInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: DepartmentInfo =
        finyearly_api::rename_department(&mut persistence, &session.actor, department_id, &req)?;
    Ok(Json(response))
}

/// Handler for DELETE `/admin/departments/{department_id}`.
async fn handle_delete_department(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Path(department_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(department_id, "Handling delete_department request");

    let mut persistence = app_state.persistence.lock().await;
    finyearly_api::delete_department(&mut persistence, &session.actor, department_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PUT `/admin/allowances`.
async fn handle_set_allowance(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Json(req): Json<SetAllowanceRequest>,
) -> Result<Json<AllowanceRecordResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AllowanceRecordResponse =
        finyearly_api::set_allowance(&mut persistence, &session.actor, &req)?;
    Ok(Json(response))
}

/// Handler for GET `/admin/settings`.
async fn handle_get_settings(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
) -> Result<Json<SettingsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SettingsResponse = finyearly_api::get_settings(&mut persistence, &session.actor)?;
    Ok(Json(response))
}

/// Handler for PUT `/admin/settings`.
async fn handle_update_settings(
    AxumState(app_state): AxumState<AppState>,
    session: SessionUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SettingsResponse =
        finyearly_api::update_settings(&mut persistence, &session.actor, &req)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/me", get(handle_whoami))
        .route(
            "/financial_years",
            get(handle_list_financial_years).post(handle_create_financial_year),
        )
        .route("/allowance", get(handle_get_allowance))
        .route(
            "/requests",
            get(handle_list_requests).post(handle_create_request),
        )
        .route(
            "/requests/{request_id}",
            axum::routing::delete(handle_cancel_request),
        )
        .route("/authorisation", get(handle_review_queue))
        .route("/authorisation/{request_id}", post(handle_review_request))
        .route(
            "/admin/users",
            get(handle_list_users).post(handle_create_user),
        )
        .route("/admin/users/{user_id}", put(handle_update_user))
        .route("/admin/users/{user_id}/archive", post(handle_archive_user))
        .route(
            "/admin/departments",
            get(handle_list_departments).post(handle_create_department),
        )
        .route(
            "/admin/departments/{department_id}",
            put(handle_rename_department).delete(handle_delete_department),
        )
        .route("/admin/allowances", put(handle_set_allowance))
        .route(
            "/admin/settings",
            get(handle_get_settings).put(handle_update_settings),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Finyearly Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let expired: usize = persistence.delete_expired_sessions(now())?;
    if expired > 0 {
        info!(expired, "Removed expired sessions");
    }

    if args.seed_demo_data {
        if persistence.seed_demo_data(now())? {
            info!("Seeded demo data");
        } else {
            info!("Database already has users; skipping demo data");
        }
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        calendar: Arc::new(StaticHolidayCalendar::england_and_wales()),
    };

    let app: Router = build_router(app_state);

    let ip: IpAddr = args.bind.parse()?;
    let addr: SocketAddr = SocketAddr::new(ip, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
