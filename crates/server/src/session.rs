// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! Every route except login requires `Authorization: Bearer <token>`. A
//! missing or invalid session is always a 401; there is no fallback user.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use finyearly_api::{AuthenticatedActor, AuthenticationService};
use finyearly_domain::User;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for the signed-in user.
///
/// Carries the actor used for authorization checks, the user record and
/// the raw token, which logout needs.
///
/// # Errors
///
/// Rejects with 401 if:
/// - The Authorization header is missing or not a bearer token
/// - The token is unknown or expired
/// - The user has been archived
pub struct SessionUser {
    /// Authorization view of the user.
    pub actor: AuthenticatedActor,
    /// The signed-in user.
    pub user: User,
    /// The bearer token presented.
    pub token: String,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let token: &str = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                warn!("Authorization header is not a bearer token");
                SessionError::InvalidAuthorizationHeader
            })?;

        let mut persistence = state.persistence.lock().await;
        let (actor, user): (AuthenticatedActor, User) =
            AuthenticationService::validate_session(&mut persistence, token, OffsetDateTime::now_utc())
                .map_err(|e| {
                    warn!(error = %e, "Session validation failed");
                    SessionError::InvalidSession(e.to_string())
                })?;
        drop(persistence);

        debug!(user_id = %user.id, role = %actor.role, "Session validated");

        Ok(Self {
            actor,
            user,
            token: token.to_string(),
        })
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header is not `Bearer <token>`.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };

        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message,
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
