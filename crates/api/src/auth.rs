// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use finyearly_domain::{DepartmentId, HolidayRequest, Role, User, UserId};
use finyearly_persistence::{Persistence, PersistenceError, SessionData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::AuthError;

/// A signed-in user, as seen by authorization checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The signed-in user.
    pub user_id: UserId,
    /// The user's role.
    pub role: Role,
    /// The user's department.
    pub department_id: DepartmentId,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role, department_id: DepartmentId) -> Self {
        Self {
            user_id,
            role,
            department_id,
        }
    }

    /// Creates the actor for a user.
    #[must_use]
    pub const fn from_user(user: &User) -> Self {
        Self::new(user.id, user.role, user.department_id)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Every role may request leave and manage their own pending requests.
/// Managers review requests from their own department. Admins review any
/// request and manage users, departments, financial years and settings.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor is an admin.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The attempted action, for the error message
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the admin role.
    pub fn authorize_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.role.is_admin() {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            reason: String::from("admin role required"),
        })
    }

    /// Checks that the actor may see a review queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither a manager nor an admin.
    pub fn authorize_view_review_queue(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role.can_review() {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("view_review_queue"),
            reason: String::from("manager or admin role required"),
        })
    }

    /// Returns the department whose requests the actor reviews, or `None`
    /// for every department.
    #[must_use]
    pub const fn review_scope(actor: &AuthenticatedActor) -> Option<DepartmentId> {
        match actor.role {
            Role::Admin => None,
            Role::Manager | Role::User => Some(actor.department_id),
        }
    }

    /// Checks that the actor may review a request by `requester`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The actor is neither a manager nor an admin
    /// - The actor is a manager and the requester is in another department
    /// - The actor is a manager reviewing their own request
    pub fn authorize_review(actor: &AuthenticatedActor, requester: &User) -> Result<(), AuthError> {
        let denied = |reason: &str| AuthError::Unauthorized {
            action: String::from("review_request"),
            reason: reason.to_string(),
        };

        match actor.role {
            Role::Admin => Ok(()),
            Role::User => Err(denied("manager or admin role required")),
            Role::Manager if requester.id == actor.user_id => {
                Err(denied("managers cannot review their own requests"))
            }
            Role::Manager if requester.department_id != actor.department_id => Err(denied(
                "managers can only review requests from their own department",
            )),
            Role::Manager => Ok(()),
        }
    }

    /// Checks that the actor may cancel a request.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor owns the request or is an admin.
    pub fn authorize_cancel(
        actor: &AuthenticatedActor,
        request: &HolidayRequest,
    ) -> Result<(), AuthError> {
        if request.user_id == actor.user_id || actor.role.is_admin() {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("cancel_request"),
            reason: String::from("only the requester or an admin can cancel a request"),
        })
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    pub const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Signs a user in by email and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The user's email, compared ignoring case
    /// * `now` - The login time
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `user`, `expires_at`)
    ///
    /// # Errors
    ///
    /// Returns an error if no active user has this email or the session
    /// cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        now: OffsetDateTime,
    ) -> Result<(String, User, OffsetDateTime), AuthError> {
        let user: User = persistence
            .get_user_by_email(email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Unknown email address"),
            })?;

        if !user.is_active() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("User is archived"),
            });
        }

        let session_token: String = Self::generate_session_token(now);
        let expires_at: OffsetDateTime = now + Self::DEFAULT_SESSION_EXPIRATION;

        persistence
            .create_session(&session_token, user.id, now, expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        info!(user_id = %user.id, "User signed in");
        Ok((session_token, user, expires_at))
    }

    /// Validates a session token and returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is unknown or expired, or the user no
    /// longer exists or is archived.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
        now: OffsetDateTime,
    ) -> Result<(AuthenticatedActor, User), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        if now > session.expires_at {
            debug!(session_id = session.session_id, "Session expired");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: User = persistence
            .get_user(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        if !user.is_active() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("User is archived"),
            });
        }

        persistence
            .update_session_activity(session.session_id, now)
            .map_err(Self::map_persistence_error)?;

        Ok((AuthenticatedActor::from_user(&user), user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })
    }

    fn generate_session_token(now: OffsetDateTime) -> String {
        format!(
            "session_{}_{:016x}{:016x}",
            now.unix_timestamp_nanos(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
