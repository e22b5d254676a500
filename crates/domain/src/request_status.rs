// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Holiday request records and their status lifecycle.
//!
//! A request starts `pending` and is reviewed exactly once, to either
//! `approved` or `denied`. Reviewed requests never return to `pending`.
//! Cancellation removes a request entirely and is only possible while it
//! is still pending; it is not a status of its own.

use crate::day_count::{DayCount, DayHalf};
use crate::error::DomainError;
use crate::types::{FinancialYearId, RequestId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Review status of a holiday request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting review. The only initial state.
    #[default]
    Pending,
    /// Approved by a reviewer. Counts against the allowance.
    Approved,
    /// Denied by a reviewer.
    Denied,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }

    /// Validates if a review from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "request has already been reviewed".to_string(),
            });
        }

        match new_status {
            Self::Approved | Self::Denied => Ok(()),
            Self::Pending => Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "a review must approve or deny the request".to_string(),
            }),
        }
    }

    /// Validates that a request in this status may be cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error unless the status is `pending`.
    pub fn validate_cancellation(&self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: String::from("cancelled"),
                reason: "cannot cancel a reviewed request".to_string(),
            });
        }
        Ok(())
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "denied" => Ok(Self::Denied),
            _ => Err(DomainError::InvalidRequestStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted holiday request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// The request identifier.
    pub id: RequestId,
    /// The requesting user.
    pub user_id: UserId,
    /// The financial year the request is charged to.
    pub financial_year_id: FinancialYearId,
    /// First calendar day of the absence.
    pub start_date: Date,
    /// Which part of the first day is taken.
    pub start_half: DayHalf,
    /// Last calendar day of the absence.
    pub end_date: Date,
    /// Which part of the last day is taken.
    pub end_half: DayHalf,
    /// Chargeable days, derived from the range at creation time.
    pub days_count: DayCount,
    /// Review status.
    pub status: RequestStatus,
    /// When the request was submitted.
    pub created_at: OffsetDateTime,
    /// Who reviewed the request, once reviewed.
    pub reviewed_by: Option<UserId>,
    /// When the request was reviewed, once reviewed.
    pub reviewed_at: Option<OffsetDateTime>,
}

impl HolidayRequest {
    /// Returns true if the request counts against the allowance.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }
}

/// A validated holiday request that has not been persisted yet.
///
/// New requests are always `pending` and unreviewed, so neither is a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHolidayRequest {
    /// The requesting user.
    pub user_id: UserId,
    /// The financial year the request is charged to.
    pub financial_year_id: FinancialYearId,
    /// First calendar day of the absence.
    pub start_date: Date,
    /// Which part of the first day is taken.
    pub start_half: DayHalf,
    /// Last calendar day of the absence.
    pub end_date: Date,
    /// Which part of the last day is taken.
    pub end_half: DayHalf,
    /// Chargeable days.
    pub days_count: DayCount,
    /// Submission time.
    pub created_at: OffsetDateTime,
}

impl NewHolidayRequest {
    /// Materializes the stored form of this request under the given id.
    #[must_use]
    pub fn into_request(self, id: RequestId) -> HolidayRequest {
        HolidayRequest {
            id,
            user_id: self.user_id,
            financial_year_id: self.financial_year_id,
            start_date: self.start_date,
            start_half: self.start_half,
            end_date: self.end_date,
            end_half: self.end_half,
            days_count: self.days_count,
            status: RequestStatus::Pending,
            created_at: self.created_at,
            reviewed_by: None,
            reviewed_at: None,
        }
    }
}
