// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use finyearly_domain::{DepartmentId, HolidayRequest, UserId};
use time::OffsetDateTime;

/// A stored login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: UserId,
    pub created_at: OffsetDateTime,
    pub last_activity_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

/// A request in a reviewer's queue, with the requester's details attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQueueEntry {
    pub request: HolidayRequest,
    pub requester_name: String,
    pub department_id: DepartmentId,
    /// `None` when the requester's department has been deleted.
    pub department_name: Option<String>,
}
