// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `users`: Users and departments
//! - `financial_years`: Financial years
//! - `allowances`: Allowance records and the default allowance setting
//! - `requests`: Holiday requests and the review queue
//! - `sessions`: Login sessions

pub mod allowances;
pub mod financial_years;
pub mod requests;
pub mod sessions;
pub mod users;

pub use allowances::{get_allowance_record, get_default_allowance};
pub use financial_years::{get_financial_year, list_financial_years};
pub use requests::{
    ReviewQueueFilter, get_request, list_approved_requests, list_requests_for_user,
    list_review_queue,
};
pub use sessions::get_session_by_token;
pub use users::{
    count_users, get_department, get_user, get_user_by_email, list_departments, list_users,
};
