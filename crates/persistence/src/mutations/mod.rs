// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `users`: Users and departments
//! - `financial_years`: Financial years
//! - `allowances`: Allowance records and the default allowance setting
//! - `requests`: Holiday requests
//! - `sessions`: Login sessions
//! - `seed`: Demo data

pub mod allowances;
pub mod financial_years;
pub mod requests;
pub mod seed;
pub mod sessions;
pub mod users;

pub use allowances::{set_allowance, set_default_allowance};
pub use financial_years::create_financial_year;
pub use requests::{delete_request, insert_request, update_request_status};
pub use seed::seed_demo_data;
pub use sessions::{
    create_session, delete_expired_sessions, delete_session, delete_sessions_for_user,
    update_session_activity,
};
pub use users::{
    archive_user, create_department, create_user, delete_department, rename_department,
    update_user,
};
