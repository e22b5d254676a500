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

mod allowance;
mod error;
mod lifecycle;
mod repository;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use allowance::{current_financial_year, get_allowance};
pub use error::CoreError;
pub use lifecycle::{
    RequestDraft, calculate_request_days, cancel_request, create_request, review_request,
};
pub use repository::{
    AllowanceRepository, FinancialYearRepository, LeaveStore, RepositoryError, RequestRepository,
    UserRepository,
};
