// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allowance value policy.
//!
//! Applies to per-user allowances and to the organisation default. Values
//! arrive as decimal day counts.

use finyearly_domain::{DayCount, validate_allowance};
use thiserror::Error;

/// Allowance policy errors.
#[derive(Debug, Error, PartialEq)]
pub enum AllowancePolicyError {
    /// The value is NaN or infinite.
    #[error("Allowance must be a finite number")]
    NotFinite,

    /// The value is below zero.
    #[error("Allowance cannot be negative, got {value}")]
    Negative { value: f64 },

    /// The value is not a whole or half day.
    #[error("Allowance must be a multiple of 0.5 days, got {value}")]
    NotHalfDay { value: f64 },

    /// The value is larger than any year.
    #[error("Allowance cannot exceed {max_days} days, got {value}")]
    TooLarge { value: f64, max_days: u16 },
}

/// Allowance policy configuration.
pub struct AllowancePolicy {
    /// Largest accepted allowance, in days.
    pub max_days: u16,
}

impl Default for AllowancePolicy {
    fn default() -> Self {
        Self { max_days: 366 }
    }
}

impl AllowancePolicy {
    /// Validates an allowance and converts it to a day count.
    ///
    /// # Errors
    ///
    /// Returns an `AllowancePolicyError` if the value is not finite,
    /// exceeds the maximum, is not a multiple of half a day or is negative.
    pub fn validate(&self, value: f64) -> Result<DayCount, AllowancePolicyError> {
        if !value.is_finite() {
            return Err(AllowancePolicyError::NotFinite);
        }

        if value > f64::from(self.max_days) {
            return Err(AllowancePolicyError::TooLarge {
                value,
                max_days: self.max_days,
            });
        }

        let allowance: DayCount = DayCount::from_days(value)
            .map_err(|_| AllowancePolicyError::NotHalfDay { value })?;

        // The domain owns the sign rule.
        validate_allowance(allowance).map_err(|_| AllowancePolicyError::Negative { value })?;

        Ok(allowance)
    }
}
