// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave day quantities.
//!
//! Leave is charged in half-day steps. `DayCount` stores an integer number
//! of half days so that sums and differences are exact; the decimal
//! representation (`4.5`, `-0.5`) only appears at the serialization edge.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A signed quantity of leave, in half-day steps.
///
/// Negative values are legal: a remaining balance can be overdrawn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "f64", try_from = "f64")]
pub struct DayCount {
    half_days: i32,
}

impl DayCount {
    /// No leave.
    pub const ZERO: Self = Self { half_days: 0 };
    /// Half a day.
    pub const HALF: Self = Self { half_days: 1 };
    /// One full day.
    pub const ONE: Self = Self { half_days: 2 };

    /// Creates a day count from a number of half days.
    #[must_use]
    pub const fn from_half_days(half_days: i32) -> Self {
        Self { half_days }
    }

    /// Creates a day count from a number of whole days.
    #[must_use]
    pub const fn from_whole_days(days: i32) -> Self {
        Self {
            half_days: days.saturating_mul(2),
        }
    }

    /// Parses a decimal day value such as `25`, `4.5` or `-0.5`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite, is not a multiple of
    /// 0.5, or is out of range.
    pub fn from_days(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidDayCount {
                value: value.to_string(),
                reason: String::from("value must be a finite number"),
            });
        }

        let doubled: f64 = value * 2.0;
        if (doubled - doubled.round()).abs() > f64::EPSILON {
            return Err(DomainError::InvalidDayCount {
                value: value.to_string(),
                reason: String::from("value must be a multiple of 0.5"),
            });
        }

        if doubled < f64::from(i32::MIN) || doubled > f64::from(i32::MAX) {
            return Err(DomainError::InvalidDayCount {
                value: value.to_string(),
                reason: String::from("value is out of range"),
            });
        }

        // Range and integrality were checked above.
        #[allow(clippy::cast_possible_truncation)]
        let half_days: i32 = doubled.round() as i32;
        Ok(Self { half_days })
    }

    /// Returns the number of half days.
    #[must_use]
    pub const fn half_days(&self) -> i32 {
        self.half_days
    }

    /// Returns the decimal number of days.
    #[must_use]
    pub fn as_days(&self) -> f64 {
        f64::from(self.half_days) / 2.0
    }

    /// Returns true if this count is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.half_days > 0
    }

    /// Returns true if this count is strictly less than zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.half_days < 0
    }

    /// Returns true if this count is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.half_days == 0
    }

    /// Adds two counts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            half_days: self.half_days.saturating_add(other.half_days),
        }
    }

    /// Subtracts two counts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            half_days: self.half_days.saturating_sub(other.half_days),
        }
    }
}

impl std::ops::Add for DayCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl std::ops::Sub for DayCount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl std::iter::Sum for DayCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl From<DayCount> for f64 {
    fn from(count: DayCount) -> Self {
        count.as_days()
    }
}

impl TryFrom<f64> for DayCount {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_days(value)
    }
}

impl std::fmt::Display for DayCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_days())
    }
}

/// Which part of a day a request covers at its start or end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayHalf {
    /// The whole day.
    #[default]
    Full,
    /// Morning only.
    Am,
    /// Afternoon only.
    Pm,
}

impl DayHalf {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }

    /// Returns true for `am` and `pm`.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::Am | Self::Pm)
    }
}

impl FromStr for DayHalf {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "am" => Ok(Self::Am),
            "pm" => Ok(Self::Pm),
            _ => Err(DomainError::InvalidDayHalf(s.to_string())),
        }
    }
}

impl std::fmt::Display for DayHalf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
