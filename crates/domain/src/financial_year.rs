// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Financial year domain model.
//!
//! A financial year scopes allowances and requests. Years are defined by
//! an inclusive start instant and an end instant and never overlap.

use crate::error::DomainError;
use crate::types::FinancialYearId;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A persisted financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialYear {
    /// The financial year identifier.
    pub id: FinancialYearId,
    /// Display name, e.g. `25/26`.
    pub name: String,
    /// Inclusive start instant.
    pub start: OffsetDateTime,
    /// End instant.
    pub end: OffsetDateTime,
}

impl FinancialYear {
    /// Returns the first calendar day of the year (UTC).
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start.date()
    }

    /// Returns the last calendar day of the year (UTC).
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end.date()
    }

    /// Returns true if the calendar day falls within this financial year.
    #[must_use]
    pub fn contains_date(&self, date: Date) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Returns true if the two instant ranges share any instant.
    #[must_use]
    pub fn overlaps(&self, start: OffsetDateTime, end: OffsetDateTime) -> bool {
        start <= self.end && self.start <= end
    }
}

/// Validates a new financial year against the existing ones.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The start is not before the end
/// - The range overlaps an existing financial year
pub fn validate_financial_year(
    name: &str,
    start: OffsetDateTime,
    end: OffsetDateTime,
    existing: &[FinancialYear],
) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidFinancialYear(String::from(
            "Name cannot be empty",
        )));
    }

    if start >= end {
        return Err(DomainError::InvalidFinancialYear(format!(
            "Start {start} must be before end {end}"
        )));
    }

    if let Some(clash) = existing.iter().find(|year| year.overlaps(start, end)) {
        return Err(DomainError::OverlappingFinancialYear {
            name: name.to_string(),
            existing: clash.name.clone(),
        });
    }

    Ok(())
}

/// Selects the financial year a caller is working in.
///
/// The year matching `requested` wins; otherwise the latest year by start
/// date is used. Returns `None` only when there are no financial years.
#[must_use]
pub fn select_financial_year(
    years: &[FinancialYear],
    requested: Option<FinancialYearId>,
) -> Option<&FinancialYear> {
    requested
        .and_then(|id| years.iter().find(|year| year.id == id))
        .or_else(|| years.iter().max_by_key(|year| year.start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn year(id: i64, name: &str, start: OffsetDateTime, end: OffsetDateTime) -> FinancialYear {
        FinancialYear {
            id: FinancialYearId::new(id),
            name: name.to_string(),
            start,
            end,
        }
    }

    fn sample_years() -> Vec<FinancialYear> {
        vec![
            year(
                2,
                "25/26",
                datetime!(2025-04-01 00:00 UTC),
                datetime!(2026-03-31 23:59:59 UTC),
            ),
            year(
                1,
                "24/25",
                datetime!(2024-04-01 00:00 UTC),
                datetime!(2025-03-31 23:59:59 UTC),
            ),
        ]
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let years: Vec<FinancialYear> = sample_years();
        let fy: &FinancialYear = &years[0];
        assert!(fy.contains_date(date!(2025 - 04 - 01)));
        assert!(fy.contains_date(date!(2026 - 03 - 31)));
        assert!(!fy.contains_date(date!(2026 - 04 - 01)));
        assert!(!fy.contains_date(date!(2025 - 03 - 31)));
    }

    #[test]
    fn test_select_prefers_requested_id() {
        let years: Vec<FinancialYear> = sample_years();
        let selected: Option<&FinancialYear> =
            select_financial_year(&years, Some(FinancialYearId::new(1)));
        assert_eq!(selected.map(|fy| fy.name.as_str()), Some("24/25"));
    }

    #[test]
    fn test_select_defaults_to_latest_start() {
        let years: Vec<FinancialYear> = sample_years();
        assert_eq!(
            select_financial_year(&years, None).map(|fy| fy.name.as_str()),
            Some("25/26")
        );
        assert_eq!(
            select_financial_year(&years, Some(FinancialYearId::new(99))).map(|fy| fy.id),
            Some(FinancialYearId::new(2))
        );
        assert!(select_financial_year(&[], None).is_none());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let years: Vec<FinancialYear> = sample_years();
        let result: Result<(), DomainError> = validate_financial_year(
            "Overlap",
            datetime!(2026-03-01 00:00 UTC),
            datetime!(2027-02-28 23:59:59 UTC),
            &years,
        );
        assert_eq!(
            result,
            Err(DomainError::OverlappingFinancialYear {
                name: String::from("Overlap"),
                existing: String::from("25/26"),
            })
        );
    }

    #[test]
    fn test_validate_accepts_adjacent_year() {
        let years: Vec<FinancialYear> = sample_years();
        assert!(
            validate_financial_year(
                "26/27",
                datetime!(2026-04-01 00:00 UTC),
                datetime!(2027-03-31 23:59:59 UTC),
                &years,
            )
            .is_ok()
        );
    }

    #[test]
    fn test_validate_rejects_inverted_range_and_empty_name() {
        assert!(matches!(
            validate_financial_year(
                "Backwards",
                datetime!(2027-04-01 00:00 UTC),
                datetime!(2026-04-01 00:00 UTC),
                &[],
            ),
            Err(DomainError::InvalidFinancialYear(_))
        ));
        assert!(matches!(
            validate_financial_year(
                "  ",
                datetime!(2026-04-01 00:00 UTC),
                datetime!(2027-04-01 00:00 UTC),
                &[],
            ),
            Err(DomainError::InvalidFinancialYear(_))
        ));
    }
}
