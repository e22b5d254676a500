// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{Fixture, create_fixture};
use finyearly_domain::{FinancialYear, FinancialYearId};
use time::macros::{date, datetime};

#[test]
fn test_financial_year_round_trips() {
    let mut fixture: Fixture = create_fixture();
    let loaded: FinancialYear = fixture
        .persistence
        .get_financial_year(fixture.financial_year.id)
        .unwrap()
        .unwrap();

    assert_eq!(loaded, fixture.financial_year);
    assert_eq!(loaded.start_date(), date!(2025 - 04 - 01));
    assert_eq!(loaded.end_date(), date!(2026 - 03 - 31));
}

#[test]
fn test_financial_years_are_listed_by_start() {
    let mut fixture: Fixture = create_fixture();
    fixture
        .persistence
        .create_financial_year(
            "24/25",
            datetime!(2024-04-01 00:00:00 UTC),
            datetime!(2025-03-31 23:59:59 UTC),
        )
        .unwrap();

    let names: Vec<String> = fixture
        .persistence
        .list_financial_years()
        .unwrap()
        .into_iter()
        .map(|year| year.name)
        .collect();
    assert_eq!(names, vec!["24/25", "25/26"]);
}

#[test]
fn test_timestamps_are_stored_in_utc() {
    let mut fixture: Fixture = create_fixture();
    let created: FinancialYear = fixture
        .persistence
        .create_financial_year(
            "26/27",
            datetime!(2026-04-01 01:00:00 +01:00),
            datetime!(2027-03-31 23:59:59 UTC),
        )
        .unwrap();

    assert_eq!(created.start, datetime!(2026-04-01 00:00:00 UTC));
}

#[test]
fn test_missing_financial_year_returns_none() {
    let mut fixture: Fixture = create_fixture();
    assert!(
        fixture
            .persistence
            .get_financial_year(FinancialYearId::new(77))
            .unwrap()
            .is_none()
    );
}
