// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{EMPLOYEE, FY_25_26, InMemoryStore, plain_week};
use crate::{CoreError, current_financial_year, get_allowance};
use finyearly_domain::{AllowanceSummary, DayCount, FinancialYear, FinancialYearId, RequestStatus};
use time::macros::date;

#[test]
fn test_default_allowance_applies_without_record() {
    let mut store: InMemoryStore = InMemoryStore::seeded();
    let summary: AllowanceSummary = get_allowance(&mut store, EMPLOYEE, FY_25_26).unwrap();
    assert_eq!(summary.total_allowance, DayCount::from_whole_days(25));
    assert_eq!(summary.holidays_taken, DayCount::ZERO);
}

#[test]
fn test_explicit_record_overrides_default() {
    let mut store: InMemoryStore = InMemoryStore::seeded();
    store
        .allowances
        .insert((EMPLOYEE, FY_25_26), DayCount::from_whole_days(28));
    let summary: AllowanceSummary = get_allowance(&mut store, EMPLOYEE, FY_25_26).unwrap();
    assert_eq!(summary.total_allowance, DayCount::from_whole_days(28));
}

#[test]
fn test_changed_default_is_read_per_call() {
    let mut store: InMemoryStore = InMemoryStore::seeded();
    store.default_allowance = DayCount::from_half_days(41);
    let summary: AllowanceSummary = get_allowance(&mut store, EMPLOYEE, FY_25_26).unwrap();
    assert_eq!(summary.total_allowance.to_string(), "20.5");
}

#[test]
fn test_approved_request_reduces_remaining() {
    let mut store: InMemoryStore = InMemoryStore::seeded();
    let (monday, friday) = plain_week();
    store.insert_request(
        monday,
        friday,
        DayCount::from_whole_days(5),
        RequestStatus::Approved,
    );
    store.insert_request(
        date!(2025 - 08 - 04),
        date!(2025 - 08 - 05),
        DayCount::from_whole_days(2),
        RequestStatus::Pending,
    );
    store.insert_request(
        date!(2025 - 09 - 01),
        date!(2025 - 09 - 01),
        DayCount::ONE,
        RequestStatus::Denied,
    );

    let summary: AllowanceSummary = get_allowance(&mut store, EMPLOYEE, FY_25_26).unwrap();
    assert_eq!(summary.holidays_taken, DayCount::from_whole_days(5));
    assert_eq!(summary.remaining_days, DayCount::from_whole_days(20));
}

#[test]
fn test_lowered_allowance_reports_negative_remaining() {
    let mut store: InMemoryStore = InMemoryStore::seeded();
    let (monday, friday) = plain_week();
    store.insert_request(
        monday,
        friday,
        DayCount::from_whole_days(5),
        RequestStatus::Approved,
    );
    store
        .allowances
        .insert((EMPLOYEE, FY_25_26), DayCount::from_whole_days(3));

    let summary: AllowanceSummary = get_allowance(&mut store, EMPLOYEE, FY_25_26).unwrap();
    assert_eq!(summary.remaining_days, DayCount::from_whole_days(-2));
    assert!(summary.is_overdrawn);
}

#[test]
fn test_repeated_reads_are_identical() {
    let mut store: InMemoryStore = InMemoryStore::seeded();
    let (monday, friday) = plain_week();
    store.insert_request(
        monday,
        friday,
        DayCount::from_half_days(9),
        RequestStatus::Approved,
    );

    let first: AllowanceSummary = get_allowance(&mut store, EMPLOYEE, FY_25_26).unwrap();
    let second: AllowanceSummary = get_allowance(&mut store, EMPLOYEE, FY_25_26).unwrap();
    assert_eq!(first, second);
    assert_eq!(store.requests.len(), 1);
}

#[test]
fn test_current_financial_year_selection() {
    let mut store: InMemoryStore = InMemoryStore::seeded();

    let latest: Option<FinancialYear> = current_financial_year(&mut store, None).unwrap();
    assert_eq!(latest.map(|fy| fy.id), Some(FY_25_26));

    let chosen: Option<FinancialYear> =
        current_financial_year(&mut store, Some(FinancialYearId::new(1))).unwrap();
    assert_eq!(chosen.map(|fy| fy.name), Some(String::from("24/25")));

    store.financial_years.clear();
    let none: Result<Option<FinancialYear>, CoreError> = current_financial_year(&mut store, None);
    assert_eq!(none, Ok(None));
}
