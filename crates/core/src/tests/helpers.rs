// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AllowanceRepository, FinancialYearRepository, RepositoryError, RequestDraft,
    RequestRepository, UserRepository,
};
use finyearly_domain::{
    DayCount, DayHalf, DepartmentId, FinancialYear, FinancialYearId, HolidayRequest,
    NewHolidayRequest, RequestId, RequestStatus, Role, StaticHolidayCalendar, User, UserId,
};
use std::collections::HashMap;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const EMPLOYEE: UserId = UserId::new(3);
pub const MANAGER: UserId = UserId::new(2);
pub const ARCHIVED: UserId = UserId::new(9);
pub const FY_25_26: FinancialYearId = FinancialYearId::new(2);

/// A vector-backed store used to exercise the lifecycle operations.
#[derive(Debug)]
pub struct InMemoryStore {
    pub users: Vec<User>,
    pub financial_years: Vec<FinancialYear>,
    pub allowances: HashMap<(UserId, FinancialYearId), DayCount>,
    pub default_allowance: DayCount,
    pub requests: Vec<HolidayRequest>,
    pub fail_writes: bool,
    next_request_id: i64,
}

impl InMemoryStore {
    pub fn seeded() -> Self {
        Self {
            users: vec![
                create_test_user(MANAGER, Role::Manager, false),
                create_test_user(EMPLOYEE, Role::User, false),
                create_test_user(ARCHIVED, Role::User, true),
            ],
            financial_years: vec![
                FinancialYear {
                    id: FinancialYearId::new(1),
                    name: String::from("24/25"),
                    start: datetime!(2024-04-01 00:00 UTC),
                    end: datetime!(2025-03-31 23:59:59 UTC),
                },
                FinancialYear {
                    id: FY_25_26,
                    name: String::from("25/26"),
                    start: datetime!(2025-04-01 00:00 UTC),
                    end: datetime!(2026-03-31 23:59:59 UTC),
                },
            ],
            allowances: HashMap::new(),
            default_allowance: DayCount::from_whole_days(25),
            requests: Vec::new(),
            fail_writes: false,
            next_request_id: 1,
        }
    }

    /// Inserts a request directly, bypassing validation.
    pub fn insert_request(
        &mut self,
        start_date: Date,
        end_date: Date,
        days: DayCount,
        status: RequestStatus,
    ) -> RequestId {
        let mut request: HolidayRequest = NewHolidayRequest {
            user_id: EMPLOYEE,
            financial_year_id: FY_25_26,
            start_date,
            start_half: DayHalf::Full,
            end_date,
            end_half: DayHalf::Full,
            days_count: days,
            created_at: now(),
        }
        .into_request(RequestId::new(self.next_request_id));
        self.next_request_id += 1;
        request.status = status;
        if status.is_terminal() {
            request.reviewed_by = Some(MANAGER);
            request.reviewed_at = Some(now());
        }
        let id: RequestId = request.id;
        self.requests.push(request);
        id
    }

    fn check_writable(&self) -> Result<(), RepositoryError> {
        if self.fail_writes {
            return Err(RepositoryError::new("disk I/O error"));
        }
        Ok(())
    }
}

impl UserRepository for InMemoryStore {
    fn get_user(&mut self, user_id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.iter().find(|user| user.id == user_id).cloned())
    }
}

impl FinancialYearRepository for InMemoryStore {
    fn get_financial_year(
        &mut self,
        financial_year_id: FinancialYearId,
    ) -> Result<Option<FinancialYear>, RepositoryError> {
        Ok(self
            .financial_years
            .iter()
            .find(|year| year.id == financial_year_id)
            .cloned())
    }

    fn list_financial_years(&mut self) -> Result<Vec<FinancialYear>, RepositoryError> {
        let mut years: Vec<FinancialYear> = self.financial_years.clone();
        years.sort_by_key(|year| year.start);
        Ok(years)
    }
}

impl AllowanceRepository for InMemoryStore {
    fn get_allowance_record(
        &mut self,
        user_id: UserId,
        financial_year_id: FinancialYearId,
    ) -> Result<Option<DayCount>, RepositoryError> {
        Ok(self.allowances.get(&(user_id, financial_year_id)).copied())
    }

    fn get_default_allowance(&mut self) -> Result<DayCount, RepositoryError> {
        Ok(self.default_allowance)
    }
}

impl RequestRepository for InMemoryStore {
    fn get_request(
        &mut self,
        request_id: RequestId,
    ) -> Result<Option<HolidayRequest>, RepositoryError> {
        Ok(self
            .requests
            .iter()
            .find(|request| request.id == request_id)
            .cloned())
    }

    fn list_approved_requests(
        &mut self,
        user_id: UserId,
        financial_year_id: FinancialYearId,
    ) -> Result<Vec<HolidayRequest>, RepositoryError> {
        Ok(self
            .requests
            .iter()
            .filter(|request| {
                request.user_id == user_id
                    && request.financial_year_id == financial_year_id
                    && request.is_approved()
            })
            .cloned()
            .collect())
    }

    fn create_request(
        &mut self,
        request: &NewHolidayRequest,
    ) -> Result<HolidayRequest, RepositoryError> {
        self.check_writable()?;
        let stored: HolidayRequest = request
            .clone()
            .into_request(RequestId::new(self.next_request_id));
        self.next_request_id += 1;
        self.requests.push(stored.clone());
        Ok(stored)
    }

    fn update_request_status(
        &mut self,
        request_id: RequestId,
        status: RequestStatus,
        reviewed_by: UserId,
        reviewed_at: OffsetDateTime,
    ) -> Result<HolidayRequest, RepositoryError> {
        self.check_writable()?;
        let request: &mut HolidayRequest = self
            .requests
            .iter_mut()
            .find(|request| request.id == request_id)
            .ok_or_else(|| RepositoryError::new("request not found"))?;
        request.status = status;
        request.reviewed_by = Some(reviewed_by);
        request.reviewed_at = Some(reviewed_at);
        Ok(request.clone())
    }

    fn delete_request(&mut self, request_id: RequestId) -> Result<(), RepositoryError> {
        self.check_writable()?;
        self.requests.retain(|request| request.id != request_id);
        Ok(())
    }
}

pub fn create_test_user(id: UserId, role: Role, archived: bool) -> User {
    User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        role,
        department_id: DepartmentId::new(1),
        created_at: datetime!(2024-01-01 00:00 UTC),
        avatar_url: None,
        archived,
    }
}

pub fn create_test_draft(start_date: Date, end_date: Date) -> RequestDraft {
    RequestDraft {
        user_id: EMPLOYEE,
        financial_year_id: FY_25_26,
        start_date,
        start_half: DayHalf::Full,
        end_date,
        end_half: DayHalf::Full,
    }
}

pub fn create_test_calendar() -> StaticHolidayCalendar {
    StaticHolidayCalendar::england_and_wales()
}

pub fn now() -> OffsetDateTime {
    datetime!(2025-06-01 09:30 UTC)
}

/// Monday to Friday of a week without public holidays.
pub fn plain_week() -> (Date, Date) {
    (date!(2025 - 07 - 14), date!(2025 - 07 - 18))
}
