// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store traits of the lifecycle crate, backed by `SQLite`.

use finyearly::{
    AllowanceRepository, FinancialYearRepository, RepositoryError, RequestRepository,
    UserRepository,
};
use finyearly_domain::{
    DayCount, FinancialYear, FinancialYearId, HolidayRequest, NewHolidayRequest, RequestId,
    RequestStatus, User, UserId,
};
use time::OffsetDateTime;

use crate::Persistence;
use crate::error::PersistenceError;

impl UserRepository for Persistence {
    fn get_user(&mut self, user_id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(Self::get_user(self, user_id)?)
    }
}

impl FinancialYearRepository for Persistence {
    fn get_financial_year(
        &mut self,
        financial_year_id: FinancialYearId,
    ) -> Result<Option<FinancialYear>, RepositoryError> {
        Ok(Self::get_financial_year(self, financial_year_id)?)
    }

    fn list_financial_years(&mut self) -> Result<Vec<FinancialYear>, RepositoryError> {
        Ok(Self::list_financial_years(self)?)
    }
}

impl AllowanceRepository for Persistence {
    fn get_allowance_record(
        &mut self,
        user_id: UserId,
        financial_year_id: FinancialYearId,
    ) -> Result<Option<DayCount>, RepositoryError> {
        Ok(Self::get_allowance_record(self, user_id, financial_year_id)?)
    }

    fn get_default_allowance(&mut self) -> Result<DayCount, RepositoryError> {
        Ok(Self::get_default_allowance(self)?)
    }
}

impl RequestRepository for Persistence {
    fn get_request(
        &mut self,
        request_id: RequestId,
    ) -> Result<Option<HolidayRequest>, RepositoryError> {
        Ok(Self::get_request(self, request_id)?)
    }

    fn list_approved_requests(
        &mut self,
        user_id: UserId,
        financial_year_id: FinancialYearId,
    ) -> Result<Vec<HolidayRequest>, RepositoryError> {
        Ok(Self::list_approved_requests(self, user_id, financial_year_id)?)
    }

    fn create_request(
        &mut self,
        request: &NewHolidayRequest,
    ) -> Result<HolidayRequest, RepositoryError> {
        let request_id: RequestId = self.insert_request(request)?;
        Ok(self.require_request(request_id)?)
    }

    fn update_request_status(
        &mut self,
        request_id: RequestId,
        status: RequestStatus,
        reviewed_by: UserId,
        reviewed_at: OffsetDateTime,
    ) -> Result<HolidayRequest, RepositoryError> {
        Self::update_request_status(self, request_id, status, reviewed_by, reviewed_at)?;
        Ok(self.require_request(request_id)?)
    }

    fn delete_request(&mut self, request_id: RequestId) -> Result<(), RepositoryError> {
        Ok(Self::delete_request(self, request_id)?)
    }
}

impl Persistence {
    fn require_request(&mut self, request_id: RequestId) -> Result<HolidayRequest, PersistenceError> {
        Self::get_request(self, request_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Request {request_id}")))
    }
}
