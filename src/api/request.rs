//! Request types for the payroll engine API.
//!
//! Month keys arrive as plain strings and are validated in the handlers so
//! that a bad key is reported as `INVALID_MONTH` rather than a JSON error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DEFAULT_PERIOD_DAYS;
use crate::error::EngineResult;
use crate::models::{
    DisregardedPeriodFields, DisregardedReason, MonthKey, MpfScheme, PayBasis, PayRule,
    check_period_days,
};

fn default_period_days() -> u32 {
    DEFAULT_PERIOD_DAYS
}

/// Request body for `POST /mpf`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpfRequest {
    /// The scheme to compute under.
    pub scheme: MpfScheme,
    /// Gross pay for the period.
    pub gross_pay: Decimal,
    /// Period length in days (Industry Scheme only).
    #[serde(default = "default_period_days")]
    pub period_days: u32,
}

/// Request body for `POST /reallocate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReallocateRequest {
    /// The employee's pay basis.
    pub pay_basis: PayBasis,
    /// Qualifying days in the period.
    pub total_days: u32,
    /// Days to disregard.
    pub disregarded_days: u32,
    /// Pay received for the disregarded days.
    pub pay_rule: PayRule,
}

impl ReallocateRequest {
    /// Checks the pay amount and period length before any arithmetic.
    pub fn validate(&self) -> EngineResult<()> {
        self.pay_basis.validate()?;
        check_period_days("total_days", self.total_days)
    }
}

/// Request body for `POST /disregarded` and `PUT /disregarded/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisregardedRequest {
    /// The employee the period applies to.
    pub employee_id: String,
    /// The month, `YYYY-MM`.
    pub month: String,
    /// Why the days are disregarded.
    pub reason: DisregardedReason,
    /// Number of affected days.
    pub days: u32,
    /// Pay received for the affected days.
    pub pay_rule: PayRule,
}

impl DisregardedRequest {
    /// Validates the month key and converts to registry fields.
    pub fn into_fields(self) -> EngineResult<DisregardedPeriodFields> {
        Ok(DisregardedPeriodFields {
            month: MonthKey::parse(&self.month)?,
            employee_id: self.employee_id,
            reason: self.reason,
            days: self.days,
            pay_rule: self.pay_rule,
        })
    }
}

/// Query string for `GET /records`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsQuery {
    /// Restrict to one employee.
    pub employee_id: Option<String>,
}

/// Query string for `GET /employees/:id/annual-summary`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnualSummaryQuery {
    /// First month, defaults to the reporting year start.
    pub start: Option<String>,
    /// Last month, defaults to the reporting year end.
    pub end: Option<String>,
}

impl AnnualSummaryQuery {
    /// Parses whichever bounds were supplied.
    pub fn bounds(&self) -> EngineResult<(Option<MonthKey>, Option<MonthKey>)> {
        let parse = |value: &Option<String>| value.as_deref().map(MonthKey::parse).transpose();
        Ok((parse(&self.start)?, parse(&self.end)?))
    }
}
