//! Monthly payroll records.
//!
//! A [`PeriodRecord`] holds one employee's figures for one calendar month.
//! Its financial fields are written only by
//! [`recompute_record`](crate::calculation::recompute_record).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DisregardedReason, MonthKey};
use crate::error::{EngineError, EngineResult};

/// The most qualifying days a single monthly period can hold.
pub const MAX_PERIOD_DAYS: u32 = 31;

/// Rejects a period length above [`MAX_PERIOD_DAYS`].
pub fn check_period_days(field: &str, days: u32) -> EngineResult<()> {
    if days > MAX_PERIOD_DAYS {
        return Err(EngineError::InvalidPeriod {
            field: field.to_string(),
            message: format!("must be at most {}, got {}", MAX_PERIOD_DAYS, days),
        });
    }
    Ok(())
}

/// The disregarded-period effect currently applied to a record.
///
/// A record carries at most one annotation; applying a new one replaces the
/// previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeriodAnnotation {
    /// The whole period counts towards the average daily wage.
    #[default]
    Regular,
    /// Part or all of the period is excluded from the average daily wage.
    Disregarded {
        /// Why the days are disregarded.
        reason: DisregardedReason,
        /// Days removed from the ADW denominator.
        excluded_days: u32,
        /// Pay removed from the ADW numerator.
        excluded_pay: Decimal,
        /// The registry entry this effect came from, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        entry_id: Option<Uuid>,
    },
}

impl PeriodAnnotation {
    /// Returns true if the period is (partly) disregarded.
    pub fn is_disregarded(&self) -> bool {
        matches!(self, PeriodAnnotation::Disregarded { .. })
    }

    /// The disregarded reason, if any.
    pub fn reason(&self) -> Option<DisregardedReason> {
        match self {
            PeriodAnnotation::Regular => None,
            PeriodAnnotation::Disregarded { reason, .. } => Some(*reason),
        }
    }

    /// Pay excluded from the ADW numerator (zero for regular periods).
    pub fn excluded_pay(&self) -> Decimal {
        match self {
            PeriodAnnotation::Regular => Decimal::ZERO,
            PeriodAnnotation::Disregarded { excluded_pay, .. } => *excluded_pay,
        }
    }

    /// Days excluded from the ADW denominator (zero for regular periods).
    pub fn excluded_days(&self) -> u32 {
        match self {
            PeriodAnnotation::Regular => 0,
            PeriodAnnotation::Disregarded { excluded_days, .. } => *excluded_days,
        }
    }

    /// The registry entry applied to the period, if any.
    pub fn entry_id(&self) -> Option<Uuid> {
        match self {
            PeriodAnnotation::Regular => None,
            PeriodAnnotation::Disregarded { entry_id, .. } => *entry_id,
        }
    }
}

/// One employee's payroll figures for one calendar month.
///
/// After every recompute `net_pay == gross_pay - mpf_employee_mandatory -
/// mpf_employee_voluntary` holds exactly over the stored, rounded fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar month.
    pub month: MonthKey,
    /// Gross pay for the month.
    pub gross_pay: Decimal,
    /// Qualifying days in the month.
    pub total_days: u32,
    /// Income MPF percentages are applied to (equal to gross pay).
    pub mpf_relevant_income: Decimal,
    /// Employer mandatory MPF contribution.
    pub mpf_employer_mandatory: Decimal,
    /// Employee mandatory MPF contribution.
    pub mpf_employee_mandatory: Decimal,
    /// Employee voluntary MPF contribution.
    pub mpf_employee_voluntary: Decimal,
    /// Pay after employee contributions.
    pub net_pay: Decimal,
    /// The disregarded-period effect applied to the month.
    #[serde(default)]
    pub annotation: PeriodAnnotation,
}

impl PeriodRecord {
    /// A blank record with no pay, ready to be filled by recompute.
    pub fn blank(employee_id: impl Into<String>, month: MonthKey, total_days: u32) -> Self {
        Self {
            employee_id: employee_id.into(),
            month,
            gross_pay: Decimal::ZERO,
            total_days,
            mpf_relevant_income: Decimal::ZERO,
            mpf_employer_mandatory: Decimal::ZERO,
            mpf_employee_mandatory: Decimal::ZERO,
            mpf_employee_voluntary: Decimal::ZERO,
            net_pay: Decimal::ZERO,
            annotation: PeriodAnnotation::Regular,
        }
    }

    /// Stable identifier, `<employee>-<month>`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.employee_id, self.month)
    }

    /// Returns true if the period is (partly) disregarded.
    pub fn is_disregarded(&self) -> bool {
        self.annotation.is_disregarded()
    }

    /// Employer plus employee (mandatory and voluntary) contributions,
    /// i.e. the amount remitted to the trustee for the month.
    pub fn total_mpf_contribution(&self) -> Decimal {
        self.mpf_employer_mandatory + self.mpf_employee_mandatory + self.mpf_employee_voluntary
    }
}
