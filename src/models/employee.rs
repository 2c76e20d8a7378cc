//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct together with its pay basis
//! and MPF scheme assignment. Both are fixed when the employee is created;
//! the engine only ever reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Upper bound accepted for a monthly salary or daily rate.
pub const MAX_PAY_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// How an employee's pay is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayBasis {
    /// A fixed monthly salary.
    Monthly {
        /// The salary paid for a full month.
        monthly_salary: Decimal,
    },
    /// A daily rate paid per qualifying day worked.
    Casual {
        /// The rate paid per day.
        daily_rate: Decimal,
    },
}

impl PayBasis {
    /// Returns true for casual (daily-rated) pay.
    pub fn is_casual(&self) -> bool {
        matches!(self, PayBasis::Casual { .. })
    }

    /// The daily rate used for proportional pay.
    ///
    /// Monthly salaries are divided by the standard month length; casual
    /// employees use their rate as is.
    pub fn daily_rate(&self, standard_month_days: u32) -> Decimal {
        match *self {
            PayBasis::Monthly { monthly_salary } => {
                monthly_salary / Decimal::from(standard_month_days.max(1))
            }
            PayBasis::Casual { daily_rate } => daily_rate,
        }
    }

    /// Checks that the pay amount is between zero and [`MAX_PAY_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        let (field, amount) = match *self {
            PayBasis::Monthly { monthly_salary } => ("pay_basis.monthly_salary", monthly_salary),
            PayBasis::Casual { daily_rate } => ("pay_basis.daily_rate", daily_rate),
        };
        if amount < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: field.to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if amount > MAX_PAY_AMOUNT {
            return Err(EngineError::InvalidEmployee {
                field: field.to_string(),
                message: format!("must not exceed {}, got {}", MAX_PAY_AMOUNT, amount),
            });
        }
        Ok(())
    }

    /// A short label used in audit records.
    pub fn label(&self) -> &'static str {
        match self {
            PayBasis::Monthly { .. } => "monthly",
            PayBasis::Casual { .. } => "casual",
        }
    }
}

/// The MPF scheme an employee is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MpfScheme {
    /// A master trust scheme, contributions on monthly relevant income.
    MasterTrust,
    /// The catering and construction Industry Scheme, contributions on daily bands.
    IndustryScheme,
}

impl MpfScheme {
    /// A short label used in audit records.
    pub fn label(&self) -> &'static str {
        match self {
            MpfScheme::MasterTrust => "master_trust",
            MpfScheme::IndustryScheme => "industry_scheme",
        }
    }
}

/// Represents an employee whose payroll is computed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee (e.g. "EMP001").
    pub id: String,
    /// Display name, "Surname Given-name".
    #[serde(default)]
    pub name: String,
    /// How the employee is paid.
    pub pay_basis: PayBasis,
    /// The MPF scheme the employee is enrolled in.
    pub mpf_scheme: MpfScheme,
    /// Voluntary contribution as a percentage (0-100) of gross pay.
    #[serde(default)]
    pub voluntary_contribution_rate: Decimal,
}

impl Employee {
    /// Returns true if the employee is paid a daily rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, MpfScheme, PayBasis};
    /// use rust_decimal::Decimal;
    ///
    /// let waiter = Employee {
    ///     id: "EMP011".to_string(),
    ///     name: "Lau Kevin".to_string(),
    ///     pay_basis: PayBasis::Casual { daily_rate: Decimal::new(650, 0) },
    ///     mpf_scheme: MpfScheme::IndustryScheme,
    ///     voluntary_contribution_rate: Decimal::ZERO,
    /// };
    /// assert!(waiter.is_casual());
    /// ```
    pub fn is_casual(&self) -> bool {
        self.pay_basis.is_casual()
    }

    /// The daily rate used for proportional pay (see [`PayBasis::daily_rate`]).
    pub fn daily_rate(&self, standard_month_days: u32) -> Decimal {
        self.pay_basis.daily_rate(standard_month_days)
    }

    /// Checks the fields the engine depends on.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.voluntary_contribution_rate < Decimal::ZERO
            || self.voluntary_contribution_rate > Decimal::ONE_HUNDRED
        {
            return Err(EngineError::InvalidEmployee {
                field: "voluntary_contribution_rate".to_string(),
                message: format!(
                    "must be between 0 and 100, got {}",
                    self.voluntary_contribution_rate
                ),
            });
        }

        self.pay_basis.validate()
    }
}
