//! Disregarded-period registry entries.
//!
//! A disregarded period marks days in one employee-month that must be left
//! out of the 713 average daily wage: maternity leave, sickness allowance,
//! work-injury compensation, unpaid leave and similar.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MonthKey;

/// Why a period is disregarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisregardedReason {
    /// Maternity leave.
    Maternity,
    /// Sickness allowance days.
    Sickness,
    /// Work-injury compensation (Employees' Compensation Ordinance).
    #[serde(rename = "WIC")]
    Wic,
    /// Unpaid leave taken with the employer's agreement.
    Unpaid,
    /// Any other statutory ground.
    Other,
}

impl DisregardedReason {
    /// Human-readable description shown against the affected record.
    pub fn description(&self) -> &'static str {
        match self {
            DisregardedReason::Maternity => "Maternity Leave",
            DisregardedReason::Sickness => "Sickness Allowance",
            DisregardedReason::Wic => "Work Injury",
            DisregardedReason::Unpaid => "Unpaid Leave",
            DisregardedReason::Other => "Other",
        }
    }
}

/// The fraction of normal pay received for disregarded days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayRule {
    /// Four-fifths of the daily rate.
    #[serde(alias = "4/5")]
    FourFifths,
    /// No pay for the affected days.
    #[serde(alias = "No Pay")]
    NoPay,
    /// Full daily rate.
    #[serde(alias = "Full Pay")]
    FullPay,
}

impl PayRule {
    /// The multiplier applied to the daily rate for affected days.
    pub fn factor(&self, four_fifths_factor: Decimal) -> Decimal {
        match self {
            PayRule::FourFifths => four_fifths_factor,
            PayRule::NoPay => Decimal::ZERO,
            PayRule::FullPay => Decimal::ONE,
        }
    }

    /// A short label used in audit records.
    pub fn label(&self) -> &'static str {
        match self {
            PayRule::FourFifths => "four_fifths",
            PayRule::NoPay => "no_pay",
            PayRule::FullPay => "full_pay",
        }
    }
}

/// The caller-supplied fields of a registry entry, used for add and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisregardedPeriodFields {
    /// The employee the period applies to.
    pub employee_id: String,
    /// The month containing the disregarded days.
    pub month: MonthKey,
    /// Why the days are disregarded.
    pub reason: DisregardedReason,
    /// Number of affected days (clamped to the period length when applied).
    pub days: u32,
    /// Pay received for the affected days.
    pub pay_rule: PayRule,
}

/// A disregarded-period entry owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisregardedPeriodEntry {
    /// Unique identifier assigned when the entry is added.
    pub id: Uuid,
    /// The employee the period applies to.
    pub employee_id: String,
    /// The month containing the disregarded days.
    pub month: MonthKey,
    /// Why the days are disregarded.
    pub reason: DisregardedReason,
    /// Number of affected days.
    pub days: u32,
    /// Pay received for the affected days.
    pub pay_rule: PayRule,
}

impl DisregardedPeriodEntry {
    /// Creates an entry with a fresh identifier.
    pub fn new(fields: DisregardedPeriodFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    /// Creates an entry with a known identifier.
    pub fn with_id(id: Uuid, fields: DisregardedPeriodFields) -> Self {
        Self {
            id,
            employee_id: fields.employee_id,
            month: fields.month,
            reason: fields.reason,
            days: fields.days,
            pay_rule: fields.pay_rule,
        }
    }

    /// True when this entry targets the given employee-month.
    pub fn targets(&self, employee_id: &str, month: &MonthKey) -> bool {
        self.employee_id == employee_id && &self.month == month
    }
}
