//! Average daily wage projection.
//!
//! [`AdwResult`] is derived on demand from the current period records and is
//! never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, DisregardedReason, MonthKey};

/// One month's contribution to an ADW calculation, for audit display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdwPeriodDetail {
    /// The month.
    pub month: MonthKey,
    /// Gross pay recorded for the month.
    pub gross_pay: Decimal,
    /// Qualifying days recorded for the month.
    pub days: u32,
    /// Whether the month carries a disregarded annotation.
    pub excluded: bool,
    /// Days removed from the denominator.
    pub excluded_days: u32,
    /// Pay removed from the numerator.
    pub excluded_pay: Decimal,
    /// The disregarded reason, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DisregardedReason>,
}

/// The 713 average daily wage for one employee over the trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdwResult {
    /// The employee the figure is for.
    pub employee_id: String,
    /// Sum of gross pay over the window.
    pub gross_total: Decimal,
    /// Sum of qualifying days over the window.
    pub days_total: u64,
    /// Sum of excluded pay over disregarded months.
    pub excluded_pay: Decimal,
    /// Sum of excluded days over disregarded months.
    pub excluded_days: u64,
    /// `gross_total - excluded_pay`.
    pub valid_pay: Decimal,
    /// `days_total - excluded_days` (may be zero or negative for degenerate data).
    pub valid_days: i64,
    /// The average daily wage, rounded for display; zero when no valid days remain.
    pub final_adw: Decimal,
    /// Per-month breakdown, most recent first.
    pub details: Vec<AdwPeriodDetail>,
    /// How the figure was derived.
    pub audit_step: AuditStep,
}
