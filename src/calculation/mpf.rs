//! MPF mandatory contribution calculation.
//!
//! This module computes employer and employee mandatory contributions for
//! the two schemes the engine supports:
//!
//! - **Master Trust**: 5% of monthly relevant income, with no employee
//!   contribution below the minimum relevant income and a fixed cap above the
//!   maximum relevant income.
//! - **Industry Scheme**: fixed or capped-percentage daily amounts chosen by
//!   the period's average daily income, multiplied by the period length.
//!
//! Amounts are returned unrounded; the recompute step rounds them.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::{IndustryBand, MpfRates};
use crate::models::{AuditStep, MpfScheme};

/// The period length assumed when the caller does not supply one.
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

/// The result of an MPF contribution calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MpfContributionResult {
    /// The scheme the contributions were computed under.
    pub scheme: MpfScheme,
    /// The relevant income the rules were applied to.
    pub relevant_income: Decimal,
    /// The period length in days.
    pub period_days: u32,
    /// Employer mandatory contribution for the period.
    pub employer_mandatory: Decimal,
    /// Employee mandatory contribution for the period.
    pub employee_mandatory: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes MPF mandatory contributions for one period.
///
/// # Arguments
///
/// * `scheme` - The employee's MPF scheme
/// * `gross_pay` - Gross pay (relevant income) for the period
/// * `period_days` - Period length in days; only the Industry Scheme uses it
/// * `rates` - MPF limits and Industry Scheme bands
///
/// Negative income is treated as zero so that both contributions are always
/// non-negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_mpf;
/// use payroll_engine::config::MpfRates;
/// use payroll_engine::models::MpfScheme;
/// use rust_decimal::Decimal;
///
/// let rates = MpfRates::default();
/// let result = compute_mpf(MpfScheme::MasterTrust, Decimal::from(18000), 30, &rates);
/// assert_eq!(result.employer_mandatory, Decimal::from(900));
/// assert_eq!(result.employee_mandatory, Decimal::from(900));
/// ```
pub fn compute_mpf(
    scheme: MpfScheme,
    gross_pay: Decimal,
    period_days: u32,
    rates: &MpfRates,
) -> MpfContributionResult {
    let relevant_income = gross_pay.max(Decimal::ZERO);

    let result = match scheme {
        MpfScheme::MasterTrust => master_trust(relevant_income, period_days, rates),
        MpfScheme::IndustryScheme => industry_scheme(relevant_income, period_days, rates),
    };

    debug!(
        scheme = scheme.label(),
        relevant_income = %relevant_income,
        period_days,
        employer_mandatory = %result.employer_mandatory,
        employee_mandatory = %result.employee_mandatory,
        "Computed MPF contributions"
    );

    result
}

fn master_trust(income: Decimal, period_days: u32, rates: &MpfRates) -> MpfContributionResult {
    let rate = rates.contribution_rate;
    let percent = rate * Decimal::ONE_HUNDRED;

    let (employer, employee, band, reasoning) = if income > rates.max_relevant_income {
        let cap = rates.max_mandatory_contribution;
        (
            cap,
            cap,
            "above_maximum",
            format!(
                "${} exceeds maximum relevant income ${}: both sides capped at ${}",
                income.normalize(),
                rates.max_relevant_income.normalize(),
                cap.normalize()
            ),
        )
    } else if income < rates.min_relevant_income {
        let employer = income * rate;
        (
            employer,
            Decimal::ZERO,
            "below_minimum",
            format!(
                "${} below minimum relevant income ${}: employee exempt, employer ${} x {}% = ${}",
                income.normalize(),
                rates.min_relevant_income.normalize(),
                income.normalize(),
                percent.normalize(),
                employer.normalize()
            ),
        )
    } else {
        let amount = income * rate;
        (
            amount,
            amount,
            "standard",
            format!(
                "${} x {}% = ${} for each side",
                income.normalize(),
                percent.normalize(),
                amount.normalize()
            ),
        )
    };

    let audit_step = AuditStep {
        rule_id: "mpf_master_trust".to_string(),
        rule_name: "MPF Master Trust Contribution".to_string(),
        statutory_ref: "Cap. 485 Sch. 2 & 3".to_string(),
        input: serde_json::json!({
            "relevant_income": income.normalize().to_string(),
            "min_relevant_income": rates.min_relevant_income.normalize().to_string(),
            "max_relevant_income": rates.max_relevant_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "band": band,
            "employer_mandatory": employer.normalize().to_string(),
            "employee_mandatory": employee.normalize().to_string()
        }),
        reasoning,
    };

    MpfContributionResult {
        scheme: MpfScheme::MasterTrust,
        relevant_income: income,
        period_days,
        employer_mandatory: employer,
        employee_mandatory: employee,
        audit_step,
    }
}

fn industry_scheme(income: Decimal, period_days: u32, rates: &MpfRates) -> MpfContributionResult {
    // A zero-day period divides by one; the contributions themselves still
    // scale by the real length and come out as zero.
    let divisor = Decimal::from(period_days.max(1));
    let daily_average = income / divisor;
    let days = Decimal::from(period_days);

    let band = band_for(&rates.industry_bands, daily_average);
    let (employer_daily, employee_daily, lower_bound) = match band {
        Some(band) => (
            band.employer.daily_amount(daily_average),
            band.employee.daily_amount(daily_average),
            band.lower_bound,
        ),
        None => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
    };

    let employer = employer_daily * days;
    let employee = employee_daily * days;

    let audit_step = AuditStep {
        rule_id: "mpf_industry_scheme".to_string(),
        rule_name: "MPF Industry Scheme Daily Contribution".to_string(),
        statutory_ref: "MPF Industry Scheme contribution table".to_string(),
        input: serde_json::json!({
            "relevant_income": income.normalize().to_string(),
            "period_days": period_days,
            "daily_average": daily_average.round_dp(2).normalize().to_string()
        }),
        output: serde_json::json!({
            "band_lower_bound": lower_bound.normalize().to_string(),
            "employer_daily": employer_daily.normalize().to_string(),
            "employee_daily": employee_daily.normalize().to_string(),
            "employer_mandatory": employer.normalize().to_string(),
            "employee_mandatory": employee.normalize().to_string()
        }),
        reasoning: format!(
            "Daily average ${} falls in band from ${}: employer ${} x {} days = ${}, employee ${} x {} days = ${}",
            daily_average.round_dp(2).normalize(),
            lower_bound.normalize(),
            employer_daily.normalize(),
            period_days,
            employer.normalize(),
            employee_daily.normalize(),
            period_days,
            employee.normalize()
        ),
    };

    MpfContributionResult {
        scheme: MpfScheme::IndustryScheme,
        relevant_income: income,
        period_days,
        employer_mandatory: employer,
        employee_mandatory: employee,
        audit_step,
    }
}

/// Finds the band whose inclusive lower bound is the highest one not above
/// `daily_average`. Bands are sorted ascending by configuration validation.
fn band_for(bands: &[IndustryBand], daily_average: Decimal) -> Option<&IndustryBand> {
    bands
        .iter()
        .rfind(|band| band.lower_bound <= daily_average)
        .or_else(|| bands.first())
}
