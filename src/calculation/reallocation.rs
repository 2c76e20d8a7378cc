//! Proportional pay reallocation for disregarded days.
//!
//! When part of a month is disregarded, the month's gross pay is rebuilt
//! from a daily rate: the normal days at the full rate plus the affected days
//! at the pay rule's fraction. The pay attributable to the affected days is
//! reported separately so the ADW calculation can exclude it.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::ReallocationRules;
use crate::models::{AuditStep, PayBasis, PayRule};

/// The result of reallocating a period's pay around disregarded days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReallocationResult {
    /// The daily rate used.
    pub daily_rate: Decimal,
    /// Qualifying days in the period.
    pub total_days: u32,
    /// Disregarded days after clamping to `total_days`.
    pub affected_days: u32,
    /// Days paid at the normal rate.
    pub normal_days: u32,
    /// Pay for the normal days.
    pub normal_pay: Decimal,
    /// Pay for the affected days under the pay rule.
    pub period_pay: Decimal,
    /// Recomputed gross pay, `normal_pay + period_pay`.
    pub gross_pay: Decimal,
    /// Pay excluded from the ADW numerator; always equal to `period_pay`.
    pub excluded_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Recomputes gross pay for a period containing disregarded days.
///
/// The disregarded-day count is clamped to the period length, so normal days
/// are never negative. The excluded pay equals the pay for the affected days
/// under every pay rule, including full pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::reallocate_pay;
/// use payroll_engine::config::ReallocationRules;
/// use payroll_engine::models::{PayBasis, PayRule};
/// use rust_decimal::Decimal;
///
/// let basis = PayBasis::Monthly { monthly_salary: Decimal::from(18000) };
/// let result = reallocate_pay(&basis, 30, 7, PayRule::FourFifths, &ReallocationRules::default());
/// assert_eq!(result.gross_pay, Decimal::from(17160));
/// assert_eq!(result.excluded_pay, Decimal::from(3360));
/// ```
pub fn reallocate_pay(
    pay_basis: &PayBasis,
    total_days: u32,
    disregarded_days: u32,
    pay_rule: PayRule,
    rules: &ReallocationRules,
) -> ReallocationResult {
    let daily_rate = pay_basis.daily_rate(rules.standard_month_days);
    let affected_days = disregarded_days.min(total_days);
    let normal_days = total_days - affected_days;

    // Unbounded rates saturate at Decimal::MAX.
    let normal_pay = Decimal::from(normal_days).saturating_mul(daily_rate);
    let factor = pay_rule.factor(rules.four_fifths_factor);
    let period_pay = Decimal::from(affected_days)
        .saturating_mul(daily_rate)
        .saturating_mul(factor);
    let gross_pay = normal_pay.saturating_add(period_pay);

    if disregarded_days > total_days {
        debug!(
            disregarded_days,
            total_days, "Disregarded days exceed period length, clamped"
        );
    }

    let audit_step = AuditStep {
        rule_id: "disregarded_reallocation".to_string(),
        rule_name: "Disregarded Period Pay Reallocation".to_string(),
        statutory_ref: "Cap. 57 s.2(1) (average daily wages)".to_string(),
        input: serde_json::json!({
            "pay_basis": pay_basis.label(),
            "daily_rate": daily_rate.round_dp(2).normalize().to_string(),
            "total_days": total_days,
            "disregarded_days": disregarded_days,
            "pay_rule": pay_rule.label()
        }),
        output: serde_json::json!({
            "affected_days": affected_days,
            "normal_pay": normal_pay.round_dp(2).normalize().to_string(),
            "period_pay": period_pay.round_dp(2).normalize().to_string(),
            "gross_pay": gross_pay.round_dp(2).normalize().to_string(),
            "excluded_pay": period_pay.round_dp(2).normalize().to_string()
        }),
        reasoning: format!(
            "{} normal days x ${} = ${}; {} disregarded days x ${} x {} = ${}; gross ${}",
            normal_days,
            daily_rate.round_dp(2).normalize(),
            normal_pay.round_dp(2).normalize(),
            affected_days,
            daily_rate.round_dp(2).normalize(),
            factor.normalize(),
            period_pay.round_dp(2).normalize(),
            gross_pay.round_dp(2).normalize()
        ),
    };

    ReallocationResult {
        daily_rate,
        total_days,
        affected_days,
        normal_days,
        normal_pay,
        period_pay,
        gross_pay,
        excluded_pay: period_pay,
        audit_step,
    }
}

/// Gross pay for a period with nothing disregarded.
///
/// Monthly employees receive their salary; casual employees receive
/// `total_days` at their daily rate.
pub fn baseline_gross(pay_basis: &PayBasis, total_days: u32) -> Decimal {
    match *pay_basis {
        PayBasis::Monthly { monthly_salary } => monthly_salary,
        PayBasis::Casual { daily_rate } => Decimal::from(total_days).saturating_mul(daily_rate),
    }
}
