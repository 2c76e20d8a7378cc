//! 713 average daily wage aggregation.
//!
//! The ADW is derived from the employee's most recent period records (twelve
//! by default). Pay and days belonging to disregarded periods are removed
//! from the numerator and denominator respectively.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::AdwRules;
use crate::models::{AdwPeriodDetail, AdwResult, AuditStep, PeriodRecord};

/// Computes the average daily wage for one employee.
///
/// `records` may contain any employee's records in any order; only those
/// belonging to `employee_id` are considered. The window is the
/// `rules.window_months` most recent months by month key.
///
/// When no valid days remain (no history, or every month in the window is
/// fully excluded) the ADW is zero. Totals are left unrounded; only the
/// final figure is rounded to `rules.display_decimal_places`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_adw;
/// use payroll_engine::config::AdwRules;
/// use rust_decimal::Decimal;
///
/// let result = compute_adw("EMP001", &[], &AdwRules::default());
/// assert_eq!(result.final_adw, Decimal::ZERO);
/// ```
pub fn compute_adw(employee_id: &str, records: &[PeriodRecord], rules: &AdwRules) -> AdwResult {
    let mut window: Vec<&PeriodRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee_id)
        .collect();
    window.sort_by(|a, b| b.month.cmp(&a.month));
    window.truncate(rules.window_months);

    let mut gross_total = Decimal::ZERO;
    let mut days_total: u64 = 0;
    let mut excluded_pay = Decimal::ZERO;
    let mut excluded_days: u64 = 0;
    let mut disregarded = Vec::new();
    let mut details = Vec::with_capacity(window.len());

    for record in &window {
        gross_total = gross_total.saturating_add(record.gross_pay);
        days_total += u64::from(record.total_days);

        let annotation = &record.annotation;
        if let Some(reason) = annotation.reason() {
            excluded_pay = excluded_pay.saturating_add(annotation.excluded_pay());
            excluded_days += u64::from(annotation.excluded_days());
            disregarded.push(format!("{} {}", record.month, reason.description()));
        }

        details.push(AdwPeriodDetail {
            month: record.month.clone(),
            gross_pay: record.gross_pay,
            days: record.total_days,
            excluded: annotation.is_disregarded(),
            excluded_days: annotation.excluded_days(),
            excluded_pay: annotation.excluded_pay(),
            reason: annotation.reason(),
        });
    }

    let valid_pay = gross_total - excluded_pay;
    let valid_days = i64::try_from(days_total).unwrap_or(i64::MAX)
        - i64::try_from(excluded_days).unwrap_or(i64::MAX);

    let final_adw = if valid_days > 0 {
        (valid_pay / Decimal::from(valid_days)).round_dp_with_strategy(
            rules.display_decimal_places,
            RoundingStrategy::MidpointAwayFromZero,
        )
    } else {
        Decimal::ZERO
    };

    debug!(
        employee_id,
        months = window.len(),
        valid_days,
        final_adw = %final_adw,
        "Computed average daily wage"
    );

    let mut reasoning = if valid_days > 0 {
        format!(
            "{} months: (${} - ${} excluded) / ({} - {} excluded days) = ${}",
            window.len(),
            gross_total.normalize(),
            excluded_pay.normalize(),
            days_total,
            excluded_days,
            final_adw
        )
    } else {
        format!(
            "{} months with no valid days remaining; ADW is $0",
            window.len()
        )
    };
    if !disregarded.is_empty() {
        reasoning.push_str(&format!("; disregarded: {}", disregarded.join(", ")));
    }

    let audit_step = AuditStep {
        rule_id: "adw_713".to_string(),
        rule_name: "713 Average Daily Wage".to_string(),
        statutory_ref: "Cap. 57 s.2(1) and Sched. 1A".to_string(),
        input: serde_json::json!({
            "employee_id": employee_id,
            "window_months": rules.window_months,
            "months_available": window.len()
        }),
        output: serde_json::json!({
            "gross_total": gross_total.normalize().to_string(),
            "days_total": days_total,
            "excluded_pay": excluded_pay.normalize().to_string(),
            "excluded_days": excluded_days,
            "final_adw": final_adw.to_string()
        }),
        reasoning,
    };

    AdwResult {
        employee_id: employee_id.to_string(),
        gross_total,
        days_total,
        excluded_pay,
        excluded_days,
        valid_pay,
        valid_days,
        final_adw,
        details,
        audit_step,
    }
}
