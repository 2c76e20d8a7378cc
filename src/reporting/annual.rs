//! Annual employer's return figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Employee, MonthKey, PeriodRecord};

/// One employee's totals over a span of months, as consumed by the IR56B
/// employer's return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// The employee.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// First month included.
    pub start: MonthKey,
    /// Last month included.
    pub end: MonthKey,
    /// Number of months with a record in the span.
    pub months: usize,
    /// Total gross pay ("total income").
    pub total_income: Decimal,
    /// Total MPF relevant income.
    pub mpf_relevant_income: Decimal,
    /// Total employer mandatory contributions.
    pub employer_mandatory: Decimal,
    /// Total employee mandatory contributions ("pension contributions").
    pub employee_mandatory: Decimal,
    /// Total employee voluntary contributions.
    pub employee_voluntary: Decimal,
    /// Total net pay.
    pub net_pay: Decimal,
    /// Months in the span carrying a disregarded annotation.
    pub disregarded_months: Vec<MonthKey>,
}

/// Sums one employee's records between `start` and `end` inclusive.
///
/// Records of other employees and months outside the span are ignored.
/// Figures are summed from already rounded record fields, so no further
/// rounding is applied.
pub fn summarize_employee_year(
    employee: &Employee,
    records: &[PeriodRecord],
    start: &MonthKey,
    end: &MonthKey,
) -> AnnualSummary {
    let mut summary = AnnualSummary {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        start: start.clone(),
        end: end.clone(),
        months: 0,
        total_income: Decimal::ZERO,
        mpf_relevant_income: Decimal::ZERO,
        employer_mandatory: Decimal::ZERO,
        employee_mandatory: Decimal::ZERO,
        employee_voluntary: Decimal::ZERO,
        net_pay: Decimal::ZERO,
        disregarded_months: Vec::new(),
    };

    let mut in_span: Vec<&PeriodRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee.id && &r.month >= start && &r.month <= end)
        .collect();
    in_span.sort_by(|a, b| a.month.cmp(&b.month));

    for record in in_span {
        summary.months += 1;
        summary.total_income += record.gross_pay;
        summary.mpf_relevant_income += record.mpf_relevant_income;
        summary.employer_mandatory += record.mpf_employer_mandatory;
        summary.employee_mandatory += record.mpf_employee_mandatory;
        summary.employee_voluntary += record.mpf_employee_voluntary;
        summary.net_pay += record.net_pay;
        if record.is_disregarded() {
            summary.disregarded_months.push(record.month.clone());
        }
    }

    debug!(
        employee_id = %employee.id,
        start = %start,
        end = %end,
        months = summary.months,
        "Summarized employee year"
    );

    summary
}
