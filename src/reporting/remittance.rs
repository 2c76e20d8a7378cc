//! MPF remittance statements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{MonthKey, PeriodRecord};

/// One employee's line on a remittance statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemittanceLine {
    /// The employee.
    pub employee_id: String,
    /// MPF relevant income for the period.
    pub relevant_income: Decimal,
    /// Employer mandatory contribution.
    pub employer_mandatory: Decimal,
    /// Employee mandatory contribution.
    pub employee_mandatory: Decimal,
    /// Employee voluntary contribution.
    pub employee_voluntary: Decimal,
    /// Sum of the three contributions.
    pub total: Decimal,
}

impl RemittanceLine {
    fn from_record(record: &PeriodRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            relevant_income: record.mpf_relevant_income,
            employer_mandatory: record.mpf_employer_mandatory,
            employee_mandatory: record.mpf_employee_mandatory,
            employee_voluntary: record.mpf_employee_voluntary,
            total: record.total_mpf_contribution(),
        }
    }
}

/// Contributions payable to the MPF trustee for one contribution period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemittanceSummary {
    /// The contribution period.
    pub month: MonthKey,
    /// Per-employee lines, ordered by employee id.
    pub lines: Vec<RemittanceLine>,
    /// Total relevant income.
    pub total_relevant_income: Decimal,
    /// Total employer mandatory contributions.
    pub total_employer_mandatory: Decimal,
    /// Total employee mandatory contributions.
    pub total_employee_mandatory: Decimal,
    /// Total employee voluntary contributions.
    pub total_employee_voluntary: Decimal,
    /// Grand total payable.
    pub grand_total: Decimal,
}

/// Builds the remittance statement for `month` from every employee's record.
pub fn mpf_remittance(month: &MonthKey, records: &[PeriodRecord]) -> RemittanceSummary {
    let mut lines: Vec<RemittanceLine> = records
        .iter()
        .filter(|r| &r.month == month)
        .map(RemittanceLine::from_record)
        .collect();
    lines.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

    let sum = |f: fn(&RemittanceLine) -> Decimal| lines.iter().map(f).sum::<Decimal>();

    RemittanceSummary {
        month: month.clone(),
        total_relevant_income: sum(|l| l.relevant_income),
        total_employer_mandatory: sum(|l| l.employer_mandatory),
        total_employee_mandatory: sum(|l| l.employee_mandatory),
        total_employee_voluntary: sum(|l| l.employee_voluntary),
        grand_total: sum(|l| l.total),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::generate_period_record;
    use crate::config::StatutoryConfig;
    use crate::models::{Employee, MpfScheme, PayBasis};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn month(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    fn employee(id: &str, pay_basis: PayBasis, scheme: MpfScheme) -> Employee {
        Employee {
            id: id.to_string(),
            name: String::new(),
            pay_basis,
            mpf_scheme: scheme,
            voluntary_contribution_rate: Decimal::ZERO,
        }
    }

    #[test]
    fn test_remittance_totals_across_schemes() {
        let config = StatutoryConfig::default();
        let office = employee(
            "EMP002",
            PayBasis::Monthly {
                monthly_salary: dec("35000"),
            },
            MpfScheme::MasterTrust,
        );
        let kitchen = employee(
            "EMP001",
            PayBasis::Casual {
                daily_rate: dec("400"),
            },
            MpfScheme::IndustryScheme,
        );

        let records = vec![
            generate_period_record(&office, month("2025-06"), 30, &config),
            generate_period_record(&kitchen, month("2025-06"), 20, &config),
            generate_period_record(&office, month("2025-07"), 30, &config),
        ];

        let summary = mpf_remittance(&month("2025-06"), &records);

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].employee_id, "EMP001");
        // 400/day is in the 350 band: 20 per day each side
        assert_eq!(summary.lines[0].total, dec("800"));
        assert_eq!(summary.lines[1].total, dec("3000"));
        assert_eq!(summary.total_relevant_income, dec("43000"));
        assert_eq!(summary.total_employer_mandatory, dec("1900"));
        assert_eq!(summary.total_employee_mandatory, dec("1900"));
        assert_eq!(summary.grand_total, dec("3800"));
    }

    #[test]
    fn test_empty_month() {
        let summary = mpf_remittance(&month("2030-01"), &[]);
        assert!(summary.lines.is_empty());
        assert_eq!(summary.grand_total, Decimal::ZERO);
    }
}
