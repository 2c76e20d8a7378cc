//! Period record recomputation.
//!
//! [`recompute_record`] is the only function that writes a record's financial
//! fields. Generation, applying a disregarded period and reverting one all go
//! through it, so MPF contributions and net pay always follow gross pay.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::config::{MpfRates, StatutoryConfig};
use crate::models::{DisregardedPeriodEntry, Employee, MonthKey, PeriodAnnotation, PeriodRecord};

use super::mpf::compute_mpf;
use super::reallocation::{baseline_gross, reallocate_pay};

/// Rounds a currency amount to whole units, halves away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rebuilds a record's MPF and net-pay figures from a new gross pay.
///
/// Steps:
/// 1. MPF contributions for the employee's scheme over `record.total_days`
/// 2. Voluntary contribution at the employee's percentage of gross
/// 3. Gross, relevant income and the three contributions are rounded to
///    whole units; the annotation's excluded pay is rounded too
/// 4. Net pay = rounded gross - rounded employee mandatory - rounded voluntary
///
/// If `employee` is not the record's employee the record is returned
/// unchanged: a mismatched reference is stale data, not a fault.
pub fn recompute_record(
    record: &PeriodRecord,
    employee: &Employee,
    new_gross: Decimal,
    annotation: PeriodAnnotation,
    rates: &MpfRates,
) -> PeriodRecord {
    if employee.id != record.employee_id {
        warn!(
            record = %record.id(),
            employee_id = %employee.id,
            "Employee does not match record, leaving record unchanged"
        );
        return record.clone();
    }

    let mpf = compute_mpf(employee.mpf_scheme, new_gross, record.total_days, rates);
    let voluntary =
        new_gross * employee.voluntary_contribution_rate / Decimal::ONE_HUNDRED;

    let gross_pay = round_currency(new_gross);
    let employee_mandatory = round_currency(mpf.employee_mandatory);
    let employee_voluntary = round_currency(voluntary);
    let annotation = match annotation {
        PeriodAnnotation::Regular => PeriodAnnotation::Regular,
        PeriodAnnotation::Disregarded {
            reason,
            excluded_days,
            excluded_pay,
            entry_id,
        } => PeriodAnnotation::Disregarded {
            reason,
            excluded_days,
            excluded_pay: round_currency(excluded_pay),
            entry_id,
        },
    };

    let updated = PeriodRecord {
        employee_id: record.employee_id.clone(),
        month: record.month.clone(),
        gross_pay,
        total_days: record.total_days,
        mpf_relevant_income: gross_pay,
        mpf_employer_mandatory: round_currency(mpf.employer_mandatory),
        mpf_employee_mandatory: employee_mandatory,
        mpf_employee_voluntary: employee_voluntary,
        net_pay: gross_pay - employee_mandatory - employee_voluntary,
        annotation,
    };

    debug!(
        record = %updated.id(),
        gross_pay = %updated.gross_pay,
        net_pay = %updated.net_pay,
        disregarded = updated.is_disregarded(),
        "Recomputed period record"
    );

    updated
}

/// Creates the initial, undisregarded record for one employee-month.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::generate_period_record;
/// use payroll_engine::config::StatutoryConfig;
/// use payroll_engine::models::{Employee, MonthKey, MpfScheme, PayBasis};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "EMP002".to_string(),
///     name: "Wong Fiona".to_string(),
///     pay_basis: PayBasis::Monthly { monthly_salary: Decimal::from(18000) },
///     mpf_scheme: MpfScheme::MasterTrust,
///     voluntary_contribution_rate: Decimal::ZERO,
/// };
/// let month = MonthKey::parse("2025-06").unwrap();
/// let record = generate_period_record(&employee, month, 30, &StatutoryConfig::default());
/// assert_eq!(record.gross_pay, Decimal::from(18000));
/// assert_eq!(record.net_pay, Decimal::from(17100));
/// ```
pub fn generate_period_record(
    employee: &Employee,
    month: MonthKey,
    total_days: u32,
    config: &StatutoryConfig,
) -> PeriodRecord {
    let blank = PeriodRecord::blank(employee.id.clone(), month, total_days);
    let gross = baseline_gross(&employee.pay_basis, total_days);
    recompute_record(&blank, employee, gross, PeriodAnnotation::Regular, &config.mpf)
}

/// Applies a registry entry's effect to its target record.
///
/// Gross pay is reallocated around the entry's days and pay rule; the entry's
/// id is recorded on the annotation as a back-reference.
pub fn apply_disregarded_entry(
    record: &PeriodRecord,
    employee: &Employee,
    entry: &DisregardedPeriodEntry,
    config: &StatutoryConfig,
) -> PeriodRecord {
    let reallocation = reallocate_pay(
        &employee.pay_basis,
        record.total_days,
        entry.days,
        entry.pay_rule,
        &config.reallocation,
    );

    let annotation = PeriodAnnotation::Disregarded {
        reason: entry.reason,
        excluded_days: reallocation.affected_days,
        excluded_pay: reallocation.excluded_pay,
        entry_id: Some(entry.id),
    };

    recompute_record(
        record,
        employee,
        reallocation.gross_pay,
        annotation,
        &config.mpf,
    )
}

/// Restores a record to its undisregarded baseline and clears the annotation.
pub fn revert_to_baseline(
    record: &PeriodRecord,
    employee: &Employee,
    config: &StatutoryConfig,
) -> PeriodRecord {
    let gross = baseline_gross(&employee.pay_basis, record.total_days);
    recompute_record(record, employee, gross, PeriodAnnotation::Regular, &config.mpf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisregardedPeriodFields, DisregardedReason, MpfScheme, PayBasis, PayRule};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn month(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    fn monthly_employee(salary: &str, voluntary: &str) -> Employee {
        Employee {
            id: "EMP002".to_string(),
            name: "Wong Fiona".to_string(),
            pay_basis: PayBasis::Monthly {
                monthly_salary: dec(salary),
            },
            mpf_scheme: MpfScheme::MasterTrust,
            voluntary_contribution_rate: dec(voluntary),
        }
    }

    fn casual_employee(rate: &str) -> Employee {
        Employee {
            id: "EMP011".to_string(),
            name: "Lau Kevin".to_string(),
            pay_basis: PayBasis::Casual {
                daily_rate: dec(rate),
            },
            mpf_scheme: MpfScheme::IndustryScheme,
            voluntary_contribution_rate: Decimal::ZERO,
        }
    }

    fn entry(employee_id: &str, days: u32, pay_rule: PayRule) -> DisregardedPeriodEntry {
        DisregardedPeriodEntry::new(DisregardedPeriodFields {
            employee_id: employee_id.to_string(),
            month: month("2025-06"),
            reason: DisregardedReason::Sickness,
            days,
            pay_rule,
        })
    }

    fn assert_net_pay_invariant(record: &PeriodRecord) {
        let expected =
            record.gross_pay - record.mpf_employee_mandatory - record.mpf_employee_voluntary;
        assert_eq!(record.net_pay, expected);
    }

    #[test]
    fn test_round_currency_rounds_half_up() {
        assert_eq!(round_currency(dec("857.5")), dec("858"));
        assert_eq!(round_currency(dec("857.49")), dec("857"));
        assert_eq!(round_currency(dec("600")), dec("600"));
    }

    #[test]
    fn test_generate_monthly_record() {
        let employee = monthly_employee("18000", "0");
        let record =
            generate_period_record(&employee, month("2025-06"), 30, &StatutoryConfig::default());

        assert_eq!(record.gross_pay, dec("18000"));
        assert_eq!(record.mpf_relevant_income, dec("18000"));
        assert_eq!(record.mpf_employer_mandatory, dec("900"));
        assert_eq!(record.mpf_employee_mandatory, dec("900"));
        assert_eq!(record.mpf_employee_voluntary, Decimal::ZERO);
        assert_eq!(record.net_pay, dec("17100"));
        assert!(!record.is_disregarded());
    }

    #[test]
    fn test_generate_casual_record_uses_days_worked() {
        let employee = casual_employee("650");
        let record =
            generate_period_record(&employee, month("2025-11"), 20, &StatutoryConfig::default());

        assert_eq!(record.gross_pay, dec("13000"));
        // Daily average 650: 32.50 per day each side over 20 days
        assert_eq!(record.mpf_employer_mandatory, dec("650"));
        assert_eq!(record.mpf_employee_mandatory, dec("650"));
        assert_eq!(record.net_pay, dec("12350"));
    }

    #[test]
    fn test_voluntary_contribution_reduces_net_pay() {
        let employee = monthly_employee("20000", "5");
        let record =
            generate_period_record(&employee, month("2025-06"), 30, &StatutoryConfig::default());

        assert_eq!(record.mpf_employee_voluntary, dec("1000"));
        assert_eq!(record.net_pay, dec("18000"));
        assert_net_pay_invariant(&record);
    }

    #[test]
    fn test_net_pay_built_from_rounded_fields() {
        // 5% of 10009.9 is 500.495 for both deductions
        let employee = monthly_employee("10009.9", "5");
        let record =
            generate_period_record(&employee, month("2025-06"), 30, &StatutoryConfig::default());

        assert_eq!(record.gross_pay, dec("10010"));
        assert_eq!(record.mpf_employee_mandatory, dec("500"));
        assert_eq!(record.mpf_employee_voluntary, dec("500"));
        assert_eq!(record.net_pay, dec("9010"));
        assert_net_pay_invariant(&record);
    }

    #[test]
    fn test_apply_sickness_entry() {
        let config = StatutoryConfig::default();
        let employee = monthly_employee("18000", "0");
        let record = generate_period_record(&employee, month("2025-06"), 30, &config);
        let entry = entry("EMP002", 7, PayRule::FourFifths);

        let updated = apply_disregarded_entry(&record, &employee, &entry, &config);

        assert_eq!(updated.gross_pay, dec("17160"));
        assert_eq!(updated.mpf_relevant_income, dec("17160"));
        assert_eq!(updated.mpf_employee_mandatory, dec("858"));
        assert_eq!(updated.mpf_employer_mandatory, dec("858"));
        assert_eq!(updated.net_pay, dec("16302"));
        assert_eq!(updated.annotation.excluded_pay(), dec("3360"));
        assert_eq!(updated.annotation.excluded_days(), 7);
        assert_eq!(updated.annotation.entry_id(), Some(entry.id));
        assert_eq!(updated.annotation.reason(), Some(DisregardedReason::Sickness));
        assert_net_pay_invariant(&updated);
    }

    #[test]
    fn test_apply_clamps_excluded_days() {
        let config = StatutoryConfig::default();
        let employee = casual_employee("650");
        let record = generate_period_record(&employee, month("2025-06"), 20, &config);
        let entry = entry("EMP011", 45, PayRule::NoPay);

        let updated = apply_disregarded_entry(&record, &employee, &entry, &config);

        assert_eq!(updated.annotation.excluded_days(), 20);
        assert_eq!(updated.gross_pay, Decimal::ZERO);
        assert_eq!(updated.net_pay, Decimal::ZERO - updated.mpf_employee_mandatory);
    }

    #[test]
    fn test_revert_restores_baseline_and_clears_annotation() {
        let config = StatutoryConfig::default();
        let employee = monthly_employee("18000", "0");
        let original = generate_period_record(&employee, month("2025-06"), 30, &config);
        let applied = apply_disregarded_entry(
            &original,
            &employee,
            &entry("EMP002", 7, PayRule::FourFifths),
            &config,
        );

        let reverted = revert_to_baseline(&applied, &employee, &config);

        assert_eq!(reverted, original);
        assert_eq!(reverted.annotation, PeriodAnnotation::Regular);
    }

    #[test]
    fn test_mismatched_employee_leaves_record_unchanged() {
        let config = StatutoryConfig::default();
        let owner = monthly_employee("18000", "0");
        let record = generate_period_record(&owner, month("2025-06"), 30, &config);
        let stranger = casual_employee("650");

        let result = recompute_record(
            &record,
            &stranger,
            dec("1"),
            PeriodAnnotation::Regular,
            &config.mpf,
        );

        assert_eq!(result, record);
    }

    #[test]
    fn test_excluded_pay_is_rounded_on_write() {
        let config = StatutoryConfig::default();
        let employee = monthly_employee("18500", "0");
        let record = generate_period_record(&employee, month("2025-06"), 30, &config);

        let updated = apply_disregarded_entry(
            &record,
            &employee,
            &entry("EMP002", 7, PayRule::FourFifths),
            &config,
        );

        // 18500 / 30 x 7 x 0.8 = 3453.33...
        assert_eq!(updated.annotation.excluded_pay(), dec("3453"));
        // 23 x 616.67 + 3453.33 = 17636.67
        assert_eq!(updated.gross_pay, dec("17637"));
        assert_net_pay_invariant(&updated);
    }
}
