//! The payroll engine: a store plus the statutory configuration, with the
//! disregarded-period registry operations that drive recomputation.

use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    apply_disregarded_entry, compute_adw, generate_period_record, revert_to_baseline,
};
use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdwResult, DisregardedPeriodEntry, DisregardedPeriodFields, Employee, MonthKey, PeriodRecord,
    check_period_days,
};
use crate::reporting::{AnnualSummary, RemittanceSummary, mpf_remittance, summarize_employee_year};

use super::PayrollStore;

/// Owns the payroll data and keeps period records consistent with the
/// disregarded-period registry.
///
/// Every registry operation validates first and mutates second, so a call
/// that returns an error leaves the store exactly as it was.
///
/// # Example
///
/// ```
/// use payroll_engine::config::StatutoryConfig;
/// use payroll_engine::models::{
///     DisregardedPeriodFields, DisregardedReason, Employee, MonthKey, MpfScheme, PayBasis, PayRule,
/// };
/// use payroll_engine::store::PayrollEngine;
/// use rust_decimal::Decimal;
///
/// let mut engine = PayrollEngine::new(StatutoryConfig::default());
/// engine.add_employee(Employee {
///     id: "EMP002".to_string(),
///     name: "Wong Fiona".to_string(),
///     pay_basis: PayBasis::Monthly { monthly_salary: Decimal::from(18000) },
///     mpf_scheme: MpfScheme::MasterTrust,
///     voluntary_contribution_rate: Decimal::ZERO,
/// })?;
/// let june = MonthKey::parse("2025-06")?;
/// engine.insert_record("EMP002", june.clone(), 30)?;
///
/// engine.add_disregarded(DisregardedPeriodFields {
///     employee_id: "EMP002".to_string(),
///     month: june.clone(),
///     reason: DisregardedReason::Sickness,
///     days: 7,
///     pay_rule: PayRule::FourFifths,
/// })?;
///
/// let record = engine.store().record("EMP002", &june).unwrap();
/// assert_eq!(record.gross_pay, Decimal::from(17160));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PayrollEngine {
    config: StatutoryConfig,
    store: PayrollStore,
}

impl PayrollEngine {
    /// Creates an engine with an empty store.
    pub fn new(config: StatutoryConfig) -> Self {
        Self::with_store(config, PayrollStore::new())
    }

    /// Creates an engine over an existing store.
    pub fn with_store(config: StatutoryConfig, store: PayrollStore) -> Self {
        Self { config, store }
    }

    /// The statutory configuration in use.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &PayrollStore {
        &self.store
    }

    /// Registers an employee after validating it.
    pub fn add_employee(&mut self, employee: Employee) -> EngineResult<()> {
        employee.validate()?;
        let employee_id = employee.id.clone();
        self.store.insert_employee(employee)?;
        info!(employee_id = %employee_id, "Employee added");
        Ok(())
    }

    /// Looks up an employee, failing if unknown.
    pub fn employee(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.store
            .employee(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Generates and stores the baseline record for one employee-month.
    ///
    /// If the registry already holds an entry for that employee-month, its
    /// effect is applied to the new record.
    pub fn insert_record(
        &mut self,
        employee_id: &str,
        month: MonthKey,
        total_days: u32,
    ) -> EngineResult<&PeriodRecord> {
        check_period_days("total_days", total_days)?;
        let employee = self.employee(employee_id)?;
        let mut record = generate_period_record(employee, month.clone(), total_days, &self.config);

        if let Some(entry) = self.store.entry_for(employee_id, &month) {
            record = apply_disregarded_entry(&record, employee, entry, &self.config);
        }

        self.store.insert_record(record)?;
        self.store
            .record(employee_id, &month)
            .ok_or_else(|| EngineError::DuplicateRecord {
                employee_id: employee_id.to_string(),
                month: month.to_string(),
            })
    }

    /// All period records.
    pub fn records(&self) -> &[PeriodRecord] {
        self.store.records()
    }

    /// One employee's records, oldest month first.
    pub fn records_for(&self, employee_id: &str) -> Vec<&PeriodRecord> {
        let mut records: Vec<&PeriodRecord> = self
            .store
            .records()
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .collect();
        records.sort_by(|a, b| a.month.cmp(&b.month));
        records
    }

    /// All registry entries in insertion order.
    pub fn entries(&self) -> &[DisregardedPeriodEntry] {
        self.store.entries()
    }

    /// Derives the employee's current average daily wage.
    pub fn compute_adw(&self, employee_id: &str) -> EngineResult<AdwResult> {
        self.employee(employee_id)?;
        Ok(compute_adw(employee_id, self.store.records(), &self.config.adw))
    }

    /// Totals one employee's records over a span (the reporting year when
    /// `start` or `end` is omitted).
    pub fn annual_summary(
        &self,
        employee_id: &str,
        start: Option<MonthKey>,
        end: Option<MonthKey>,
    ) -> EngineResult<AnnualSummary> {
        let employee = self.employee(employee_id)?;
        let start = start.unwrap_or_else(|| self.config.reporting.year_start.clone());
        let end = end.unwrap_or_else(|| self.config.reporting.year_end.clone());
        Ok(summarize_employee_year(employee, self.store.records(), &start, &end))
    }

    /// The MPF remittance statement for one month.
    pub fn remittance(&self, month: &MonthKey) -> RemittanceSummary {
        mpf_remittance(month, self.store.records())
    }

    /// Adds a disregarded-period entry and applies it to its record.
    ///
    /// Fails with `DuplicateDisregardedEntry` if the employee-month already
    /// has an entry. An unknown employee or missing record does not fail: the
    /// entry is kept and no record changes.
    pub fn add_disregarded(
        &mut self,
        fields: DisregardedPeriodFields,
    ) -> EngineResult<DisregardedPeriodEntry> {
        self.ensure_slot_free(&fields.employee_id, &fields.month, None)?;

        let entry = DisregardedPeriodEntry::new(fields);
        self.store.push_entry(entry.clone());
        self.apply_entry(&entry);

        info!(
            entry_id = %entry.id,
            employee_id = %entry.employee_id,
            month = %entry.month,
            days = entry.days,
            pay_rule = entry.pay_rule.label(),
            "Disregarded period added"
        );
        Ok(entry)
    }

    /// Replaces an entry's fields and moves its effect accordingly.
    ///
    /// The record previously carrying the entry is reverted to baseline, then
    /// the new fields are applied to the record at the updated employee-month.
    pub fn edit_disregarded(
        &mut self,
        entry_id: Uuid,
        fields: DisregardedPeriodFields,
    ) -> EngineResult<DisregardedPeriodEntry> {
        let previous = self
            .store
            .entry(entry_id)
            .cloned()
            .ok_or(EngineError::EntryNotFound { entry_id })?;
        self.ensure_slot_free(&fields.employee_id, &fields.month, Some(entry_id))?;

        let updated = DisregardedPeriodEntry::with_id(entry_id, fields);
        self.store.replace_entry(updated.clone())?;
        self.revert_entry(&previous);
        self.apply_entry(&updated);

        info!(
            entry_id = %entry_id,
            from_employee = %previous.employee_id,
            from_month = %previous.month,
            employee_id = %updated.employee_id,
            month = %updated.month,
            "Disregarded period edited"
        );
        Ok(updated)
    }

    /// Removes an entry and reverts the record it was applied to.
    pub fn delete_disregarded(&mut self, entry_id: Uuid) -> EngineResult<DisregardedPeriodEntry> {
        let removed = self.store.remove_entry(entry_id)?;
        self.revert_entry(&removed);

        info!(
            entry_id = %entry_id,
            employee_id = %removed.employee_id,
            month = %removed.month,
            "Disregarded period deleted"
        );
        Ok(removed)
    }

    fn ensure_slot_free(
        &self,
        employee_id: &str,
        month: &MonthKey,
        editing: Option<Uuid>,
    ) -> EngineResult<()> {
        match self.store.entry_for(employee_id, month) {
            Some(existing) if Some(existing.id) != editing => {
                Err(EngineError::DuplicateDisregardedEntry {
                    employee_id: employee_id.to_string(),
                    month: month.to_string(),
                    existing: existing.id,
                })
            }
            _ => Ok(()),
        }
    }

    fn apply_entry(&mut self, entry: &DisregardedPeriodEntry) {
        let config = &self.config;
        match self
            .store
            .employee_and_record_mut(&entry.employee_id, &entry.month)
        {
            (Some(employee), Some(record)) => {
                *record = apply_disregarded_entry(record, employee, entry, config);
            }
            (None, _) => warn!(
                entry_id = %entry.id,
                employee_id = %entry.employee_id,
                "Employee not found, disregarded period kept without effect"
            ),
            (_, None) => warn!(
                entry_id = %entry.id,
                employee_id = %entry.employee_id,
                month = %entry.month,
                "No period record for month, disregarded period kept without effect"
            ),
        }
    }

    fn revert_entry(&mut self, entry: &DisregardedPeriodEntry) {
        let config = &self.config;
        let (employee, record) = self
            .store
            .employee_and_record_mut(&entry.employee_id, &entry.month);

        let (Some(employee), Some(record)) = (employee, record) else {
            warn!(
                entry_id = %entry.id,
                employee_id = %entry.employee_id,
                month = %entry.month,
                "Nothing to revert for disregarded period"
            );
            return;
        };

        if record.annotation.entry_id() == Some(entry.id) {
            *record = revert_to_baseline(record, employee, config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisregardedReason, MpfScheme, PayBasis, PayRule, PeriodAnnotation};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn month(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    fn create_test_engine() -> PayrollEngine {
        let mut engine = PayrollEngine::new(StatutoryConfig::default());
        engine
            .add_employee(Employee {
                id: "EMP002".to_string(),
                name: "Wong Fiona".to_string(),
                pay_basis: PayBasis::Monthly {
                    monthly_salary: dec("18000"),
                },
                mpf_scheme: MpfScheme::MasterTrust,
                voluntary_contribution_rate: Decimal::ZERO,
            })
            .unwrap();
        for m in ["2025-05", "2025-06", "2025-07"] {
            engine.insert_record("EMP002", month(m), 30).unwrap();
        }
        engine
    }

    fn sickness(m: &str, days: u32) -> DisregardedPeriodFields {
        DisregardedPeriodFields {
            employee_id: "EMP002".to_string(),
            month: month(m),
            reason: DisregardedReason::Sickness,
            days,
            pay_rule: PayRule::FourFifths,
        }
    }

    fn gross(engine: &PayrollEngine, m: &str) -> Decimal {
        engine.store().record("EMP002", &month(m)).unwrap().gross_pay
    }

    #[test]
    fn test_add_applies_to_record() {
        let mut engine = create_test_engine();
        let entry = engine.add_disregarded(sickness("2025-06", 7)).unwrap();

        let record = engine.store().record("EMP002", &month("2025-06")).unwrap();
        assert_eq!(record.gross_pay, dec("17160"));
        assert_eq!(record.net_pay, dec("16302"));
        assert_eq!(record.annotation.entry_id(), Some(entry.id));
        assert_eq!(gross(&engine, "2025-05"), dec("18000"));
    }

    #[test]
    fn test_add_duplicate_slot_rejected_without_mutation() {
        let mut engine = create_test_engine();
        let first = engine.add_disregarded(sickness("2025-06", 7)).unwrap();
        let before = engine.records().to_vec();

        let result = engine.add_disregarded(sickness("2025-06", 3));

        match result {
            Err(EngineError::DuplicateDisregardedEntry { existing, .. }) => {
                assert_eq!(existing, first.id)
            }
            other => panic!("Expected DuplicateDisregardedEntry, got {:?}", other),
        }
        assert_eq!(engine.entries().len(), 1);
        assert_eq!(engine.records(), before.as_slice());
    }

    #[test]
    fn test_edit_moves_effect_to_new_month() {
        let mut engine = create_test_engine();
        let entry = engine.add_disregarded(sickness("2025-06", 7)).unwrap();

        engine
            .edit_disregarded(entry.id, sickness("2025-07", 7))
            .unwrap();

        assert_eq!(gross(&engine, "2025-06"), dec("18000"));
        assert!(!engine.store().record("EMP002", &month("2025-06")).unwrap().is_disregarded());
        assert_eq!(gross(&engine, "2025-07"), dec("17160"));
        assert_eq!(engine.entries()[0].month, month("2025-07"));
    }

    #[test]
    fn test_edit_in_place_changes_days() {
        let mut engine = create_test_engine();
        let entry = engine.add_disregarded(sickness("2025-06", 7)).unwrap();

        engine
            .edit_disregarded(entry.id, sickness("2025-06", 10))
            .unwrap();

        // 20 x 600 + 10 x 600 x 0.8
        assert_eq!(gross(&engine, "2025-06"), dec("16800"));
        assert_eq!(
            engine
                .store()
                .record("EMP002", &month("2025-06"))
                .unwrap()
                .annotation
                .excluded_days(),
            10
        );
    }

    #[test]
    fn test_edit_onto_occupied_slot_rejected() {
        let mut engine = create_test_engine();
        let june = engine.add_disregarded(sickness("2025-06", 7)).unwrap();
        engine.add_disregarded(sickness("2025-07", 2)).unwrap();

        let result = engine.edit_disregarded(june.id, sickness("2025-07", 7));

        assert!(matches!(
            result,
            Err(EngineError::DuplicateDisregardedEntry { .. })
        ));
        assert_eq!(gross(&engine, "2025-06"), dec("17160"));
    }

    #[test]
    fn test_edit_unknown_entry() {
        let mut engine = create_test_engine();
        let result = engine.edit_disregarded(Uuid::new_v4(), sickness("2025-06", 1));
        assert!(matches!(result, Err(EngineError::EntryNotFound { .. })));
    }

    #[test]
    fn test_delete_reverts_to_baseline() {
        let mut engine = create_test_engine();
        let baseline = engine.records().to_vec();
        let entry = engine.add_disregarded(sickness("2025-06", 7)).unwrap();

        let removed = engine.delete_disregarded(entry.id).unwrap();

        assert_eq!(removed.id, entry.id);
        assert!(engine.entries().is_empty());
        assert_eq!(engine.records(), baseline.as_slice());
    }

    #[test]
    fn test_delete_unknown_entry() {
        let mut engine = create_test_engine();
        let missing = Uuid::new_v4();
        match engine.delete_disregarded(missing) {
            Err(EngineError::EntryNotFound { entry_id }) => assert_eq!(entry_id, missing),
            other => panic!("Expected EntryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_employee_entry_kept_without_effect() {
        let mut engine = create_test_engine();
        let before = engine.records().to_vec();

        let mut fields = sickness("2025-06", 7);
        fields.employee_id = "EMP404".to_string();
        let entry = engine.add_disregarded(fields).unwrap();

        assert_eq!(engine.entries().len(), 1);
        assert_eq!(engine.records(), before.as_slice());

        engine.delete_disregarded(entry.id).unwrap();
        assert_eq!(engine.records(), before.as_slice());
    }

    #[test]
    fn test_entry_applied_when_record_arrives_later() {
        let mut engine = create_test_engine();
        engine.add_disregarded(sickness("2025-08", 7)).unwrap();

        let record = engine.insert_record("EMP002", month("2025-08"), 30).unwrap();
        assert_eq!(record.gross_pay, dec("17160"));
    }

    #[test]
    fn test_compute_adw_reflects_registry() {
        let mut engine = create_test_engine();
        let plain = engine.compute_adw("EMP002").unwrap();
        assert_eq!(plain.final_adw, dec("600"));

        engine.add_disregarded(sickness("2025-06", 7)).unwrap();
        let adjusted = engine.compute_adw("EMP002").unwrap();

        // (53160 - 3360) / (90 - 7): the sick days no longer drag the average
        assert_eq!(adjusted.gross_total, dec("53160"));
        assert_eq!(adjusted.valid_pay, dec("49800"));
        assert_eq!(adjusted.valid_days, 83);
        assert_eq!(adjusted.final_adw, dec("600"));
    }

    #[test]
    fn test_compute_adw_unknown_employee() {
        let engine = create_test_engine();
        assert!(matches!(
            engine.compute_adw("EMP404"),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_insert_record_unknown_employee() {
        let mut engine = create_test_engine();
        assert!(matches!(
            engine.insert_record("EMP404", month("2025-06"), 30),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_insert_record_rejects_overlong_period() {
        let mut engine = create_test_engine();
        let before = engine.records().to_vec();

        assert!(matches!(
            engine.insert_record("EMP002", month("2025-08"), u32::MAX),
            Err(EngineError::InvalidPeriod { .. })
        ));
        assert_eq!(engine.records(), before.as_slice());
    }

    #[test]
    fn test_add_employee_rejects_bad_voluntary_rate() {
        let mut engine = PayrollEngine::new(StatutoryConfig::default());
        let result = engine.add_employee(Employee {
            id: "EMP009".to_string(),
            name: String::new(),
            pay_basis: PayBasis::Casual {
                daily_rate: dec("500"),
            },
            mpf_scheme: MpfScheme::IndustryScheme,
            voluntary_contribution_rate: dec("150"),
        });
        assert!(matches!(result, Err(EngineError::InvalidEmployee { .. })));
        assert!(engine.employee("EMP009").is_err());
    }

    #[test]
    fn test_records_for_sorted_by_month() {
        let mut engine = create_test_engine();
        engine.insert_record("EMP002", month("2025-01"), 30).unwrap();

        let months: Vec<&str> = engine
            .records_for("EMP002")
            .iter()
            .map(|r| r.month.as_str())
            .collect();
        assert_eq!(months, vec!["2025-01", "2025-05", "2025-06", "2025-07"]);
    }

    #[test]
    fn test_annual_summary_defaults_to_reporting_year() {
        let engine = create_test_engine();
        let summary = engine.annual_summary("EMP002", None, None).unwrap();
        assert_eq!(summary.start, month("2024-12"));
        assert_eq!(summary.end, month("2025-11"));
        assert_eq!(summary.months, 3);
    }

    #[test]
    fn test_stale_annotation_not_reverted_by_other_entry() {
        let mut engine = create_test_engine();
        let entry = engine.add_disregarded(sickness("2025-06", 7)).unwrap();

        // A foreign entry with the same slot but a different id must not revert.
        let foreign = DisregardedPeriodEntry::with_id(Uuid::new_v4(), sickness("2025-06", 7));
        engine.revert_entry(&foreign);

        let record = engine.store().record("EMP002", &month("2025-06")).unwrap();
        assert_eq!(record.annotation.entry_id(), Some(entry.id));
        assert!(matches!(record.annotation, PeriodAnnotation::Disregarded { .. }));
    }
}
