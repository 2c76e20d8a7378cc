//! In-memory storage for employees, period records and registry entries.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{DisregardedPeriodEntry, Employee, MonthKey, PeriodRecord};

/// The data the engine operates on.
///
/// Employees are keyed by id. Period records keep insertion order, with at
/// most one record per (employee, month). Registry entries keep insertion
/// order and are unique by id.
#[derive(Debug, Clone, Default)]
pub struct PayrollStore {
    employees: BTreeMap<String, Employee>,
    records: Vec<PeriodRecord>,
    entries: Vec<DisregardedPeriodEntry>,
}

impl PayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an employee by id.
    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.get(employee_id)
    }

    /// All employees ordered by id.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Adds an employee, rejecting duplicate ids.
    pub fn insert_employee(&mut self, employee: Employee) -> EngineResult<()> {
        if self.employees.contains_key(&employee.id) {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: format!("duplicate employee id '{}'", employee.id),
            });
        }
        self.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    /// All period records in insertion order.
    pub fn records(&self) -> &[PeriodRecord] {
        &self.records
    }

    /// The record for one employee-month.
    pub fn record(&self, employee_id: &str, month: &MonthKey) -> Option<&PeriodRecord> {
        self.records
            .iter()
            .find(|r| r.employee_id == employee_id && &r.month == month)
    }

    /// Adds a record, rejecting a second record for the same employee-month.
    pub fn insert_record(&mut self, record: PeriodRecord) -> EngineResult<()> {
        if self.record(&record.employee_id, &record.month).is_some() {
            return Err(EngineError::DuplicateRecord {
                employee_id: record.employee_id,
                month: record.month.to_string(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// The employee and mutable record for one employee-month, borrowed
    /// together so a record can be recomputed in place.
    pub fn employee_and_record_mut(
        &mut self,
        employee_id: &str,
        month: &MonthKey,
    ) -> (Option<&Employee>, Option<&mut PeriodRecord>) {
        let employee = self.employees.get(employee_id);
        let record = self
            .records
            .iter_mut()
            .find(|r| r.employee_id == employee_id && &r.month == month);
        (employee, record)
    }

    /// All registry entries in insertion order.
    pub fn entries(&self) -> &[DisregardedPeriodEntry] {
        &self.entries
    }

    /// Looks up a registry entry by id.
    pub fn entry(&self, entry_id: Uuid) -> Option<&DisregardedPeriodEntry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    /// The entry occupying an employee-month, if any.
    pub fn entry_for(&self, employee_id: &str, month: &MonthKey) -> Option<&DisregardedPeriodEntry> {
        self.entries.iter().find(|e| e.targets(employee_id, month))
    }

    pub(crate) fn push_entry(&mut self, entry: DisregardedPeriodEntry) {
        self.entries.push(entry);
    }

    /// Replaces an entry in place, keeping its position.
    pub(crate) fn replace_entry(&mut self, entry: DisregardedPeriodEntry) -> EngineResult<()> {
        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or(EngineError::EntryNotFound { entry_id: entry.id })?;
        *slot = entry;
        Ok(())
    }

    pub(crate) fn remove_entry(&mut self, entry_id: Uuid) -> EngineResult<DisregardedPeriodEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or(EngineError::EntryNotFound { entry_id })?;
        Ok(self.entries.remove(index))
    }
}
