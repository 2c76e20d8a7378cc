//! Deterministic seed data loaded from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{StatutoryConfig, load_yaml};
use crate::error::{EngineError, EngineResult};
use crate::models::{DisregardedPeriodFields, Employee, MonthKey, PayBasis};

use super::PayrollEngine;

/// One period to generate for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPeriod {
    /// The employee.
    pub employee_id: String,
    /// The month.
    pub month: MonthKey,
    /// Qualifying days. Monthly-paid employees default to the standard month
    /// length; casual employees must state the days worked.
    #[serde(default)]
    pub total_days: Option<u32>,
}

/// A complete seed: employees, the periods to generate and the registry
/// entries to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// Employees to register.
    pub employees: Vec<Employee>,
    /// Periods to generate, in order.
    #[serde(default)]
    pub periods: Vec<SeedPeriod>,
    /// Disregarded periods to add after generation.
    #[serde(default)]
    pub disregarded: Vec<DisregardedPeriodFields>,
}

impl SeedData {
    /// Reads a seed file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        load_yaml(path.as_ref())
    }

    /// Builds an engine from this seed.
    ///
    /// Employees are added first, then periods are generated, then the
    /// registry entries are applied through the normal add path.
    pub fn into_engine(self, config: StatutoryConfig) -> EngineResult<PayrollEngine> {
        let mut engine = PayrollEngine::new(config);

        for employee in self.employees {
            engine.add_employee(employee)?;
        }

        for period in self.periods {
            let total_days = match period.total_days {
                Some(days) => days,
                None => default_days(&engine, &period)?,
            };
            engine.insert_record(&period.employee_id, period.month, total_days)?;
        }

        for fields in self.disregarded {
            engine.add_disregarded(fields)?;
        }

        info!(
            employees = engine.store().employees().count(),
            records = engine.records().len(),
            entries = engine.entries().len(),
            "Seed data loaded"
        );

        Ok(engine)
    }
}

fn default_days(engine: &PayrollEngine, period: &SeedPeriod) -> EngineResult<u32> {
    let employee = engine.employee(&period.employee_id)?;
    match employee.pay_basis {
        PayBasis::Monthly { .. } => Ok(engine.config().reallocation.standard_month_days),
        PayBasis::Casual { .. } => Err(EngineError::InvalidEmployee {
            field: "total_days".to_string(),
            message: format!(
                "casual employee '{}' needs total_days for {}",
                employee.id, period.month
            ),
        }),
    }
}
