//! Payroll data ownership.
//!
//! [`PayrollStore`] holds employees, period records and the disregarded-period
//! registry. [`PayrollEngine`] wraps a store with the statutory configuration
//! and is the single writer of record financial fields.

mod engine;
mod payroll_store;
mod seed;

pub use engine::PayrollEngine;
pub use payroll_store::PayrollStore;
pub use seed::{SeedData, SeedPeriod};
