//! Core data models for the payroll compliance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adw_result;
mod audit;
mod disregarded;
mod employee;
mod month;
mod period_record;

pub use adw_result::{AdwPeriodDetail, AdwResult};
pub use audit::AuditStep;
pub use disregarded::{DisregardedPeriodEntry, DisregardedPeriodFields, DisregardedReason, PayRule};
pub use employee::{Employee, MAX_PAY_AMOUNT, MpfScheme, PayBasis};
pub use month::MonthKey;
pub use period_record::{MAX_PERIOD_DAYS, PeriodAnnotation, PeriodRecord, check_period_days};
