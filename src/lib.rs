//! Payroll compliance engine for Hong Kong SMEs.
//!
//! This crate computes the statutory figures an employer must keep right:
//! MPF mandatory contributions under the Master Trust and Industry schemes,
//! proportional gross pay when part of a month is disregarded (maternity,
//! sickness, work injury, unpaid leave), and the Employment Ordinance
//! ("713") 12-month average daily wage that excludes those periods.
//!
//! Changing a disregarded period through [`store::PayrollEngine`]
//! re-derives gross pay, MPF and net pay for the affected month; the ADW is
//! always derived on demand from the current records.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod reporting;
pub mod store;
