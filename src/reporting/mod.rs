//! Compliance reporting projections.
//!
//! These functions only aggregate and format figures already held on period
//! records; they never recompute pay or contributions.

mod annual;
mod deadlines;
mod remittance;

pub use annual::{AnnualSummary, summarize_employee_year};
pub use deadlines::{contribution_due_date, ir56b_deadline};
pub use remittance::{RemittanceLine, RemittanceSummary, mpf_remittance};
