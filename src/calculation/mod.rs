//! Calculation logic for the payroll compliance engine.
//!
//! This module contains the pure calculators: MPF mandatory contributions
//! for both schemes, proportional pay reallocation for disregarded days,
//! the recompute orchestrator that keeps a period record's MPF and net pay
//! consistent with its gross pay, and the 713 average daily wage aggregator.

mod adw;
mod mpf;
mod reallocation;
mod recompute;

pub use adw::compute_adw;
pub use mpf::{DEFAULT_PERIOD_DAYS, MpfContributionResult, compute_mpf};
pub use reallocation::{ReallocationResult, baseline_gross, reallocate_pay};
pub use recompute::{
    apply_disregarded_entry, generate_period_record, recompute_record, revert_to_baseline,
    round_currency,
};
