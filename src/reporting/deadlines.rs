//! Statutory filing and payment dates.

use chrono::NaiveDate;

use crate::config::ReportingCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::MonthKey;

/// The day MPF contributions for `month` must reach the trustee: the
/// calendar's contribution day of the following month.
///
/// # Examples
///
/// ```
/// use payroll_engine::config::ReportingCalendar;
/// use payroll_engine::models::MonthKey;
/// use payroll_engine::reporting::contribution_due_date;
///
/// let due = contribution_due_date(&MonthKey::parse("2025-12").unwrap(), &ReportingCalendar::default())?;
/// assert_eq!(due.to_string(), "2026-01-10");
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn contribution_due_date(month: &MonthKey, calendar: &ReportingCalendar) -> EngineResult<NaiveDate> {
    let following = month.next();
    date(following.year(), following.month(), calendar.contribution_day)
}

/// The IR56B filing deadline for a reporting year ending with `year_end`:
/// the first configured deadline date after that month ends.
pub fn ir56b_deadline(year_end: &MonthKey, calendar: &ReportingCalendar) -> EngineResult<NaiveDate> {
    let month = calendar.ir56b_deadline_month;
    let day = calendar.ir56b_deadline_day;

    let candidate = date(year_end.year(), month, day)?;
    if candidate > year_end.last_day() {
        Ok(candidate)
    } else {
        date(year_end.year() + 1, month, day)
    }
}

fn date(year: i32, month: u32, day: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| EngineError::InvalidConfig {
        message: format!("{:04}-{:02}-{:02} is not a valid date", year, month, day),
    })
}
