//! Configuration types for statutory payroll parameters.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. [`StatutoryConfig::default`]
//! returns the Hong Kong figures, so calculators can be used without a
//! configuration directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::MonthKey;

/// The daily contribution for one side (employer or employee) of an
/// Industry Scheme band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandContribution {
    /// A fixed amount per day.
    Fixed {
        /// Contribution per day.
        daily: Decimal,
    },
    /// A percentage of the daily average, capped per day.
    Percentage {
        /// Fraction of the daily average (e.g. 0.05).
        rate: Decimal,
        /// Maximum contribution per day.
        daily_cap: Decimal,
    },
}

impl BandContribution {
    /// The daily contribution for a given daily average income.
    pub fn daily_amount(&self, daily_average: Decimal) -> Decimal {
        match self {
            BandContribution::Fixed { daily } => *daily,
            BandContribution::Percentage { rate, daily_cap } => {
                (daily_average * rate).min(*daily_cap)
            }
        }
    }
}

/// One Industry Scheme band, applying from `lower_bound` (inclusive) up to
/// the next band's lower bound (exclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryBand {
    /// Inclusive lower bound on the daily average income.
    pub lower_bound: Decimal,
    /// Employer daily contribution.
    pub employer: BandContribution,
    /// Employee daily contribution.
    pub employee: BandContribution,
}

/// MPF contribution parameters (mpf.yaml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpfRates {
    /// Mandatory contribution rate on relevant income (0.05).
    pub contribution_rate: Decimal,
    /// Below this monthly income the employee contributes nothing.
    pub min_relevant_income: Decimal,
    /// Above this monthly income contributions are capped.
    pub max_relevant_income: Decimal,
    /// The capped mandatory contribution for each side.
    pub max_mandatory_contribution: Decimal,
    /// Industry Scheme bands, ascending by lower bound.
    pub industry_bands: Vec<IndustryBand>,
}

impl Default for MpfRates {
    fn default() -> Self {
        let fixed = |daily: i64| BandContribution::Fixed {
            daily: Decimal::from(daily),
        };
        let percentage = BandContribution::Percentage {
            rate: Decimal::new(5, 2),
            daily_cap: Decimal::from(50),
        };

        Self {
            contribution_rate: Decimal::new(5, 2),
            min_relevant_income: Decimal::from(7100),
            max_relevant_income: Decimal::from(30000),
            max_mandatory_contribution: Decimal::from(1500),
            industry_bands: vec![
                IndustryBand {
                    lower_bound: Decimal::ZERO,
                    employer: fixed(10),
                    employee: fixed(0),
                },
                IndustryBand {
                    lower_bound: Decimal::from(280),
                    employer: fixed(10),
                    employee: fixed(10),
                },
                IndustryBand {
                    lower_bound: Decimal::from(350),
                    employer: fixed(20),
                    employee: fixed(20),
                },
                IndustryBand {
                    lower_bound: Decimal::from(650),
                    employer: percentage.clone(),
                    employee: percentage,
                },
            ],
        }
    }
}

/// 713 average daily wage parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdwRules {
    /// Number of trailing monthly records in the window.
    pub window_months: usize,
    /// Decimal places the final figure is rounded to.
    pub display_decimal_places: u32,
}

impl Default for AdwRules {
    fn default() -> Self {
        Self {
            window_months: 12,
            display_decimal_places: 2,
        }
    }
}

/// Proportional pay parameters for disregarded days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReallocationRules {
    /// Days a monthly salary is divided by to get a daily rate.
    pub standard_month_days: u32,
    /// The fraction paid under the four-fifths rule.
    pub four_fifths_factor: Decimal,
}

impl Default for ReallocationRules {
    fn default() -> Self {
        Self {
            standard_month_days: 30,
            four_fifths_factor: Decimal::new(8, 1),
        }
    }
}

/// Reporting year and filing calendar (reporting.yaml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingCalendar {
    /// First month of the reporting year.
    pub year_start: MonthKey,
    /// Last month of the reporting year.
    pub year_end: MonthKey,
    /// Day of the following month by which MPF contributions are due.
    pub contribution_day: u32,
    /// Month of the IR56B filing deadline.
    pub ir56b_deadline_month: u32,
    /// Day of the IR56B filing deadline.
    pub ir56b_deadline_day: u32,
}

impl Default for ReportingCalendar {
    fn default() -> Self {
        Self {
            year_start: MonthKey::from_parts(2024, 12),
            year_end: MonthKey::from_parts(2025, 11),
            contribution_day: 10,
            ir56b_deadline_month: 4,
            ir56b_deadline_day: 15,
        }
    }
}

/// ADW and reallocation sections (statutory.yaml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRules {
    /// Average daily wage parameters.
    pub adw: AdwRules,
    /// Proportional pay parameters.
    pub reallocation: ReallocationRules,
}

/// The complete statutory configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryConfig {
    /// MPF contribution parameters.
    pub mpf: MpfRates,
    /// Average daily wage parameters.
    pub adw: AdwRules,
    /// Proportional pay parameters.
    pub reallocation: ReallocationRules,
    /// Reporting year and filing calendar.
    pub reporting: ReportingCalendar,
}

impl StatutoryConfig {
    /// Creates a configuration from its component parts.
    pub fn new(mpf: MpfRates, rules: StatutoryRules, reporting: ReportingCalendar) -> Self {
        Self {
            mpf,
            adw: rules.adw,
            reallocation: rules.reallocation,
            reporting,
        }
    }

    /// Checks cross-field consistency.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::InvalidConfig { message });

        if self.mpf.min_relevant_income >= self.mpf.max_relevant_income {
            return invalid(format!(
                "min_relevant_income ({}) must be below max_relevant_income ({})",
                self.mpf.min_relevant_income, self.mpf.max_relevant_income
            ));
        }

        match self.mpf.industry_bands.first() {
            None => return invalid("industry_bands must not be empty".to_string()),
            Some(band) if band.lower_bound != Decimal::ZERO => {
                return invalid(format!(
                    "first industry band must start at 0, starts at {}",
                    band.lower_bound
                ));
            }
            Some(_) => {}
        }

        if self
            .mpf
            .industry_bands
            .windows(2)
            .any(|pair| pair[0].lower_bound >= pair[1].lower_bound)
        {
            return invalid("industry band lower bounds must be strictly ascending".to_string());
        }

        if self.adw.window_months == 0 {
            return invalid("adw.window_months must be at least 1".to_string());
        }

        if self.reallocation.standard_month_days == 0 {
            return invalid("reallocation.standard_month_days must be at least 1".to_string());
        }

        if self.reporting.year_start > self.reporting.year_end {
            return invalid(format!(
                "reporting year_start {} is after year_end {}",
                self.reporting.year_start, self.reporting.year_end
            ));
        }

        if !(1..=28).contains(&self.reporting.contribution_day) {
            return invalid(format!(
                "contribution_day must be between 1 and 28, got {}",
                self.reporting.contribution_day
            ));
        }

        Ok(())
    }
}
