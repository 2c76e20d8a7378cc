//! Configuration loading and management for the payroll compliance engine.
//!
//! This module provides functionality to load statutory parameters (MPF
//! limits and bands, ADW rules, reporting calendar) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hk").unwrap();
//! println!("MPF cap: {}", config.config().mpf.max_mandatory_contribution);
//! ```

mod loader;
mod types;

pub(crate) use loader::load_yaml;
pub use loader::ConfigLoader;
pub use types::{
    AdwRules, BandContribution, IndustryBand, MpfRates, ReallocationRules, ReportingCalendar,
    StatutoryConfig, StatutoryRules,
};
