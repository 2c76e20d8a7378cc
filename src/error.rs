//! Error types for the payroll compliance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Missing employee references during recompute, an empty ADW window and
//! over-long disregarded periods are NOT errors: they are defined outputs of
//! the calculators. Errors are reserved for invalid input and configuration
//! faults.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the payroll compliance engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/mpf.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/mpf.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its values are inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// A month key was not in the strict `YYYY-MM` format.
    #[error("Invalid month key '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected value.
        value: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A period length or other period field was out of range.
    #[error("Invalid period field '{field}': {message}")]
    InvalidPeriod {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that could not be resolved.
        employee_id: String,
    },

    /// A second period record was supplied for the same employee and month.
    #[error("Period record already exists for employee '{employee_id}' in {month}")]
    DuplicateRecord {
        /// The employee identifier.
        employee_id: String,
        /// The month key.
        month: String,
    },

    /// No disregarded-period entry exists with the given identifier.
    #[error("Disregarded period entry not found: {entry_id}")]
    EntryNotFound {
        /// The identifier that could not be resolved.
        entry_id: Uuid,
    },

    /// The employee already has an active disregarded period in that month.
    #[error("Employee '{employee_id}' already has a disregarded period in {month} (entry {existing})")]
    DuplicateDisregardedEntry {
        /// The employee identifier.
        employee_id: String,
        /// The month key.
        month: String,
        /// The entry currently occupying the slot.
        existing: Uuid,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
