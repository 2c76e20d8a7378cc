//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for the calculators, the period
//! records, the disregarded-period registry and the compliance reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AnnualSummaryQuery, DisregardedRequest, MpfRequest, ReallocateRequest, RecordsQuery,
};
pub use response::{
    AnnualSummaryResponse, ApiError, ApiErrorResponse, RegistryResponse, RemittanceResponse,
};
pub use state::AppState;
