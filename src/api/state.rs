//! Application state for the payroll engine API.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::store::PayrollEngine;

/// Shared application state.
///
/// The engine sits behind a single async mutex, so registry mutations and
/// the recomputes they trigger are never interleaved.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<Mutex<PayrollEngine>>,
}

impl AppState {
    /// Creates a new application state owning the given engine.
    pub fn new(engine: PayrollEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Waits for exclusive access to the engine.
    pub async fn engine(&self) -> MutexGuard<'_, PayrollEngine> {
        self.engine.lock().await
    }
}
