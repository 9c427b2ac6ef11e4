//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::Database;
use crate::service::StudentService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub student_service: Arc<dyn StudentService>,
    /// Used by the health check; absent when the service runs without a store
    pub database: Option<Database>,
}

impl AppState {
    pub fn new(student_service: Arc<dyn StudentService>, database: Option<Database>) -> Self {
        Self {
            student_service,
            database,
        }
    }
}
