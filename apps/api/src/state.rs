use std::sync::Arc;

use crate::assessment::store::AssessmentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence seam. Default: `PgAssessmentStore`; tests use the in-memory store.
    pub store: Arc<dyn AssessmentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn AssessmentStore>) -> Self {
        Self { store }
    }
}
