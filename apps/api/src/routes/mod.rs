pub mod health;
pub mod records;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::import::handlers as import;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Bulk import
        .route(
            "/api/candidates/bulk-import",
            post(import::handle_candidate_import),
        )
        .route(
            "/api/companies/bulk-import",
            post(import::handle_company_import),
        )
        // AI assistant
        .route("/api/ai/chat", post(assistant::handle_chat))
        // Directory reads
        .route("/api/candidates", get(records::list_candidates))
        .route("/api/companies", get(records::list_companies))
        .route("/api/jobs", get(records::list_jobs))
        .route("/api/stats", get(records::get_stats))
        .with_state(state)
}
