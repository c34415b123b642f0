use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::store::TalentStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Collaborators are constructed once at startup and passed in by
/// reference; nothing here is a process-wide global.
#[derive(Clone)]
pub struct AppState {
    /// Persistence collaborator. `PgStore` in production, `MemoryStore` in tests.
    pub store: Arc<dyn TalentStore>,
    /// None when ANTHROPIC_API_KEY is not configured; the chat endpoint then
    /// answers with a fixed explanatory message.
    pub llm: Option<LlmClient>,
}
