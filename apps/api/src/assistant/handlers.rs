use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::assistant::orchestrator::{run_assistant, HistoryTurn, OrchestratorError, SideData};
use crate::assistant::prompts::{GENERIC_FAILURE_MESSAGE, NOT_CONFIGURED_MESSAGE};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "SideData::is_empty")]
    pub data: SideData,
}

/// POST /api/ai/chat
///
/// With no model credential configured this answers immediately with a fixed
/// explanatory message; no tool or model call is made.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let Some(llm) = &state.llm else {
        return Json(json!({
            "response": NOT_CONFIGURED_MESSAGE,
            "error": "API key not configured"
        }))
        .into_response();
    };

    match run_assistant(llm, state.store.as_ref(), &req.message, &req.history).await {
        Ok(reply) => Json(ChatResponse {
            response: reply.response,
            data: reply.data,
        })
        .into_response(),
        Err(e) => {
            error!("Assistant run failed: {e}");
            let status = match &e {
                OrchestratorError::Model(llm_err) if llm_err.is_auth() => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(json!({
                    "error": e.to_string(),
                    "response": GENERIC_FAILURE_MESSAGE
                })),
            )
                .into_response()
        }
    }
}
