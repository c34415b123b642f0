//! The assistant run loop. One request walks a small state machine: call the
//! model; while the response requests tools, dispatch them all, append the
//! results as the next turn, and call again; stop at the first tool-free
//! response. A hard round cap guards against a model that never stops asking
//! for tools. State lives only in the growing message vector and is dropped
//! with the response.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::assistant::prompts::{EMPTY_ANSWER_MESSAGE, SYSTEM_PROMPT};
use crate::assistant::tools;
use crate::llm_client::{ChatMessage, ChatModel, ContentBlock, LlmError, Role};
use crate::store::TalentStore;

/// Maximum model-invocation rounds per request. Exceeding it is a terminal
/// failure, never an infinite loop.
pub const MAX_ROUNDS: usize = 8;

/// Prior conversation turns are capped to this many to bound context growth.
pub const HISTORY_WINDOW: usize = 10;

/// A prior turn as supplied by the client. Only plain-text turns survive
/// across requests; tool traffic is rebuilt fresh each run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: Role,
    pub content: String,
}

/// Structured results surfaced alongside the answer text so the caller can
/// render rich cards without re-deriving them from prose.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_jobs: Option<Value>,
}

impl SideData {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_none() && self.jobs.is_none() && self.external_jobs.is_none()
    }

    fn absorb(&mut self, tool_name: &str, result: &Value) {
        match tool_name {
            "search_candidates" if result.is_array() => {
                self.candidates = Some(result.clone());
            }
            "search_jobs" if result.is_array() => {
                self.jobs = Some(result.clone());
            }
            "search_external_jobs" => {
                self.external_jobs = Some(result.clone());
            }
            _ => {}
        }
    }
}

#[derive(Debug)]
pub struct AssistantReply {
    pub response: String,
    pub data: SideData,
}

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("assistant exceeded {MAX_ROUNDS} tool rounds without a final answer")]
    RoundLimitExceeded,
}

/// Runs one assistant request to completion.
pub async fn run_assistant(
    model: &dyn ChatModel,
    store: &dyn TalentStore,
    message: &str,
    history: &[HistoryTurn],
) -> Result<AssistantReply, OrchestratorError> {
    let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];
    let mut messages: Vec<ChatMessage> = recent
        .iter()
        .map(|turn| ChatMessage::text(turn.role, turn.content.clone()))
        .collect();
    messages.push(ChatMessage::text(Role::User, message));

    let declarations = tools::declarations();
    let mut data = SideData::default();

    for round in 0..MAX_ROUNDS {
        let response = model.complete(SYSTEM_PROMPT, &declarations, &messages).await?;
        let requests = response.tool_uses();

        if requests.is_empty() {
            let text = response.text().unwrap_or(EMPTY_ANSWER_MESSAGE).to_string();
            info!(rounds = round + 1, "Assistant run complete");
            return Ok(AssistantReply {
                response: text,
                data,
            });
        }

        debug!(round, tools = requests.len(), "Dispatching requested tools");

        // All invocations in one turn run concurrently; they are read-only and
        // order-independent. The loop itself stays strictly sequential.
        let results = join_all(
            requests
                .iter()
                .map(|req| tools::dispatch(store, &req.name, &req.input)),
        )
        .await;

        let mut result_blocks = Vec::with_capacity(requests.len());
        for (request, result) in requests.iter().zip(results) {
            data.absorb(&request.name, &result);
            result_blocks.push(ContentBlock::ToolResult {
                tool_use_id: request.id.clone(),
                content: serde_json::to_string(&result).unwrap_or_else(|_| "null".to_string()),
            });
        }

        messages.push(ChatMessage::blocks(Role::Assistant, response.content));
        messages.push(ChatMessage::blocks(Role::User, result_blocks));
    }

    Err(OrchestratorError::RoundLimitExceeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{ModelResponse, ToolDefinition};
    use crate::models::NewCandidate;
    use crate::store::memory::MemoryStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Scripted model: pops pre-baked responses and records what it was sent.
    struct ScriptedModel {
        responses: Mutex<Vec<ModelResponse>>,
        seen_message_counts: Mutex<Vec<usize>>,
    }

    impl ScriptedModel {
        fn new(mut responses: Vec<ModelResponse>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                seen_message_counts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(
            &self,
            _system: &str,
            _tools: &[ToolDefinition],
            messages: &[ChatMessage],
        ) -> Result<ModelResponse, LlmError> {
            self.seen_message_counts.lock().unwrap().push(messages.len());
            self.responses.lock().unwrap().pop().ok_or(LlmError::Api {
                status: 500,
                message: "script exhausted".to_string(),
            })
        }
    }

    fn text_response(text: &str) -> ModelResponse {
        serde_json::from_value(json!({
            "content": [{ "type": "text", "text": text }],
            "stop_reason": "end_turn"
        }))
        .unwrap()
    }

    fn tool_response(id: &str, name: &str, input: Value) -> ModelResponse {
        serde_json::from_value(json!({
            "content": [
                { "type": "tool_use", "id": id, "name": name, "input": input }
            ],
            "stop_reason": "tool_use"
        }))
        .unwrap()
    }

    fn turn(role: Role, content: &str) -> HistoryTurn {
        HistoryTurn {
            role,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_tool_free_response_finishes_in_one_round() {
        let model = ScriptedModel::new(vec![text_response("Hello!")]);
        let store = MemoryStore::new();

        let reply = run_assistant(&model, &store, "hi", &[]).await.unwrap();

        assert_eq!(reply.response, "Hello!");
        assert!(reply.data.is_empty());
        assert_eq!(*model.seen_message_counts.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_tool_round_then_answer_populates_side_data() {
        let model = ScriptedModel::new(vec![
            tool_response("toolu_1", "search_candidates", json!({ "query": "react" })),
            text_response("Found one candidate."),
        ]);
        let store = MemoryStore::new();
        store
            .create_candidate(&NewCandidate {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                email: "jane@x.com".into(),
                skills: Some("React".into()),
                status: "ACTIVE".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let reply = run_assistant(&model, &store, "Find candidates with React experience", &[])
            .await
            .unwrap();

        assert_eq!(reply.response, "Found one candidate.");
        let candidates = reply.data.candidates.as_ref().unwrap().as_array().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0]["email"], "jane@x.com");

        // Round 2 saw the original turn plus the assistant tool request and
        // the tool-result turn.
        assert_eq!(*model.seen_message_counts.lock().unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_always_tool_model_hits_round_cap() {
        let responses = (0..MAX_ROUNDS + 2)
            .map(|i| tool_response(&format!("toolu_{i}"), "get_pipeline_stats", json!({})))
            .collect();
        let model = ScriptedModel::new(responses);
        let store = MemoryStore::new();

        let err = run_assistant(&model, &store, "loop forever", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, OrchestratorError::RoundLimitExceeded));
        assert_eq!(model.seen_message_counts.lock().unwrap().len(), MAX_ROUNDS);
    }

    #[tokio::test]
    async fn test_history_is_capped_to_window() {
        let model = ScriptedModel::new(vec![text_response("ok")]);
        let store = MemoryStore::new();
        let history: Vec<HistoryTurn> = (0..25)
            .map(|i| {
                turn(
                    if i % 2 == 0 { Role::User } else { Role::Assistant },
                    &format!("turn {i}"),
                )
            })
            .collect();

        run_assistant(&model, &store, "latest", &history)
            .await
            .unwrap();

        // 10 retained history turns + the new user message.
        assert_eq!(
            *model.seen_message_counts.lock().unwrap(),
            vec![HISTORY_WINDOW + 1]
        );
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_without_retry() {
        let model = ScriptedModel::new(vec![]);
        let store = MemoryStore::new();

        let err = run_assistant(&model, &store, "hi", &[]).await.unwrap_err();

        assert!(matches!(err, OrchestratorError::Model(_)));
        // Exactly one attempt was made.
        assert_eq!(model.seen_message_counts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_result_feeds_back_and_loop_continues() {
        let model = ScriptedModel::new(vec![
            tool_response("toolu_1", "made_up_tool", json!({})),
            text_response("Sorry, that tool does not exist."),
        ]);
        let store = MemoryStore::new();

        let reply = run_assistant(&model, &store, "use a fake tool", &[])
            .await
            .unwrap();

        assert_eq!(reply.response, "Sorry, that tool does not exist.");
        assert!(reply.data.is_empty());
    }

    #[tokio::test]
    async fn test_parallel_tools_in_one_turn_all_resolve() {
        let response = serde_json::from_value(json!({
            "content": [
                { "type": "tool_use", "id": "toolu_1", "name": "get_pipeline_stats", "input": {} },
                { "type": "tool_use", "id": "toolu_2", "name": "search_jobs", "input": {} }
            ],
            "stop_reason": "tool_use"
        }))
        .unwrap();
        let model = ScriptedModel::new(vec![response, text_response("done")]);
        let store = MemoryStore::new();

        let reply = run_assistant(&model, &store, "stats and jobs", &[])
            .await
            .unwrap();

        assert_eq!(reply.response, "done");
        // search_jobs returned an (empty) array, so it lands in side data.
        assert!(reply.data.jobs.is_some());
        assert!(reply.data.candidates.is_none());
    }
}
