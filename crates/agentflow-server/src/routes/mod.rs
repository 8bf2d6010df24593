//! API route handlers

use agentflow_core::StreamEvent;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::state::AppState;

/// Events buffered between the pipeline worker and the response body
const EVENT_BUFFER: usize = 16;

// ========== Pipeline Routes ==========

#[derive(Deserialize)]
pub struct ProcessQuery {
    text: String,
}

/// Plan `text` into tasks, simulate each agent, and stream progress as SSE
pub async fn process(
    State(state): State<AppState>,
    Query(query): Query<ProcessQuery>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let (tx, rx) = mpsc::channel::<StreamEvent>(EVENT_BUFFER);
    let orchestrator = state.orchestrator.clone();

    // Provider calls block; dropping the response drops `rx`, which stops the
    // pipeline at its next emit.
    tokio::task::spawn_blocking(move || {
        let outcome = orchestrator.run(&query.text, &tx);
        tracing::debug!(?outcome, "pipeline worker finished");
    });

    let events = ReceiverStream::new(rx).map(|event| Event::default().json_data(&event));

    Sse::new(events).keep_alive(KeepAlive::default())
}

// ========== Chat Routes ==========

#[derive(Deserialize)]
pub struct ChatRequest {
    message: String,
    #[serde(default)]
    context: Option<String>,
}

/// One-shot assistant reply
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let assistant = state.assistant.clone();

    let result = tokio::task::spawn_blocking(move || {
        assistant.reply(&req.message, req.context.as_deref())
    })
    .await;

    match result {
        Ok(Ok(message)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": message })),
        ),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "chat completion failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "chat worker panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal error" })),
            )
        }
    }
}

// ========== Catalog Routes ==========

/// List the agents the planner can assign work to
pub async fn list_agents(State(state): State<AppState>) -> impl IntoResponse {
    let agents: Vec<_> = state.catalog.iter().collect();
    Json(serde_json::json!({ "agents": agents }))
}
