//! Test doubles for the pipeline

use super::sink::{EventSink, SinkClosed};
use super::types::StreamEvent;
use crate::llm::{CompletionProvider, CompletionRequest, LlmError, ProviderStatus};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Shared, ordered record of sink emits and provider calls
pub(crate) type Journal = Arc<Mutex<Vec<String>>>;

/// Provider that replays canned replies in order
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    journal: Journal,
}

impl ScriptedProvider {
    pub(crate) fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Self::with_journal(replies, Journal::default())
    }

    pub(crate) fn with_journal(replies: Vec<Result<String, LlmError>>, journal: Journal) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            journal,
        })
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

impl CompletionProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    fn name(&self) -> &str {
        "Scripted"
    }

    fn status(&self) -> ProviderStatus {
        ProviderStatus::Ready
    }

    fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.journal.lock().push(format!("call:{}", request.model));
        self.requests.lock().push(request.clone());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("no scripted reply left".into())))
    }
}

/// Sink that collects events and closes after an optional budget
pub(crate) struct RecordingSink {
    events: Mutex<Vec<StreamEvent>>,
    journal: Journal,
    budget: Option<usize>,
}

impl RecordingSink {
    pub(crate) fn new(journal: Journal) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            journal,
            budget: None,
        }
    }

    /// Accept `budget` events, then behave as if the client left
    pub(crate) fn closing_after(budget: usize) -> Self {
        Self {
            budget: Some(budget),
            ..Self::new(Journal::default())
        }
    }

    pub(crate) fn events(&self) -> Vec<StreamEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: StreamEvent) -> Result<(), SinkClosed> {
        let mut events = self.events.lock();
        if self.budget.is_some_and(|budget| events.len() >= budget) {
            return Err(SinkClosed);
        }
        self.journal
            .lock()
            .push(format!("event:{}", serde_json::to_string(&event).unwrap_or_default()));
        events.push(event);
        Ok(())
    }
}
