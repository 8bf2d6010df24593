//! Event sinks
//!
//! The pipeline pushes each [`StreamEvent`] into a sink as soon as it exists.
//! A send failure means the consumer is gone.

use super::types::StreamEvent;
use thiserror::Error;

/// The receiving side of a sink has been dropped
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Destination for pipeline events
pub trait EventSink {
    fn emit(&self, event: StreamEvent) -> Result<(), SinkClosed>;
}

/// Blocking send; call from a blocking worker, never from an async task
impl EventSink for tokio::sync::mpsc::Sender<StreamEvent> {
    fn emit(&self, event: StreamEvent) -> Result<(), SinkClosed> {
        self.blocking_send(event).map_err(|_| SinkClosed)
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: StreamEvent) -> Result<(), SinkClosed> {
        (**self).emit(event)
    }
}
