//! Outbound request sinks
//!
//! The editor never waits on the backend: it hands each request to a
//! [`BackendSink`] and carries on. Whatever answer the backend produces comes
//! back later as a separate push.

use super::BackendRequest;
use crate::error::{BackendError, Error, Result};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

/// Fire-and-forget outlet for backend requests
pub trait BackendSink: Send + Sync {
    /// Queue a request for delivery. Never blocks.
    fn dispatch(&self, request: BackendRequest) -> Result<()>;
}

/// Sink backed by a bounded tokio channel drained by the writer task
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<BackendRequest>,
}

impl ChannelSink {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<BackendRequest>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, rx)
    }
}

impl BackendSink for ChannelSink {
    fn dispatch(&self, request: BackendRequest) -> Result<()> {
        debug!("Dispatching {} for {}", request.method(), request.project());
        self.tx.try_send(request).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => Error::Backend(BackendError::QueueFull),
            mpsc::error::TrySendError::Closed(_) => Error::Backend(BackendError::ChannelClosed),
        })
    }
}

/// In-memory sink that keeps every request, for hosts running without a backend
#[derive(Debug, Default)]
pub struct RecordingSink {
    requests: Mutex<Vec<BackendRequest>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests dispatched so far, oldest first
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Remove and return the recorded requests
    pub fn take(&self) -> Vec<BackendRequest> {
        self.requests
            .lock()
            .map(|mut requests| std::mem::take(&mut *requests))
            .unwrap_or_default()
    }
}

impl BackendSink for RecordingSink {
    fn dispatch(&self, request: BackendRequest) -> Result<()> {
        self.requests
            .lock()
            .map_err(|e| Error::Internal(format!("Recording sink poisoned: {}", e)))?
            .push(request);
        Ok(())
    }
}
