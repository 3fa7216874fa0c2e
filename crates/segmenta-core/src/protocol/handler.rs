//! JSON-lines framing for backend messages

use super::{BackendPush, BackendRequest};
use crate::error::{BackendError, Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Numbered request as written to the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestEnvelope {
    pub id: u64,
    pub request: BackendRequest,
}

/// Protocol handler for backend messages
pub struct ProtocolHandler {
    request_id: AtomicU64,
}

impl ProtocolHandler {
    pub fn new() -> Self {
        Self {
            request_id: AtomicU64::new(1),
        }
    }

    /// Generate next request ID
    pub fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Wrap a request in a numbered envelope and serialize it to one line
    pub fn encode_request(&self, request: BackendRequest) -> Result<String> {
        let envelope = RequestEnvelope {
            id: self.next_id(),
            request,
        };
        let line = serde_json::to_string(&envelope)?;
        trace!("Encoded request: {}", line);
        Ok(line)
    }

    /// Parse one request line (used by backend stand-ins)
    pub fn decode_request(&self, line: &str) -> Result<RequestEnvelope> {
        serde_json::from_str(line).map_err(|e| {
            Error::Backend(BackendError::InvalidMessage(format!(
                "Malformed request: {}",
                e
            )))
        })
    }

    /// Parse one push line
    pub fn decode_push(&self, line: &str) -> Result<BackendPush> {
        serde_json::from_str(line).map_err(|e| {
            Error::Backend(BackendError::InvalidMessage(format!(
                "Malformed push: {}",
                e
            )))
        })
    }

    /// Serialize a push to one line (used by backend stand-ins)
    pub fn encode_push(&self, push: &BackendPush) -> Result<String> {
        Ok(serde_json::to_string(push)?)
    }
}

impl Default for ProtocolHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_increase() {
        let protocol = ProtocolHandler::new();
        let first = protocol
            .encode_request(BackendRequest::GenerateStatistics {
                project: "p".to_string(),
            })
            .unwrap();
        let second = protocol
            .encode_request(BackendRequest::GenerateStatistics {
                project: "p".to_string(),
            })
            .unwrap();

        assert_eq!(protocol.decode_request(&first).unwrap().id, 1);
        assert_eq!(protocol.decode_request(&second).unwrap().id, 2);
        assert!(!first.contains('\n'));
    }

    #[test]
    fn test_decode_push_rejects_garbage() {
        let protocol = ProtocolHandler::new();
        let result = protocol.decode_push("{\"event\":\"nope\"}");
        assert!(matches!(
            result,
            Err(Error::Backend(BackendError::InvalidMessage(_)))
        ));
    }

    #[test]
    fn test_decode_segment_count() {
        let protocol = ProtocolHandler::new();
        let push = protocol
            .decode_push(r#"{"event":"segmentCount","data":{"project":"p","count":250}}"#)
            .unwrap();
        assert_eq!(
            push,
            BackendPush::SegmentCount {
                project: "p".to_string(),
                count: 250
            }
        );
    }
}
