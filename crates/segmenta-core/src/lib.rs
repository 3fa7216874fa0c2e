//! Segmenta Core Library
//!
//! This crate provides the model shared by the Segmenta editing engine and
//! its host application:
//! - Projects, segments, matches and terms
//! - Inline tag markup with caret-addressable pieces
//! - The Backend Service message contract and its JSON-lines transport
//! - Editor settings
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     segmenta-core                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  protocol/     - Requests, pushes, sink, transport, runtime │
//! │  markup/       - Inline tags, tag index                     │
//! │  types/        - Shared type definitions                    │
//! │  config.rs     - Editor settings                            │
//! │  error.rs      - Error types                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod markup;
pub mod protocol;
pub mod types;

// Re-export commonly used types
pub use config::EditorSettings;
pub use error::{Error, Result};
pub use markup::{Markup, Tag, TagIndex};
pub use types::*;

// Re-export protocol components
pub use protocol::{
    connect_process, spawn_backend_tasks, BackendChannels, BackendConnection, BackendPush,
    BackendRequest, BackendSink, BackendTasks, BackendTransport, ChannelSink, MemoryTransport,
    ProcessTransport, ProtocolHandler, RecordingSink, RequestEnvelope,
};
