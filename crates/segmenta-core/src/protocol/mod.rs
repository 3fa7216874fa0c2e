//! Backend Service message contract
//!
//! The engine talks to the Backend Service by asynchronous message passing
//! only: requests go out fire-and-forget through a [`BackendSink`], and the
//! service later pushes [`BackendPush`] messages keyed by project and segment.
//!
//! On the wire every message is one JSON line. Requests are wrapped in a
//! numbered [`RequestEnvelope`]; pushes are written bare.

mod handler;
mod messages;
mod runtime;
mod sink;
mod transport;

pub use handler::{ProtocolHandler, RequestEnvelope};
pub use messages::{BackendPush, BackendRequest};
pub use runtime::{
    connect_process, spawn_backend_tasks, BackendChannels, BackendConnection, BackendTasks,
};
pub use sink::{BackendSink, ChannelSink, RecordingSink};
pub use transport::{BackendTransport, MemoryTransport, ProcessTransport};
