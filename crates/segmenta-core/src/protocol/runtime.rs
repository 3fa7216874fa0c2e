//! Runtime wiring between the editor's sink, the transport and the push queue

use super::{
    BackendPush, BackendRequest, BackendTransport, ChannelSink, ProcessTransport, ProtocolHandler,
};
use crate::config::EditorSettings;
use crate::error::{BackendError, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::process::Child;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Handles of the two pump tasks
pub struct BackendTasks {
    pub writer: tokio::task::JoinHandle<()>,
    pub reader: tokio::task::JoinHandle<()>,
}

impl BackendTasks {
    pub fn abort(&self) {
        self.writer.abort();
        self.reader.abort();
    }
}

/// Channels shared by the editor and the pump tasks.
///
/// The editor dispatches through `sink` and polls `push_rx` from its event
/// loop; nothing on the editor side ever awaits.
#[derive(Debug)]
pub struct BackendChannels {
    pub sink: ChannelSink,
    pub request_rx: mpsc::Receiver<BackendRequest>,
    pub push_tx: mpsc::UnboundedSender<BackendPush>,
    pub push_rx: mpsc::UnboundedReceiver<BackendPush>,
}

impl BackendChannels {
    pub fn new(buffer: usize) -> Self {
        let (sink, request_rx) = ChannelSink::new(buffer);
        let (push_tx, push_rx) = mpsc::unbounded_channel();
        Self {
            sink,
            request_rx,
            push_tx,
            push_rx,
        }
    }
}

/// Spawn the writer (requests -> transport) and reader (transport -> pushes)
/// tasks. Both end when their input side closes.
pub fn spawn_backend_tasks(
    transport: Arc<dyn BackendTransport>,
    mut request_rx: mpsc::Receiver<BackendRequest>,
    push_tx: mpsc::UnboundedSender<BackendPush>,
) -> BackendTasks {
    let protocol = Arc::new(ProtocolHandler::new());

    let writer_transport = Arc::clone(&transport);
    let writer_protocol = Arc::clone(&protocol);
    let writer = tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let method = request.method();
            let line = match writer_protocol.encode_request(request) {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to encode {}: {}", method, e);
                    continue;
                }
            };
            if let Err(e) = writer_transport.send_line(line).await {
                error!("Failed to deliver {}: {}", method, e);
                break;
            }
        }
        debug!("Backend writer task ended");
    });

    let reader = tokio::spawn(async move {
        while let Some(line) = transport.recv_line().await {
            match protocol.decode_push(&line) {
                Ok(push) => {
                    if push_tx.send(push).is_err() {
                        debug!("Push receiver dropped");
                        break;
                    }
                }
                Err(e) => warn!("Ignoring backend line: {}", e),
            }
        }
        debug!("Backend reader task ended");
    });

    BackendTasks { writer, reader }
}

/// A running connection to a spawned backend process
pub struct BackendConnection {
    pub sink: ChannelSink,
    pub push_rx: mpsc::UnboundedReceiver<BackendPush>,
    pub tasks: BackendTasks,
    pub child: Child,
}

/// Spawn the backend process named in `settings` and wire it up.
/// Must be called from within a tokio runtime.
pub async fn connect_process(settings: &EditorSettings) -> Result<BackendConnection> {
    let command = settings.backend_command.as_deref().ok_or_else(|| {
        Error::Backend(BackendError::SpawnFailed(
            "No backend command configured".to_string(),
        ))
    })?;

    let (transport, child) =
        ProcessTransport::spawn(command, &settings.backend_args, &HashMap::new()).await?;
    info!("Backend started: {}", command);

    let channels = BackendChannels::new(settings.request_buffer);
    let tasks = spawn_backend_tasks(Arc::new(transport), channels.request_rx, channels.push_tx);

    Ok(BackendConnection {
        sink: channels.sink,
        push_rx: channels.push_rx,
        tasks,
        child,
    })
}
