//! Line transport to the Backend Service process over stdin/stdout

use crate::error::{BackendError, Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

/// Bidirectional line channel to the backend
#[async_trait]
pub trait BackendTransport: Send + Sync {
    /// Queue one line for the backend
    async fn send_line(&self, line: String) -> Result<()>;

    /// Next line from the backend, `None` once the backend has gone away
    async fn recv_line(&self) -> Option<String>;
}

/// Lines buffered in each direction before senders wait
const LINE_QUEUE: usize = 100;

/// Transport to a spawned backend process.
///
/// One task writes queued lines to stdin, one forwards stdout lines, and one
/// logs stderr so a chatty backend never blocks on a full pipe.
pub struct ProcessTransport {
    outbound: mpsc::Sender<String>,
    inbound: Mutex<mpsc::Receiver<String>>,
    tasks: Vec<JoinHandle<()>>,
}

fn spawn_failed(message: impl Into<String>) -> Error {
    Error::Backend(BackendError::SpawnFailed(message.into()))
}

impl ProcessTransport {
    /// Spawn `command` and attach to its standard streams
    pub async fn spawn(
        command: &str,
        args: &[String],
        env: &HashMap<String, String>,
    ) -> Result<(Self, Child)> {
        debug!("Spawning backend: {} {:?}", command, args);

        let mut child = Command::new(command)
            .args(args)
            .envs(env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_failed(format!("Failed to spawn backend '{}': {}", command, e)))?;

        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            return Err(spawn_failed("Backend standard streams were not captured"));
        };

        let (outbound, outbound_rx) = mpsc::channel(LINE_QUEUE);
        let (inbound_tx, inbound) = mpsc::channel(LINE_QUEUE);
        let tasks = vec![
            tokio::spawn(write_lines(stdin, outbound_rx)),
            tokio::spawn(read_lines(stdout, "stdout", Some(inbound_tx))),
            tokio::spawn(read_lines(stderr, "stderr", None)),
        ];

        Ok((
            Self {
                outbound,
                inbound: Mutex::new(inbound),
                tasks,
            },
            child,
        ))
    }
}

impl Drop for ProcessTransport {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn write_lines(mut stdin: ChildStdin, mut lines: mpsc::Receiver<String>) {
    while let Some(mut line) = lines.recv().await {
        trace!("-> backend: {}", line);
        line.push('\n');
        let written: std::io::Result<()> = async {
            stdin.write_all(line.as_bytes()).await?;
            stdin.flush().await
        }
        .await;
        if let Err(e) = written {
            error!("Failed to write to backend stdin: {}", e);
            break;
        }
    }
    debug!("Backend stdin writer ended");
}

/// Read `source` line by line. Lines go to `forward` when given, otherwise
/// they are logged as warnings.
async fn read_lines<R>(source: R, stream: &'static str, forward: Option<mpsc::Sender<String>>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(source).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match &forward {
                    Some(tx) => {
                        trace!("<- backend: {}", line);
                        if tx.send(line.to_string()).await.is_err() {
                            warn!("Dropping backend {}, receiver closed", stream);
                            break;
                        }
                    }
                    None => warn!("Backend {}: {}", stream, line),
                }
            }
            Ok(None) => {
                debug!("Backend {} closed", stream);
                break;
            }
            Err(e) => {
                error!("Error reading backend {}: {}", stream, e);
                break;
            }
        }
    }
}

#[async_trait]
impl BackendTransport for ProcessTransport {
    async fn send_line(&self, line: String) -> Result<()> {
        self.outbound.send(line).await.map_err(|e| {
            Error::Backend(BackendError::ConnectionFailed(format!(
                "Backend stdin closed: {}",
                e
            )))
        })
    }

    async fn recv_line(&self) -> Option<String> {
        self.inbound.lock().await.recv().await
    }
}

/// In-process transport pair, mainly for tests and embedded backends.
///
/// Lines sent on one end are received on the other.
pub struct MemoryTransport {
    tx: mpsc::UnboundedSender<String>,
    rx: Mutex<mpsc::UnboundedReceiver<String>>,
}

impl MemoryTransport {
    pub fn pair() -> (Self, Self) {
        let (a_tx, a_rx) = mpsc::unbounded_channel();
        let (b_tx, b_rx) = mpsc::unbounded_channel();
        (
            Self {
                tx: a_tx,
                rx: Mutex::new(b_rx),
            },
            Self {
                tx: b_tx,
                rx: Mutex::new(a_rx),
            },
        )
    }
}

#[async_trait]
impl BackendTransport for MemoryTransport {
    async fn send_line(&self, line: String) -> Result<()> {
        self.tx
            .send(line)
            .map_err(|_| Error::Backend(BackendError::ChannelClosed))
    }

    async fn recv_line(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_missing_backend_fails() {
        match ProcessTransport::spawn("segmenta-no-such-backend", &[], &HashMap::new()).await {
            Err(Error::Backend(BackendError::SpawnFailed(msg))) => {
                assert!(msg.contains("segmenta-no-such-backend"));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("spawn should fail"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_lines_round_trip_through_cat() {
        let (transport, _child) = ProcessTransport::spawn("cat", &[], &HashMap::new())
            .await
            .unwrap();
        transport.send_line(r#"{"id":1}"#.to_string()).await.unwrap();
        assert_eq!(transport.recv_line().await.as_deref(), Some(r#"{"id":1}"#));
    }

    #[tokio::test]
    async fn test_memory_transport_pair() {
        let (engine, backend) = MemoryTransport::pair();
        engine.send_line("ping".to_string()).await.unwrap();
        assert_eq!(backend.recv_line().await.as_deref(), Some("ping"));

        backend.send_line("pong".to_string()).await.unwrap();
        assert_eq!(engine.recv_line().await.as_deref(), Some("pong"));
    }
}
