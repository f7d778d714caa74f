use super::{ConfigError, LogConfig, Manager};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_LOGGING_CONFIG_PORT: u16 = 9030;

const MAX_PAYLOAD_LEN: u32 = 1 << 20;

/// A client gets this long to deliver its whole payload.
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Inspects a received payload before it is applied. Returning `None`
/// discards it; returning bytes applies those bytes instead.
pub type Verifier = Arc<dyn Fn(Vec<u8>) -> Option<Vec<u8>> + Send + Sync>;

/// Handle to a running configuration listener.
#[derive(Debug)]
pub struct ConfigListener {
    local_addr: SocketAddr,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ConfigListener {
    pub(crate) fn new(local_addr: SocketAddr, token: CancellationToken, task: JoinHandle<()>) -> Self {
        Self {
            local_addr,
            token,
            task,
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the serving task to finish.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!("config listener task failed: {e}");
        }
    }
}

pub(crate) fn spawn(
    listener: TcpListener,
    local_addr: SocketAddr,
    manager: Arc<Manager>,
    verify: Option<Verifier>,
    token: CancellationToken,
) -> ConfigListener {
    let task = tokio::spawn(serve(listener, manager, verify, token.clone()));
    ConfigListener::new(local_addr, token, task)
}

async fn serve(
    listener: TcpListener,
    manager: Arc<Manager>,
    verify: Option<Verifier>,
    token: CancellationToken,
) {
    tracing::info!("config listener accepting on {:?}", listener.local_addr());
    let mut connections = JoinSet::new();
    loop {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::info!("config listener shutting down...");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let manager = Arc::clone(&manager);
                    let verify = verify.clone();
                    connections.spawn(async move {
                        if let Err(e) = handle_connection(stream, &manager, verify.as_ref()).await {
                            tracing::warn!(error = %e, %peer, "logging config rejected");
                        }
                    });
                }
                Err(e) => tracing::warn!(error = ?e, "accept failed"),
            },
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
        }
    }
    // aborts clients still sending
    connections.shutdown().await;
}

async fn handle_connection(
    mut stream: TcpStream,
    manager: &Manager,
    verify: Option<&Verifier>,
) -> Result<(), ConfigError> {
    let payload = tokio::time::timeout(READ_TIMEOUT, read_payload(&mut stream))
        .await
        .map_err(|_| {
            ConfigError::Payload(format!("no complete payload within {READ_TIMEOUT:?}"))
        })??;
    let payload = match verify {
        Some(verify) => match verify(payload) {
            Some(payload) => payload,
            None => {
                tracing::debug!("logging config discarded by verifier");
                return Ok(());
            }
        },
        None => payload,
    };
    let config = LogConfig::from_payload(&payload)?;
    manager.dict_config(config)
}

async fn read_payload(stream: &mut TcpStream) -> Result<Vec<u8>, ConfigError> {
    let len = stream.read_u32().await?;
    if len > MAX_PAYLOAD_LEN {
        return Err(ConfigError::Payload(format!(
            "payload of {len} bytes exceeds the {MAX_PAYLOAD_LEN} byte limit"
        )));
    }
    let mut payload = vec![0; len as usize];
    stream.read_exact(&mut payload).await?;
    Ok(payload)
}
