//! WebSocket connection and receive loop.
//!
//! The connection spawns a tokio task that reads incoming frames, resolves
//! pending commands by id, and discards unsolicited events. Outgoing
//! commands share one sink guarded by an async mutex.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use crate::error::{Error, Result};
use crate::identifiers::{PageId, SessionId};
use crate::protocol::{CdpCall, CdpReply};
use crate::session::{CdpSession, SessionFactory};

// ============================================================================
// Types
// ============================================================================

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Map of command ids to response channels.
type CorrelationMap = FxHashMap<u64, oneshot::Sender<Result<Value>>>;

// ============================================================================
// Connection
// ============================================================================

/// Multiplexed WebSocket connection to a debugging endpoint.
///
/// Cheap to clone; all clones share the sink, the correlation map, and the
/// receive loop. Implements [`SessionFactory`] by attaching flat sessions
/// to page targets.
///
/// # Example
///
/// ```ignore
/// let connection = Connection::connect("ws://127.0.0.1:9222/devtools/browser/abc").await?;
/// let session = connection.create_session(&PageId::new("TARGET")).await?;
/// let result = session.send("DOM.getDocument", json!({"depth": 0})).await?;
/// ```
#[derive(Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

/// Shared state behind a connection.
struct ConnectionInner {
    /// Outgoing frame sink. Async mutex: held across the send await.
    sink: tokio::sync::Mutex<WsSink>,

    /// Pending commands awaiting responses.
    pending: Mutex<CorrelationMap>,

    /// Command id counter.
    next_id: AtomicU64,
}

// ============================================================================
// Connection - Constructor
// ============================================================================

impl Connection {
    /// Connects to a DevTools WebSocket endpoint and starts the receive loop.
    ///
    /// # Arguments
    ///
    /// * `ws_url` - Endpoint URL, `ws://` or `wss://`
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`] for an invalid URL or scheme
    /// - [`Error::WebSocket`] when the handshake fails
    pub async fn connect(ws_url: &str) -> Result<Self> {
        let url = url::Url::parse(ws_url)
            .map_err(|e| Error::connection(format!("invalid endpoint URL {ws_url}: {e}")))?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(Error::connection(format!(
                "endpoint URL must be ws:// or wss://, got {}",
                url.scheme()
            )));
        }

        let (stream, _) = tokio_tungstenite::connect_async(url.as_str()).await?;
        let (sink, source) = stream.split();

        let inner = Arc::new(ConnectionInner {
            sink: tokio::sync::Mutex::new(sink),
            pending: Mutex::new(CorrelationMap::default()),
            next_id: AtomicU64::new(1),
        });

        let inner_clone = Arc::clone(&inner);
        tokio::spawn(async move {
            Self::receive_loop(source, inner_clone).await;
        });

        debug!(url = %ws_url, "Connection established");
        Ok(Self { inner })
    }
}

// ============================================================================
// Connection - Public API
// ============================================================================

impl Connection {
    /// Sends one command and waits for its response.
    ///
    /// There is no timeout: a command the browser never answers suspends
    /// its caller until the connection closes.
    ///
    /// # Arguments
    ///
    /// * `method` - Qualified method name, e.g. `Target.attachToTarget`
    /// * `params` - Method parameters (`Value::Null` for none)
    /// * `session_id` - Session routing for page-scoped commands
    ///
    /// # Errors
    ///
    /// - [`Error::Cdp`] when the browser reports a command error
    /// - [`Error::ConnectionClosed`] when the connection drops mid-flight
    pub async fn send(
        &self,
        method: &str,
        params: Value,
        session_id: Option<&SessionId>,
    ) -> Result<Value> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let call = CdpCall::new(id, method, params, session_id.cloned());
        let text = serde_json::to_string(&call)?;

        let (tx, rx) = oneshot::channel();
        self.inner.pending.lock().insert(id, tx);

        trace!(id, method, "Sending command");
        let sent = {
            let mut sink = self.inner.sink.lock().await;
            sink.send(Message::Text(text.into())).await
        };
        if let Err(e) = sent {
            self.inner.pending.lock().remove(&id);
            return Err(e.into());
        }

        rx.await?
    }

    /// Returns the number of commands awaiting responses.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.pending.lock().len()
    }
}

// ============================================================================
// Connection - Receive Loop
// ============================================================================

impl Connection {
    /// Reads frames until the stream ends, resolving pending commands.
    async fn receive_loop(mut source: WsSource, inner: Arc<ConnectionInner>) {
        while let Some(message) = source.next().await {
            match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<CdpReply>(&text) {
                    Ok(reply) => Self::dispatch(reply, &inner),
                    Err(e) => warn!(error = %e, "Failed to parse incoming frame"),
                },
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed by peer");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "WebSocket receive error");
                    break;
                }
            }
        }

        Self::fail_pending(&inner);
    }

    /// Routes one incoming reply to its waiter, or drops an event.
    fn dispatch(reply: CdpReply, inner: &Arc<ConnectionInner>) {
        if let Some(id) = reply.id {
            let waiter = inner.pending.lock().remove(&id);
            match waiter {
                Some(tx) => {
                    let _ = tx.send(reply.into_result());
                }
                None => trace!(id, "Response for unknown command id"),
            }
        } else if let Some(method) = &reply.method {
            trace!(method, "Ignoring event");
        }
    }

    /// Fails every pending command once the connection is gone.
    fn fail_pending(inner: &Arc<ConnectionInner>) {
        let pending: Vec<_> = inner.pending.lock().drain().collect();
        if !pending.is_empty() {
            debug!(count = pending.len(), "Failing pending commands on close");
        }
        for (_, tx) in pending {
            let _ = tx.send(Err(Error::ConnectionClosed));
        }
    }
}

// ============================================================================
// Connection - SessionFactory
// ============================================================================

#[async_trait]
impl SessionFactory for Connection {
    /// Attaches a flat session to a page target.
    async fn create_session(&self, page: &PageId) -> Result<Arc<dyn CdpSession>> {
        let result = self
            .send(
                "Target.attachToTarget",
                json!({ "targetId": page.as_str(), "flatten": true }),
                None,
            )
            .await?;

        let session_id = result
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::protocol("attachToTarget response missing sessionId"))?;

        debug!(page_id = %page, session_id, "Attached session");
        Ok(Arc::new(WsSession {
            connection: self.clone(),
            session_id: SessionId::new(session_id),
        }))
    }
}

// ============================================================================
// WsSession
// ============================================================================

/// One flat session riding the shared connection.
struct WsSession {
    /// Owning connection.
    connection: Connection,
    /// Routing id for this session.
    session_id: SessionId,
}

#[async_trait]
impl CdpSession for WsSession {
    fn id(&self) -> &SessionId {
        &self.session_id
    }

    async fn send(&self, method: &str, params: Value) -> Result<Value> {
        self.connection
            .send(method, params, Some(&self.session_id))
            .await
    }

    async fn detach(&self) -> Result<()> {
        self.connection
            .send(
                "Target.detachFromTarget",
                json!({ "sessionId": self.session_id.as_str() }),
                None,
            )
            .await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Connection>();
    }

    #[tokio::test]
    async fn test_connect_rejects_non_ws_scheme() {
        let err = Connection::connect("http://127.0.0.1:9222")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let err = Connection::connect("not a url").await.unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));
    }
}
