//! Session seam and per-page session cache.
//!
//! The command layer talks to the browser exclusively through a generic
//! `send(method, params)` primitive. The two traits here express that seam:
//!
//! | Trait | Role |
//! |-------|------|
//! | [`CdpSession`] | One attached debugging session; sends routed commands |
//! | [`SessionFactory`] | Host hook that attaches a session to a page handle |
//!
//! The bundled [`Connection`](crate::transport::Connection) implements
//! [`SessionFactory`] over a WebSocket; any host automation framework that
//! can hand out a session object can implement it instead.
//!
//! [`SessionRegistry`] memoizes one session per page handle and detaches it
//! on page close.

// ============================================================================
// Submodules
// ============================================================================

/// Per-page session cache.
pub mod registry;

#[cfg(test)]
pub(crate) mod mock;

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::identifiers::{PageId, SessionId};

// ============================================================================
// Re-exports
// ============================================================================

pub use registry::SessionRegistry;

// ============================================================================
// CdpSession
// ============================================================================

/// One attached debugging session for a single page.
///
/// All element commands reduce to calls through this trait. Transient
/// protocol failures propagate to the caller unmodified; nothing at this
/// layer retries, queues, or times out.
#[async_trait]
pub trait CdpSession: Send + Sync {
    /// Returns the session id.
    fn id(&self) -> &SessionId;

    /// Sends one command and returns the browser's result object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cdp`](crate::Error::Cdp) for browser-reported
    /// failures and a transport error when the connection is gone.
    async fn send(&self, method: &str, params: Value) -> Result<Value>;

    /// Detaches this session from its target.
    async fn detach(&self) -> Result<()>;
}

// ============================================================================
// SessionFactory
// ============================================================================

/// Host hook that creates debugging sessions for page handles.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Attaches a new session to the given page.
    async fn create_session(&self, page: &PageId) -> Result<Arc<dyn CdpSession>>;
}
