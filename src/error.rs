//! Error types for the CDP bridge.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use cdp_bridge::{Result, Error};
//!
//! async fn example(page: &Page, element: &ElementId) -> Result<()> {
//!     page.click_element(element).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Connection | [`Error::Connection`], [`Error::ConnectionClosed`] |
//! | Protocol | [`Error::Cdp`], [`Error::Protocol`] |
//! | Unsupported enum | [`Error::UnsupportedStrategy`], [`Error::UnsupportedScrollTarget`] |
//! | Execution | [`Error::Script`] |
//! | External | [`Error::Json`], [`Error::WebSocket`] |
//!
//! Unsupported-enum errors are raised synchronously at the parse boundary.
//! Protocol errors are whatever the browser reports, propagated unmodified;
//! nothing at this layer retries or reinterprets them. Missing data that the
//! caller can reasonably expect to be absent (an unset attribute, a detach
//! for an unknown page) is modeled as `Option`/no-op, not as an error.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket connection failed.
    ///
    /// Returned when the debugging endpoint cannot be reached.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Connection closed while a command was in flight.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Error object reported by the browser for a command.
    ///
    /// Carries the DevTools error code and message verbatim.
    #[error("CDP error {code}: {message}")]
    Cdp {
        /// DevTools protocol error code.
        code: i64,
        /// Error message from the browser.
        message: String,
    },

    /// Protocol violation or unexpected response shape.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // Unsupported Enumerations
    // ========================================================================
    /// Locator strategy is not supported by this backend.
    ///
    /// Only `css selector` and `tag name` queries are executed (plus the
    /// `iframe` pass-through); everything else fails here.
    #[error("Unsupported locator strategy: {strategy}")]
    UnsupportedStrategy {
        /// The rejected strategy string.
        strategy: String,
    },

    /// Scroll target is not one of the recognized values.
    #[error("Unsupported scroll target: {target}")]
    UnsupportedScrollTarget {
        /// The rejected target string.
        target: String,
    },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// JavaScript raised an exception during evaluation.
    #[error("Script error: {message}")]
    Script {
        /// Exception text from the page.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a CDP error from a browser-reported code and message.
    #[inline]
    pub fn cdp(code: i64, message: impl Into<String>) -> Self {
        Self::Cdp {
            code,
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an unsupported-strategy error.
    #[inline]
    pub fn unsupported_strategy(strategy: impl Into<String>) -> Self {
        Self::UnsupportedStrategy {
            strategy: strategy.into(),
        }
    }

    /// Creates an unsupported-scroll-target error.
    #[inline]
    pub fn unsupported_scroll_target(target: impl Into<String>) -> Self {
        Self::UnsupportedScrollTarget {
            target: target.into(),
        }
    }

    /// Creates a script error.
    #[inline]
    pub fn script(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::ConnectionClosed | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this error was reported by the browser.
    #[inline]
    #[must_use]
    pub fn is_cdp_error(&self) -> bool {
        matches!(self, Self::Cdp { .. })
    }

    /// Returns `true` if this is an unsupported-enumeration error.
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedStrategy { .. } | Self::UnsupportedScrollTarget { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
