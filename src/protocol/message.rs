//! Wire envelope for DevTools protocol messages.
//!
//! One JSON object per WebSocket text frame, in both directions.
//!
//! # Format
//!
//! Command:
//! ```json
//! { "id": 7, "method": "DOM.focus", "params": { ... }, "sessionId": "..." }
//! ```
//!
//! Response:
//! ```json
//! { "id": 7, "result": { ... }, "sessionId": "..." }
//! { "id": 7, "error": { "code": -32000, "message": "..." } }
//! ```
//!
//! Event (no id):
//! ```json
//! { "method": "Target.detachedFromTarget", "params": { ... } }
//! ```

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::SessionId;

// ============================================================================
// CdpCall
// ============================================================================

/// An outgoing command message.
#[derive(Debug, Clone, Serialize)]
pub struct CdpCall {
    /// Correlation id, unique per connection.
    pub id: u64,

    /// Qualified method name, e.g. `DOM.getContentQuads`.
    pub method: String,

    /// Method parameters.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub params: Value,

    /// Session routing for flattened target sessions.
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

impl CdpCall {
    /// Creates a new command message.
    #[inline]
    #[must_use]
    pub fn new(id: u64, method: &str, params: Value, session_id: Option<SessionId>) -> Self {
        Self {
            id,
            method: method.to_string(),
            params,
            session_id,
        }
    }
}

// ============================================================================
// CdpReply
// ============================================================================

/// An incoming message: command response or event.
///
/// Responses carry `id` and either `result` or `error`; events carry
/// `method` and no `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CdpReply {
    /// Matches the command id; absent for events.
    #[serde(default)]
    pub id: Option<u64>,

    /// Result payload on success.
    #[serde(default)]
    pub result: Option<Value>,

    /// Error payload on failure.
    #[serde(default)]
    pub error: Option<CdpErrorData>,

    /// Event method name; absent for responses.
    #[serde(default)]
    pub method: Option<String>,

    /// Event parameters.
    #[serde(default)]
    pub params: Option<Value>,

    /// Session the message belongs to.
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<SessionId>,
}

impl CdpReply {
    /// Returns `true` if this is an event notification.
    #[inline]
    #[must_use]
    pub fn is_event(&self) -> bool {
        self.id.is_none() && self.method.is_some()
    }

    /// Extracts the result value, mapping browser errors to [`Error::Cdp`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cdp`] verbatim when the browser reported an error.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(err) => Err(Error::cdp(err.code, err.message)),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

// ============================================================================
// CdpErrorData
// ============================================================================

/// Error object attached to a failed command response.
#[derive(Debug, Clone, Deserialize)]
pub struct CdpErrorData {
    /// DevTools protocol error code.
    pub code: i64,

    /// Human-readable message.
    pub message: String,

    /// Optional detail string.
    #[serde(default)]
    pub data: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_serialization() {
        let call = CdpCall::new(
            7,
            "DOM.focus",
            json!({"objectId": "1.2.3"}),
            Some(SessionId::new("SESSION")),
        );
        let text = serde_json::to_string(&call).expect("serialize");

        assert!(text.contains("\"id\":7"));
        assert!(text.contains("DOM.focus"));
        assert!(text.contains("\"sessionId\":\"SESSION\""));
    }

    #[test]
    fn test_call_skips_null_params() {
        let call = CdpCall::new(1, "DOMSnapshot.enable", Value::Null, None);
        let text = serde_json::to_string(&call).expect("serialize");

        assert!(!text.contains("params"));
        assert!(!text.contains("sessionId"));
    }

    #[test]
    fn test_reply_success() {
        let reply: CdpReply =
            serde_json::from_str(r#"{"id": 7, "result": {"nodeId": 42}}"#).expect("parse");

        assert!(!reply.is_event());
        let value = reply.into_result().expect("success");
        assert_eq!(value["nodeId"], 42);
    }

    #[test]
    fn test_reply_error() {
        let reply: CdpReply = serde_json::from_str(
            r#"{"id": 7, "error": {"code": -32000, "message": "No node with given id found"}}"#,
        )
        .expect("parse");

        let err = reply.into_result().unwrap_err();
        assert!(matches!(err, Error::Cdp { code: -32000, .. }));
    }

    #[test]
    fn test_reply_event() {
        let reply: CdpReply = serde_json::from_str(
            r#"{"method": "Target.detachedFromTarget", "params": {"sessionId": "S"}}"#,
        )
        .expect("parse");

        assert!(reply.is_event());
        assert_eq!(reply.method.as_deref(), Some("Target.detachedFromTarget"));
    }
}
