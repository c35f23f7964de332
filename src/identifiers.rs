//! Type-safe identifiers for pages, sessions, and DOM nodes.
//!
//! Newtype wrappers prevent mixing incompatible identifiers at compile time.
//!
//! | Type | Wire representation | Role |
//! |------|--------------------|------|
//! | [`PageId`] | string (CDP target id) | cache key for one browser tab |
//! | [`SessionId`] | string | one attached debugging session |
//! | [`ElementId`] | string (remote object id) | reference to a remote DOM node |
//! | [`NodeId`] | integer | numeric DOM node id used by `DOM.*` methods |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// PageId
// ============================================================================

/// Opaque identifier for a browser tab.
///
/// Supplied by the caller; used as the session-cache key and passed through
/// to the underlying debugging endpoint as a target id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Creates a new page id.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// SessionId
// ============================================================================

/// Identifier for one attached debugging session.
///
/// Returned by `Target.attachToTarget` and carried on every routed message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new session id.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ElementId
// ============================================================================

/// Reference to a remote DOM node.
///
/// Holds the remote object id handed out by `DOM.resolveNode`. No local DOM
/// state is attached; the id is a handle into the browser's object graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Creates a new element id.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// NodeId
// ============================================================================

/// Numeric DOM node id.
///
/// The `DOM.*` attribute methods address nodes by integer id; element
/// references are converted at the boundary via `DOM.requestNode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(i64);

impl NodeId {
    /// Creates a new node id.
    #[inline]
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[inline]
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_from_str() {
        let id: PageId = "ABC123".into();
        assert_eq!(id.as_str(), "ABC123");
        assert_eq!(id.to_string(), "ABC123");
    }

    #[test]
    fn test_element_id_roundtrip() {
        let id = ElementId::new("7706.1.42");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"7706.1.42\"");
        let back: ElementId = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, id);
    }

    #[test]
    fn test_node_id_is_copy() {
        let id = NodeId::new(42);
        let copy = id;
        assert_eq!(id.value(), copy.value());
    }
}
