//! DevTools protocol message and result types.
//!
//! This module defines the wire envelope for commands sent to the browser
//! and the typed slices of responses this crate cares about.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | [`CdpCall`] | Local → Browser | Command with numeric id |
//! | [`CdpReply`] | Browser → Local | Response or event |
//!
//! Commands are named `Domain.method` (`DOM.focus`, `Input.dispatchMouseEvent`)
//! and carry free-form JSON params; responses are correlated by id. Messages
//! targeting an attached page additionally carry a `sessionId`.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `message` | Wire envelope types |
//! | `types` | Geometry, viewport, and snapshot results |
//! | `marshal` | Script argument and element-reference marshaling |

// ============================================================================
// Submodules
// ============================================================================

/// Wire envelope types.
pub mod message;

/// Derived result types.
pub mod types;

/// Script argument marshaling.
pub mod marshal;

// ============================================================================
// Re-exports
// ============================================================================

pub use marshal::{ELEMENT_KEY, ScriptArg, unwrap_element, wrap_element};
pub use message::{CdpCall, CdpErrorData, CdpReply};
pub use types::{Geometry, PageSnapshot, Rect, RemoteObject, Viewport};
