//! CDP Bridge - WebDriver-style element commands over the DevTools protocol.
//!
//! This library lets a WebDriver-compatible automation client drive a
//! browser tab through a Chrome DevTools Protocol (CDP) debugging session
//! instead of the browser's native WebDriver implementation.
//!
//! # Architecture
//!
//! Two collaborating pieces:
//!
//! - **Session cache**: lazily attaches and memoizes one CDP session per
//!   page handle, detaching it on page close
//! - **Command surface**: stateless [`Page`] methods that perform one to
//!   three protocol round-trips and return plain values
//!
//! Key design principles:
//!
//! - One persistent debugging session per tab, created on first command
//! - Commands reduce to a generic `send(method, params)` primitive behind
//!   the [`CdpSession`] trait, so hosts can supply their own session objects
//! - No retries, no queueing, no timeouts: protocol failures propagate to
//!   the caller unmodified
//!
//! # Quick Start
//!
//! ```no_run
//! use cdp_bridge::{Browser, Result, ScrollTarget, Strategy};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Connect to a browser's DevTools endpoint
//!     let browser = Browser::connect("ws://127.0.0.1:9222/devtools/browser/abc").await?;
//!     let page = browser.page("TARGET-ID");
//!
//!     // Find and interact with elements
//!     let fields = page.find_elements(Strategy::CssSelector, "input[name=q]").await?;
//!     if let Some(field) = fields.first() {
//!         page.send_keys(field, "rust async").await?;
//!         page.click_element(field).await?;
//!     }
//!
//!     // Whole-page operations
//!     page.scroll_page(ScrollTarget::Bottom).await?;
//!     let snapshot = page.snapshot().await?;
//!     println!("viewport: {}x{}", snapshot.viewport.width, snapshot.viewport.height);
//!
//!     browser.close_page(page.id()).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Automation entities: [`Browser`], [`Page`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Wire envelope and derived result types |
//! | [`session`] | Session seam and per-page cache |
//! | [`transport`] | WebSocket connection (bundled [`SessionFactory`]) |

// ============================================================================
// Modules
// ============================================================================

/// Automation entities: Browser, Page, locator strategies.
///
/// This module contains the command surface a WebDriver-style client maps
/// onto:
///
/// - [`Browser`] - entry point owning the session registry
/// - [`Page`] - one browser tab and its element commands
pub mod browser;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for pages, sessions, and DOM nodes.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// DevTools protocol message and result types.
///
/// Wire envelope, geometry/viewport results, and argument marshaling.
pub mod protocol;

/// Session seam and per-page session cache.
///
/// The [`CdpSession`]/[`SessionFactory`] traits and [`SessionRegistry`].
pub mod session;

/// WebSocket transport layer.
///
/// Bundled [`SessionFactory`] speaking the flattened session protocol.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{Browser, Page, ScrollTarget, Strategy};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ElementId, NodeId, PageId, SessionId};

// Protocol types
pub use protocol::{ELEMENT_KEY, Geometry, PageSnapshot, Rect, ScriptArg, Viewport};

// Session types
pub use session::{CdpSession, SessionFactory, SessionRegistry};

// Transport types
pub use transport::Connection;
