//! Page handle and element commands.
//!
//! Each [`Page`] wraps one page handle and the shared session registry.
//! Every command obtains the page's session from the registry (attaching it
//! on first use) and performs one to three protocol round-trips; no command
//! retries, queues, or caches anything beyond the session itself.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Page struct and session access |
//! | `input` | Pointer and keyboard dispatch |
//! | `elements` | Element geometry, attributes, clearing |
//! | `query` | Element search |
//! | `script` | JavaScript execution |
//! | `scroll` | Whole-page scrolling |
//! | `snapshot` | Combined DOM/screenshot/viewport capture |
//!
//! # Example
//!
//! ```ignore
//! let page = browser.page("TARGET-ID");
//!
//! let inputs = page.find_elements(Strategy::CssSelector, "input[name=q]").await?;
//! let input = &inputs[0];
//!
//! page.send_keys(input, "rust async").await?;
//! page.click_element(input).await?;
//! page.scroll_page(ScrollTarget::Down).await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod core;
mod elements;
mod input;
mod query;
mod script;
mod scroll;
mod snapshot;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::Page;
pub use scroll::ScrollTarget;
