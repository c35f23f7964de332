//! Browser entry point.
//!
//! A [`Browser`] owns the per-page session registry and hands out [`Page`]
//! handles. It can sit on the bundled WebSocket [`Connection`] or on any
//! host-supplied [`SessionFactory`].

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::identifiers::PageId;
use crate::session::{SessionFactory, SessionRegistry};
use crate::transport::Connection;

use super::Page;

// ============================================================================
// Browser
// ============================================================================

/// Entry point owning the session registry.
///
/// Cheap to clone; clones share the registry.
///
/// # Example
///
/// ```no_run
/// use cdp_bridge::{Browser, Result};
///
/// # async fn example() -> Result<()> {
/// let browser = Browser::connect("ws://127.0.0.1:9222/devtools/browser/abc").await?;
/// let page = browser.page("TARGET-ID");
///
/// page.scroll_page(cdp_bridge::ScrollTarget::Bottom).await?;
/// browser.close_page(page.id()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Browser {
    /// Shared session registry.
    registry: Arc<SessionRegistry>,
}

impl fmt::Debug for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Browser")
            .field("sessions", &self.registry.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Browser - Constructors
// ============================================================================

impl Browser {
    /// Connects to a DevTools WebSocket endpoint.
    ///
    /// # Errors
    ///
    /// Propagates connection establishment failures.
    pub async fn connect(ws_url: &str) -> Result<Self> {
        let connection = Connection::connect(ws_url).await?;
        Ok(Self::with_factory(Arc::new(connection)))
    }

    /// Creates a browser on a host-supplied session factory.
    ///
    /// Use this when an embedding automation framework already owns the
    /// debugging transport and hands out session objects.
    #[must_use]
    pub fn with_factory(factory: Arc<dyn SessionFactory>) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new(factory)),
        }
    }
}

// ============================================================================
// Browser - Pages
// ============================================================================

impl Browser {
    /// Returns a handle for the given page.
    ///
    /// No session is attached until the first command runs.
    #[must_use]
    pub fn page(&self, id: impl Into<PageId>) -> Page {
        Page::new(id.into(), Arc::clone(&self.registry))
    }

    /// Detaches a page's session and drops it from the registry.
    ///
    /// A no-op when the page never attached.
    ///
    /// # Errors
    ///
    /// Propagates the detach failure.
    pub async fn close_page(&self, id: &PageId) -> Result<()> {
        debug!(page_id = %id, "Closing page");
        self.registry.detach(id).await
    }

    /// Returns the number of pages with live sessions.
    #[inline]
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.registry.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::MockFactory;

    #[test]
    fn test_browser_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Browser>();
    }

    #[tokio::test]
    async fn test_page_handle_attaches_lazily() {
        let factory = Arc::new(MockFactory::new());
        let browser = Browser::with_factory(factory.clone());

        let page = browser.page("TAB-1");
        assert_eq!(factory.created(), 0);
        assert_eq!(browser.session_count(), 0);

        page.session().await.expect("attach");
        assert_eq!(factory.created(), 1);
        assert_eq!(browser.session_count(), 1);
    }

    #[tokio::test]
    async fn test_close_page_detaches_session() {
        let factory = Arc::new(MockFactory::new());
        let browser = Browser::with_factory(factory.clone());

        let page = browser.page("TAB-1");
        page.session().await.expect("attach");

        browser.close_page(page.id()).await.expect("close");
        assert_eq!(browser.session_count(), 0);
        assert!(factory.session(0).is_detached());
    }

    #[tokio::test]
    async fn test_close_unknown_page_is_noop() {
        let browser = Browser::with_factory(Arc::new(MockFactory::new()));
        browser
            .close_page(&PageId::new("NEVER"))
            .await
            .expect("no-op");
    }
}
