//! Core Page struct and session access.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::identifiers::PageId;
use crate::session::{CdpSession, SessionRegistry};

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a page.
pub(crate) struct PageInner {
    /// Page handle.
    pub id: PageId,
    /// Shared session registry.
    pub registry: Arc<SessionRegistry>,
}

// ============================================================================
// Page
// ============================================================================

/// A handle to one browser tab.
///
/// Pages carry the element command surface; the first command attaches the
/// tab's debugging session, later commands reuse it.
#[derive(Clone)]
pub struct Page {
    pub(crate) inner: Arc<PageInner>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.inner.id)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Creates a new page handle.
    pub(crate) fn new(id: PageId, registry: Arc<SessionRegistry>) -> Self {
        Self {
            inner: Arc::new(PageInner { id, registry }),
        }
    }
}

// ============================================================================
// Page - Accessors
// ============================================================================

impl Page {
    /// Returns the page handle.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &PageId {
        &self.inner.id
    }

    /// Detaches this page's session, if one is attached.
    ///
    /// # Errors
    ///
    /// Propagates the detach failure.
    pub async fn detach(&self) -> Result<()> {
        self.inner.registry.detach(&self.inner.id).await
    }
}

// ============================================================================
// Page - Internal
// ============================================================================

impl Page {
    /// Returns this page's session, attaching it on first use.
    pub(crate) async fn session(&self) -> Result<Arc<dyn CdpSession>> {
        self.inner.registry.get_or_create(&self.inner.id).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn test_page_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Page>();
    }

    #[test]
    fn test_page_is_debug() {
        fn assert_debug<T: std::fmt::Debug>() {}
        assert_debug::<Page>();
    }
}
