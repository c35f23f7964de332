//! Per-page session cache with create-on-miss semantics.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::Result;
use crate::identifiers::PageId;

use super::{CdpSession, SessionFactory};

// ============================================================================
// SessionRegistry
// ============================================================================

/// Caches one debugging session per page handle.
///
/// Owned by whatever manages page lifetimes (normally the
/// [`Browser`](crate::Browser)); there is no process-wide state. The first
/// request for a page attaches a session through the [`SessionFactory`];
/// later requests return the memoized one until [`detach`](Self::detach)
/// removes it.
pub struct SessionRegistry {
    /// Session creation hook.
    factory: Arc<dyn SessionFactory>,

    /// Live sessions by page handle. Never locked across an await point.
    sessions: Mutex<FxHashMap<PageId, Arc<dyn CdpSession>>>,
}

impl SessionRegistry {
    /// Creates an empty registry backed by the given factory.
    #[must_use]
    pub fn new(factory: Arc<dyn SessionFactory>) -> Self {
        Self {
            factory,
            sessions: Mutex::new(FxHashMap::default()),
        }
    }

    /// Returns the session for a page, attaching one on first access.
    ///
    /// Concurrent first access for the same unseen page may attach twice;
    /// the map re-check keeps the first inserted session and detaches the
    /// duplicate, so at most one session per page is ever cached.
    ///
    /// # Errors
    ///
    /// Propagates the factory's attach failure.
    pub async fn get_or_create(&self, page: &PageId) -> Result<Arc<dyn CdpSession>> {
        if let Some(session) = self.sessions.lock().get(page) {
            return Ok(Arc::clone(session));
        }

        debug!(page_id = %page, "Attaching session");
        let created = self.factory.create_session(page).await?;

        let raced = {
            let mut sessions = self.sessions.lock();
            match sessions.get(page) {
                Some(winner) => Some(Arc::clone(winner)),
                None => {
                    sessions.insert(page.clone(), Arc::clone(&created));
                    None
                }
            }
        };

        if let Some(winner) = raced {
            debug!(page_id = %page, "Lost attach race, detaching duplicate session");
            if let Err(e) = created.detach().await {
                debug!(page_id = %page, error = %e, "Failed to detach duplicate session");
            }
            return Ok(winner);
        }

        Ok(created)
    }

    /// Detaches a page's session and removes the cache entry.
    ///
    /// A no-op when the page has no session.
    ///
    /// # Errors
    ///
    /// Propagates the detach failure; the cache entry is removed regardless.
    pub async fn detach(&self, page: &PageId) -> Result<()> {
        let session = self.sessions.lock().remove(page);
        match session {
            Some(session) => {
                debug!(page_id = %page, session_id = %session.id(), "Detaching session");
                session.detach().await
            }
            None => Ok(()),
        }
    }

    /// Returns `true` if the page currently has a cached session.
    #[inline]
    #[must_use]
    pub fn contains(&self, page: &PageId) -> bool {
        self.sessions.lock().contains_key(page)
    }

    /// Returns the number of cached sessions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Returns `true` if no sessions are cached.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::MockFactory;

    #[tokio::test]
    async fn test_first_access_creates_exactly_one_session() {
        let factory = Arc::new(MockFactory::new());
        let registry = SessionRegistry::new(factory.clone());
        let page = PageId::new("TAB-1");

        let session = registry.get_or_create(&page).await.expect("create");

        assert_eq!(factory.created(), 1);
        assert!(registry.contains(&page));
        assert_eq!(session.id().as_str(), "mock-session-1");
    }

    #[tokio::test]
    async fn test_repeat_access_returns_identical_session() {
        let factory = Arc::new(MockFactory::new());
        let registry = SessionRegistry::new(factory.clone());
        let page = PageId::new("TAB-1");

        let first = registry.get_or_create(&page).await.expect("create");
        let second = registry.get_or_create(&page).await.expect("memoized");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(factory.created(), 1);
    }

    #[tokio::test]
    async fn test_distinct_pages_get_distinct_sessions() {
        let factory = Arc::new(MockFactory::new());
        let registry = SessionRegistry::new(factory.clone());

        let a = registry
            .get_or_create(&PageId::new("TAB-A"))
            .await
            .expect("create");
        let b = registry
            .get_or_create(&PageId::new("TAB-B"))
            .await
            .expect("create");

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(factory.created(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_detach_then_access_creates_new_session() {
        let factory = Arc::new(MockFactory::new());
        let registry = SessionRegistry::new(factory.clone());
        let page = PageId::new("TAB-1");

        let first = registry.get_or_create(&page).await.expect("create");
        registry.detach(&page).await.expect("detach");

        assert!(!registry.contains(&page));
        assert!(factory.session(0).is_detached());

        let second = registry.get_or_create(&page).await.expect("recreate");
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(factory.created(), 2);
    }

    #[tokio::test]
    async fn test_detach_unknown_page_is_noop() {
        let factory = Arc::new(MockFactory::new());
        let registry = SessionRegistry::new(factory.clone());

        registry
            .detach(&PageId::new("NEVER-SEEN"))
            .await
            .expect("no-op");
        assert_eq!(factory.created(), 0);
        assert!(registry.is_empty());
    }
}
