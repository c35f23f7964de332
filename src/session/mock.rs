//! Scripted session and factory doubles for tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::{Value, json};

use crate::browser::Page;
use crate::error::Result;
use crate::identifiers::{PageId, SessionId};

use super::{CdpSession, SessionFactory, SessionRegistry};

// ============================================================================
// MockSession
// ============================================================================

/// Records every command and answers from per-method scripted replies.
///
/// Unscripted methods answer with an empty object, which matches the
/// fire-and-forget commands (focus, input dispatch, set-attribute).
pub(crate) struct MockSession {
    id: SessionId,
    calls: Mutex<Vec<(String, Value)>>,
    replies: Mutex<FxHashMap<String, VecDeque<Value>>>,
    detached: AtomicBool,
}

impl MockSession {
    /// Creates a mock session with the given id.
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: SessionId::new(id),
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(FxHashMap::default()),
            detached: AtomicBool::new(false),
        })
    }

    /// Queues a scripted reply for one future call of `method`.
    pub fn respond(&self, method: &str, reply: Value) {
        self.replies
            .lock()
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Returns all recorded calls in order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }

    /// Returns the recorded method names in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.0.clone()).collect()
    }

    /// Returns `true` once `detach` has been called.
    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CdpSession for MockSession {
    fn id(&self) -> &SessionId {
        &self.id
    }

    async fn send(&self, method: &str, params: Value) -> Result<Value> {
        self.calls.lock().push((method.to_string(), params));
        let reply = self
            .replies
            .lock()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        Ok(reply.unwrap_or_else(|| json!({})))
    }

    async fn detach(&self) -> Result<()> {
        self.detached.store(true, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// MockFactory
// ============================================================================

/// Counts session creations and keeps every created session reachable.
pub(crate) struct MockFactory {
    created: Mutex<Vec<Arc<MockSession>>>,
    serving: Option<Arc<MockSession>>,
}

impl MockFactory {
    /// Creates a factory that mints a fresh mock session per attach.
    pub fn new() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            serving: None,
        }
    }

    /// Creates a factory that always hands out the given session.
    pub fn serving(session: Arc<MockSession>) -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            serving: Some(session),
        }
    }

    /// Returns how many sessions were created.
    pub fn created(&self) -> usize {
        self.created.lock().len()
    }

    /// Returns the nth created session.
    pub fn session(&self, index: usize) -> Arc<MockSession> {
        Arc::clone(&self.created.lock()[index])
    }
}

#[async_trait]
impl SessionFactory for MockFactory {
    async fn create_session(&self, _page: &PageId) -> Result<Arc<dyn CdpSession>> {
        let session = match &self.serving {
            Some(session) => Arc::clone(session),
            None => MockSession::new(&format!("mock-session-{}", self.created() + 1)),
        };
        self.created.lock().push(Arc::clone(&session));
        Ok(session)
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Builds a [`Page`] whose registry serves the given mock session.
pub(crate) fn page_with(session: Arc<MockSession>) -> Page {
    let factory = Arc::new(MockFactory::serving(session));
    let registry = Arc::new(SessionRegistry::new(factory));
    Page::new(PageId::new("TAB-TEST"), registry)
}
