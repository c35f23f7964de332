//! Element search.

use std::sync::Arc;

use futures_util::future::try_join_all;
use serde_json::{Value, json};
use tracing::debug;

use crate::browser::locator::Strategy;
use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::session::CdpSession;

use super::Page;

// ============================================================================
// Page - Element Search
// ============================================================================

impl Page {
    /// Finds all elements matching a selector at the document root.
    ///
    /// Both supported strategies run `DOM.querySelectorAll`; every matched
    /// node id is resolved to a remote object concurrently. The `iframe`
    /// strategy returns an empty set without issuing any query.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let buttons = page.find_elements(Strategy::CssSelector, "button.primary").await?;
    /// let divs = page.find_elements(Strategy::TagName, "div").await?;
    /// ```
    pub async fn find_elements(
        &self,
        strategy: Strategy,
        selector: &str,
    ) -> Result<Vec<ElementId>> {
        if strategy == Strategy::Iframe {
            debug!(page_id = %self.inner.id, selector, "Iframe lookup short-circuits to empty");
            return Ok(Vec::new());
        }

        debug!(page_id = %self.inner.id, %strategy, selector, "Finding elements");
        let session = self.session().await?;

        let document = session.send("DOM.getDocument", json!({ "depth": 0 })).await?;
        let root = document
            .get("root")
            .and_then(|root| root.get("nodeId"))
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::protocol("getDocument response missing root node"))?;

        let result = session
            .send(
                "DOM.querySelectorAll",
                json!({ "nodeId": root, "selector": selector }),
            )
            .await?;

        let node_ids: Vec<i64> = result
            .get("nodeIds")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default();

        let resolves = node_ids.into_iter().map(|node_id| {
            let session = Arc::clone(&session);
            async move { resolve_node(&*session, node_id).await }
        });

        try_join_all(resolves).await
    }
}

// ============================================================================
// Node Resolution
// ============================================================================

/// Resolves a numeric node id into an element reference.
async fn resolve_node(session: &dyn CdpSession, node_id: i64) -> Result<ElementId> {
    let result = session
        .send("DOM.resolveNode", json!({ "nodeId": node_id }))
        .await?;

    result
        .get("object")
        .and_then(|object| object.get("objectId"))
        .and_then(Value::as_str)
        .map(ElementId::new)
        .ok_or_else(|| Error::protocol("resolved node has no object id"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::{MockSession, page_with};

    #[tokio::test]
    async fn test_find_elements_resolves_every_match() {
        let session = MockSession::new("S");
        session.respond("DOM.getDocument", json!({ "root": { "nodeId": 1 } }));
        session.respond("DOM.querySelectorAll", json!({ "nodeIds": [11, 12] }));
        session.respond(
            "DOM.resolveNode",
            json!({ "object": { "type": "object", "subtype": "node", "objectId": "obj-11" } }),
        );
        session.respond(
            "DOM.resolveNode",
            json!({ "object": { "type": "object", "subtype": "node", "objectId": "obj-12" } }),
        );
        let page = page_with(session.clone());

        let elements = page
            .find_elements(Strategy::CssSelector, "button")
            .await
            .expect("find");

        assert_eq!(
            elements,
            vec![ElementId::new("obj-11"), ElementId::new("obj-12")]
        );
        assert_eq!(
            session.methods(),
            vec![
                "DOM.getDocument",
                "DOM.querySelectorAll",
                "DOM.resolveNode",
                "DOM.resolveNode",
            ]
        );
        assert_eq!(session.calls()[1].1["selector"], "button");
    }

    #[tokio::test]
    async fn test_find_elements_no_matches() {
        let session = MockSession::new("S");
        session.respond("DOM.getDocument", json!({ "root": { "nodeId": 1 } }));
        session.respond("DOM.querySelectorAll", json!({ "nodeIds": [] }));
        let page = page_with(session.clone());

        let elements = page
            .find_elements(Strategy::TagName, "article")
            .await
            .expect("find");
        assert!(elements.is_empty());
    }

    #[tokio::test]
    async fn test_iframe_strategy_issues_no_query() {
        let session = MockSession::new("S");
        let page = page_with(session.clone());

        let elements = page
            .find_elements(Strategy::Iframe, "#any-selector")
            .await
            .expect("find");

        assert!(elements.is_empty());
        assert!(session.calls().is_empty());
    }
}
