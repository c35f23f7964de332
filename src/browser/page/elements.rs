//! Element geometry, attributes, and clearing.

use serde_json::{Value, json};
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::{ElementId, NodeId};
use crate::protocol::types::{Geometry, Rect};
use crate::session::CdpSession;

use super::Page;
use super::script::call_function_on;

// ============================================================================
// Page - Geometry
// ============================================================================

impl Page {
    /// Returns an element's on-screen geometry from its first content quad.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] when the node reports no quads (detached
    /// or unrendered).
    pub async fn element_geometry(&self, element: &ElementId) -> Result<Geometry> {
        let session = self.session().await?;
        let result = session
            .send(
                "DOM.getContentQuads",
                json!({ "objectId": element.as_str() }),
            )
            .await?;

        Geometry::from_quads_result(&result)
    }

    /// Returns an element's bounding client rect.
    pub async fn element_rect(&self, element: &ElementId) -> Result<Rect> {
        let session = self.session().await?;
        let object = call_function_on(
            &*session,
            element.as_str(),
            "function() { const r = this.getBoundingClientRect(); \
             return { x: r.x, y: r.y, width: r.width, height: r.height }; }",
            Vec::new(),
            true,
        )
        .await?;

        let value = object
            .value
            .ok_or_else(|| Error::protocol("bounding rect returned no value"))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Returns an element's lowercase tag name.
    pub async fn element_tag_name(&self, element: &ElementId) -> Result<String> {
        let session = self.session().await?;
        let object = call_function_on(
            &*session,
            element.as_str(),
            "function() { return this.tagName.toLowerCase(); }",
            Vec::new(),
            true,
        )
        .await?;

        object
            .value
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::protocol("tag name returned no value"))
    }
}

// ============================================================================
// Page - Attributes
// ============================================================================

impl Page {
    /// Returns an attribute value, or `None` when the node lacks it.
    ///
    /// The wire reports attributes as a flattened name/value list; the value
    /// is the entry immediately following the matching name.
    pub async fn element_attribute(
        &self,
        element: &ElementId,
        name: &str,
    ) -> Result<Option<String>> {
        let session = self.session().await?;
        let node = request_node(&*session, element).await?;

        let result = session
            .send("DOM.getAttributes", json!({ "nodeId": node.value() }))
            .await?;

        let attributes: Vec<String> = result
            .get("attributes")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(attributes
            .chunks_exact(2)
            .find(|pair| pair[0] == name)
            .map(|pair| pair[1].clone()))
    }

    /// Clears an element by setting its `value` attribute to the empty string.
    pub async fn clear_element(&self, element: &ElementId) -> Result<()> {
        debug!(page_id = %self.inner.id, element_id = %element, "Clearing element");

        let session = self.session().await?;
        let node = request_node(&*session, element).await?;

        session
            .send(
                "DOM.setAttributeValue",
                json!({ "nodeId": node.value(), "name": "value", "value": "" }),
            )
            .await?;
        Ok(())
    }
}

// ============================================================================
// Node Resolution
// ============================================================================

/// Converts an element reference into the numeric node id the `DOM.*`
/// attribute methods want.
async fn request_node(session: &dyn CdpSession, element: &ElementId) -> Result<NodeId> {
    let result = session
        .send("DOM.requestNode", json!({ "objectId": element.as_str() }))
        .await?;

    result
        .get("nodeId")
        .and_then(Value::as_i64)
        .map(NodeId::new)
        .ok_or_else(|| Error::protocol("requestNode response missing nodeId"))
}

// ============================================================================
// Tests
// ============================================================================
