//! Combined DOM/screenshot/viewport capture.

use serde_json::{Value, json};
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::types::{PageSnapshot, Viewport};

use super::Page;

// ============================================================================
// Constants
// ============================================================================

/// Expression yielding the viewport metadata object.
const VIEWPORT_EXPRESSION: &str = "({ width: window.innerWidth, \
     height: window.innerHeight, \
     devicePixelRatio: window.devicePixelRatio })";

// ============================================================================
// Page - Snapshot
// ============================================================================

impl Page {
    /// Captures the page's DOM snapshot, screenshot, and viewport metadata.
    ///
    /// The three fetches are issued concurrently with no ordering between
    /// them; the combined result is returned once all complete.
    pub async fn snapshot(&self) -> Result<PageSnapshot> {
        debug!(page_id = %self.inner.id, "Capturing page snapshot");

        let session = self.session().await?;
        let (dom, screenshot, viewport) = tokio::try_join!(
            session.send("DOMSnapshot.captureSnapshot", json!({ "computedStyles": [] })),
            session.send("Page.captureScreenshot", json!({})),
            session.send(
                "Runtime.evaluate",
                json!({ "expression": VIEWPORT_EXPRESSION, "returnByValue": true }),
            ),
        )?;

        let screenshot = screenshot
            .get("data")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::protocol("screenshot response missing data"))?
            .to_string();

        let viewport: Viewport = viewport
            .get("result")
            .and_then(|result| result.get("value"))
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .ok_or_else(|| Error::protocol("viewport evaluation returned no value"))?;

        Ok(PageSnapshot {
            dom,
            screenshot,
            viewport,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::{MockSession, page_with};

    #[tokio::test]
    async fn test_snapshot_joins_all_three_fetches() {
        let session = MockSession::new("S");
        session.respond(
            "DOMSnapshot.captureSnapshot",
            json!({ "documents": [], "strings": [] }),
        );
        session.respond("Page.captureScreenshot", json!({ "data": "aGVsbG8=" }));
        session.respond(
            "Runtime.evaluate",
            json!({ "result": { "type": "object", "value": {
                "width": 1280.0, "height": 720.0, "devicePixelRatio": 2.0
            }}}),
        );
        let page = page_with(session.clone());

        let snapshot = page.snapshot().await.expect("snapshot");

        assert_eq!(snapshot.screenshot, "aGVsbG8=");
        assert_eq!(snapshot.viewport.width, 1280.0);
        assert_eq!(snapshot.viewport.height, 720.0);
        assert_eq!(snapshot.viewport.device_pixel_ratio, 2.0);
        assert_eq!(snapshot.dom["documents"], json!([]));
        assert_eq!(snapshot.screenshot_bytes().expect("decode"), b"hello");

        let mut methods = session.methods();
        methods.sort();
        assert_eq!(
            methods,
            vec![
                "DOMSnapshot.captureSnapshot",
                "Page.captureScreenshot",
                "Runtime.evaluate",
            ]
        );
    }

    #[tokio::test]
    async fn test_snapshot_missing_screenshot_data_fails() {
        let session = MockSession::new("S");
        session.respond("DOMSnapshot.captureSnapshot", json!({ "documents": [] }));
        session.respond("Page.captureScreenshot", json!({}));
        session.respond(
            "Runtime.evaluate",
            json!({ "result": { "type": "object", "value": {
                "width": 800.0, "height": 600.0, "devicePixelRatio": 1.0
            }}}),
        );
        let page = page_with(session.clone());

        let err = page.snapshot().await.unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));
    }
}
