//! Pointer and keyboard dispatch.

use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::identifiers::ElementId;
use crate::session::CdpSession;

use super::Page;

// ============================================================================
// Page - Pointer Input
// ============================================================================

impl Page {
    /// Clicks an element at the center of its content quad.
    ///
    /// Dispatches: mousePressed → mouseReleased.
    pub async fn click_element(&self, element: &ElementId) -> Result<()> {
        let geometry = self.element_geometry(element).await?;
        let (x, y) = geometry.center;
        debug!(page_id = %self.inner.id, element_id = %element, x, y, "Clicking element");

        let session = self.session().await?;
        press_and_release(&*session, x, y).await
    }

    /// Hovers an element at the center of its content quad.
    ///
    /// Dispatches: mouseMoved.
    pub async fn hover_element(&self, element: &ElementId) -> Result<()> {
        let geometry = self.element_geometry(element).await?;
        let (x, y) = geometry.center;
        debug!(page_id = %self.inner.id, element_id = %element, x, y, "Hovering element");

        let session = self.session().await?;
        mouse_move(&*session, x, y).await
    }

    /// Clicks at viewport coordinates.
    ///
    /// A coordinate click is hover-then-click: mouseMoved → mousePressed →
    /// mouseReleased.
    pub async fn click_at(&self, x: f64, y: f64) -> Result<()> {
        debug!(page_id = %self.inner.id, x, y, "Clicking at coordinates");

        let session = self.session().await?;
        mouse_move(&*session, x, y).await?;
        press_and_release(&*session, x, y).await
    }

    /// Hovers at viewport coordinates.
    pub async fn hover_at(&self, x: f64, y: f64) -> Result<()> {
        debug!(page_id = %self.inner.id, x, y, "Hovering at coordinates");

        let session = self.session().await?;
        mouse_move(&*session, x, y).await
    }
}

// ============================================================================
// Page - Keyboard Input
// ============================================================================

impl Page {
    /// Types text into an element.
    ///
    /// Focuses the node, then dispatches one character event per character
    /// in order.
    pub async fn send_keys(&self, element: &ElementId, text: &str) -> Result<()> {
        debug!(page_id = %self.inner.id, element_id = %element, text_len = text.len(), "Sending keys");

        let session = self.session().await?;
        session
            .send("DOM.focus", json!({ "objectId": element.as_str() }))
            .await?;

        for ch in text.chars() {
            session
                .send(
                    "Input.dispatchKeyEvent",
                    json!({ "type": "char", "text": ch.to_string() }),
                )
                .await?;
        }

        Ok(())
    }
}

// ============================================================================
// Dispatch Helpers
// ============================================================================

/// Moves the pointer to the given coordinates.
async fn mouse_move(session: &dyn CdpSession, x: f64, y: f64) -> Result<()> {
    session
        .send(
            "Input.dispatchMouseEvent",
            json!({ "type": "mouseMoved", "x": x, "y": y }),
        )
        .await?;
    Ok(())
}

/// Dispatches a left-button press and release at the given coordinates.
async fn press_and_release(session: &dyn CdpSession, x: f64, y: f64) -> Result<()> {
    session
        .send(
            "Input.dispatchMouseEvent",
            json!({
                "type": "mousePressed",
                "x": x,
                "y": y,
                "button": "left",
                "clickCount": 1,
            }),
        )
        .await?;

    session
        .send(
            "Input.dispatchMouseEvent",
            json!({
                "type": "mouseReleased",
                "x": x,
                "y": y,
                "button": "left",
                "clickCount": 1,
            }),
        )
        .await?;

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
