//! Derived result types: geometry, rects, viewport, and page snapshots.

// ============================================================================
// Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

// ============================================================================
// Geometry
// ============================================================================

/// On-screen geometry of an element, derived from one content quad.
///
/// A content quad is eight numbers: the x/y pairs of the four corners in
/// clockwise order starting top-left. Width, height, and center are derived
/// once; the value is ephemeral and never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Corner coordinates as (x, y), clockwise from top-left.
    pub corners: [(f64, f64); 4],
    /// Width along the top edge.
    pub width: f64,
    /// Height along the left edge.
    pub height: f64,
    /// Arithmetic center of the four corners.
    pub center: (f64, f64),
}

impl Geometry {
    /// Builds geometry from a raw content quad.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] when the quad has fewer than eight values.
    pub fn from_quad(quad: &[f64]) -> Result<Self> {
        if quad.len() < 8 {
            return Err(Error::protocol(format!(
                "content quad has {} values, expected 8",
                quad.len()
            )));
        }

        let corners = [
            (quad[0], quad[1]),
            (quad[2], quad[3]),
            (quad[4], quad[5]),
            (quad[6], quad[7]),
        ];

        let center_x = corners.iter().map(|c| c.0).sum::<f64>() / 4.0;
        let center_y = corners.iter().map(|c| c.1).sum::<f64>() / 4.0;

        Ok(Self {
            corners,
            width: (corners[1].0 - corners[0].0).abs(),
            height: (corners[3].1 - corners[0].1).abs(),
            center: (center_x, center_y),
        })
    }

    /// Builds geometry from the first quad of a `DOM.getContentQuads` result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] when no quads were reported, which happens
    /// for detached or unrendered nodes.
    pub fn from_quads_result(result: &Value) -> Result<Self> {
        let quad: Vec<f64> = result
            .get("quads")
            .and_then(Value::as_array)
            .and_then(|quads| quads.first())
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_f64).collect())
            .ok_or_else(|| Error::protocol("element has no content quads"))?;

        Self::from_quad(&quad)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// Bounding client rect of an element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    /// X offset from the viewport origin.
    pub x: f64,
    /// Y offset from the viewport origin.
    pub y: f64,
    /// Rect width.
    pub width: f64,
    /// Rect height.
    pub height: f64,
}

// ============================================================================
// Viewport
// ============================================================================

/// Viewport metadata reported by the page.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Inner width in CSS pixels.
    pub width: f64,
    /// Inner height in CSS pixels.
    pub height: f64,
    /// Device pixel ratio.
    pub device_pixel_ratio: f64,
}

// ============================================================================
// PageSnapshot
// ============================================================================

/// Combined page state: DOM snapshot, screenshot, and viewport metadata.
///
/// The three pieces are fetched concurrently and joined once all complete.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// Raw `DOMSnapshot.captureSnapshot` result.
    pub dom: Value,
    /// Base64-encoded screenshot image.
    pub screenshot: String,
    /// Viewport dimensions and pixel ratio.
    pub viewport: Viewport,
}

impl PageSnapshot {
    /// Decodes the screenshot into raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] when the browser sent invalid base64.
    pub fn screenshot_bytes(&self) -> Result<Vec<u8>> {
        Base64Standard
            .decode(&self.screenshot)
            .map_err(|e| Error::protocol(format!("invalid screenshot base64: {e}")))
    }
}

// ============================================================================
// RemoteObject
// ============================================================================

/// Slice of a Runtime remote object this crate inspects.
///
/// Mirror of the `Runtime.RemoteObject` wire shape, limited to the fields
/// needed to classify evaluation results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// Object type, e.g. `object`, `string`, `undefined`.
    #[serde(rename = "type")]
    pub object_type: String,

    /// Object subtype, e.g. `node`, `nodelist`, `null`.
    #[serde(default)]
    pub subtype: Option<String>,

    /// Constructor name, e.g. `HTMLHtmlElement`.
    #[serde(default)]
    pub class_name: Option<String>,

    /// Primitive value when returned by value.
    #[serde(default)]
    pub value: Option<Value>,

    /// Remote object id when returned by reference.
    #[serde(default)]
    pub object_id: Option<String>,
}

impl RemoteObject {
    /// Returns `true` if this object is a `NodeList`.
    #[inline]
    #[must_use]
    pub fn is_node_list(&self) -> bool {
        self.subtype.as_deref() == Some("nodelist")
    }

    /// Returns `true` if this object is the document's root `<html>` element.
    #[inline]
    #[must_use]
    pub fn is_html_element(&self) -> bool {
        self.class_name.as_deref() == Some("HTMLHtmlElement")
    }
}

// ============================================================================
// Tests
// ============================================================================
