//! Whole-page scrolling.

use std::fmt;
use std::str::FromStr;

use serde_json::json;
use tracing::debug;

use crate::error::{Error, Result};

use super::Page;

// ============================================================================
// ScrollTarget
// ============================================================================

/// Destination of a whole-page scroll.
///
/// The four destinations are exhaustive; unrecognized wire strings are
/// rejected when parsing, before any protocol call is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// Scroll to the top of the page.
    Top,
    /// Scroll to the bottom of the page.
    Bottom,
    /// Scroll up by 75% of the viewport height.
    Up,
    /// Scroll down by 75% of the viewport height.
    Down,
}

impl ScrollTarget {
    /// Returns the wire name for this target.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Returns the scroll statement applied to the scrolling element.
    fn statement(self) -> &'static str {
        match self {
            Self::Top => "el.scrollTop = 0;",
            Self::Bottom => "el.scrollTop = el.scrollHeight;",
            Self::Up => "el.scrollTop = el.scrollTop - window.innerHeight * 0.75;",
            Self::Down => "el.scrollTop = el.scrollTop + window.innerHeight * 0.75;",
        }
    }

    /// Builds the full expression evaluated in the page.
    pub(crate) fn expression(self) -> String {
        format!(
            "(() => {{ const el = document.scrollingElement || document.body; {} }})()",
            self.statement()
        )
    }
}

impl FromStr for ScrollTarget {
    type Err = Error;

    /// Parses a wire scroll-target name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedScrollTarget`] for any other value.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(Error::unsupported_scroll_target(other)),
        }
    }
}

impl fmt::Display for ScrollTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Page - Scroll
// ============================================================================

impl Page {
    /// Scrolls the page to the given target.
    ///
    /// Resolves the scrolling element (`document.scrollingElement` falling
    /// back to `document.body`) inside the page and applies the target's
    /// scroll in one evaluation.
    pub async fn scroll_page(&self, target: ScrollTarget) -> Result<()> {
        debug!(page_id = %self.inner.id, %target, "Scrolling page");

        let session = self.session().await?;
        session
            .send(
                "Runtime.evaluate",
                json!({ "expression": target.expression() }),
            )
            .await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
