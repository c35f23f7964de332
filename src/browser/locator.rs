//! Element locator strategies.
//!
//! Only selector-based lookups are executed against the page; both
//! supported strategies go through `DOM.querySelectorAll` (a bare tag name
//! is a valid CSS selector). The `iframe` strategy is accepted but never
//! queried: the backend cannot search inside a switched frame, so iframe
//! lookups short-circuit to an empty result.
//!
//! # Example
//!
//! ```
//! use cdp_bridge::Strategy;
//!
//! let strategy: Strategy = "css selector".parse().unwrap();
//! assert_eq!(strategy, Strategy::CssSelector);
//!
//! assert!("xpath".parse::<Strategy>().is_err());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ============================================================================
// Strategy
// ============================================================================

/// Element locator strategy, using WebDriver strategy names on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// CSS selector query (`"css selector"`).
    CssSelector,
    /// Tag name query (`"tag name"`); executed as a CSS selector.
    TagName,
    /// Iframe lookup (`"iframe"`); always yields an empty result without
    /// issuing a query.
    Iframe,
}

impl Strategy {
    /// Returns the WebDriver wire name for this strategy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CssSelector => "css selector",
            Self::TagName => "tag name",
            Self::Iframe => "iframe",
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    /// Parses a WebDriver strategy name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedStrategy`] for every other strategy
    /// (`xpath`, `link text`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "css selector" => Ok(Self::CssSelector),
            "tag name" => Ok(Self::TagName),
            "iframe" => Ok(Self::Iframe),
            other => Err(Error::unsupported_strategy(other)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
