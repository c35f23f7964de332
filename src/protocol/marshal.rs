//! Script argument and element-reference marshaling.
//!
//! WebDriver clients exchange element references as JSON objects nesting the
//! remote object id under a fixed key. Script arguments cross the boundary
//! in one of three ways: primitives by value, element references by remote
//! object id, and everything else as `undefined`.

// ============================================================================
// Imports
// ============================================================================

use serde_json::{Value, json};

use crate::identifiers::ElementId;

// ============================================================================
// Constants
// ============================================================================

/// Property name under which element references are nested.
///
/// The W3C WebDriver element identifier, kept for compatibility with
/// WebDriver-style clients.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

// ============================================================================
// Element Reference Wrapping
// ============================================================================

/// Wraps a remote object id into a WebDriver element-reference object.
#[inline]
#[must_use]
pub fn wrap_element(object_id: &str) -> Value {
    json!({ ELEMENT_KEY: object_id })
}

/// Extracts the element id from a WebDriver element-reference object.
///
/// Returns `None` when the value is not an element reference.
#[must_use]
pub fn unwrap_element(value: &Value) -> Option<ElementId> {
    value
        .as_object()
        .and_then(|map| map.get(ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(ElementId::new)
}

// ============================================================================
// ScriptArg
// ============================================================================

/// A script argument, classified for the protocol crossing.
///
/// | Variant | Wire form |
/// |---------|-----------|
/// | `Primitive` | `{"value": ...}` |
/// | `Element` | `{"objectId": "..."}` |
/// | `Undefined` | `{}` |
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptArg {
    /// String, number, or boolean passed by value.
    Primitive(Value),
    /// Element reference passed by remote object id.
    Element(ElementId),
    /// Anything else becomes an undefined argument.
    Undefined,
}

impl ScriptArg {
    /// Classifies a caller-supplied JSON value.
    #[must_use]
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Self::Primitive(value.clone()),
            other => match unwrap_element(other) {
                Some(id) => Self::Element(id),
                None => Self::Undefined,
            },
        }
    }

    /// Renders this argument as a `Runtime.CallArgument`.
    #[must_use]
    pub fn to_call_argument(&self) -> Value {
        match self {
            Self::Primitive(value) => json!({ "value": value }),
            Self::Element(id) => json!({ "objectId": id.as_str() }),
            Self::Undefined => json!({}),
        }
    }
}

/// Classifies and renders a full argument list.
#[must_use]
pub fn call_arguments(args: &[Value]) -> Vec<Value> {
    args.iter()
        .map(|arg| ScriptArg::classify(arg).to_call_argument())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
