//! JavaScript execution.

use serde_json::{Value, json};
use tracing::debug;

use crate::error::{Error, Result};
use crate::protocol::marshal::{call_arguments, wrap_element};
use crate::protocol::types::RemoteObject;
use crate::session::CdpSession;

use super::Page;

// ============================================================================
// Page - Script Execution
// ============================================================================

impl Page {
    /// Executes script text against the page's global object.
    ///
    /// The script is wrapped in a function, so it may use `return` and reach
    /// its arguments through `arguments[n]`. Arguments marshal per
    /// [`ScriptArg`](crate::protocol::marshal::ScriptArg): primitives by
    /// value, element references by remote object id, everything else as
    /// `undefined`.
    ///
    /// Results come back as:
    ///
    /// - a `NodeList` → an array of element references, one per indexed own
    ///   property
    /// - the root `<html>` element → a single element reference
    /// - anything else → the value by copy
    ///
    /// # Example
    ///
    /// ```ignore
    /// let title = page.execute_script("return document.title", &[]).await?;
    /// let links = page
    ///     .execute_script("return document.querySelectorAll(arguments[0])", &[json!("a")])
    ///     .await?;
    /// ```
    pub async fn execute_script(&self, script: &str, args: &[Value]) -> Result<Value> {
        debug!(page_id = %self.inner.id, script_len = script.len(), "Executing script");

        let session = self.session().await?;

        let evaluated = session
            .send("Runtime.evaluate", json!({ "expression": "window" }))
            .await?;
        let global_id = evaluated
            .get("result")
            .and_then(|result| result.get("objectId"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::protocol("global object has no object id"))?;

        let declaration = format!("function() {{ {script} }}");
        let object = call_function_on(
            &*session,
            global_id,
            &declaration,
            call_arguments(args),
            false,
        )
        .await?;

        if object.is_node_list() {
            let list_id = object
                .object_id
                .ok_or_else(|| Error::protocol("node list has no object id"))?;
            return node_list_to_references(&*session, &list_id).await;
        }

        if object.is_html_element() {
            let object_id = object
                .object_id
                .ok_or_else(|| Error::protocol("element has no object id"))?;
            return Ok(wrap_element(&object_id));
        }

        match object.object_id {
            // Non-node objects come back by reference; fetch a copy.
            Some(object_id) => {
                let copied = call_function_on(
                    &*session,
                    &object_id,
                    "function() { return this; }",
                    Vec::new(),
                    true,
                )
                .await?;
                Ok(copied.value.unwrap_or(Value::Null))
            }
            None => Ok(object.value.unwrap_or(Value::Null)),
        }
    }
}

// ============================================================================
// Result Expansion
// ============================================================================

/// Expands a `NodeList` into element references, one per indexed own
/// property.
async fn node_list_to_references(session: &dyn CdpSession, list_id: &str) -> Result<Value> {
    let properties = session
        .send(
            "Runtime.getProperties",
            json!({ "objectId": list_id, "ownProperties": true }),
        )
        .await?;

    let references: Vec<Value> = properties
        .get("result")
        .and_then(Value::as_array)
        .map(|descriptors| {
            descriptors
                .iter()
                .filter(|descriptor| {
                    descriptor
                        .get("name")
                        .and_then(Value::as_str)
                        .is_some_and(|name| name.parse::<usize>().is_ok())
                })
                .filter_map(|descriptor| {
                    descriptor
                        .get("value")
                        .and_then(|value| value.get("objectId"))
                        .and_then(Value::as_str)
                })
                .map(wrap_element)
                .collect()
        })
        .unwrap_or_default();

    Ok(Value::Array(references))
}

// ============================================================================
// Function Invocation
// ============================================================================

/// Calls a function on a remote object and returns the result object.
///
/// # Errors
///
/// Returns [`Error::Script`] when the page raised an exception.
pub(super) async fn call_function_on(
    session: &dyn CdpSession,
    object_id: &str,
    declaration: &str,
    arguments: Vec<Value>,
    return_by_value: bool,
) -> Result<RemoteObject> {
    let result = session
        .send(
            "Runtime.callFunctionOn",
            json!({
                "functionDeclaration": declaration,
                "objectId": object_id,
                "arguments": arguments,
                "returnByValue": return_by_value,
            }),
        )
        .await?;

    if let Some(details) = result.get("exceptionDetails") {
        let message = details
            .get("exception")
            .and_then(|exception| exception.get("description"))
            .and_then(Value::as_str)
            .or_else(|| details.get("text").and_then(Value::as_str))
            .unwrap_or("unknown script exception");
        return Err(Error::script(message));
    }

    let object = result
        .get("result")
        .cloned()
        .ok_or_else(|| Error::protocol("callFunctionOn response missing result"))?;
    Ok(serde_json::from_value(object)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ELEMENT_KEY;
    use crate::session::mock::{MockSession, page_with};

    fn global_reply() -> Value {
        json!({ "result": { "type": "object", "className": "Window", "objectId": "global-1" } })
    }

    #[tokio::test]
    async fn test_primitive_result_returns_by_value() {
        let session = MockSession::new("S");
        session.respond("Runtime.evaluate", global_reply());
        session.respond(
            "Runtime.callFunctionOn",
            json!({ "result": { "type": "string", "value": "Example" } }),
        );
        let page = page_with(session.clone());

        let value = page
            .execute_script("return document.title", &[])
            .await
            .expect("script");

        assert_eq!(value, json!("Example"));
        let calls = session.calls();
        assert_eq!(
            calls[1].1["functionDeclaration"],
            "function() { return document.title }"
        );
        assert_eq!(calls[1].1["objectId"], "global-1");
        assert_eq!(calls[1].1["returnByValue"], false);
    }

    #[tokio::test]
    async fn test_arguments_are_marshaled() {
        let session = MockSession::new("S");
        session.respond("Runtime.evaluate", global_reply());
        session.respond(
            "Runtime.callFunctionOn",
            json!({ "result": { "type": "undefined" } }),
        );
        let page = page_with(session.clone());

        let args = vec![json!(7), json!({ ELEMENT_KEY: "el-9" }), json!(["x"])];
        page.execute_script("arguments[1].focus()", &args)
            .await
            .expect("script");

        let sent = &session.calls()[1].1["arguments"];
        assert_eq!(sent[0], json!({ "value": 7 }));
        assert_eq!(sent[1], json!({ "objectId": "el-9" }));
        assert_eq!(sent[2], json!({}));
    }

    #[tokio::test]
    async fn test_node_list_expands_to_element_references() {
        let session = MockSession::new("S");
        session.respond("Runtime.evaluate", global_reply());
        session.respond(
            "Runtime.callFunctionOn",
            json!({ "result": { "type": "object", "subtype": "nodelist", "objectId": "list-1" } }),
        );
        session.respond(
            "Runtime.getProperties",
            json!({ "result": [
                { "name": "0", "value": { "type": "object", "objectId": "el-0" } },
                { "name": "1", "value": { "type": "object", "objectId": "el-1" } },
                { "name": "length", "value": { "type": "number", "value": 2 } },
            ]}),
        );
        let page = page_with(session.clone());

        let value = page
            .execute_script("return document.querySelectorAll('a')", &[])
            .await
            .expect("script");

        assert_eq!(
            value,
            json!([{ ELEMENT_KEY: "el-0" }, { ELEMENT_KEY: "el-1" }])
        );
        assert_eq!(session.calls()[2].1["ownProperties"], true);
    }

    #[tokio::test]
    async fn test_root_html_element_becomes_reference() {
        let session = MockSession::new("S");
        session.respond("Runtime.evaluate", global_reply());
        session.respond(
            "Runtime.callFunctionOn",
            json!({ "result": {
                "type": "object",
                "subtype": "node",
                "className": "HTMLHtmlElement",
                "objectId": "html-1",
            }}),
        );
        let page = page_with(session.clone());

        let value = page
            .execute_script("return document.documentElement", &[])
            .await
            .expect("script");
        assert_eq!(value, json!({ ELEMENT_KEY: "html-1" }));
    }

    #[tokio::test]
    async fn test_plain_object_result_is_copied() {
        let session = MockSession::new("S");
        session.respond("Runtime.evaluate", global_reply());
        session.respond(
            "Runtime.callFunctionOn",
            json!({ "result": { "type": "object", "className": "Object", "objectId": "obj-1" } }),
        );
        session.respond(
            "Runtime.callFunctionOn",
            json!({ "result": { "type": "object", "value": { "a": 1 } } }),
        );
        let page = page_with(session.clone());

        let value = page
            .execute_script("return {a: 1}", &[])
            .await
            .expect("script");

        assert_eq!(value, json!({ "a": 1 }));
        let copy_call = &session.calls()[2].1;
        assert_eq!(copy_call["objectId"], "obj-1");
        assert_eq!(copy_call["returnByValue"], true);
    }

    #[tokio::test]
    async fn test_page_exception_maps_to_script_error() {
        let session = MockSession::new("S");
        session.respond("Runtime.evaluate", global_reply());
        session.respond(
            "Runtime.callFunctionOn",
            json!({
                "result": { "type": "object", "subtype": "error" },
                "exceptionDetails": {
                    "text": "Uncaught",
                    "exception": { "description": "ReferenceError: nope is not defined" },
                },
            }),
        );
        let page = page_with(session.clone());

        let err = page.execute_script("nope()", &[]).await.unwrap_err();
        match err {
            Error::Script { message } => {
                assert!(message.contains("ReferenceError"));
            }
            other => panic!("expected script error, got {other}"),
        }
    }
}
