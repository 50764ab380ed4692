use serde_json::{Map, Value};

/// Where the scheduling fields live inside a recognised envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Located<'a> {
    /// A tool call entry carrying `function.arguments`
    ToolCall(&'a Value),
    /// Fields at the top level of the body
    Flat(&'a Map<String, Value>),
}

/// A known envelope shape and how to find its payload
pub struct EnvelopeShape {
    pub name: &'static str,
    locate: fn(&Value) -> Option<Located<'_>>,
}

impl EnvelopeShape {
    pub fn locate<'a>(&self, body: &'a Value) -> Option<Located<'a>> {
        (self.locate)(body)
    }
}

/// Supported shapes in priority order, the first match wins
pub static SHAPES: &[EnvelopeShape] = &[
    EnvelopeShape {
        name: "assistant.toolCalls",
        locate: assistant_tool_calls,
    },
    EnvelopeShape {
        name: "message.toolCalls",
        locate: message_tool_calls,
    },
    EnvelopeShape {
        name: "message.toolCallList",
        locate: message_tool_call_list,
    },
    EnvelopeShape {
        name: "message.tool_calls",
        locate: message_tool_calls_snake,
    },
    EnvelopeShape {
        name: "toolCalls",
        locate: root_tool_calls,
    },
    EnvelopeShape {
        name: "flat",
        locate: flat,
    },
];

/// Fields whose presence marks a flat envelope
const FLAT_KEYS: [&str; 3] = ["name", "date", "time"];

/// Find the first shape that matches the body
pub fn classify(body: &Value) -> Option<(&'static EnvelopeShape, Located<'_>)> {
    SHAPES
        .iter()
        .find_map(|shape| shape.locate(body).map(|located| (shape, located)))
}

fn assistant_tool_calls(body: &Value) -> Option<Located<'_>> {
    first_tool_call(body.get("assistant")?, &["toolCalls", "tool_calls"]).map(Located::ToolCall)
}

fn message_tool_calls(body: &Value) -> Option<Located<'_>> {
    first_tool_call(body.get("message")?, &["toolCalls"]).map(Located::ToolCall)
}

fn message_tool_call_list(body: &Value) -> Option<Located<'_>> {
    first_tool_call(body.get("message")?, &["toolCallList"]).map(Located::ToolCall)
}

fn message_tool_calls_snake(body: &Value) -> Option<Located<'_>> {
    first_tool_call(body.get("message")?, &["tool_calls"]).map(Located::ToolCall)
}

fn root_tool_calls(body: &Value) -> Option<Located<'_>> {
    first_tool_call(body, &["toolCalls", "tool_calls"]).map(Located::ToolCall)
}

fn flat(body: &Value) -> Option<Located<'_>> {
    let map = body.as_object()?;
    FLAT_KEYS
        .iter()
        .any(|key| map.get(*key).is_some_and(|v| !v.is_null()))
        .then_some(Located::Flat(map))
}

/// First entry of the first non-empty tool call array found under `keys`
fn first_tool_call<'a>(container: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        container
            .get(*key)
            .and_then(Value::as_array)
            .and_then(|calls| calls.first())
            .filter(|call| is_present(call))
    })
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape_name(body: &Value) -> Option<&'static str> {
        classify(body).map(|(shape, _)| shape.name)
    }

    #[test]
    fn test_each_shape_is_recognised() {
        let call = json!({"id": "tc1", "function": {"arguments": "{}"}});

        assert_eq!(
            shape_name(&json!({"assistant": {"toolCalls": [call.clone()]}})),
            Some("assistant.toolCalls")
        );
        assert_eq!(
            shape_name(&json!({"assistant": {"tool_calls": [call.clone()]}})),
            Some("assistant.toolCalls")
        );
        assert_eq!(
            shape_name(&json!({"message": {"toolCalls": [call.clone()]}})),
            Some("message.toolCalls")
        );
        assert_eq!(
            shape_name(&json!({"message": {"toolCallList": [call.clone()]}})),
            Some("message.toolCallList")
        );
        assert_eq!(
            shape_name(&json!({"message": {"tool_calls": [call.clone()]}})),
            Some("message.tool_calls")
        );
        assert_eq!(shape_name(&json!({"toolCalls": [call.clone()]})), Some("toolCalls"));
        assert_eq!(shape_name(&json!({"tool_calls": [call]})), Some("toolCalls"));
        assert_eq!(shape_name(&json!({"date": "2025-03-10"})), Some("flat"));
    }

    #[test]
    fn test_priority_order() {
        let body = json!({
            "name": "Flat",
            "message": {"toolCallList": [{"id": "list"}], "toolCalls": [{"id": "calls"}]},
            "assistant": {"toolCalls": [{"id": "assistant"}]}
        });
        let (shape, located) = classify(&body).unwrap();
        assert_eq!(shape.name, "assistant.toolCalls");
        assert_eq!(located, Located::ToolCall(&body["assistant"]["toolCalls"][0]));

        let body = json!({
            "message": {"toolCallList": [{"id": "list"}], "toolCalls": [{"id": "calls"}]}
        });
        assert_eq!(shape_name(&body), Some("message.toolCalls"));
    }

    #[test]
    fn test_empty_entries_fall_through() {
        // Empty arrays and empty first entries do not count as a match
        let body = json!({
            "assistant": {"toolCalls": []},
            "message": {"toolCalls": [{}], "tool_calls": [null]},
            "toolCalls": [{"id": "root"}]
        });
        assert_eq!(shape_name(&body), Some("toolCalls"));
    }

    #[test]
    fn test_unknown_shapes() {
        assert_eq!(shape_name(&json!({})), None);
        assert_eq!(shape_name(&json!({"name": null})), None);
        assert_eq!(shape_name(&json!({"title": "Only a title"})), None);
        assert_eq!(shape_name(&json!({"message": {"type": "status-update"}})), None);
        assert_eq!(shape_name(&json!([1, 2, 3])), None);
        assert_eq!(shape_name(&Value::Null), None);
    }
}
