use serde_json::{Map, Value};

/// The `function.arguments` payload of a tool call
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArguments {
    /// Already a JSON object
    Structured(Map<String, Value>),
    /// JSON text that still has to be decoded
    Encoded(String),
    /// Any other JSON type, which cannot carry named arguments
    Unsupported(Value),
}

impl ToolArguments {
    /// Classify the raw arguments value. Missing arguments decode to an empty map.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => ToolArguments::Structured(Map::new()),
            Some(Value::Object(map)) => ToolArguments::Structured(map.clone()),
            Some(Value::String(text)) => ToolArguments::Encoded(text.clone()),
            Some(other) => ToolArguments::Unsupported(other.clone()),
        }
    }

    /// Decode into a JSON object. `None` means the arguments are not valid JSON
    /// or do not describe an object.
    pub fn decode(self) -> Option<Map<String, Value>> {
        match self {
            ToolArguments::Structured(map) => Some(map),
            ToolArguments::Encoded(text) => decode_text(&text),
            ToolArguments::Unsupported(_) => None,
        }
    }
}

fn decode_text(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();

    let parsed = serde_json::from_str::<Value>(trimmed).or_else(|_| {
        // Some callers double-escape the payload: {\"name\":\"Eve\"}
        serde_json::from_str::<Value>(&trimmed.replace("\\\"", "\""))
    });

    match parsed {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
