use serde_json::{Map, Value};

/// Raw `{name, date, time, title}` fields as found in an envelope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCallArgs {
    pub name: Option<Value>,
    pub date: Option<Value>,
    pub time: Option<Value>,
    pub title: Option<Value>,
}

impl ToolCallArgs {
    /// Pick the scheduling fields out of a JSON object, ignoring everything else
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let field = |key: &str| map.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            name: field("name"),
            date: field("date"),
            time: field("time"),
            title: field("title"),
        }
    }
}

/// Validated scheduling request, identical regardless of the envelope shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 24-hour
    pub time: String,
    pub title: Option<String>,
}
