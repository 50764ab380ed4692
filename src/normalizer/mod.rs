//! Turns the many webhook envelope shapes used by voice-assistant platforms
//! into a single validated scheduling request.
//!
//! Classification walks [`shapes::SHAPES`] in priority order. Tool call shapes
//! carry their fields in `function.arguments`, which is decoded through
//! [`ToolArguments`]; the flat shape carries them at the top level. Every shape
//! then goes through the same sanitize and validate steps.

mod arguments;
mod models;
pub mod shapes;
mod validate;

pub use arguments::ToolArguments;
pub use models::{NormalizedRequest, ToolCallArgs};
pub use validate::{is_valid_date, is_valid_time, sanitize, validate, SanitizedArgs};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use shapes::Located;

/// Why a webhook body could not be turned into a scheduling request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Unknown request format. Could not extract parameters.")]
    UnknownFormat,

    #[error("Invalid JSON in tool call arguments")]
    InvalidArguments,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date format. Expected YYYY-MM-DD")]
    InvalidDate,

    #[error("Invalid time format. Expected HH:MM (24-hour)")]
    InvalidTime,
}

/// A request error together with the tool call it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub error: RequestError,
    pub tool_call_id: Option<String>,
}

/// Successful normalization result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Name of the envelope shape that matched
    pub shape: &'static str,
    pub tool_call_id: Option<String>,
    pub request: NormalizedRequest,
}

/// Classify, extract, sanitize and validate a webhook body
pub fn normalize(body: &Value) -> Result<Normalized, Rejection> {
    let Some((shape, located)) = shapes::classify(body) else {
        warn!("Unknown request format");
        return Err(Rejection {
            error: RequestError::UnknownFormat,
            tool_call_id: None,
        });
    };

    info!(shape = shape.name, "Detected envelope shape");

    let (args, tool_call_id) = match located {
        Located::ToolCall(call) => {
            let tool_call_id = call.get("id").and_then(Value::as_str).map(str::to_string);
            let raw = call.get("function").and_then(|f| f.get("arguments"));
            debug!(?tool_call_id, arguments = ?raw, "Tool call arguments");

            let Some(map) = ToolArguments::from_value(raw).decode() else {
                warn!(?tool_call_id, "Failed to parse tool call arguments");
                return Err(Rejection {
                    error: RequestError::InvalidArguments,
                    tool_call_id,
                });
            };
            (ToolCallArgs::from_map(&map), tool_call_id)
        }
        Located::Flat(map) => (ToolCallArgs::from_map(map), None),
    };

    let sanitized = sanitize(&args);
    debug!(
        name = %sanitized.name,
        date = %sanitized.date,
        time = %sanitized.time,
        title = ?sanitized.title,
        "Extracted values"
    );

    match validate(sanitized) {
        Ok(request) => Ok(Normalized {
            shape: shape.name,
            tool_call_id,
            request,
        }),
        Err(error) => {
            warn!(%error, "Request validation failed");
            Err(Rejection {
                error,
                tool_call_id,
            })
        }
    }
}
