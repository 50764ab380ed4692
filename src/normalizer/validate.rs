use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::models::{NormalizedRequest, ToolCallArgs};
use super::RequestError;

lazy_static! {
    static ref DATE_PATTERN: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
    static ref TIME_PATTERN: Regex = Regex::new(r"^[0-9]{2}:[0-9]{2}$").unwrap();
}

/// Trimmed fields before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedArgs {
    pub name: String,
    pub date: String,
    pub time: String,
    pub title: Option<String>,
}

/// Coerce every field to a trimmed string. Absent required fields become empty,
/// an absent title stays absent.
pub fn sanitize(args: &ToolCallArgs) -> SanitizedArgs {
    SanitizedArgs {
        name: coerce(args.name.as_ref()),
        date: coerce(args.date.as_ref()),
        time: coerce(args.time.as_ref()),
        title: args
            .title
            .as_ref()
            .filter(|v| !v.is_null())
            .map(|v| coerce(Some(v))),
    }
}

fn coerce(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Check the required fields in order: name, date, time
pub fn validate(args: SanitizedArgs) -> Result<NormalizedRequest, RequestError> {
    if args.name.is_empty() {
        return Err(RequestError::MissingField("name"));
    }

    if args.date.is_empty() {
        return Err(RequestError::MissingField("date"));
    }
    if !is_valid_date(&args.date) {
        return Err(RequestError::InvalidDate);
    }

    if args.time.is_empty() {
        return Err(RequestError::MissingField("time"));
    }
    if !is_valid_time(&args.time) {
        return Err(RequestError::InvalidTime);
    }

    Ok(NormalizedRequest {
        name: args.name,
        date: args.date,
        time: args.time,
        title: args.title,
    })
}

/// `YYYY-MM-DD` shape check only, calendar validity is checked when the event is built
pub fn is_valid_date(date: &str) -> bool {
    DATE_PATTERN.is_match(date)
}

/// `HH:MM` shape check only, hour and minute ranges are checked when the event is built
pub fn is_valid_time(time: &str) -> bool {
    TIME_PATTERN.is_match(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(name: &str, date: &str, time: &str) -> SanitizedArgs {
        SanitizedArgs {
            name: name.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            title: None,
        }
    }

    #[test]
    fn test_date_pattern() {
        assert!(is_valid_date("2024-01-05"));
        assert!(!is_valid_date("2024-1-5"));
        assert!(!is_valid_date("05/01/2024"));
        assert!(!is_valid_date("2024-01-05T10:00"));
        // Only ASCII digits
        assert!(!is_valid_date("٢٠٢٥-٠٣-١٠"));
        assert!(!is_valid_date("２０２５-０３-１０"));
    }

    #[test]
    fn test_time_pattern() {
        assert!(is_valid_time("14:00"));
        assert!(!is_valid_time("2:00"));
        assert!(!is_valid_time("14:00:00"));
        assert!(!is_valid_time("2pm"));
        assert!(!is_valid_time("١٤:٠٠"));
        // Out-of-range values have the right shape
        assert!(is_valid_time("25:00"));
    }

    #[test]
    fn test_sanitize_trims_and_coerces() {
        let raw = ToolCallArgs {
            name: Some(json!("  Alice  ")),
            date: Some(json!(" 2025-03-10")),
            time: None,
            title: Some(json!("\tStandup ")),
        };
        let clean = sanitize(&raw);
        assert_eq!(clean.name, "Alice");
        assert_eq!(clean.date, "2025-03-10");
        assert_eq!(clean.time, "");
        assert_eq!(clean.title.as_deref(), Some("Standup"));

        let numeric = ToolCallArgs {
            name: Some(json!(42)),
            ..Default::default()
        };
        assert_eq!(sanitize(&numeric).name, "42");
    }

    #[test]
    fn test_missing_title_stays_absent() {
        let raw = ToolCallArgs {
            name: Some(json!("Alice")),
            title: Some(Value::Null),
            ..Default::default()
        };
        assert_eq!(sanitize(&raw).title, None);
        assert_eq!(sanitize(&ToolCallArgs::default()).title, None);
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(validate(args("", "", "")), Err(RequestError::MissingField("name")));
        assert_eq!(validate(args("Bob", "", "bad")), Err(RequestError::MissingField("date")));
        assert_eq!(validate(args("Bob", "2025-3-1", "")), Err(RequestError::InvalidDate));
        assert_eq!(validate(args("Bob", "2025-03-01", "")), Err(RequestError::MissingField("time")));
        assert_eq!(validate(args("Bob", "2025-03-01", "9:30")), Err(RequestError::InvalidTime));
    }

    #[test]
    fn test_valid_request() {
        let request = validate(args("Bob", "2025-03-10", "09:30")).unwrap();
        assert_eq!(request.name, "Bob");
        assert_eq!(request.date, "2025-03-10");
        assert_eq!(request.time, "09:30");
        assert_eq!(request.title, None);
    }
}
