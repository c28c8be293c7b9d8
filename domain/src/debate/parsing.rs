//! Structured-reply extraction for debate agents.
//!
//! Agents are asked to answer with a JSON object, but the text that comes
//! back is free-form: it may be wrapped in a Markdown code fence, surrounded
//! by prose, or not JSON at all. These functions recover the object when one
//! is there and report an empty map otherwise. They never fail.
//!
//! # Strategies (in order)
//!
//! | Step | Input | Example |
//! |------|-------|---------|
//! | 1 | whole text, outer fence removed | `{"stance": "stand", ...}` |
//! | 2 | span from first `{` to last `}` | `Sure! {"stance": ...} Hope this helps` |
//!
//! Each step first tries strict JSON, then a lenient pass that escapes raw
//! control characters inside string literals (agents often emit literal
//! newlines in long `content` values). Duplicate keys resolve to the last
//! occurrence.

use serde_json::{Map, Value};

/// Key-value structure recovered from an agent reply
pub type ReplyObject = Map<String, Value>;

const FENCE: &str = "```";

/// Remove one outer Markdown code fence.
///
/// Only applies when the text both starts and ends with the fence marker;
/// the opening line (which may carry a language tag such as `json`) and the
/// closing line are dropped.
pub fn strip_code_fences(text: &str) -> &str {
    if text.len() < FENCE.len() * 2 || !text.starts_with(FENCE) || !text.ends_with(FENCE) {
        return text;
    }

    let Some((_, inner)) = text.split_once('\n') else {
        return text;
    };
    match inner.rsplit_once('\n') {
        Some((body, _)) => body,
        None => inner,
    }
}

/// Parse the JSON object embedded in an agent reply.
///
/// Returns an empty map when no strategy yields an object. A reply that
/// parses as JSON but is not an object (an array, a bare string) counts as
/// unparseable.
pub fn parse_reply_object(text: &str) -> ReplyObject {
    let candidate = strip_code_fences(text.trim());

    if let Some(object) = parse_object(candidate) {
        return object;
    }

    if let Some(start) = candidate.find('{')
        && let Some(end) = candidate.rfind('}')
        && end > start
        && let Some(object) = parse_object(&candidate[start..=end])
    {
        return object;
    }

    Map::new()
}

/// Look up a string field, ignoring non-string values
pub fn text_field<'a>(object: &'a ReplyObject, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

/// Look up a field and render it as text.
///
/// Strings are returned as-is, `null` as absent, and any other JSON value
/// in its compact JSON form.
pub fn coerce_text(object: &ReplyObject, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_object(candidate: &str) -> Option<ReplyObject> {
    let value = serde_json::from_str::<Value>(candidate)
        .ok()
        .or_else(|| serde_json::from_str::<Value>(&escape_control_chars(candidate)).ok())?;

    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Escape raw control characters that appear inside JSON string literals.
fn escape_control_chars(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escape = false;

    for ch in raw.chars() {
        if in_string {
            if escape {
                escape = false;
                result.push(ch);
                continue;
            }
            match ch {
                '\\' => {
                    escape = true;
                    result.push(ch);
                }
                '"' => {
                    in_string = false;
                    result.push(ch);
                }
                '\n' => result.push_str("\\n"),
                '\r' => result.push_str("\\r"),
                '\t' => result.push_str("\\t"),
                c if c.is_control() => result.push_str(&format!("\\u{:04x}", c as u32)),
                c => result.push(c),
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        }
        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_object() {
        let object = parse_reply_object(r#"{"stance": "stand", "content": "42"}"#);
        assert_eq!(text_field(&object, "stance"), Some("stand"));
        assert_eq!(text_field(&object, "content"), Some("42"));
    }

    #[test]
    fn test_parse_fenced_object() {
        let reply = "```json\n{\"stance\": \"stand\", \"content\": \"fenced\"}\n```";
        let object = parse_reply_object(reply);
        assert_eq!(text_field(&object, "content"), Some("fenced"));
    }

    #[test]
    fn test_parse_object_surrounded_by_prose() {
        let reply = "Here is my answer:\n{\"agreement\": \"agree\"}\nThanks!";
        let object = parse_reply_object(reply);
        assert_eq!(text_field(&object, "agreement"), Some("agree"));
    }

    #[test]
    fn test_parse_tolerates_raw_newlines_in_strings() {
        let reply = "{\"stance\": \"stand\", \"content\": \"line one\nline two\"}";
        let object = parse_reply_object(reply);
        assert_eq!(text_field(&object, "content"), Some("line one\nline two"));
    }

    #[test]
    fn test_parse_duplicate_keys_keep_last() {
        let object = parse_reply_object(r#"{"stance": "stand", "stance": "concede"}"#);
        assert_eq!(text_field(&object, "stance"), Some("concede"));
    }

    #[test]
    fn test_parse_invalid_text_is_empty() {
        assert!(parse_reply_object("not json at all").is_empty());
        assert!(parse_reply_object("").is_empty());
        assert!(parse_reply_object("{ broken").is_empty());
        assert!(parse_reply_object("} backwards {").is_empty());
    }

    #[test]
    fn test_parse_non_object_json_is_empty() {
        assert!(parse_reply_object("[1, 2, 3]").is_empty());
        assert!(parse_reply_object("\"just a string\"").is_empty());
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```\nbody\n```"), "body");
        assert_eq!(strip_code_fences("```md\nline 1\nline 2\n```"), "line 1\nline 2");
        assert_eq!(strip_code_fences("no fences"), "no fences");
        assert_eq!(strip_code_fences("```only opening"), "```only opening");
        assert_eq!(strip_code_fences("``````"), "``````");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}```"), "{\"a\": 1}```");
    }

    #[test]
    fn test_coerce_text() {
        let object = parse_reply_object(r#"{"a": "x", "b": 3, "c": null, "d": [1]}"#);
        assert_eq!(coerce_text(&object, "a").as_deref(), Some("x"));
        assert_eq!(coerce_text(&object, "b").as_deref(), Some("3"));
        assert_eq!(coerce_text(&object, "c"), None);
        assert_eq!(coerce_text(&object, "d").as_deref(), Some("[1]"));
        assert_eq!(coerce_text(&object, "missing"), None);
    }
}
