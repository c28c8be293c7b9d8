//! Final-answer extraction from the writer's reply

use super::parsing::{parse_reply_object, strip_code_fences, text_field};

/// Fields a writer may wrap its answer in, by preference
const ANSWER_KEYS: [&str; 4] = ["answer", "conclusion", "content", "final_answer"];

/// Turn the writer's raw reply into user-facing text.
///
/// The writer is asked for plain Markdown, but may still answer with a JSON
/// object. In that case the first non-empty [`ANSWER_KEYS`] field wins.
/// Otherwise the reply is used verbatim minus one code fence. Falls back to
/// `fallback` (the judge's conclusion) when nothing is left.
pub fn extract_final_answer(raw: &str, fallback: &str) -> String {
    let candidate = raw.trim();

    let object = parse_reply_object(candidate);
    let structured = ANSWER_KEYS
        .iter()
        .filter_map(|key| text_field(&object, key))
        .map(str::trim)
        .find(|value| !value.is_empty());
    if let Some(answer) = structured {
        return answer.to_string();
    }

    let text = strip_code_fences(candidate).trim();
    if text.is_empty() {
        fallback.trim().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_markdown_is_kept() {
        let answer = extract_final_answer("  **Paris** is the capital.\n", "judge");
        assert_eq!(answer, "**Paris** is the capital.");
    }

    #[test]
    fn test_structured_answer_key_order() {
        let raw = r#"{"content": "from content", "answer": "from answer"}"#;
        assert_eq!(extract_final_answer(raw, "judge"), "from answer");

        let raw = r#"{"answer": "  ", "final_answer": "from final_answer"}"#;
        assert_eq!(extract_final_answer(raw, "judge"), "from final_answer");
    }

    #[test]
    fn test_fenced_json_answer() {
        let raw = "```json\n{\"conclusion\": \"fenced\"}\n```";
        assert_eq!(extract_final_answer(raw, "judge"), "fenced");
    }

    #[test]
    fn test_fenced_prose_loses_fence() {
        let raw = "```markdown\n# Title\nBody\n```";
        assert_eq!(extract_final_answer(raw, "judge"), "# Title\nBody");
    }

    #[test]
    fn test_object_without_answer_keys_is_verbatim() {
        let raw = r#"{"note": "odd"}"#;
        assert_eq!(extract_final_answer(raw, "judge"), raw);
    }

    #[test]
    fn test_empty_reply_falls_back() {
        assert_eq!(extract_final_answer("", " judge says "), "judge says");
        assert_eq!(extract_final_answer("```\n\n```", "judge"), "judge");
    }
}
