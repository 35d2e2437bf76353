//! Defensive decoding of the model's text output.

use once_cell::sync::Lazy;
use regex::Regex;
use voicebook_core::NluResponse;

static OPENING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(?i:json)?").expect("opening fence pattern is valid"));
static CLOSING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```$").expect("closing fence pattern is valid"));

/// Removes a Markdown code fence wrapped around the payload, if any.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    let text = match OPENING_FENCE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let text = match CLOSING_FENCE.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    };
    text.trim()
}

/// Decodes model output into an [`NluResponse`].
pub fn decode_nlu_response(raw: &str) -> Result<NluResponse, serde_json::Error> {
    serde_json::from_str(strip_code_fence(raw))
}

/// Like [`decode_nlu_response`], but any failure becomes `unknown`.
pub fn parse_nlu_response(raw: &str) -> NluResponse {
    match decode_nlu_response(raw) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!("[NluClient] Could not decode model output as intent JSON: {}", err);
            NluResponse::unknown()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicebook_core::Intent;

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```JSON {\"a\":1}```  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_parse_fenced_response() {
        let response = parse_nlu_response(
            "```json\n{\"intent\": \"intent_change_chat_theme\", \"slots\": {\"theme_name\": \"ocean\"}}\n```",
        );
        assert_eq!(response.intent, Intent::ChangeChatTheme);
        assert_eq!(response.slots.text("theme_name"), Some("ocean"));
    }

    #[test]
    fn test_truncated_output_is_unknown() {
        let response = parse_nlu_response("{\"intent\": \"intent_like\", \"slo");
        assert_eq!(response, NluResponse::unknown());
    }

    #[test]
    fn test_non_json_output_is_unknown() {
        assert!(parse_nlu_response("Sure! The intent is like.").is_unknown());
        assert!(parse_nlu_response("").is_unknown());
        assert!(parse_nlu_response("[\"intent_like\"]").is_unknown());
        assert!(parse_nlu_response("{\"slots\": {}}").is_unknown());
        assert!(parse_nlu_response("{\"intent\": 42}").is_unknown());
    }

    #[test]
    fn test_unknown_intent_name_is_unknown() {
        let response = parse_nlu_response("{\"intent\": \"intent_teleport\"}");
        assert!(response.is_unknown());
    }
}
