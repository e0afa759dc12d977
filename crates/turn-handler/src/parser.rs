//! Structured extraction adapter
//!
//! Wraps a text-generation call in a minimal JSON-extraction prompt and
//! decodes whatever comes back. Decode and validation failures are never
//! fatal: they only tell the orchestrator to take the fallback path.

use crate::error::ParseDecodeError;
use crate::latency::elapsed_ms;
use dialogue_engine::{BookingField, FieldUpdates};
use llm_gateway::{GenerationRequest, TextGenerator};
use serde_json::Value;
use std::time::Instant;

pub const EXTRACTION_SYSTEM_MESSAGE: &str =
    "You are a JSON extractor. Return only valid JSON, no explanation.";

/// Extraction needs far fewer output tokens than open dialogue; the small
/// budget is a deliberate latency optimization.
pub const EXTRACTION_TOKEN_BUDGET: u32 = 200;
pub const FALLBACK_TOKEN_BUDGET: u32 = 150;

/// Minimal extraction instruction. The last assistant message, when
/// present, disambiguates short answers like "yes" to a yes/no question.
pub fn build_extraction_prompt(state_snapshot: &Value, last_assistant: Option<&str>) -> String {
    let context = last_assistant
        .map(|msg| format!("Bot asked: \"{msg}\"\n"))
        .unwrap_or_default();
    format!(
        "{context}State: {state_snapshot}\n\
         Extract NEW info only. Return JSON: {{\"name\",\"car_reg\",\"car_model\",\
         \"mileage\"(int),\"warranty\"(bool),\"issue\"}} null if absent."
    )
}

/// Conversational prompt for the fallback path: embeds the current state
/// and the ordered missing fields so the model steers back on task.
pub fn build_fallback_prompt(
    utterance: &str,
    state_snapshot: &Value,
    missing: &[BookingField],
) -> String {
    let missing_list = missing
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let state_pretty =
        serde_json::to_string_pretty(state_snapshot).unwrap_or_else(|_| state_snapshot.to_string());
    format!(
        "You are a helpful garage booking assistant.\n\n\
         Current booking state:\n{state_pretty}\n\n\
         Missing information: {missing_list}\n\n\
         User said: \"{utterance}\"\n\n\
         Respond naturally and helpfully. If they're chatting or asking questions, answer briefly.\n\
         Then guide them back to providing the next missing piece of information.\n\n\
         Keep response under 2 sentences. Be warm but efficient."
    )
}

fn fenced_block<'a>(raw: &'a str, fence: &str) -> Option<&'a str> {
    let start = raw.find(fence)? + fence.len();
    let rest = raw.get(start..)?;
    let end = rest.find("```")?;
    rest.get(..end)
}

fn decode_json_value(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(raw.trim()) {
        return Some(value);
    }
    for fence in ["```json", "```"] {
        if let Some(body) = fenced_block(raw, fence) {
            if let Ok(value) = serde_json::from_str(body.trim()) {
                return Some(value);
            }
        }
    }
    // Last resort: first '{' to last '}' span, for JSON wrapped in prose.
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(raw.get(start..=end)?).ok()
}

/// Decode model output into a typed partial update. Tolerates raw JSON,
/// fenced JSON, and JSON embedded in prose.
pub fn decode_extraction(raw: &str) -> Result<FieldUpdates, ParseDecodeError> {
    let value = decode_json_value(raw).ok_or(ParseDecodeError::NoJsonObject)?;
    if !value.is_object() {
        return Err(ParseDecodeError::NoJsonObject);
    }
    serde_json::from_value(value).map_err(|err| ParseDecodeError::Shape(err.to_string()))
}

/// Outcome of one extraction attempt. `updates` is `None` for every kind
/// of failure: call error, undecodable output, or an all-null extraction
/// (a legitimate "nothing to extract").
#[derive(Debug)]
pub struct ExtractionAttempt {
    pub updates: Option<FieldUpdates>,
    pub latency_ms: f64,
}

pub async fn attempt_extraction(
    generator: &dyn TextGenerator,
    state_snapshot: &Value,
    last_assistant: Option<&str>,
    utterance: &str,
) -> ExtractionAttempt {
    let start = Instant::now();
    let prompt = build_extraction_prompt(state_snapshot, last_assistant);
    let request = GenerationRequest::new(
        format!("{prompt}\n\nUser's message: {utterance}"),
        EXTRACTION_SYSTEM_MESSAGE,
        EXTRACTION_TOKEN_BUDGET,
    );

    let updates = match generator.generate(&request).await {
        Ok(raw) => match decode_extraction(&raw) {
            Ok(decoded) if !decoded.is_empty() => Some(decoded),
            Ok(_) => {
                tracing::debug!("extraction came back all-null");
                None
            }
            Err(err) => {
                tracing::debug!("extraction decode failed: {err}");
                None
            }
        },
        Err(err) => {
            tracing::warn!("extraction call failed: {err}");
            None
        }
    };

    let latency_ms = elapsed_ms(start);
    tracing::info!(
        success = updates.is_some(),
        latency_ms,
        input = utterance,
        "extraction attempt"
    );
    ExtractionAttempt {
        updates,
        latency_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_raw_json() {
        let updates = decode_extraction(r#"{"name": "Alex Smith"}"#).unwrap();
        assert_eq!(updates.name.as_deref(), Some("Alex Smith"));
    }

    #[test]
    fn decodes_fenced_json() {
        let raw = "```json\n{\"car_reg\": \"AB12 CDE\"}\n```";
        let updates = decode_extraction(raw).unwrap();
        assert_eq!(updates.car_reg.as_deref(), Some("AB12 CDE"));

        let bare_fence = "```\n{\"issue\": \"brakes\"}\n```";
        let updates = decode_extraction(bare_fence).unwrap();
        assert_eq!(updates.issue.as_deref(), Some("brakes"));
    }

    #[test]
    fn decodes_json_embedded_in_prose() {
        let raw = "Sure! Here is the data: {\"mileage\": 45000} hope that helps.";
        let updates = decode_extraction(raw).unwrap();
        assert!(updates.mileage.is_some());
    }

    #[test]
    fn rejects_output_without_json() {
        assert!(matches!(
            decode_extraction("I could not find anything useful."),
            Err(ParseDecodeError::NoJsonObject)
        ));
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(decode_extraction("[1, 2, 3]").is_err());
    }

    #[test]
    fn extraction_prompt_embeds_state_and_context() {
        let snapshot = json!({"name": null});
        let prompt = build_extraction_prompt(&snapshot, Some("What's your full name?"));
        assert!(prompt.starts_with("Bot asked: \"What's your full name?\""));
        assert!(prompt.contains(r#"State: {"name":null}"#));

        let without_context = build_extraction_prompt(&snapshot, None);
        assert!(without_context.starts_with("State:"));
    }

    #[test]
    fn fallback_prompt_lists_missing_fields_in_order() {
        let snapshot = json!({"name": "Alex"});
        let prompt = build_fallback_prompt(
            "hello",
            &snapshot,
            &[BookingField::CarReg, BookingField::Issue],
        );
        assert!(prompt.contains("Missing information: car_reg, issue"));
        assert!(prompt.contains("User said: \"hello\""));
    }
}
