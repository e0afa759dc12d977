//! Opportunistic keyword backfill
//!
//! After a fallback turn the structured parser never ran, but the raw
//! utterance may still carry usable info. These looser heuristics catch
//! the common cases (name introductions, warranty yes/no) so state keeps
//! advancing even in conversational mode. Intentionally lossy; not a
//! substitute for the parser path, and isolated here so it can be tuned
//! or removed without touching orchestration.

use dialogue_engine::BookingState;

const NAME_INDICATORS: [&str; 4] = ["i'm ", "my name is ", "this is ", "name's "];
const WARRANTY_YES: [&str; 4] = ["yes", "yeah", "yep", "under"];
const WARRANTY_NO: [&str; 4] = ["no", "nope", "not", "expired"];

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Best-effort scan of a fallback-path utterance for unfilled fields.
/// Only ever fills, never overwrites.
pub fn backfill_from_utterance(state: &mut BookingState, utterance: &str) {
    let lower = utterance.to_lowercase();

    if state.name.is_none() {
        for indicator in NAME_INDICATORS {
            if let Some(pos) = lower.find(indicator) {
                let tail = utterance.get(pos + indicator.len()..).unwrap_or("");
                if let Some(word) = tail.split_whitespace().next() {
                    let candidate = word.trim_matches(|c| c == '.' || c == ',');
                    if candidate.chars().count() > 1 {
                        state.name = Some(title_case(candidate));
                        tracing::debug!(name = ?state.name, "backfilled name from utterance");
                        break;
                    }
                }
            }
        }
    }

    if state.warranty.is_none()
        && (lower.contains("warranty") || lower.contains("service contract"))
    {
        if WARRANTY_YES.iter().any(|w| lower.contains(w)) {
            state.warranty = Some(true);
        } else if WARRANTY_NO.iter().any(|w| lower.contains(w)) {
            state.warranty = Some(false);
        }
        if state.warranty.is_some() {
            tracing::debug!(warranty = ?state.warranty, "backfilled warranty from utterance");
        }
    }
}
