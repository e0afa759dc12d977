use serde::{Deserialize, Serialize};

/// Static reply substituted by callers when generation fails outright.
pub const APOLOGY_MESSAGE: &str =
    "I'm sorry, I'm having trouble processing your request right now. Please try again.";

/// One round-trip to a text-generation backend.
///
/// `max_tokens` is part of the request on purpose: structured extraction
/// runs on a much smaller output budget than open dialogue, and that
/// difference is a latency optimization the callers rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub user_message: String,
    pub system_message: String,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(
        user_message: impl Into<String>,
        system_message: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            system_message: system_message.into(),
            max_tokens,
        }
    }
}
