//! turn-handler: hybrid per-turn orchestration for the booking assistant
//!
//! Each user utterance is classified into one of three paths: an instant
//! canned greeting, a structured extraction followed by the deterministic
//! dialogue engine, or an open-ended conversational fallback. The parser
//! path is preferred whenever it succeeds; every path records a latency
//! breakdown and appends to the session's conversation history.

mod classify;
pub use classify::{is_greeting, should_use_parser};

mod parser;
pub use parser::{
    attempt_extraction, build_extraction_prompt, build_fallback_prompt, decode_extraction,
    ExtractionAttempt, EXTRACTION_SYSTEM_MESSAGE, EXTRACTION_TOKEN_BUDGET,
    FALLBACK_TOKEN_BUDGET,
};

mod backfill;
pub use backfill::backfill_from_utterance;

mod history;
pub use history::{ConversationHistory, Role, Turn};

mod latency;
pub use latency::{elapsed_ms, LatencyBreakdown, LatencyStats, RollingLatencyLog};

mod handler;
pub use handler::{HybridTurnHandler, TurnMode, TurnOptions, TurnOutcome};

mod session;
pub use session::SessionStore;

mod recording;
pub use recording::{record_best_effort, JsonFileRecorder, TurnRecord, TurnRecorder};

mod error;
pub use error::{ParseDecodeError, Result, TurnError};
