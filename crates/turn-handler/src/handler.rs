//! The hybrid per-turn controller
//!
//! Classification order is the core design decision here and is strict:
//! greeting fast path, then the complete-booking override, then parser
//! eligibility, then the parser attempt, and only then the conversational
//! fallback. The parser path is preferred whenever it succeeds; it is the
//! low-latency, hallucination-free route.

use crate::backfill::backfill_from_utterance;
use crate::classify::{is_greeting, should_use_parser};
use crate::error::{Result, TurnError};
use crate::history::ConversationHistory;
use crate::latency::{elapsed_ms, LatencyBreakdown};
use crate::parser::{attempt_extraction, build_fallback_prompt, FALLBACK_TOKEN_BUDGET};
use dialogue_engine::{AssetKey, BookingField, DialogueEngine, GREETING_MESSAGE};
use llm_gateway::{GenerationRequest, TextGenerator};
use serde::Serialize;
use speech_io::Transcriber;
use std::time::Instant;

/// Which path produced this turn's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnMode {
    Greeting,
    Parser,
    FallbackLlm,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TurnOptions {
    /// Prefer token streaming for fallback replies. The handler then
    /// returns `streaming: true` with the prompt instead of generating,
    /// and the caller pumps tokens and calls
    /// [`HybridTurnHandler::finish_streamed_turn`] with the full text.
    pub prefer_streaming: bool,
}

/// Everything the transport layer needs from one processed turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    /// `None` only for streaming turns, where the caller assembles it.
    pub bot_response: Option<String>,
    pub use_prerecorded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_asset: Option<AssetKey>,
    pub is_complete: bool,
    pub state: serde_json::Value,
    pub updated_fields: Vec<BookingField>,
    pub latency: LatencyBreakdown,
    pub mode: TurnMode,
    pub streaming: bool,
    #[serde(skip)]
    pub fallback_prompt: Option<String>,
}

/// Per-session turn orchestrator: one booking state, one history, strictly
/// one turn at a time.
pub struct HybridTurnHandler {
    session_key: String,
    engine: DialogueEngine,
    history: ConversationHistory,
}

impl HybridTurnHandler {
    pub fn new(session_key: impl Into<String>) -> Self {
        let session_key = session_key.into();
        tracing::info!(session = %session_key, "new booking session");
        Self {
            session_key,
            engine: DialogueEngine::new(),
            history: ConversationHistory::new(),
        }
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Drop all collected state and history, keeping the session key.
    pub fn reset(&mut self) {
        tracing::info!(session = %self.session_key, "session reset");
        self.engine = DialogueEngine::new();
        self.history = ConversationHistory::new();
    }

    /// Process one utterance that has already been transcribed.
    pub async fn process_turn(
        &mut self,
        utterance: &str,
        generator: &dyn TextGenerator,
        options: TurnOptions,
    ) -> Result<TurnOutcome> {
        let start = Instant::now();
        let mut latency = LatencyBreakdown::default();

        self.history.push_user(utterance);
        tracing::debug!(session = %self.session_key, history = %self.history.transcript(), "turn begins");

        // 1. Greeting fast path: canned reply, zero external calls.
        if is_greeting(utterance) {
            tracing::info!(session = %self.session_key, "greeting fast path");
            self.history.push_assistant(GREETING_MESSAGE);
            latency.greeting_ms = Some(elapsed_ms(start));
            latency.total_ms = elapsed_ms(start);
            return Ok(TurnOutcome {
                bot_response: Some(GREETING_MESSAGE.to_string()),
                use_prerecorded: true,
                audio_asset: Some(AssetKey::Greeting),
                is_complete: self.engine.state().is_complete(),
                state: self.engine.state().snapshot(),
                updated_fields: Vec::new(),
                latency,
                mode: TurnMode::Greeting,
                streaming: false,
                fallback_prompt: None,
            });
        }

        // 2. Nothing left to extract once the booking is complete.
        let use_parser = if self.engine.state().is_complete() {
            tracing::info!(session = %self.session_key, "booking complete, skipping parser");
            false
        } else {
            // 3. Eligibility heuristic.
            should_use_parser(utterance)
        };

        // 4. Parser attempt: deterministic response on success.
        if use_parser {
            let snapshot = self.engine.state().snapshot();
            let attempt = attempt_extraction(
                generator,
                &snapshot,
                self.history.last_assistant(),
                utterance,
            )
            .await;
            latency.parser_ms = Some(attempt.latency_ms);

            if let Some(updates) = attempt.updates {
                let update = self.engine.update_state(&updates);
                let response = self.engine.next_response(true);
                if let Some(text) = response.text {
                    tracing::info!(session = %self.session_key, "parser path succeeded");
                    self.history.push_assistant(&text);
                    latency.total_ms = elapsed_ms(start);
                    return Ok(TurnOutcome {
                        bot_response: Some(text),
                        use_prerecorded: true,
                        audio_asset: response.asset,
                        is_complete: update.is_complete,
                        state: self.engine.state().snapshot(),
                        updated_fields: update.updated_fields,
                        latency,
                        mode: TurnMode::Parser,
                        streaming: false,
                        fallback_prompt: None,
                    });
                }
            }
        }

        // 5. Conversational fallback.
        tracing::info!(session = %self.session_key, "fallback conversational path");
        let missing = self.engine.state().missing_fields();
        let prompt = build_fallback_prompt(utterance, &self.engine.state().snapshot(), &missing);

        if options.prefer_streaming {
            // The caller pumps tokens; latency for this phase is theirs to
            // measure. History is completed via finish_streamed_turn.
            backfill_from_utterance(self.engine.state_mut(), utterance);
            latency.fallback_ms = Some(0.0);
            latency.total_ms = elapsed_ms(start);
            return Ok(TurnOutcome {
                bot_response: None,
                use_prerecorded: false,
                audio_asset: None,
                is_complete: self.engine.state().is_complete(),
                state: self.engine.state().snapshot(),
                updated_fields: Vec::new(),
                latency,
                mode: TurnMode::FallbackLlm,
                streaming: true,
                fallback_prompt: Some(prompt),
            });
        }

        let fallback_start = Instant::now();
        let request = GenerationRequest::new(utterance, prompt, FALLBACK_TOKEN_BUDGET);
        let generated = generator.generate(&request).await;
        latency.fallback_ms = Some(elapsed_ms(fallback_start));
        latency.total_ms = elapsed_ms(start);

        let reply = match generated {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(
                    session = %self.session_key,
                    total_ms = latency.total_ms,
                    "fallback generation failed: {err}"
                );
                return Err(TurnError::Generation(err));
            }
        };

        backfill_from_utterance(self.engine.state_mut(), utterance);
        self.history.push_assistant(&reply);

        Ok(TurnOutcome {
            bot_response: Some(reply),
            use_prerecorded: false,
            audio_asset: None,
            is_complete: self.engine.state().is_complete(),
            state: self.engine.state().snapshot(),
            updated_fields: Vec::new(),
            latency,
            mode: TurnMode::FallbackLlm,
            streaming: false,
            fallback_prompt: None,
        })
    }

    /// Transcribe audio and process the resulting utterance. A blank
    /// transcription aborts before any dialogue processing.
    pub async fn process_audio_turn(
        &mut self,
        audio: &[u8],
        transcriber: &dyn Transcriber,
        generator: &dyn TextGenerator,
        options: TurnOptions,
    ) -> Result<(String, TurnOutcome)> {
        let transcription = transcriber.transcribe(audio).await?;
        if transcription.trim().is_empty() {
            tracing::info!(session = %self.session_key, "blank transcription, aborting turn");
            return Err(TurnError::UnintelligibleAudio);
        }
        let outcome = self.process_turn(&transcription, generator, options).await?;
        Ok((transcription, outcome))
    }

    /// Complete a streaming turn with the fully assembled reply text.
    pub fn finish_streamed_turn(&mut self, full_text: impl Into<String>) {
        self.history.push_assistant(full_text.into());
    }
}
