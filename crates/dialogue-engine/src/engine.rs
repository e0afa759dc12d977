//! Deterministic dialogue flow over the booking state
//!
//! The engine owns a [`BookingState`] and answers exactly one question:
//! given what we just learned, what do we say next? No model is involved
//! here; anything the engine cannot answer deterministically is handed
//! back to the caller as a fallback signal.

use crate::fields::{AssetKey, BookingField};
use crate::normalize::{normalize_mileage, normalize_registration, normalize_warranty};
use crate::state::{BookingState, FieldUpdates};
use serde::Serialize;

pub const GREETING_MESSAGE: &str =
    "Hi! I'm here to help you book a garage appointment. What's your full name?";
pub const COMPLETION_MESSAGE: &str =
    "Perfect! I have all your details. Let me check our available dates for you.";
pub const DIDNT_CATCH_MESSAGE: &str =
    "Sorry, I didn't quite catch that. Could you repeat it?";

/// Which of the three response shapes the engine chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Completion,
    Question,
    FallbackLlm,
}

/// What to say next. `text` is `None` only for [`ResponseKind::FallbackLlm`],
/// where the caller must generate the reply.
#[derive(Debug, Clone)]
pub struct EngineResponse {
    pub kind: ResponseKind,
    pub text: Option<String>,
    pub asset: Option<AssetKey>,
}

/// What an update actually changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateOutcome {
    pub updated_fields: Vec<BookingField>,
    pub is_complete: bool,
}

/// Deterministic booking dialogue engine.
#[derive(Debug, Default)]
pub struct DialogueEngine {
    state: BookingState,
}

impl DialogueEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    /// Direct state access for the opportunistic backfill seam.
    pub fn state_mut(&mut self) -> &mut BookingState {
        &mut self.state
    }

    /// Apply a validated partial update. Each recognized non-null value is
    /// normalized and stored; empty strings and unparseable values leave
    /// the field untouched. Fills are monotonic, so nothing here can
    /// clear a previously stored value.
    pub fn update_state(&mut self, updates: &FieldUpdates) -> UpdateOutcome {
        let mut updated = Vec::new();

        if let Some(name) = updates.name.as_deref().filter(|s| !s.is_empty()) {
            self.state.name = Some(name.to_string());
            updated.push(BookingField::Name);
        }
        if let Some(reg) = updates.car_reg.as_deref().filter(|s| !s.is_empty()) {
            self.state.car_reg = Some(normalize_registration(reg));
            updated.push(BookingField::CarReg);
        }
        if let Some(model) = updates.car_model.as_deref().filter(|s| !s.is_empty()) {
            self.state.car_model = Some(model.to_string());
            updated.push(BookingField::CarModel);
        }
        if let Some(mileage) = &updates.mileage {
            match normalize_mileage(mileage) {
                Ok(miles) => {
                    self.state.mileage = Some(miles);
                    updated.push(BookingField::Mileage);
                }
                Err(err) => {
                    tracing::warn!("mileage left unfilled: {err}");
                }
            }
        }
        if let Some(warranty) = &updates.warranty {
            self.state.warranty = Some(normalize_warranty(warranty));
            updated.push(BookingField::Warranty);
        }
        if let Some(issue) = updates.issue.as_deref().filter(|s| !s.is_empty()) {
            self.state.issue = Some(issue.to_string());
            updated.push(BookingField::Issue);
        }

        let is_complete = self.state.is_complete();
        tracing::debug!(?updated, is_complete, "state updated");
        UpdateOutcome {
            updated_fields: updated,
            is_complete,
        }
    }

    /// The canned question for the first missing field, or `None` once
    /// the booking is complete.
    pub fn next_question(&self) -> Option<&'static str> {
        self.state
            .missing_fields()
            .first()
            .map(|field| field.question())
    }

    /// Decide the next response. Must be called after [`update_state`] so
    /// a field filled this turn is never asked again.
    ///
    /// Complete bookings always get the completion message. A successful
    /// parse gets the next canned question. Everything else is a fallback
    /// signal for the conversational model.
    ///
    /// [`update_state`]: DialogueEngine::update_state
    pub fn next_response(&self, parse_succeeded: bool) -> EngineResponse {
        if self.state.is_complete() {
            return EngineResponse {
                kind: ResponseKind::Completion,
                text: Some(COMPLETION_MESSAGE.to_string()),
                asset: Some(AssetKey::Completion),
            };
        }

        if parse_succeeded {
            if let Some(field) = self.state.missing_fields().first().copied() {
                return EngineResponse {
                    kind: ResponseKind::Question,
                    text: Some(field.question().to_string()),
                    asset: Some(AssetKey::Field(field)),
                };
            }
        }

        EngineResponse {
            kind: ResponseKind::FallbackLlm,
            text: None,
            asset: None,
        }
    }

    /// Human-readable state summary for logs and the demo CLI.
    pub fn summary(&self) -> String {
        let snapshot = self.state.snapshot();
        let mut lines = vec!["Current booking details:".to_string()];
        for field in BookingField::ALL {
            let value = &snapshot[field.as_str()];
            if value.is_null() {
                lines.push(format!("  [ ] {field}: missing"));
            } else {
                lines.push(format!("  [x] {field}: {value}"));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{MileageValue, WarrantyValue};

    fn named(name: &str) -> FieldUpdates {
        FieldUpdates {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn next_question_follows_canonical_order() {
        let mut engine = DialogueEngine::new();
        assert_eq!(engine.next_question(), Some(BookingField::Name.question()));

        engine.update_state(&named("Alex"));
        // Name filled: the registration question must come next, never
        // model or mileage.
        assert_eq!(
            engine.next_question(),
            Some(BookingField::CarReg.question())
        );
    }

    #[test]
    fn repeated_fill_is_idempotent() {
        let mut engine = DialogueEngine::new();
        engine.update_state(&named("Alex"));
        let before = engine.state().missing_fields();
        engine.update_state(&named("Alex"));
        assert_eq!(engine.state().missing_fields(), before);
    }

    #[test]
    fn update_normalizes_registration_and_mileage() {
        let mut engine = DialogueEngine::new();
        let outcome = engine.update_state(&FieldUpdates {
            car_reg: Some("ab12 cde".into()),
            mileage: Some(MileageValue::Text("45,000 miles".into())),
            ..Default::default()
        });
        assert_eq!(
            outcome.updated_fields,
            vec![BookingField::CarReg, BookingField::Mileage]
        );
        assert_eq!(engine.state().car_reg.as_deref(), Some("AB12CDE"));
        assert_eq!(engine.state().mileage, Some(45000));
    }

    #[test]
    fn bad_mileage_leaves_field_unfilled_and_turn_proceeds() {
        let mut engine = DialogueEngine::new();
        let outcome = engine.update_state(&FieldUpdates {
            name: Some("Alex".into()),
            mileage: Some(MileageValue::Text("loads".into())),
            ..Default::default()
        });
        assert_eq!(outcome.updated_fields, vec![BookingField::Name]);
        assert_eq!(engine.state().mileage, None);
    }

    #[test]
    fn unrecognized_keys_are_not_an_error() {
        let mut engine = DialogueEngine::new();
        let updates: FieldUpdates =
            serde_json::from_str(r#"{"name":"Alex","favourite_biscuit":"hobnob"}"#).unwrap();
        let outcome = engine.update_state(&updates);
        assert_eq!(outcome.updated_fields, vec![BookingField::Name]);
    }

    #[test]
    fn response_is_question_while_incomplete_and_parse_succeeded() {
        let mut engine = DialogueEngine::new();
        engine.update_state(&named("Alex"));
        let response = engine.next_response(true);
        assert_eq!(response.kind, ResponseKind::Question);
        assert_eq!(response.text.as_deref(), Some(BookingField::CarReg.question()));
        assert_eq!(response.asset, Some(AssetKey::Field(BookingField::CarReg)));
    }

    #[test]
    fn response_is_fallback_when_parse_failed() {
        let engine = DialogueEngine::new();
        let response = engine.next_response(false);
        assert_eq!(response.kind, ResponseKind::FallbackLlm);
        assert!(response.text.is_none());
        assert!(response.asset.is_none());
    }

    #[test]
    fn response_is_completion_once_all_fields_filled() {
        let mut engine = DialogueEngine::new();
        let outcome = engine.update_state(&FieldUpdates {
            name: Some("Alex Smith".into()),
            car_reg: Some("AB12 CDE".into()),
            car_model: Some("Ford Focus".into()),
            mileage: Some(MileageValue::Count(45000)),
            warranty: Some(WarrantyValue::Flag(false)),
            issue: Some("brakes squealing".into()),
        });
        assert!(outcome.is_complete);
        assert_eq!(engine.next_question(), None);

        let response = engine.next_response(true);
        assert_eq!(response.kind, ResponseKind::Completion);
        assert_eq!(response.text.as_deref(), Some(COMPLETION_MESSAGE));
        assert_eq!(response.asset, Some(AssetKey::Completion));
    }

    #[test]
    fn newly_filled_field_is_not_reasked_same_turn() {
        let mut engine = DialogueEngine::new();
        engine.update_state(&named("Alex"));
        engine.update_state(&FieldUpdates {
            car_reg: Some("AB12CDE".into()),
            ..Default::default()
        });
        let response = engine.next_response(true);
        assert_eq!(
            response.text.as_deref(),
            Some(BookingField::CarModel.question())
        );
    }
}
