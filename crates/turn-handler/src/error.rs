use dialogue_engine::{AssetKey, DIDNT_CATCH_MESSAGE};
use thiserror::Error;

pub type Result<T, E = TurnError> = core::result::Result<T, E>;

/// Failure to recover a JSON object from extraction output. Always
/// absorbed into fallback routing, never user-visible.
#[derive(Debug, Error)]
pub enum ParseDecodeError {
    #[error("no JSON object found in model output")]
    NoJsonObject,
    #[error("extraction shape mismatch: {0}")]
    Shape(String),
}

/// The errors a turn can surface to the transport layer.
#[derive(Debug, Error)]
pub enum TurnError {
    /// Fallback generation failed; callers substitute the apology string.
    #[error("fallback generation failed: {0}")]
    Generation(#[from] llm_gateway::GatewayError),
    #[error("transcription failed: {0}")]
    Transcription(#[from] speech_io::SpeechError),
    /// Blank transcription: the turn is aborted before any dialogue
    /// processing.
    #[error("could not understand the audio")]
    UnintelligibleAudio,
}

impl TurnError {
    /// The canned user-facing reply for this error, when one exists.
    /// Unintelligible audio gets the pre-recorded "didn't catch" line;
    /// generation failures are the caller's apology to make.
    pub fn canned_reply(&self) -> Option<(&'static str, AssetKey)> {
        match self {
            TurnError::UnintelligibleAudio => {
                Some((DIDNT_CATCH_MESSAGE, AssetKey::DidntCatch))
            }
            TurnError::Generation(_) | TurnError::Transcription(_) => None,
        }
    }
}
