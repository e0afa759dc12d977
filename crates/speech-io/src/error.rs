use thiserror::Error;

pub type Result<T, E = SpeechError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("transcription service error: {0}")]
    Service(String),
    #[error("no audio data received")]
    NoAudio,
}
