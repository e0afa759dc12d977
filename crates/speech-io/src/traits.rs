use crate::error::Result;
use async_trait::async_trait;

/// Speech-to-text backend.
///
/// Contract: unintelligible audio comes back as an empty or blank string,
/// not an error; callers treat blank as a distinct "could not understand"
/// outcome before any dialogue processing happens.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;
}
