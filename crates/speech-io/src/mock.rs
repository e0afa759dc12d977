use crate::error::{Result, SpeechError};
use crate::traits::Transcriber;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted transcriber for development and testing.
///
/// Replays queued transcriptions in order; an exhausted queue returns a
/// blank string, which callers treat as unintelligible audio.
#[derive(Debug, Default)]
pub struct MockTranscriber {
    transcripts: Mutex<VecDeque<String>>,
}

impl MockTranscriber {
    pub fn with_transcripts<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transcripts: Mutex::new(transcripts.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        if audio.is_empty() {
            return Err(SpeechError::NoAudio);
        }
        tracing::debug!(bytes = audio.len(), "mock transcription");
        Ok(self
            .transcripts
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_transcripts_then_goes_blank() {
        let transcriber = MockTranscriber::with_transcripts(["hello"]);
        assert_eq!(transcriber.transcribe(&[1, 2, 3]).await.unwrap(), "hello");
        assert_eq!(transcriber.transcribe(&[1, 2, 3]).await.unwrap(), "");
    }

    #[tokio::test]
    async fn empty_audio_is_an_error() {
        let transcriber = MockTranscriber::default();
        assert!(matches!(
            transcriber.transcribe(&[]).await,
            Err(SpeechError::NoAudio)
        ));
    }
}
