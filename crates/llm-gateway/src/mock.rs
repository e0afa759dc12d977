//! Scripted mock generator for development and testing

use crate::error::{GatewayError, Result};
use crate::traits::TextGenerator;
use crate::types::GenerationRequest;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Generator that replays a scripted queue of replies and counts calls.
///
/// An exhausted queue yields a neutral canned line rather than an error,
/// so interactive demos keep working past the script.
#[derive(Debug, Default)]
pub struct MockGenerator {
    replies: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        if let Ok(mut queue) = self.replies.lock() {
            queue.push_back(reply.into());
        }
    }

    /// How many generation calls have been made (sync or streaming).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| "Okay, noted. What else can you tell me?".to_string())
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        Ok(self.next_reply())
    }

    async fn generate_stream(
        &self,
        _request: &GenerationRequest,
    ) -> Result<mpsc::Receiver<String>> {
        let reply = self.next_reply();
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            for word in reply.split_inclusive(' ') {
                if tx.send(word.to_string()).await.is_err() {
                    break;
                }
            }
        });
        Ok(rx)
    }
}

/// Generator that always fails; used to exercise fallback semantics.
#[derive(Debug, Default)]
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        Err(GatewayError::Provider("mock failure".to_string()))
    }
}
