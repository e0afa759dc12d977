use crate::error::{GatewayError, Result};
use crate::types::GenerationRequest;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A text-generation backend.
///
/// Both calls are blocking round-trips from the caller's point of view;
/// streaming hands back a finite, order-preserving sequence of fragments
/// that concatenate to the full reply. Backends without token streaming
/// keep the default implementation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    async fn generate_stream(
        &self,
        request: &GenerationRequest,
    ) -> Result<mpsc::Receiver<String>> {
        let _ = request;
        Err(GatewayError::StreamingUnsupported)
    }
}
