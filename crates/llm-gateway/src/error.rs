use thiserror::Error;

pub type Result<T, E = GatewayError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("provider returned an empty completion")]
    EmptyCompletion,
    #[error("token streaming not supported by this backend")]
    StreamingUnsupported,
}
