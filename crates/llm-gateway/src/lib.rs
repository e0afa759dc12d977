//! llm-gateway: text-generation trait with mock and HTTP backends

mod types;
pub use types::{GenerationRequest, APOLOGY_MESSAGE};

mod traits;
pub use traits::TextGenerator;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{FailingGenerator, MockGenerator};

#[cfg(feature = "openrouter")]
mod openrouter;
#[cfg(feature = "openrouter")]
pub use openrouter::OpenRouterGenerator;

mod error;
pub use error::{GatewayError, Result};
