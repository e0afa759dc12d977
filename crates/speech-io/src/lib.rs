//! speech-io: transcription trait and pre-recorded audio catalog

mod traits;
pub use traits::Transcriber;

mod assets;
pub use assets::AssetCatalog;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::MockTranscriber;

mod error;
pub use error::{Result, SpeechError};
