//! dialogue-engine: deterministic booking dialogue flow
//!
//! This crate holds the state machine at the centre of the booking
//! assistant: the six canonical booking fields, the partially filled
//! booking state, the normalizers that canonicalize raw field values,
//! and the engine that decides the next question (or completion) without
//! any model involvement.

mod fields;
pub use fields::{AssetKey, BookingField};

mod state;
pub use state::{BookingState, FieldUpdates};

mod normalize;
pub use normalize::{
    normalize_mileage, normalize_registration, normalize_warranty, MileageValue, WarrantyValue,
};

mod engine;
pub use engine::{
    DialogueEngine, EngineResponse, ResponseKind, UpdateOutcome, COMPLETION_MESSAGE,
    DIDNT_CATCH_MESSAGE, GREETING_MESSAGE,
};

mod error;
pub use error::{NormalizationError, Result};
