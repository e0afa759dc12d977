use thiserror::Error;

pub type Result<T, E = NormalizationError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("unparseable mileage value: {0:?}")]
    Mileage(String),
}
