use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Core(#[from] coupongen_core::Error),
    #[error("random source error: {0}")]
    RandomSource(String),
    #[error("gave up after {attempts} attempts with {generated} of {requested} unique coupons")]
    AttemptsExhausted {
        attempts: u64,
        generated: u64,
        requested: u64,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// I/O failures inside the csv writer surface as [`GenerationError::Io`] so
/// callers find every file-system error in one variant.
impl From<csv::Error> for GenerationError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return Self::Csv(err);
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            other => Self::Io(std::io::Error::other(format!("{other:?}"))),
        }
    }
}
