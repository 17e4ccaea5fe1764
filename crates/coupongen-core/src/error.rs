use thiserror::Error;

/// Core error type shared across Coupongen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The pattern cannot produce the requested number of distinct codes.
    #[error("can't generate {requested} unique coupons with pattern '{pattern}'; max possible: {capacity}")]
    CapacityExceeded {
        requested: u64,
        capacity: u128,
        pattern: String,
    },
}

/// Convenience alias for results returned by Coupongen crates.
pub type Result<T> = std::result::Result<T, Error>;
