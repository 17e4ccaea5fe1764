//! Core contracts for Coupongen.
//!
//! This crate defines the fixed character sets, the coupon pattern model and
//! the capacity check shared by the generator and the CLI.

pub mod charset;
pub mod error;
pub mod pattern;

pub use charset::{CharsetKind, DIGITS, LETTERS, SYMBOLS};
pub use error::{Error, Result};
pub use pattern::{Pattern, Token};

/// Pattern used when none is supplied.
pub const DEFAULT_PATTERN: &str = "AA-DDDD-AA";

/// Number of codes generated when no amount is supplied.
pub const DEFAULT_COUNT: u64 = 10_000;
