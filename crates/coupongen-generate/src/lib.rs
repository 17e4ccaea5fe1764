//! Coupon generation engine for Coupongen.
//!
//! Draws pattern-shaped codes from the operating system's secure random
//! source, keeps them unique, and exports them as single-column CSV.

pub mod engine;
pub mod errors;
pub mod model;
pub mod output;
pub mod random;

pub use engine::{CouponBatch, CouponGenerator, GenerationResult, draw_code};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, GenerationStats, RunStatus};
pub use output::csv::{read_codes, write_codes_csv};
