//! Field-level validation metadata
//!
//! Rules are `'static` constants so forms can declare them next to their DTOs.

pub mod validation;

pub use validation::{FieldErrors, ValidationRules};
