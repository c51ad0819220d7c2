//! Wire types and validation rules shared by the log sources front end.

pub mod domain;
pub mod shared;
pub mod system;
