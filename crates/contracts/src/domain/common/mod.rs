//! Common types shared by all entities

pub mod record_id;

pub use record_id::RecordId;
