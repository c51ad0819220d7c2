pub mod aggregate;

pub use aggregate::{CreateSourceDto, Source, SourceDraft};
