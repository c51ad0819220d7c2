//! "Add Log Source" dialog
//!
//! - state.rs: dialog state machine and submission rules (no browser APIs)
//! - view_model.rs: signals, API call and side effects
//! - view.rs: Leptos components

pub mod state;
mod view;
mod view_model;

pub use view::AddSourceDialog;
pub use view_model::AddSourceViewModel;
