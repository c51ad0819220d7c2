pub mod a001_log_source;
pub mod common;
