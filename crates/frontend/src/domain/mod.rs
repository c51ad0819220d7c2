pub mod a001_log_source;
