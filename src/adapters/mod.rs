//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod json_state_adapter;
pub mod log_notifier;
pub mod providers;
pub mod watch_file_adapter;
