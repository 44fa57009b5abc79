//! Port traits consumed by the domain.

pub mod config_port;
pub mod notifier_port;
pub mod provider_port;
pub mod state_port;
