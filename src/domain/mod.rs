//! Core domain types and logic.

pub mod snapshot;
pub mod rule;
pub mod state;
pub mod rule_eval;
pub mod watch;
pub mod registry;
pub mod run;
pub mod settings;
pub mod config_validation;
pub mod error;
