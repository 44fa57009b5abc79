//! Resolved application settings.

use std::path::PathBuf;

pub const DEFAULT_WATCHES_PATH: &str = "config/watches.json";
pub const DEFAULT_STATE_PATH: &str = "data/state.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub watches_path: PathBuf,
    pub state_path: PathBuf,
    pub http: HttpSettings,
    pub garmin: GarminSettings,
    /// Route transition events to the log notifier instead of the no-op one.
    pub log_events: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

/// Garmin endpoint and query defaults; watch config takes precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct GarminSettings {
    pub template: Option<String>,
    pub country: String,
    pub locale: String,
    pub customer_group: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            watches_path: PathBuf::from(DEFAULT_WATCHES_PATH),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            http: HttpSettings::default(),
            garmin: GarminSettings::default(),
            log_events: false,
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl Default for GarminSettings {
    fn default() -> Self {
        Self {
            template: None,
            country: "US".to_string(),
            locale: "en-US".to_string(),
            customer_group: "none".to_string(),
        }
    }
}
