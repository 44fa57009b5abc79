//! Application settings port.
//!
//! Settings are addressed by INI-style `[section] key` pairs. Typed getters
//! return `Ok(None)` for an absent key and `ConfigInvalid` for a value that is
//! present but does not parse, so callers never mistake a typo for a default.

use crate::domain::error::PricewatchError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_u64(&self, section: &str, key: &str) -> Result<Option<u64>, PricewatchError>;
    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, PricewatchError>;
}
