//! INI file configuration adapter.

use crate::domain::error::PricewatchError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// An adapter with no sections; every key reads as absent.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    /// Trimmed value for `[section] key`; blank values count as absent.
    fn raw(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn typed<T>(
        &self,
        section: &str,
        key: &str,
        expected: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, PricewatchError> {
        let Some(raw) = self.raw(section, key) else {
            return Ok(None);
        };
        parse(&raw)
            .map(Some)
            .ok_or_else(|| PricewatchError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("expected {}, got `{}`", expected, raw),
            })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_u64(&self, section: &str, key: &str) -> Result<Option<u64>, PricewatchError> {
        self.typed(section, key, "a non-negative integer", |v| v.parse().ok())
    }

    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, PricewatchError> {
        self.typed(section, key, "a boolean (true/false, yes/no, on/off, 1/0)", parse_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[paths]
watches = config/watches.json
state = data/state.json

[provider.garmin]
country = GB
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("paths", "watches"),
            Some("config/watches.json".to_string())
        );
        assert_eq!(
            adapter.get_string("provider.garmin", "country"),
            Some("GB".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[paths]\nstate = s.json\n").unwrap();
        assert_eq!(adapter.get_string("paths", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_u64_parses_value() {
        let adapter = FileConfigAdapter::from_string("[http]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(adapter.get_u64("http", "timeout_secs").unwrap(), Some(5));
    }

    #[test]
    fn get_u64_absent_is_none() {
        let adapter = FileConfigAdapter::from_string("[http]\n").unwrap();
        assert_eq!(adapter.get_u64("http", "missing").unwrap(), None);
        assert_eq!(adapter.get_u64("nowhere", "timeout_secs").unwrap(), None);
    }

    #[test]
    fn get_u64_rejects_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[http]\ntimeout_secs = abc\n").unwrap();
        let err = adapter.get_u64("http", "timeout_secs").unwrap_err();
        assert!(matches!(
            err,
            PricewatchError::ConfigInvalid { ref section, ref key, ref reason }
                if section == "http" && key == "timeout_secs" && reason.contains("`abc`")
        ));
    }

    #[test]
    fn get_u64_rejects_negative() {
        let adapter = FileConfigAdapter::from_string("[http]\ntimeout_secs = -3\n").unwrap();
        assert!(adapter.get_u64("http", "timeout_secs").is_err());
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[notify]\na = true\nb = YES\nc = on\nd = 0\ne = no\nf = False\n",
        )
        .unwrap();
        for key in ["a", "b", "c"] {
            assert_eq!(adapter.get_bool("notify", key).unwrap(), Some(true), "{key}");
        }
        for key in ["d", "e", "f"] {
            assert_eq!(adapter.get_bool("notify", key).unwrap(), Some(false), "{key}");
        }
    }

    #[test]
    fn get_bool_absent_is_none() {
        let adapter = FileConfigAdapter::from_string("[notify]\n").unwrap();
        assert_eq!(adapter.get_bool("notify", "log_events").unwrap(), None);
    }

    #[test]
    fn get_bool_rejects_garbage() {
        let adapter = FileConfigAdapter::from_string("[notify]\nlog_events = maybe\n").unwrap();
        assert!(matches!(
            adapter.get_bool("notify", "log_events"),
            Err(PricewatchError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn empty_adapter_has_no_values() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("paths", "state"), None);
        assert_eq!(adapter.get_u64("http", "timeout_secs").unwrap(), None);
        assert_eq!(adapter.get_bool("notify", "log_events").unwrap(), None);
    }

    #[test]
    fn from_file_reads_config() {
        let content = "[provider.garmin]\ntemplate = https://example.com/{country}/{sku}\n";
        let file = create_temp_config(content);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("provider.garmin", "template"),
            Some("https://example.com/{country}/{sku}".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/pricewatch.ini");
        assert!(result.is_err());
    }
}
