//! Application config validation.
//!
//! Runs before any watch is loaded so a bad INI file fails fast.

use crate::domain::error::PricewatchError;
use crate::ports::config_port::ConfigPort;

pub fn validate_app_config(config: &dyn ConfigPort) -> Result<(), PricewatchError> {
    validate_paths(config)?;
    validate_timeout(config)?;
    validate_flags(config)?;
    validate_garmin_template(config)?;
    validate_garmin_defaults(config)?;
    Ok(())
}

fn validate_paths(config: &dyn ConfigPort) -> Result<(), PricewatchError> {
    for key in ["watches", "state"] {
        if let Some(s) = config.get_string("paths", key) {
            if s.trim().is_empty() {
                return Err(PricewatchError::ConfigInvalid {
                    section: "paths".to_string(),
                    key: key.to_string(),
                    reason: format!("{} path must not be empty", key),
                });
            }
        }
    }
    Ok(())
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), PricewatchError> {
    if config.get_u64("http", "timeout_secs")? == Some(0) {
        return Err(PricewatchError::ConfigInvalid {
            section: "http".to_string(),
            key: "timeout_secs".to_string(),
            reason: "timeout_secs must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_flags(config: &dyn ConfigPort) -> Result<(), PricewatchError> {
    config.get_bool("notify", "log_events")?;
    Ok(())
}

fn validate_garmin_template(config: &dyn ConfigPort) -> Result<(), PricewatchError> {
    match config.get_string("provider.garmin", "template") {
        Some(t) if !t.contains("{sku}") => Err(PricewatchError::ConfigInvalid {
            section: "provider.garmin".to_string(),
            key: "template".to_string(),
            reason: "template must contain {sku}".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_garmin_defaults(config: &dyn ConfigPort) -> Result<(), PricewatchError> {
    for (key, min_len) in [("country", 2), ("locale", 2), ("customer_group", 1)] {
        if let Some(v) = config.get_string("provider.garmin", key) {
            if v.trim().chars().count() < min_len {
                return Err(PricewatchError::ConfigInvalid {
                    section: "provider.garmin".to_string(),
                    key: key.to_string(),
                    reason: format!("{} must be at least {} characters", key, min_len),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_config_passes() {
        let config = make_config(
            r#"
[paths]
watches = config/watches.json
state = data/state.json

[http]
timeout_secs = 15

[provider.garmin]
template = https://example.com/{country}/products/{sku}/price
country = GB
locale = en-GB
customer_group = none
"#,
        );
        assert!(validate_app_config(&config).is_ok());
    }

    #[test]
    fn empty_config_passes() {
        assert!(validate_app_config(&make_config("")).is_ok());
    }

    #[test]
    fn timeout_zero_fails() {
        let config = make_config("[http]\ntimeout_secs = 0\n");
        let err = validate_app_config(&config).unwrap_err();
        assert!(matches!(err, PricewatchError::ConfigInvalid { key, .. } if key == "timeout_secs"));
    }

    #[test]
    fn timeout_negative_fails() {
        let config = make_config("[http]\ntimeout_secs = -3\n");
        assert!(validate_app_config(&config).is_err());
    }

    #[test]
    fn timeout_non_numeric_fails() {
        let config = make_config("[http]\ntimeout_secs = abc\n");
        let err = validate_app_config(&config).unwrap_err();
        assert!(matches!(
            err,
            PricewatchError::ConfigInvalid { ref key, ref reason, .. }
                if key == "timeout_secs" && reason.contains("`abc`")
        ));
    }

    #[test]
    fn log_events_must_be_boolean() {
        let config = make_config("[notify]\nlog_events = sometimes\n");
        let err = validate_app_config(&config).unwrap_err();
        assert!(matches!(err, PricewatchError::ConfigInvalid { key, .. } if key == "log_events"));
    }

    #[test]
    fn template_without_sku_fails() {
        let config = make_config("[provider.garmin]\ntemplate = https://example.com/{country}\n");
        let err = validate_app_config(&config).unwrap_err();
        assert!(matches!(err, PricewatchError::ConfigInvalid { key, .. } if key == "template"));
    }

    #[test]
    fn short_country_fails() {
        let config = make_config("[provider.garmin]\ncountry = U\n");
        let err = validate_app_config(&config).unwrap_err();
        assert!(matches!(err, PricewatchError::ConfigInvalid { key, .. } if key == "country"));
    }
}
