//! Domain error types.

/// Top-level error type for pricewatch.
#[derive(Debug, thiserror::Error)]
pub enum PricewatchError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("watch list error in {file}: {reason}")]
    WatchList { file: String, reason: String },

    #[error("duplicate watch id: {id}")]
    DuplicateWatchId { id: String },

    #[error("Unknown provider: {name}")]
    UnknownProvider { name: String },

    #[error("invalid {provider} config: {reason}")]
    ProviderConfig { provider: String, reason: String },

    #[error("Request failed ({status}) GET {url}")]
    Http {
        status: u16,
        url: String,
        snippet: Option<String>,
    },

    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    #[error("Missing template variable: {{{key}}}")]
    MissingTemplateVar { key: String },

    #[error("unknown rule type: {rule_type}")]
    UnknownRule { rule_type: String },

    #[error("invalid rule {rule_type}: {reason}")]
    RuleInvalid { rule_type: String, reason: String },

    #[error("rule not implemented: {rule}")]
    RuleNotImplemented { rule: String },

    #[error("cannot evaluate {watch_id}: snapshot is missing {missing}")]
    IndeterminateSnapshot { watch_id: String, missing: String },

    #[error("state store error at {path}: {reason}")]
    StateStore { path: String, reason: String },

    #[error("notifier error: {reason}")]
    Notify { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PricewatchError {
    /// Start of the response body for a failed request, if one was captured.
    pub fn response_snippet(&self) -> Option<&str> {
        match self {
            PricewatchError::Http { snippet, .. } => snippet.as_deref(),
            _ => None,
        }
    }
}

impl From<&PricewatchError> for std::process::ExitCode {
    fn from(err: &PricewatchError) -> Self {
        let code: u8 = match err {
            PricewatchError::Io(_)
            | PricewatchError::StateStore { .. }
            | PricewatchError::Notify { .. } => 1,
            PricewatchError::ConfigParse { .. }
            | PricewatchError::ConfigInvalid { .. }
            | PricewatchError::WatchList { .. }
            | PricewatchError::DuplicateWatchId { .. } => 2,
            PricewatchError::UnknownProvider { .. }
            | PricewatchError::ProviderConfig { .. }
            | PricewatchError::Http { .. }
            | PricewatchError::Network { .. }
            | PricewatchError::InvalidResponse { .. }
            | PricewatchError::MissingTemplateVar { .. } => 3,
            PricewatchError::UnknownRule { .. }
            | PricewatchError::RuleInvalid { .. }
            | PricewatchError::RuleNotImplemented { .. }
            | PricewatchError::IndeterminateSnapshot { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
