/// Application-level constants
pub const APP_NAME: &str = "tradeconf";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_TAGGER_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_TAGGER_MODEL: &str = "dslim/bert-base-NER";
pub const DEFAULT_TAGGER_TIMEOUT_SECS: u64 = 60;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "tradeconf=info,tradeconf_lib=info"
}

/// Settings for the hosted entity tagger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggerConfig {
    pub base_url: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl TaggerConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (testable without touching env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match non_empty("TRADECONF_TAGGER_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid tagger timeout, using default");
                DEFAULT_TAGGER_TIMEOUT_SECS
            }),
            None => DEFAULT_TAGGER_TIMEOUT_SECS,
        };

        Self {
            base_url: non_empty("TRADECONF_TAGGER_URL")
                .unwrap_or_else(|| DEFAULT_TAGGER_URL.to_string()),
            model: non_empty("TRADECONF_TAGGER_MODEL")
                .unwrap_or_else(|| DEFAULT_TAGGER_MODEL.to_string()),
            api_token: non_empty("HF_TOKEN"),
            timeout_secs,
        }
    }
}
