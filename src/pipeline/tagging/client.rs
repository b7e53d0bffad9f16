use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use serde::Serialize;

use super::types::{EntityTagger, TaggedToken};
use super::TaggingError;
use crate::config::TaggerConfig;

/// HTTP client for a hosted token-classification endpoint.
///
/// The underlying HTTP client is built on first use, so constructing an
/// `InferenceTagger` never touches the network or TLS stack.
pub struct InferenceTagger {
    base_url: String,
    model: String,
    api_token: Option<String>,
    timeout_secs: u64,
    client: OnceLock<reqwest::blocking::Client>,
}

impl InferenceTagger {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.trim_matches('/').to_string(),
            api_token: None,
            timeout_secs,
            client: OnceLock::new(),
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.api_token = Some(token.to_string());
        self
    }

    pub fn from_config(config: &TaggerConfig) -> Self {
        let tagger = Self::new(&config.base_url, &config.model, config.timeout_secs);
        match &config.api_token {
            Some(token) => tagger.with_token(token),
            None => tagger,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    fn http(&self) -> Result<&reqwest::blocking::Client, TaggingError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| TaggingError::HttpClient(e.to_string()))?;
        Ok(self.client.get_or_init(|| client))
    }
}

/// Request body for the token-classification endpoint.
#[derive(Serialize)]
struct TagRequest<'a> {
    inputs: &'a str,
    parameters: TagParameters,
}

#[derive(Serialize)]
struct TagParameters {
    aggregation_strategy: &'static str,
}

impl EntityTagger for InferenceTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggingError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let body = TagRequest {
            inputs: text,
            parameters: TagParameters {
                aggregation_strategy: "simple",
            },
        };

        let mut request = self.http()?.post(self.endpoint()).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            if e.is_connect() {
                TaggingError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                TaggingError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                TaggingError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TaggingError::Service {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<TaggedToken>>()
            .map_err(|e| TaggingError::MalformedResponse(e.to_string()))
    }
}

/// Mock tagger for testing — returns fixed output or a fixed failure.
pub struct MockTagger {
    output: Result<Vec<TaggedToken>, String>,
    calls: AtomicUsize,
}

impl MockTagger {
    pub fn new(tokens: Vec<TaggedToken>) -> Self {
        Self {
            output: Ok(tokens),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            output: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EntityTagger for MockTagger {
    fn tag(&self, _text: &str) -> Result<Vec<TaggedToken>, TaggingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output
            .clone()
            .map_err(TaggingError::Unavailable)
    }
}
