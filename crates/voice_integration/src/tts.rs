use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{error::ApiError, protocol::TtsRequest};
use thiserror::Error;
use url::Url;

const TTS_ROUTE: &str = "api/tts";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("invalid text-to-speech url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unsupported text-to-speech url scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("text to speak is empty")]
    EmptyText,
    #[error("text-to-speech transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("text-to-speech service rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("text-to-speech service returned no audio")]
    EmptyAudio,
}

/// Turns text into encoded audio (`audio/mpeg`).
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError>;
}

/// Parses an http(s) base URL and guarantees a trailing slash so relative
/// joins keep the full path.
pub fn parse_base_url(raw: &str) -> Result<Url, TtsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let mut url = Url::parse(trimmed).map_err(|source| TtsError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(TtsError::UnsupportedScheme(other.to_string())),
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Client for the proxy's `POST /api/tts` endpoint.
#[derive(Debug, Clone)]
pub struct ProxyTtsClient {
    http: Client,
    endpoint: Url,
}

impl ProxyTtsClient {
    pub fn new(base_url: &str) -> Result<Self, TtsError> {
        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, TtsError> {
        let base = parse_base_url(base_url)?;
        let endpoint = base.join(TTS_ROUTE).map_err(|source| TtsError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SpeechSynthesizer for ProxyTtsClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        if text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&TtsRequest {
                text: text.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body).unwrap_or(body);
            return Err(TtsError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }
        Ok(audio.to_vec())
    }
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiError>(body)
        .ok()
        .map(|error| error.message)
}

#[cfg(test)]
#[path = "tests/tts_tests.rs"]
mod tests;
