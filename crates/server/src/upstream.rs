use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::debug;
use url::Url;
use voice_integration::{
    tts::{parse_base_url, SpeechSynthesizer},
    TtsError,
};

use crate::config::Settings;

const API_KEY_HEADER: &str = "xi-api-key";
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Serialize)]
struct UpstreamRequest<'a> {
    text: &'a str,
}

/// Third-party text-to-speech API. One call per request, no retries.
#[derive(Debug, Clone)]
pub struct UpstreamTts {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl UpstreamTts {
    pub fn from_settings(settings: &Settings) -> Result<Self, TtsError> {
        let http = Client::builder().timeout(settings.tts_timeout()).build()?;
        Self::new(
            http,
            &settings.tts_api_base_url,
            &settings.tts_voice_id,
            settings.tts_api_key.clone(),
        )
    }

    pub fn new(
        http: Client,
        base_url: &str,
        voice_id: &str,
        api_key: Option<String>,
    ) -> Result<Self, TtsError> {
        let route = format!("v1/text-to-speech/{}", voice_id.trim());
        let endpoint = parse_base_url(base_url)?
            .join(&route)
            .map_err(|source| TtsError::InvalidUrl {
                url: format!("{base_url}/{route}"),
                source,
            })?;
        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SpeechSynthesizer for UpstreamTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "audio/mpeg")
            .json(&UpstreamRequest { text });
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::Rejected {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }
        debug!(size_bytes = audio.len(), "tts upstream: audio received");
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
#[path = "tests/upstream_tests.rs"]
mod tests;
