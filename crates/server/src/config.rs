use std::{collections::HashMap, fs, time::Duration};

use serde::Deserialize;

pub const DEFAULT_TTS_API_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_TTS_VOICE_ID: &str = "kPzsL2i3teMYv0FxEYQ6";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub tts_api_base_url: String,
    pub tts_voice_id: String,
    pub tts_api_key: Option<String>,
    pub tts_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            tts_api_base_url: DEFAULT_TTS_API_BASE_URL.into(),
            tts_voice_id: DEFAULT_TTS_VOICE_ID.into(),
            tts_api_key: None,
            tts_timeout_seconds: 30,
        }
    }
}

impl Settings {
    pub fn tts_timeout(&self) -> Duration {
        Duration::from_secs(self.tts_timeout_seconds.max(1))
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then the flat `server.toml` table, then environment variables.
/// Later `APP__*` names win over the short ones.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("tts_api_base_url") {
                settings.tts_api_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("tts_voice_id") {
                settings.tts_voice_id = v.clone();
            }
            if let Some(v) = file_cfg.get("tts_timeout_seconds") {
                if let Ok(parsed) = v.parse::<u64>() {
                    settings.tts_timeout_seconds = parsed;
                }
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("TTS_API_BASE_URL") {
        settings.tts_api_base_url = v;
    }
    if let Some(v) = env("APP__TTS_API_BASE_URL") {
        settings.tts_api_base_url = v;
    }

    if let Some(v) = env("TTS_VOICE_ID") {
        settings.tts_voice_id = v;
    }
    if let Some(v) = env("APP__TTS_VOICE_ID") {
        settings.tts_voice_id = v;
    }

    if let Some(v) = env("VOICE_ELEVEN") {
        settings.tts_api_key = Some(v);
    }
    if let Some(v) = env("APP__TTS_API_KEY") {
        settings.tts_api_key = Some(v);
    }
    settings.tts_api_key = settings
        .tts_api_key
        .take()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    if let Some(v) = env("APP__TTS_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.tts_timeout_seconds = parsed;
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
