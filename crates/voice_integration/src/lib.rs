//! Voice prompt delivery: the fire-and-forget contract used by the session
//! controller and the text-to-speech plumbing behind it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub mod sink;
pub mod spoken;
pub mod tts;

pub use sink::{AudioSink, DirectorySink};
pub use spoken::TtsVoice;
pub use tts::{ProxyTtsClient, SpeechSynthesizer, TtsError};

pub const DEFAULT_LOCALE: &str = "pt-BR";

/// Locale and prosody applied to every spoken prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub locale: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.into(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub locale: String,
    pub rate: f32,
    pub pitch: f32,
    /// How long to wait before speaking. Zero means right away.
    #[serde(default)]
    pub delay: Duration,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, settings: &VoiceSettings) -> Self {
        Self {
            text: text.into(),
            locale: settings.locale.clone(),
            rate: settings.rate,
            pitch: settings.pitch,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Produces audible speech for short prompts.
///
/// `speak` must return immediately: implementations hand the request off
/// and never report failure back to the caller.
pub trait VoicePromptService: Send + Sync {
    fn speak(&self, request: SpeechRequest);
}

/// Used when no speech capability is available; every prompt is skipped.
pub struct SilentVoice;

impl VoicePromptService for SilentVoice {
    fn speak(&self, request: SpeechRequest) {
        debug!(text = %request.text, "voice: capability unavailable, prompt skipped");
    }
}

/// Writes prompts to the log instead of speaking them.
pub struct LogVoice;

impl VoicePromptService for LogVoice {
    fn speak(&self, request: SpeechRequest) {
        info!(
            locale = %request.locale,
            delay_ms = request.delay.as_millis() as u64,
            "voice: {}",
            request.text
        );
    }
}

impl<T: VoicePromptService + ?Sized> VoicePromptService for std::sync::Arc<T> {
    fn speak(&self, request: SpeechRequest) {
        (**self).speak(request)
    }
}
