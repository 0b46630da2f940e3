use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::{sink::AudioSink, tts::SpeechSynthesizer, SpeechRequest, VoicePromptService};

/// Speaks prompts through a synthesizer on a background task.
///
/// Each request becomes its own task: it waits out the request delay,
/// synthesizes, and hands the audio to the sink. Failures are logged and
/// dropped. Without a tokio runtime the prompt is skipped.
pub struct TtsVoice<S, A> {
    synthesizer: Arc<S>,
    sink: Arc<A>,
}

impl<S, A> TtsVoice<S, A>
where
    S: SpeechSynthesizer + 'static,
    A: AudioSink + 'static,
{
    pub fn new(synthesizer: S, sink: A) -> Self {
        Self {
            synthesizer: Arc::new(synthesizer),
            sink: Arc::new(sink),
        }
    }
}

impl<S, A> VoicePromptService for TtsVoice<S, A>
where
    S: SpeechSynthesizer + 'static,
    A: AudioSink + 'static,
{
    fn speak(&self, request: SpeechRequest) {
        let Ok(handle) = Handle::try_current() else {
            debug!(text = %request.text, "voice: no runtime available, prompt skipped");
            return;
        };

        let synthesizer = Arc::clone(&self.synthesizer);
        let sink = Arc::clone(&self.sink);
        handle.spawn(async move {
            if !request.delay.is_zero() {
                tokio::time::sleep(request.delay).await;
            }

            let audio = match synthesizer.synthesize(&request.text).await {
                Ok(audio) => audio,
                Err(error) => {
                    warn!(%error, text = %request.text, "voice: synthesis failed");
                    return;
                }
            };

            if let Err(error) = sink.play(&request.text, audio).await {
                warn!(%error, text = %request.text, "voice: playback failed");
            }
        });
    }
}

#[cfg(test)]
#[path = "tests/spoken_tests.rs"]
mod tests;
