use std::sync::Arc;

use shared::dashboard::DashboardData;
use voice_integration::SpeechSynthesizer;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) synthesizer: Arc<dyn SpeechSynthesizer>,
    pub(crate) dashboard: Arc<DashboardData>,
}
