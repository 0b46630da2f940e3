use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ActivityId, MoodId};

/// Body accepted by the text-to-speech proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    CheckIn,
    MoodChosen,
    ActivityChoice,
    Active,
    Report,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::CheckIn => "check_in",
            SessionPhase::MoodChosen => "mood_chosen",
            SessionPhase::ActivityChoice => "activity_choice",
            SessionPhase::Active => "active",
            SessionPhase::Report => "report",
        };
        f.write_str(name)
    }
}

/// User intents forwarded by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionIntent {
    SelectMood { mood: MoodId },
    ProceedToActivityChoice,
    SelectActivity { activity: ActivityId },
    TogglePause,
    Pause,
    Resume,
    RequestVoicePrompt,
    Finish,
    Reset,
}

impl SessionIntent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionIntent::SelectMood { .. } => "select_mood",
            SessionIntent::ProceedToActivityChoice => "proceed_to_activity_choice",
            SessionIntent::SelectActivity { .. } => "select_activity",
            SessionIntent::TogglePause => "toggle_pause",
            SessionIntent::Pause => "pause",
            SessionIntent::Resume => "resume",
            SessionIntent::RequestVoicePrompt => "request_voice_prompt",
            SessionIntent::Finish => "finish",
            SessionIntent::Reset => "reset",
        }
    }
}

/// Render-only view of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    pub phase: SessionPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityId>,
    pub running: bool,
    pub paused: bool,
    pub elapsed_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_elapsed_secs: Option<u64>,
    pub last_milestone_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub mood: MoodId,
    pub mood_label: String,
    pub activity: ActivityId,
    pub activity_name: String,
    pub started_at: DateTime<Utc>,
    pub total_elapsed_secs: u64,
    pub pause_count: u32,
    pub headline: String,
    pub closing: String,
}

impl SessionReport {
    /// `mm:ss`, or `h:mm:ss` past the hour.
    pub fn formatted_elapsed(&self) -> String {
        format_elapsed(self.total_elapsed_secs)
    }
}

pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
