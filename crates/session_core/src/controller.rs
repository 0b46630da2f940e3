use std::time::{Duration, Instant};

use chrono::Utc;
use shared::{
    domain::{Activity, ActivityId, Mood},
    protocol::{SessionPhase, SessionReport, SessionSnapshot},
};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;
use voice_integration::{SpeechRequest, VoicePromptService, VoiceSettings};

use crate::{
    clock::Clock,
    cues::{milestone_boundary, VoiceCue},
    session::Session,
    timer::SessionClock,
};

/// Delay between starting an activity and its spoken start cue.
pub const START_CUE_DELAY: Duration = Duration::from_millis(1500);

const RELAX_HEADLINE: &str = "Autocuidado também é exercício! Você merece esse momento.";
const ACTIVE_HEADLINE: &str = "Você está fazendo algo incrível por você mesmo hoje!";
const REPORT_CLOSING: &str =
    "Lembre-se: não existe movimento pequeno demais. O importante é começar. 💙";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{operation} is not valid during {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: SessionPhase,
    },
    #[error("session is already paused")]
    AlreadyPaused,
    #[error("session is not paused")]
    NotPaused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseState {
    Paused,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub elapsed_secs: u64,
    pub milestone: Option<VoiceCue>,
}

/// Drives one session through check-in, activity choice, the timed workout
/// and the report. Voice cues go to the injected service and are never
/// awaited.
pub struct SessionController<C, V> {
    clock: C,
    voice: V,
    settings: VoiceSettings,
    session: Session,
}

impl<C: Clock, V: VoicePromptService> SessionController<C, V> {
    pub fn new(clock: C, voice: V) -> Self {
        Self::with_settings(clock, voice, VoiceSettings::default())
    }

    pub fn with_settings(clock: C, voice: V, settings: VoiceSettings) -> Self {
        Self {
            clock,
            voice,
            settings,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot(self.clock.now())
    }

    pub fn select_mood(&mut self, mood: Mood) -> Result<(), SessionError> {
        self.expect_phase("select_mood", SessionPhase::CheckIn)?;
        let id = Uuid::new_v4();
        self.session.id = Some(id);
        self.session.mood = Some(mood);
        self.session.phase = SessionPhase::MoodChosen;
        info!(session_id = %id, mood = %mood.id, "session: mood selected");
        Ok(())
    }

    pub fn proceed_to_activity_choice(&mut self) -> Result<(), SessionError> {
        self.expect_phase("proceed_to_activity_choice", SessionPhase::MoodChosen)?;
        self.session.phase = SessionPhase::ActivityChoice;
        debug!("session: choosing activity");
        Ok(())
    }

    pub fn select_activity(&mut self, activity: Activity) -> Result<(), SessionError> {
        self.expect_phase("select_activity", SessionPhase::ActivityChoice)?;
        let now = self.clock.now();
        self.session.activity = Some(activity);
        self.session.clock = Some(SessionClock::start(now));
        self.session.final_elapsed = None;
        self.session.last_milestone_minutes = 0;
        self.session.pause_count = 0;
        self.session.started_at = Some(Utc::now());
        self.session.phase = SessionPhase::Active;
        info!(activity = %activity.id, "session: workout started");

        self.emit_after(
            VoiceCue::Start {
                activity: activity.id,
            },
            START_CUE_DELAY,
        );
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<PauseState, SessionError> {
        self.expect_phase("toggle_pause", SessionPhase::Active)?;
        if self.session.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    pub fn pause(&mut self) -> Result<PauseState, SessionError> {
        self.expect_phase("pause", SessionPhase::Active)?;
        let now = self.clock.now();
        let clock = self.active_clock_mut("pause")?;
        if clock.is_paused() {
            return Err(SessionError::AlreadyPaused);
        }
        clock.pause(now);
        let elapsed_secs = clock.elapsed_secs(now);
        self.session.pause_count += 1;
        info!(elapsed_secs, "session: paused");
        self.emit(VoiceCue::Pause);
        Ok(PauseState::Paused)
    }

    pub fn resume(&mut self) -> Result<PauseState, SessionError> {
        self.expect_phase("resume", SessionPhase::Active)?;
        let now = self.clock.now();
        let clock = self.active_clock_mut("resume")?;
        if !clock.resume(now) {
            return Err(SessionError::NotPaused);
        }
        let accumulated_pause_secs = clock.accumulated_pause().as_secs();
        info!(accumulated_pause_secs, "session: resumed");
        self.emit(VoiceCue::Resume);
        Ok(PauseState::Running)
    }

    /// Periodic timer callback. Fires at most one milestone cue per 5-minute
    /// boundary for the whole session, however often it is called.
    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome, SessionError> {
        self.expect_phase("tick", SessionPhase::Active)?;
        let clock = self.active_clock_mut("tick")?;
        let elapsed_secs = clock.elapsed_secs(now);
        if clock.is_paused() {
            return Ok(TickOutcome {
                elapsed_secs,
                milestone: None,
            });
        }

        let milestone = milestone_boundary(elapsed_secs / 60)
            .filter(|boundary| *boundary > self.session.last_milestone_minutes)
            .map(|boundary| {
                self.session.last_milestone_minutes = boundary;
                VoiceCue::Milestone { minutes: boundary }
            });
        if let Some(cue) = milestone {
            info!(elapsed_secs, "session: milestone reached");
            self.emit(cue);
        }

        Ok(TickOutcome {
            elapsed_secs,
            milestone,
        })
    }

    pub fn request_voice_prompt(&mut self) -> Result<VoiceCue, SessionError> {
        self.expect_phase("request_voice_prompt", SessionPhase::Active)?;
        let minutes = self.session.elapsed(self.clock.now()).as_secs() / 60;
        let cue = VoiceCue::on_demand(minutes);
        self.emit(cue);
        Ok(cue)
    }

    pub fn finish(&mut self) -> Result<SessionReport, SessionError> {
        self.expect_phase("finish", SessionPhase::Active)?;
        let now = self.clock.now();
        let total = self.active_clock_mut("finish")?.stop(now);
        self.session.final_elapsed = Some(total);
        self.session.phase = SessionPhase::Report;
        info!(total_elapsed_secs = total.as_secs(), "session: workout finished");

        self.emit(VoiceCue::Completion {
            minutes: total.as_secs() / 60,
        });
        self.report().ok_or(SessionError::InvalidPhase {
            operation: "finish",
            phase: self.session.phase,
        })
    }

    /// Report for a finished session; `None` outside the report phase.
    pub fn report(&self) -> Option<SessionReport> {
        if self.session.phase != SessionPhase::Report {
            return None;
        }
        let mood = self.session.mood?;
        let activity = self.session.activity?;
        let headline = match activity.id {
            ActivityId::Relax => RELAX_HEADLINE,
            _ => ACTIVE_HEADLINE,
        };
        Some(SessionReport {
            session_id: self.session.id?,
            mood: mood.id,
            mood_label: mood.label.to_string(),
            activity: activity.id,
            activity_name: activity.name.to_string(),
            started_at: self.session.started_at?,
            total_elapsed_secs: self.session.final_elapsed?.as_secs(),
            pause_count: self.session.pause_count,
            headline: headline.to_string(),
            closing: REPORT_CLOSING.to_string(),
        })
    }

    /// Back to check-in from any phase, dropping everything the session held.
    pub fn reset(&mut self) {
        let previous = self.session.phase;
        self.session = Session::default();
        info!(%previous, "session: reset");
    }

    fn expect_phase(
        &self,
        operation: &'static str,
        expected: SessionPhase,
    ) -> Result<(), SessionError> {
        if self.session.phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                operation,
                phase: self.session.phase,
            })
        }
    }

    fn active_clock_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut SessionClock, SessionError> {
        let phase = self.session.phase;
        self.session
            .clock
            .as_mut()
            .filter(|clock| clock.is_running())
            .ok_or(SessionError::InvalidPhase { operation, phase })
    }

    fn emit(&self, cue: VoiceCue) {
        self.emit_after(cue, Duration::ZERO);
    }

    fn emit_after(&self, cue: VoiceCue, delay: Duration) {
        debug!(?cue, "session: voice cue");
        self.voice
            .speak(SpeechRequest::new(cue.text(), &self.settings).delayed(delay));
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
