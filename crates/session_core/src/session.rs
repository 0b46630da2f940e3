use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use shared::{
    domain::{Activity, Mood},
    protocol::{SessionPhase, SessionSnapshot},
};
use uuid::Uuid;

use crate::timer::SessionClock;

/// Everything one wellness session owns. `Session::default()` is the
/// freshly created check-in state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) id: Option<Uuid>,
    pub(crate) phase: SessionPhase,
    pub(crate) mood: Option<Mood>,
    pub(crate) activity: Option<Activity>,
    pub(crate) clock: Option<SessionClock>,
    pub(crate) final_elapsed: Option<Duration>,
    pub(crate) last_milestone_minutes: u64,
    pub(crate) pause_count: u32,
    pub(crate) started_at: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            id: None,
            phase: SessionPhase::CheckIn,
            mood: None,
            activity: None,
            clock: None,
            final_elapsed: None,
            last_milestone_minutes: 0,
            pause_count: 0,
            started_at: None,
        }
    }
}

impl Session {
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn activity(&self) -> Option<Activity> {
        self.activity
    }

    pub fn clock(&self) -> Option<&SessionClock> {
        self.clock.as_ref()
    }

    pub fn final_elapsed(&self) -> Option<Duration> {
        self.final_elapsed
    }

    pub fn last_milestone_minutes(&self) -> u64 {
        self.last_milestone_minutes
    }

    pub fn is_paused(&self) -> bool {
        self.clock.as_ref().is_some_and(SessionClock::is_paused)
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.final_elapsed, &self.clock) {
            (Some(total), _) => total,
            (None, Some(clock)) => clock.elapsed(now),
            (None, None) => Duration::ZERO,
        }
    }

    pub fn snapshot(&self, now: Instant) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            phase: self.phase,
            mood: self.mood.map(|mood| mood.id),
            activity: self.activity.map(|activity| activity.id),
            running: self.clock.as_ref().is_some_and(SessionClock::is_running),
            paused: self.is_paused(),
            elapsed_secs: self.elapsed(now).as_secs(),
            final_elapsed_secs: self.final_elapsed.map(|total| total.as_secs()),
            last_milestone_minutes: self.last_milestone_minutes,
        }
    }
}
