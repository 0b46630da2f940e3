use std::time::{Duration, Instant};

/// Wall-clock accounting for one workout.
///
/// Elapsed time is always `reference - start - accumulated_pause`, where the
/// reference is `now` while running, the pause instant while paused, and the
/// stop instant once stopped. Tick counts never enter the computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClock {
    start: Instant,
    accumulated_pause: Duration,
    running: bool,
    paused: bool,
    pause_started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl SessionClock {
    pub fn start(now: Instant) -> Self {
        Self {
            start: now,
            accumulated_pause: Duration::ZERO,
            running: true,
            paused: false,
            pause_started_at: None,
            stopped_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn accumulated_pause(&self) -> Duration {
        self.accumulated_pause
    }

    /// Freezes elapsed time. Returns false if not running or already paused.
    pub fn pause(&mut self, now: Instant) -> bool {
        if !self.running || self.paused {
            return false;
        }
        self.paused = true;
        self.pause_started_at = Some(now);
        true
    }

    /// Books the pause interval. Returns false unless currently paused.
    pub fn resume(&mut self, now: Instant) -> bool {
        let Some(pause_started_at) = self.pause_started_at.filter(|_| self.paused) else {
            return false;
        };
        self.accumulated_pause += now.saturating_duration_since(pause_started_at);
        self.paused = false;
        self.pause_started_at = None;
        true
    }

    /// Stops the clock for good; an open pause stays excluded from elapsed.
    pub fn stop(&mut self, now: Instant) -> Duration {
        let elapsed = self.elapsed(now);
        let stopped_at = self.pause_started_at.unwrap_or(now);
        self.stopped_at = Some(stopped_at.max(self.start));
        self.running = false;
        self.paused = false;
        self.pause_started_at = None;
        elapsed
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let reference = match (self.stopped_at, self.pause_started_at) {
            (Some(stopped_at), _) => stopped_at,
            (None, Some(paused_at)) if self.paused => paused_at,
            _ => now,
        };
        reference
            .saturating_duration_since(self.start)
            .saturating_sub(self.accumulated_pause)
    }

    /// Whole elapsed seconds, floored.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.elapsed(now).as_secs()
    }
}

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod tests;
