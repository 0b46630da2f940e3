//! Single-task event loop around the controller.
//!
//! One tokio task owns the [`SessionController`] and handles one message at a
//! time: intents from [`SessionHandle`]s and ticks from the [`TickTask`]. The
//! tick task only exists while the session is active and is aborted the
//! moment the session leaves that phase.

use std::time::Duration;

use shared::{
    catalog,
    protocol::{SessionIntent, SessionPhase, SessionReport, SessionSnapshot},
};
use thiserror::Error;
use tokio::{
    sync::{broadcast, mpsc, oneshot},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};
use voice_integration::VoicePromptService;

use crate::{
    clock::Clock,
    controller::{SessionController, SessionError},
    cues::VoiceCue,
};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
const COMMAND_QUEUE_CAPACITY: usize = 64;
const TICK_QUEUE_CAPACITY: usize = 8;
const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("session runtime has stopped")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Updated(SessionSnapshot),
    Prompted(VoiceCue),
    Finished(SessionReport),
}

/// Broadcast to every subscriber of a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Ticked { elapsed_secs: u64 },
    Milestone { minutes: u64 },
    PhaseChanged(SessionSnapshot),
}

enum Command {
    Intent {
        intent: SessionIntent,
        reply: oneshot::Sender<Result<IntentOutcome, SessionError>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Cancellable 1-second ticker. Every tick it sends carries its generation so
/// ticks still queued after cancellation can be told apart.
pub struct TickTask {
    generation: u64,
    handle: JoinHandle<()>,
}

impl TickTask {
    pub fn spawn(generation: u64, period: Duration, ticks: mpsc::Sender<u64>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(generation).await.is_err() {
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub async fn dispatch(&self, intent: SessionIntent) -> Result<IntentOutcome, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Intent { intent, reply })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        Ok(rx.await.map_err(|_| RuntimeError::Closed)??)
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| RuntimeError::Closed)?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

pub struct SessionRuntime<C, V> {
    controller: SessionController<C, V>,
    tick_period: Duration,
    ticker: Option<TickTask>,
    next_generation: u64,
    ticks_tx: mpsc::Sender<u64>,
    events: broadcast::Sender<SessionEvent>,
}

impl<C, V> SessionRuntime<C, V>
where
    C: Clock + 'static,
    V: VoicePromptService + 'static,
{
    /// Spawns the loop on the current tokio runtime. It runs until every
    /// handle is dropped.
    pub fn spawn(controller: SessionController<C, V>) -> SessionHandle {
        Self::spawn_with_period(controller, TICK_PERIOD)
    }

    pub fn spawn_with_period(
        controller: SessionController<C, V>,
        tick_period: Duration,
    ) -> SessionHandle {
        let (commands, commands_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let (ticks_tx, ticks_rx) = mpsc::channel(TICK_QUEUE_CAPACITY);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let runtime = SessionRuntime {
            controller,
            tick_period,
            ticker: None,
            next_generation: 0,
            ticks_tx,
            events: events.clone(),
        };
        tokio::spawn(runtime.run(commands_rx, ticks_rx));

        SessionHandle { commands, events }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut ticks: mpsc::Receiver<u64>,
    ) {
        loop {
            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(generation) = ticks.recv() => self.handle_tick(generation),
            }
        }
        self.stop_ticker();
        debug!("session runtime: all handles dropped, loop finished");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Intent { intent, reply } => {
                let name = intent.name();
                let before = self.controller.phase();
                let outcome = self.apply(intent);
                if let Err(error) = &outcome {
                    warn!(intent = name, %error, "session runtime: intent rejected");
                }
                self.sync_ticker();
                if self.controller.phase() != before {
                    let _ = self
                        .events
                        .send(SessionEvent::PhaseChanged(self.controller.snapshot()));
                }
                let _ = reply.send(outcome);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.controller.snapshot());
            }
        }
    }

    fn apply(&mut self, intent: SessionIntent) -> Result<IntentOutcome, SessionError> {
        let controller = &mut self.controller;
        match intent {
            SessionIntent::SelectMood { mood } => controller.select_mood(catalog::mood(mood))?,
            SessionIntent::ProceedToActivityChoice => controller.proceed_to_activity_choice()?,
            SessionIntent::SelectActivity { activity } => {
                controller.select_activity(catalog::activity(activity))?
            }
            SessionIntent::TogglePause => {
                controller.toggle_pause()?;
            }
            SessionIntent::Pause => {
                controller.pause()?;
            }
            SessionIntent::Resume => {
                controller.resume()?;
            }
            SessionIntent::RequestVoicePrompt => {
                return controller.request_voice_prompt().map(IntentOutcome::Prompted);
            }
            SessionIntent::Finish => return controller.finish().map(IntentOutcome::Finished),
            SessionIntent::Reset => controller.reset(),
        }
        Ok(IntentOutcome::Updated(controller.snapshot()))
    }

    fn handle_tick(&mut self, generation: u64) {
        let Some(ticker) = &self.ticker else {
            debug!(generation, "session runtime: tick after cancellation dropped");
            return;
        };
        if ticker.generation() != generation {
            debug!(generation, "session runtime: stale tick dropped");
            return;
        }
        if self.controller.session().is_paused() {
            return;
        }

        let now = self.controller.now();
        match self.controller.tick(now) {
            Ok(outcome) => {
                let _ = self.events.send(SessionEvent::Ticked {
                    elapsed_secs: outcome.elapsed_secs,
                });
                if let Some(VoiceCue::Milestone { minutes }) = outcome.milestone {
                    let _ = self.events.send(SessionEvent::Milestone { minutes });
                }
            }
            Err(error) => warn!(%error, "session runtime: tick rejected"),
        }
    }

    /// Keeps exactly one ticker alive while active and none otherwise.
    fn sync_ticker(&mut self) {
        let active = self.controller.phase() == SessionPhase::Active;
        match (&self.ticker, active) {
            (None, true) => {
                self.next_generation += 1;
                let generation = self.next_generation;
                self.ticker = Some(TickTask::spawn(
                    generation,
                    self.tick_period,
                    self.ticks_tx.clone(),
                ));
                info!(generation, "session runtime: ticker started");
            }
            (Some(_), false) => self.stop_ticker(),
            _ => {}
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            let generation = ticker.generation();
            ticker.cancel();
            info!(generation, "session runtime: ticker cancelled");
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
