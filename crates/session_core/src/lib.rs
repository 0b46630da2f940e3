//! Workout session controller: mood check-in, activity choice, the running
//! workout timer with voice cues, and the final report.

pub mod clock;
pub mod controller;
pub mod cues;
pub mod runtime;
pub mod session;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use controller::{PauseState, SessionController, SessionError, TickOutcome, START_CUE_DELAY};
pub use cues::VoiceCue;
pub use runtime::{
    IntentOutcome, RuntimeError, SessionEvent, SessionHandle, SessionRuntime, TickTask,
    TICK_PERIOD,
};
pub use session::Session;
pub use timer::SessionClock;
