//! Session control: countdown, clock, audio binding, lifecycle.

mod controller;
mod result;

pub use controller::{
    COUNTDOWN_STEP_MS, COUNTDOWN_STEPS, MIN_SESSION_MS, MIN_START_TIME_MS, PlayController,
    PlayPhase, SETTLE_DELAY_MS, lead_in_delta,
};
pub use result::PlayResult;
