//! Capability seams toward the host platform.

pub mod audio;
pub mod time;

pub use audio::{AudioTransport, MockAudio};
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};
