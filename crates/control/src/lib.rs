//! # Control
//!
//! Drivers that sit between an input source and a [`gridworld::Env`]:
//!
//! - [`ManualControl`] turns key presses into actions and keeps the
//!   reset/close bookkeeping for one slot.
//! - [`run_slots`] runs a fixed sequence of slots on fresh environments.
//! - [`random_rollout`] plays an episode with uniformly random actions.

mod error;
pub mod events;
pub mod keymap;
pub mod manual;
pub mod rollout;
pub mod slots;

pub use error::ControlError;
pub use events::{EventSource, InputEvent, LineEvents, ScriptedEvents};
pub use manual::{KeyOutcome, ManualControl, SessionExit, SessionReport, SessionState, RESET_LIMIT};
pub use rollout::{random_rollout, RolloutSummary};
pub use slots::{run_slots, DEFAULT_SLOTS};
