//! Keyboard-driven control of a single environment session.

use gridworld::{Action, Env};
use tracing::{debug, info};

use crate::events::{EventSource, InputEvent};
use crate::keymap::{self, Command};
use crate::ControlError;

/// A session closes once its run count exceeds this many resets.
pub const RESET_LIMIT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Closed,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// The run count went past [`RESET_LIMIT`].
    ResetLimit,
    /// The shutdown key was pressed.
    Shutdown,
    /// The window was closed.
    WindowClosed,
    /// The event source ran dry.
    InputExhausted,
}

/// Effect of a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Stepped(Action),
    Reset,
    Shutdown,
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub slot: u32,
    pub run_count: u32,
    pub steps: u32,
    pub episodes_finished: u32,
    pub total_reward: f32,
    pub exit: Option<SessionExit>,
}

impl SessionReport {
    #[must_use]
    pub fn input_exhausted(&self) -> bool {
        self.exit == Some(SessionExit::InputExhausted)
    }
}

/// Manual control session over an exclusively owned environment.
///
/// Every reset bumps the run count; the session closes as soon as the count
/// exceeds [`RESET_LIMIT`], so a slot allows its initial episode plus one more
/// start before control returns to the caller.
pub struct ManualControl<E> {
    env: E,
    seed: Option<u64>,
    closed: bool,
    run_count: u32,
    slot: u32,
    steps: u32,
    episodes_finished: u32,
    total_reward: f32,
    exit: Option<SessionExit>,
}

impl<E: Env> ManualControl<E> {
    #[must_use]
    pub fn new(env: E, seed: Option<u64>) -> Self {
        Self {
            env,
            seed,
            closed: false,
            run_count: 0,
            slot: 0,
            steps: 0,
            episodes_finished: 0,
            total_reward: 0.0,
            exit: None,
        }
    }

    /// Runs the session for `slot` until it closes.
    ///
    /// Performs the initial seeded reset (and render) before reading the first
    /// event, then blocks on `events` one event at a time.
    ///
    /// # Errors
    ///
    /// Environment and input failures are returned as they occur; the session
    /// is left in whatever state it reached.
    pub fn start<S: EventSource + ?Sized>(
        &mut self,
        slot: u32,
        events: &mut S,
    ) -> Result<SessionReport, ControlError> {
        self.slot = slot;
        self.reset(self.seed)?;

        while !self.closed {
            match events.next_event()? {
                Some(InputEvent::KeyDown(key)) => {
                    self.handle_key(&key)?;
                }
                Some(InputEvent::CloseRequested) => {
                    info!(slot, "window closed");
                    self.shutdown(SessionExit::WindowClosed);
                }
                None => {
                    info!(slot, "input exhausted");
                    self.shutdown(SessionExit::InputExhausted);
                }
            }
        }
        Ok(self.report())
    }

    /// Dispatches one key press.
    ///
    /// # Errors
    ///
    /// Propagates environment failures from the resulting step or reset.
    pub fn handle_key(&mut self, key: &str) -> Result<KeyOutcome, ControlError> {
        if self.closed {
            debug!(key, "session closed, key dropped");
            return Ok(KeyOutcome::Ignored);
        }
        debug!(key, "pressed");

        match keymap::command_for(key) {
            Some(Command::Shutdown) => {
                self.shutdown(SessionExit::Shutdown);
                Ok(KeyOutcome::Shutdown)
            }
            Some(Command::Reset) => {
                self.reset(None)?;
                Ok(KeyOutcome::Reset)
            }
            Some(Command::Act(action)) => {
                self.step(action)?;
                Ok(KeyOutcome::Stepped(action))
            }
            None => {
                info!(key, "no action bound");
                Ok(KeyOutcome::Ignored)
            }
        }
    }

    /// Sends `action` to the environment; finished episodes restart with the
    /// configured seed, otherwise the new state is rendered.
    ///
    /// # Errors
    ///
    /// Propagates environment failures.
    pub fn step(&mut self, action: Action) -> Result<(), ControlError> {
        let step = self.env.step(action)?;
        self.steps += 1;
        self.total_reward += step.reward;
        info!(slot = self.slot, %action, "step={}, reward={:.2}", self.env.step_count(), step.reward);

        if step.terminated {
            info!(slot = self.slot, "terminated!");
            self.episodes_finished += 1;
            self.reset(self.seed)
        } else if step.truncated {
            info!(slot = self.slot, "truncated!");
            self.episodes_finished += 1;
            self.reset(self.seed)
        } else {
            self.env.render()?;
            Ok(())
        }
    }

    /// Starts a new episode and counts it against the reset limit.
    ///
    /// The environment is reset and rendered even when this call closes the session.
    ///
    /// # Errors
    ///
    /// Propagates environment failures.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(), ControlError> {
        info!(
            "================== slot {}, run time: {} ==================",
            self.slot, self.run_count
        );
        self.run_count += 1;
        if self.run_count > RESET_LIMIT {
            self.closed = true;
            self.exit.get_or_insert(SessionExit::ResetLimit);
        }
        self.env.reset(seed)?;
        self.env.render()?;
        Ok(())
    }

    fn shutdown(&mut self, exit: SessionExit) {
        self.env.close();
        self.closed = true;
        self.exit = Some(exit);
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.closed {
            SessionState::Closed
        } else {
            SessionState::AwaitingInput
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn run_count(&self) -> u32 {
        self.run_count
    }

    #[must_use]
    pub fn slot(&self) -> u32 {
        self.slot
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    #[must_use]
    pub fn into_env(self) -> E {
        self.env
    }

    #[must_use]
    pub fn report(&self) -> SessionReport {
        SessionReport {
            slot: self.slot,
            run_count: self.run_count,
            steps: self.steps,
            episodes_finished: self.episodes_finished,
            total_reward: self.total_reward,
            exit: self.exit,
        }
    }
}
