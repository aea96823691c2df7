use crate::{Action, EnvError};

/// Reinforcement learning environment trait.
///
/// Follows the Gymnasium contract: [`reset`] starts a new episode, [`step`]
/// advances it by one discrete [`Action`] and reports whether the episode
/// ended naturally (`terminated`) or hit its time limit (`truncated`).
///
/// [`reset`]: Env::reset
/// [`step`]: Env::step
pub trait Env {
    type Observation;

    /// Start a new episode.
    ///
    /// A `Some` seed re-seeds the environment's random number generator. With
    /// `None` the generator continues from its current state.
    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation, EnvError>;

    /// Advance the environment by one action.
    fn step(&mut self, action: Action) -> Result<Step<Self::Observation>, EnvError>;

    /// Present the current state according to the environment's render mode.
    fn render(&mut self) -> Result<(), EnvError>;

    /// Release the environment. Further `reset`/`step` calls fail.
    fn close(&mut self);

    /// Number of steps taken in the current episode.
    fn step_count(&self) -> u32;

    /// Size of the discrete action space. Valid actions are the first
    /// `action_count()` entries of [`Action::ALL`].
    fn action_count(&self) -> usize {
        Action::ALL.len()
    }
}

/// Outcome of a single [`Env::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O> {
    pub observation: O,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

impl<O> Step<O> {
    /// Whether the episode is over for either reason.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Additional per-step information.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepInfo {
    /// Safety cost incurred by this step (collisions, lava).
    pub cost: f32,
}
