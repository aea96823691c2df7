//! Uniformly random policy rollouts.

use gridworld::{Action, Env};
use tracing::info;

use crate::ControlError;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RolloutSummary {
    pub steps: u32,
    pub total_reward: f32,
    pub total_cost: f32,
    pub terminated: bool,
    pub truncated: bool,
}

/// Plays one episode with actions sampled uniformly from `env`'s action space.
///
/// The episode ends when the environment reports termination or truncation.
/// With `render` set, every step is rendered.
///
/// # Errors
///
/// Propagates environment failures.
pub fn random_rollout<E: Env>(
    env: &mut E,
    seed: Option<u64>,
    rng: &mut fastrand::Rng,
    render: bool,
) -> Result<RolloutSummary, ControlError> {
    env.reset(seed)?;
    let mut summary = RolloutSummary::default();
    loop {
        let action = Action::sample(rng, env.action_count());
        let step = env.step(action)?;
        summary.steps += 1;
        summary.total_reward += step.reward;
        summary.total_cost += step.info.cost;
        if render {
            env.render()?;
        }
        if step.terminated || step.truncated {
            summary.terminated = step.terminated;
            summary.truncated = step.truncated;
            break;
        }
    }
    info!(
        steps = summary.steps,
        reward = summary.total_reward,
        cost = summary.total_cost,
        terminated = summary.terminated,
        "rollout finished"
    );
    Ok(summary)
}
