#![allow(dead_code)]

use std::collections::VecDeque;

use gridworld::{Action, Env, EnvError, Step, StepInfo};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Reset(Option<u64>),
    Step(Action),
    Render,
    Close,
}

/// Scripted outcome for one `step` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Outcome {
    pub reward: f32,
    pub cost: f32,
    pub terminated: bool,
    pub truncated: bool,
}

impl Outcome {
    pub fn terminated(reward: f32) -> Self {
        Self { reward, terminated: true, ..Self::default() }
    }

    pub fn truncated() -> Self {
        Self { truncated: true, ..Self::default() }
    }
}

/// Environment double that records every call and replays scripted outcomes.
/// Steps without a scripted outcome are plain non-terminal steps.
#[derive(Debug, Default)]
pub struct RecordingEnv {
    pub calls: Vec<Call>,
    pub outcomes: VecDeque<Outcome>,
    pub actions: usize,
    steps: u32,
}

impl RecordingEnv {
    pub fn new() -> Self {
        Self { actions: Action::ALL.len(), ..Self::default() }
    }

    pub fn with_outcomes(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self { outcomes: outcomes.into_iter().collect(), ..Self::new() }
    }

    pub fn steps(&self) -> Vec<Action> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Step(a) => Some(*a),
                _ => None,
            })
            .collect()
    }

    pub fn resets(&self) -> Vec<Option<u64>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Reset(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl Env for RecordingEnv {
    type Observation = ();

    fn reset(&mut self, seed: Option<u64>) -> Result<(), EnvError> {
        self.calls.push(Call::Reset(seed));
        self.steps = 0;
        Ok(())
    }

    fn step(&mut self, action: Action) -> Result<Step<()>, EnvError> {
        self.calls.push(Call::Step(action));
        self.steps += 1;
        let o = self.outcomes.pop_front().unwrap_or_default();
        Ok(Step {
            observation: (),
            reward: o.reward,
            terminated: o.terminated,
            truncated: o.truncated,
            info: StepInfo { cost: o.cost },
        })
    }

    fn render(&mut self) -> Result<(), EnvError> {
        self.calls.push(Call::Render);
        Ok(())
    }

    fn close(&mut self) {
        self.calls.push(Call::Close);
    }

    fn step_count(&self) -> u32 {
        self.steps
    }

    fn action_count(&self) -> usize {
        self.actions
    }
}
