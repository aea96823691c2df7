use gridworld::EnvError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("environment error: {0}")]
    Env(#[from] EnvError),
    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
}
