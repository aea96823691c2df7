use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("unknown environment id: {0}")]
    UnknownEnv(String),
    #[error("environment has been closed")]
    Closed,
    #[error("invalid environment configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to write frame: {0}")]
    Render(#[from] std::io::Error),
}
