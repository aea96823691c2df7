//! # Grid World
//!
//! Small MiniGrid-style environments for driving reinforcement learning
//! experiments by hand or with scripted policies.
//!
//! The [`Env`] trait is the only surface drivers depend on. [`GridEnv`] is the
//! concrete implementation, built from an id string through [`make`].

mod action;
mod env;
mod error;
pub mod grid;
pub mod layout;
mod minigrid;
pub mod observation;
pub mod registry;
pub mod render;

pub use action::Action;
pub use env::{Env, Step, StepInfo};
pub use error::EnvError;
pub use grid::{Cell, Direction, DoorState, Grid, Pos};
pub use layout::{Layout, MAX_SIZE, MIN_SIZE};
pub use minigrid::GridEnv;
pub use observation::Observation;
pub use registry::{make, EnvConfig, EnvSpec, DEFAULT_ENV_ID, KNOWN_IDS};
pub use render::{Frame, RenderMode, RenderOptions, MAX_AGENT_VIEW_SIZE, MAX_TILE_SIZE};
