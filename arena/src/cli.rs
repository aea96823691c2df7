use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ArenaConfig;

/// Manual-control and random-rollout drivers for grid-world environments.
#[derive(Debug, Parser)]
#[command(name = "arena", version, about)]
pub struct Cli {
    /// JSON file with default settings; command-line flags take precedence.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drive the environment from the keyboard across a sequence of slots.
    Manual(ManualArgs),
    /// Play one episode with uniformly random actions.
    Random(RandomArgs),
    /// Print the key bindings used by `manual`.
    Keys,
}

#[derive(Debug, Args, Default)]
pub struct EnvArgs {
    /// Environment id, e.g. MiniGrid-DoorKey-8x8-v0.
    #[arg(long)]
    pub env_id: Option<String>,
    /// Random seed to generate the environment with.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Size at which to render tiles.
    #[arg(long)]
    pub tile_size: Option<usize>,
    /// Draw only what the agent sees (partially observable view).
    #[arg(long)]
    pub agent_view: bool,
    /// Number of grid cells visible in agent view.
    #[arg(long)]
    pub agent_view_size: Option<usize>,
    /// Window width and height in pixels.
    #[arg(long)]
    pub screen_size: Option<u32>,
}

impl EnvArgs {
    /// Overlays the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut ArenaConfig) {
        if let Some(id) = &self.env_id {
            config.env_id.clone_from(id);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }
        if self.agent_view {
            config.agent_view = true;
        }
        if let Some(size) = self.agent_view_size {
            config.agent_view_size = size;
        }
        if let Some(size) = self.screen_size {
            config.screen_size = size;
        }
    }
}

#[derive(Debug, Args)]
pub struct ManualArgs {
    #[command(flatten)]
    pub env: EnvArgs,
    /// Slots to run, in order.
    #[arg(long, value_delimiter = ',')]
    pub slots: Option<Vec<u32>>,
    /// Scripted key presses instead of interactive input, e.g. `up,left,backspace`.
    #[arg(long, value_delimiter = ',')]
    pub keys: Option<Vec<String>>,
    /// Read keys from a window instead of stdin (needs the `render` feature).
    #[arg(long)]
    pub window: bool,
}

impl ManualArgs {
    pub fn apply(&self, config: &mut ArenaConfig) {
        self.env.apply(config);
        if let Some(slots) = &self.slots {
            config.slots.clone_from(slots);
        }
    }
}

#[derive(Debug, Args)]
pub struct RandomArgs {
    #[command(flatten)]
    pub env: EnvArgs,
    /// Render every step to the terminal.
    #[arg(long)]
    pub render: bool,
}
