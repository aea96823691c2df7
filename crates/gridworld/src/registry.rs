//! Environment ids and the factory that builds environments from them.

use crate::layout::{check_size, Layout};
use crate::render::{RenderMode, RenderOptions};
use crate::{EnvError, GridEnv};

/// Ids accepted by [`make`]; `N` may be any size in `MIN_SIZE..=MAX_SIZE`.
pub const KNOWN_IDS: [&str; 4] = [
    "MiniGrid-Empty-8x8-v0",
    "MiniGrid-Dynamic-Obstacles-8x8-v0",
    "MiniGrid-DoorKey-8x8-v0",
    "MiniGrid-LavaGap-7x7-v0",
];

pub const DEFAULT_ENV_ID: &str = "MiniGrid-Dynamic-Obstacles-8x8-v0";

/// Everything needed to construct an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub env_id: String,
    pub render_mode: RenderMode,
    pub render: RenderOptions,
    pub slot: Option<u32>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            env_id: DEFAULT_ENV_ID.to_string(),
            render_mode: RenderMode::None,
            render: RenderOptions::default(),
            slot: None,
        }
    }
}

/// Parsed form of an id such as `MiniGrid-DoorKey-6x6-v0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSpec {
    pub layout: Layout,
    pub size: usize,
}

impl EnvSpec {
    /// # Errors
    ///
    /// Returns [`EnvError::UnknownEnv`] when the id does not follow
    /// `MiniGrid-<Kind>-<N>x<N>-v0` or names an unsupported kind, and
    /// [`EnvError::InvalidConfig`] when `N` is outside the supported range.
    pub fn parse(id: &str) -> Result<Self, EnvError> {
        let unknown = || EnvError::UnknownEnv(id.to_string());
        let body = id
            .strip_prefix("MiniGrid-")
            .and_then(|s| s.strip_suffix("-v0"))
            .ok_or_else(unknown)?;
        let (kind, dims) = body.rsplit_once('-').ok_or_else(unknown)?;
        let (w, h) = dims.split_once('x').ok_or_else(unknown)?;
        let size: usize = w.parse().map_err(|_| unknown())?;
        if h.parse::<usize>().ok() != Some(size) {
            return Err(unknown());
        }
        let layout = match kind {
            "Empty" => Layout::Empty,
            "Dynamic-Obstacles" => Layout::DynamicObstacles { obstacles: size / 2 },
            "DoorKey" => Layout::DoorKey,
            "LavaGap" => Layout::LavaGap,
            _ => return Err(unknown()),
        };
        check_size(size)?;
        Ok(Self { layout, size })
    }
}

/// Builds the environment described by `config`.
///
/// # Errors
///
/// Fails on unknown ids and on render options that cannot be honoured.
pub fn make(config: &EnvConfig) -> Result<GridEnv, EnvError> {
    let spec = EnvSpec::parse(&config.env_id)?;
    config.render.validate()?;
    let env = GridEnv::new(&config.env_id, spec.layout, spec.size, config.render_mode, config.render);
    tracing::debug!(env = %config.env_id, layout = spec.layout.name(), size = spec.size, "environment created");
    Ok(match config.slot {
        Some(slot) => env.with_slot(slot),
        None => env,
    })
}
