//! Settings shared by the `manual` and `random` commands.

use std::path::Path;

use anyhow::{bail, Context, Result};
use gridworld::{EnvConfig, RenderMode, RenderOptions, DEFAULT_ENV_ID};
use serde::Deserialize;

use control::DEFAULT_SLOTS;

const MAX_SCREEN_SIZE: u32 = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    pub env_id: String,
    pub seed: Option<u64>,
    pub tile_size: usize,
    pub agent_view: bool,
    pub agent_view_size: usize,
    pub screen_size: u32,
    pub slots: Vec<u32>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            env_id: DEFAULT_ENV_ID.to_string(),
            seed: None,
            tile_size: render.tile_size,
            agent_view: render.agent_pov,
            agent_view_size: render.agent_view_size,
            screen_size: render.screen_size,
            slots: DEFAULT_SLOTS.to_vec(),
        }
    }
}

impl ArenaConfig {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse config JSON")
    }

    pub fn validate(&self) -> Result<()> {
        self.env_config(RenderMode::None, None).render.validate()?;
        if !(1..=MAX_SCREEN_SIZE).contains(&self.screen_size) {
            bail!("screen_size must be within 1..={MAX_SCREEN_SIZE}, got {}", self.screen_size);
        }
        if self.slots.is_empty() {
            bail!("at least one slot is required");
        }
        Ok(())
    }

    #[must_use]
    pub fn env_config(&self, render_mode: RenderMode, slot: Option<u32>) -> EnvConfig {
        EnvConfig {
            env_id: self.env_id.clone(),
            render_mode,
            render: RenderOptions {
                tile_size: self.tile_size,
                agent_pov: self.agent_view,
                agent_view_size: self.agent_view_size,
                screen_size: self.screen_size,
            },
            slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{EnvArgs, ManualArgs};

    #[test]
    fn empty_json_yields_defaults() {
        let config = ArenaConfig::from_json("{}").unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(config.slots, vec![1, 2, 3, 4, 5]);
        assert_eq!(config.tile_size, 32);
        assert_eq!(config.agent_view_size, 7);
        assert_eq!(config.screen_size, 640);
        config.validate().unwrap();
    }

    #[test]
    fn json_fields_override_defaults() {
        let config = ArenaConfig::from_json(
            r#"{ "env_id": "MiniGrid-DoorKey-6x6-v0", "seed": 12, "slots": [2, 4] }"#,
        )
        .unwrap();
        assert_eq!(config.env_id, "MiniGrid-DoorKey-6x6-v0");
        assert_eq!(config.seed, Some(12));
        assert_eq!(config.slots, vec![2, 4]);
        assert_eq!(config.tile_size, 32);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(ArenaConfig::from_json(r#"{ "tile": 3 }"#).is_err());
    }

    #[test]
    fn validation_catches_bad_values() {
        let even_view = ArenaConfig { agent_view_size: 4, ..ArenaConfig::default() };
        assert!(even_view.validate().is_err());
        let no_slots = ArenaConfig { slots: Vec::new(), ..ArenaConfig::default() };
        assert!(no_slots.validate().is_err());
        let zero_tile = ArenaConfig { tile_size: 0, ..ArenaConfig::default() };
        assert!(zero_tile.validate().is_err());
    }

    #[test]
    fn validation_bounds_sizes() {
        let huge_view = ArenaConfig { agent_view_size: 1_000_001, ..ArenaConfig::default() };
        assert!(huge_view.validate().is_err());
        let huge_tile = ArenaConfig { tile_size: usize::MAX, ..ArenaConfig::default() };
        assert!(huge_tile.validate().is_err());
        let huge_screen = ArenaConfig { screen_size: u32::MAX, ..ArenaConfig::default() };
        assert!(huge_screen.validate().is_err());
        let largest = ArenaConfig {
            agent_view_size: gridworld::MAX_AGENT_VIEW_SIZE,
            tile_size: gridworld::MAX_TILE_SIZE,
            ..ArenaConfig::default()
        };
        largest.validate().unwrap();
    }

    #[test]
    fn cli_flags_win_over_file_values() {
        let mut config = ArenaConfig::from_json(r#"{ "seed": 1, "tile_size": 16 }"#).unwrap();
        let args = ManualArgs {
            env: EnvArgs { seed: Some(99), agent_view: true, ..EnvArgs::default() },
            slots: Some(vec![3]),
            keys: None,
            window: false,
        };
        args.apply(&mut config);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.tile_size, 16);
        assert!(config.agent_view);
        assert_eq!(config.slots, vec![3]);

        let env = config.env_config(RenderMode::Ansi, Some(3));
        assert!(env.render.agent_pov);
        assert_eq!(env.slot, Some(3));
    }
}
