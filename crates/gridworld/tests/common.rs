use gridworld::{make, EnvConfig, GridEnv, RenderMode};

/// Builds and seeds an environment that keeps its frames in memory.
pub fn seeded_env(id: &str, seed: u64) -> GridEnv {
    let config = EnvConfig {
        env_id: id.to_string(),
        render_mode: RenderMode::Ansi,
        ..EnvConfig::default()
    };
    let mut env = make(&config).expect("known environment id");
    gridworld::Env::reset(&mut env, Some(seed)).expect("reset succeeds");
    env
}
