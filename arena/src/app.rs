//! Command dispatch and the glue between configuration, input and drivers.

use anyhow::{Context, Result};
use control::{keymap, run_slots, EventSource, LineEvents, ScriptedEvents, SessionReport};
use gridworld::{EnvConfig, RenderMode};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ManualArgs, RandomArgs};
use crate::config::ArenaConfig;

/// Run the command selected on the command line.
///
/// # Errors
///
/// Returns configuration problems, environment construction failures and any
/// error raised while a driver is running.
pub fn run(cli: Cli) -> Result<()> {
    init_tracing();

    let mut config = match &cli.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };

    match cli.command {
        Commands::Manual(args) => {
            args.apply(&mut config);
            config.validate()?;
            manual(&config, &args)
        }
        Commands::Random(args) => {
            args.env.apply(&mut config);
            config.validate()?;
            random(&config, &args)
        }
        Commands::Keys => {
            for (key, action) in keymap::bindings() {
                println!("{key:>12}  {action}");
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn manual(config: &ArenaConfig, args: &ManualArgs) -> Result<()> {
    tracing::info!(env = %config.env_id, slots = ?config.slots, seed = ?config.seed, "starting manual control");

    let reports = if let Some(keys) = &args.keys {
        let mut events = ScriptedEvents::keys(keys.iter().cloned());
        run_manual_slots(config, &mut events)?
    } else if args.window {
        window_slots(config)?
    } else {
        tracing::info!("reading one key name per line from stdin (\"quit\" closes the slot)");
        let stdin = std::io::stdin();
        let mut events = LineEvents::new(stdin.lock());
        run_manual_slots(config, &mut events)?
    };

    for report in &reports {
        tracing::info!(
            slot = report.slot,
            runs = report.run_count,
            steps = report.steps,
            episodes = report.episodes_finished,
            reward = report.total_reward,
            exit = ?report.exit,
            "slot summary"
        );
    }
    Ok(())
}

fn run_manual_slots<S: EventSource + ?Sized>(
    config: &ArenaConfig,
    events: &mut S,
) -> Result<Vec<SessionReport>> {
    run_slots(
        &config.slots,
        config.seed,
        |slot| gridworld::make(&manual_env_config(config, false, slot)),
        events,
    )
    .context("manual control failed")
}

/// Environment settings for one manual-control slot. A window shows RGB
/// frames, everything else prints text frames.
fn manual_env_config(config: &ArenaConfig, window: bool, slot: u32) -> EnvConfig {
    let mode = if window { RenderMode::RgbArray } else { RenderMode::Human };
    config.env_config(mode, Some(slot))
}

#[cfg(feature = "render")]
fn window_slots(config: &ArenaConfig) -> Result<Vec<SessionReport>> {
    use crate::window::{WindowEvents, WindowedEnv};

    let mut events = WindowEvents::new(&config.env_id, config.screen_size)?;
    let display = events.display();
    run_slots(
        &config.slots,
        config.seed,
        |slot| {
            gridworld::make(&manual_env_config(config, true, slot))
                .map(|env| WindowedEnv::new(env, std::rc::Rc::clone(&display)))
        },
        &mut events,
    )
    .context("manual control failed")
}

#[cfg(not(feature = "render"))]
fn window_slots(_config: &ArenaConfig) -> Result<Vec<SessionReport>> {
    anyhow::bail!("window input requires building arena with the `render` feature")
}

fn random(config: &ArenaConfig, args: &RandomArgs) -> Result<()> {
    let mode = if args.render { RenderMode::Human } else { RenderMode::None };
    let mut env = gridworld::make(&config.env_config(mode, None))
        .with_context(|| format!("failed to create environment {}", config.env_id))?;
    let mut rng = config.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

    tracing::info!(env = %config.env_id, seed = ?config.seed, "starting random rollout");
    let summary = control::random_rollout(&mut env, config.seed, &mut rng, args.render)
        .context("random rollout failed")?;
    tracing::info!(
        steps = summary.steps,
        reward = summary.total_reward,
        cost = summary.total_cost,
        terminated = summary.terminated,
        truncated = summary.truncated,
        "episode over"
    );
    Ok(())
}
