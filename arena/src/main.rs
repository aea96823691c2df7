//! # Arena
//!
//! Entry point for the grid-world drivers.
//!
//! `arena manual` hands the keyboard to a human across a fixed sequence of
//! slots, each on a freshly built environment. `arena random` plays a single
//! episode with a uniformly random policy. Build with the `render` feature and
//! pass `--window` to read keys from a window instead of stdin.

mod app;
mod cli;
mod config;
#[cfg(feature = "render")]
mod window;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    app::run(cli::Cli::parse())
}
