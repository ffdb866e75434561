#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs headless Grid Siege simulations.

mod config;
mod runner;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_siege_core::CharacterClass;

/// Playable classes accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Class {
    /// Single shots, most health.
    Warrior,
    /// Three-way fans.
    Archer,
    /// Homing bolts.
    Mage,
}

impl From<Class> for CharacterClass {
    fn from(class: Class) -> Self {
        match class {
            Class::Warrior => Self::Warrior,
            Class::Archer => Self::Archer,
            Class::Mage => Self::Mage,
        }
    }
}

/// Runs a seeded Grid Siege simulation and prints a summary.
#[derive(Debug, Parser)]
#[command(name = "grid-siege", version, about)]
struct Cli {
    /// Seed for every random draw of the run.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,
    /// TOML file overriding simulation tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// ASCII arena file; the built-in arena is used without one.
    #[arg(long, value_name = "PATH")]
    arena: Option<PathBuf>,
    /// Character class of the player.
    #[arg(long, value_enum, default_value_t = Class::Warrior)]
    class: Class,
    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the Grid Siege command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let tuning =
        config::load_tuning(cli.config.as_deref()).context("could not load simulation tuning")?;
    let arena = config::load_arena(cli.arena.as_deref()).context("could not load arena")?;

    let summary = runner::run(&arena, tuning, cli.class.into(), cli.seed, cli.ticks);
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("could not encode summary")?
        );
    } else {
        println!("{summary}");
    }
    Ok(())
}
