use blockfall_engine::{GameEngine, ShapeSeed};
use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

const DEFAULT_WIDTH: i32 = 10;
const DEFAULT_HEIGHT: i32 = 20;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in (defaults to `play`)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run the engine headless and print the final state as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Board dimensions and shape sequence shared by every mode.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Number of columns
    #[clap(long, default_value_t = DEFAULT_WIDTH)]
    width: i32,
    /// Number of rows
    #[clap(long, default_value_t = DEFAULT_HEIGHT)]
    height: i32,
    /// Shape sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<ShapeSeed>,
}

impl Default for BoardArg {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
        }
    }
}

impl BoardArg {
    /// Returns the configured seed, drawing a fresh one if none was given.
    pub(crate) fn resolve_seed(&self) -> ShapeSeed {
        self.seed.unwrap_or_else(rand::random)
    }

    pub(crate) fn build_engine(&self, seed: ShapeSeed) -> anyhow::Result<GameEngine> {
        Ok(GameEngine::with_seed(self.width, self.height, seed)?)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
