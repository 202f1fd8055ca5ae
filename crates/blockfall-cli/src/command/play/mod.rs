use std::time::Duration;

use crate::{command::BoardArg, tui::Runtime};

use self::app::PlayApp;

mod app;

const DEFAULT_TICK_MS: u64 = 500;
const DEFAULT_FAST_SPEED: u32 = 10;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    board: BoardArg,
    /// Milliseconds between ticks at normal speed
    #[clap(long, default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// Speed multiplier while the drop key is held
    #[clap(long, default_value_t = DEFAULT_FAST_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    fast_speed: u32,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            board: BoardArg::default(),
            tick_ms: DEFAULT_TICK_MS,
            fast_speed: DEFAULT_FAST_SPEED,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        board,
        tick_ms,
        fast_speed,
    } = arg;

    let engine = board.build_engine(board.resolve_seed())?;
    let mut app = PlayApp::new(engine, Duration::from_millis(*tick_ms), *fast_speed);
    Runtime::new().run(&mut app)?;

    Ok(())
}
