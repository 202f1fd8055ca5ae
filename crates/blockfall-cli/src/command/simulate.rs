use std::io::{self, Write as _};

use anyhow::bail;
use blockfall_engine::{GameEngine, GameStats, RenderState, ShapeGenerator, ShapeSeed};
use serde::Serialize;

use crate::{command::BoardArg, input::Action};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(super) board: BoardArg,
    /// Number of ticks to run; stops early on game over
    #[clap(long, default_value_t = 1000)]
    ticks: usize,
    /// Input applied before each tick: `<` left, `>` right, `^` rotate, `.` nothing
    #[clap(long, default_value = "")]
    script: String,
}

#[derive(Debug, Serialize)]
struct SimulationReport<'a> {
    seed: ShapeSeed,
    ticks: usize,
    stats: &'a GameStats,
    state: RenderState,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        board,
        ticks,
        script,
    } = arg;

    let script = parse_script(script)?;
    let seed = board.resolve_seed();
    let mut engine = board.build_engine(seed)?;
    let ticks = simulate(&mut engine, *ticks, &script);

    let report = SimulationReport {
        seed,
        ticks,
        stats: engine.stats(),
        state: engine.render_state(),
    };
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report)?;
    writeln!(stdout)?;

    Ok(())
}

fn parse_script(script: &str) -> anyhow::Result<Vec<Option<Action>>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '<' => Ok(Some(Action::MoveLeft)),
            '>' => Ok(Some(Action::MoveRight)),
            '^' => Ok(Some(Action::Rotate)),
            '.' => Ok(None),
            _ => bail!("unexpected script character {c:?} (expected one of `<>^.`)"),
        })
        .collect()
}

/// Runs up to `ticks` updates, applying `script[i]` before tick `i`.
///
/// Returns the number of ticks that ran.
fn simulate<G>(engine: &mut GameEngine<G>, ticks: usize, script: &[Option<Action>]) -> usize
where
    G: ShapeGenerator,
{
    for tick in 0..ticks {
        match script.get(tick).copied().flatten() {
            Some(Action::MoveLeft) => _ = engine.move_left(),
            Some(Action::MoveRight) => _ = engine.move_right(),
            Some(Action::Rotate) => _ = engine.rotate(),
            _ => {}
        }
        if engine.update().is_game_over() {
            return tick + 1;
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Position, ShapeKind};

    use super::*;

    #[test]
    fn test_parse_script() {
        let script = parse_script("<< .^\n>").unwrap();
        assert_eq!(
            script,
            [
                Some(Action::MoveLeft),
                Some(Action::MoveLeft),
                None,
                Some(Action::Rotate),
                Some(Action::MoveRight),
            ]
        );
        assert!(parse_script("<x").is_err());
    }

    #[test]
    fn test_script_steers_piece() {
        let mut engine = GameEngine::with_generator(10, 20, || ShapeKind::O).unwrap();
        let script = parse_script("<<<<").unwrap();
        assert_eq!(simulate(&mut engine, 25, &script), 25);

        let cells: Vec<_> = engine.board().occupied_cells().collect();
        assert_eq!(
            cells,
            [(0, 18), (1, 18), (0, 19), (1, 19)].map(|(x, y)| Position::new(x, y))
        );
    }

    #[test]
    fn test_stops_at_game_over() {
        let mut engine = GameEngine::with_generator(10, 20, || ShapeKind::O).unwrap();
        let ran = simulate(&mut engine, 100_000, &[]);
        assert!(ran < 100_000);
        assert!(engine.is_game_over());
    }

    #[test]
    fn test_report_json_shape() {
        let seed: ShapeSeed = "00000000000000000000000000000007".parse().unwrap();
        let mut engine = GameEngine::with_seed(10, 20, seed).unwrap();
        let ticks = simulate(&mut engine, 10, &[]);
        let report = SimulationReport {
            seed,
            ticks,
            stats: engine.stats(),
            state: engine.render_state(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], "00000000000000000000000000000007");
        assert_eq!(json["ticks"], 10);
        assert_eq!(json["stats"]["score"], 0);
        assert_eq!(json["state"]["piece_cells"].as_array().unwrap().len(), 4);
        assert_eq!(json["state"]["terminal"]["is_over"], false);
    }
}
