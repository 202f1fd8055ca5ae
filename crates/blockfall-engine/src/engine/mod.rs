//! Game engine logic and state management.
//!
//! This module ties the core data structures together into the per-tick
//! lifecycle of a game:
//!
//! - [`GameEngine`] - Owns the falling piece and the board; `update`, moves, rotation
//! - [`GameStats`] - Score and landing counters
//! - [`ShapeGenerator`] - Injectable source of the next shape type
//! - [`RenderState`] - Snapshot consumed by renderers
//!
//! # Game Flow
//!
//! 1. Create a [`GameEngine`]; the first piece spawns above the grid
//! 2. The driver calls [`GameEngine::update`] once per tick
//! 3. Input moves or rotates the piece between ticks
//! 4. A piece that comes to rest is fixed, full rows are cleared, a new piece spawns
//! 5. A piece that comes to rest touching row 0 ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameEngine, ShapeSeed};
//!
//! let seed: ShapeSeed = "00000000000000000000000000000001".parse().unwrap();
//! let mut engine = GameEngine::with_seed(10, 20, seed).unwrap();
//!
//! while !engine.is_game_over() {
//!     engine.update();
//! }
//!
//! let state = engine.render_state();
//! assert!(state.terminal.is_over);
//! assert_eq!(state.terminal.reason.as_deref(), Some("Game over"));
//! ```

pub use self::{game_engine::*, game_stats::*, render_state::*, shape_generator::*};

mod game_engine;
mod game_stats;
mod render_state;
mod shape_generator;
