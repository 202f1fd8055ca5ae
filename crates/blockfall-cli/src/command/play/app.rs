use std::time::Duration;

use blockfall_engine::{GameEngine, RandomShapeGenerator, ShapeGenerator};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    input::Action,
    tui::{App, Runtime},
    view::GameView,
};

#[derive(Debug)]
pub struct PlayApp<G = RandomShapeGenerator> {
    engine: GameEngine<G>,
    base_interval: Duration,
    fast_speed: u32,
    is_exiting: bool,
}

impl<G> PlayApp<G>
where
    G: ShapeGenerator,
{
    pub fn new(engine: GameEngine<G>, base_interval: Duration, fast_speed: u32) -> Self {
        Self {
            engine,
            base_interval,
            fast_speed: fast_speed.max(1),
            is_exiting: false,
        }
    }

    /// Time between ticks at the engine's current speed.
    fn tick_interval(&self) -> Duration {
        self.base_interval / self.engine.speed()
    }

    /// Applies a player action.
    ///
    /// Without key release reports, the drop key toggles fast speed instead of
    /// holding it.
    fn apply(&mut self, action: Action, reports_key_release: bool) {
        match action {
            Action::MoveLeft => _ = self.engine.move_left(),
            Action::MoveRight => _ = self.engine.move_right(),
            Action::Rotate => _ = self.engine.rotate(),
            Action::SpeedHeld if reports_key_release => self.engine.set_speed(self.fast_speed),
            Action::SpeedHeld if self.engine.speed() == GameEngine::<G>::NORMAL_SPEED => {
                self.engine.set_speed(self.fast_speed);
            }
            Action::SpeedHeld | Action::SpeedReleased => {
                self.engine.set_speed(GameEngine::<G>::NORMAL_SPEED);
            }
            Action::Restart => self.engine.restart(),
            Action::Quit => self.is_exiting = true,
        }
    }
}

impl<G> App for PlayApp<G>
where
    G: ShapeGenerator,
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(self.tick_interval());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        let Some(action) = event.as_key_event().and_then(Action::from_key_event) else {
            return;
        };
        self.apply(action, runtime.reports_key_release());
        runtime.set_tick_interval(self.tick_interval());
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        self.engine.update();
    }

    fn draw(&self, frame: &mut Frame) {
        let state = self.engine.render_state();
        let board = self.engine.board();
        let view = GameView::new(&state, board.width(), board.height())
            .with_shape(self.engine.piece().shape());

        let help_text = if self.engine.is_game_over() {
            "Controls: R (Restart) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↑ Space (Rotate) | ↓ (Fast) | R (Restart) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(view.height()), Constraint::Length(1)])
                .areas(frame.area());
        frame.render_widget(&view, main_area);
        frame.render_widget(help_text, help_area);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::ShapeKind;

    use super::*;

    fn app() -> PlayApp<impl FnMut() -> ShapeKind> {
        let engine = GameEngine::with_generator(10, 20, || ShapeKind::T).unwrap();
        PlayApp::new(engine, Duration::from_millis(500), 10)
    }

    #[test]
    fn test_held_drop_key_speeds_up_until_release() {
        let mut app = app();
        app.apply(Action::SpeedHeld, true);
        assert_eq!(app.engine.speed(), 10);
        assert_eq!(app.tick_interval(), Duration::from_millis(50));

        app.apply(Action::SpeedHeld, true);
        assert_eq!(app.engine.speed(), 10);

        app.apply(Action::SpeedReleased, true);
        assert_eq!(app.engine.speed(), 1);
        assert_eq!(app.tick_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_drop_key_toggles_without_release_events() {
        let mut app = app();
        app.apply(Action::SpeedHeld, false);
        assert_eq!(app.engine.speed(), 10);
        app.apply(Action::SpeedHeld, false);
        assert_eq!(app.engine.speed(), 1);
    }

    #[test]
    fn test_moves_reach_engine() {
        let mut app = app();
        let x = app.engine.piece().offset().x;
        app.apply(Action::MoveLeft, false);
        assert_eq!(app.engine.piece().offset().x, x - 1);
        app.apply(Action::MoveRight, false);
        app.apply(Action::MoveRight, false);
        assert_eq!(app.engine.piece().offset().x, x + 1);
        app.apply(Action::Rotate, false);
        assert_eq!(app.engine.piece().rotation(), 1);
    }

    #[test]
    fn test_restart_resets_speed_and_quit_exits() {
        let mut app = app();
        app.apply(Action::SpeedHeld, false);
        app.apply(Action::Restart, false);
        assert_eq!(app.engine.speed(), 1);
        assert!(!app.should_exit());

        app.apply(Action::Quit, false);
        assert!(app.should_exit());
    }
}
