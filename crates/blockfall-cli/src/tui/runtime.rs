use std::{io, time::Duration};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::DefaultTerminal;

use super::{
    App,
    event_loop::{EventLoop, LoopEvent},
};

const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Owns the event loop and the terminal capabilities an [`App`] may query.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
    reports_key_release: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(DEFAULT_TICK_INTERVAL),
            reports_key_release: false,
        }
    }

    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.events.set_tick_interval(interval);
    }

    /// Whether the terminal sends key release events.
    ///
    /// Known only once [`run`](Self::run) has entered raw mode; `false` before.
    #[must_use]
    pub fn reports_key_release(&self) -> bool {
        self.reports_key_release
    }

    /// Runs `app` on the terminal until [`App::should_exit`] returns true.
    ///
    /// Ticks call [`App::update`], terminal events call [`App::handle_event`],
    /// and the screen is redrawn after each of them.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            self.reports_key_release = supports_keyboard_enhancement().unwrap_or(false);
            if self.reports_key_release {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }

            app.init(&mut self);
            let result = self.drive(terminal, app);

            if self.reports_key_release {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }

    fn drive<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                LoopEvent::Tick => app.update(self),
                LoopEvent::Render => {
                    terminal.draw(|frame| app.draw(frame))?;
                }
                LoopEvent::Terminal(event) => app.handle_event(self, &event),
            }
        }
        Ok(())
    }
}
