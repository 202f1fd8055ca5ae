use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// Events produced by [`EventLoop::next`].
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum LoopEvent {
    /// The tick interval elapsed.
    Tick,
    /// State changed since the last draw.
    Render,
    /// Key input, resize and other terminal events.
    Terminal(Event),
}

/// Blocks on terminal input until the next tick is due.
///
/// A render is requested after every tick or terminal event, so the screen is
/// redrawn at most once per state change.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Duration,
    last_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            last_tick: Instant::now(),
            dirty: true,
        }
    }

    /// Changes the tick interval. The next tick is measured from the last one.
    pub(super) fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            let next_tick_at = self.last_tick + self.tick_interval;
            if now >= next_tick_at {
                self.last_tick = now;
                self.dirty = true;
                return Ok(LoopEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(LoopEvent::Render);
            }

            if event::poll(next_tick_at.saturating_duration_since(now))? {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }
}
