use std::{io, time::Duration};

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

const DEFAULT_RENDER_INTERVAL: Duration = Duration::from_millis(50);

/// Owns the event loop and runs an [`App`] on the terminal.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
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
            events: EventLoop::new(DEFAULT_RENDER_INTERVAL),
        }
    }

    /// Sets the tick interval. `None` stops ticking.
    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_interval(&mut self, interval: Duration) {
        self.events.set_render_interval(interval);
    }

    /// Postpones the next tick by a full interval.
    pub fn reset_tick(&mut self) {
        self.events.reset_tick();
    }

    /// Runs `app` until [`App::should_exit()`] returns true.
    ///
    /// The terminal is put into raw mode on the alternate screen and restored on return.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick => app.update(&mut self),
                    TuiEvent::Render => {
                        terminal.draw(|frame| app.draw(frame))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, &event),
                }
            }
            Ok(())
        })
    }
}
