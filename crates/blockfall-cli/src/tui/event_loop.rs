use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Tick and render timers.
///
/// The tick timer can be disabled and restarted; the render timer always runs.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_interval: Duration,
    last_tick: Instant,
    last_render: Instant,
}

impl EventLoop {
    /// Creates an event loop with ticks disabled.
    ///
    /// The first render is due immediately.
    pub(super) fn new(render_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            tick_interval: None,
            render_interval,
            last_tick: now,
            last_render: now.checked_sub(render_interval).unwrap_or(now),
        }
    }

    /// Sets the tick interval and restarts the tick timer.
    ///
    /// Pass `None` to stop producing tick events.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = Instant::now();
    }

    pub(super) fn set_render_interval(&mut self, interval: Duration) {
        self.render_interval = interval;
    }

    /// Restarts the tick timer, so the next tick is a full interval away.
    pub(super) fn reset_tick(&mut self) {
        self.last_tick = Instant::now();
    }

    /// Blocks until a timer fires or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }
            if event::poll(self.compute_timeout(now))? {
                return Ok(event::read()?.into());
            }
        }
    }

    /// Returns the timer event due at `now`, if any. Ticks take precedence over renders.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= interval
        {
            self.last_tick = now;
            return Some(TuiEvent::Tick);
        }
        if now.duration_since(self.last_render) >= self.render_interval {
            self.last_render = now;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Duration {
        let next_render_at = self.last_render + self.render_interval;
        let next_at = self
            .tick_interval
            .map(|interval| self.last_tick + interval)
            .map_or(next_render_at, |next_tick_at| next_tick_at.min(next_render_at));
        next_at.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(500);
    const RENDER: Duration = Duration::from_millis(50);

    fn event_loop(start: Instant) -> EventLoop {
        EventLoop {
            tick_interval: Some(TICK),
            render_interval: RENDER,
            last_tick: start,
            last_render: start,
        }
    }

    #[test]
    fn test_nothing_due_before_intervals() {
        let start = Instant::now();
        let mut events = event_loop(start);
        assert_eq!(events.due_event(start + Duration::from_millis(10)), None);
        assert_eq!(
            events.compute_timeout(start + Duration::from_millis(10)),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn test_render_then_tick() {
        let start = Instant::now();
        let mut events = event_loop(start);

        assert_eq!(events.due_event(start + RENDER), Some(TuiEvent::Render));
        assert_eq!(events.due_event(start + RENDER), None);
        assert_eq!(events.due_event(start + TICK), Some(TuiEvent::Tick));
        assert_eq!(events.due_event(start + TICK), Some(TuiEvent::Render));
        assert_eq!(events.due_event(start + TICK), None);
    }

    #[test]
    fn test_disabled_tick_only_renders() {
        let start = Instant::now();
        let mut events = event_loop(start);
        events.tick_interval = None;

        let later = start + TICK * 3;
        assert_eq!(events.due_event(later), Some(TuiEvent::Render));
        assert_eq!(events.due_event(later), None);
        assert_eq!(events.compute_timeout(later), RENDER);
    }

    #[test]
    fn test_timeout_picks_earliest_timer() {
        let start = Instant::now();
        let mut events = event_loop(start);
        events.render_interval = Duration::from_secs(1);
        assert_eq!(events.compute_timeout(start), TICK);
        assert_eq!(
            events.compute_timeout(start + Duration::from_secs(2)),
            Duration::ZERO
        );
    }
}
