use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// Trait for applications driven by [`Runtime::run()`].
pub trait App {
    /// Called once before the first event. Use this to configure the tick and render intervals.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    /// Draws the screen (called on each render event).
    fn draw(&self, frame: &mut Frame);

    /// Advances the application (called on each tick event).
    fn update(&mut self, runtime: &mut Runtime);
}
