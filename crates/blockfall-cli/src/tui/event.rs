use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// The render interval elapsed.
    Render,
    /// Key input, resize, and other terminal events.
    Crossterm(CrosstermEvent),
}
