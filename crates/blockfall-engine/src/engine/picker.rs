use std::fmt;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

use crate::core::shape::ShapeKind;

/// Chooses the kind of each newly spawned piece.
///
/// The engine asks for one kind per spawn. Implementations decide the
/// distribution; the game itself only ships uniform selection.
pub trait ShapePicker: fmt::Debug {
    fn pick(&mut self) -> ShapeKind;
}

/// Uniformly random shape selection.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: Pcg64,
}

impl RandomPicker {
    /// Creates a picker seeded from the OS's random data source.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: Pcg64::from_os_rng(),
        }
    }

    /// Creates a picker with a fixed seed, for reproducible games.
    #[must_use]
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }
}

impl ShapePicker for RandomPicker {
    fn pick(&mut self) -> ShapeKind {
        self.rng.random()
    }
}

/// Replays a fixed sequence of kinds, starting over when it runs out.
///
/// ```
/// use blockfall_engine::{ScriptedPicker, ShapeKind, ShapePicker};
///
/// let mut picker = ScriptedPicker::new([ShapeKind::O, ShapeKind::I]);
/// assert_eq!(picker.pick(), ShapeKind::O);
/// assert_eq!(picker.pick(), ShapeKind::I);
/// assert_eq!(picker.pick(), ShapeKind::O);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedPicker {
    sequence: Vec<ShapeKind>,
    next: usize,
}

impl ScriptedPicker {
    /// # Panics
    ///
    /// Panics if `sequence` is empty.
    pub fn new<I>(sequence: I) -> Self
    where
        I: IntoIterator<Item = ShapeKind>,
    {
        let sequence: Vec<_> = sequence.into_iter().collect();
        assert!(!sequence.is_empty(), "scripted sequence must not be empty");
        Self { sequence, next: 0 }
    }
}

impl ShapePicker for ScriptedPicker {
    fn pick(&mut self) -> ShapeKind {
        let kind = self.sequence[self.next];
        self.next = (self.next + 1) % self.sequence.len();
        kind
    }
}
