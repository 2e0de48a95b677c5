use crate::{
    ActionError,
    core::{
        board::Board,
        piece::{ActivePiece, Position},
        shape::Shape,
    },
};

use super::{
    config::{ConfigError, GameConfig},
    picker::{RandomPicker, ShapePicker},
    stats::GameStats,
};

/// Coarse state of the engine, as seen between calls.
///
/// The "frozen-resolving" phase (freeze, line clear, respawn) happens entirely
/// inside [`Engine::tick`] and is never observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EngineState {
    /// No active piece; the next tick spawns one.
    NoPiece,
    /// An active piece is falling.
    Falling,
    /// Terminal state.
    GameOver,
}

/// What a call to [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The active piece moved down one row.
    Fell,
    /// The active piece landed, was frozen, and a new piece was spawned.
    Locked { cleared_lines: usize },
    /// The game ended during this tick.
    ToppedOut { cleared_lines: usize },
    /// The game was already over; nothing changed.
    Finished,
}

/// The falling-block game state machine.
///
/// Owns the board, the active piece, the statistics and the game-over flag.
/// Drivers call [`tick`](Self::tick) on a timer and the player actions
/// ([`try_move`](Self::try_move), [`try_rotate`](Self::try_rotate),
/// [`hard_drop`](Self::hard_drop)) on input, then read the state back for
/// rendering.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Engine, GameConfig, ScriptedPicker, ShapeKind};
///
/// let picker = ScriptedPicker::new([ShapeKind::O]);
/// let mut engine = Engine::with_picker(GameConfig::default(), Box::new(picker)).unwrap();
///
/// engine.spawn();
/// engine.try_move_left().unwrap();
/// engine.hard_drop().unwrap();
/// assert!(engine.tick().is_locked());
/// assert!(engine.board().is_filled(4, 21));
/// ```
#[derive(Debug)]
pub struct Engine {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    stats: GameStats,
    game_over: bool,
    picker: Box<dyn ShapePicker>,
}

impl Engine {
    /// Creates an engine with uniformly random shape selection.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_picker(config, Box::new(RandomPicker::from_os_rng()))
    }

    /// Creates an engine on an empty board with the given shape selection.
    pub fn with_picker(
        config: GameConfig,
        picker: Box<dyn ShapePicker>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = config.new_board()?;
        Self::from_board(config, board, picker)
    }

    /// Creates an engine starting from an existing board.
    ///
    /// The board must match the configured dimensions.
    pub fn from_board(
        config: GameConfig,
        board: Board,
        picker: Box<dyn ShapePicker>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (width, height) = (config.board.width, config.board.height);
        if (board.width(), board.height()) != (width, height) {
            return Err(ConfigError::BoardMismatch {
                width,
                height,
                actual_width: board.width(),
                actual_height: board.height(),
            });
        }
        log::debug!(
            "engine created: {width}x{height} board, score table {:?}",
            config.score_table.entries()
        );
        Ok(Self {
            config,
            board,
            active: None,
            stats: GameStats::new(),
            game_over: false,
            picker,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        match (self.game_over, self.active) {
            (true, _) => EngineState::GameOver,
            (false, None) => EngineState::NoPiece,
            (false, Some(_)) => EngineState::Falling,
        }
    }

    /// Checks whether `shape` fits at `position` on the current board.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, position: Position) -> bool {
        self.board.can_place(shape, position)
    }

    /// Replaces the active piece with a freshly picked one at the spawn position.
    ///
    /// The new piece is not checked for collision; [`tick`](Self::tick) does
    /// that for the spawns it performs. Does nothing once the game is over.
    pub fn spawn(&mut self) {
        if self.game_over {
            return;
        }
        let kind = self.picker.pick();
        let piece = ActivePiece::spawn(kind, self.config.template(kind), self.board.width());
        log::trace!("spawned {kind:?} at {:?}", piece.position());
        self.active = Some(piece);
    }

    /// Shifts the active piece horizontally by `dx` columns if the target is free.
    pub fn try_move(&mut self, dx: isize) -> Result<(), ActionError> {
        let piece = self.controllable_piece()?;
        self.try_replace(piece.moved(dx, 0))
    }

    pub fn try_move_left(&mut self) -> Result<(), ActionError> {
        self.try_move(-1)
    }

    pub fn try_move_right(&mut self) -> Result<(), ActionError> {
        self.try_move(1)
    }

    /// Rotates the active piece 90° clockwise around its origin if the result fits.
    ///
    /// There are no wall kicks: a rotation that collides is discarded even when
    /// a shifted position would fit.
    pub fn try_rotate(&mut self) -> Result<(), ActionError> {
        let piece = self.controllable_piece()?;
        self.try_replace(piece.rotated_clockwise())
    }

    /// Moves the active piece straight down to the lowest row it can occupy.
    ///
    /// Returns the number of rows travelled. The piece is not frozen; the next
    /// [`tick`](Self::tick) finds it landed and commits it.
    pub fn hard_drop(&mut self) -> Result<usize, ActionError> {
        let mut piece = self.controllable_piece()?;
        let mut rows = 0;
        loop {
            let lowered = piece.moved(0, 1);
            if !self.board.can_place(lowered.shape(), lowered.position()) {
                break;
            }
            piece = lowered;
            rows += 1;
        }
        self.active = Some(piece);
        Ok(rows)
    }

    /// Advances the game by one step.
    ///
    /// 1. Without an active piece, spawns one; if it collides at the spawn
    ///    position the game is over.
    /// 2. Moves the active piece down one row if that position is free.
    /// 3. Otherwise freezes it, clears complete lines, and either ends the game
    ///    (row 0 occupied or the next piece collides) or spawns the next piece.
    ///
    /// The collision check on the respawn in step 3 is stricter than the classic
    /// rule, which only tests row 0 there and lets an overlapping piece top out later.
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Finished;
        }

        if self.active.is_none() && !self.spawn_checked() {
            return TickOutcome::ToppedOut { cleared_lines: 0 };
        }
        let Some(piece) = self.active else {
            return TickOutcome::Finished;
        };

        let lowered = piece.moved(0, 1);
        if self.board.can_place(lowered.shape(), lowered.position()) {
            self.active = Some(lowered);
            return TickOutcome::Fell;
        }

        self.freeze(piece);
        let cleared_lines = self.clear_lines();
        if self.board.is_row_occupied(0) {
            self.top_out("stack reached the top row");
            return TickOutcome::ToppedOut { cleared_lines };
        }
        if !self.spawn_checked() {
            return TickOutcome::ToppedOut { cleared_lines };
        }
        TickOutcome::Locked { cleared_lines }
    }

    /// The active piece, if the player may act on it.
    fn controllable_piece(&self) -> Result<ActivePiece, ActionError> {
        if self.game_over {
            return Err(ActionError::GameOver);
        }
        self.active.ok_or(ActionError::NoActivePiece)
    }

    fn try_replace(&mut self, piece: ActivePiece) -> Result<(), ActionError> {
        if !self.board.can_place(piece.shape(), piece.position()) {
            return Err(ActionError::Collision);
        }
        self.active = Some(piece);
        Ok(())
    }

    /// Spawns the next piece and ends the game if it does not fit.
    ///
    /// Returns whether the game goes on.
    fn spawn_checked(&mut self) -> bool {
        self.spawn();
        let fits = self
            .active
            .is_some_and(|piece| self.board.can_place(piece.shape(), piece.position()));
        if !fits {
            self.top_out("spawned piece collides");
        }
        fits
    }

    /// Writes the piece into the board and clears the active slot.
    ///
    /// The piece must be at a collision-free position.
    fn freeze(&mut self, piece: ActivePiece) {
        debug_assert!(self.board.can_place(piece.shape(), piece.position()));
        self.board
            .fill_shape(piece.shape(), piece.position(), piece.color());
        self.active = None;
        self.stats.complete_piece();
    }

    /// Removes complete rows and scores them as one line-clear event.
    fn clear_lines(&mut self) -> usize {
        let cleared_lines = self.board.clear_lines();
        let points = self.config.score_table.points(cleared_lines);
        self.stats.record_line_clear(cleared_lines, points);
        if cleared_lines > 0 {
            log::debug!(
                "cleared {cleared_lines} line(s) for {points} points, score {}",
                self.stats.score()
            );
        }
        cleared_lines
    }

    fn top_out(&mut self, reason: &str) {
        self.game_over = true;
        log::info!(
            "game over ({reason}): score {}, {} lines, {} pieces",
            self.stats.score(),
            self.stats.total_cleared_lines(),
            self.stats.completed_pieces()
        );
    }
}
