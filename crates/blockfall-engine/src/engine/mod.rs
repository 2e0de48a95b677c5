//! Game engine logic and state management.
//!
//! This module drives the core data structures through the game's turn cycle:
//!
//! - [`Engine`] - Board, active piece, statistics and game-over flag
//! - [`GameConfig`] - Board size, pacing, score table and piece templates
//! - [`GameStats`] - Score, cleared lines and frozen pieces
//! - [`ShapePicker`] - Selection of the next shape ([`RandomPicker`], [`ScriptedPicker`])
//!
//! # Game Flow
//!
//! 1. The driver calls [`Engine::tick`] once per fall interval
//! 2. The first tick spawns a piece at the top center of the board
//! 3. Each tick lowers the piece by one row while the row below is free
//! 4. A piece that cannot fall is frozen, complete rows are cleared and scored,
//!    and the next piece spawns
//! 5. The game ends when the stack reaches row 0 or a new piece does not fit
//!
//! Player input maps to [`Engine::try_move`], [`Engine::try_rotate`],
//! [`Engine::hard_drop`] (followed by a tick), and an extra tick for soft drop.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Engine, GameConfig};
//!
//! let mut engine = Engine::new(GameConfig::default()).unwrap();
//!
//! while !engine.is_game_over() {
//!     engine.hard_drop().ok();
//!     engine.tick();
//! }
//!
//! assert!(engine.stats().completed_pieces() > 0);
//! ```

pub use self::{config::*, game::*, picker::*, stats::*};

mod config;
mod game;
mod picker;
mod stats;
