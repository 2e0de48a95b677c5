pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionError {
    #[display("no active piece")]
    NoActivePiece,
    #[display("piece colliding at target position")]
    Collision,
    #[display("game is over")]
    GameOver,
}
