pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a player action left the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionError {
    #[display("piece colliding after move or rotation")]
    PieceCollision,
    #[display("session is paused")]
    Paused,
}
