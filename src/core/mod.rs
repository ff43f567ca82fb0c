//! Core module - pure game logic with no external dependencies.
//!
//! Everything here is synchronous state transition: no I/O, no timers,
//! no rendering. The session is an explicit object owned by the caller,
//! and randomness comes in through the [`rng::PieceSource`] seam, so
//! games are deterministic and independently instantiable.
//!
//! - [`board`]: the 10x20 grid, collision testing, merge, line sweep
//! - [`shape`]: the 7 matrix templates and transpose-based rotation
//! - [`session`]: the session state machine, movement, locking, gravity
//! - [`rng`]: seeded LCG and piece-selection sources
//! - [`scoring`]: line score, level, and drop-interval formulas

pub mod board;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;

pub use board::Board;
pub use session::{ActivePiece, GameSession, LockEvent};
pub use shape::Shape;
