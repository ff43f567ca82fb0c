//! Terminal rendering layer.
//!
//! A small framebuffer-based pipeline: `GameView` maps session state
//! into styled cells (pure, testable), `TerminalRenderer` flushes the
//! result to the terminal with diffed updates. The core never draws.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
