//! Text rendering module
//!
//! Draws the board as characters for the terminal shell.

pub mod text;

pub use text::{render_board, status_line};
