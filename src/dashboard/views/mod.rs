//! # Views Module
//!
//! Text rendering of the dashboard for the terminal shell.

pub mod renderer;

pub use renderer::TerminalRenderer;
