//! Render Adapters - Terminal Presentation
//!
//! Implements the Renderer port for a plain line-oriented terminal.
//! Charting and richer layouts are deliberately out of the core; this
//! adapter only turns typed views into labeled lines.

pub mod console;

pub use console::TermRenderer;
