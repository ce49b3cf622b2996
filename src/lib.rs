//! Reactive password generator control panel.
//!
//! A small document tree stands in for the page: character-class rows,
//! mirrored length inputs, result fields and buttons. Settings are read back
//! from that tree on demand, edits flow through a topic queue, and password
//! batches are memoized per set of constraints so unrelated edits never
//! regenerate.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod display;
pub mod dom;
pub mod error;
pub mod events;
pub mod exits;
pub mod notify;
pub mod panel;
pub mod pass;
pub mod rand;
pub mod settings;
pub mod terminal;
pub mod tui;

pub use error::{Error, Result};
