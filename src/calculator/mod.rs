//! Keypad calculator.
//!
//! This module provides functionality to:
//! - Drive a four-function calculator one key press at a time
//! - Format and parse the calculator display
//! - Read key presses from text
//! - Record a session tape and copy results to the clipboard

mod clipboard;
mod engine;
mod format;
mod keys;
mod tape;

pub use clipboard::copy_to_clipboard;
pub use engine::{Calculator, Digit, EngineState, Operator};
pub use format::{format_number, group_thousands, parse_display};
pub use keys::{Key, KeyError, tokenize};
pub use tape::{Step, Tape};
