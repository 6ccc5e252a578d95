//! Four-function keypad calculator.
//!
//! The [`calculator`] module holds the entry engine, which turns key presses
//! into display text with chained left-to-right evaluation. Undefined
//! arithmetic never errors; it shows up on the display as `Infinity` or `NaN`.
//!
//! ```
//! use keypad::calculator::{Calculator, tokenize};
//!
//! let mut calc = Calculator::new();
//! for key in tokenize("5 + 3 + 2 =").unwrap() {
//!     calc.press(key);
//! }
//! assert_eq!(calc.display(), "10");
//! ```

pub mod calculator;
pub mod config;
