//! Session tape: every key pressed and what the display showed after it.

use super::engine::Calculator;
use super::keys::Key;
use serde::Serialize;

/// One recorded key press.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Canonical key label.
    pub key: String,
    /// Display text after the key was handled.
    pub display: String,
}

/// Ordered record of a calculator session.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Tape {
    steps: Vec<Step>,
}

impl Tape {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Press `key` on `calc` and record the result.
    pub fn press<'a>(&mut self, calc: &'a mut Calculator, key: Key) -> &'a str {
        let display = calc.press(key);
        self.steps.push(Step {
            key: key.label().into_owned(),
            display: display.to_string(),
        });
        display
    }

    /// Get the recorded steps, oldest first.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get the display after the most recent step.
    pub fn last_display(&self) -> Option<&str> {
        self.steps.last().map(|step| step.display.as_str())
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Serialize the steps as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.steps)
    }
}
