//! The arithmetic entry engine.
//!
//! Interprets digit, operator and command presses against a one-register
//! accumulator. Operators evaluate immediately, left to right, with no
//! precedence: `2 + 3 * 4 =` is `20`.
//!
//! Nothing here fails. Division by zero, square roots of negatives and
//! overflow all end up on the display as `Infinity` or `NaN`.

use super::format::{format_number, parse_display};
use super::keys::Key;
use std::fmt;
use tracing::trace;

/// A single decimal digit, 0 through 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` if `value` is not in `0..=9`.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Get the digit as a number.
    pub fn value(self) -> u8 {
        self.0
    }

    fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Evaluates the pending operator without starting a new one.
    Equals,
}

impl Operator {
    /// Apply a binary operator. `Equals` has no arithmetic of its own and
    /// returns `rhs`.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
            Self::Equals => rhs,
        }
    }

    /// Check if this operator takes two operands.
    pub fn is_binary(self) -> bool {
        !matches!(self, Self::Equals)
    }

    /// The key label for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equals => "=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Coarse position of the engine in an operator chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// No accumulator; the next operator captures the first operand.
    Empty,
    /// An accumulator is held but no operator is pending.
    AccumulatorSet,
    /// An operator is pending and will be applied on the next operator press.
    AwaitingOperand,
}

/// Four-function calculator with chained operator evaluation.
#[derive(Clone, Debug)]
pub struct Calculator {
    display: String,
    accumulator: Option<f64>,
    pending: Option<Operator>,
    awaiting_new_entry: bool,
    /// The display still shows the accumulator as left by the last operator.
    display_is_result: bool,
    /// Last binary operator applied and its right operand, for repeated `=`.
    last_operation: Option<(Operator, f64)>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create a calculator showing `0` with nothing pending.
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            accumulator: None,
            pending: None,
            awaiting_new_entry: false,
            display_is_result: false,
            last_operation: None,
        }
    }

    /// The text currently shown.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The left-hand operand carried across chained operators.
    pub fn accumulator(&self) -> Option<f64> {
        self.accumulator
    }

    /// The operator to apply on the next operator press.
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    /// Whether the next digit starts a fresh number.
    pub fn is_awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }

    /// Get the coarse position in the operator chain.
    pub fn state(&self) -> EngineState {
        match (self.accumulator, self.pending) {
            (None, _) => EngineState::Empty,
            (Some(_), None) => EngineState::AccumulatorSet,
            (Some(_), Some(_)) => EngineState::AwaitingOperand,
        }
    }

    /// Dispatch a key press and return the new display.
    pub fn press(&mut self, key: Key) -> &str {
        match key {
            Key::Digit(digit) => self.input_digit(digit),
            Key::DecimalPoint => self.input_decimal_point(),
            Key::Clear => self.clear_all(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Percent => self.input_percent(),
            Key::SquareRoot => self.square_root(),
            Key::Operator(op) => self.perform_operation(op),
        }
    }

    /// Enter a digit, starting a new number right after an operator.
    pub fn input_digit(&mut self, digit: Digit) -> &str {
        self.display_is_result = false;
        if self.awaiting_new_entry {
            self.display = digit.to_string();
            self.awaiting_new_entry = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit.as_char());
        }
        &self.display
    }

    /// Enter a decimal point. Does nothing if the display already has one.
    pub fn input_decimal_point(&mut self) -> &str {
        self.display_is_result = false;
        if self.awaiting_new_entry {
            self.display = "0.".to_string();
            self.awaiting_new_entry = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
        &self.display
    }

    /// Reset everything to the initial state.
    pub fn clear_all(&mut self) -> &str {
        trace!("clearing calculator state");
        *self = Self::new();
        &self.display
    }

    /// Negate the displayed number.
    pub fn toggle_sign(&mut self) -> &str {
        self.map_display(|value| -value)
    }

    /// Divide the displayed number by 100.
    pub fn input_percent(&mut self) -> &str {
        self.map_display(|value| value / 100.0)
    }

    /// Take the square root of the displayed number.
    ///
    /// Negative input yields `NaN` on the display.
    pub fn square_root(&mut self) -> &str {
        self.map_display(f64::sqrt)
    }

    fn map_display(&mut self, f: impl FnOnce(f64) -> f64) -> &str {
        self.display = format_number(f(parse_display(&self.display)));
        self.display_is_result = false;
        &self.display
    }

    /// Press an operator key.
    ///
    /// The previously pending operator is applied to the accumulator and the
    /// displayed number, then `op` becomes the pending operator. Pressing `=`
    /// after `=` repeats the last operation with the same right operand,
    /// applied to whatever the display shows by then.
    pub fn perform_operation(&mut self, op: Operator) -> &str {
        let input = parse_display(&self.display);

        match (self.accumulator, self.pending) {
            (None, _) => {
                self.accumulator = Some(input);
            }
            (Some(acc), Some(pending)) if pending.is_binary() => {
                self.evaluate(pending, acc, input);
            }
            (Some(acc), Some(Operator::Equals)) => {
                let lhs = if self.display_is_result { acc } else { input };
                match self.last_operation {
                    Some((last, rhs)) if op == Operator::Equals => {
                        self.evaluate(last, lhs, rhs);
                    }
                    // A display changed after `=` starts a new chain
                    _ => self.accumulator = Some(lhs),
                }
            }
            (Some(_), _) => {}
        }

        self.awaiting_new_entry = true;
        self.display_is_result = true;
        self.pending = Some(op);
        trace!(
            op = %op,
            accumulator = ?self.accumulator,
            display = %self.display,
            "operator pressed"
        );
        &self.display
    }

    fn evaluate(&mut self, op: Operator, acc: f64, rhs: f64) {
        // A NaN accumulator restarts the chain from zero
        let lhs = if acc.is_nan() { 0.0 } else { acc };
        let result = op.apply(lhs, rhs);
        self.accumulator = Some(result);
        self.display = format_number(result);
        self.last_operation = Some((op, rhs));
    }
}
