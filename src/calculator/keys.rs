//! Key events and the tokenizer that reads them from text.
//!
//! Accepts both compact input (`12+3=`) and spaced input (`12 + 3 =`), and
//! long-form names for the command keys (`sqrt`, `neg`, `clear`).

use super::engine::{Digit, Operator};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single calculator key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(Digit),
    DecimalPoint,
    Clear,
    ToggleSign,
    Percent,
    SquareRoot,
    Operator(Operator),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown key '{token}' at offset {offset}")]
    UnknownKey { token: String, offset: usize },
    #[error("digit out of range: {0}")]
    DigitOutOfRange(u8),
}

lazy_static! {
    /// One key per match. Multi-character names come first so `sqrt` is not
    /// read as a stray `s`, and `+/-` is not read as `+` followed by `/`.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?i)^(?:\+/-|sqrt|clear|neg|ac|[0-9]|[.%=+\-*/x±√−×÷c])"
    ).unwrap();
}

impl Key {
    /// Canonical label, the form accepted back by [`Key::from_str`].
    pub fn label(&self) -> Cow<'static, str> {
        match self {
            Self::Digit(digit) => Cow::Owned(digit.to_string()),
            Self::DecimalPoint => Cow::Borrowed("."),
            Self::Clear => Cow::Borrowed("C"),
            Self::ToggleSign => Cow::Borrowed("+/-"),
            Self::Percent => Cow::Borrowed("%"),
            Self::SquareRoot => Cow::Borrowed("sqrt"),
            Self::Operator(op) => Cow::Borrowed(op.symbol()),
        }
    }

    /// Create a digit key, rejecting values above 9.
    pub fn digit(value: u8) -> Result<Self, KeyError> {
        Digit::new(value)
            .map(Self::Digit)
            .ok_or(KeyError::DigitOutOfRange(value))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(digit) => write!(f, "{}", digit),
            other => f.write_str(&other.label()),
        }
    }
}

impl From<Operator> for Key {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<Digit> for Key {
    fn from(digit: Digit) -> Self {
        Self::Digit(digit)
    }
}

impl FromStr for Key {
    type Err = KeyError;

    /// Parse exactly one key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        key_for_token(token).ok_or_else(|| KeyError::UnknownKey {
            token: token.to_string(),
            offset: 0,
        })
    }
}

fn key_for_token(token: &str) -> Option<Key> {
    let key = match token.to_ascii_lowercase().as_str() {
        "." => Key::DecimalPoint,
        "c" | "clear" | "ac" => Key::Clear,
        "+/-" | "±" | "neg" => Key::ToggleSign,
        "%" => Key::Percent,
        "sqrt" | "√" => Key::SquareRoot,
        "+" => Operator::Add.into(),
        "-" | "−" => Operator::Subtract.into(),
        "*" | "x" | "×" => Operator::Multiply.into(),
        "/" | "÷" => Operator::Divide.into(),
        "=" => Operator::Equals.into(),
        other => {
            let mut chars = other.chars();
            let digit = chars.next()?.to_digit(10)?;
            if chars.next().is_some() {
                return None;
            }
            Key::Digit(Digit::new(digit as u8)?)
        }
    };
    Some(key)
}

/// Split free text into key presses.
///
/// Whitespace separates keys but is never required.
pub fn tokenize(input: &str) -> Result<Vec<Key>, KeyError> {
    let mut keys = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let rest = &input[offset..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        offset += rest.len() - trimmed.len();

        let Some(m) = KEY_TOKEN.find(trimmed) else {
            let token = trimmed
                .split_whitespace()
                .next()
                .unwrap_or(trimmed)
                .to_string();
            return Err(KeyError::UnknownKey { token, offset });
        };

        // The pattern and the lookup table cover the same set
        let key = key_for_token(m.as_str()).ok_or_else(|| KeyError::UnknownKey {
            token: m.as_str().to_string(),
            offset,
        })?;
        keys.push(key);
        offset += m.end();
    }

    Ok(keys)
}
