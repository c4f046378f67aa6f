//! Key presses and the character keymap.

use std::fmt;

/// A decimal digit key, `0` to `9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Digit for `value`, or `None` above nine.
    ///
    /// # Examples
    /// ```
    /// use keypad::Digit;
    ///
    /// assert_eq!(Digit::new(7).map(Digit::as_char), Some('7'));
    /// assert!(Digit::new(10).is_none());
    /// ```
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    /// The digit as typed.
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Arithmetic operator keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`, shown as `×` on the keypad.
    Multiply,
    /// `/`
    Divide,
}

impl Operator {
    /// Symbol appended to the pending expression.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

/// One key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A digit key.
    Digit(Digit),
    /// The decimal point key.
    Decimal,
    /// An operator key.
    Operator(Operator),
    /// `=`: submit the assembled expression.
    Equals,
    /// `C`: reset the keypad.
    Clear,
}

/// A character with no key on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no key for character {character:?}")]
pub struct KeyParseError {
    /// The rejected character.
    pub character: char,
}

impl TryFrom<char> for Key {
    type Error = KeyParseError;

    fn try_from(character: char) -> Result<Self, Self::Error> {
        let key = match character {
            '0'..='9' => character
                .to_digit(10)
                .and_then(|value| u8::try_from(value).ok())
                .and_then(Digit::new)
                .map(Self::Digit),
            '.' => Some(Self::Decimal),
            '+' => Some(Self::Operator(Operator::Add)),
            '-' => Some(Self::Operator(Operator::Subtract)),
            '*' | 'x' | 'X' | '×' => Some(Self::Operator(Operator::Multiply)),
            '/' | '÷' => Some(Self::Operator(Operator::Divide)),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            _ => None,
        };
        key.ok_or(KeyParseError { character })
    }
}

/// Parse a run of key characters, skipping whitespace.
///
/// # Errors
///
/// Returns [`KeyParseError`] for the first character with no key.
///
/// # Examples
/// ```
/// use keypad::{Key, Operator, parse_keys};
///
/// let keys = parse_keys("7 × 3 =").expect("valid keys");
/// assert_eq!(keys.len(), 4);
/// assert_eq!(keys.get(1), Some(&Key::Operator(Operator::Multiply)));
/// ```
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeyParseError> {
    input
        .chars()
        .filter(|character| !character.is_whitespace())
        .map(Key::try_from)
        .collect()
}
