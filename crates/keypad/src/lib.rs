//! Calculator keypad client.
//!
//! The crate models the keypad a person presses to build an arithmetic
//! expression, and the gateway that submits finished expressions to the
//! calculator backend.
//!
//! # Overview
//!
//! - [`Keypad`]: display, pending expression and waiting-for-operand flag.
//!   [`Keypad::press_and_refresh`] reloads history after each result.
//! - [`Key`] and [`parse_keys`]: key presses from characters such as `7+3=`.
//! - [`CalculatorGateway`]: the backend boundary, with the reqwest-backed
//!   [`HttpCalculatorGateway`].
//! - [`ClientSettings`]: `CALCULATOR_API_URL` loaded through OrthoConfig.
//!
//! # Example
//!
//! ```
//! use keypad::{Key, Keypad, Operator};
//!
//! let mut keypad = Keypad::new();
//! for key in keypad::parse_keys("12+").expect("valid keys") {
//!     match key {
//!         Key::Digit(digit) => keypad.press_digit(digit),
//!         Key::Decimal => keypad.press_decimal(),
//!         Key::Operator(operator) => keypad.press_operator(operator),
//!         Key::Clear => keypad.clear(),
//!         Key::Equals => {}
//!     }
//! }
//!
//! assert_eq!(keypad.expression(), "12+");
//! assert!(keypad.is_waiting_for_operand());
//! assert_eq!(Operator::Add.symbol(), '+');
//! ```

mod gateway;
mod key;
mod settings;
mod state;

pub use gateway::{
    CalculatorGateway, Evaluation, GatewayError, HistoryEntry, HttpCalculatorGateway,
};
pub use key::{Digit, Key, KeyParseError, Operator, parse_keys};
pub use settings::{ClientSettings, DEFAULT_API_URL, SettingsError};
pub use state::{ERROR_MARKER, KeyOutcome, Keypad};
