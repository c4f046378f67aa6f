//! Keypad state machine.

use tracing::{debug, warn};

use crate::gateway::{CalculatorGateway, Evaluation, GatewayError, HistoryEntry};
use crate::key::{Digit, Key, Operator};

/// Display text after a failed evaluation.
pub const ERROR_MARKER: &str = "Error";

const INITIAL_DISPLAY: &str = "0";

/// Display, pending expression and waiting-for-operand flag.
///
/// The pending expression holds every completed operand followed by its
/// operator; the display holds the operand being typed. `=` submits their
/// concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    display: String,
    expression: String,
    waiting_for_operand: bool,
}

impl Default for Keypad {
    fn default() -> Self {
        Self {
            display: INITIAL_DISPLAY.to_owned(),
            expression: String::new(),
            waiting_for_operand: false,
        }
    }
}

impl Keypad {
    /// Keypad showing `0` with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Operand currently shown.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Operator-joined prefix awaiting the next operand.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Whether the next digit starts a new operand.
    #[must_use]
    pub const fn is_waiting_for_operand(&self) -> bool {
        self.waiting_for_operand
    }

    /// Expression `=` would submit, or `None` when there is nothing to send.
    #[must_use]
    pub fn pending_submission(&self) -> Option<String> {
        let full = format!("{}{}", self.expression, self.display);
        if full.is_empty() { None } else { Some(full) }
    }

    /// Type a digit.
    pub fn press_digit(&mut self, digit: Digit) {
        if self.waiting_for_operand {
            self.display = digit.to_string();
            self.waiting_for_operand = false;
        } else if self.display == INITIAL_DISPLAY {
            self.display = digit.to_string();
        } else {
            self.display.push(digit.as_char());
        }
    }

    /// Type the decimal point. An operand holds at most one.
    pub fn press_decimal(&mut self) {
        if self.waiting_for_operand {
            self.display = "0.".to_owned();
            self.waiting_for_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Close the current operand with `operator`.
    pub fn press_operator(&mut self, operator: Operator) {
        self.expression.push_str(&self.display);
        self.expression.push(operator.symbol());
        self.waiting_for_operand = true;
    }

    /// Reset to the initial state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Submit the assembled expression through `gateway`.
    ///
    /// On success the display shows the result and the next digit starts a
    /// fresh operand. On any failure the display shows [`ERROR_MARKER`]. The
    /// pending expression is cleared either way. Returns `None` without
    /// calling the gateway when nothing is assembled.
    pub async fn evaluate<G>(&mut self, gateway: &G) -> Option<Result<Evaluation, GatewayError>>
    where
        G: CalculatorGateway + ?Sized,
    {
        let full = self.pending_submission()?;
        debug!(expression = %full, "submitting expression");
        let outcome = gateway.calculate(&full).await;
        match &outcome {
            Ok(evaluation) => {
                self.display.clone_from(&evaluation.result);
                self.expression.clear();
                self.waiting_for_operand = true;
            }
            Err(error) => {
                warn!(%error, expression = %full, "calculation failed");
                ERROR_MARKER.clone_into(&mut self.display);
                self.expression.clear();
            }
        }
        Some(outcome)
    }

    /// Apply one key press. Only [`Key::Equals`] reaches the gateway.
    pub async fn press<G>(
        &mut self,
        key: Key,
        gateway: &G,
    ) -> Option<Result<Evaluation, GatewayError>>
    where
        G: CalculatorGateway + ?Sized,
    {
        match key {
            Key::Digit(digit) => self.press_digit(digit),
            Key::Decimal => self.press_decimal(),
            Key::Operator(operator) => self.press_operator(operator),
            Key::Clear => self.clear(),
            Key::Equals => return self.evaluate(gateway).await,
        }
        None
    }

    /// Apply one key press and reload history after a successful `=`.
    ///
    /// A failed reload is logged and reported in [`KeyOutcome::history`];
    /// it never changes the keypad.
    pub async fn press_and_refresh<G>(&mut self, key: Key, gateway: &G) -> KeyOutcome
    where
        G: CalculatorGateway + ?Sized,
    {
        let evaluation = self.press(key, gateway).await;
        let history = match &evaluation {
            Some(Ok(_)) => {
                let listed = gateway.history().await;
                if let Err(error) = &listed {
                    warn!(%error, "history refresh failed");
                }
                Some(listed)
            }
            _ => None,
        };
        KeyOutcome {
            evaluation,
            history,
        }
    }
}

/// Result of [`Keypad::press_and_refresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Gateway answer when the key was `=` with something to submit.
    pub evaluation: Option<Result<Evaluation, GatewayError>>,
    /// Reloaded history, present only after a successful evaluation.
    pub history: Option<Result<Vec<HistoryEntry>, GatewayError>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::HistoryEntry;
    use crate::key::parse_keys;
    use async_trait::async_trait;
    use rstest::{fixture, rstest};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Gateway answering every calculation with one canned outcome.
    struct ScriptedGateway {
        outcome: Result<String, GatewayError>,
        submitted: Mutex<Vec<String>>,
        history_reads: AtomicUsize,
    }

    impl ScriptedGateway {
        fn answering(result: &str) -> Self {
            Self {
                outcome: Ok(result.to_owned()),
                submitted: Mutex::new(Vec::new()),
                history_reads: AtomicUsize::new(0),
            }
        }

        fn failing(error: GatewayError) -> Self {
            Self {
                outcome: Err(error),
                submitted: Mutex::new(Vec::new()),
                history_reads: AtomicUsize::new(0),
            }
        }

        fn submitted(&self) -> Vec<String> {
            self.submitted.lock().expect("submitted lock").clone()
        }
    }

    #[async_trait]
    impl CalculatorGateway for ScriptedGateway {
        async fn calculate(&self, expression: &str) -> Result<Evaluation, GatewayError> {
            self.submitted
                .lock()
                .expect("submitted lock")
                .push(expression.to_owned());
            self.outcome.clone().map(|result| Evaluation {
                expression: expression.to_owned(),
                result,
            })
        }

        async fn history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
            self.history_reads.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn clear_history(&self) -> Result<(), GatewayError> {
            Ok(())
        }
    }

    #[fixture]
    fn keypad() -> Keypad {
        Keypad::new()
    }

    fn digit(value: u8) -> Digit {
        Digit::new(value).expect("digit in range")
    }

    async fn type_keys(keypad: &mut Keypad, gateway: &ScriptedGateway, keys: &str) {
        for key in parse_keys(keys).expect("valid keys") {
            let _ = keypad.press(key, gateway).await;
        }
    }

    #[rstest]
    fn starts_at_zero(keypad: Keypad) {
        assert_eq!(keypad.display(), "0");
        assert_eq!(keypad.expression(), "");
        assert!(!keypad.is_waiting_for_operand());
    }

    #[rstest]
    fn leading_zero_is_replaced(mut keypad: Keypad) {
        keypad.press_digit(digit(0));
        keypad.press_digit(digit(7));
        assert_eq!(keypad.display(), "7");
        keypad.press_digit(digit(0));
        assert_eq!(keypad.display(), "70");
    }

    #[rstest]
    fn decimal_point_appears_once_per_operand(mut keypad: Keypad) {
        keypad.press_decimal();
        keypad.press_digit(digit(5));
        keypad.press_decimal();
        assert_eq!(keypad.display(), "0.5");
    }

    #[rstest]
    fn decimal_after_operator_starts_new_operand(mut keypad: Keypad) {
        keypad.press_digit(digit(3));
        keypad.press_operator(Operator::Multiply);
        keypad.press_decimal();
        assert_eq!(keypad.display(), "0.");
        assert!(!keypad.is_waiting_for_operand());
        assert_eq!(keypad.expression(), "3*");
    }

    #[rstest]
    fn operator_moves_display_into_expression(mut keypad: Keypad) {
        keypad.press_digit(digit(1));
        keypad.press_digit(digit(2));
        keypad.press_operator(Operator::Add);
        assert_eq!(keypad.expression(), "12+");
        assert_eq!(keypad.display(), "12");
        assert!(keypad.is_waiting_for_operand());

        keypad.press_digit(digit(4));
        assert_eq!(keypad.display(), "4");
        assert_eq!(keypad.pending_submission().as_deref(), Some("12+4"));
    }

    #[rstest]
    fn clear_resets_everything(mut keypad: Keypad) {
        keypad.press_digit(digit(9));
        keypad.press_operator(Operator::Divide);
        keypad.clear();
        assert_eq!(keypad, Keypad::new());
    }

    #[rstest]
    #[tokio::test]
    async fn equals_shows_result_and_waits_for_operand(mut keypad: Keypad) {
        let gateway = ScriptedGateway::answering("10");
        type_keys(&mut keypad, &gateway, "7+3=").await;

        assert_eq!(gateway.submitted(), vec!["7+3".to_owned()]);
        assert_eq!(keypad.display(), "10");
        assert_eq!(keypad.expression(), "");
        assert!(keypad.is_waiting_for_operand());

        keypad.press_digit(digit(2));
        assert_eq!(keypad.display(), "2");
    }

    #[rstest]
    #[case(GatewayError::Rejected { status: 400, message: "Invalid expression".to_owned() })]
    #[case(GatewayError::Transport { message: "connection refused".to_owned() })]
    #[case(GatewayError::Decode { message: "expected value".to_owned() })]
    #[tokio::test]
    async fn any_failure_shows_error_marker(mut keypad: Keypad, #[case] error: GatewayError) {
        let gateway = ScriptedGateway::failing(error.clone());
        type_keys(&mut keypad, &gateway, "8/").await;

        let outcome = keypad.press(Key::Equals, &gateway).await;

        assert_eq!(outcome, Some(Err(error)));
        assert_eq!(keypad.display(), ERROR_MARKER);
        assert_eq!(keypad.expression(), "");
        assert_eq!(gateway.submitted(), vec!["8/8".to_owned()]);
    }

    #[rstest]
    #[tokio::test]
    async fn non_equals_keys_never_reach_the_gateway(mut keypad: Keypad) {
        let gateway = ScriptedGateway::answering("unused");
        for key in parse_keys("1.5*2C").expect("valid keys") {
            assert!(keypad.press(key, &gateway).await.is_none());
        }
        assert!(gateway.submitted().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn successful_equals_reloads_history(mut keypad: Keypad) {
        let gateway = ScriptedGateway::answering("6");
        type_keys(&mut keypad, &gateway, "2*3").await;

        let outcome = keypad.press_and_refresh(Key::Equals, &gateway).await;

        assert_eq!(outcome.history, Some(Ok(Vec::new())));
        assert_eq!(gateway.history_reads.load(Ordering::SeqCst), 1);
        assert_eq!(keypad.display(), "6");
    }

    #[rstest]
    #[tokio::test]
    async fn failed_equals_and_plain_keys_skip_history(mut keypad: Keypad) {
        let gateway = ScriptedGateway::failing(GatewayError::Transport {
            message: "connection refused".to_owned(),
        });

        let digit_outcome = keypad.press_and_refresh(Key::Digit(digit(4)), &gateway).await;
        let equals_outcome = keypad.press_and_refresh(Key::Equals, &gateway).await;

        assert_eq!(digit_outcome.history, None);
        assert!(matches!(equals_outcome.evaluation, Some(Err(_))));
        assert_eq!(equals_outcome.history, None);
        assert_eq!(gateway.history_reads.load(Ordering::SeqCst), 0);
    }
}
