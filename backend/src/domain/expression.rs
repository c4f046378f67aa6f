//! Arithmetic expression evaluation.
//!
//! Expressions use the four basic operators, unary signs and parentheses over
//! decimal literals. Input passes through three gates before any arithmetic
//! happens:
//!
//! 1. presence (`None` or `""` is [`EvaluationError::MissingExpression`]),
//! 2. the character allow-list `0-9 + - * / . ( )` and space,
//! 3. the storage width of [`MAX_EXPRESSION_LENGTH`] characters.
//!
//! The remaining text is tokenised (`++`, `--` and literals such as `007` are
//! syntax errors), parsed by recursive descent into a small
//! tree and evaluated in `f64`. Any non-finite intermediate, including a
//! division by zero, is rejected.
//!
//! # Examples
//! ```
//! use calculator_backend::domain::expression::evaluate;
//!
//! let evaluation = evaluate(Some("(2 + 3) * 4")).expect("valid expression");
//! assert_eq!(evaluation.result, "20");
//! ```

mod lexer;
mod number_format;
mod parser;

pub use number_format::format_number;

/// Longest expression accepted, matching the history column width.
pub const MAX_EXPRESSION_LENGTH: usize = 255;

/// Successful evaluation of a submitted expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The expression exactly as submitted.
    pub expression: String,
    /// Result rendered in shortest round-trip decimal form.
    pub result: String,
}

/// Reasons an expression cannot be evaluated.
///
/// Display strings are the client-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// No expression was supplied.
    #[error("Expression is required")]
    MissingExpression,
    /// The expression contains a character outside the allow-list.
    #[error("Invalid characters in expression")]
    InvalidCharacters {
        /// First offending character.
        character: char,
        /// Character offset of `character`.
        offset: usize,
    },
    /// The expression is longer than [`MAX_EXPRESSION_LENGTH`].
    #[error("Expression must be at most {max} characters")]
    ExpressionTooLong {
        /// Submitted length in characters.
        length: usize,
        /// Accepted maximum.
        max: usize,
    },
    /// The expression does not match the grammar.
    #[error("Invalid expression")]
    Syntax(#[from] SyntaxError),
    /// Evaluation produced an infinite or NaN value.
    #[error("Invalid calculation result")]
    NonFiniteResult,
}

/// Grammar violations with the offset where parsing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// Input ended where an operand was expected.
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// A token appeared where the grammar does not allow it.
    #[error("unexpected token at offset {offset}")]
    UnexpectedToken {
        /// Offset of the token.
        offset: usize,
    },
    /// A parenthesis has no partner.
    #[error("unbalanced parenthesis at offset {offset}")]
    UnbalancedParenthesis {
        /// Offset of the unmatched parenthesis.
        offset: usize,
    },
    /// A numeric literal is not a valid decimal.
    #[error("malformed number at offset {offset}")]
    MalformedNumber {
        /// Offset where the literal starts.
        offset: usize,
    },
    /// `()` with nothing inside.
    #[error("empty parentheses at offset {offset}")]
    EmptyParentheses {
        /// Offset of the opening parenthesis.
        offset: usize,
    },
}

impl SyntaxError {
    /// Offset where parsing failed, when known.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedEnd => None,
            Self::UnexpectedToken { offset }
            | Self::UnbalancedParenthesis { offset }
            | Self::MalformedNumber { offset }
            | Self::EmptyParentheses { offset } => Some(*offset),
        }
    }
}

const fn is_allowed(character: char) -> bool {
    matches!(
        character,
        '0'..='9' | '+' | '-' | '*' | '/' | '.' | '(' | ')' | ' '
    )
}

/// Validate and evaluate `raw`.
///
/// # Errors
///
/// Returns an [`EvaluationError`] describing the first gate that rejected
/// the input.
pub fn evaluate(raw: Option<&str>) -> Result<Evaluation, EvaluationError> {
    let expression = match raw {
        Some(text) if !text.is_empty() => text,
        _ => return Err(EvaluationError::MissingExpression),
    };

    if let Some((offset, character)) = expression
        .chars()
        .enumerate()
        .find(|(_, character)| !is_allowed(*character))
    {
        return Err(EvaluationError::InvalidCharacters { character, offset });
    }

    let length = expression.chars().count();
    if length > MAX_EXPRESSION_LENGTH {
        return Err(EvaluationError::ExpressionTooLong {
            length,
            max: MAX_EXPRESSION_LENGTH,
        });
    }

    let tokens = lexer::tokenize(expression)?;
    let tree = parser::parse(&tokens)?;
    let value = tree.evaluate()?;

    Ok(Evaluation {
        expression: expression.to_owned(),
        result: format_number(value),
    })
}
