//! Recursive-descent parser and evaluator.
//!
//! ```text
//! expression := term (("+" | "-") term)*
//! term       := factor (("*" | "/") factor)*
//! factor     := ("+" | "-") factor | primary
//! primary    := number | "(" expression ")"
//! ```

use super::lexer::{Token, TokenKind};
use super::{EvaluationError, SyntaxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Expr {
    Number(f64),
    Negate(Box<Expr>),
    Binary {
        operator: BinaryOperator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate the tree, rejecting any non-finite intermediate.
    pub(super) fn evaluate(&self) -> Result<f64, EvaluationError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Negate(inner) => -inner.evaluate()?,
            Self::Binary { operator, lhs, rhs } => {
                apply(*operator, lhs.evaluate()?, rhs.evaluate()?)?
            }
        };
        finite(value)
    }
}

fn apply(operator: BinaryOperator, lhs: f64, rhs: f64) -> Result<f64, EvaluationError> {
    let value = match operator {
        BinaryOperator::Add => lhs + rhs,
        BinaryOperator::Subtract => lhs - rhs,
        BinaryOperator::Multiply => lhs * rhs,
        BinaryOperator::Divide if rhs == 0.0 => return Err(EvaluationError::NonFiniteResult),
        BinaryOperator::Divide => lhs / rhs,
    };
    finite(value)
}

const fn finite(value: f64) -> Result<f64, EvaluationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::NonFiniteResult)
    }
}

/// Parse a complete token stream into an expression tree.
pub(super) fn parse(tokens: &[Token]) -> Result<Expr, SyntaxError> {
    let mut parser = Parser {
        tokens,
        position: 0,
    };
    let tree = parser.expression()?;
    match parser.peek() {
        None => Ok(tree),
        Some(Token {
            kind: TokenKind::CloseParen,
            offset,
        }) => Err(SyntaxError::UnbalancedParenthesis { offset }),
        Some(Token { offset, .. }) => Err(SyntaxError::UnexpectedToken { offset }),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<Expr, SyntaxError> {
        let mut tree = self.term()?;
        loop {
            let operator = match self.peek().map(|token| token.kind) {
                Some(TokenKind::Plus) => BinaryOperator::Add,
                Some(TokenKind::Minus) => BinaryOperator::Subtract,
                _ => return Ok(tree),
            };
            self.advance();
            let rhs = self.term()?;
            tree = binary(operator, tree, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, SyntaxError> {
        let mut tree = self.factor()?;
        loop {
            let operator = match self.peek().map(|token| token.kind) {
                Some(TokenKind::Star) => BinaryOperator::Multiply,
                Some(TokenKind::Slash) => BinaryOperator::Divide,
                _ => return Ok(tree),
            };
            self.advance();
            let rhs = self.factor()?;
            tree = binary(operator, tree, rhs);
        }
    }

    fn factor(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek().map(|token| token.kind) {
            Some(TokenKind::Plus) => {
                self.advance();
                self.factor()
            }
            Some(TokenKind::Minus) => {
                self.advance();
                Ok(Expr::Negate(Box::new(self.factor()?)))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.advance().ok_or(SyntaxError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::OpenParen => self.parenthesised(token.offset),
            _ => Err(SyntaxError::UnexpectedToken {
                offset: token.offset,
            }),
        }
    }

    fn parenthesised(&mut self, open_offset: usize) -> Result<Expr, SyntaxError> {
        if let Some(Token {
            kind: TokenKind::CloseParen,
            ..
        }) = self.peek()
        {
            return Err(SyntaxError::EmptyParentheses {
                offset: open_offset,
            });
        }

        let inner = self.expression().map_err(|error| match error {
            SyntaxError::UnexpectedEnd => SyntaxError::UnbalancedParenthesis {
                offset: open_offset,
            },
            other => other,
        })?;

        match self.advance() {
            Some(Token {
                kind: TokenKind::CloseParen,
                ..
            }) => Ok(inner),
            Some(token) => Err(SyntaxError::UnexpectedToken {
                offset: token.offset,
            }),
            None => Err(SyntaxError::UnbalancedParenthesis {
                offset: open_offset,
            }),
        }
    }
}

fn binary(operator: BinaryOperator, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        operator,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
