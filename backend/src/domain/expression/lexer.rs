//! Tokeniser for allow-listed expression text.

use std::iter::Peekable;
use std::str::CharIndices;

use super::SyntaxError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    OpenParen,
    CloseParen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) offset: usize,
}

/// Split `input` into tokens.
///
/// Callers have already rejected characters outside the allow-list, so every
/// character is single-byte and byte offsets equal character offsets.
///
/// `++` and `--` written without a space are rejected, as are literals with
/// a leading zero such as `007`; `2- -3` and `0.5` are fine.
pub(super) fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut chars = input.char_indices().peekable();
    let mut tokens = Vec::new();

    while let Some(&(offset, character)) = chars.peek() {
        let kind = match character {
            ' ' => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => lex_number(&mut chars, offset)?,
            '+' | '-' if is_doubled(input, offset, character) => {
                return Err(SyntaxError::UnexpectedToken { offset });
            }
            '+' => single(&mut chars, TokenKind::Plus),
            '-' => single(&mut chars, TokenKind::Minus),
            '*' => single(&mut chars, TokenKind::Star),
            '/' => single(&mut chars, TokenKind::Slash),
            '(' => single(&mut chars, TokenKind::OpenParen),
            ')' => single(&mut chars, TokenKind::CloseParen),
            _ => return Err(SyntaxError::UnexpectedToken { offset }),
        };
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

fn single(chars: &mut Peekable<CharIndices<'_>>, kind: TokenKind) -> TokenKind {
    chars.next();
    kind
}

fn lex_number(
    chars: &mut Peekable<CharIndices<'_>>,
    offset: usize,
) -> Result<TokenKind, SyntaxError> {
    let mut literal = String::new();
    let mut points = 0_usize;
    let mut digits = 0_usize;

    while let Some(&(_, character)) = chars.peek() {
        match character {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => break,
        }
        literal.push(character);
        chars.next();
    }

    if points > 1 || digits == 0 || has_leading_zero(&literal) {
        return Err(SyntaxError::MalformedNumber { offset });
    }

    literal
        .parse::<f64>()
        .map(TokenKind::Number)
        .map_err(|_| SyntaxError::MalformedNumber { offset })
}

/// `character` at `offset` is immediately repeated.
fn is_doubled(input: &str, offset: usize, character: char) -> bool {
    input
        .get(offset + 1..)
        .is_some_and(|rest| rest.starts_with(character))
}

/// `0` followed directly by another digit.
fn has_leading_zero(literal: &str) -> bool {
    let mut characters = literal.chars();
    characters.next() == Some('0') && characters.next().is_some_and(|next| next.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .expect("tokenise")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[rstest]
    fn splits_operators_and_numbers() {
        assert_eq!(
            kinds("12+(3.5*.5)"),
            vec![
                TokenKind::Number(12.0),
                TokenKind::Plus,
                TokenKind::OpenParen,
                TokenKind::Number(3.5),
                TokenKind::Star,
                TokenKind::Number(0.5),
                TokenKind::CloseParen,
            ]
        );
    }

    #[rstest]
    fn records_offsets_past_whitespace() {
        let tokens = tokenize("  7 /  2").expect("tokenise");
        let offsets: Vec<usize> = tokens.iter().map(|token| token.offset).collect();
        assert_eq!(offsets, vec![2, 4, 7]);
    }

    #[rstest]
    #[case("1.2.3", 0)]
    #[case("4+.", 2)]
    #[case("..", 0)]
    fn rejects_malformed_literals(#[case] input: &str, #[case] offset: usize) {
        assert_eq!(
            tokenize(input),
            Err(SyntaxError::MalformedNumber { offset })
        );
    }

    #[rstest]
    fn accepts_trailing_point() {
        assert_eq!(kinds("5."), vec![TokenKind::Number(5.0)]);
    }

    #[rstest]
    #[case("2--3", 1)]
    #[case("2++3", 1)]
    #[case("--1", 0)]
    #[case("4*(5++1)", 4)]
    fn rejects_doubled_signs(#[case] input: &str, #[case] offset: usize) {
        assert_eq!(tokenize(input), Err(SyntaxError::UnexpectedToken { offset }));
    }

    #[rstest]
    fn accepts_spaced_signs() {
        assert_eq!(
            kinds("2- -3"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Minus,
                TokenKind::Minus,
                TokenKind::Number(3.0),
            ]
        );
    }

    #[rstest]
    #[case("007", 0)]
    #[case("1+08", 2)]
    #[case("00.5", 0)]
    fn rejects_leading_zeros(#[case] input: &str, #[case] offset: usize) {
        assert_eq!(tokenize(input), Err(SyntaxError::MalformedNumber { offset }));
    }

    #[rstest]
    #[case("0", 0.0)]
    #[case("0.25", 0.25)]
    #[case("10", 10.0)]
    #[case(".05", 0.05)]
    fn accepts_zero_prefixed_decimals(#[case] input: &str, #[case] value: f64) {
        assert_eq!(kinds(input), vec![TokenKind::Number(value)]);
    }
}
