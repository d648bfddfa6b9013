use crate::evaluator::error::EvaluateError;
use crate::evaluator::operator::BinaryOperator;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A discrete part of an expression
#[derive(Clone, PartialEq)]
pub enum Token {
    Literal(f64),
    Plus,
    Dash,
    Asterisk,
    ForwardSlash,
    Percent,
    DoubleAsterisk,
    OpenParenthesis,
    CloseParenthesis,
}

impl Token {
    /// A 'value' is a token that represents a numerical value.
    pub fn is_value(&self) -> bool {
        matches!(self, Token::Literal(_))
    }

    /// The operator this token stands for, if it is an operator symbol.
    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Token::Plus => Some(BinaryOperator::Add),
            Token::Dash => Some(BinaryOperator::Subtract),
            Token::Asterisk => Some(BinaryOperator::Multiply),
            Token::ForwardSlash => Some(BinaryOperator::Divide),
            Token::Percent => Some(BinaryOperator::Remainder),
            Token::DoubleAsterisk => Some(BinaryOperator::Exponentiate),
            Token::Literal(_) | Token::OpenParenthesis | Token::CloseParenthesis => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) => write!(f, "{}", value),
            Token::Plus => write!(f, "+"),
            Token::Dash => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::ForwardSlash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::DoubleAsterisk => write!(f, "**"),
            Token::OpenParenthesis => write!(f, "("),
            Token::CloseParenthesis => write!(f, ")"),
        }
    }
}

impl str::FromStr for Token {
    type Err = EvaluateError;

    fn from_str(input: &str) -> Result<Token, Self::Err> {
        match input {
            "+" => Ok(Token::Plus),
            "-" => Ok(Token::Dash),
            "*" => Ok(Token::Asterisk),
            "/" => Ok(Token::ForwardSlash),
            "%" => Ok(Token::Percent),
            "**" => Ok(Token::DoubleAsterisk),
            "(" => Ok(Token::OpenParenthesis),
            ")" => Ok(Token::CloseParenthesis),
            input => parse_literal(input),
        }
    }
}

/// Parses the given text as a decimal numeral.
///
/// Only digits and a decimal point are accepted; in particular the signs
/// and exponent notation understood by [`f64::from_str`] are rejected,
/// since the expression alphabet has no way to produce them.
fn parse_literal(text: &str) -> Result<Token, EvaluateError> {
    let is_numeral = !text.is_empty()
        && text
            .chars()
            .all(|character| character.is_ascii_digit() || character == '.');
    if !is_numeral {
        return Err(EvaluateError::malformed(format!(
            "'{}' is not a valid numeral",
            text
        )));
    }
    match text.parse::<f64>() {
        Ok(value) => Ok(Token::Literal(value)),
        Err(_) => Err(EvaluateError::malformed(format!(
            "'{}' is not a valid numeral",
            text
        ))),
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
