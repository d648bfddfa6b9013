pub mod error;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod stack_machine;
pub mod token;

use crate::debug;
use crate::evaluator::error::EvaluateError;
use crate::evaluator::token::Token;
use anyhow::{Context, Result};
use string_builder::Builder;

/// Evaluates the given arithmetic expression and returns its numeric value.
///
/// This is the single entry point composing the three pipeline stages:
/// the expression is tokenized, reordered into postfix form and evaluated
/// by a stack machine. Each call is an independent, stateless pipeline
/// over its input string.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The numeric value of the expression.
///
/// # Examples
///
/// ```
/// use expression_calculator::evaluator::evaluate;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let result = evaluate("2+3*4".to_string())?;
/// assert_eq!(result, 14.0);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn evaluate(expression: String) -> Result<f64, EvaluateError> {
    let tokens = lexer::tokenize(expression)?;
    debug!(&tokens);
    let postfix_tokens = parser::parse(tokens)?;
    debug!(&postfix_tokens);
    stack_machine::evaluate_postfix(postfix_tokens)
}

/// Pretty-prints the given vector of tokens with added whitespace.
///
/// Single-character operators are surrounded by spaces; `**` binds its
/// operands visually and stays unspaced, as do parentheses.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use expression_calculator::evaluator::tokens_to_string;
/// use expression_calculator::evaluator::token::Token;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::Literal(2.0),
///     Token::Plus,
///     Token::Literal(3.0),
/// ];
/// let pretty_printed_tokens = tokens_to_string(tokens)?;
/// assert_eq!(pretty_printed_tokens, "2 + 3");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len());

    for token in tokens {
        match token {
            Token::Literal(value) => builder.append(value.to_string()),
            Token::DoubleAsterisk => builder.append(token.to_string()),
            Token::Plus | Token::Dash | Token::Asterisk | Token::ForwardSlash | Token::Percent => {
                builder.append(" ");
                builder.append(token.to_string());
                builder.append(" ");
            }
            _ => builder.append(token.to_string()),
        }
    }

    builder.string().context("Failed to build token string")
}

#[macro_export]
#[cfg(debug_assertions)]
macro_rules! debug {
    ($( $args:expr ),*) => { dbg!( $( $args ),* ); }
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! debug {
    ($( $args:expr ),*) => {()}
}
