use crate::evaluator::error::EvaluateError;
use crate::evaluator::operator::{Associativity, BinaryOperator};
use crate::evaluator::token::Token;
use std::collections::VecDeque;

/// Reorders the given infix tokens into postfix (reverse Polish) order
/// using the shunting-yard algorithm.
///
/// Parentheses never appear in the output; they only group operators on
/// the intermediate stack. Mismatched parentheses surface as malformed
/// expressions rather than a stack underflow.
pub(crate) fn infix_to_postfix(original_tokens: Vec<Token>) -> Result<Vec<Token>, EvaluateError> {
    let mut tokens: VecDeque<Token> = VecDeque::from(original_tokens);
    let mut operators: VecDeque<Token> = VecDeque::new();
    let mut output: Vec<Token> = vec![];
    while let Some(token) = tokens.pop_front() {
        match token {
            Token::Literal(_) => output.push(token),
            Token::OpenParenthesis => operators.push_front(token),
            Token::CloseParenthesis => pop_until_open_parenthesis(&mut operators, &mut output)?,
            ref operator_token => {
                let operator = match operator_token.as_binary_operator() {
                    Some(operator) => operator,
                    None => {
                        return Err(EvaluateError::malformed(format!(
                            "unexpected token '{}'",
                            operator_token
                        )))
                    }
                };
                pop_tighter_binding_operators(&mut operators, &mut output, &operator)?;
            }
        };
    }

    transfer_leftover_operators(&mut operators, &mut output)?;

    Ok(output)
}

fn transfer_leftover_operators(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
) -> Result<(), EvaluateError> {
    while let Some(operator) = operators.pop_front() {
        match operator {
            Token::OpenParenthesis | Token::CloseParenthesis => {
                return Err(EvaluateError::malformed("mismatched parenthesis"));
            }
            operator => output.push(operator),
        }
    }
    Ok(())
}

fn pop_until_open_parenthesis(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
) -> Result<(), EvaluateError> {
    loop {
        match operators.pop_front() {
            None => {
                return Err(EvaluateError::malformed("mismatched parenthesis"));
            }
            Some(Token::OpenParenthesis) => {
                // Discard the open parenthesis.
                return Ok(());
            }
            Some(operator) => output.push(operator),
        }
    }
}

/// Pops operators that bind at least as tightly as the incoming operator
/// off the stack into the output, then pushes the incoming operator.
///
/// The comparison is `>=` for left-associative operators and `>` for
/// right-associative ones; since every operator in this alphabet is
/// left-associative, equal precedence always pops.
fn pop_tighter_binding_operators(
    operators: &mut VecDeque<Token>,
    output: &mut Vec<Token>,
    operator: &BinaryOperator,
) -> Result<(), EvaluateError> {
    loop {
        match operators.front() {
            None => {
                break;
            }
            Some(top_of_operator_stack) => {
                if Token::OpenParenthesis.eq(top_of_operator_stack) {
                    break;
                }

                let other_operator = match top_of_operator_stack.as_binary_operator() {
                    Some(operator) => operator,
                    None => {
                        return Err(EvaluateError::malformed(
                            "found non-operator in operator stack",
                        ))
                    }
                };
                if other_operator.precedence_lt(operator)
                    || (other_operator.precedence_eq(operator)
                        && operator.associativity() != Associativity::Left)
                {
                    break;
                }

                match operators.pop_front() {
                    Some(other_operator_token) => output.push(other_operator_token),
                    None => return Err(EvaluateError::malformed("no operators left")),
                }
            }
        }
    }

    operators.push_front(operator.token());
    Ok(())
}
