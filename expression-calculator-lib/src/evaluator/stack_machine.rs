use crate::evaluator::error::EvaluateError;
use crate::evaluator::token::Token;

/// Evaluates the given postfix token sequence with a numeric stack.
///
/// Literals push their value. An operator pops its second operand first,
/// then its first, and pushes `first OP second`; the order matters for
/// subtraction, division, remainder and exponentiation. After the last
/// token, exactly one value must remain on the stack, and that value is
/// the result — anything else means the sequence was malformed.
///
/// # Arguments
///
/// * `postfix_tokens`: The token sequence to evaluate, in postfix format.
///
/// returns: The numeric value of the sequence.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use expression_calculator::evaluator::stack_machine::evaluate_postfix;
/// use expression_calculator::evaluator::token::Token;
///
/// let postfix_tokens = vec![
///     Token::Literal(2.0),
///     Token::Literal(3.0),
///     Token::Plus,
/// ];
/// assert_eq!(evaluate_postfix(postfix_tokens)?, 5.0);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn evaluate_postfix(postfix_tokens: Vec<Token>) -> Result<f64, EvaluateError> {
    let mut stack: Vec<f64> = Vec::new();

    for token in postfix_tokens {
        match token {
            Token::Literal(value) => stack.push(value),
            ref operator_token => {
                let operator = match operator_token.as_binary_operator() {
                    Some(operator) => operator,
                    None => {
                        return Err(EvaluateError::malformed(format!(
                            "unexpected token '{}' in postfix sequence",
                            operator_token
                        )))
                    }
                };
                let second_operand = match stack.pop() {
                    Some(value) => value,
                    None => {
                        return Err(EvaluateError::malformed(format!(
                            "operator '{}' is missing an operand",
                            operator_token
                        )))
                    }
                };
                let first_operand = match stack.pop() {
                    Some(value) => value,
                    None => {
                        return Err(EvaluateError::malformed(format!(
                            "operator '{}' is missing an operand",
                            operator_token
                        )))
                    }
                };
                stack.push(operator.evaluate(first_operand, second_operand)?);
            }
        }
    }

    let result = match stack.pop() {
        Some(value) => value,
        None => return Err(EvaluateError::malformed("expression is empty")),
    };
    if !stack.is_empty() {
        return Err(EvaluateError::malformed(
            "expression leaves leftover operands",
        ));
    }
    Ok(result)
}
