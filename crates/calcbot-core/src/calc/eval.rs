use super::{EvalError, Token};

/// Evaluate a postfix token sequence with an operand stack.
pub fn evaluate_postfix(tokens: &[Token]) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Number(text) => stack.push(parse_number(text)?),
            Token::Operator(op) => {
                // The operand pushed last is the right-hand side.
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(EvalError::InsufficientOperands);
                };
                stack.push(op.apply(lhs, rhs)?);
            }
            Token::LParen | Token::RParen => return Err(EvalError::MismatchedParentheses),
        }
    }

    let [value] = stack.as_slice() else {
        return Err(EvalError::MalformedExpression);
    };
    if !value.is_finite() {
        return Err(EvalError::InvalidResult);
    }
    Ok(*value)
}

fn parse_number(text: &str) -> Result<f64, EvalError> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(EvalError::InvalidNumber(text.to_string())),
    }
}
