use super::{EvalError, Token};

/// Reorder infix tokens into postfix (shunting-yard).
///
/// Only parenthesis balance is checked here; operand counts are the
/// evaluator's problem.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Operator(op) => {
                while let Some(&Token::Operator(top)) = stack.last() {
                    if !op.yields_to(top) {
                        break;
                    }
                    stack.pop();
                    output.push(Token::Operator(top));
                }
                stack.push(token);
            }
            Token::LParen => stack.push(token),
            Token::RParen => loop {
                match stack.pop() {
                    Some(Token::LParen) => break,
                    Some(top) => output.push(top),
                    None => return Err(EvalError::MismatchedParentheses),
                }
            },
        }
    }

    while let Some(top) = stack.pop() {
        if matches!(top, Token::LParen | Token::RParen) {
            return Err(EvalError::MismatchedParentheses);
        }
        output.push(top);
    }

    Ok(output)
}
